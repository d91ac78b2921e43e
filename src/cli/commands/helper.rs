use super::{CommandResult, CommandSummary};

pub fn finish(summary: CommandSummary, exit_on_errors: bool) -> CommandResult {
    let error_count = match &summary {
        // Keys skipped under the warn policy are warnings, not failures.
        CommandSummary::Merge(_) => 0,
        CommandSummary::Import(import) => import.failed_count(),
        CommandSummary::Init(init) => usize::from(init.error.is_some()),
    };

    CommandResult {
        summary,
        error_count,
        exit_on_errors,
    }
}
