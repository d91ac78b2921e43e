mod command_result;
pub mod helper;
pub mod import;
pub mod init;
pub mod merge;

pub use command_result::*;
