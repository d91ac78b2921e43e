//! Near-white alpha matting.

use image::{Rgba, RgbaImage};

/// Channel threshold used when none is configured.
pub const DEFAULT_THRESHOLD: u8 = 240;

/// Pixel written in place of every near-white pixel.
const CLEAR: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// A pixel is near-white when R, G and B are all strictly above `threshold`.
/// Alpha is not considered.
pub fn is_near_white(pixel: &Rgba<u8>, threshold: u8) -> bool {
    let [r, g, b, _] = pixel.0;
    r > threshold && g > threshold && b > threshold
}

/// Make every near-white pixel fully transparent. Other pixels are left as
/// they are. Returns the number of pixels cleared.
pub fn matte_near_white(img: &mut RgbaImage, threshold: u8) -> usize {
    let mut cleared = 0;
    for pixel in img.pixels_mut() {
        if is_near_white(pixel, threshold) {
            *pixel = CLEAR;
            cleared += 1;
        }
    }
    cleared
}
