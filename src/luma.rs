//! Luma conversion: collapses a color image to a single intensity value per
//! pixel, stored back into all three channels.

use image::{Rgb, RgbImage};
use log::debug;

/// Weighted sum of a pixel's color channels, truncated to an integer.
///
/// Note the 0.114/0.587 weights are applied to blue and green respectively,
/// the reverse of the conventional Rec. 601 luma coefficients. This matches
/// the tuning of the downstream thresholds, so it is kept as-is; "correcting"
/// it would shift every stage's output.
pub fn luma_value(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f64 + 0.114 * b as f64 + 0.587 * g as f64) as u8
}

/// Reads the intensity of a luma-converted pixel. All three channels hold the
/// same value after [convert_to_luma()]; the blue channel is the one the
/// whole pipeline consistently reads.
pub fn intensity(pixel: &Rgb<u8>) -> u8 {
    pixel.0[2]
}

/// Converts `image` to greyscale in place: every pixel becomes
/// (luma, luma, luma). Idempotent: once R=G=B, the weights sum the common
/// value back to itself.
pub fn convert_to_luma(image: &mut RgbImage) {
    let (width, height) = image.dimensions();
    for y in 0..height {
        for x in 0..width {
            let Rgb([r, g, b]) = *image.get_pixel(x, y);
            let grey = luma_value(r, g, b);
            image.put_pixel(x, y, Rgb([grey, grey, grey]));
        }
    }
    debug!("Luma converted {}x{} image", width, height);
}
