//! Noise reduction via a 4-neighbor (Von Neumann) majority rule.
//!
//! Each output pixel is decided by a priority-ordered table over the
//! intensities of its up/down/left/right neighbors, evaluated top to bottom
//! with the first matching rule winning:
//!
//! 1. Three neighbors agree, the fourth differs: output the majority value.
//!    Checked for each of the four "three-agree" rotations.
//! 2. All four neighbors agree: output the common value.
//! 3. One opposite-ish pair agrees while the complementary pair disagrees:
//!    output the agreeing pair's value, unless one member of the disagreeing
//!    pair equals the center, in which case output that member. Checked for
//!    six pair combinations in a fixed order.
//! 4. Fallback: keep the center value.
//!
//! Out-of-bounds neighbors contribute intensity 0, so the image border is
//! biased toward dark values. That matches the edge extractor's treatment of
//! the border and the tuning of the downstream ring thresholds.

use std::time::Instant;

use image::{Rgb, RgbImage};
use log::info;

use crate::luma::intensity;

// Resolves one pixel of the decision table. `centre` is the pixel's own
// intensity; the other arguments are its neighbors' intensities (0 when out
// of bounds). Rule order matters and must not be rearranged: the three-agree
// rules fire before the pairwise rules, and the pairwise rules are tried in
// the order left/right, up/down, up/right, down/left, left/up, down/right.
fn denoised_value(centre: u8, left: u8, right: u8, up: u8, down: u8) -> u8 {
    // Three-agree rotations.
    if left == up && up == right && down != up {
        return up;
    }
    if up == right && right == down && left != right {
        return right;
    }
    if right == down && down == left && up != down {
        return down;
    }
    if down == left && left == up && right != left {
        return left;
    }
    // Unanimous neighborhood.
    if left == up && up == right && right == down {
        return up;
    }
    // Pairwise rules. Ties go to whichever member of the disagreeing pair
    // matches the center.
    if left == right && up != down {
        if up != centre && down != centre {
            return left;
        } else if up == centre {
            return up;
        } else {
            return down;
        }
    }
    if up == down && left != right {
        if left != centre && right != centre {
            return up;
        } else if left == centre {
            return left;
        } else {
            return right;
        }
    }
    if up == right && down != left {
        if down != centre && left != centre {
            return up;
        } else if down == centre {
            return down;
        } else {
            return left;
        }
    }
    if down == left && up != right {
        if up != centre && right != centre {
            return left;
        } else if up == centre {
            return up;
        } else {
            return right;
        }
    }
    if left == up && down != right {
        if down != centre && right != centre {
            return left;
        } else if down == centre {
            return down;
        } else {
            return right;
        }
    }
    if down == right && left != up {
        if left != centre && up != centre {
            return down;
        } else if left == centre {
            return left;
        } else {
            return up;
        }
    }
    centre
}

/// Applies the majority rule to every pixel of an already luma-converted
/// image, returning a fresh image of the same dimensions. The source image is
/// not modified.
pub fn reduce_noise(image: &RgbImage) -> RgbImage {
    let denoise_start = Instant::now();
    let (width, height) = image.dimensions();
    let mut out = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let centre = intensity(image.get_pixel(x, y));
            let left = if x > 0 { intensity(image.get_pixel(x - 1, y)) } else { 0 };
            let right = if x + 1 < width { intensity(image.get_pixel(x + 1, y)) } else { 0 };
            let up = if y > 0 { intensity(image.get_pixel(x, y - 1)) } else { 0 };
            let down = if y + 1 < height { intensity(image.get_pixel(x, y + 1)) } else { 0 };
            let value = denoised_value(centre, left, right, up, down);
            out.put_pixel(x, y, Rgb([value, value, value]));
        }
    }
    info!("Noise reduction of {}x{} image took {:?}",
          width, height, denoise_start.elapsed());
    out
}
