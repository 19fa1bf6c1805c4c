//! Edge extraction: thresholds local intensity variation into a pure
//! black/white map.
//!
//! A pixel is "flat" (black) when its intensity differs from all four of its
//! Von Neumann neighbors by strictly less than `epsilon`; any larger
//! difference marks it as an edge (white). The scan skips row 0 and column 0,
//! which stay black in the freshly allocated output, and the rightmost column
//! and bottom row are forced to black afterwards regardless of what the scan
//! produced there. The ring matcher relies on this dark frame: its window
//! scoring treats everything outside a ring as black.

use std::time::Instant;

use image::{Rgb, RgbImage};
use log::info;

use crate::luma::intensity;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Produces the binary edge map of an already denoised greyscale image.
/// `epsilon` is the flatness threshold, in intensity units ([0, 255]).
/// Returns a fresh image; the input is not modified.
pub fn extract_edges(image: &RgbImage, epsilon: f64) -> RgbImage {
    let edges_start = Instant::now();
    let (width, height) = image.dimensions();
    let mut edges = RgbImage::new(width, height);
    for y in 1..height {
        for x in 1..width {
            let centre = intensity(image.get_pixel(x, y)) as i32;
            // The left/up neighbors are always in bounds here; right/down
            // fall off the image on the last column/row and read as 0.
            let left = intensity(image.get_pixel(x - 1, y)) as i32;
            let up = intensity(image.get_pixel(x, y - 1)) as i32;
            let right = if x + 1 < width {
                intensity(image.get_pixel(x + 1, y)) as i32
            } else {
                0
            };
            let down = if y + 1 < height {
                intensity(image.get_pixel(x, y + 1)) as i32
            } else {
                0
            };
            let flat = ((centre - right).abs() as f64) < epsilon
                && ((centre - left).abs() as f64) < epsilon
                && ((centre - up).abs() as f64) < epsilon
                && ((centre - down).abs() as f64) < epsilon;
            edges.put_pixel(x, y, if flat { BLACK } else { WHITE });
        }
    }
    // Force the rightmost column and bottom row to black, overwriting the
    // scan's output there.
    for y in 0..height {
        edges.put_pixel(width - 1, y, BLACK);
    }
    for x in 0..width {
        edges.put_pixel(x, height - 1, BLACK);
    }
    info!("Edge extraction of {}x{} image (epsilon {}) took {:?}",
          width, height, epsilon, edges_start.elapsed());
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    // A uniform greyscale image with one probe pixel and its four neighbors
    // set explicitly.
    fn probe_image(centre: u8, left: u8, right: u8, up: u8, down: u8) -> RgbImage {
        let mut image = RgbImage::new(7, 7);
        for pixel in image.pixels_mut() {
            *pixel = Rgb([centre, centre, centre]);
        }
        image.put_pixel(2, 3, Rgb([left, left, left]));
        image.put_pixel(4, 3, Rgb([right, right, right]));
        image.put_pixel(3, 2, Rgb([up, up, up]));
        image.put_pixel(3, 4, Rgb([down, down, down]));
        image
    }

    #[test]
    fn test_epsilon_threshold_is_strict() {
        // Neighbors within +/-2 of the center.
        let image = probe_image(50, 48, 52, 49, 51);
        // All diffs < 5: flat, so black.
        let edges = extract_edges(&image, 5.0);
        assert_eq!(*edges.get_pixel(3, 3), BLACK);
        // At least one diff >= 1: edge, so white.
        let edges = extract_edges(&image, 1.0);
        assert_eq!(*edges.get_pixel(3, 3), WHITE);
        // Exactly at the threshold: |diff| == 2 is not < 2, so still white.
        let edges = extract_edges(&image, 2.0);
        assert_eq!(*edges.get_pixel(3, 3), WHITE);
    }

    #[test]
    fn test_border_forced_black() {
        // A bright uniform image: the scan marks interior pixels near the
        // right/bottom as edges (their out-of-bounds neighbors read as 0),
        // but the frame must end up black anyway.
        let mut image = RgbImage::new(6, 5);
        for pixel in image.pixels_mut() {
            *pixel = Rgb([200, 200, 200]);
        }
        let edges = extract_edges(&image, 10.0);
        for y in 0..5 {
            assert_eq!(*edges.get_pixel(5, y), BLACK, "right column at y={}", y);
        }
        for x in 0..6 {
            assert_eq!(*edges.get_pixel(x, 4), BLACK, "bottom row at x={}", x);
        }
        // Row 0 and column 0 are skipped by the scan and stay black too.
        for y in 0..5 {
            assert_eq!(*edges.get_pixel(0, y), BLACK);
        }
        for x in 0..6 {
            assert_eq!(*edges.get_pixel(x, 0), BLACK);
        }
    }

    #[test]
    fn test_output_is_binary() {
        let mut image = RgbImage::new(8, 8);
        for (i, pixel) in image.pixels_mut().enumerate() {
            let v = (i * 37 % 256) as u8;
            *pixel = Rgb([v, v, v]);
        }
        let edges = extract_edges(&image, 20.0);
        for pixel in edges.pixels() {
            assert!(*pixel == BLACK || *pixel == WHITE);
        }
    }
}
