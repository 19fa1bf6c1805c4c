//! Spot matching: slides ring templates of increasing radius over a binary
//! edge map, scoring each window by the sum of absolute differences between
//! the window's pixels and the template cells.
//!
//! The edge map is a single shared mutable resource: every accepted match is
//! erased (blackened) from it before scanning continues, so an already
//! counted ring cannot be matched again at an overlapping position or at a
//! later, larger radius. Radii are processed strictly in increasing order;
//! small rings consume their pixels before the larger templates reach the
//! same area. That ordering is the conflict-resolution policy, not an
//! optimization, and it is what keeps the detection count stable.
//!
//! The per-radius scan bounds are asymmetric: rows cover
//! `radius..height - radius` while columns cover `radius..width - radius - 1`.
//! The column range is one short of the symmetric bound. Every tuned
//! threshold was calibrated against this exact scan, so the bound is kept
//! rather than "fixed".

use std::time::Instant;

use image::{Rgb, RgbImage};
use log::{debug, info};

use crate::denoise::reduce_noise;
use crate::edges::extract_edges;
use crate::luma::{convert_to_luma, intensity};
use crate::mask::{tuning_for_radius, RingMask};

// Sum of absolute differences between the mask and the edge-map window whose
// top-left corner is (col0, row0).
fn window_score(edges: &RgbImage, mask: &RingMask, col0: u32, row0: u32) -> i32 {
    let side = mask.side();
    let mut sum = 0_i32;
    for i in 0..side {
        for j in 0..side {
            let value = intensity(edges.get_pixel(col0 + j, row0 + i)) as i32;
            sum += (value - mask.value(i, j) as i32).abs();
        }
    }
    sum
}

// Copies the accepted window from the edge map into the spots image, then
// blackens it in the edge map so it cannot match again.
fn record_and_erase(edges: &mut RgbImage, spots: &mut RgbImage,
                    side: u32, col0: u32, row0: u32) {
    for i in 0..side {
        for j in 0..side {
            let pixel = *edges.get_pixel(col0 + j, row0 + i);
            spots.put_pixel(col0 + j, row0 + i, pixel);
            edges.put_pixel(col0 + j, row0 + i, Rgb([0, 0, 0]));
        }
    }
}

/// Summarizes one accepted ring match.
#[derive(Debug)]
pub struct SpotDescription {
    /// Center of the matched window, in image coordinates.
    pub centre_x: u32,
    pub centre_y: u32,

    /// Template radius the window matched at.
    pub radius: u32,

    /// Sum of absolute differences against the template; always below the
    /// radius's match threshold.
    pub score: i32,
}

// Scans the edge map with the ring template for a single radius, recording
// matched windows into `spots` and erasing them from `edges`. Accepted
// matches are appended to `detections` in raster scan order.
fn find_spots_for_radius(edges: &mut RgbImage, spots: &mut RgbImage, radius: u32,
                         detections: &mut Vec<SpotDescription>) {
    let tuning = tuning_for_radius(radius);
    let mask = RingMask::new(radius, tuning.ring_width, tuning.delta);
    let (width, height) = edges.dimensions();
    let row_end = height as i32 - radius as i32;
    let col_end = width as i32 - radius as i32 - 1;
    for row in radius as i32..row_end {
        for col in radius as i32..col_end {
            let col0 = (col - radius as i32) as u32;
            let row0 = (row - radius as i32) as u32;
            let score = window_score(edges, &mask, col0, row0);
            if score < tuning.match_threshold {
                debug!("Spot of radius {} at col {} row {} (score {})",
                       radius, col, row, score);
                record_and_erase(edges, spots, mask.side(), col0, row0);
                detections.push(SpotDescription{centre_x: col as u32,
                                                centre_y: row as u32,
                                                radius, score});
            }
        }
    }
}

/// Searches the edge map for ring-shaped spots with radii in
/// `lower_limit..=upper_limit`, smallest first. Matched regions are erased
/// from `edges` as they are found. Returns the spots image (same dimensions
/// as the edge map, blank except at matched windows) and a
/// [SpotDescription] per detection; the detection count is the vector's
/// length.
///
/// Radii outside 4..=11 have no tuned template and match nothing.
pub fn find_spots(edges: &mut RgbImage, lower_limit: u32, upper_limit: u32)
                  -> (RgbImage, Vec<SpotDescription>) {
    let match_start = Instant::now();
    let (width, height) = edges.dimensions();
    let mut spots = RgbImage::new(width, height);
    let mut detections = Vec::<SpotDescription>::new();
    for radius in lower_limit..=upper_limit {
        let radius_start = Instant::now();
        let before = detections.len();
        find_spots_for_radius(edges, &mut spots, radius, &mut detections);
        info!("Radius {}: {} spots in {:?}",
              radius, detections.len() - before, radius_start.elapsed());
    }
    info!("Spot matching found {} spots in {:?}",
          detections.len(), match_start.elapsed());
    (spots, detections)
}

/// Runs the full pipeline on a color image: luma conversion, noise reduction,
/// edge extraction with the given `epsilon`, then ring matching over
/// `lower_limit..=upper_limit`. The input image is not modified.
///
/// Returns the spots image and a [SpotDescription] per detected spot.
pub fn get_spots_from_image(image: &RgbImage, epsilon: f64,
                            lower_limit: u32, upper_limit: u32)
                            -> (RgbImage, Vec<SpotDescription>) {
    let mut grey = image.clone();
    convert_to_luma(&mut grey);
    let denoised = reduce_noise(&grey);
    let mut edges = extract_edges(&denoised, epsilon);
    find_spots(&mut edges, lower_limit, upper_limit)
}
