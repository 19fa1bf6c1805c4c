//! SpotDetect locates roughly circular "spot" markings in a photograph, such
//! as the coat pattern of a cheetah, and reports how many were found.
//!
//! The detection is a four-stage pixel pipeline:
//!
//! 1. Luma conversion ([luma::convert_to_luma()]) collapses the color image
//!    to a single intensity value per pixel.
//! 2. Denoising ([denoise::reduce_noise()]) applies a deterministic
//!    4-neighbor majority rule to suppress single-pixel noise.
//! 3. Edge extraction ([edges::extract_edges()]) thresholds local intensity
//!    variation into a pure black/white edge map.
//! 4. Spot matching ([detect::find_spots()]) slides ring-shaped templates of
//!    increasing radius over the edge map, scoring each window by the sum of
//!    absolute differences against the template. Accepted matches are copied
//!    into a spots image and erased from the edge map so overlapping windows
//!    and larger radii cannot count the same spot twice.
//!
//! Each stage fully materializes its output before the next stage begins, so
//! the caller can stop after any stage and inspect (or save) the
//! intermediate image. [detect::get_spots_from_image()] runs the whole chain.
//!
//! # Caveats
//!
//! The pipeline is a hand-tuned filter chain, not a general-purpose computer
//! vision system. Only radii 4 through 11 have tuned ring templates; there
//! is no rotation or scale invariance beyond that table, and no sub-pixel
//! precision. Thresholds were tuned against animal coat photographs and may
//! need re-tuning for other subjects.

pub mod denoise;
pub mod detect;
pub mod edges;
pub mod luma;
pub mod mask;
