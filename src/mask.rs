//! Ring (annulus) templates used by the spot matcher, plus the fixed tuning
//! table mapping each supported radius to its template parameters and match
//! threshold.

/// Template parameters and acceptance threshold for one ring radius.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RingTuning {
    /// Thickness term of the annulus condition.
    pub ring_width: i32,
    /// Inward shift of the annulus relative to the nominal radius.
    pub delta: i32,
    /// A window matches when its sum of absolute differences against the
    /// mask is strictly below this.
    pub match_threshold: i32,
}

// Hand-tuned against cheetah coat photographs. Only these radii produce a
// meaningful template.
const TUNED_RADII: [(u32, RingTuning); 8] = [
    (4, RingTuning { ring_width: 6, delta: 0, match_threshold: 4800 }),
    (5, RingTuning { ring_width: 9, delta: 1, match_threshold: 6625 }),
    (6, RingTuning { ring_width: 12, delta: 1, match_threshold: 11000 }),
    (7, RingTuning { ring_width: 15, delta: 1, match_threshold: 15000 }),
    (8, RingTuning { ring_width: 18, delta: 1, match_threshold: 19000 }),
    (9, RingTuning { ring_width: 21, delta: 1, match_threshold: 23000 }),
    (10, RingTuning { ring_width: 24, delta: 2, match_threshold: 28000 }),
    (11, RingTuning { ring_width: 27, delta: 2, match_threshold: 35000 }),
];

/// Looks up the tuning for `radius`. Radii outside 4..=11 get all-zero
/// tuning, which produces an empty mask and a threshold no window can score
/// under; such radii match nothing rather than being an error.
pub fn tuning_for_radius(radius: u32) -> RingTuning {
    for &(tuned_radius, tuning) in &TUNED_RADII {
        if tuned_radius == radius {
            return tuning;
        }
    }
    RingTuning { ring_width: 0, delta: 0, match_threshold: 0 }
}

/// A square annulus template. Cells are 255 on the ring and 0 elsewhere.
#[derive(Debug)]
pub struct RingMask {
    side: u32,
    cells: Vec<u8>,
}

impl RingMask {
    /// Builds the (2*radius+1)-square template for the given parameters.
    /// Cell (i, j) is on the ring when its squared distance from the center
    /// lies strictly within `ring_width` of `(radius - delta)^2`.
    pub fn new(radius: u32, ring_width: i32, delta: i32) -> RingMask {
        let side = 2 * radius + 1;
        let mut cells = vec![0_u8; (side * side) as usize];
        let target = (radius as i32 - delta) * (radius as i32 - delta);
        for i in 0..side as i32 {
            for j in 0..side as i32 {
                let di = i - radius as i32;
                let dj = j - radius as i32;
                let d = di * di + dj * dj;
                if d > target - ring_width && d < target + ring_width {
                    cells[(i * side as i32 + j) as usize] = 255;
                }
            }
        }
        RingMask { side, cells }
    }

    /// Side length of the square template.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Value of cell (i, j): 255 on the ring, 0 elsewhere.
    pub fn value(&self, i: u32, j: u32) -> u8 {
        self.cells[(i * self.side + j) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuning_table() {
        assert_eq!(tuning_for_radius(4),
                   RingTuning { ring_width: 6, delta: 0, match_threshold: 4800 });
        assert_eq!(tuning_for_radius(11),
                   RingTuning { ring_width: 27, delta: 2, match_threshold: 35000 });
        // Untabulated radii degenerate to all zeros.
        assert_eq!(tuning_for_radius(3),
                   RingTuning { ring_width: 0, delta: 0, match_threshold: 0 });
        assert_eq!(tuning_for_radius(12),
                   RingTuning { ring_width: 0, delta: 0, match_threshold: 0 });
    }

    #[test]
    fn test_mask_dimensions() {
        let mask = RingMask::new(4, 6, 0);
        assert_eq!(mask.side(), 9);
    }

    #[test]
    fn test_mask_symmetry() {
        for radius in 4..=11_u32 {
            let tuning = tuning_for_radius(radius);
            let mask = RingMask::new(radius, tuning.ring_width, tuning.delta);
            let side = mask.side();
            for i in 0..side {
                for j in 0..side {
                    let v = mask.value(i, j);
                    // 90-degree rotation, 180-degree rotation, reflections.
                    assert_eq!(v, mask.value(j, side - 1 - i));
                    assert_eq!(v, mask.value(side - 1 - i, side - 1 - j));
                    assert_eq!(v, mask.value(side - 1 - i, j));
                    assert_eq!(v, mask.value(i, side - 1 - j));
                    // Transpose.
                    assert_eq!(v, mask.value(j, i));
                }
            }
        }
    }

    #[test]
    fn test_degenerate_mask_is_empty() {
        let mask = RingMask::new(3, 0, 0);
        for i in 0..mask.side() {
            for j in 0..mask.side() {
                assert_eq!(mask.value(i, j), 0);
            }
        }
    }

    #[test]
    fn test_radius_4_ring_cells() {
        // radius 4, width 6, delta 0: cells with squared distance strictly
        // between 10 and 22 are on the ring.
        let mask = RingMask::new(4, 6, 0);
        let mut on_count = 0;
        for i in 0..9_i32 {
            for j in 0..9_i32 {
                let d = (i - 4) * (i - 4) + (j - 4) * (j - 4);
                let expected = if d > 10 && d < 22 { 255 } else { 0 };
                assert_eq!(mask.value(i as u32, j as u32), expected);
                if expected == 255 {
                    on_count += 1;
                }
            }
        }
        // The center and far corners are off the ring; the cardinal points
        // at distance 4 are on it.
        assert_eq!(mask.value(4, 4), 0);
        assert_eq!(mask.value(0, 0), 0);
        assert_eq!(mask.value(4, 0), 255);
        assert_eq!(mask.value(0, 4), 255);
        assert_eq!(on_count, 32);
    }
}
