// THEORY:
// An `HsvThreshold` is six bounds on the simplified 0-255 HSV scale. It is pure
// configuration data: immutable once a scan starts, with exactly one behavior -
// deciding whether a converted pixel falls inside it.
//
// The saturation and value ranges are ordinary inclusive intervals
// (`min <= max` always). Hue is the deliberate exception: because hue is an
// angle, `h_min > h_max` is a valid "wraparound" range that crosses the 255->0
// boundary. A red threshold of `h_min = 240, h_max = 10` accepts hues
// 240..=255 and 0..=10 and rejects everything in between.

use crate::core_modules::pixel::pixel::Hsv;
use serde::{Deserialize, Serialize};

/// Inclusive HSV bounds on the simplified 0-255 scale.
/// `h_min > h_max` denotes a wraparound hue range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvThreshold {
    pub h_min: u8,
    pub h_max: u8,
    pub s_min: u8,
    pub s_max: u8,
    pub v_min: u8,
    pub v_max: u8,
}

impl HsvThreshold {
    pub const fn new(h_min: u8, h_max: u8, s_min: u8, s_max: u8, v_min: u8, v_max: u8) -> Self {
        Self {
            h_min,
            h_max,
            s_min,
            s_max,
            v_min,
            v_max,
        }
    }

    /// True when the pixel falls inside all three ranges.
    pub fn contains(&self, hsv: Hsv) -> bool {
        let h_match = if self.h_min > self.h_max {
            // Wraparound range across the 255->0 boundary.
            hsv.h >= self.h_min || hsv.h <= self.h_max
        } else {
            hsv.h >= self.h_min && hsv.h <= self.h_max
        };

        h_match
            && (hsv.s >= self.s_min && hsv.s <= self.s_max)
            && (hsv.v >= self.v_min && hsv.v <= self.v_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsv(h: u8, s: u8, v: u8) -> Hsv {
        Hsv { h, s, v }
    }

    #[test]
    fn plain_hue_range_is_inclusive() {
        let t = HsvThreshold::new(40, 80, 100, 255, 100, 255);
        assert!(t.contains(hsv(40, 200, 200)));
        assert!(t.contains(hsv(80, 200, 200)));
        assert!(!t.contains(hsv(39, 200, 200)));
        assert!(!t.contains(hsv(81, 200, 200)));
    }

    #[test]
    fn wraparound_hue_accepts_both_ends() {
        let t = HsvThreshold::new(240, 10, 0, 255, 0, 255);
        for h in 240..=255u16 {
            assert!(t.contains(hsv(h as u8, 128, 128)), "hue {h} should match");
        }
        for h in 0..=10u8 {
            assert!(t.contains(hsv(h, 128, 128)), "hue {h} should match");
        }
        for h in 11..=239u8 {
            assert!(!t.contains(hsv(h, 128, 128)), "hue {h} should not match");
        }
    }

    #[test]
    fn saturation_and_value_gates_apply() {
        let t = HsvThreshold::new(0, 10, 100, 255, 100, 255);
        assert!(t.contains(hsv(5, 100, 100)));
        assert!(!t.contains(hsv(5, 99, 200)));
        assert!(!t.contains(hsv(5, 200, 99)));
    }
}
