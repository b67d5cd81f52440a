// THEORY:
// The judge turns three band extents into a single yes/no answer with a score.
// It is a pure O(1) function: no pixels, no allocation, no state. The decision
// is a fixed cascade of gates, and the cascade order matters:
//
// 1.  **Presence** is a hard gate. Every band needs at least `min_area`
//     matching pixels; a single starved band rejects the frame with
//     confidence 0. Area never feeds into the confidence score.
// 2.  **Ordering** is a hard gate. The horizontal extent midpoints must be
//     strictly increasing across the slots (red left of green left of blue);
//     a tie rejects.
// 3.  **Alignment** produces the score. The spread of the vertical midpoints,
//     relative to frame height, maps onto a deliberately coarse three-tier
//     scale: 100 / 70 / 40. The tiers are discrete on purpose - downstream
//     consumers and stored expectations are defined against these exact
//     values, so no interpolation.
// 4.  **Acceptance** compares the score against `min_confidence`. A rejected
//     frame still reports its score; only `detected` differs.
//
// The unifying bounding box exists only on acceptance and is the plain union
// of the three extents.

use crate::core_modules::classifier::BandExtent;

/// Axis-aligned pixel rectangle, `w = max_x - x`, `h = max_y - y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// The result of judging one frame. `bbox` is meaningful only when
/// `detected` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub detected: bool,
    /// 0-100. Reported even when the frame is rejected on confidence;
    /// 0 when a hard gate rejected it.
    pub confidence: u8,
    pub bbox: BoundingBox,
}

impl Detection {
    /// The empty result: nothing detected, confidence 0.
    pub fn none() -> Self {
        Self {
            detected: false,
            confidence: 0,
            bbox: BoundingBox::default(),
        }
    }
}

/// Decides whether the three extents form a valid left-to-right band pattern.
pub fn judge(
    extents: &[BandExtent; 3],
    frame_height: u16,
    min_area: u32,
    min_confidence: u8,
) -> Detection {
    // Presence: every band must clear the area floor.
    if extents.iter().any(|e| e.pixels < min_area) {
        return Detection::none();
    }

    // Ordering: strictly increasing horizontal midpoints, slot 0 to slot 2.
    let cx = [
        extents[0].centroid_x(),
        extents[1].centroid_x(),
        extents[2].centroid_x(),
    ];
    if !(cx[0] < cx[1] && cx[1] < cx[2]) {
        return Detection::none();
    }

    // Alignment: vertical midpoint spread against the tier boundaries.
    let cy = [
        extents[0].centroid_y(),
        extents[1].centroid_y(),
        extents[2].centroid_y(),
    ];
    let max_cy = cy[0].max(cy[1]).max(cy[2]);
    let min_cy = cy[0].min(cy[1]).min(cy[2]);
    let vertical_diff = max_cy - min_cy;

    let confidence = if vertical_diff < frame_height / 10 {
        100
    } else if vertical_diff < frame_height / 5 {
        70
    } else {
        40
    };

    let detected = confidence >= min_confidence;
    let bbox = if detected {
        let x = extents[0].x_min.min(extents[1].x_min).min(extents[2].x_min);
        let y = extents[0].y_min.min(extents[1].y_min).min(extents[2].y_min);
        let max_x = extents[0].x_max.max(extents[1].x_max).max(extents[2].x_max);
        let max_y = extents[0].y_max.max(extents[1].y_max).max(extents[2].y_max);
        BoundingBox {
            x,
            y,
            w: max_x - x,
            h: max_y - y,
        }
    } else {
        BoundingBox::default()
    };

    Detection {
        detected,
        confidence,
        bbox,
    }
}
