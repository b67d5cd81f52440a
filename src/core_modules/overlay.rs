// THEORY:
// The overlay renderer is pure presentation: it writes a one-pixel yellow
// border along an accepted detection's bounding box, straight into the same
// RGB565 buffer the classifier just read. It lives in the engine only because
// it shares the buffer addressing scheme; nothing downstream depends on it.
//
// It never fails. A not-detected result, a non-RGB565 frame, or a degenerate
// frame is a silent no-op, and an out-of-range box is clamped to the frame
// rather than rejected - the border shrinks, it never wraps or writes out of
// bounds. Perimeter-only work: O(w + h) writes, no allocation.

use crate::core_modules::frame::{FrameMut, PixelFormat};
use crate::core_modules::judge::Detection;
use crate::core_modules::pixel::pixel::RGB565_YELLOW;

/// Draws the detection's bounding box border in place. No-op unless the
/// detection was accepted and the frame is RGB565.
pub fn draw_bounding_box(frame: &mut FrameMut, detection: &Detection) {
    if !detection.detected || frame.format() != PixelFormat::Rgb565 {
        return;
    }

    let (width, height) = (frame.width(), frame.height());
    if width == 0 || height == 0 {
        return;
    }

    let x1 = detection.bbox.x.min(width - 1);
    let y1 = detection.bbox.y.min(height - 1);
    // Clamp the far edge instead of failing: a box that pokes past the frame
    // is drawn shrunk to the last valid row/column.
    let x2 = detection.bbox.x.saturating_add(detection.bbox.w).min(width - 1);
    let y2 = detection.bbox.y.saturating_add(detection.bbox.h).min(height - 1);

    for x in x1..=x2 {
        frame.set_pixel(x, y1, RGB565_YELLOW);
        frame.set_pixel(x, y2, RGB565_YELLOW);
    }
    for y in y1..=y2 {
        frame.set_pixel(x1, y, RGB565_YELLOW);
        frame.set_pixel(x2, y, RGB565_YELLOW);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::frame::Frame;
    use crate::core_modules::judge::BoundingBox;

    fn detection(x: u16, y: u16, w: u16, h: u16) -> Detection {
        Detection {
            detected: true,
            confidence: 100,
            bbox: BoundingBox { x, y, w, h },
        }
    }

    fn yellow_pixels(buf: &[u8], width: u16, height: u16) -> Vec<(u16, u16)> {
        let frame = Frame::new(PixelFormat::Rgb565, width, height, buf).unwrap();
        let mut hits = Vec::new();
        for y in 0..height {
            for x in 0..width {
                if frame.pixel(x, y) == RGB565_YELLOW {
                    hits.push((x, y));
                }
            }
        }
        hits
    }

    #[test]
    fn draws_only_the_border() {
        let (w, h) = (10u16, 10u16);
        let mut buf = vec![0u8; w as usize * h as usize * 2];
        let mut frame = FrameMut::new(PixelFormat::Rgb565, w, h, &mut buf).unwrap();
        draw_bounding_box(&mut frame, &detection(2, 3, 4, 3));

        let hits = yellow_pixels(&buf, w, h);
        // Box corners (2,3) to (6,6): border pixels only, interior untouched.
        assert!(hits.contains(&(2, 3)));
        assert!(hits.contains(&(6, 6)));
        assert!(hits.contains(&(4, 3)));
        assert!(hits.contains(&(2, 5)));
        assert!(!hits.contains(&(3, 4)));
        // Perimeter of a 5x4 pixel rectangle.
        assert_eq!(hits.len(), 14);
    }

    #[test]
    fn out_of_range_box_is_clamped_to_the_frame() {
        let (w, h) = (10u16, 8u16);
        let mut buf = vec![0u8; w as usize * h as usize * 2];
        let mut frame = FrameMut::new(PixelFormat::Rgb565, w, h, &mut buf).unwrap();
        // x + w and y + h both run past the frame.
        draw_bounding_box(&mut frame, &detection(6, 4, 20, 20));

        let hits = yellow_pixels(&buf, w, h);
        assert!(!hits.is_empty());
        // Right and bottom edges land on the last valid row/column.
        assert!(hits.iter().all(|&(x, y)| x < w && y < h));
        assert!(hits.contains(&(9, 4)));
        assert!(hits.contains(&(6, 7)));
        assert!(hits.contains(&(9, 7)));
    }

    #[test]
    fn not_detected_is_a_no_op() {
        let (w, h) = (4u16, 4u16);
        let mut buf = vec![0u8; w as usize * h as usize * 2];
        let mut frame = FrameMut::new(PixelFormat::Rgb565, w, h, &mut buf).unwrap();
        let mut none = Detection::none();
        none.bbox = BoundingBox { x: 0, y: 0, w: 3, h: 3 };
        draw_bounding_box(&mut frame, &none);
        assert!(buf.iter().all(|&b| b == 0));
    }
}
