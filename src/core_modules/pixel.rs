// THEORY:
// The `pixel` module is the most fundamental unit of the detection engine. It is
// a collection of pure, single-pixel transforms - functions that can be computed
// from one pixel value alone, with no knowledge of neighbors, thresholds, or
// frame geometry. Anything that needs a second pixel or a configuration value
// belongs in higher modules (`classifier`, `judge`).
//
// Key architectural principles:
// 1.  **Integer-only arithmetic**: The HSV conversion is performed entirely in
//     8/32-bit integer math, never floating point. The camera pipeline this
//     engine was built for runs on hardware without an FPU, and every test
//     vector in the crate is defined against this exact integer formula. A
//     "more precise" floating-point conversion would be a different (wrong)
//     function.
// 2.  **Simplified 8-bit HSV**: All three channels live on a 0-255 scale. The
//     full 360-degree hue circle is compressed onto 0-255 using the 6-piece
//     max-channel formula with a `* 42` sector scale and a `+ 255` wraparound
//     fix-up, not modulo-360 degrees.
// 3.  **Lossy RGB565 widening**: Unpacking shifts each channel up to an 8-bit
//     range and leaves the low-order bits zero rather than replicating the high
//     bits. Pure red in RGB565 therefore widens to 248, not 255.

pub mod pixel {
    /// RGB 255,255,0 packed into RGB565. Used by the overlay renderer.
    pub const RGB565_YELLOW: u16 = 0xFFE0;

    /// An approximate HSV triple on the simplified 0-255 scale.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Hsv {
        pub h: u8,
        pub s: u8,
        pub v: u8,
    }

    /// Unpacks a 16-bit RGB565 pixel into 8-bit channels.
    /// The widening is lossy: low-order bits are zero, not replicated.
    pub fn unpack_rgb565(pixel: u16) -> (u8, u8, u8) {
        let r = (((pixel >> 11) & 0x1F) << 3) as u8;
        let g = (((pixel >> 5) & 0x3F) << 2) as u8;
        let b = ((pixel & 0x1F) << 3) as u8;
        (r, g, b)
    }

    /// Packs 8-bit channels into an RGB565 pixel, truncating the low bits.
    pub fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
        ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | ((b as u16 & 0xF8) >> 3)
    }

    /// Converts an RGB triple to simplified HSV (all channels 0-255).
    ///
    /// `v` is the channel maximum. `s` is `delta * 255 / v` with truncating
    /// integer division (0 when `v` is 0). Hue uses the 6-piece max-channel
    /// formula scaled by 42 per sector, with a `+ 255` fix-up for negative
    /// intermediates. Black and gray pixels report `h = 0`.
    pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
        let max_val = r.max(g).max(b);
        let min_val = r.min(g).min(b);
        let delta = max_val - min_val;

        if max_val == 0 {
            return Hsv { h: 0, s: 0, v: 0 };
        }

        let s = ((delta as u16 * 255) / max_val as u16) as u8;

        let h = if delta == 0 {
            0
        } else {
            let (ri, gi, bi) = (r as i32, g as i32, b as i32);
            let d = delta as i32;
            let mut h_temp = if max_val == r {
                (gi - bi) * 42 / d
            } else if max_val == g {
                85 + (bi - ri) * 42 / d
            } else {
                170 + (ri - gi) * 42 / d
            };
            if h_temp < 0 {
                h_temp += 255;
            }
            h_temp as u8
        };

        Hsv { h, s, v: max_val }
    }
}
