// THEORY:
// The engine never owns image memory. A camera driver (or a test) owns the
// buffer; the engine borrows it for exactly one call through `Frame` (read) or
// `FrameMut` (read/write, for the overlay renderer) and holds no reference
// afterward. Construction is the one place buffer geometry is checked: for
// RGB565 the byte length must be exactly `width * height * 2`, so every pixel
// access inside the scan loop can be a plain little-endian u16 read with no
// per-pixel bounds logic.

use crate::core_modules::error::DetectError;

/// Pixel encodings the camera delivers. Only `Rgb565` is scannable; the
/// JPEG frames the streaming path produces are opaque to the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 16-bit packed pixels: 5 bits red, 6 bits green, 5 bits blue,
    /// little-endian in the buffer.
    Rgb565,
    /// Compressed frames. Never scanned, never drawn on.
    Jpeg,
}

/// A read-only borrowed view of one captured frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    format: PixelFormat,
    width: u16,
    height: u16,
    data: &'a [u8],
}

impl<'a> Frame<'a> {
    pub fn new(
        format: PixelFormat,
        width: u16,
        height: u16,
        data: &'a [u8],
    ) -> Result<Self, DetectError> {
        check_len(format, width, height, data.len())?;
        Ok(Self {
            format,
            width,
            height,
            data,
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Raw RGB565 pixel at (x, y). Valid only for `Rgb565` frames; the
    /// constructor guarantees the index is in bounds for in-range
    /// coordinates.
    pub fn pixel(&self, x: u16, y: u16) -> u16 {
        let at = (y as usize * self.width as usize + x as usize) * 2;
        u16::from_le_bytes([self.data[at], self.data[at + 1]])
    }
}

/// A mutable borrowed view, for in-place overlay drawing.
#[derive(Debug)]
pub struct FrameMut<'a> {
    format: PixelFormat,
    width: u16,
    height: u16,
    data: &'a mut [u8],
}

impl<'a> FrameMut<'a> {
    pub fn new(
        format: PixelFormat,
        width: u16,
        height: u16,
        data: &'a mut [u8],
    ) -> Result<Self, DetectError> {
        check_len(format, width, height, data.len())?;
        Ok(Self {
            format,
            width,
            height,
            data,
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Re-borrows as a read-only frame, e.g. to scan and then draw on the
    /// same buffer within one call.
    pub fn as_frame(&self) -> Frame<'_> {
        Frame {
            format: self.format,
            width: self.width,
            height: self.height,
            data: self.data,
        }
    }

    /// Writes a raw RGB565 pixel at (x, y).
    pub fn set_pixel(&mut self, x: u16, y: u16, pixel: u16) {
        let at = (y as usize * self.width as usize + x as usize) * 2;
        self.data[at..at + 2].copy_from_slice(&pixel.to_le_bytes());
    }
}

fn check_len(
    format: PixelFormat,
    width: u16,
    height: u16,
    len: usize,
) -> Result<(), DetectError> {
    match format {
        PixelFormat::Rgb565 => {
            let expected = width as usize * height as usize * 2;
            if len != expected {
                return Err(DetectError::InvalidArgument);
            }
        }
        // Compressed frames carry no fixed geometry-to-length relation.
        PixelFormat::Jpeg => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb565_length_must_match_dimensions() {
        let buf = vec![0u8; 4 * 3 * 2];
        assert!(Frame::new(PixelFormat::Rgb565, 4, 3, &buf).is_ok());
        assert!(matches!(
            Frame::new(PixelFormat::Rgb565, 4, 4, &buf),
            Err(DetectError::InvalidArgument)
        ));
    }

    #[test]
    fn pixels_are_little_endian_row_major() {
        let mut buf = vec![0u8; 2 * 2 * 2];
        let mut frame = FrameMut::new(PixelFormat::Rgb565, 2, 2, &mut buf).unwrap();
        frame.set_pixel(1, 0, 0xF800);
        frame.set_pixel(0, 1, 0x07E0);

        let view = frame.as_frame();
        assert_eq!(view.pixel(1, 0), 0xF800);
        assert_eq!(view.pixel(0, 1), 0x07E0);
        assert_eq!(view.pixel(0, 0), 0x0000);
        // Little-endian byte order in the backing buffer.
        assert_eq!(&buf[2..4], &[0x00, 0xF8]);
    }
}
