// This file is a small example runner for the `band_vision` library crate.
// The main library entry point is `src/lib.rs`.
//
// It synthesizes the kind of frame the engine exists to find - three solid
// color bands in red/green/blue order - runs the pipeline on it, draws the
// accepted bounding box back onto the buffer, and saves the annotated frame
// as a PNG next to the working directory.

use anyhow::Context;
use band_vision::core_modules::pixel::pixel::{pack_rgb565, unpack_rgb565};
use band_vision::core_modules::threshold::HsvThreshold;
use band_vision::pipeline::{
    DetectionPipeline, DetectorConfig, Frame, FrameMut, PixelFormat, draw_bounding_box,
};
use image::ImageEncoder;

const WIDTH: u16 = 100;
const HEIGHT: u16 = 100;

fn fill_rect(buf: &mut [u8], x0: u16, y0: u16, x1: u16, y1: u16, pixel: u16) -> anyhow::Result<()> {
    let mut frame = FrameMut::new(PixelFormat::Rgb565, WIDTH, HEIGHT, buf)?;
    for y in y0..=y1 {
        for x in x0..=x1 {
            frame.set_pixel(x, y, pixel);
        }
    }
    Ok(())
}

fn save_png(name: &str, buf: &[u8]) -> anyhow::Result<()> {
    let frame = Frame::new(PixelFormat::Rgb565, WIDTH, HEIGHT, buf)?;
    let mut rgb = Vec::with_capacity(WIDTH as usize * HEIGHT as usize * 3);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let (r, g, b) = unpack_rgb565(frame.pixel(x, y));
            rgb.extend_from_slice(&[r, g, b]);
        }
    }

    let output = std::fs::File::create(name)?;
    let encoder = image::codecs::png::PngEncoder::new(output);
    encoder.write_image(
        &rgb,
        WIDTH as u32,
        HEIGHT as u32,
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    println!("Band Vision Engine - Example Runner");

    // Thresholds centered on the pure primaries' simplified hues, with
    // every-frame analysis for the demo.
    let config = DetectorConfig {
        bands: [
            HsvThreshold::new(250, 10, 100, 255, 100, 255),
            HsvThreshold::new(60, 110, 100, 255, 100, 255),
            HsvThreshold::new(140, 200, 100, 255, 100, 255),
        ],
        min_area: 400,
        min_confidence: 60,
        frame_decimation: 1,
    };
    let mut pipeline = DetectionPipeline::new(config)?;

    let mut buf = vec![0u8; WIDTH as usize * HEIGHT as usize * 2];
    fill_rect(&mut buf, 10, 10, 30, 30, pack_rgb565(255, 0, 0))?;
    fill_rect(&mut buf, 40, 10, 60, 30, pack_rgb565(0, 255, 0))?;
    fill_rect(&mut buf, 70, 10, 90, 30, pack_rgb565(0, 0, 255))?;

    let detection = {
        let frame = Frame::new(PixelFormat::Rgb565, WIDTH, HEIGHT, &buf)?;
        pipeline.process_frame(&frame)?
    };

    if detection.detected {
        println!(
            "Bands detected: confidence {}%, bbox ({}, {}, {}, {})",
            detection.confidence,
            detection.bbox.x,
            detection.bbox.y,
            detection.bbox.w,
            detection.bbox.h
        );
        let mut frame = FrameMut::new(PixelFormat::Rgb565, WIDTH, HEIGHT, &mut buf)?;
        draw_bounding_box(&mut frame, &detection);
    } else {
        println!(
            "No detection (confidence {}%)",
            detection.confidence
        );
    }

    save_png("band_detection.png", &buf).context("saving annotated frame")?;
    println!("Annotated frame written to band_detection.png");
    Ok(())
}
