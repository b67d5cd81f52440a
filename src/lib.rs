// THEORY:
// This file is the main entry point for the `band_vision` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the public
// API that will be exposed to external consumers (a camera capture loop, an
// HTTP configuration endpoint, a status indicator).
//
// The primary goal is to export the `DetectionPipeline` and its associated data
// structures (`DetectorConfig`, `Detection`, etc.) as the clean, high-level
// interface for the entire detection engine. The internal analysis modules
// (`core_modules`) stay encapsulated behind it, providing a clean separation
// of concerns.

pub mod core_modules;
pub mod pipeline;
