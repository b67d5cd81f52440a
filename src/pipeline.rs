// THEORY:
// The `pipeline` module is the final, top-level API for the entire detection
// engine. It owns the only mutable state in the system - the active
// configuration and the frame counter - and turns the stateless core modules
// into a per-frame service: decimation gate, then classifier, then judge.
//
// Key architectural principles:
// 1.  **Explicit state, no globals**: What the original firmware kept in
//     process-wide statics (current config, frame counter) lives here as
//     fields of a pipeline instance the caller owns and passes around. A
//     concurrent host wraps the whole pipeline in one mutex; because
//     configuration updates are wholesale swaps, that single lock is enough
//     to guarantee a scan never sees a half-applied configuration.
// 2.  **Decimation before work**: Every call ticks the frame counter, but only
//     every Nth call pays for a scan. Skipped frames return the empty result
//     at negligible cost. The counter ticks even when a scan later fails -
//     errors never roll state back.
// 3.  **Synchronous and bounded**: One call processes exactly one frame to
//     completion. No I/O, no allocation beyond the three fixed accumulators,
//     no suspension points, O(width x height) worst case.

use crate::core_modules::classifier;
use crate::core_modules::judge;

// Re-export key data structures for the public API.
pub use crate::core_modules::config::{BandIndex, DetectorConfig};
pub use crate::core_modules::error::{DetectError, StoreError};
pub use crate::core_modules::frame::{Frame, FrameMut, PixelFormat};
pub use crate::core_modules::judge::{BoundingBox, Detection};
pub use crate::core_modules::overlay::draw_bounding_box;
pub use crate::core_modules::store::{ConfigStore, FileConfigStore, MemoryConfigStore};

/// The main, top-level struct for the detection engine.
pub struct DetectionPipeline {
    config: DetectorConfig,
    frame_counter: u64,
}

impl DetectionPipeline {
    /// Builds a pipeline around a validated configuration.
    pub fn new(config: DetectorConfig) -> Result<Self, DetectError> {
        config.validate()?;
        log::info!(
            "detection pipeline initialized: min_area={}, min_confidence={}, frame_decimation={}",
            config.min_area,
            config.min_confidence,
            config.frame_decimation
        );
        Ok(Self {
            config,
            frame_counter: 0,
        })
    }

    /// Builds a pipeline from persisted configuration, falling back to the
    /// defaults when the store has nothing yet.
    pub fn from_store(store: &impl ConfigStore) -> Result<Self, DetectError> {
        let config = store.load_or_default()?;
        Self::new(config)
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    /// Replaces the active configuration wholesale.
    pub fn update_config(&mut self, config: DetectorConfig) -> Result<(), DetectError> {
        config.validate()?;
        self.config = config;
        log::info!("configuration updated");
        Ok(())
    }

    /// Applies a JSON update document: missing or invalid sub-fields fall back
    /// to the defaults; a malformed document leaves the active configuration
    /// untouched. Returns the configuration now in effect.
    pub fn apply_json_update(
        &mut self,
        doc: &serde_json::Value,
    ) -> Result<&DetectorConfig, DetectError> {
        let config = DetectorConfig::from_json_update(doc)?;
        self.update_config(config)?;
        Ok(&self.config)
    }

    /// Like `apply_json_update`, but also persists the new configuration.
    /// The store is written before the swap, so a persistence failure leaves
    /// the active configuration untouched.
    pub fn apply_json_update_persistent(
        &mut self,
        doc: &serde_json::Value,
        store: &mut impl ConfigStore,
    ) -> Result<&DetectorConfig, DetectError> {
        let config = DetectorConfig::from_json_update(doc)?;
        config.validate()?;
        store.save(&config)?;
        self.config = config;
        log::info!("configuration updated and persisted");
        Ok(&self.config)
    }

    /// Processes one frame: ticks the counter, and on every
    /// `frame_decimation`th call scans the frame and judges the result.
    /// Skipped frames report the empty result without scanning.
    pub fn process_frame(&mut self, frame: &Frame) -> Result<Detection, DetectError> {
        self.frame_counter += 1;
        if self.frame_counter % self.config.frame_decimation as u64 != 0 {
            return Ok(Detection::none());
        }

        let extents = classifier::scan(frame, &self.config.bands)?;
        let detection = judge::judge(
            &extents,
            frame.height(),
            self.config.min_area,
            self.config.min_confidence,
        );

        if detection.detected {
            log::info!(
                "bands detected: confidence {}%, bbox ({}, {}, {}, {})",
                detection.confidence,
                detection.bbox.x,
                detection.bbox.y,
                detection.bbox.w,
                detection.bbox.h
            );
        }

        Ok(detection)
    }
}
