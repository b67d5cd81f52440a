pub mod classifier;
pub mod config;
pub mod error;
pub mod frame;
pub mod judge;
pub mod overlay;
pub mod pixel;
pub mod store;
pub mod threshold;
