//! Steadycam Frame Model
//!
//! Defines the data contracts shared by the director and its collaborators:
//! - **Geometry:** Points, frame sizes, bounding regions, and crop windows
//! - **Stream:** Per-frame detection input and crop decision output (JSONL)
//! - **Config:** Tuning parameters for tracking, smoothing, and framing
//!
//! Detections arrive in the detector's reduced working resolution; crop
//! decisions are expressed in full source resolution.

pub mod config;
pub mod geometry;
pub mod stream;

pub use config::*;
pub use geometry::*;
pub use stream::*;
