//! Steadycam Director: the virtual cameraman
//!
//! Turns noisy per-frame detection points into a steady crop window:
//! - **Object Tracking:** Merge detections into objects with life counters
//! - **Scalar Filtering:** Spring/mass/friction smoothing with dead bands
//! - **Frame Targeting:** Pan/zoom decisions with a shrinking hysteresis circle
//!
//! This crate is pure computation: no I/O, no decoding, no clock.
//! Each [`DirectorSession`] owns the state for exactly one stream.

pub mod frame_targeting;
pub mod object_tracker;
pub mod scalar_filter;
pub mod session;

pub use frame_targeting::{FrameTargeting, TargetDecision};
pub use object_tracker::{ObjectTracker, TrackedObject};
pub use scalar_filter::{BorderMode, ScalarFilter};
pub use session::DirectorSession;
