//! Per-stream director session.
//!
//! Owns the tracker and framing state for one video stream. Detections come
//! in working resolution; decisions go out in source resolution.

use steadycam_common::SteadycamResult;
use steadycam_frame_model::config::DirectorConfig;
use steadycam_frame_model::geometry::Point2D;
use steadycam_frame_model::stream::{CropDecision, DetectionFrame, FrameIndex};

use crate::frame_targeting::FrameTargeting;
use crate::object_tracker::ObjectTracker;

/// Stateful pipeline from detections to crop decisions for one stream.
///
/// Frames must be fed in capture order; every frame's output depends on the
/// smoothing state left by the previous one.
#[derive(Debug, Clone)]
pub struct DirectorSession {
    config: DirectorConfig,
    tracker: ObjectTracker,
    targeting: FrameTargeting,
    scale: (f64, f64),
    last_frame: Option<FrameIndex>,
    confirmed_count: usize,
}

impl DirectorSession {
    /// Validate the configuration and create a fresh session.
    pub fn new(config: DirectorConfig) -> SteadycamResult<Self> {
        config.validate()?;

        let tracker = ObjectTracker::new(config.tracker, config.working);
        let targeting = FrameTargeting::new(config.targeting)?;
        let scale = config.working.scale_to(&config.targeting.source);

        tracing::debug!(
            working = %config.working,
            source = %config.targeting.source,
            output = %config.targeting.output,
            "director session created"
        );

        Ok(Self {
            config,
            tracker,
            targeting,
            scale,
            last_frame: None,
            confirmed_count: 0,
        })
    }

    /// Process one frame of detections.
    pub fn process(&mut self, frame: &DetectionFrame) -> CropDecision {
        if let Some(last) = self.last_frame {
            if frame.frame <= last {
                tracing::warn!(
                    frame = frame.frame,
                    last,
                    "frame delivered out of order; smoothing assumes capture order"
                );
            }
        }
        self.last_frame = Some(frame.frame);

        let confirmed = self.tracker.update(&frame.points);
        if confirmed.len() != self.confirmed_count {
            tracing::debug!(
                frame = frame.frame,
                from = self.confirmed_count,
                to = confirmed.len(),
                "confirmed object count changed"
            );
            self.confirmed_count = confirmed.len();
        }

        let (sx, sy) = self.scale;
        let in_source: Vec<Point2D> = confirmed.iter().map(|p| p.scaled(sx, sy)).collect();
        let decision = self.targeting.compute(&in_source);

        CropDecision {
            frame: frame.frame,
            crop: decision.crop,
            zoom: decision.zoom,
        }
    }

    /// Process a whole stream in order.
    pub fn run(&mut self, frames: &[DetectionFrame]) -> Vec<CropDecision> {
        frames.iter().map(|frame| self.process(frame)).collect()
    }

    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    pub fn tracker(&self) -> &ObjectTracker {
        &self.tracker
    }

    pub fn targeting(&self) -> &FrameTargeting {
        &self.targeting
    }
}
