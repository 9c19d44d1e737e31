//! Pan/zoom framing: from tracked objects to a crop window.
//!
//! # Algorithm
//!
//! 1. **Region**: bounding box of all confirmed objects (full frame if none).
//! 2. **Hysteresis circle**: the pan target only moves once the region center
//!    leaves a dead-zone circle around the previous target, and then only far
//!    enough to bring it back onto the circle. The circle shrinks as zoom
//!    grows, since a tight frame tolerates less drift.
//! 3. **Borders**: the region's left, right, and bottom edges (plus a bezel)
//!    go through border-mode [`ScalarFilter`]s that widen fast and tighten
//!    slowly.
//! 4. **Zoom**: the smoothed borders are mapped onto `[0, 100]`; the less
//!    zoomed of the horizontal and vertical estimates wins.
//! 5. **Pan**: the hysteresis-adjusted center X is smoothed once more.
//! 6. **Crop**: window size interpolated from zoom, horizontally centered on
//!    the pan, vertically fixed at the frame midline, clamped into the frame.

use serde::Serialize;
use steadycam_frame_model::config::{ConfigError, TargetingConfig};
use steadycam_frame_model::geometry::{CropRect, Point2D, Region};

use crate::scalar_filter::{BorderMode, ScalarFilter};

/// Zoom factor bounds.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 100.0;

/// Framing decision for one frame, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetDecision {
    pub crop: CropRect,
    /// 0 = widest window, 100 = tightest.
    pub zoom: f64,
    /// Hysteresis-adjusted target center, before pan smoothing.
    pub center: Point2D,
    /// Region the decision was framed around.
    pub region: Region,
}

/// Persistent framing state for one video stream.
#[derive(Debug, Clone)]
pub struct FrameTargeting {
    config: TargetingConfig,
    max_crop_width: f64,
    left: ScalarFilter,
    right: ScalarFilter,
    bottom: ScalarFilter,
    pan_x: ScalarFilter,
    previous_center: Option<Point2D>,
    previous_zoom: f64,
}

impl FrameTargeting {
    /// Create framing state. Fails if the crop window cannot fit the source.
    pub fn new(config: TargetingConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let width = config.source.width as f64;
        let height = config.source.height as f64;
        let params = config.filter;

        Ok(Self {
            max_crop_width: config.effective_max_crop_width(),
            left: ScalarFilter::with_params(0.0, BorderMode::Left, params),
            right: ScalarFilter::with_params(width, BorderMode::Right, params),
            bottom: ScalarFilter::with_params(height, BorderMode::Bottom, params),
            pan_x: ScalarFilter::with_params(width / 2.0, BorderMode::None, params),
            previous_center: None,
            previous_zoom: MIN_ZOOM,
            config,
        })
    }

    /// Frame the given objects (source pixels). Empty means full frame.
    /// Non-finite points are ignored.
    pub fn compute(&mut self, objects: &[Point2D]) -> TargetDecision {
        let finite: Vec<Point2D> = objects.iter().copied().filter(Point2D::is_finite).collect();
        self.compute_region(Region::bounding(&finite))
    }

    /// Frame an aggregate region computed upstream. `None` or a region with
    /// non-finite edges means full frame.
    pub fn compute_region(&mut self, region: Option<Region>) -> TargetDecision {
        let source = self.config.source;
        let region = region
            .filter(Region::is_finite)
            .unwrap_or_else(|| Region::full(source));

        let center = self.hysteresis_center(region.center());

        let bezel = self.config.bezel;
        let left = self.left.update(region.left - bezel);
        let right = self.right.update(region.right + bezel);
        let bottom = self.bottom.update(region.bottom + bezel);

        let zoom = self.zoom_factor(left, right, bottom);
        let pan = self.pan_x.update(center.x);
        let crop = self.crop_window(pan, zoom);

        tracing::trace!(
            center_x = center.x,
            center_y = center.y,
            left,
            right,
            bottom,
            pan,
            zoom,
            "frame targeted"
        );

        self.previous_center = Some(center);
        self.previous_zoom = zoom;

        TargetDecision {
            crop,
            zoom,
            center,
            region,
        }
    }

    /// Zoom factor of the last computed frame.
    pub fn previous_zoom(&self) -> f64 {
        self.previous_zoom
    }

    /// Hysteresis-adjusted center of the last computed frame.
    pub fn previous_center(&self) -> Option<Point2D> {
        self.previous_center
    }

    pub fn config(&self) -> &TargetingConfig {
        &self.config
    }

    /// Dead-zone radius for the current zoom level.
    pub fn hysteresis_radius(&self) -> f64 {
        let shrink = 1.0 - self.previous_zoom / MAX_ZOOM;
        (self.config.max_hysteresis_radius * shrink).max(self.config.min_hysteresis_radius)
    }

    /// Move the target only by how far `raw` sits outside the dead-zone circle.
    fn hysteresis_center(&self, raw: Point2D) -> Point2D {
        let Some(previous) = self.previous_center else {
            return raw;
        };

        let dx = raw.x - previous.x;
        let dy = raw.y - previous.y;
        let distance = (dx * dx + dy * dy).sqrt();
        let radius = self.hysteresis_radius();

        if distance > radius {
            let excess = (distance - radius) / distance;
            Point2D::new(previous.x + dx * excess, previous.y + dy * excess)
        } else {
            previous
        }
    }

    fn zoom_factor(&self, left: f64, right: f64, bottom: f64) -> f64 {
        let horizontal = self.zoom_for_width(right - left);

        let half_height = bottom - self.config.source.height as f64 / 2.0;
        let vertical = self.zoom_for_width(2.0 * half_height * self.config.aspect_ratio());

        horizontal.min(vertical).clamp(MIN_ZOOM, MAX_ZOOM)
    }

    /// Map a required window width onto the zoom scale.
    fn zoom_for_width(&self, width: f64) -> f64 {
        let range = self.max_crop_width - self.config.min_crop_width;
        if range <= f64::EPSILON {
            return MIN_ZOOM;
        }
        ((self.max_crop_width - width) / range * MAX_ZOOM).clamp(MIN_ZOOM, MAX_ZOOM)
    }

    fn crop_window(&self, pan: f64, zoom: f64) -> CropRect {
        let source_w = self.config.source.width as f64;
        let source_h = self.config.source.height as f64;

        let t = zoom / MAX_ZOOM;
        let width = self.max_crop_width + (self.config.min_crop_width - self.max_crop_width) * t;
        let height = (width / self.config.aspect_ratio()).min(source_h);

        let x = (pan - width / 2.0).clamp(0.0, (source_w - width).max(0.0));
        let y = ((source_h - height) / 2.0).max(0.0);

        CropRect {
            x,
            y,
            width,
            height,
        }
    }
}
