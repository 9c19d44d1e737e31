//! Geometry types for detections, regions, and crop windows.
//!
//! Points and regions are plain pixel coordinates; which resolution they are
//! expressed in (working or source) is up to the caller.

use serde::{Deserialize, Serialize};

/// A 2D point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    pub fn distance_sq(&self, other: &Point2D) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Scale each axis independently.
    pub fn scaled(&self, sx: f64, sy: f64) -> Point2D {
        Point2D::new(self.x * sx, self.y * sy)
    }
}

/// Frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Per-axis factors that map coordinates in `self` onto `target`.
    pub fn scale_to(&self, target: &FrameSize) -> (f64, f64) {
        (
            target.width as f64 / self.width as f64,
            target.height as f64 / self.height as f64,
        )
    }

    /// Parse `"1920x1080"` style strings.
    pub fn parse(s: &str) -> Option<FrameSize> {
        let (w, h) = s.trim().split_once(['x', 'X'])?;
        Some(FrameSize::new(w.trim().parse().ok()?, h.trim().parse().ok()?))
    }
}

impl std::fmt::Display for FrameSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned bounding box. May be zero-area (a single point).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Region {
    /// Region covering a whole frame.
    pub fn full(frame: FrameSize) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            right: frame.width as f64,
            bottom: frame.height as f64,
        }
    }

    /// Smallest region covering all points. `None` for an empty slice.
    pub fn bounding(points: &[Point2D]) -> Option<Self> {
        let first = points.first()?;
        let init = Region {
            left: first.x,
            top: first.y,
            right: first.x,
            bottom: first.y,
        };
        Some(points[1..].iter().fold(init, |r, p| Region {
            left: r.left.min(p.x),
            top: r.top.min(p.y),
            right: r.right.max(p.x),
            bottom: r.bottom.max(p.y),
        }))
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// All four edges are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }
}

/// Crop window in source-resolution pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    /// Crop covering the whole frame.
    pub fn full(frame: FrameSize) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: frame.width as f64,
            height: frame.height as f64,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Whether the crop lies fully inside `frame` (with a small float tolerance).
    pub fn is_within(&self, frame: FrameSize) -> bool {
        const EPS: f64 = 1e-6;
        self.x >= -EPS
            && self.y >= -EPS
            && self.right() <= frame.width as f64 + EPS
            && self.bottom() <= frame.height as f64 + EPS
    }

    /// Round to whole pixels, keeping the result inside `frame`.
    pub fn to_pixels(&self, frame: FrameSize) -> PixelRect {
        let width = (self.width.round().max(1.0) as u32).min(frame.width);
        let height = (self.height.round().max(1.0) as u32).min(frame.height);
        let x = (self.x.round().max(0.0) as u32).min(frame.width - width);
        let y = (self.y.round().max(0.0) as u32).min(frame.height - height);
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Integer crop window handed to the cropping collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}
