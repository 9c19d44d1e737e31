//! Tuning parameters for the tracker, the smoothing filters, and framing.
//!
//! Every constant the director uses lives here with its reference default,
//! so deployments can retune without touching code.

use serde::{Deserialize, Serialize};

use crate::geometry::FrameSize;

/// Rejected tuning values. Raised once at session construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} frame size must be non-zero, got {size}")]
    EmptyFrame { name: &'static str, size: FrameSize },

    #[error("crop window {width:.1}x{height:.1} does not fit the {frame} source frame")]
    CropLargerThanSource {
        width: f64,
        height: f64,
        frame: FrameSize,
    },

    #[error("min_crop_width {min} exceeds max_crop_width {max}")]
    CropRangeInverted { min: f64, max: f64 },

    #[error("vertical band [{top}, {bottom}] must satisfy 0 <= top < bottom <= 1")]
    InvalidBand { top: f64, bottom: f64 },

    #[error("too_young {too_young} leaves no confirmable life below max_life {max_life}")]
    NeverConfirmed { too_young: u32, max_life: u32 },
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn non_empty(name: &'static str, size: FrameSize) -> Result<(), ConfigError> {
    if size.is_empty() {
        Err(ConfigError::EmptyFrame { name, size })
    } else {
        Ok(())
    }
}

/// Spring/mass/friction constants of the scalar smoothing filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Spring strength pulling the position toward the measurement.
    pub spring: f64,

    /// Mass of the virtual camera.
    pub mass: f64,

    /// Divisor applied to the previous velocity every step.
    pub friction: f64,

    /// Velocity limit in the fast direction (pixels per frame).
    pub max_v: f64,

    /// Velocity limit in the slow direction of a border filter.
    pub max_minus_v: f64,

    /// Dead band: measurement changes below this are ignored while slow.
    /// Zero disables it.
    pub hysteresis: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            spring: 1.0,
            mass: 20.0,
            friction: 10.0,
            max_v: 50.0,
            max_minus_v: 0.1,
            hysteresis: 10.0,
        }
    }
}

impl FilterParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("spring", self.spring)?;
        positive("mass", self.mass)?;
        positive("friction", self.friction)?;
        non_negative("max_v", self.max_v)?;
        non_negative("max_minus_v", self.max_minus_v)?;
        non_negative("hysteresis", self.hysteresis)
    }
}

/// Object tracker tuning, in working-resolution pixels and frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Detections closer than this are the same object.
    pub isolation: f64,

    /// Life cap, in frames (900 = 60 s at 15 fps).
    pub max_life: u32,

    /// Objects must live longer than this to be reported.
    pub too_young: u32,

    /// Life added when an object is seen again.
    pub reinforce_boost: u32,

    /// Horizontal margin on each side where detections are discarded.
    pub border_zone: f64,

    /// Upper edge of the accepted vertical band, as a fraction of height.
    pub band_top: f64,

    /// Lower edge of the accepted vertical band, as a fraction of height.
    pub band_bottom: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            isolation: 60.0,
            max_life: 900,
            too_young: 10,
            reinforce_boost: 2,
            border_zone: 20.0,
            band_top: 0.25,
            band_bottom: 0.75,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("isolation", self.isolation)?;
        positive("max_life", self.max_life as f64)?;
        // Lives top out at max_life - 1 after aging.
        if self.too_young.saturating_add(1) >= self.max_life {
            return Err(ConfigError::NeverConfirmed {
                too_young: self.too_young,
                max_life: self.max_life,
            });
        }
        non_negative("border_zone", self.border_zone)?;
        if !(0.0..=1.0).contains(&self.band_top)
            || !(0.0..=1.0).contains(&self.band_bottom)
            || self.band_top >= self.band_bottom
        {
            return Err(ConfigError::InvalidBand {
                top: self.band_top,
                bottom: self.band_bottom,
            });
        }
        Ok(())
    }
}

/// Pan/zoom framing tuning, in source-resolution pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    /// Full-resolution frame that gets cropped.
    pub source: FrameSize,

    /// Output resolution; only its aspect ratio matters here.
    pub output: FrameSize,

    /// Crop width at zoom 100.
    pub min_crop_width: f64,

    /// Crop width at zoom 0. `None` picks the widest window that fits.
    pub max_crop_width: Option<f64>,

    /// Margin added around the tracked region before framing.
    pub bezel: f64,

    /// Hysteresis circle radius at zoom 0.
    pub max_hysteresis_radius: f64,

    /// Hysteresis circle radius never shrinks below this.
    pub min_hysteresis_radius: f64,

    /// Constants for the border and pan filters.
    pub filter: FilterParams,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            source: FrameSize::new(1920, 1080),
            output: FrameSize::new(1280, 720),
            min_crop_width: 640.0,
            max_crop_width: None,
            bezel: 100.0,
            max_hysteresis_radius: 250.0,
            min_hysteresis_radius: 1.0,
            filter: FilterParams::default(),
        }
    }
}

impl TargetingConfig {
    /// Output width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.output.aspect_ratio()
    }

    /// Crop width used at zoom 0.
    pub fn effective_max_crop_width(&self) -> f64 {
        self.max_crop_width.unwrap_or_else(|| {
            let by_height = self.source.height as f64 * self.aspect_ratio();
            (self.source.width as f64).min(by_height)
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_empty("source", self.source)?;
        non_empty("output", self.output)?;
        positive("min_crop_width", self.min_crop_width)?;
        non_negative("bezel", self.bezel)?;
        non_negative("max_hysteresis_radius", self.max_hysteresis_radius)?;
        non_negative("min_hysteresis_radius", self.min_hysteresis_radius)?;
        self.filter.validate()?;

        let max = self.effective_max_crop_width();
        positive("max_crop_width", max)?;
        if self.min_crop_width > max {
            return Err(ConfigError::CropRangeInverted {
                min: self.min_crop_width,
                max,
            });
        }

        let height = max / self.aspect_ratio();
        // Allow sub-pixel rounding of aspect ratios like 16:9 at odd sizes.
        if max > self.source.width as f64 + 1e-6 || height > self.source.height as f64 + 1e-6 {
            return Err(ConfigError::CropLargerThanSource {
                width: max,
                height,
                frame: self.source,
            });
        }
        Ok(())
    }
}

/// Everything one director session needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    /// Resolution detections are reported in.
    pub working: FrameSize,
    pub tracker: TrackerConfig,
    pub targeting: TargetingConfig,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            working: FrameSize::new(640, 360),
            tracker: TrackerConfig::default(),
            targeting: TargetingConfig::default(),
        }
    }
}

impl DirectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_empty("working", self.working)?;
        self.tracker.validate()?;
        self.targeting.validate()
    }
}
