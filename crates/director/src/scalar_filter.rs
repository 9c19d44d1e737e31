//! Single-axis inertia smoothing.
//!
//! Models a heavy camera head on a tripod: a mass connected to the raw
//! measurement by a spring, slowed by friction. The filtered position is the
//! mass position, which gives camera moves a physical, unhurried feel.
//!
//! Border filters clamp velocity asymmetrically so that a frame edge can move
//! outward quickly (never cutting off the subject) but eases back slowly.

use steadycam_frame_model::config::FilterParams;

/// Velocity clamp policy for a smoothed scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderMode {
    /// Left frame edge: retreats (decreases) fast, advances slowly.
    Left,
    /// Right frame edge: grows fast, shrinks slowly.
    Right,
    /// Bottom frame edge: grows fast, shrinks slowly.
    Bottom,
    /// Symmetric clamp, used for the pan center.
    None,
}

impl BorderMode {
    /// `(min, max)` velocity allowed for this mode.
    pub fn velocity_bounds(self, params: &FilterParams) -> (f64, f64) {
        match self {
            BorderMode::Left => (-params.max_v, params.max_minus_v),
            BorderMode::Right | BorderMode::Bottom => (-params.max_minus_v, params.max_v),
            BorderMode::None => (-params.max_v, params.max_v),
        }
    }
}

/// Spring/mass/friction filter over one scalar.
#[derive(Debug, Clone)]
pub struct ScalarFilter {
    position: f64,
    velocity: f64,
    acceleration: f64,
    mode: BorderMode,
    params: FilterParams,
}

impl ScalarFilter {
    /// Create a filter at rest at `initial` with default constants.
    pub fn new(initial: f64, mode: BorderMode) -> Self {
        Self::with_params(initial, mode, FilterParams::default())
    }

    /// Create a filter at rest at `initial` with explicit constants.
    pub fn with_params(initial: f64, mode: BorderMode, params: FilterParams) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            acceleration: 0.0,
            mode,
            params,
        }
    }

    /// Advance one frame toward `measurement` and return the new position.
    pub fn update(&mut self, measurement: f64) -> f64 {
        let p = &self.params;

        // Ignore jitter while the mass is nearly at rest.
        let target = if self.velocity.abs() < p.hysteresis
            && (measurement - self.position).abs() < p.hysteresis
        {
            self.position
        } else {
            measurement
        };

        let ax = p.spring * (target - self.position) / p.mass;
        let (min_v, max_v) = self.mode.velocity_bounds(p);
        let vx = (self.velocity / p.friction + ax).clamp(min_v, max_v);

        self.position += vx + ax / 2.0;
        self.velocity = vx;
        self.acceleration = ax;
        self.position
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Acceleration computed by the last update.
    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    pub fn border_mode(&self) -> BorderMode {
        self.mode
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }
}
