/// Mount-time viewport contract: a measurable client size plus the root
/// font size everything rem-relative derives from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewConfig {
    pub width_px: f64,
    pub height_px: f64,
    pub rem_px: f64,
    /// Fixed tick delta for the animation timebase.
    pub frame_dt_s: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width_px: 1280.0,
            height_px: 720.0,
            rem_px: 16.0,
            frame_dt_s: 1.0 / 60.0,
        }
    }
}

impl ViewConfig {
    pub fn min_dimension(&self) -> f64 {
        self.width_px.min(self.height_px)
    }
}

/// Geographic centroid the mainland projection is centered on.
pub const MAINLAND_CENTER_LON_DEG: f64 = 127.8;
pub const MAINLAND_CENTER_LAT_DEG: f64 = 36.2;

/// Centroid of the Jeju inset.
pub const JEJU_CENTER_LON_DEG: f64 = 126.55;
pub const JEJU_CENTER_LAT_DEG: f64 = 33.38;

/// Projection scale per smaller viewport dimension, so relative layout is
/// resolution-independent.
pub const MAINLAND_SCALE_PER_MIN_DIM: f64 = 6.5;
pub const JEJU_SCALE_PER_MIN_DIM: f64 = 9.0;

/// Directional offset of the mainland centroid from viewport center, rem.
pub const MAINLAND_OFFSET_REM: (f64, f64) = (-1.5, -0.5);

/// Inset dock margin from the bottom-right corner of the mainland rendered
/// bounds, rem.
pub const JEJU_INSET_MARGIN_REM: (f64, f64) = (3.0, 2.0);

/// Inset placement as viewport fractions, used before any mainland bounds
/// exist.
pub const JEJU_FALLBACK_FRACTION: (f64, f64) = (0.22, 0.82);

pub const CLICK_RIPPLE_RADIUS_REM: f64 = 2.5;
pub const PULSE_RADIUS_REM: f64 = 3.0;
pub const PICK_SLOP_REM: f64 = 0.125;
