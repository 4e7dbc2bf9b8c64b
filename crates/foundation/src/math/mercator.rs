use super::Vec2;

/// Largest latitude (degrees) representable in the spherical Mercator plane.
pub const MERCATOR_MAX_LAT_DEG: f64 = 85.051_128_779_806_59;

/// Spherical Mercator projection: geographic degrees to screen pixels.
///
/// A projection is a pure value: the same `(lon, lat)` always maps to the
/// same screen coordinate for a given center/scale/translate. Coordinates
/// outside the valid domain project to `None` rather than to a garbage
/// position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mercator {
    pub center_lon_deg: f64,
    pub center_lat_deg: f64,
    /// Pixels per radian of longitude.
    pub scale: f64,
    /// Screen position of the projection center.
    pub translate: Vec2,
}

impl Mercator {
    pub fn new(center_lon_deg: f64, center_lat_deg: f64, scale: f64, translate: Vec2) -> Self {
        Self {
            center_lon_deg,
            center_lat_deg,
            scale,
            translate,
        }
    }

    /// Projects a geographic coordinate (degrees) to screen pixels.
    ///
    /// Screen y grows downward, so northward latitudes map to smaller y.
    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> Option<Vec2> {
        if !in_domain(lon_deg, lat_deg) {
            return None;
        }

        let x = self.translate.x
            + self.scale * (lon_deg.to_radians() - self.center_lon_deg.to_radians());
        let y = self.translate.y
            - self.scale * (mercator_y(lat_deg) - mercator_y(self.center_lat_deg));
        Some(Vec2::new(x, y))
    }
}

/// True when a coordinate pair lies inside the projectable domain.
pub fn in_domain(lon_deg: f64, lat_deg: f64) -> bool {
    lon_deg.is_finite()
        && lat_deg.is_finite()
        && lon_deg.abs() <= 180.0
        && lat_deg.abs() <= MERCATOR_MAX_LAT_DEG
}

fn mercator_y(lat_deg: f64) -> f64 {
    let lat_rad = lat_deg.to_radians();
    (std::f64::consts::FRAC_PI_4 + lat_rad * 0.5).tan().ln()
}
