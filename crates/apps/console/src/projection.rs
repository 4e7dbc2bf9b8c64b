use foundation::bounds::Aabb2;
use foundation::math::{Mercator, Vec2};

use crate::config::{
    JEJU_CENTER_LAT_DEG, JEJU_CENTER_LON_DEG, JEJU_FALLBACK_FRACTION, JEJU_INSET_MARGIN_REM,
    JEJU_SCALE_PER_MIN_DIM, MAINLAND_CENTER_LAT_DEG, MAINLAND_CENTER_LON_DEG,
    MAINLAND_OFFSET_REM, MAINLAND_SCALE_PER_MIN_DIM, ViewConfig,
};

/// Builds the mainland projection for the current viewport.
///
/// Scale follows the smaller viewport dimension; the centroid sits near
/// viewport center with a fixed rem offset. Recomputed on every resize.
pub fn mainland(config: &ViewConfig) -> Mercator {
    let scale = MAINLAND_SCALE_PER_MIN_DIM * config.min_dimension();
    let translate = Vec2::new(
        config.width_px * 0.5 + MAINLAND_OFFSET_REM.0 * config.rem_px,
        config.height_px * 0.5 + MAINLAND_OFFSET_REM.1 * config.rem_px,
    );
    Mercator::new(
        MAINLAND_CENTER_LON_DEG,
        MAINLAND_CENTER_LAT_DEG,
        scale,
        translate,
    )
}

/// Builds the Jeju inset projection.
///
/// The inset docks to the bottom-right corner of the mainland layer's
/// rendered bounds with a fixed rem margin. Before any bounds exist (resize
/// racing the data load), placement degrades to a viewport-relative default.
pub fn jeju(config: &ViewConfig, mainland_bounds: Option<Aabb2>) -> Mercator {
    let scale = JEJU_SCALE_PER_MIN_DIM * config.min_dimension();
    let translate = match mainland_bounds {
        Some(bounds) => Vec2::new(
            bounds.max.x - JEJU_INSET_MARGIN_REM.0 * config.rem_px,
            bounds.max.y - JEJU_INSET_MARGIN_REM.1 * config.rem_px,
        ),
        None => Vec2::new(
            config.width_px * JEJU_FALLBACK_FRACTION.0,
            config.height_px * JEJU_FALLBACK_FRACTION.1,
        ),
    };
    Mercator::new(JEJU_CENTER_LON_DEG, JEJU_CENTER_LAT_DEG, scale, translate)
}

#[cfg(test)]
mod tests {
    use super::{jeju, mainland};
    use crate::config::ViewConfig;
    use foundation::bounds::Aabb2;
    use foundation::math::Vec2;

    #[test]
    fn mainland_is_deterministic_for_a_fixed_viewport() {
        let config = ViewConfig::default();
        assert_eq!(mainland(&config), mainland(&config));
    }

    #[test]
    fn mainland_scale_follows_the_smaller_dimension() {
        let wide = ViewConfig {
            width_px: 2000.0,
            height_px: 700.0,
            ..ViewConfig::default()
        };
        let tall = ViewConfig {
            width_px: 700.0,
            height_px: 2000.0,
            ..ViewConfig::default()
        };
        assert_eq!(mainland(&wide).scale, mainland(&tall).scale);
    }

    #[test]
    fn jeju_docks_to_the_mainland_bounds_corner() {
        let config = ViewConfig::default();
        let bounds = Aabb2::new(Vec2::new(200.0, 100.0), Vec2::new(900.0, 650.0));
        let proj = jeju(&config, Some(bounds));
        assert_eq!(proj.translate, Vec2::new(900.0 - 48.0, 650.0 - 32.0));
    }

    #[test]
    fn jeju_falls_back_to_viewport_placement_without_bounds() {
        let config = ViewConfig::default();
        let proj = jeju(&config, None);
        assert_eq!(
            proj.translate,
            Vec2::new(1280.0 * 0.22, 720.0 * 0.82)
        );
    }

    #[test]
    fn jeju_scale_is_independent_of_bounds() {
        let config = ViewConfig::default();
        let bounds = Aabb2::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        assert_eq!(jeju(&config, None).scale, jeju(&config, Some(bounds)).scale);
    }
}
