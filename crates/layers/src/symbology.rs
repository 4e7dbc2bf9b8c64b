use foundation::math::Vec2;

/// Backdrop styling for the region layer.
///
/// The snapshot is rendered in two passes from the same paths: a blurred
/// offset shadow pass beneath a plain fill pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RegionStyle {
    pub fill_color: [f32; 4],
    pub shadow_color: [f32; 4],
    pub shadow_offset_px: (f64, f64),
    pub shadow_blur_px: f32,
}

impl Default for RegionStyle {
    fn default() -> Self {
        Self {
            fill_color: [0.88, 0.91, 0.95, 1.0],
            shadow_color: [0.0, 0.0, 0.0, 0.25],
            shadow_offset_px: (2.0, 4.0),
            shadow_blur_px: 6.0,
        }
    }
}

/// Marker sizing and default paint.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerStyle {
    /// Marker glyph box in intrinsic path units.
    pub intrinsic_size: Vec2,
    /// On-screen marker height at `size == 1`, in rem.
    pub reference_height_rem: f64,
    pub default_color: [f32; 4],
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            intrinsic_size: Vec2::new(24.0, 32.0),
            reference_height_rem: 2.25,
            default_color: [0.92, 0.26, 0.21, 1.0],
        }
    }
}

impl MarkerStyle {
    /// Scale from intrinsic path units to screen pixels.
    ///
    /// Normalizing against the reference height keeps every marker's
    /// footprint consistent regardless of the glyph's own geometry.
    pub fn screen_scale(&self, size: f64, rem_px: f64) -> f64 {
        size * (self.reference_height_rem * rem_px) / self.intrinsic_size.y
    }

    /// On-screen marker box at base scale.
    pub fn screen_size(&self, size: f64, rem_px: f64) -> Vec2 {
        self.intrinsic_size.scale(self.screen_scale(size, rem_px))
    }
}

#[cfg(test)]
mod tests {
    use super::MarkerStyle;

    #[test]
    fn reference_height_pins_screen_footprint() {
        let style = MarkerStyle::default();
        let box_px = style.screen_size(1.0, 16.0);
        assert_eq!(box_px.y, 36.0);

        // A glyph with different intrinsic geometry lands on the same height.
        let tall = MarkerStyle {
            intrinsic_size: foundation::math::Vec2::new(10.0, 64.0),
            ..style
        };
        assert_eq!(tall.screen_size(1.0, 16.0).y, 36.0);
    }

    #[test]
    fn size_multiplier_scales_linearly() {
        let style = MarkerStyle::default();
        let small = style.screen_size(0.5, 16.0);
        let large = style.screen_size(2.0, 16.0);
        assert_eq!(small.y * 4.0, large.y);
    }
}
