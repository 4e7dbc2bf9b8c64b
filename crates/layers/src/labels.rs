use foundation::math::Vec2;
use scene::index::SceneIndex;

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub font_size_rem: f64,
    pub color: [f32; 4],
    pub halo_color: [f32; 4],
    pub halo_width_px: f32,
    /// Gap between the marker tip and the label, in rem.
    pub offset_rem: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size_rem: 0.75,
            color: [0.13, 0.16, 0.2, 1.0],
            halo_color: [1.0, 1.0, 1.0, 0.85],
            halo_width_px: 2.0,
            offset_rem: 0.5,
        }
    }
}

/// A laid-out marker label. Labels are pure backdrop text: they never take
/// part in picking.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub poi_id: String,
    pub text: String,
    /// Center of the text block.
    pub position_px: Vec2,
    pub size_px: Vec2,
    pub font_size_px: f64,
}

/// Places one label below each labeled marker, in scene (id) order.
pub fn place_labels(scene: &SceneIndex, style: &LabelStyle, rem_px: f64) -> Vec<PlacedLabel> {
    let font_size_px = style.font_size_rem * rem_px;
    let offset_px = style.offset_rem * rem_px;

    let mut out = Vec::new();
    for node in scene.iter() {
        let Some(text) = &node.label else {
            continue;
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }

        let size = estimate_text_size(trimmed, font_size_px);
        out.push(PlacedLabel {
            poi_id: node.id.clone(),
            text: trimmed.to_string(),
            position_px: Vec2::new(
                node.anchor_px.x,
                node.anchor_px.y + offset_px + size.y * 0.5,
            ),
            size_px: size,
            font_size_px,
        });
    }
    out
}

fn estimate_text_size(text: &str, font_size_px: f64) -> Vec2 {
    let count = text.chars().count().max(1) as f64;
    Vec2::new(font_size_px * 0.6 * count, font_size_px)
}
