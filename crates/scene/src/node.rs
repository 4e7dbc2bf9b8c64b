use foundation::bounds::Aabb2;
use foundation::math::Vec2;

/// Display attributes of a marker at one instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Visual {
    /// Display scale relative to the marker's base box.
    pub scale: f64,
    pub color: [f32; 4],
}

/// Interaction state of a marker node.
///
/// Selection takes precedence over hover: a selected marker ignores hover
/// transitions entirely.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NodeState {
    Rest,
    Hovered,
    Selected,
}

/// Fixed interaction visuals shared by every marker.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InteractionStyle {
    pub hover_scale: f64,
    pub select_scale: f64,
    pub select_color: [f32; 4],
}

impl Default for InteractionStyle {
    fn default() -> Self {
        Self {
            hover_scale: 1.15,
            select_scale: 1.35,
            select_color: [0.23, 0.51, 0.96, 1.0],
        }
    }
}

/// A retained marker record keyed by POI id.
///
/// `base` is the build-time visual and the only restoration target: the
/// on-screen visual is always `resolve_visual(base, state, style)`, never a
/// mutation of cached attributes, so restoring a marker can never observe a
/// hover- or selection-displaced value.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerNode {
    pub id: String,
    /// Projected coordinate; the marker's visual tip sits exactly here.
    pub anchor_px: Vec2,
    /// On-screen box size at base scale.
    pub size_px: Vec2,
    pub base: Visual,
    pub state: NodeState,
    pub label: Option<String>,
    pub icon: Option<String>,
}

impl MarkerNode {
    pub fn visual(&self, style: &InteractionStyle) -> Visual {
        resolve_visual(self.base, self.state, style)
    }

    /// Top-left corner of the displayed box: the box is offset by half its
    /// width and its full height so the tip stays anchored while scaling.
    pub fn origin_px(&self, style: &InteractionStyle) -> Vec2 {
        let scale = self.visual(style).scale;
        let w = self.size_px.x * scale;
        let h = self.size_px.y * scale;
        Vec2::new(self.anchor_px.x - w * 0.5, self.anchor_px.y - h)
    }

    pub fn bounds_px(&self, style: &InteractionStyle) -> Aabb2 {
        let scale = self.visual(style).scale;
        let origin = self.origin_px(style);
        Aabb2::new(
            origin,
            Vec2::new(
                origin.x + self.size_px.x * scale,
                origin.y + self.size_px.y * scale,
            ),
        )
    }
}

/// The single place the next visual state is computed.
pub fn resolve_visual(base: Visual, state: NodeState, style: &InteractionStyle) -> Visual {
    match state {
        NodeState::Rest => base,
        NodeState::Hovered => Visual {
            scale: base.scale * style.hover_scale,
            color: base.color,
        },
        NodeState::Selected => Visual {
            scale: base.scale * style.select_scale,
            color: style.select_color,
        },
    }
}
