use foundation::bounds::Aabb2;
use foundation::math::{Vec2, stable_total_cmp_f64};

use crate::index::SceneIndex;
use crate::node::InteractionStyle;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    /// Extra hit slop around each marker box, in pixels.
    pub slop_px: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self { slop_px: 0.0 }
    }
}

/// Deterministic point picking over the marker scene.
///
/// Ordering contract:
/// - Only markers whose displayed box (at the current visual scale, inflated
///   by `slop_px`) contains the point are candidates.
/// - The candidate whose anchor is closest to the point wins.
/// - Ties break on the lower id (lexicographic).
pub fn pick_point(
    scene: &SceneIndex,
    point: Vec2,
    style: &InteractionStyle,
    opts: PickOptions,
) -> Option<String> {
    let mut best: Option<(f64, &str)> = None;

    for node in scene.iter() {
        let bounds = inflate(node.bounds_px(style), opts.slop_px);
        if !bounds.contains(point) {
            continue;
        }

        let distance = node.anchor_px.distance(point);
        best = match best {
            None => Some((distance, node.id.as_str())),
            Some((best_distance, best_id)) => {
                // Iteration is ascending id, so on a tie the earlier id stays.
                if stable_total_cmp_f64(distance, best_distance).is_lt() {
                    Some((distance, node.id.as_str()))
                } else {
                    Some((best_distance, best_id))
                }
            }
        };
    }

    best.map(|(_, id)| id.to_string())
}

fn inflate(bounds: Aabb2, by: f64) -> Aabb2 {
    Aabb2::new(
        Vec2::new(bounds.min.x - by, bounds.min.y - by),
        Vec2::new(bounds.max.x + by, bounds.max.y + by),
    )
}
