use crate::index::SceneIndex;
use crate::node::NodeState;

/// Bidirectional selection bridge over a single nullable POI id.
///
/// Both interaction paths (a local click and an externally owned store
/// update) funnel through `apply`, so the two can interleave in any order
/// and converge on the last write. The bridge never mutates more than one
/// node into the selected state.
///
/// An id that is not present in the scene stays authoritative ("pending"):
/// no visual changes, but a later rebuild may resolve it via `reapply`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SelectionBridge {
    selected: Option<String>,
}

impl SelectionBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// True when the selected id has a node in the scene.
    pub fn is_resolved(&self, scene: &SceneIndex) -> bool {
        match &self.selected {
            Some(id) => scene.get(id).is_some(),
            None => false,
        }
    }

    /// Drives the state machine to `target`. Returns `true` when the
    /// authoritative id changed.
    ///
    /// Transitions:
    /// - Idle -> Selected(X): promote X, attach callout.
    /// - Selected(X) -> Selected(Y): restore X, promote Y.
    /// - Selected(X) -> Idle: restore X, remove callout.
    pub fn apply(&mut self, scene: &mut SceneIndex, target: Option<&str>) -> bool {
        if self.selected.as_deref() == target {
            return false;
        }

        if let Some(old) = self.selected.take()
            && let Some(node) = scene.get_mut(&old)
            && node.state == NodeState::Selected
        {
            node.state = NodeState::Rest;
        }
        scene.clear_callout();

        self.selected = target.map(str::to_string);
        self.promote(scene);
        true
    }

    /// Click path: selecting the already-selected id clears the selection.
    pub fn toggle(&mut self, scene: &mut SceneIndex, id: &str) -> bool {
        if self.selected.as_deref() == Some(id) {
            self.apply(scene, None)
        } else {
            self.apply(scene, Some(id))
        }
    }

    /// Re-resolves the selection against freshly rebuilt nodes.
    ///
    /// The render pass calls this after every rebuild so selection survives a
    /// data refresh by id; the callout is positioned from the node's newly
    /// computed coordinates, never a stale cache.
    pub fn reapply(&self, scene: &mut SceneIndex) {
        scene.clear_callout();
        self.promote(scene);
    }

    fn promote(&self, scene: &mut SceneIndex) {
        if let Some(id) = &self.selected
            && scene.get(id).is_some()
        {
            scene.set_state(id, NodeState::Selected);
            scene.attach_callout(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionBridge;
    use crate::index::SceneIndex;
    use crate::node::{MarkerNode, NodeState, Visual};
    use foundation::math::Vec2;

    fn scene_with(ids: &[&str]) -> SceneIndex {
        let mut scene = SceneIndex::new();
        for (i, id) in ids.iter().enumerate() {
            scene.insert(MarkerNode {
                id: id.to_string(),
                anchor_px: Vec2::new(10.0 * i as f64, 50.0),
                size_px: Vec2::new(24.0, 36.0),
                base: Visual {
                    scale: 1.0,
                    color: [0.9, 0.2, 0.2, 1.0],
                },
                state: NodeState::Rest,
                label: None,
                icon: None,
            });
        }
        scene
    }

    #[test]
    fn at_most_one_node_is_selected() {
        let mut scene = scene_with(&["a", "b", "c"]);
        let mut bridge = SelectionBridge::new();

        let moves: [Option<&str>; 6] = [
            Some("a"),
            Some("b"),
            Some("b"),
            None,
            Some("c"),
            Some("a"),
        ];
        for target in moves {
            bridge.apply(&mut scene, target);
            assert!(scene.selected_count() <= 1);
        }
        assert_eq!(bridge.selected(), Some("a"));
        assert_eq!(scene.selected_count(), 1);
    }

    #[test]
    fn restore_leaves_both_nodes_at_base() {
        let mut scene = scene_with(&["a", "b"]);
        let mut bridge = SelectionBridge::new();
        let base_a = scene.get("a").unwrap().base;
        let base_b = scene.get("b").unwrap().base;

        bridge.apply(&mut scene, Some("a"));
        bridge.apply(&mut scene, Some("b"));
        bridge.apply(&mut scene, None);

        let style = crate::node::InteractionStyle::default();
        assert_eq!(scene.get("a").unwrap().visual(&style), base_a);
        assert_eq!(scene.get("b").unwrap().visual(&style), base_b);
        assert!(scene.callout().is_none());
    }

    #[test]
    fn selecting_while_hovered_restores_to_base_not_hover() {
        let mut scene = scene_with(&["a"]);
        let mut bridge = SelectionBridge::new();
        let base = scene.get("a").unwrap().base;

        scene.set_hover(Some("a"));
        bridge.apply(&mut scene, Some("a"));
        bridge.apply(&mut scene, None);

        let style = crate::node::InteractionStyle::default();
        assert_eq!(scene.get("a").unwrap().visual(&style), base);
    }

    #[test]
    fn toggle_clears_on_second_click() {
        let mut scene = scene_with(&["a"]);
        let mut bridge = SelectionBridge::new();

        assert!(bridge.toggle(&mut scene, "a"));
        assert_eq!(bridge.selected(), Some("a"));
        assert!(scene.callout().is_some());

        assert!(bridge.toggle(&mut scene, "a"));
        assert_eq!(bridge.selected(), None);
        assert!(scene.callout().is_none());
    }

    #[test]
    fn unknown_id_stays_pending_until_rebuild_resolves_it() {
        let mut scene = scene_with(&["a"]);
        let mut bridge = SelectionBridge::new();

        assert!(bridge.apply(&mut scene, Some("ghost")));
        assert_eq!(bridge.selected(), Some("ghost"));
        assert!(!bridge.is_resolved(&scene));
        assert_eq!(scene.selected_count(), 0);
        assert!(scene.callout().is_none());

        // A later rebuild brings the referenced POI into the scene.
        let mut rebuilt = scene_with(&["a", "ghost"]);
        bridge.reapply(&mut rebuilt);
        assert!(bridge.is_resolved(&rebuilt));
        assert_eq!(rebuilt.get("ghost").unwrap().state, NodeState::Selected);
        assert_eq!(rebuilt.callout().unwrap().poi_id, "ghost");
    }

    #[test]
    fn reapply_uses_fresh_coordinates() {
        let mut scene = scene_with(&["a", "b"]);
        let mut bridge = SelectionBridge::new();
        bridge.apply(&mut scene, Some("b"));
        let before = scene.callout().unwrap().connector_from;

        // Same POI id, new projected position after a data refresh.
        let mut rebuilt = SceneIndex::new();
        rebuilt.insert(MarkerNode {
            id: "b".to_string(),
            anchor_px: Vec2::new(300.0, 40.0),
            size_px: Vec2::new(24.0, 36.0),
            base: Visual {
                scale: 1.0,
                color: [0.9, 0.2, 0.2, 1.0],
            },
            state: NodeState::Rest,
            label: None,
            icon: None,
        });
        bridge.reapply(&mut rebuilt);

        let after = rebuilt.callout().unwrap().connector_from;
        assert_ne!(before, after);
        assert_eq!(after, Vec2::new(300.0, 40.0));
    }
}
