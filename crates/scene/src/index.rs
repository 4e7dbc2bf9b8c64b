use std::collections::BTreeMap;

use foundation::math::Vec2;

use crate::node::{MarkerNode, NodeState};

/// Offset from a marker anchor to its callout pill.
pub const CALLOUT_OFFSET_PX: (f64, f64) = (18.0, -28.0);

/// Info callout attached to the selected marker: a connector line from the
/// anchor to a label pill.
#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    pub poi_id: String,
    pub label: String,
    pub connector_from: Vec2,
    pub connector_to: Vec2,
}

/// The retained scene: marker nodes keyed by POI id, plus at most one
/// callout.
///
/// Iteration order is ascending id (BTreeMap), so every walk over the scene
/// is deterministic. A render pass rebuilds the index wholesale via `clear`
/// followed by `insert`s; nothing diffs nodes in place.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SceneIndex {
    nodes: BTreeMap<String, MarkerNode>,
    callout: Option<Callout>,
}

impl SceneIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every node and the callout.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.callout = None;
    }

    pub fn insert(&mut self, node: MarkerNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn get(&self, id: &str) -> Option<&MarkerNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut MarkerNode> {
        self.nodes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &MarkerNode> {
        self.nodes.values()
    }

    pub fn set_state(&mut self, id: &str, state: NodeState) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.state = state;
                true
            }
            None => false,
        }
    }

    /// Moves hover to `id`, demoting the previously hovered node.
    ///
    /// A selected node never enters or leaves the hovered state here;
    /// selection visuals take precedence.
    pub fn set_hover(&mut self, id: Option<&str>) {
        let previous: Vec<String> = self
            .nodes
            .values()
            .filter(|n| n.state == NodeState::Hovered && Some(n.id.as_str()) != id)
            .map(|n| n.id.clone())
            .collect();
        for prev in previous {
            self.set_state(&prev, NodeState::Rest);
        }

        if let Some(id) = id
            && let Some(node) = self.nodes.get_mut(id)
            && node.state == NodeState::Rest
        {
            node.state = NodeState::Hovered;
        }
    }

    pub fn selected_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| n.state == NodeState::Selected)
            .count()
    }

    pub fn callout(&self) -> Option<&Callout> {
        self.callout.as_ref()
    }

    /// Attaches the callout to `id`, reading the node's fresh coordinates.
    ///
    /// Returns `false` (and leaves no callout) when the node is absent.
    pub fn attach_callout(&mut self, id: &str) -> bool {
        let Some(node) = self.nodes.get(id) else {
            self.callout = None;
            return false;
        };
        let label = node.label.clone().unwrap_or_else(|| node.id.clone());
        let from = node.anchor_px;
        let to = Vec2::new(from.x + CALLOUT_OFFSET_PX.0, from.y + CALLOUT_OFFSET_PX.1);
        self.callout = Some(Callout {
            poi_id: node.id.clone(),
            label,
            connector_from: from,
            connector_to: to,
        });
        true
    }

    pub fn clear_callout(&mut self) {
        self.callout = None;
    }
}

#[cfg(test)]
mod tests {
    use super::SceneIndex;
    use crate::node::{MarkerNode, NodeState, Visual};
    use foundation::math::Vec2;

    fn node(id: &str, x: f64) -> MarkerNode {
        MarkerNode {
            id: id.to_string(),
            anchor_px: Vec2::new(x, 100.0),
            size_px: Vec2::new(24.0, 36.0),
            base: Visual {
                scale: 1.0,
                color: [1.0, 1.0, 1.0, 1.0],
            },
            state: NodeState::Rest,
            label: Some(format!("site {id}")),
            icon: None,
        }
    }

    #[test]
    fn iteration_is_sorted_by_id() {
        let mut scene = SceneIndex::new();
        scene.insert(node("c", 1.0));
        scene.insert(node("a", 2.0));
        scene.insert(node("b", 3.0));
        let ids: Vec<&str> = scene.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn hover_moves_between_nodes() {
        let mut scene = SceneIndex::new();
        scene.insert(node("a", 1.0));
        scene.insert(node("b", 2.0));

        scene.set_hover(Some("a"));
        assert_eq!(scene.get("a").unwrap().state, NodeState::Hovered);

        scene.set_hover(Some("b"));
        assert_eq!(scene.get("a").unwrap().state, NodeState::Rest);
        assert_eq!(scene.get("b").unwrap().state, NodeState::Hovered);

        scene.set_hover(None);
        assert_eq!(scene.get("b").unwrap().state, NodeState::Rest);
    }

    #[test]
    fn hover_never_touches_a_selected_node() {
        let mut scene = SceneIndex::new();
        scene.insert(node("a", 1.0));
        scene.set_state("a", NodeState::Selected);

        scene.set_hover(Some("a"));
        assert_eq!(scene.get("a").unwrap().state, NodeState::Selected);
        scene.set_hover(None);
        assert_eq!(scene.get("a").unwrap().state, NodeState::Selected);
    }

    #[test]
    fn callout_reads_fresh_node_position() {
        let mut scene = SceneIndex::new();
        scene.insert(node("a", 40.0));
        assert!(scene.attach_callout("a"));
        let callout = scene.callout().expect("callout");
        assert_eq!(callout.connector_from, Vec2::new(40.0, 100.0));
        assert_eq!(callout.label, "site a");

        assert!(!scene.attach_callout("missing"));
        assert!(scene.callout().is_none());
    }

    #[test]
    fn clear_removes_nodes_and_callout() {
        let mut scene = SceneIndex::new();
        scene.insert(node("a", 1.0));
        scene.attach_callout("a");
        scene.clear();
        assert!(scene.is_empty());
        assert!(scene.callout().is_none());
    }
}
