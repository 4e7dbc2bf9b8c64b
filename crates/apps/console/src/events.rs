/// Interaction events the host drains each frame.
///
/// These replace direct callbacks: the host owns the selection store and
/// navigation, the view only reports what happened and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionEvent {
    PoiClicked { id: String },
    PoiHovered { id: Option<String> },
    SelectionChanged { id: Option<String> },
}
