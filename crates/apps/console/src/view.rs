use foundation::math::Vec2;
use formats::region_set::RegionCollection;
use layers::effects::{EffectCircle, EffectsEngine};
use layers::labels::{LabelStyle, PlacedLabel, place_labels};
use layers::markers::{PULSE_TIMER_GROUP, Poi, PoiLayer};
use layers::regions::{RegionLayer, RegionSnapshot};
use runtime::event_bus::{EventBus, Stamped};
use runtime::frame::Frame;
use runtime::metrics::Metrics;
use runtime::timers::TimerRegistry;
use scene::index::SceneIndex;
use scene::node::InteractionStyle;
use scene::picking::{PickOptions, pick_point};
use scene::selection::SelectionBridge;

use crate::config::{CLICK_RIPPLE_RADIUS_REM, PICK_SLOP_REM, PULSE_RADIUS_REM, ViewConfig};
use crate::events::InteractionEvent;
use crate::projection;

/// The site-monitoring map view.
///
/// Owns the whole retained scene between mount and drop: both projections,
/// the region backdrop snapshots, the marker index, selection, timers,
/// effects, events and metrics. The host feeds it POI lists, the external
/// selected id and pointer/resize/tick input, and drains interaction events.
///
/// Everything is synchronous and tick-driven; dropping the view releases
/// every timer and effect.
pub struct MapView {
    config: ViewConfig,
    regions: RegionCollection,

    mainland: foundation::math::Mercator,
    jeju: foundation::math::Mercator,
    region_layer: RegionLayer,
    mainland_regions: RegionSnapshot,
    jeju_regions: RegionSnapshot,

    poi_layer: PoiLayer,
    label_style: LabelStyle,
    interaction: InteractionStyle,
    scene: SceneIndex,
    selection: SelectionBridge,
    hovered: Option<String>,
    pois: Vec<Poi>,

    timers: TimerRegistry,
    effects: EffectsEngine,
    bus: EventBus<InteractionEvent>,
    metrics: Metrics,
    frame: Frame,
}

impl MapView {
    /// Mounts the view: builds both projections and draws the backdrop.
    ///
    /// A failed geodata load is the caller's to report; passing
    /// `RegionCollection::empty()` mounts a map with an empty backdrop and
    /// the inset at its viewport-relative fallback placement.
    pub fn new(config: ViewConfig, regions: RegionCollection) -> Self {
        let region_layer = RegionLayer::default();
        let mainland = projection::mainland(&config);
        let mainland_regions = region_layer.build(&regions.mainland, &mainland);
        let jeju = projection::jeju(&config, mainland_regions.bounds);
        let jeju_regions = region_layer.build(&regions.jeju, &jeju);

        Self {
            frame: Frame::new(0, config.frame_dt_s),
            config,
            regions,
            mainland,
            jeju,
            region_layer,
            mainland_regions,
            jeju_regions,
            poi_layer: PoiLayer::default(),
            label_style: LabelStyle::default(),
            interaction: InteractionStyle::default(),
            scene: SceneIndex::new(),
            selection: SelectionBridge::new(),
            hovered: None,
            pois: Vec::new(),
            timers: TimerRegistry::new(),
            effects: EffectsEngine::new(),
            bus: EventBus::new(),
            metrics: Metrics::new(),
        }
    }

    /// Replaces the POI list and rebuilds the marker layer.
    pub fn set_pois(&mut self, pois: Vec<Poi>) {
        self.pois = pois;
        self.render_markers();
    }

    /// Applies an externally owned selection change.
    ///
    /// The external store is authoritative, so no `SelectionChanged` event is
    /// emitted back for this path; only local clicks report.
    pub fn set_selected(&mut self, id: Option<&str>) {
        self.selection.apply(&mut self.scene, id);
        self.record_selection_gauge();
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.selected()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn pointer_move(&mut self, x_px: f64, y_px: f64) {
        let hit = self.pick(x_px, y_px);
        if hit == self.hovered {
            return;
        }
        self.scene.set_hover(hit.as_deref());
        self.bus.emit(
            self.frame,
            InteractionEvent::PoiHovered { id: hit.clone() },
        );
        self.hovered = hit;
    }

    pub fn pointer_click(&mut self, x_px: f64, y_px: f64) {
        let Some(id) = self.pick(x_px, y_px) else {
            return;
        };

        self.bus
            .emit(self.frame, InteractionEvent::PoiClicked { id: id.clone() });

        if self.selection.toggle(&mut self.scene, &id) {
            self.bus.emit(
                self.frame,
                InteractionEvent::SelectionChanged {
                    id: self.selection.selected().map(str::to_string),
                },
            );
        }
        self.record_selection_gauge();

        self.effects.spawn_click_ripple(
            Vec2::new(x_px, y_px),
            self.frame.time,
            CLICK_RIPPLE_RADIUS_REM * self.config.rem_px,
        );
    }

    /// Recomputes the mainland projection for the new viewport and redraws.
    ///
    /// Region features are not re-fetched and the Jeju inset keeps its last
    /// placement; markers re-project so selection lands on fresh
    /// coordinates.
    pub fn resize(&mut self, width_px: f64, height_px: f64) {
        self.config.width_px = width_px;
        self.config.height_px = height_px;
        self.mainland = projection::mainland(&self.config);
        self.mainland_regions = self
            .region_layer
            .build(&self.regions.mainland, &self.mainland);
        self.render_markers();
    }

    /// Advances one frame: fires due pulse timers into the effects engine
    /// and returns the circles visible this frame.
    pub fn tick(&mut self) -> Vec<EffectCircle> {
        self.frame = self.frame.next();
        let now = self.frame.time;

        for firing in self.timers.fire_due(now) {
            if firing.group != PULSE_TIMER_GROUP {
                continue;
            }
            let Some(node) = self.scene.get(&firing.tag) else {
                continue;
            };
            self.effects.spawn_pulse_wave(
                node.anchor_px,
                firing.at,
                PULSE_RADIUS_REM * self.config.rem_px,
            );
        }

        let circles = self.effects.frame(now);
        self.metrics
            .set_gauge("effects.active", circles.len() as i64);
        circles
    }

    pub fn drain_events(&mut self) -> Vec<Stamped<InteractionEvent>> {
        self.bus.drain()
    }

    pub fn labels(&self) -> Vec<PlacedLabel> {
        place_labels(&self.scene, &self.label_style, self.config.rem_px)
    }

    pub fn scene(&self) -> &SceneIndex {
        &self.scene
    }

    pub fn mainland_projection(&self) -> &foundation::math::Mercator {
        &self.mainland
    }

    pub fn jeju_projection(&self) -> &foundation::math::Mercator {
        &self.jeju
    }

    pub fn mainland_regions(&self) -> &RegionSnapshot {
        &self.mainland_regions
    }

    pub fn jeju_regions(&self) -> &RegionSnapshot {
        &self.jeju_regions
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn pulse_count(&self) -> usize {
        self.timers.group_count(PULSE_TIMER_GROUP)
    }

    fn render_markers(&mut self) {
        let stats = self.poi_layer.render(
            &mut self.scene,
            &self.selection,
            &mut self.timers,
            self.frame.time,
            &self.pois,
            &self.mainland,
            &self.jeju,
            self.config.rem_px,
        );

        // The rebuilt nodes start at rest; hover re-establishes on the next
        // pointer move.
        self.hovered = None;

        self.metrics
            .inc_counter("markers.rendered", stats.rendered as u64);
        self.metrics
            .inc_counter("markers.skipped", stats.skipped as u64);
        self.metrics
            .set_gauge("pulses.active", self.pulse_count() as i64);
        self.record_selection_gauge();
    }

    fn record_selection_gauge(&mut self) {
        let resolved = self.selection.is_resolved(&self.scene);
        self.metrics
            .set_gauge("selection.active", if resolved { 1 } else { 0 });
    }

    fn pick(&self, x_px: f64, y_px: f64) -> Option<String> {
        pick_point(
            &self.scene,
            Vec2::new(x_px, y_px),
            &self.interaction,
            PickOptions {
                slop_px: PICK_SLOP_REM * self.config.rem_px,
            },
        )
    }
}
