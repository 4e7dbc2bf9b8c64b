use foundation::math::Mercator;
use foundation::time::Time;
use runtime::timers::TimerRegistry;
use scene::index::SceneIndex;
use scene::node::{MarkerNode, NodeState, Visual};
use scene::selection::SelectionBridge;

use crate::symbology::MarkerStyle;

/// Attention status carried on a POI by the host application.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PoiStatus {
    #[default]
    Normal,
    Warning,
    Danger,
}

impl PoiStatus {
    pub fn needs_pulse(self) -> bool {
        matches!(self, PoiStatus::Warning | PoiStatus::Danger)
    }
}

/// A point of interest as supplied by the host, in list order.
#[derive(Debug, Clone, PartialEq)]
pub struct Poi {
    pub id: String,
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub label: Option<String>,
    pub icon: Option<String>,
    pub color: Option<[f32; 4]>,
    /// Footprint multiplier against the reference marker height.
    pub size: f64,
    pub status: PoiStatus,
    /// Authoritative region id when the host knows it.
    pub region_code: Option<String>,
}

impl Poi {
    pub fn new(id: impl Into<String>, lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            id: id.into(),
            lon_deg,
            lat_deg,
            label: None,
            icon: None,
            color: None,
            size: 1.0,
            status: PoiStatus::Normal,
            region_code: None,
        }
    }
}

/// Geographic box that routes a POI to the Jeju inset projection.
pub const JEJU_LAT_MAX_DEG: f64 = 34.0;
pub const JEJU_LON_MIN_DEG: f64 = 125.5;
pub const JEJU_LON_MAX_DEG: f64 = 127.5;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    Mainland,
    Jeju,
}

/// Chooses the projection for a POI.
///
/// The host's region id is authoritative when present; the bounding-box
/// heuristic is only the fallback for POIs that don't carry one.
pub fn route(poi: &Poi) -> RouteTarget {
    if let Some(code) = &poi.region_code {
        return if code == formats::region_set::JEJU_REGION_CODE {
            RouteTarget::Jeju
        } else {
            RouteTarget::Mainland
        };
    }

    if poi.lat_deg < JEJU_LAT_MAX_DEG
        && (JEJU_LON_MIN_DEG..=JEJU_LON_MAX_DEG).contains(&poi.lon_deg)
    {
        RouteTarget::Jeju
    } else {
        RouteTarget::Mainland
    }
}

pub const PULSE_TIMER_GROUP: &str = "poi.pulse";
pub const PULSE_PERIOD_S: f64 = 2.0;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub rendered: usize,
    pub skipped: usize,
    pub pulses: usize,
}

/// The POI marker layer.
///
/// `render` rebuilds the whole layer from the supplied list: no node, label,
/// or pulse timer from a previous generation survives into the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoiLayer {
    pub style: MarkerStyle,
}

impl PoiLayer {
    pub fn new(style: MarkerStyle) -> Self {
        Self { style }
    }

    pub fn render(
        &self,
        scene: &mut SceneIndex,
        selection: &SelectionBridge,
        timers: &mut TimerRegistry,
        now: Time,
        pois: &[Poi],
        mainland: &Mercator,
        jeju: &Mercator,
        rem_px: f64,
    ) -> RenderStats {
        // Stale pulse handles must never outlive this render generation.
        timers.cancel_group(PULSE_TIMER_GROUP);
        scene.clear();

        let mut stats = RenderStats::default();
        for poi in pois {
            let projection = match route(poi) {
                RouteTarget::Mainland => mainland,
                RouteTarget::Jeju => jeju,
            };
            let Some(anchor) = projection.project(poi.lon_deg, poi.lat_deg) else {
                stats.skipped += 1;
                continue;
            };

            scene.insert(MarkerNode {
                id: poi.id.clone(),
                anchor_px: anchor,
                size_px: self.style.screen_size(poi.size, rem_px),
                base: Visual {
                    scale: 1.0,
                    color: poi.color.unwrap_or(self.style.default_color),
                },
                state: NodeState::Rest,
                label: poi.label.clone(),
                icon: poi.icon.clone(),
            });
            stats.rendered += 1;

            if poi.status.needs_pulse() {
                timers.schedule_repeating(PULSE_TIMER_GROUP, poi.id.clone(), PULSE_PERIOD_S, now);
                stats.pulses += 1;
            }
        }

        // Selection survives the rebuild by id, against fresh coordinates.
        selection.reapply(scene);
        stats
    }
}
