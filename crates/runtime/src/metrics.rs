use std::collections::BTreeMap;

/// Deterministic metrics aggregation.
///
/// Metrics must not depend on wall-clock time or unordered iteration, so the
/// maps are sorted and snapshots have stable ordering. This is the view's
/// whole observability surface: render passes count what they drew and
/// skipped, the tick loop gauges what is live.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Metrics {
    counters: BTreeMap<String, u64>,
    gauges: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub counters: Vec<(String, u64)>,
    pub gauges: Vec<(String, i64)>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.counters.clear();
        self.gauges.clear();
    }

    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    pub fn inc_counter(&mut self, name: impl Into<String>, by: u64) {
        *self.counters.entry(name.into()).or_insert(0) += by;
    }

    pub fn gauge(&self, name: &str) -> Option<i64> {
        self.gauges.get(name).copied()
    }

    pub fn set_gauge(&mut self, name: impl Into<String>, value: i64) {
        self.gauges.insert(name.into(), value);
    }

    /// Returns a stable, sorted snapshot suitable for logs/debug UI.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            counters: self.counters.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            gauges: self.gauges.iter().map(|(k, v)| (k.clone(), *v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Metrics;

    #[test]
    fn counters_accumulate() {
        let mut m = Metrics::new();
        m.inc_counter("markers.rendered", 3);
        m.inc_counter("markers.rendered", 2);
        assert_eq!(m.counter("markers.rendered"), 5);
        assert_eq!(m.counter("markers.skipped"), 0);
    }

    #[test]
    fn gauges_overwrite() {
        let mut m = Metrics::new();
        assert_eq!(m.gauge("pulses.active"), None);
        m.set_gauge("pulses.active", 2);
        m.set_gauge("pulses.active", 1);
        assert_eq!(m.gauge("pulses.active"), Some(1));
    }

    #[test]
    fn snapshot_is_stably_sorted() {
        let mut m = Metrics::new();
        m.inc_counter("markers.skipped", 1);
        m.inc_counter("markers.rendered", 4);
        m.set_gauge("selection.active", 1);

        let snap = m.snapshot();
        assert_eq!(
            snap.counters,
            vec![
                ("markers.rendered".to_string(), 4),
                ("markers.skipped".to_string(), 1),
            ]
        );
        assert_eq!(snap.gauges, vec![("selection.active".to_string(), 1)]);
    }
}
