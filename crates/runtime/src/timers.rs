use foundation::time::Time;

/// Stable identity of a scheduled timer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, PartialEq)]
struct Timer {
    handle: TimerHandle,
    group: &'static str,
    tag: String,
    deadline: Time,
    period_s: Option<f64>,
}

/// A timer that came due, in deterministic firing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Firing {
    pub handle: TimerHandle,
    pub group: &'static str,
    pub tag: String,
    pub at: Time,
}

/// Deterministic one-shot and repeating timers.
///
/// This replaces ad-hoc interval handles with an owned registry so lifecycle
/// is unambiguous: timers belong to a named group and the whole group can be
/// cancelled before a layer rebuild or on teardown. Dropping the registry
/// drops every handle.
///
/// Ordering contract:
/// - `fire_due` yields firings ordered by `(deadline, handle)`.
/// - A repeating timer fires once per elapsed period, then re-arms.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    next_handle: u64,
    timers: Vec<Timer>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a single firing `delay_s` after `now`.
    pub fn schedule_once(
        &mut self,
        group: &'static str,
        tag: impl Into<String>,
        delay_s: f64,
        now: Time,
    ) -> TimerHandle {
        self.push(group, tag.into(), now.offset(delay_s.max(0.0)), None)
    }

    /// Schedules a repeating timer whose first firing is at `now`.
    pub fn schedule_repeating(
        &mut self,
        group: &'static str,
        tag: impl Into<String>,
        period_s: f64,
        now: Time,
    ) -> TimerHandle {
        // A non-positive period still advances, one firing per fire_due call.
        let period_s = period_s.max(f64::EPSILON);
        self.push(group, tag.into(), now, Some(period_s))
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Cancels every timer in `group`; returns how many were removed.
    pub fn cancel_group(&mut self, group: &'static str) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.group != group);
        before - self.timers.len()
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    pub fn group_count(&self, group: &'static str) -> usize {
        self.timers.iter().filter(|t| t.group == group).count()
    }

    /// Fires every timer due at or before `now`.
    ///
    /// One-shot timers are removed; repeating timers re-arm and fire once per
    /// elapsed period, so a slow consumer observes every firing it missed.
    pub fn fire_due(&mut self, now: Time) -> Vec<Firing> {
        let mut firings = Vec::new();

        for timer in &mut self.timers {
            while timer.deadline.0 <= now.0 {
                firings.push(Firing {
                    handle: timer.handle,
                    group: timer.group,
                    tag: timer.tag.clone(),
                    at: timer.deadline,
                });
                match timer.period_s {
                    Some(period) => timer.deadline = timer.deadline.offset(period),
                    None => break,
                }
            }
        }

        self.timers
            .retain(|t| t.period_s.is_some() || t.deadline.0 > now.0);

        firings.sort_by(|a, b| {
            foundation::math::stable_total_cmp_f64(a.at.0, b.at.0)
                .then_with(|| a.handle.cmp(&b.handle))
        });
        firings
    }

    fn push(
        &mut self,
        group: &'static str,
        tag: String,
        deadline: Time,
        period_s: Option<f64>,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.timers.push(Timer {
            handle,
            group,
            tag,
            deadline,
            period_s,
        });
        handle
    }
}
