use foundation::math::Vec2;
use foundation::time::{Time, TimeSpan};

/// Click ripple: two expanding stroked circles over a short window.
pub const CLICK_RIPPLE_DURATION_S: f64 = 0.4;
pub const CLICK_RIPPLE_DELAYS_S: [f64; 2] = [0.0, 0.15];

/// Pulse wave: two staggered filled circles over a longer window; waves are
/// respawned by the repeating pulse timer.
pub const PULSE_WAVE_DURATION_S: f64 = 2.0;
pub const PULSE_WAVE_DELAYS_S: [f64; 2] = [0.0, 1.0];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EffectKind {
    ClickRipple,
    PulseWave,
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveEffect {
    kind: EffectKind,
    center: Vec2,
    started: Time,
    max_radius_px: f64,
}

impl ActiveEffect {
    fn end(&self) -> Time {
        let delays = delays(self.kind);
        self.started.offset(delays[1] + duration(self.kind))
    }
}

/// One circle of an effect at one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectCircle {
    pub kind: EffectKind,
    pub center: Vec2,
    pub radius_px: f64,
    pub opacity: f32,
    pub filled: bool,
}

/// Time-bounded, self-removing visual effects.
///
/// Every effect is a pure function of `(spawn time, now)`: `frame` computes
/// the circles for the current instant and retires effects whose window has
/// closed. Nothing here holds timer handles; repetition is the caller's
/// pulse timer respawning waves.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EffectsEngine {
    effects: Vec<ActiveEffect>,
}

impl EffectsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.effects.len()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn spawn_click_ripple(&mut self, center: Vec2, now: Time, max_radius_px: f64) {
        self.effects.push(ActiveEffect {
            kind: EffectKind::ClickRipple,
            center,
            started: now,
            max_radius_px,
        });
    }

    pub fn spawn_pulse_wave(&mut self, center: Vec2, now: Time, max_radius_px: f64) {
        self.effects.push(ActiveEffect {
            kind: EffectKind::PulseWave,
            center,
            started: now,
            max_radius_px,
        });
    }

    /// Circles visible at `now`, in spawn order; expired effects are
    /// removed.
    pub fn frame(&mut self, now: Time) -> Vec<EffectCircle> {
        self.effects.retain(|e| now.0 <= e.end().0);

        let mut circles = Vec::new();
        for effect in &self.effects {
            for delay in delays(effect.kind) {
                let span =
                    TimeSpan::starting_at(effect.started.offset(delay), duration(effect.kind));
                if !span.contains(now) {
                    continue;
                }
                let progress = span.progress(now);
                circles.push(EffectCircle {
                    kind: effect.kind,
                    center: effect.center,
                    radius_px: effect.max_radius_px * progress,
                    opacity: (1.0 - progress) as f32,
                    filled: effect.kind == EffectKind::PulseWave,
                });
            }
        }
        circles
    }
}

fn duration(kind: EffectKind) -> f64 {
    match kind {
        EffectKind::ClickRipple => CLICK_RIPPLE_DURATION_S,
        EffectKind::PulseWave => PULSE_WAVE_DURATION_S,
    }
}

fn delays(kind: EffectKind) -> [f64; 2] {
    match kind {
        EffectKind::ClickRipple => CLICK_RIPPLE_DELAYS_S,
        EffectKind::PulseWave => PULSE_WAVE_DELAYS_S,
    }
}
