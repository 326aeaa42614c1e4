//! Timed buffs and their expiry scheduler.
//!
//! Effect flags live in [`ActiveEffects`] inside the player state so they are
//! persisted. Pending expiries live in [`EffectScheduler`], which the game
//! owns alongside the state. Each activation bumps a per-kind generation
//! number; an expiry carrying an older generation is dropped when it comes
//! due, so re-purchasing a buff can never be cut short by the previous timer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::config::EffectDurations;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    DoublePoints,
    GoldenClick,
    LuckBoost,
    TimeFreeze,
    GoldenMode,
}

impl EffectKind {
    pub fn all() -> &'static [EffectKind] {
        &[
            EffectKind::DoublePoints,
            EffectKind::GoldenClick,
            EffectKind::LuckBoost,
            EffectKind::TimeFreeze,
            EffectKind::GoldenMode,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::DoublePoints => "Double Points",
            EffectKind::GoldenClick => "Golden Click",
            EffectKind::LuckBoost => "Luck Boost",
            EffectKind::TimeFreeze => "Time Freeze",
            EffectKind::GoldenMode => "Golden Mode",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EffectKind::DoublePoints => "2x points for 30s",
            EffectKind::GoldenClick => "Next click is rare or better",
            EffectKind::LuckBoost => "2x odds for scoring rarities, 60s",
            EffectKind::TimeFreeze => "Pause auto clickers for 30s",
            EffectKind::GoldenMode => "Only rare or better for 30s",
        }
    }

    /// `None` for one-shot effects.
    pub fn duration_ms(&self, durations: &EffectDurations) -> Option<u64> {
        match self {
            EffectKind::DoublePoints => Some(durations.double_points_ms),
            EffectKind::GoldenClick => None,
            EffectKind::LuckBoost => Some(durations.luck_boost_ms),
            EffectKind::TimeFreeze => Some(durations.time_freeze_ms),
            EffectKind::GoldenMode => Some(durations.golden_mode_ms),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSlot {
    pub active: bool,
    /// Virtual-clock millisecond at which the buff ends.
    pub expires_at: Option<u64>,
}

/// Persisted flags for every effect kind.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveEffects {
    slots: BTreeMap<EffectKind, EffectSlot>,
}

impl ActiveEffects {
    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.slots.get(&kind).is_some_and(|s| s.active)
    }

    pub fn slot(&self, kind: EffectKind) -> Option<&EffectSlot> {
        self.slots.get(&kind)
    }

    /// Milliseconds left on a timed buff, if it is running.
    pub fn remaining_ms(&self, kind: EffectKind, now: u64) -> Option<u64> {
        let slot = self.slots.get(&kind)?;
        if !slot.active {
            return None;
        }
        slot.expires_at.map(|at| at.saturating_sub(now))
    }

    fn set(&mut self, kind: EffectKind, slot: EffectSlot) {
        self.slots.insert(kind, slot);
    }

    fn clear(&mut self, kind: EffectKind) {
        self.slots.remove(&kind);
    }

    pub fn clear_all(&mut self) {
        self.slots.clear();
    }

    pub fn active_kinds(&self) -> Vec<EffectKind> {
        self.slots
            .iter()
            .filter(|(_, s)| s.active)
            .map(|(k, _)| *k)
            .collect()
    }
}

/// A pending expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledExpiry {
    pub kind: EffectKind,
    pub fire_at: u64,
    generation: u64,
}

/// A state change the game reacts to (log line, auto-click suspension).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectTransition {
    Started { kind: EffectKind, expires_at: Option<u64> },
    /// Re-activation of an already running buff; the timer restarted.
    Refreshed { kind: EffectKind, expires_at: Option<u64> },
    Expired { kind: EffectKind, at: u64 },
    Consumed { kind: EffectKind },
}

#[derive(Clone, Debug, Default)]
pub struct EffectScheduler {
    queue: Vec<ScheduledExpiry>,
    generations: BTreeMap<EffectKind, u64>,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&mut self, kind: EffectKind) -> u64 {
        let g = self.generations.entry(kind).or_insert(0);
        *g += 1;
        *g
    }

    fn is_current(&self, expiry: &ScheduledExpiry) -> bool {
        self.generations.get(&expiry.kind).copied() == Some(expiry.generation)
    }

    /// Turn an effect on at `now`. Timed buffs get a fresh expiry; any
    /// earlier expiry for the same kind becomes stale.
    pub fn activate(
        &mut self,
        effects: &mut ActiveEffects,
        kind: EffectKind,
        now: u64,
        durations: &EffectDurations,
    ) -> EffectTransition {
        let was_active = effects.is_active(kind);
        let generation = self.bump(kind);
        self.queue.retain(|e| e.kind != kind);

        let expires_at = kind
            .duration_ms(durations)
            .map(|d| now.saturating_add(d));
        if let Some(fire_at) = expires_at {
            self.queue.push(ScheduledExpiry { kind, fire_at, generation });
        }
        effects.set(kind, EffectSlot { active: true, expires_at });

        if was_active {
            EffectTransition::Refreshed { kind, expires_at }
        } else {
            EffectTransition::Started { kind, expires_at }
        }
    }

    /// Earliest pending expiry, stale ones excluded.
    pub fn next_fire(&self) -> Option<u64> {
        self.queue
            .iter()
            .filter(|e| self.is_current(e))
            .map(|e| e.fire_at)
            .min()
    }

    /// Fire every expiry due at or before `now`, in time order.
    pub fn advance(&mut self, effects: &mut ActiveEffects, now: u64) -> Vec<EffectTransition> {
        let mut due: Vec<ScheduledExpiry> = Vec::new();
        self.queue.retain(|e| {
            if e.fire_at <= now {
                due.push(*e);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|e| (e.fire_at, e.kind));

        let mut fired = Vec::new();
        for expiry in due {
            if !self.is_current(&expiry) {
                continue;
            }
            effects.clear(expiry.kind);
            fired.push(EffectTransition::Expired {
                kind: expiry.kind,
                at: expiry.fire_at,
            });
        }
        fired
    }

    /// Spend a one-shot effect. Returns `None` if it was not active.
    pub fn consume(&mut self, effects: &mut ActiveEffects, kind: EffectKind) -> Option<EffectTransition> {
        if !effects.is_active(kind) {
            return None;
        }
        self.bump(kind);
        self.queue.retain(|e| e.kind != kind);
        effects.clear(kind);
        Some(EffectTransition::Consumed { kind })
    }

    /// Deactivate everything and drop every pending timer.
    pub fn cancel_all(&mut self, effects: &mut ActiveEffects) {
        for kind in EffectKind::all() {
            self.bump(*kind);
        }
        self.queue.clear();
        effects.clear_all();
    }

    /// Rebuild timers from persisted flags after a load.
    pub fn restore(&mut self, effects: &ActiveEffects) {
        self.queue.clear();
        for kind in effects.active_kinds() {
            let generation = self.bump(kind);
            if let Some(fire_at) = effects.slot(kind).and_then(|s| s.expires_at) {
                self.queue.push(ScheduledExpiry { kind, fire_at, generation });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn durations() -> EffectDurations {
        EffectDurations::default()
    }

    #[test]
    fn activate_sets_flag_and_expiry() {
        let mut fx = ActiveEffects::default();
        let mut sched = EffectScheduler::new();
        let t = sched.activate(&mut fx, EffectKind::DoublePoints, 1_000, &durations());
        assert_eq!(
            t,
            EffectTransition::Started { kind: EffectKind::DoublePoints, expires_at: Some(31_000) }
        );
        assert!(fx.is_active(EffectKind::DoublePoints));
        assert_eq!(sched.next_fire(), Some(31_000));
        assert_eq!(fx.remaining_ms(EffectKind::DoublePoints, 21_000), Some(10_000));
    }

    #[test]
    fn expires_exactly_at_fire_time() {
        let mut fx = ActiveEffects::default();
        let mut sched = EffectScheduler::new();
        sched.activate(&mut fx, EffectKind::LuckBoost, 0, &durations());
        assert!(sched.advance(&mut fx, 59_999).is_empty());
        assert!(fx.is_active(EffectKind::LuckBoost));
        let fired = sched.advance(&mut fx, 60_000);
        assert_eq!(fired, vec![EffectTransition::Expired { kind: EffectKind::LuckBoost, at: 60_000 }]);
        assert!(!fx.is_active(EffectKind::LuckBoost));
        assert_eq!(sched.next_fire(), None);
    }

    #[test]
    fn refresh_restarts_duration_and_old_timer_is_stale() {
        let mut fx = ActiveEffects::default();
        let mut sched = EffectScheduler::new();
        sched.activate(&mut fx, EffectKind::DoublePoints, 0, &durations());
        let t = sched.activate(&mut fx, EffectKind::DoublePoints, 20_000, &durations());
        assert!(matches!(t, EffectTransition::Refreshed { expires_at: Some(50_000), .. }));

        // The first purchase would have expired at 30s.
        assert!(sched.advance(&mut fx, 30_000).is_empty());
        assert!(fx.is_active(EffectKind::DoublePoints));
        assert_eq!(sched.advance(&mut fx, 50_000).len(), 1);
        assert!(!fx.is_active(EffectKind::DoublePoints));
    }

    #[test]
    fn golden_click_has_no_timer() {
        let mut fx = ActiveEffects::default();
        let mut sched = EffectScheduler::new();
        sched.activate(&mut fx, EffectKind::GoldenClick, 0, &durations());
        assert_eq!(sched.next_fire(), None);
        assert!(sched.advance(&mut fx, u64::MAX).is_empty());
        assert!(fx.is_active(EffectKind::GoldenClick));

        assert_eq!(
            sched.consume(&mut fx, EffectKind::GoldenClick),
            Some(EffectTransition::Consumed { kind: EffectKind::GoldenClick })
        );
        assert!(!fx.is_active(EffectKind::GoldenClick));
        assert_eq!(sched.consume(&mut fx, EffectKind::GoldenClick), None);
    }

    #[test]
    fn advance_orders_by_fire_time() {
        let mut fx = ActiveEffects::default();
        let mut sched = EffectScheduler::new();
        sched.activate(&mut fx, EffectKind::LuckBoost, 0, &durations());
        sched.activate(&mut fx, EffectKind::TimeFreeze, 0, &durations());
        let fired = sched.advance(&mut fx, 100_000);
        let kinds: Vec<_> = fired
            .iter()
            .map(|t| match t {
                EffectTransition::Expired { kind, .. } => *kind,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(kinds, vec![EffectKind::TimeFreeze, EffectKind::LuckBoost]);
    }

    #[test]
    fn cancel_all_drops_everything() {
        let mut fx = ActiveEffects::default();
        let mut sched = EffectScheduler::new();
        sched.activate(&mut fx, EffectKind::GoldenMode, 0, &durations());
        sched.activate(&mut fx, EffectKind::GoldenClick, 0, &durations());
        sched.cancel_all(&mut fx);
        assert!(fx.active_kinds().is_empty());
        assert_eq!(sched.next_fire(), None);
        assert!(sched.advance(&mut fx, 1_000_000).is_empty());
    }

    #[test]
    fn restore_rebuilds_pending_expiries() {
        let mut fx = ActiveEffects::default();
        let mut sched = EffectScheduler::new();
        sched.activate(&mut fx, EffectKind::TimeFreeze, 5_000, &durations());

        let mut fresh = EffectScheduler::new();
        let mut loaded = fx.clone();
        fresh.restore(&loaded);
        assert_eq!(fresh.next_fire(), Some(35_000));
        assert_eq!(fresh.advance(&mut loaded, 35_000).len(), 1);
        assert!(!loaded.is_active(EffectKind::TimeFreeze));
    }
}
