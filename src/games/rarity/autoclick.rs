//! Auto-click driver: a cancellable recurring timer on the virtual clock.

use super::config::AutoClickConfig;

/// Milliseconds between auto-click ticks for `count` clickers:
/// `max(min, floor(base / (1 + 0.1 * count)))`, done in integers.
pub fn tick_period_ms(count: u32, config: &AutoClickConfig) -> u64 {
    let period = config.base_period_ms.saturating_mul(10) / (10 + u64::from(count));
    period.max(config.min_period_ms).max(1)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Ticker {
    period_ms: u64,
    next_fire_at: u64,
}

#[derive(Clone, Debug, Default)]
pub struct AutoClickDriver {
    ticker: Option<Ticker>,
    count: u32,
}

impl AutoClickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clickers the running ticker was scheduled for.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn period_ms(&self) -> Option<u64> {
        self.ticker.map(|t| t.period_ms)
    }

    fn start(&mut self, count: u32, now: u64, config: &AutoClickConfig) {
        let period_ms = tick_period_ms(count, config);
        self.count = count;
        self.ticker = Some(Ticker {
            period_ms,
            next_fire_at: now.saturating_add(period_ms),
        });
    }

    pub fn stop(&mut self) {
        self.ticker = None;
    }

    /// Bring the ticker in line with the current clicker count and freeze
    /// state. A changed count restarts the ticker from `now`; an unchanged
    /// running ticker keeps its phase.
    pub fn sync(&mut self, count: u32, frozen: bool, now: u64, config: &AutoClickConfig) {
        if count == 0 || frozen {
            self.stop();
            self.count = count;
            return;
        }
        if self.ticker.is_some() && self.count == count {
            return;
        }
        self.stop();
        self.start(count, now, config);
    }

    pub fn next_fire(&self) -> Option<u64> {
        self.ticker.map(|t| t.next_fire_at)
    }

    /// Consume the pending tick and schedule the following one.
    /// Returns the time the consumed tick was due.
    pub fn fire(&mut self) -> Option<u64> {
        let ticker = self.ticker.as_mut()?;
        let at = ticker.next_fire_at;
        ticker.next_fire_at = at.saturating_add(ticker.period_ms);
        Some(at)
    }

    /// Drop every tick due at or before `now` without running them.
    pub fn skip_to(&mut self, now: u64) {
        if let Some(ticker) = self.ticker.as_mut() {
            if ticker.next_fire_at <= now {
                let behind = now - ticker.next_fire_at;
                let missed = behind / ticker.period_ms + 1;
                ticker.next_fire_at = ticker
                    .next_fire_at
                    .saturating_add(missed.saturating_mul(ticker.period_ms));
            }
        }
    }
}
