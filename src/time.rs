//! Frame clock feeding elapsed milliseconds to the game.
//!
//! `draw_web()` calls at ~60fps with variable delta. FrameClock turns
//! successive `performance.now()` readings into whole-millisecond deltas,
//! carrying the fractional remainder so no time is lost between frames.

/// Longest delta handed to the game in one frame. A backgrounded tab
/// resumes with at most this much catch-up.
const MAX_FRAME_MS: f64 = 500.0;

pub struct FrameClock {
    /// Fractional milliseconds not yet handed out.
    remainder: f64,
    /// Total milliseconds handed out since creation.
    pub total_ms: u64,
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            remainder: 0.0,
            total_ms: 0,
            last_timestamp: None,
        }
    }

    /// Feed a monotonic timestamp and get the milliseconds to pass to
    /// `Game::tick` this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.remainder += delta;
        let whole = self.remainder.floor();
        self.remainder -= whole;
        let ms = whole as u32;
        self.total_ms += u64::from(ms);
        ms
    }

    /// Forget the last timestamp, e.g. when switching from the menu to a game.
    pub fn reset(&mut self) {
        self.last_timestamp = None;
        self.remainder = 0.0;
    }
}
