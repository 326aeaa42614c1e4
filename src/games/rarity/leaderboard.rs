//! Player identity, throttled stats snapshots and the ranked leaderboard view.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::SyncConfig;
use super::error::GameError;
use super::state::PlayerState;

const ADJECTIVES: &[&str] = &[
    "Swift", "Lucky", "Rare", "Epic", "Cosmic", "Stellar", "Mighty", "Mystic", "Golden", "Crystal",
    "Shadow", "Blazing", "Frost", "Thunder", "Neon",
];

const NOUNS: &[&str] = &[
    "Hunter", "Seeker", "Finder", "Explorer", "Legend", "Master", "Champion", "Voyager", "Dreamer",
    "Wizard", "Phoenix", "Dragon", "Knight", "Rogue", "Sage",
];

pub const MAX_USERNAME_LEN: usize = 20;
pub const MAX_ENTRIES: usize = 100;

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".into();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// `u_` + random base-36 + creation time in base-36.
pub fn generate_user_id<R: Rng + ?Sized>(rng: &mut R, now_ms: u64) -> String {
    let random: u64 = rng.random_range(36u64.pow(8)..36u64.pow(9));
    format!("u_{}{}", to_base36(random), to_base36(now_ms))
}

/// Adjective + noun + number, e.g. `CosmicDragon417`.
pub fn generate_username<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adj = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let num: u32 = rng.random_range(0..1000);
    format!("{adj}{noun}{num}")
}

/// Give the player an id and name if the save had none.
pub fn ensure_identity<R: Rng + ?Sized>(state: &mut PlayerState, rng: &mut R, now_ms: u64) -> bool {
    let mut changed = false;
    if state.user_id.is_empty() {
        state.user_id = generate_user_id(rng, now_ms);
        changed = true;
    }
    if state.username.is_empty() {
        state.username = generate_username(rng);
        changed = true;
    }
    changed
}

/// Trim and truncate a new display name. Blank names are rejected.
pub fn rename(state: &mut PlayerState, name: &str) -> Result<String, GameError> {
    let trimmed: String = name.trim().chars().take(MAX_USERNAME_LEN).collect();
    let trimmed = trimmed.trim_end().to_string();
    if trimmed.is_empty() {
        return Err(GameError::InvalidTarget("empty username".into()));
    }
    state.username = trimmed.clone();
    Ok(trimmed)
}

/// What the leaderboard backend receives.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub user_id: String,
    pub username: String,
    pub total_clicks: u64,
    pub points: u64,
    pub stage: u32,
    pub rarities_found: usize,
    pub completion_percent: f64,
}

/// Emit a snapshot every N clicks or every interval, whichever comes first.
#[derive(Clone, Debug, Default)]
pub struct SyncThrottle {
    clicks_since: u64,
    last_sync_ms: Option<u64>,
}

impl SyncThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note_clicks(&mut self, n: u64) {
        self.clicks_since = self.clicks_since.saturating_add(n);
    }

    /// True if a sync is due at `now`. A due check resets both counters.
    pub fn poll(&mut self, now: u64, config: &SyncConfig) -> bool {
        let last = *self.last_sync_ms.get_or_insert(now);
        let due = self.clicks_since >= config.every_clicks
            || now.saturating_sub(last) >= config.interval_ms;
        if due {
            self.clicks_since = 0;
            self.last_sync_ms = Some(now);
        }
        due
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    pub percent: f64,
    pub timestamp: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    Online,
    #[default]
    Offline,
}

/// Cached ranked list for display.
#[derive(Clone, Debug, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub status: ConnectionStatus,
}

/// Completion descending, earlier timestamp first on ties, top 100.
pub fn rank(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| {
        b.percent
            .total_cmp(&a.percent)
            .then(a.timestamp.cmp(&b.timestamp))
    });
    entries.truncate(MAX_ENTRIES);
    entries
}

impl Leaderboard {
    /// Take a fetch result. Failures keep the cached list and go offline.
    pub fn apply_fetch(&mut self, result: Result<Vec<LeaderboardEntry>, GameError>) {
        match result {
            Ok(entries) => {
                self.entries = rank(entries);
                self.status = ConnectionStatus::Online;
                debug!(entries = self.entries.len(), "leaderboard updated");
            }
            Err(e) => {
                warn!(error = %e, "leaderboard fetch failed");
                self.status = ConnectionStatus::Offline;
            }
        }
    }

    pub fn position_of(&self, user_id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == user_id).map(|i| i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn entry(id: &str, percent: f64, timestamp: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            id: id.into(),
            name: id.into(),
            percent,
            timestamp,
        }
    }

    #[test]
    fn base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn identity_shapes() {
        let mut rng = SmallRng::seed_from_u64(5);
        let id = generate_user_id(&mut rng, 1_700_000_000_000);
        assert!(id.starts_with("u_"));
        assert!(id.len() > 11);
        let name = generate_username(&mut rng);
        assert!(ADJECTIVES.iter().any(|a| name.starts_with(a)));
        assert!(name.chars().last().is_some_and(|c| c.is_ascii_digit()));
    }

    #[test]
    fn ensure_identity_keeps_existing() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut s = PlayerState::new();
        assert!(ensure_identity(&mut s, &mut rng, 0));
        let id = s.user_id.clone();
        assert!(!ensure_identity(&mut s, &mut rng, 0));
        assert_eq!(s.user_id, id);
    }

    #[test]
    fn rename_trims_and_truncates() {
        let mut s = PlayerState::new();
        assert_eq!(rename(&mut s, "  Bob  ").as_deref(), Ok("Bob"));
        let long = "abcdefghijklmnopqrstuvwxyz";
        assert_eq!(rename(&mut s, long).unwrap().chars().count(), 20);
        assert!(rename(&mut s, "   ").is_err());
        assert_eq!(s.username, "abcdefghijklmnopqrst");
    }

    #[test]
    fn throttle_by_clicks_and_time() {
        let cfg = SyncConfig::default();
        let mut t = SyncThrottle::new();
        assert!(!t.poll(0, &cfg));
        t.note_clicks(49);
        assert!(!t.poll(1_000, &cfg));
        t.note_clicks(1);
        assert!(t.poll(1_000, &cfg));
        assert!(!t.poll(30_999, &cfg));
        assert!(t.poll(31_000, &cfg));
    }

    #[test]
    fn ranking_order_and_cap() {
        let mut entries = vec![entry("a", 50.0, 10), entry("b", 80.0, 5), entry("c", 50.0, 2)];
        for i in 0..200 {
            entries.push(entry(&format!("x{i}"), 1.0, i));
        }
        let ranked = rank(entries);
        assert_eq!(ranked.len(), 100);
        let top: Vec<_> = ranked.iter().take(3).map(|e| e.id.as_str()).collect();
        assert_eq!(top, vec!["b", "c", "a"]);
    }

    #[test]
    fn failed_fetch_keeps_cache() {
        let mut lb = Leaderboard::default();
        lb.apply_fetch(Ok(vec![entry("a", 10.0, 1)]));
        assert_eq!(lb.status, ConnectionStatus::Online);
        lb.apply_fetch(Err(GameError::NetworkUnavailable("timeout".into())));
        assert_eq!(lb.status, ConnectionStatus::Offline);
        assert_eq!(lb.entries.len(), 1);
        assert_eq!(lb.position_of("a"), Some(1));
    }
}
