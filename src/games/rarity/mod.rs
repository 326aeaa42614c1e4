//! Beyond Rare: click to draw a weighted rarity, spend the points in a shop,
//! and work through stages (or upstage runs in the classic version).
//!
//! `RarityGame` owns the player state together with the effect scheduler and
//! the auto-click driver. All time is a virtual millisecond clock seeded from
//! the wall clock and advanced by `Game::tick`, so every timer is replayable
//! in tests.

pub mod achievements;
pub mod actions;
pub mod autoclick;
pub mod config;
pub mod draw;
pub mod effects;
pub mod error;
pub mod leaderboard;
pub mod progression;
pub mod render;
pub mod save;
pub mod shop;
pub mod state;
pub mod table;
pub mod tasks;

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, NaiveDate, Utc};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;
use tracing::{debug, info};

use crate::games::Game;
use crate::input::{ClickState, InputEvent};

use actions::*;
use autoclick::AutoClickDriver;
use config::{GameConfig, GameVersion};
use draw::{DrawOutcome, Modifiers};
use effects::{EffectKind, EffectScheduler, EffectTransition};
use error::GameError;
use leaderboard::{Leaderboard, StatsSnapshot, SyncThrottle};
use progression::StageRecord;
use shop::{Receipt, ShopItem};
use state::{completion_percent, format_number, PlayerState, DEFAULT_COSMETIC};
use table::table_for;
use tasks::TaskEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Shop,
    Cosmetics,
    Tasks,
    Achievements,
    Stats,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Shop, Tab::Cosmetics, Tab::Tasks, Tab::Achievements, Tab::Stats]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Shop => "Shop",
            Tab::Cosmetics => "Style",
            Tab::Tasks => "Daily",
            Tab::Achievements => "Trophies",
            Tab::Stats => "Stats",
        }
    }

    pub fn action_id(&self) -> u16 {
        match self {
            Tab::Shop => TAB_SHOP,
            Tab::Cosmetics => TAB_COSMETICS,
            Tab::Tasks => TAB_TASKS,
            Tab::Achievements => TAB_ACHIEVEMENTS,
            Tab::Stats => TAB_STATS,
        }
    }

    fn key(&self) -> char {
        match self {
            Tab::Shop => 'q',
            Tab::Cosmetics => 'w',
            Tab::Tasks => 'e',
            Tab::Achievements => 'r',
            Tab::Stats => 't',
        }
    }
}

/// The last manual draw, shown under the click button.
#[derive(Clone, Debug, PartialEq)]
pub struct LastDraw {
    pub name: &'static str,
    pub points: u64,
    pub is_new: bool,
}

const KEY_ENTER: char = '\n';
const KEY_ESC: char = '\u{1b}';
const KEY_BACKSPACE: char = '\u{8}';

/// Calendar day at `now_ms` for a local offset east of UTC.
pub fn local_day(now_ms: u64, utc_offset_minutes: i32) -> NaiveDate {
    let shifted = i64::try_from(now_ms)
        .unwrap_or(i64::MAX)
        .saturating_add(i64::from(utc_offset_minutes) * 60_000);
    DateTime::from_timestamp_millis(shifted)
        .map(|d| d.date_naive())
        .unwrap_or(NaiveDate::MIN)
}

pub struct RarityGame {
    pub config: GameConfig,
    pub state: PlayerState,
    scheduler: EffectScheduler,
    driver: AutoClickDriver,
    pub leaderboard: Leaderboard,
    sync: SyncThrottle,
    /// Most recent snapshot handed to the leaderboard sink.
    pub last_snapshot: Option<StatsSnapshot>,
    rng: SmallRng,
    now_ms: u64,
    utc_offset_minutes: i32,
    dirty: bool,
    #[cfg(target_arch = "wasm32")]
    save_warned: bool,

    pub tab: Tab,
    pub scroll: u16,
    pub confirm_reset: bool,
    /// Text being typed for a new username, if the rename prompt is open.
    pub name_input: Option<String>,
    pub last_draw: Option<LastDraw>,
}

impl RarityGame {
    /// Start a session from a loaded (or fresh) state. Persisted effect
    /// expiries are rescheduled and anything already overdue fires on the
    /// first tick.
    pub fn new(
        config: GameConfig,
        state: PlayerState,
        seed: u64,
        now_ms: u64,
        utc_offset_minutes: i32,
    ) -> Self {
        let mut game = Self {
            config,
            state,
            scheduler: EffectScheduler::new(),
            driver: AutoClickDriver::new(),
            leaderboard: Leaderboard::default(),
            sync: SyncThrottle::new(),
            last_snapshot: None,
            rng: SmallRng::seed_from_u64(seed),
            now_ms,
            utc_offset_minutes,
            dirty: false,
            #[cfg(target_arch = "wasm32")]
            save_warned: false,
            tab: Tab::Shop,
            scroll: 0,
            confirm_reset: false,
            name_input: None,
            last_draw: None,
        };
        game.scheduler.restore(&game.state.effects);
        game.leaderboard.apply_fetch(Err(GameError::NetworkUnavailable(
            "no leaderboard endpoint configured".into(),
        )));
        if leaderboard::ensure_identity(&mut game.state, &mut game.rng, now_ms) {
            info!(user_id = %game.state.user_id, username = %game.state.username, "new player identity");
            game.dirty = true;
        }
        game.ensure_daily();
        game.sync_driver();
        game.after_mutation();
        let welcome = format!("Welcome to {}, {}!", game.config.version.name(), game.state.username);
        game.state.add_log(&welcome, false);
        game
    }

    /// Load the saved game for `version`, or start fresh.
    #[cfg(target_arch = "wasm32")]
    pub fn load(version: GameVersion, seed: u64, now_ms: u64, utc_offset_minutes: i32) -> Self {
        let state = save::load_game(version).unwrap_or_default();
        Self::new(save::load_config(version), state, seed, now_ms, utc_offset_minutes)
    }

    // ── Getters ─────────────────────────────────────────────────

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn today(&self) -> NaiveDate {
        local_day(self.now_ms, self.utc_offset_minutes)
    }

    pub fn points_display(&self) -> String {
        format_number(self.state.points)
    }

    /// Formatted price, or `"MAX"` once the auto-clicker cap is reached.
    pub fn price_display(&self, item: &ShopItem) -> String {
        if *item == ShopItem::AutoClicker
            && self.state.auto_clicker_count >= self.config.economy.max_auto_clickers
        {
            return "MAX".into();
        }
        shop::price(item, &self.state, &self.config)
            .map(format_number)
            .unwrap_or_else(|| "-".into())
    }

    pub fn completion(&self) -> f64 {
        completion_percent(&self.state, &self.config)
    }

    pub fn can_advance(&self) -> bool {
        progression::can_advance_stage(&self.state, &self.config)
    }

    /// One line per active effect, e.g. `"Double Points 12s"`.
    pub fn effect_status(&self) -> Vec<String> {
        self.state
            .effects
            .active_kinds()
            .into_iter()
            .map(|kind| match self.state.effects.remaining_ms(kind, self.now_ms) {
                Some(ms) => format!("{} {}s", kind.name(), ms.div_ceil(1000)),
                None => format!("{} (next click)", kind.name()),
            })
            .collect()
    }

    pub fn auto_period_ms(&self) -> Option<u64> {
        self.driver.period_ms()
    }

    pub fn stats_snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            user_id: self.state.user_id.clone(),
            username: self.state.username.clone(),
            total_clicks: self.state.total_clicks,
            points: self.state.points,
            stage: self.state.stage,
            rarities_found: self.state.discovered.len(),
            completion_percent: self.completion(),
        }
    }

    /// True if anything changed since the last call.
    #[cfg(any(target_arch = "wasm32", test))]
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    // ── Intents ─────────────────────────────────────────────────

    /// A manual click: one draw with Golden Click honoured.
    pub fn click(&mut self) -> Option<DrawOutcome> {
        let (outcome, is_new) = self.draw_once(true)?;
        self.last_draw = Some(LastDraw {
            name: outcome.rarity.name,
            points: outcome.points_awarded,
            is_new,
        });
        self.after_mutation();
        Some(outcome)
    }

    pub fn purchase(&mut self, item: &ShopItem) -> Result<Receipt, GameError> {
        let today = self.today();
        let receipt = shop::purchase(item, &mut self.state, &self.config, today)?;
        match &receipt.item {
            ShopItem::AutoClicker => {
                self.sync_driver();
                let msg = format!("Auto clicker bought ({} owned)", self.state.auto_clicker_count);
                self.state.add_log(&msg, false);
            }
            ShopItem::Effect(kind) => {
                let transition =
                    self.scheduler
                        .activate(&mut self.state.effects, *kind, self.now_ms, &self.config.effects);
                info!(effect = kind.name(), ?transition, "effect activated");
                if *kind == EffectKind::TimeFreeze {
                    self.sync_driver();
                }
                self.state.add_log(&format!("{} activated!", kind.name()), true);
            }
            ShopItem::Background(_) | ShopItem::Skin(_) => {
                let msg = format!("{} purchased!", receipt.item.name());
                self.state.add_log(&msg, false);
            }
        }
        self.after_mutation();
        Ok(receipt)
    }

    pub fn advance_stage(&mut self) -> Result<StageRecord, GameError> {
        let completed_at =
            DateTime::from_timestamp_millis(i64::try_from(self.now_ms).unwrap_or(i64::MAX))
                .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let record =
            progression::advance_stage(&mut self.state, &mut self.scheduler, &self.config, completed_at)?;
        self.sync_driver();
        self.last_draw = None;
        self.scroll = 0;
        let msg = match self.config.version {
            GameVersion::Staged => format!("Welcome to Stage {}!", self.state.stage),
            GameVersion::Classic => format!(
                "Upstaged! Prices x{:.2} (run {})",
                self.state.price_multiplier,
                self.state.prestige_count + 1
            ),
        };
        self.state.add_log(&msg, true);
        self.after_mutation();
        Ok(record)
    }

    pub fn claim_task(&mut self, id: &str) -> Result<u64, GameError> {
        let reward = tasks::claim_task(&mut self.state, id)?;
        self.state.add_log(&format!("Task complete! +{}", format_number(reward)), true);
        self.after_mutation();
        Ok(reward)
    }

    pub fn claim_streak(&mut self) -> Result<u64, GameError> {
        let today = self.today();
        let reward = tasks::claim_streak(&mut self.state, today, &self.config)?;
        let msg = format!(
            "Day {} streak! +{}",
            self.state.streak.count,
            format_number(reward)
        );
        self.state.add_log(&msg, true);
        self.after_mutation();
        Ok(reward)
    }

    pub fn set_background(&mut self, id: &str) -> Result<(), GameError> {
        if !self.state.owns_background(id) {
            return Err(GameError::InvalidTarget(format!("background {id} not owned")));
        }
        self.state.active_background = id.to_string();
        debug!(background = id, "background set");
        self.dirty = true;
        Ok(())
    }

    pub fn set_skin(&mut self, id: &str) -> Result<(), GameError> {
        if !self.state.owns_skin(id) {
            return Err(GameError::InvalidTarget(format!("skin {id} not owned")));
        }
        self.state.active_skin = id.to_string();
        debug!(skin = id, "skin set");
        self.dirty = true;
        Ok(())
    }

    pub fn rename(&mut self, name: &str) -> Result<(), GameError> {
        let name = leaderboard::rename(&mut self.state, name)?;
        info!(username = %name, "renamed");
        self.state.add_log(&format!("You are now {name}"), false);
        self.dirty = true;
        Ok(())
    }

    /// Start over from the default state. Identity survives.
    pub fn reset_game(&mut self) {
        self.scheduler.cancel_all(&mut self.state.effects);
        let mut fresh = PlayerState::new();
        fresh.user_id = std::mem::take(&mut self.state.user_id);
        fresh.username = std::mem::take(&mut self.state.username);
        self.state = fresh;
        self.driver.stop();
        self.last_draw = None;
        self.scroll = 0;
        self.confirm_reset = false;
        info!(user_id = %self.state.user_id, "game reset");
        self.ensure_daily();
        self.state.add_log("Game reset.", true);
        self.dirty = true;
    }

    // ── Engine internals ────────────────────────────────────────

    fn sync_driver(&mut self) {
        let frozen = self.state.effects.is_active(EffectKind::TimeFreeze);
        self.driver.sync(
            self.state.auto_clicker_count,
            frozen,
            self.now_ms,
            &self.config.auto_click,
        );
    }

    fn ensure_daily(&mut self) {
        let today = self.today();
        if tasks::ensure_for_day(&mut self.state, today, &self.config, &mut self.rng) {
            self.state.add_log("New daily tasks available!", false);
            self.dirty = true;
        }
    }

    /// One draw applied to the state. Achievements are checked by the caller.
    fn draw_once(&mut self, is_manual: bool) -> Option<(DrawOutcome, bool)> {
        let version = self.config.version;
        let table = table_for(version, self.state.stage, &self.state.discovered);
        let mods = Modifiers::from_effects(&self.state.effects);
        let floor = draw::floor_points(version, &self.config.progression.golden_floor);
        let outcome = draw::draw(&table, mods, is_manual, floor, &mut self.rng)?;

        if outcome.consumed_golden_click {
            self.scheduler
                .consume(&mut self.state.effects, EffectKind::GoldenClick);
        }
        self.state.total_clicks = self.state.total_clicks.saturating_add(1);
        self.state.points = self.state.points.saturating_add(outcome.points_awarded);

        let name = outcome.rarity.name;
        let is_new = progression::record_discovery(&mut self.state, name);
        tasks::record(&mut self.state, TaskEvent::Clicks(1));
        tasks::record(&mut self.state, TaskEvent::Points(outcome.points_awarded));
        tasks::record(&mut self.state, TaskEvent::Found(name));
        if is_new {
            tasks::record(&mut self.state, TaskEvent::NewRarity);
            info!(rarity = name, manual = is_manual, "rarity discovered");
            let msg = format!("New rarity: {} (+{})", name, format_number(outcome.points_awarded));
            self.state.add_log(&msg, true);
        }
        self.sync.note_clicks(1);
        self.dirty = true;
        Some((outcome, is_new))
    }

    fn after_mutation(&mut self) {
        for def in achievements::evaluate(&mut self.state, &self.config) {
            self.state.add_log(&format!("Achievement: {}", def.name), true);
        }
        if progression::take_stage_ready_notice(&mut self.state, &self.config) {
            let msg = match self.config.version {
                GameVersion::Staged => "Stage complete! Press [A] to advance.",
                GameVersion::Classic => "Upstage available! Press [A].",
            };
            self.state.add_log(msg, true);
        }
        self.dirty = true;
    }

    fn fire_expiries(&mut self) {
        for transition in self.scheduler.advance(&mut self.state.effects, self.now_ms) {
            if let EffectTransition::Expired { kind, at } = transition {
                info!(effect = kind.name(), at, "effect expired");
                self.state.add_log(&format!("{} wore off", kind.name()), false);
                if kind == EffectKind::TimeFreeze {
                    self.sync_driver();
                }
            }
        }
        self.dirty = true;
    }

    fn run_auto_tick(&mut self) {
        for _ in 0..self.state.auto_clicker_count {
            self.draw_once(false);
        }
        self.after_mutation();
    }

    /// Run every expiry and auto tick up to `target` in time order. Auto
    /// ticks beyond the catch-up cap are dropped.
    fn advance_to(&mut self, target: u64) {
        let mut ticks_run = 0u32;
        loop {
            let expiry = self.scheduler.next_fire().filter(|t| *t <= target);
            let auto = self.driver.next_fire().filter(|t| *t <= target);
            let expiry_first = match (expiry, auto) {
                (Some(e), Some(a)) => e <= a,
                (Some(_), None) => true,
                (None, _) => false,
            };

            if let (true, Some(at)) = (expiry_first, expiry) {
                self.now_ms = self.now_ms.max(at);
                self.fire_expiries();
            } else if let Some(at) = auto {
                if ticks_run >= self.config.auto_click.max_catch_up_ticks {
                    debug!(until = target, "auto-click catch-up capped");
                    self.driver.skip_to(target);
                    continue;
                }
                self.now_ms = self.now_ms.max(at);
                self.driver.fire();
                self.run_auto_tick();
                ticks_run += 1;
            } else {
                break;
            }
        }
        self.now_ms = self.now_ms.max(target);
    }

    fn emit_stats(&mut self) {
        if !self.sync.poll(self.now_ms, &self.config.sync) {
            return;
        }
        let snapshot = self.stats_snapshot();
        match serde_json::to_string(&snapshot) {
            Ok(json) => info!(target: "leaderboard", %json, "stats snapshot"),
            Err(e) => debug!(error = %e, "stats snapshot not serializable"),
        }
        self.last_snapshot = Some(snapshot);
    }

    #[cfg(target_arch = "wasm32")]
    fn flush_save(&mut self) {
        if !self.take_dirty() {
            return;
        }
        match save::save_game(&self.state, self.config.version) {
            Ok(()) => self.save_warned = false,
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                if !self.save_warned {
                    self.state.add_log(&e.player_message(), false);
                    self.save_warned = true;
                }
            }
        }
    }

    fn report<T>(&mut self, result: Result<T, GameError>) {
        if let Err(e) = result {
            debug!(error = %e, "intent rejected");
            if !e.is_silent() {
                self.state.add_log(&e.player_message(), false);
            }
        }
    }

    // ── Input dispatch ──────────────────────────────────────────

    fn buy_consumable(&mut self, index: usize) -> bool {
        match ShopItem::consumable_kinds().get(index) {
            Some(item) => {
                let result = self.purchase(item);
                self.report(result);
                true
            }
            None => false,
        }
    }

    fn claim_task_at(&mut self, index: usize) -> bool {
        let id = self
            .state
            .daily
            .as_ref()
            .and_then(|d| d.tasks.get(index))
            .map(|t| t.id.clone());
        match id {
            Some(id) => {
                let result = self.claim_task(&id);
                self.report(result);
                true
            }
            None => false,
        }
    }

    /// Owned cosmetics are equipped, unowned ones bought.
    fn pick_background(&mut self, index: usize) -> bool {
        let Some(def) = shop::backgrounds(self.config.version).get(index) else {
            return false;
        };
        let result = if self.state.owns_background(def.id) {
            self.set_background(def.id)
        } else {
            self.purchase(&ShopItem::Background(def.id.to_string())).map(|_| ())
        };
        self.report(result);
        true
    }

    fn pick_skin(&mut self, index: usize) -> bool {
        let Some(def) = shop::skins(self.config.version).get(index) else {
            return false;
        };
        let result = if self.state.owns_skin(def.id) {
            self.set_skin(def.id)
        } else {
            self.purchase(&ShopItem::Skin(def.id.to_string())).map(|_| ())
        };
        self.report(result);
        true
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.scroll = 0;
    }

    fn handle_name_key(&mut self, key: char) -> bool {
        let Some(buffer) = self.name_input.as_mut() else {
            return false;
        };
        match key {
            KEY_ENTER => {
                let name = std::mem::take(buffer);
                self.name_input = None;
                let result = self.rename(&name);
                self.report(result);
            }
            KEY_ESC => self.name_input = None,
            KEY_BACKSPACE => {
                buffer.pop();
            }
            c if !c.is_control() && buffer.chars().count() < leaderboard::MAX_USERNAME_LEN => {
                buffer.push(c);
            }
            _ => {}
        }
        true
    }

    fn handle_key(&mut self, key: char) -> bool {
        if self.name_input.is_some() {
            return self.handle_name_key(key);
        }
        if self.confirm_reset {
            if key == 'y' {
                self.reset_game();
            } else {
                self.confirm_reset = false;
            }
            return true;
        }
        if let Some(tab) = Tab::all().iter().find(|t| t.key() == key) {
            self.switch_tab(*tab);
            return true;
        }
        match key {
            'c' | ' ' => {
                self.click();
                true
            }
            'a' => {
                let result = self.advance_stage();
                self.report(result);
                true
            }
            's' => {
                let result = self.claim_streak();
                self.report(result);
                true
            }
            'X' => {
                self.confirm_reset = true;
                true
            }
            'n' if self.tab == Tab::Stats => {
                self.name_input = Some(String::new());
                true
            }
            'j' => {
                self.scroll = self.scroll.saturating_add(1);
                true
            }
            'k' => {
                self.scroll = self.scroll.saturating_sub(1);
                true
            }
            '1'..='9' => {
                let index = (key as u8 - b'1') as usize;
                match self.tab {
                    Tab::Shop => self.buy_consumable(index),
                    Tab::Tasks => self.claim_task_at(index),
                    _ => false,
                }
            }
            _ => false,
        }
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        if self.confirm_reset {
            match action_id {
                CONFIRM_RESET => self.reset_game(),
                CANCEL_RESET => self.confirm_reset = false,
                _ => return false,
            }
            return true;
        }
        match action_id {
            CLICK_BUTTON => {
                self.click();
                true
            }
            ADVANCE_STAGE => {
                let result = self.advance_stage();
                self.report(result);
                true
            }
            CLAIM_STREAK => {
                let result = self.claim_streak();
                self.report(result);
                true
            }
            RESET_GAME => {
                self.confirm_reset = true;
                true
            }
            RENAME => {
                self.name_input = Some(String::new());
                true
            }
            SCROLL_UP => {
                self.scroll = self.scroll.saturating_sub(1);
                true
            }
            SCROLL_DOWN => {
                self.scroll = self.scroll.saturating_add(1);
                true
            }
            BACKGROUND_DEFAULT => {
                let result = self.set_background(DEFAULT_COSMETIC);
                self.report(result);
                true
            }
            SKIN_DEFAULT => {
                let result = self.set_skin(DEFAULT_COSMETIC);
                self.report(result);
                true
            }
            id if (TAB_SHOP..=TAB_STATS).contains(&id) => {
                match Tab::all().iter().find(|t| t.action_id() == id) {
                    Some(tab) => {
                        self.switch_tab(*tab);
                        true
                    }
                    None => false,
                }
            }
            id if (BUY_ITEM_BASE..BACKGROUND_BASE).contains(&id) => {
                self.buy_consumable((id - BUY_ITEM_BASE) as usize)
            }
            id if (BACKGROUND_BASE..BACKGROUND_DEFAULT).contains(&id) => {
                self.pick_background((id - BACKGROUND_BASE) as usize)
            }
            id if (SKIN_BASE..SKIN_DEFAULT).contains(&id) => {
                self.pick_skin((id - SKIN_BASE) as usize)
            }
            id if (CLAIM_TASK_BASE..SCROLL_UP).contains(&id) => {
                self.claim_task_at((id - CLAIM_TASK_BASE) as usize)
            }
            _ => false,
        }
    }
}

impl Game for RarityGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_click(*id),
        }
    }

    fn tick(&mut self, delta_ms: u32) {
        let target = self.now_ms.saturating_add(u64::from(delta_ms));
        self.advance_to(target);
        self.ensure_daily();
        self.emit_stats();

        #[cfg(target_arch = "wasm32")]
        self.flush_save();
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }
}
