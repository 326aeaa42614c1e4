//! Game trait and version selection.

pub mod rarity;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use rarity::config::GameVersion;

/// Trait that all games implement.
pub trait Game {
    /// Handle an input event. Returns true if the event was consumed.
    fn handle_input(&mut self, event: &InputEvent) -> bool;

    /// Advance the game clock by `delta_ms` milliseconds.
    fn tick(&mut self, delta_ms: u32);

    /// Render the game into the given area.
    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>);
}

/// Which version the player picked on the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameChoice {
    Staged,
    Classic,
}

impl GameChoice {
    pub fn all() -> &'static [GameChoice] {
        &[GameChoice::Staged, GameChoice::Classic]
    }

    pub fn version(&self) -> GameVersion {
        match self {
            GameChoice::Staged => GameVersion::Staged,
            GameChoice::Classic => GameVersion::Classic,
        }
    }

    /// Menu hotkey.
    pub fn key(&self) -> char {
        match self {
            GameChoice::Staged => '1',
            GameChoice::Classic => '2',
        }
    }

    pub fn blurb(&self) -> &'static str {
        match self {
            GameChoice::Staged => "Ten stages, new rarities each stage",
            GameChoice::Classic => "One big table, upstage for harder prices",
        }
    }

    pub fn from_key(key: char) -> Option<GameChoice> {
        Self::all().iter().copied().find(|c| c.key() == key)
    }
}

/// Top-level application state.
pub enum AppState {
    /// Showing the version menu.
    Menu,
    /// Playing a game.
    Playing { game: Box<dyn Game> },
}

/// Wall-clock inputs for a new session.
#[derive(Clone, Copy, Debug)]
pub struct SessionClock {
    pub now_ms: u64,
    pub utc_offset_minutes: i32,
    pub seed: u64,
}

/// Create a game for a choice, restoring its save in the browser.
pub fn create_game(choice: GameChoice, clock: SessionClock) -> Box<dyn Game> {
    #[cfg(target_arch = "wasm32")]
    let game = rarity::RarityGame::load(
        choice.version(),
        clock.seed,
        clock.now_ms,
        clock.utc_offset_minutes,
    );

    #[cfg(not(target_arch = "wasm32"))]
    let game = rarity::RarityGame::new(
        rarity::config::GameConfig::for_version(choice.version()),
        rarity::state::PlayerState::new(),
        clock.seed,
        clock.now_ms,
        clock.utc_offset_minutes,
    );

    Box::new(game)
}
