//! Beyond Rare save/load.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: current format. Bump when fields are added.
//! - `MIN_COMPATIBLE_VERSION`: oldest format that still loads. Only bump when
//!   a field changes meaning or is removed.
//!
//! Every `PlayerState` field is `#[serde(default)]`, so an older save that is
//! still compatible loads with the missing fields defaulted. Unknown fields are
//! ignored.

#[cfg(any(target_arch = "wasm32", test))]
use serde::{Deserialize, Serialize};
#[cfg(any(target_arch = "wasm32", test))]
use tracing::info;

#[cfg(any(target_arch = "wasm32", test))]
use super::error::GameError;
#[cfg(any(target_arch = "wasm32", test))]
use super::state::PlayerState;

#[cfg(target_arch = "wasm32")]
use super::config::{GameConfig, GameVersion};

/// Optional JSON tuning override, read once per session.
#[cfg(target_arch = "wasm32")]
const CONFIG_KEY: &str = "beyond_rare_config";

#[cfg(any(target_arch = "wasm32", test))]
const SAVE_VERSION: u32 = 1;

#[cfg(any(target_arch = "wasm32", test))]
const MIN_COMPATIBLE_VERSION: u32 = 1;

#[cfg(target_arch = "wasm32")]
fn storage_key(version: GameVersion) -> &'static str {
    match version {
        GameVersion::Staged => "beyond_rare_save",
        GameVersion::Classic => "beyond_rare_classic_save",
    }
}

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize)]
struct SaveData {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    game: PlayerState,
}

#[cfg(any(target_arch = "wasm32", test))]
fn to_json(state: &PlayerState) -> Result<String, GameError> {
    #[derive(Serialize)]
    struct SaveRef<'a> {
        version: u32,
        game: &'a PlayerState,
    }
    serde_json::to_string(&SaveRef {
        version: SAVE_VERSION,
        game: state,
    })
    .map_err(|e| GameError::PersistenceUnavailable(format!("serialize: {e}")))
}

/// Parse a save. Corrupt or too-old data is an error; the caller discards it.
#[cfg(any(target_arch = "wasm32", test))]
fn from_json(json: &str) -> Result<PlayerState, GameError> {
    let save: SaveData = serde_json::from_str(json)
        .map_err(|e| GameError::PersistenceUnavailable(format!("parse: {e}")))?;
    if save.version < MIN_COMPATIBLE_VERSION {
        return Err(GameError::PersistenceUnavailable(format!(
            "save version {} older than {}",
            save.version, MIN_COMPATIBLE_VERSION
        )));
    }
    if save.version < SAVE_VERSION {
        info!(saved = save.version, current = SAVE_VERSION, "migrating old save");
    }
    Ok(save.game)
}

#[cfg(target_arch = "wasm32")]
fn get_storage() -> Result<web_sys::Storage, GameError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| GameError::PersistenceUnavailable("localStorage not available".into()))
}

/// Write the state to localStorage.
#[cfg(target_arch = "wasm32")]
pub fn save_game(state: &PlayerState, version: GameVersion) -> Result<(), GameError> {
    let json = to_json(state)?;
    get_storage()?
        .set_item(storage_key(version), &json)
        .map_err(|e| GameError::PersistenceUnavailable(format!("{e:?}")))
}

/// Read the state from localStorage. Corrupt or incompatible saves are
/// deleted and `None` is returned so a new game starts.
#[cfg(target_arch = "wasm32")]
pub fn load_game(version: GameVersion) -> Option<PlayerState> {
    let storage = match get_storage() {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "cannot load save");
            return None;
        }
    };
    let json = storage.get_item(storage_key(version)).ok()??;
    match from_json(&json) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!(error = %e, "discarding save");
            let _ = storage.remove_item(storage_key(version));
            None
        }
    }
}

/// The preset for `version`, replaced by a stored override when one parses
/// and targets the same version.
#[cfg(target_arch = "wasm32")]
pub fn load_config(version: GameVersion) -> GameConfig {
    let preset = GameConfig::for_version(version);
    let Some(json) = get_storage()
        .ok()
        .and_then(|s| s.get_item(CONFIG_KEY).ok().flatten())
    else {
        return preset;
    };
    match GameConfig::parse(&json) {
        Ok(config) if config.version == version => {
            info!(?version, "using config override");
            config
        }
        Ok(_) => preset,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring config override");
            preset
        }
    }
}
