//! Semantic action IDs for Beyond Rare click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Core actions ────────────────────────────────────────────────
pub const CLICK_BUTTON: u16 = 0;
pub const ADVANCE_STAGE: u16 = 1;
pub const CLAIM_STREAK: u16 = 2;
pub const RESET_GAME: u16 = 3;
pub const CONFIRM_RESET: u16 = 4;
pub const CANCEL_RESET: u16 = 5;
pub const RENAME: u16 = 6;

// ── Tab navigation ──────────────────────────────────────────────
pub const TAB_SHOP: u16 = 10;
pub const TAB_COSMETICS: u16 = 11;
pub const TAB_TASKS: u16 = 12;
pub const TAB_ACHIEVEMENTS: u16 = 13;
pub const TAB_STATS: u16 = 14;

// ── Shop (base + index into ShopItem::consumable_kinds) ─────────
pub const BUY_ITEM_BASE: u16 = 100;

// ── Backgrounds (base + catalog index; default is DEFAULT) ──────
pub const BACKGROUND_BASE: u16 = 200;
pub const BACKGROUND_DEFAULT: u16 = 299;

// ── Skins (base + catalog index) ────────────────────────────────
pub const SKIN_BASE: u16 = 300;
pub const SKIN_DEFAULT: u16 = 399;

// ── Daily tasks (base + task index) ─────────────────────────────
pub const CLAIM_TASK_BASE: u16 = 400;

// ── Scrolling for long lists ────────────────────────────────────
pub const SCROLL_UP: u16 = 500;
pub const SCROLL_DOWN: u16 = 501;
