//! Shop: price curves, cosmetic catalogs and the purchase state machine.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use super::config::{GameConfig, GameVersion, UnlockPolicy};
use super::effects::EffectKind;
use super::error::GameError;
use super::state::{PlayerState, DEFAULT_COSMETIC};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CosmeticKind {
    Background,
    Skin,
}

/// When a cosmetic is for sale. Months are 1-based. A date window is
/// `(month, day)` from `start` up to, not including, `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaleWindow {
    Always,
    Months(&'static [u32]),
    Dates { start: (u32, u32), end: (u32, u32) },
}

impl SaleWindow {
    pub fn contains(self, day: NaiveDate) -> bool {
        match self {
            SaleWindow::Always => true,
            SaleWindow::Months(months) => months.contains(&day.month()),
            SaleWindow::Dates { start, end } => {
                let md = (day.month(), day.day());
                md >= start && md < end
            }
        }
    }
}

/// A purchasable background or button skin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CosmeticDef {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: u64,
    pub required_stage: u32,
    pub required_rarity: Option<&'static str>,
    pub kind: CosmeticKind,
    pub window: SaleWindow,
}

impl CosmeticDef {
    /// Seasonal and event backgrounds are only sold inside their window.
    pub fn is_seasonal(&self) -> bool {
        self.window != SaleWindow::Always
    }
}

const fn staged_bg(name: &'static str, cost: u64, required_stage: u32) -> CosmeticDef {
    CosmeticDef {
        id: name,
        name,
        cost,
        required_stage,
        required_rarity: None,
        kind: CosmeticKind::Background,
        window: SaleWindow::Always,
    }
}

const fn classic_bg(name: &'static str, cost: u64, rarity: &'static str) -> CosmeticDef {
    CosmeticDef {
        id: name,
        name,
        cost,
        required_stage: 1,
        required_rarity: Some(rarity),
        kind: CosmeticKind::Background,
        window: SaleWindow::Always,
    }
}

const fn seasonal_bg(name: &'static str, cost: u64, window: SaleWindow) -> CosmeticDef {
    CosmeticDef {
        id: name,
        name,
        cost,
        required_stage: 1,
        required_rarity: None,
        kind: CosmeticKind::Background,
        window,
    }
}

const fn months(m: &'static [u32]) -> SaleWindow {
    SaleWindow::Months(m)
}

const fn dates(start: (u32, u32), end: (u32, u32)) -> SaleWindow {
    SaleWindow::Dates { start, end }
}

const fn skin(id: &'static str, name: &'static str, cost: u64) -> CosmeticDef {
    CosmeticDef {
        id,
        name,
        cost,
        required_stage: 1,
        required_rarity: None,
        kind: CosmeticKind::Skin,
        window: SaleWindow::Always,
    }
}

const STAGED_BACKGROUNDS: &[CosmeticDef] = &[
    staged_bg("Classic Blue", 200, 1),
    staged_bg("Classic Green", 200, 1),
    staged_bg("Classic Red", 200, 1),
    staged_bg("Classic Yellow", 200, 1),
    staged_bg("Classic Purple", 200, 1),
    staged_bg("Ocean Depth", 500, 2),
    staged_bg("Forest Mist", 500, 2),
    staged_bg("Sunset Glow", 500, 2),
    staged_bg("Rainbow", 1000, 3),
    staged_bg("Aurora", 1000, 3),
    staged_bg("Twilight", 1000, 3),
    staged_bg("Ethereal Dream", 2000, 4),
    staged_bg("Stellar Night", 3000, 5),
    staged_bg("Cosmic Void", 5000, 6),
    staged_bg("Divine Light", 8000, 7),
    staged_bg("Transcendence", 15_000, 8),
    staged_bg("Infinite Abyss", 30_000, 9),
    staged_bg("Omega Dimension", 100_000, 10),
];

const CLASSIC_BACKGROUNDS: &[CosmeticDef] = &[
    classic_bg("White", 200, "Common"),
    classic_bg("Light Red", 200, "Mythical"),
    classic_bg("Medium Red", 200, "Mythical"),
    classic_bg("Dark Red", 200, "Mythical"),
    classic_bg("Light Blue", 200, "Rare"),
    classic_bg("Medium Blue", 200, "Rare"),
    classic_bg("Dark Blue", 200, "Rare"),
    classic_bg("Light Yellow", 200, "Legendary"),
    classic_bg("Medium Yellow", 200, "Legendary"),
    classic_bg("Dark Yellow", 200, "Legendary"),
    classic_bg("Light Orange", 200, "Chroma"),
    classic_bg("Medium Orange", 200, "Chroma"),
    classic_bg("Dark Orange", 200, "Chroma"),
    classic_bg("Light Green", 200, "Uncommon"),
    classic_bg("Medium Green", 200, "Uncommon"),
    classic_bg("Dark Green", 200, "Uncommon"),
    classic_bg("Light Purple", 200, "Epic"),
    classic_bg("Medium Purple", 200, "Epic"),
    classic_bg("Dark Purple", 200, "Epic"),
    classic_bg("Rainbow", 500, "Chroma"),
    classic_bg("Red-Blue Gradient", 400, "Ultra Legendary"),
    classic_bg("Red-Yellow Gradient", 400, "Ultra Legendary"),
    classic_bg("Blue-Yellow Gradient", 400, "Ultra Legendary"),
    classic_bg("Ethereal Glow", 600, "Ethereal"),
    classic_bg("Stellar Night", 800, "Stellar"),
    classic_bg("Unknown Void", 1000, "Unknown"),
    seasonal_bg("Cherry Blossom Bliss", 500, months(&[3, 4, 5])),
    seasonal_bg("Meadow Bloom", 500, months(&[3, 4, 5])),
    seasonal_bg("Ocean Sunset", 500, months(&[6, 7, 8])),
    seasonal_bg("Summer Vibes", 500, months(&[6, 7, 8])),
    seasonal_bg("Harvest Glow", 500, months(&[9, 10, 11])),
    seasonal_bg("Crisp Autumn", 500, months(&[9, 10, 11])),
    seasonal_bg("Frostbite Chill", 500, months(&[12, 1, 2])),
    seasonal_bg("Snowy Cabin", 500, months(&[12, 1, 2])),
    seasonal_bg("July 4th Fireworks", 750, dates((6, 15), (7, 15))),
    seasonal_bg("Halloween Haunt", 750, dates((10, 15), (10, 31))),
    seasonal_bg("Christmas Cheer", 750, months(&[12])),
    seasonal_bg("Summer Freedom", 750, dates((5, 28), (6, 10))),
    seasonal_bg("Happy New Year", 750, dates((1, 1), (1, 5))),
];

const STAGED_SKINS: &[CosmeticDef] = &[
    skin("ocean", "Ocean Wave", 300),
    skin("forest", "Forest", 300),
    skin("sunset", "Sunset", 300),
    skin("amethyst", "Amethyst", 500),
    skin("gold", "Gold Rush", 1000),
    skin("diamond", "Diamond", 2000),
    skin("rainbow", "Rainbow", 5000),
    skin("cosmic", "Cosmic", 10_000),
    skin("divine", "Divine", 25_000),
];

/// Backgrounds for sale. "default" is implicit and free.
pub fn backgrounds(version: GameVersion) -> &'static [CosmeticDef] {
    match version {
        GameVersion::Staged => STAGED_BACKGROUNDS,
        GameVersion::Classic => CLASSIC_BACKGROUNDS,
    }
}

/// Button skins for sale. "default" (Classic) is implicit and free.
pub fn skins(version: GameVersion) -> &'static [CosmeticDef] {
    match version {
        GameVersion::Staged => STAGED_SKINS,
        GameVersion::Classic => &[],
    }
}

pub fn find_cosmetic(version: GameVersion, kind: CosmeticKind, id: &str) -> Option<&'static CosmeticDef> {
    let catalog = match kind {
        CosmeticKind::Background => backgrounds(version),
        CosmeticKind::Skin => skins(version),
    };
    catalog.iter().find(|c| c.id == id)
}

pub fn skin_name(id: &str) -> &str {
    if id == DEFAULT_COSMETIC {
        return "Classic";
    }
    STAGED_SKINS
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.name)
        .unwrap_or(id)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShopItem {
    AutoClicker,
    Effect(EffectKind),
    Background(String),
    Skin(String),
}

impl ShopItem {
    /// Auto-clicker plus every effect, in shop order.
    pub fn consumable_kinds() -> Vec<ShopItem> {
        let mut kinds = vec![ShopItem::AutoClicker];
        kinds.extend(EffectKind::all().iter().map(|k| ShopItem::Effect(*k)));
        kinds
    }

    pub fn id(&self) -> &str {
        match self {
            ShopItem::AutoClicker => "auto_clicker",
            ShopItem::Effect(EffectKind::DoublePoints) => "double_points",
            ShopItem::Effect(EffectKind::GoldenClick) => "golden_click",
            ShopItem::Effect(EffectKind::LuckBoost) => "luck_boost",
            ShopItem::Effect(EffectKind::TimeFreeze) => "time_freeze",
            ShopItem::Effect(EffectKind::GoldenMode) => "golden_mode",
            ShopItem::Background(id) | ShopItem::Skin(id) => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ShopItem::AutoClicker => "Auto Clicker",
            ShopItem::Effect(kind) => kind.name(),
            ShopItem::Background(id) => id,
            ShopItem::Skin(id) => skin_name(id),
        }
    }

    fn cosmetic(&self, version: GameVersion) -> Option<&'static CosmeticDef> {
        match self {
            ShopItem::Background(id) => find_cosmetic(version, CosmeticKind::Background, id),
            ShopItem::Skin(id) => find_cosmetic(version, CosmeticKind::Skin, id),
            _ => None,
        }
    }

    fn base_price(&self, config: &GameConfig) -> Option<u64> {
        let prices = &config.economy.prices;
        match self {
            ShopItem::AutoClicker => Some(prices.auto_clicker),
            ShopItem::Effect(EffectKind::DoublePoints) => Some(prices.double_points),
            ShopItem::Effect(EffectKind::GoldenClick) => Some(prices.golden_click),
            ShopItem::Effect(EffectKind::LuckBoost) => Some(prices.luck_boost),
            ShopItem::Effect(EffectKind::TimeFreeze) => Some(prices.time_freeze),
            ShopItem::Effect(EffectKind::GoldenMode) => Some(prices.golden_mode),
            ShopItem::Background(_) | ShopItem::Skin(_) => {
                self.cosmetic(config.version).map(|c| c.cost)
            }
        }
    }
}

/// `floor(base * growth^n * multiplier)`, saturating at `u64::MAX`.
pub fn scaled_price(base: u64, growth: f64, n: u32, multiplier: f64) -> u64 {
    let exact = base as f64 * growth.powi(n as i32) * multiplier;
    // `as` saturates for out-of-range floats.
    exact.floor() as u64
}

/// Current price of `item`, or `None` if it is not in this version's shop.
/// Auto-clickers scale with the owned count, everything else with the shared
/// purchase counter.
pub fn price(item: &ShopItem, state: &PlayerState, config: &GameConfig) -> Option<u64> {
    let base = item.base_price(config)?;
    let n = match item {
        ShopItem::AutoClicker => state.auto_clicker_count,
        _ => state.purchase_count,
    };
    Some(scaled_price(
        base,
        config.economy.price_growth,
        n,
        state.price_multiplier,
    ))
}

impl UnlockPolicy {
    /// The gate cosmetics must pass before they can be bought.
    pub fn predicate(self) -> fn(&PlayerState, &CosmeticDef) -> bool {
        match self {
            UnlockPolicy::StageGated => |state: &PlayerState, def: &CosmeticDef| {
                state.stage >= def.required_stage
            },
            UnlockPolicy::RarityGated => |state: &PlayerState, def: &CosmeticDef| {
                match def.required_rarity {
                    Some(rarity) => state.discovered.contains(rarity),
                    None => true,
                }
            },
        }
    }
}

/// Whether a cosmetic can be bought on `today` (permanent ones always).
pub fn on_sale(def: &CosmeticDef, today: NaiveDate) -> bool {
    def.window.contains(today)
}

/// Whether a cosmetic passes this config's unlock policy.
pub fn is_unlocked(def: &CosmeticDef, state: &PlayerState, config: &GameConfig) -> bool {
    (config.progression.unlock_policy.predicate())(state, def)
}

/// What a successful purchase did. The caller activates effects and restarts
/// the auto-click driver.
#[derive(Clone, Debug, PartialEq)]
pub struct Receipt {
    pub item: ShopItem,
    pub price: u64,
}

/// Validate and apply a purchase made on the local day `today`. On any error
/// the state is untouched.
pub fn purchase(
    item: &ShopItem,
    state: &mut PlayerState,
    config: &GameConfig,
    today: NaiveDate,
) -> Result<Receipt, GameError> {
    if let ShopItem::Background(id) | ShopItem::Skin(id) = item {
        let def = item
            .cosmetic(config.version)
            .ok_or_else(|| GameError::InvalidTarget(format!("unknown cosmetic {id}")))?;
        let owned = match def.kind {
            CosmeticKind::Background => state.owns_background(def.id),
            CosmeticKind::Skin => state.owns_skin(def.id),
        };
        if owned {
            return Err(GameError::InvalidTarget(format!("{id} already owned")));
        }
        if !is_unlocked(def, state, config) {
            return Err(GameError::Locked {
                item: def.name.to_string(),
            });
        }
        if !on_sale(def, today) {
            return Err(GameError::OutOfSeason {
                item: def.name.to_string(),
            });
        }
    }

    if *item == ShopItem::AutoClicker && state.auto_clicker_count >= config.economy.max_auto_clickers {
        return Err(GameError::AutoClickerCap {
            max: config.economy.max_auto_clickers,
        });
    }

    let price = price(item, state, config)
        .ok_or_else(|| GameError::InvalidTarget(item.id().to_string()))?;
    if state.points < price {
        debug!(item = item.id(), price, points = state.points, "purchase rejected");
        return Err(GameError::InsufficientPoints {
            price,
            points: state.points,
        });
    }

    state.points -= price;
    match item {
        ShopItem::AutoClicker => {
            state.auto_clicker_count += 1;
        }
        ShopItem::Effect(_) => {
            state.purchase_count = state.purchase_count.saturating_add(1);
        }
        ShopItem::Background(id) => {
            state.purchase_count = state.purchase_count.saturating_add(1);
            state.owned_backgrounds.insert(id.clone());
        }
        ShopItem::Skin(id) => {
            state.purchase_count = state.purchase_count.saturating_add(1);
            state.owned_skins.insert(id.clone());
        }
    }
    if matches!(item, ShopItem::AutoClicker | ShopItem::Effect(_)) {
        state.purchased_kinds.insert(item.id().to_string());
    }

    info!(
        item = item.id(),
        price,
        points = state.points,
        purchase_count = state.purchase_count,
        auto_clickers = state.auto_clicker_count,
        "purchase"
    );
    Ok(Receipt {
        item: item.clone(),
        price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn staged() -> GameConfig {
        GameConfig::staged()
    }

    fn day(month: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, d).unwrap()
    }

    /// A date outside every seasonal window except the autumn months.
    fn today() -> NaiveDate {
        day(9, 1)
    }

    #[test]
    fn auto_clicker_scenario() {
        let config = staged();
        let mut s = PlayerState::new();
        s.points = 150;
        let r = purchase(&ShopItem::AutoClicker, &mut s, &config, today()).unwrap();
        assert_eq!(r.price, 100);
        assert_eq!(s.points, 50);
        assert_eq!(s.auto_clicker_count, 1);
        assert_eq!(s.purchase_count, 0);
        assert_eq!(price(&ShopItem::AutoClicker, &s, &config), Some(150));
    }

    #[test]
    fn exact_points_succeeds_one_less_fails() {
        let config = staged();
        let item = ShopItem::Effect(EffectKind::GoldenMode);

        let mut s = PlayerState::new();
        s.points = 1999;
        let before = s.clone();
        let err = purchase(&item, &mut s, &config, today()).unwrap_err();
        assert_eq!(err, GameError::InsufficientPoints { price: 2000, points: 1999 });
        assert_eq!(s, before);

        s.points = 2000;
        purchase(&item, &mut s, &config, today()).unwrap();
        assert_eq!(s.points, 0);
        assert_eq!(s.purchase_count, 1);
    }

    #[test]
    fn shared_counter_scales_consumables_not_auto_clickers() {
        let config = staged();
        let mut s = PlayerState::new();
        s.points = 10_000;
        purchase(&ShopItem::Effect(EffectKind::DoublePoints), &mut s, &config, today()).unwrap();
        assert_eq!(price(&ShopItem::Effect(EffectKind::DoublePoints), &s, &config), Some(300));
        assert_eq!(price(&ShopItem::Effect(EffectKind::GoldenClick), &s, &config), Some(600));
        assert_eq!(price(&ShopItem::AutoClicker, &s, &config), Some(100));
    }

    #[test]
    fn auto_clicker_cap() {
        let config = staged();
        let mut s = PlayerState::new();
        s.points = u64::MAX;
        s.auto_clicker_count = 100;
        let err = purchase(&ShopItem::AutoClicker, &mut s, &config, today()).unwrap_err();
        assert_eq!(err, GameError::AutoClickerCap { max: 100 });
        assert_eq!(s.auto_clicker_count, 100);
        assert_eq!(s.points, u64::MAX);
    }

    #[test]
    fn stage_gated_background() {
        let config = staged();
        let mut s = PlayerState::new();
        s.points = 10_000;
        let item = ShopItem::Background("Ocean Depth".into());
        assert!(matches!(purchase(&item, &mut s, &config, today()), Err(GameError::Locked { .. })));
        s.stage = 2;
        let r = purchase(&item, &mut s, &config, today()).unwrap();
        assert_eq!(r.price, 500);
        assert!(s.owns_background("Ocean Depth"));
        assert_eq!(s.purchase_count, 1);
    }

    #[test]
    fn rarity_gated_background() {
        let config = GameConfig::classic();
        let mut s = PlayerState::new();
        s.points = 10_000;
        let item = ShopItem::Background("Light Purple".into());
        assert!(matches!(purchase(&item, &mut s, &config, today()), Err(GameError::Locked { .. })));
        s.discovered.insert("Epic".into());
        purchase(&item, &mut s, &config, today()).unwrap();
        assert!(s.owned_backgrounds.contains("Light Purple"));
    }

    #[test]
    fn owned_or_unknown_cosmetic_is_invalid_target() {
        let config = staged();
        let mut s = PlayerState::new();
        s.points = 10_000;
        let item = ShopItem::Skin("ocean".into());
        purchase(&item, &mut s, &config, today()).unwrap();
        let points = s.points;
        assert!(matches!(purchase(&item, &mut s, &config, today()), Err(GameError::InvalidTarget(_))));
        assert!(matches!(
            purchase(&ShopItem::Skin("default".into()), &mut s, &config, today()),
            Err(GameError::InvalidTarget(_))
        ));
        assert!(matches!(
            purchase(&ShopItem::Skin("nope".into()), &mut s, &config, today()),
            Err(GameError::InvalidTarget(_))
        ));
        assert_eq!(s.points, points);
    }

    #[test]
    fn classic_has_no_skins() {
        let config = GameConfig::classic();
        let mut s = PlayerState::new();
        s.points = 10_000;
        assert!(matches!(
            purchase(&ShopItem::Skin("ocean".into()), &mut s, &config, today()),
            Err(GameError::InvalidTarget(_))
        ));
    }

    #[test]
    fn price_multiplier_applies() {
        let config = GameConfig::classic();
        let mut s = PlayerState::new();
        s.price_multiplier = 1.5;
        assert_eq!(price(&ShopItem::Effect(EffectKind::DoublePoints), &s, &config), Some(300));
        assert_eq!(price(&ShopItem::AutoClicker, &s, &config), Some(150));
    }

    #[test]
    fn catalog_sizes() {
        assert_eq!(backgrounds(GameVersion::Staged).len(), 18);
        assert_eq!(skins(GameVersion::Staged).len(), 9);
        let classic = backgrounds(GameVersion::Classic);
        assert_eq!(classic.len(), 39);
        assert_eq!(classic.iter().filter(|b| b.is_seasonal()).count(), 13);
    }

    #[test]
    fn purchased_kinds_recorded() {
        let config = GameConfig::classic();
        let mut s = PlayerState::new();
        s.points = 10_000;
        purchase(&ShopItem::AutoClicker, &mut s, &config, today()).unwrap();
        purchase(&ShopItem::Effect(EffectKind::LuckBoost), &mut s, &config, today()).unwrap();
        assert_eq!(s.purchased_kinds.len(), 2);
        assert!(s.purchased_kinds.contains("luck_boost"));
    }

    #[test]
    fn price_saturates() {
        assert_eq!(scaled_price(2000, 1.5, 500, 1.0), u64::MAX);
    }

    #[test]
    fn price_curve_known_values() {
        let expected = [(0, 100), (1, 150), (2, 225), (3, 337), (4, 506), (10, 5766), (20, 332_525)];
        for (n, price) in expected {
            assert_eq!(scaled_price(100, 1.5, n, 1.0), price, "n = {n}");
        }
        assert_eq!(scaled_price(2000, 1.5, 3, 1.0), 6750);
    }

    #[test]
    fn seasonal_background_in_window() {
        let config = GameConfig::classic();
        let mut s = PlayerState::new();
        s.points = 10_000;
        let item = ShopItem::Background("Cherry Blossom Bliss".into());
        let r = purchase(&item, &mut s, &config, day(4, 10)).unwrap();
        assert_eq!(r.price, 500);
        assert!(s.owns_background("Cherry Blossom Bliss"));
    }

    #[test]
    fn seasonal_background_out_of_window() {
        let config = GameConfig::classic();
        let mut s = PlayerState::new();
        s.points = 10_000;
        let before = s.clone();
        let item = ShopItem::Background("Cherry Blossom Bliss".into());
        let err = purchase(&item, &mut s, &config, day(7, 1)).unwrap_err();
        assert!(matches!(err, GameError::OutOfSeason { .. }));
        assert_eq!(s, before);
    }

    #[test]
    fn event_window_excludes_end_day() {
        let window = backgrounds(GameVersion::Classic)
            .iter()
            .find(|b| b.id == "Halloween Haunt")
            .unwrap()
            .window;
        assert!(!window.contains(day(10, 14)));
        assert!(window.contains(day(10, 15)));
        assert!(window.contains(day(10, 30)));
        assert!(!window.contains(day(10, 31)));
    }

    #[test]
    fn winter_window_wraps_the_year() {
        let window = backgrounds(GameVersion::Classic)
            .iter()
            .find(|b| b.id == "Snowy Cabin")
            .unwrap()
            .window;
        assert!(window.contains(day(12, 20)));
        assert!(window.contains(day(1, 3)));
        assert!(!window.contains(day(3, 1)));
    }

    #[test]
    fn permanent_cosmetics_always_on_sale() {
        for def in backgrounds(GameVersion::Staged) {
            assert!(on_sale(def, day(2, 29)));
        }
    }

    proptest! {
        #[test]
        fn price_curve_increasing(n in 0u32..20) {
            for base in [100u64, 200, 250, 400, 500, 2000] {
                prop_assert!(scaled_price(base, 1.5, n + 1, 1.0) > scaled_price(base, 1.5, n, 1.0));
            }
        }
    }
}
