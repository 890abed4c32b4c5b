/// Global PvP policy of the running world.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WorldType {
    #[default]
    Open,
    /// Player-aligned entities may only fight inside free-for-all cells.
    NoPvp,
    PvpEnforced,
}

/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Players below this level can neither attack nor be attacked by players.
    pub protection_level: u32,
    pub world_type: WorldType,
}

impl CombatConfig {
    // ===== engine constants =====
    /// Floors at or past this layer never hold combat cells.
    pub const MAX_LAYERS: u8 = 16;
    /// Half-width of the area an observer can see.
    pub const MAX_VIEWPORT_X: u32 = 11;
    /// Half-height of the area an observer can see.
    pub const MAX_VIEWPORT_Y: u32 = 11;

    /// Attribute scaling divisor for single-target invocations.
    pub const SINGLE_TARGET_ATTRIBUTE_DIVISOR: f64 = 100.0;
    /// Attribute scaling divisor for area invocations.
    pub const AREA_ATTRIBUTE_DIVISOR: f64 = 230.0;

    /// Extra life leech per additional area target, in percent of the base.
    pub const LIFE_LEECH_EXTRA_PERCENT: f64 = 10.0;
    /// Extra mana leech per additional area target, in percent of the base.
    pub const MANA_LEECH_EXTRA_PERCENT: f64 = 5.0;

    /// Fields younger than this always carry their owner onto the victim.
    pub const FRESH_FIELD_MS: u64 = 5_000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PROTECTION_LEVEL: u32 = 1;

    pub fn new() -> Self {
        Self {
            protection_level: Self::DEFAULT_PROTECTION_LEVEL,
            world_type: WorldType::default(),
        }
    }

    pub fn with_protection_level(mut self, protection_level: u32) -> Self {
        self.protection_level = protection_level;
        self
    }

    pub fn with_world_type(mut self, world_type: WorldType) -> Self {
        self.world_type = world_type;
        self
    }

    pub fn is_no_pvp(&self) -> bool {
        self.world_type == WorldType::NoPvp
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
