//! Damage record carried through the pipeline.

use crate::state::ConditionKind;

// ============================================================================
// Combat Type
// ============================================================================

/// Damage category used for resistances, visuals and condition mapping.
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
pub enum CombatType {
    /// Non-damaging: conditions, dispels and hooks only.
    #[default]
    None,
    Physical,
    Energy,
    Earth,
    Fire,
    LifeDrain,
    ManaDrain,
    Healing,
    Drown,
    Ice,
    Holy,
    Death,
    Arcane,
    Water,
}

impl CombatType {
    /// Damage-over-time condition matching this damage type.
    pub fn condition(self) -> ConditionKind {
        match self {
            CombatType::Fire => ConditionKind::Fire,
            CombatType::Energy => ConditionKind::Energy,
            CombatType::Physical => ConditionKind::Bleeding,
            CombatType::Drown => ConditionKind::Drown,
            CombatType::Earth => ConditionKind::Poison,
            CombatType::Ice => ConditionKind::Freezing,
            CombatType::Holy => ConditionKind::Dazzled,
            CombatType::Death => ConditionKind::Cursed,
            CombatType::Arcane => ConditionKind::Bewitched,
            CombatType::Water => ConditionKind::Splashed,
            CombatType::None
            | CombatType::LifeDrain
            | CombatType::ManaDrain
            | CombatType::Healing => ConditionKind::None,
        }
    }

    /// Damage type dealt by a damage-over-time condition.
    pub fn from_condition(kind: ConditionKind) -> Self {
        match kind {
            ConditionKind::Fire => CombatType::Fire,
            ConditionKind::Energy => CombatType::Energy,
            ConditionKind::Bleeding => CombatType::Physical,
            ConditionKind::Drown => CombatType::Drown,
            ConditionKind::Poison => CombatType::Earth,
            ConditionKind::Freezing => CombatType::Ice,
            ConditionKind::Dazzled => CombatType::Holy,
            ConditionKind::Cursed => CombatType::Death,
            ConditionKind::Bewitched => CombatType::Arcane,
            ConditionKind::Splashed => CombatType::Water,
            _ => CombatType::None,
        }
    }
}

// ============================================================================
// Origin & Block
// ============================================================================

/// Where a damage record came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DamageOrigin {
    #[default]
    None,
    /// Ticked by a condition; never crits or leeches.
    Condition,
    Spell,
    Melee,
    Ranged,
}

/// Dominant defence that reduced a hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BlockType {
    #[default]
    None,
    Defense,
    Armor,
    Immunity,
}

impl BlockType {
    /// Conditions ride along only on unblocked or armor-reduced hits.
    pub fn lets_conditions_through(self) -> bool {
        matches!(self, BlockType::None | BlockType::Armor)
    }
}

// ============================================================================
// Damage Spec
// ============================================================================

/// One typed component of a hit.
///
/// Negative values harm, positive values restore.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageComponent {
    pub kind: CombatType,
    pub value: i32,
}

impl DamageComponent {
    pub fn new(kind: CombatType, value: i32) -> Self {
        Self { kind, value }
    }
}

/// Mutable damage record owned by one invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageSpec {
    pub primary: DamageComponent,
    pub secondary: DamageComponent,
    pub origin: DamageOrigin,
    pub block: BlockType,
    pub critical: bool,
    /// The record itself is a leech restoration and must not leech again.
    pub leeched: bool,
}

impl DamageSpec {
    pub fn new(kind: CombatType, origin: DamageOrigin) -> Self {
        Self {
            primary: DamageComponent::new(kind, 0),
            origin,
            ..Self::default()
        }
    }

    /// Restoration record produced by a successful leech roll.
    pub fn restoration(amount: i32) -> Self {
        Self {
            primary: DamageComponent::new(CombatType::Healing, amount),
            leeched: true,
            ..Self::default()
        }
    }

    pub fn total(&self) -> i32 {
        self.primary.value.saturating_add(self.secondary.value)
    }

    pub fn kind(&self) -> CombatType {
        self.primary.kind
    }

    pub fn is_healing(&self) -> bool {
        self.primary.kind == CombatType::Healing
    }

    /// Adds the same percentage bonus to both components.
    pub fn add_percent(&mut self, percent: f64) {
        self.primary.value += percent_of(self.primary.value, percent);
        self.secondary.value += percent_of(self.secondary.value, percent);
    }

    /// Halves both components, truncating towards zero.
    pub fn halve(&mut self) {
        self.primary.value /= 2;
        self.secondary.value /= 2;
    }
}

/// `round(value * percent%)`.
pub(crate) fn percent_of(value: i32, percent: f64) -> i32 {
    (f64::from(value) * (percent / 100.0)).round() as i32
}
