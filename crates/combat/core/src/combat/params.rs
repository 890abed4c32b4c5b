//! Static configuration of one spell or attack.

use super::{CombatType, DamageOrigin, HazardItem, TargetingMode};
use crate::state::{Condition, ConditionKind, WeaponKind};

/// Visual effect shown on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectId(pub u16);

impl EffectId {
    pub const MAGIC_BLUE: Self = Self(13);
    pub const MAGIC_RED: Self = Self(14);
    pub const CRITICAL_DAMAGE: Self = Self(173);
}

/// Visual projectile travelling between two cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectileId(pub u16);

impl ProjectileId {
    pub const WHIRLWIND_SWORD: Self = Self(25);
    pub const WHIRLWIND_AXE: Self = Self(26);
    pub const WHIRLWIND_CLUB: Self = Self(27);

    /// Whirlwind projectile matching a melee weapon.
    pub fn whirlwind(weapon: WeaponKind) -> Option<Self> {
        match weapon {
            WeaponKind::Axe => Some(Self::WHIRLWIND_AXE),
            WeaponKind::Sword => Some(Self::WHIRLWIND_SWORD),
            WeaponKind::Club => Some(Self::WHIRLWIND_CLUB),
            _ => None,
        }
    }
}

/// Projectile shown from the caster towards the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProjectileEffect {
    #[default]
    None,
    Fixed(ProjectileId),
    /// Resolved from the caster's equipped weapon at cast time.
    WeaponType,
}

/// Handle of an external min/max provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormulaHandle(pub u32);

/// Handle of a scripted callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptHandle(pub u32);

/// Declarative flags and side effects of an invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatParams {
    pub combat_type: CombatType,
    pub origin: DamageOrigin,
    pub impact_effect: Option<EffectId>,
    pub distance_effect: ProjectileEffect,
    pub blocked_by_armor: bool,
    pub blocked_by_shield: bool,
    pub targeting: TargetingMode,
    pub aggressive: bool,
    pub ignore_resistances: bool,
    /// Condition removed from every affected target.
    pub dispel: ConditionKind,
    /// Item placed on every affected cell.
    pub hazard: Option<HazardItem>,
    pub conditions: Vec<Condition>,
    pub tile_script: Option<ScriptHandle>,
    pub target_script: Option<ScriptHandle>,
}

impl Default for CombatParams {
    fn default() -> Self {
        Self {
            combat_type: CombatType::None,
            origin: DamageOrigin::Spell,
            impact_effect: None,
            distance_effect: ProjectileEffect::None,
            blocked_by_armor: false,
            blocked_by_shield: false,
            targeting: TargetingMode::AllOccupants,
            aggressive: true,
            ignore_resistances: false,
            dispel: ConditionKind::None,
            hazard: None,
            conditions: Vec::new(),
            tile_script: None,
            target_script: None,
        }
    }
}

impl CombatParams {
    pub fn new(combat_type: CombatType) -> Self {
        Self {
            combat_type,
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, origin: DamageOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_impact(mut self, effect: EffectId) -> Self {
        self.impact_effect = Some(effect);
        self
    }

    pub fn with_distance_effect(mut self, effect: ProjectileEffect) -> Self {
        self.distance_effect = effect;
        self
    }

    pub fn with_blocking(mut self, shield: bool, armor: bool) -> Self {
        self.blocked_by_shield = shield;
        self.blocked_by_armor = armor;
        self
    }

    pub fn with_targeting(mut self, targeting: TargetingMode) -> Self {
        self.targeting = targeting;
        self
    }

    pub fn aggressive(mut self, aggressive: bool) -> Self {
        self.aggressive = aggressive;
        self
    }

    pub fn with_dispel(mut self, dispel: ConditionKind) -> Self {
        self.dispel = dispel;
        self
    }

    pub fn with_hazard(mut self, hazard: HazardItem) -> Self {
        self.hazard = Some(hazard);
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_tile_script(mut self, script: ScriptHandle) -> Self {
        self.tile_script = Some(script);
        self
    }

    pub fn with_target_script(mut self, script: ScriptHandle) -> Self {
        self.target_script = Some(script);
        self
    }
}
