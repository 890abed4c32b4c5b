//! Numeric stages shared by the single-target and area paths.
//!
//! Each stage is a small pure function over a [`DamageSpec`]; the pipeline
//! decides when and how often it runs.

use super::{CombatType, DamageComponent, DamageOrigin, DamageSpec, EffectId};
use super::damage::percent_of;
use crate::config::CombatConfig;
use crate::env::RngOracle;
use crate::state::{Combatant, HostileMarker, ResourceMeter};

// ============================================================================
// Attribute scaling
// ============================================================================

/// Scales both components by the caster's attributes.
///
/// Physical components use strength, every other type intelligence. The
/// attribute is read as a percentage of `divisor`.
pub fn scale_by_attributes(damage: &mut DamageSpec, caster: &Combatant, divisor: f64) {
    scale_component(&mut damage.primary, caster, divisor);
    scale_component(&mut damage.secondary, caster, divisor);
}

fn scale_component(component: &mut DamageComponent, caster: &Combatant, divisor: f64) {
    let attribute = if component.kind == CombatType::Physical {
        caster.strength
    } else {
        caster.intelligence
    };
    if attribute == 0 {
        return;
    }
    let bonus = (f64::from(component.value) * (f64::from(attribute) / divisor)).round();
    component.value += bonus as i32;
}

// ============================================================================
// PvP softening
// ============================================================================

/// Whether a hit between these two is halved as player-versus-player.
pub fn softens(caster: &Combatant, target: &Combatant, damage: &DamageSpec) -> bool {
    caster.is_player()
        && target.is_player()
        && caster.id != target.id
        && target.marker != HostileMarker::WORST
        && !damage.is_healing()
}

// ============================================================================
// Critical
// ============================================================================

/// Flat bonus granted by a successful critical roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CriticalBonus {
    pub primary: i32,
    pub secondary: i32,
}

impl CriticalBonus {
    /// Adds the bonus to `damage`, halving it first when the hit was softened.
    pub fn apply(self, damage: &mut DamageSpec, softened: bool) {
        let (primary, secondary) = if softened {
            (self.primary / 2, self.secondary / 2)
        } else {
            (self.primary, self.secondary)
        };
        damage.primary.value += primary;
        damage.secondary.value += secondary;
        damage.critical = true;
    }

    pub fn effect() -> EffectId {
        EffectId::CRITICAL_DAMAGE
    }
}

/// Rolls the caster's critical rating against `damage`.
///
/// Consumes one d100 only when the record is eligible and both ratings are
/// non-zero.
pub fn roll_critical(
    damage: &DamageSpec,
    caster: &Combatant,
    rng: &mut dyn RngOracle,
) -> Option<CriticalBonus> {
    if damage.critical || damage.is_healing() || damage.origin == DamageOrigin::Condition {
        return None;
    }
    let chance = caster.skills.critical_chance;
    let amount = f64::from(caster.skills.critical_amount);
    if chance == 0 || amount == 0.0 || rng.roll_d100() > u32::from(chance) {
        return None;
    }
    Some(CriticalBonus {
        primary: percent_of(damage.primary.value, amount),
        secondary: percent_of(damage.secondary.value, amount),
    })
}

// ============================================================================
// Leech
// ============================================================================

/// Which resource a leech restores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum LeechKind {
    Life,
    Mana,
}

impl LeechKind {
    pub const ALL: [LeechKind; 2] = [LeechKind::Life, LeechKind::Mana];

    /// Bonus per additional area target, in percent of the base leech.
    pub fn extra_percent(self) -> f64 {
        match self {
            LeechKind::Life => CombatConfig::LIFE_LEECH_EXTRA_PERCENT,
            LeechKind::Mana => CombatConfig::MANA_LEECH_EXTRA_PERCENT,
        }
    }

    pub fn effect(self) -> EffectId {
        match self {
            LeechKind::Life => EffectId::MAGIC_RED,
            LeechKind::Mana => EffectId::MAGIC_BLUE,
        }
    }

    /// `(chance, amount)` ratings of `caster` for this resource.
    pub fn ratings(self, caster: &Combatant) -> (u16, u16) {
        match self {
            LeechKind::Life => (caster.skills.life_leech_chance, caster.skills.life_leech_amount),
            LeechKind::Mana => (caster.skills.mana_leech_chance, caster.skills.mana_leech_amount),
        }
    }

    pub fn meter(self, caster: &Combatant) -> ResourceMeter {
        match self {
            LeechKind::Life => caster.health,
            LeechKind::Mana => caster.mana,
        }
    }
}

/// Whether a hit described by `damage` may leech at all.
pub fn can_leech(damage: &DamageSpec) -> bool {
    !damage.leeched && !damage.is_healing() && damage.origin != DamageOrigin::Condition
}

/// Rolls `kind` for `caster` and returns the restoration amount on success.
///
/// `magnitude` is the largest absolute combined hit, `hits` how many targets
/// were damaged. A single hit yields `round(magnitude * amount%)`; every
/// further hit adds the kind's extra percentage of that base.
pub fn roll_leech(
    kind: LeechKind,
    caster: &Combatant,
    magnitude: i32,
    hits: u32,
    rng: &mut dyn RngOracle,
) -> Option<i32> {
    if kind.meter(caster).is_full() {
        return None;
    }
    let (chance, amount) = kind.ratings(caster);
    if chance == 0 || amount == 0 || rng.roll_d100() > u32::from(chance) {
        return None;
    }
    let value = leech_amount(magnitude, hits, amount, kind.extra_percent());
    (value > 0).then_some(value)
}

/// `round(base + base * extra% * (hits - 1))` with `base = magnitude * amount%`.
pub fn leech_amount(magnitude: i32, hits: u32, amount: u16, extra_percent: f64) -> i32 {
    let base = f64::from(magnitude) * (f64::from(amount) / 100.0);
    let extras = base * (extra_percent / 100.0) * f64::from(hits.saturating_sub(1));
    (base + extras).round() as i32
}
