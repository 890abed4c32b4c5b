//! Magnitude sampling.
//!
//! Turns a [`FormulaDescriptor`] plus the caster's stats into the initial
//! [`DamageSpec`] of an invocation. Every later stage only adjusts this
//! record.

use super::{CombatParams, CombatType, DamageComponent, DamageSpec, FormulaHandle};
use crate::env::{Env, FormulaError, RngOracle};
use crate::error::CombatError;
use crate::state::{Combatant, EntityId};

// ============================================================================
// Descriptor
// ============================================================================

/// Linear coefficients `(a, b)` for the lower and upper bound.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coefficients {
    pub min_a: f64,
    pub min_b: f64,
    pub max_a: f64,
    pub max_b: f64,
}

impl Coefficients {
    pub fn new(min_a: f64, min_b: f64, max_a: f64, max_b: f64) -> Self {
        Self {
            min_a,
            min_b,
            max_a,
            max_b,
        }
    }
}

/// What an external provider computes values from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum FormulaKind {
    LevelMagic,
    /// The provider sees the equipped weapon in the secondary component.
    Skill,
}

/// How an invocation's magnitude is sampled.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FormulaDescriptor {
    /// Uniform in `[min, max]`, independent of the caster.
    FlatRange { min: f64, max: f64 },
    /// `f = level * 2 + magic_level * 3`, bounds `f * a + b`.
    LevelMagic(Coefficients),
    /// Lower bound `min_b`; upper bound `weapon_attack * max_a + max_b`.
    WeaponSkill(Coefficients),
    ExternalCallback {
        handle: FormulaHandle,
        kind: FormulaKind,
    },
}

// ============================================================================
// Sampling
// ============================================================================

/// Samples the starting damage record of an invocation.
///
/// Resolution order: a flat range always wins; otherwise a caster with
/// intrinsic combat values uses them; otherwise only player casters sample
/// their formula. Anything else yields zero magnitude.
pub fn magnitude(
    formula: Option<&FormulaDescriptor>,
    params: &CombatParams,
    caster: Option<&Combatant>,
    target: Option<EntityId>,
    env: &Env<'_>,
    rng: &mut dyn RngOracle,
) -> DamageSpec {
    let mut damage = DamageSpec::new(params.combat_type, params.origin);

    if let Some(FormulaDescriptor::FlatRange { min, max }) = formula {
        damage.primary.value = rng.range(*min as i32, *max as i32);
        return damage;
    }

    let Some(caster) = caster else {
        return damage;
    };

    if let Some((min, max)) = env.entities().combat_values(caster.id) {
        damage.primary.value = rng.range(min, max);
        return damage;
    }

    if !caster.is_player() {
        return damage;
    }

    match formula {
        Some(FormulaDescriptor::LevelMagic(c)) => {
            let factor = f64::from(caster.level).mul_add(2.0, f64::from(caster.magic_level) * 3.0);
            damage.primary.value = rng.range(
                factor.mul_add(c.min_a, c.min_b) as i32,
                factor.mul_add(c.max_a, c.max_b) as i32,
            );
        }
        Some(FormulaDescriptor::WeaponSkill(c)) => {
            match env.entities().weapon(caster.id, target) {
                Some(weapon) => {
                    let max = f64::from(weapon.attack).mul_add(c.max_a, c.max_b);
                    damage.primary.value = rng.range(c.min_b as i32, max as i32);
                    damage.secondary =
                        DamageComponent::new(weapon.element, weapon.element_damage);
                }
                None => {
                    damage.primary.value = rng.range(c.min_b as i32, c.max_b as i32);
                }
            }
        }
        Some(FormulaDescriptor::ExternalCallback { handle, kind }) => {
            external(*handle, *kind, caster, target, env, rng, &mut damage);
        }
        Some(FormulaDescriptor::FlatRange { .. }) | None => {
            tracing::trace!(caster = %caster.id, "no formula configured; zero magnitude");
        }
    }

    damage
}

fn external(
    handle: FormulaHandle,
    kind: FormulaKind,
    caster: &Combatant,
    target: Option<EntityId>,
    env: &Env<'_>,
    rng: &mut dyn RngOracle,
    damage: &mut DamageSpec,
) {
    if kind == FormulaKind::Skill {
        if let Some(weapon) = env.entities().weapon(caster.id, target) {
            damage.secondary = DamageComponent::new(weapon.element, weapon.element_damage);
        } else {
            damage.secondary = DamageComponent::new(CombatType::None, 0);
        }
    }

    let bounds = env
        .formulas()
        .map_err(FormulaError::from)
        .and_then(|formulas| formulas.min_max(handle, kind, caster, damage));
    match bounds {
        Ok((min, max)) => damage.primary.value = rng.range(min, max),
        Err(err) => {
            tracing::warn!(
                caster = %caster.id,
                handle = handle.0,
                code = err.error_code(),
                error = %err,
                "formula provider failed; zero magnitude"
            );
            damage.primary.value = 0;
        }
    }
}
