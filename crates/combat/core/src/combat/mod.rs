//! Damage pipeline.
//!
//! Resolves one spell or attack invocation at a time, for a single target or
//! for every authorized occupant of an area.
//!
//! # Stages
//!
//! - **Magnitude**: sample the starting record from a [`FormulaDescriptor`]
//! - **Scaling**: caster attributes, full rate for single targets and a
//!   reduced rate for areas
//! - **Softening**: player-versus-player hits are halved
//! - **Mitigation**: delegated to [`crate::env::MitigationOracle`]
//! - **Critical**: one roll per invocation
//! - **Apply**: health or mana delta through [`crate::env::CombatSink`]
//! - **Conditions & dispel**: only on unblocked or armor-reduced hits
//! - **Leech**: immediate for single targets, deferred for areas

mod damage;
mod formula;
mod hazard;
mod params;
mod pipeline;
mod report;
mod stages;
mod targeting;

pub use damage::{BlockType, CombatType, DamageComponent, DamageOrigin, DamageSpec};
pub use formula::{Coefficients, FormulaDescriptor, FormulaKind, magnitude};
pub use hazard::{
    FieldItem, FieldKind, FieldVariant, HazardItem, PlacedField, StepInOutcome, step_in_field,
};
pub use params::{
    CombatParams, EffectId, FormulaHandle, ProjectileEffect, ProjectileId, ScriptHandle,
};
pub use pipeline::{Combat, CombatContext};
pub use report::{CombatReport, HitStatus, LeechOutcome, TargetOutcome};
pub use stages::{
    CriticalBonus, LeechKind, can_leech, leech_amount, roll_critical, roll_leech,
    scale_by_attributes, softens,
};
pub use targeting::TargetingMode;
