//! Deterministic combat resolution shared by every server process.
//!
//! `combat-core` resolves one attack or spell invocation at a time: it expands
//! a spell's [`area::DirectionalAreaSet`] onto the world, filters the covered
//! entities through the [`auth`] rules, and runs the damage pipeline in
//! [`combat`]. The crate never owns world state. Tiles, entity stats, scripts
//! and state mutation are reached through the oracle traits in [`env`], and all
//! randomness flows through [`env::RngOracle`] so callers can seed it.
pub mod area;
pub mod auth;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod state;

pub use area::{AreaDefinition, AreaError, AreaShape, AreaTemplate, DirectionalAreaSet, GridCell};
pub use auth::{Verdict, can_engage, can_engage_tile, can_target, is_protected};
pub use combat::{
    BlockType, Combat, CombatContext, CombatParams, CombatReport, CombatType, DamageComponent,
    DamageOrigin, DamageSpec, EffectId, FieldItem, FieldKind, FieldVariant, FormulaDescriptor,
    FormulaHandle, FormulaKind, HazardItem, HitStatus, LeechKind, LeechOutcome, PlacedField,
    ProjectileEffect, ProjectileId, ScriptHandle, StepInOutcome, TargetOutcome, TargetingMode,
    step_in_field,
};
pub use config::{CombatConfig, WorldType};
pub use env::{
    ApplyError, BlockRules, CombatSink, DispelScope, EntityOracle, Env, FormulaError, FormulaOracle,
    ItemRef, MitigationOracle, OracleError, PcgRng, RngOracle, RulesOracle, ScriptError,
    ScriptOracle, WeaponProfile, WorldOracle,
};
pub use error::{CombatError, ErrorSeverity};
pub use state::{
    ActorFlags, Combatant, Condition, ConditionKind, Direction, EntityId, HostileMarker, Position,
    ResourceMeter, Role, SpecialSkills, Tile, TileFlags, WeaponKind, Zone,
};
