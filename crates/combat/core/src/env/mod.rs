//! Traits describing the world the combat engine runs against.
//!
//! Oracles expose cells, entity snapshots, host rules, mitigation and
//! scripted hooks. The [`Env`] aggregate bundles the read-only ones so the
//! authorization engine and the pipeline can reach everything they need
//! without coupling to concrete implementations. Mutation goes through
//! [`CombatSink`], randomness through [`RngOracle`].
mod entities;
mod error;
mod hooks;
mod rng;
mod rules;
mod sink;
mod world;

pub use entities::{EntityOracle, WeaponProfile};
pub use error::{ApplyError, FormulaError, OracleError, ScriptError};
pub use hooks::{FormulaOracle, ScriptOracle};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use rules::{BlockRules, MitigationOracle, RulesOracle};
pub use sink::{CombatSink, DispelScope, ItemRef};
pub use world::WorldOracle;

use crate::config::CombatConfig;
use crate::state::{Combatant, EntityId, Position, TileFlags, Zone};

/// Aggregates read-only oracles required by authorization and the pipeline.
///
/// Formula and script oracles are optional: spells that never reference an
/// external callback or script run without them.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    world: &'a dyn WorldOracle,
    entities: &'a dyn EntityOracle,
    rules: &'a dyn RulesOracle,
    mitigation: &'a dyn MitigationOracle,
    formulas: Option<&'a dyn FormulaOracle>,
    scripts: Option<&'a dyn ScriptOracle>,
    config: &'a CombatConfig,
}

impl<'a> Env<'a> {
    pub fn new(
        world: &'a dyn WorldOracle,
        entities: &'a dyn EntityOracle,
        rules: &'a dyn RulesOracle,
        mitigation: &'a dyn MitigationOracle,
        config: &'a CombatConfig,
    ) -> Self {
        Self {
            world,
            entities,
            rules,
            mitigation,
            formulas: None,
            scripts: None,
            config,
        }
    }

    pub fn with_formulas(mut self, formulas: &'a dyn FormulaOracle) -> Self {
        self.formulas = Some(formulas);
        self
    }

    pub fn with_scripts(mut self, scripts: &'a dyn ScriptOracle) -> Self {
        self.scripts = Some(scripts);
        self
    }

    pub fn world(&self) -> &'a dyn WorldOracle {
        self.world
    }

    pub fn entities(&self) -> &'a dyn EntityOracle {
        self.entities
    }

    pub fn rules(&self) -> &'a dyn RulesOracle {
        self.rules
    }

    pub fn mitigation(&self) -> &'a dyn MitigationOracle {
        self.mitigation
    }

    pub fn config(&self) -> &'a CombatConfig {
        self.config
    }

    /// Returns the FormulaOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::FormulasNotAvailable` if none was provided.
    pub fn formulas(&self) -> Result<&'a dyn FormulaOracle, OracleError> {
        self.formulas.ok_or(OracleError::FormulasNotAvailable)
    }

    /// Returns the ScriptOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ScriptsNotAvailable` if none was provided.
    pub fn scripts(&self) -> Result<&'a dyn ScriptOracle, OracleError> {
        self.scripts.ok_or(OracleError::ScriptsNotAvailable)
    }

    // ========================================================================
    // Convenience lookups
    // ========================================================================

    pub fn combatant(&self, id: EntityId) -> Option<Combatant> {
        self.entities.combatant(id)
    }

    pub fn tile_flags(&self, position: Position) -> TileFlags {
        self.world.tile_or_create(position).flags
    }

    pub fn zone_of(&self, combatant: &Combatant) -> Zone {
        self.tile_flags(combatant.position).zone()
    }

    /// Owner of a summon, resolved to a live snapshot.
    pub fn owner_of(&self, combatant: &Combatant) -> Option<Combatant> {
        combatant.owner().and_then(|owner| self.entities.combatant(owner))
    }
}
