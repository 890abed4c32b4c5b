use super::{FormulaError, ScriptError};
use crate::combat::{DamageSpec, FormulaHandle, FormulaKind, ScriptHandle};
use crate::state::{Combatant, EntityId, Position};

/// External min/max provider behind `FormulaDescriptor::ExternalCallback`.
///
/// For weapon-kind providers the pipeline fills the secondary component from
/// the equipped weapon before calling, and the provider may rewrite it.
pub trait FormulaOracle {
    fn min_max(
        &self,
        handle: FormulaHandle,
        kind: FormulaKind,
        caster: &Combatant,
        damage: &mut DamageSpec,
    ) -> Result<(i32, i32), FormulaError>;
}

/// Scripted per-tile and per-target callbacks.
pub trait ScriptOracle {
    fn on_tile(
        &self,
        handle: ScriptHandle,
        caster: Option<EntityId>,
        position: Position,
    ) -> Result<(), ScriptError>;

    fn on_target(
        &self,
        handle: ScriptHandle,
        caster: Option<EntityId>,
        target: EntityId,
    ) -> Result<(), ScriptError>;
}
