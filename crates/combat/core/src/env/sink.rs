use super::ApplyError;
use crate::combat::{DamageSpec, EffectId, HazardItem, ProjectileId};
use crate::state::{Condition, ConditionKind, EntityId, Position};

/// Handle to an item the world placed on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRef(pub u32);

/// Which instances of a condition a dispel removes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DispelScope {
    Any,
    /// Only instances that were applied by combat.
    CombatOnly,
}

/// Every state mutation the pipeline can request.
///
/// Mutations are synchronous: effects must be visible to later queries made
/// through the oracles during the same invocation.
pub trait CombatSink {
    fn change_health(
        &mut self,
        caster: Option<EntityId>,
        target: EntityId,
        damage: &DamageSpec,
    ) -> Result<(), ApplyError>;

    fn change_mana(
        &mut self,
        caster: Option<EntityId>,
        target: EntityId,
        damage: &DamageSpec,
    ) -> Result<(), ApplyError>;

    fn add_condition(&mut self, target: EntityId, condition: Condition);

    fn remove_condition(&mut self, target: EntityId, kind: ConditionKind, scope: DispelScope);

    fn place_item(
        &mut self,
        position: Position,
        item: HazardItem,
        owner: Option<EntityId>,
    ) -> Result<ItemRef, ApplyError>;

    fn remove_item(&mut self, item: ItemRef);

    fn start_decay(&mut self, item: ItemRef);

    /// Refreshes the in-fight status of a player.
    fn mark_in_fight(&mut self, player: EntityId);

    /// Shows an effect at `position`; `observers` of `None` lets the world
    /// pick the default audience.
    fn magic_effect(
        &mut self,
        observers: Option<&[EntityId]>,
        position: Position,
        effect: EffectId,
    );

    fn distance_effect(&mut self, from: Position, to: Position, effect: ProjectileId);
}
