//! Items left behind on affected cells and what happens when someone steps
//! into them.

use crate::auth::{is_player_aligned, is_protected};
use crate::config::CombatConfig;
use crate::env::{CombatSink, Env, ItemRef};
use crate::error::CombatError;
use crate::state::{Combatant, EntityId, Position, Tile, TileFlags};

// ============================================================================
// Field items
// ============================================================================

/// Family of a magic field.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum FieldKind {
    FireFull,
    FireMedium,
    FireSmall,
    Energy,
    Poison,
    MagicWall,
    WildGrowth,
}

impl FieldKind {
    pub fn is_wall(self) -> bool {
        matches!(self, FieldKind::MagicWall | FieldKind::WildGrowth)
    }

    fn has_no_pvp_variant(self) -> bool {
        !matches!(self, FieldKind::FireMedium | FieldKind::FireSmall)
    }

    fn marks_in_fight(self) -> bool {
        matches!(self, FieldKind::FireFull | FieldKind::Energy | FieldKind::Poison)
    }
}

/// Which rule set a placed field follows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum FieldVariant {
    /// Template form used in spell definitions; never placed as-is.
    #[default]
    Persistent,
    Standard,
    /// Harmless to other players; only removed in no-PvP contexts.
    NoPvp,
    /// Wall variant any non-ghost removes on contact.
    Safe,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldItem {
    pub kind: FieldKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub variant: FieldVariant,
}

impl FieldItem {
    pub fn new(kind: FieldKind, variant: FieldVariant) -> Self {
        Self { kind, variant }
    }

    pub fn persistent(kind: FieldKind) -> Self {
        Self::new(kind, FieldVariant::Persistent)
    }

    /// Concrete field to place for a caster.
    ///
    /// Persistent templates become standard fields. Player-aligned casters
    /// get the no-PvP variant when `no_pvp` holds and one exists.
    pub fn for_placement(self, player_aligned: bool, no_pvp: bool) -> Self {
        let mut placed = self;
        if placed.variant == FieldVariant::Persistent {
            placed.variant = FieldVariant::Standard;
        }
        if player_aligned
            && no_pvp
            && placed.variant == FieldVariant::Standard
            && placed.kind.has_no_pvp_variant()
        {
            placed.variant = FieldVariant::NoPvp;
        }
        placed
    }

    /// Placing this field keeps the player-aligned placer in fight.
    pub fn marks_in_fight(self) -> bool {
        self.variant == FieldVariant::Standard && self.kind.marks_in_fight()
    }
}

/// Item a combat invocation places on every affected cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HazardItem {
    Field(FieldItem),
    /// Any other item, placed untranslated.
    Item(u16),
}

// ============================================================================
// Placement
// ============================================================================

/// Places `hazard` on `tile` on behalf of `caster` and starts its decay.
///
/// Returns the placed item, or `None` when the cell refused it.
pub(crate) fn place_hazard(
    hazard: HazardItem,
    caster: Option<&Combatant>,
    tile: &Tile,
    env: &Env<'_>,
    sink: &mut dyn CombatSink,
) -> Option<ItemRef> {
    let aligned_player = caster.and_then(|caster| aligned_player(env, caster));
    let no_pvp = env.config().is_no_pvp() || tile.flags.contains(TileFlags::NO_PVP_ZONE);

    let item = match hazard {
        HazardItem::Field(field) => {
            let placed = field.for_placement(aligned_player.is_some(), no_pvp);
            if let Some(player) = aligned_player
                && !no_pvp
                && placed.marks_in_fight()
            {
                sink.mark_in_fight(player);
            }
            HazardItem::Field(placed)
        }
        HazardItem::Item(_) => hazard,
    };

    match sink.place_item(tile.position, item, caster.map(|caster| caster.id)) {
        Ok(placed) => {
            sink.start_decay(placed);
            Some(placed)
        }
        Err(err) => {
            tracing::debug!(
                position = %tile.position,
                code = err.error_code(),
                error = %err,
                "hazard not placed"
            );
            None
        }
    }
}

/// The player behind a caster: itself, or the player owning a summon.
fn aligned_player(env: &Env<'_>, caster: &Combatant) -> Option<EntityId> {
    if caster.is_player() {
        return Some(caster.id);
    }
    env.owner_of(caster)
        .filter(|owner| owner.is_player())
        .map(|owner| owner.id)
}

// ============================================================================
// Step-in
// ============================================================================

/// A field as it currently lies in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedField {
    pub item: ItemRef,
    pub field: FieldItem,
    pub owner: Option<EntityId>,
    pub position: Position,
    /// Milliseconds since the field was created.
    pub age_ms: u64,
    /// The item blocks movement regardless of its kind.
    pub blocking: bool,
}

/// What stepping into a field did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepInOutcome {
    /// The field was removed.
    Removed,
    /// The field stays and does nothing to this creature.
    Kept,
    /// The field's condition was attached, tagged with `owner` if any.
    Conditioned { owner: Option<EntityId> },
}

/// Resolves `creature` entering `field`.
pub fn step_in_field(
    env: &Env<'_>,
    sink: &mut dyn CombatSink,
    field: &PlacedField,
    creature: &Combatant,
) -> StepInOutcome {
    let item = field.field;
    let no_pvp_context = env.config().is_no_pvp()
        || env.tile_flags(field.position).contains(TileFlags::NO_PVP_ZONE);

    if field.blocking
        || (item.kind.is_wall()
            && matches!(item.variant, FieldVariant::Standard | FieldVariant::Safe))
    {
        if creature.ghost {
            return StepInOutcome::Kept;
        }
        sink.remove_item(field.item);
        return StepInOutcome::Removed;
    }

    if item.kind.is_wall() && item.variant == FieldVariant::NoPvp {
        if no_pvp_context {
            sink.remove_item(field.item);
            return StepInOutcome::Removed;
        }
        return StepInOutcome::Kept;
    }

    let Some(condition) = env.world().field_condition(item) else {
        return StepInOutcome::Kept;
    };

    let mut owner = None;
    if let Some(owner_id) = field.owner {
        let owner_snapshot = env.combatant(owner_id);
        let mut harmful = true;

        if no_pvp_context
            && owner_snapshot
                .as_ref()
                .is_some_and(|snapshot| is_player_aligned(env, snapshot))
        {
            harmful = false;
        }

        if creature.is_player()
            && let Some(attacker) = owner_snapshot.as_ref().filter(|s| s.is_player())
            && is_protected(env, attacker, creature)
        {
            harmful = false;
        }

        if !harmful
            || field.age_ms <= CombatConfig::FRESH_FIELD_MS
            || env.entities().has_been_attacked_by(creature.id, owner_id)
        {
            owner = Some(owner_id);
        }
    }

    tracing::trace!(creature = %creature.id, field = %item.kind, ?owner, "field condition");
    sink.add_condition(creature.id, condition.with_owner(owner));
    StepInOutcome::Conditioned { owner }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistent_fields_become_standard() {
        let fire = FieldItem::persistent(FieldKind::FireFull).for_placement(false, true);
        assert_eq!(fire.variant, FieldVariant::Standard);
        assert!(fire.marks_in_fight());
    }

    #[test]
    fn player_casters_get_no_pvp_variant_where_it_exists() {
        let wall = FieldItem::persistent(FieldKind::MagicWall).for_placement(true, true);
        assert_eq!(wall.variant, FieldVariant::NoPvp);

        let small = FieldItem::persistent(FieldKind::FireSmall).for_placement(true, true);
        assert_eq!(small.variant, FieldVariant::Standard);

        let open = FieldItem::persistent(FieldKind::Poison).for_placement(true, false);
        assert_eq!(open.variant, FieldVariant::Standard);
    }

    #[test]
    fn only_standard_damage_fields_mark_in_fight() {
        assert!(!FieldItem::new(FieldKind::Poison, FieldVariant::NoPvp).marks_in_fight());
        assert!(!FieldItem::new(FieldKind::FireMedium, FieldVariant::Standard).marks_in_fight());
        assert!(!FieldItem::new(FieldKind::MagicWall, FieldVariant::Standard).marks_in_fight());
        assert!(FieldItem::new(FieldKind::Energy, FieldVariant::Standard).marks_in_fight());
    }
}
