//! Which occupants of an affected cell an area invocation considers.

use crate::env::WorldOracle;
use crate::state::{Combatant, EntityId, Tile};

// ============================================================================
// Targeting Mode
// ============================================================================

/// How an area invocation picks candidates on each cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TargetingMode {
    /// Every occupant of the cell.
    #[default]
    AllOccupants,

    /// At most one occupant per cell: the caster on its own cell, the
    /// topmost occupant anywhere else.
    CasterOrTopmost,
}

impl TargetingMode {
    pub fn is_single_per_tile(self) -> bool {
        matches!(self, TargetingMode::CasterOrTopmost)
    }

    /// Occupants of `tile` eligible under this mode, in stacking order.
    ///
    /// For [`TargetingMode::CasterOrTopmost`] the caller stops after the
    /// first authorized candidate.
    pub fn candidates(
        self,
        world: &dyn WorldOracle,
        caster: Option<&Combatant>,
        tile: &Tile,
    ) -> Vec<EntityId> {
        let occupants = world.occupants(tile.position);
        match self {
            TargetingMode::AllOccupants => occupants,
            TargetingMode::CasterOrTopmost => {
                let own_tile = caster.filter(|caster| caster.position == tile.position);
                let pick = match own_tile {
                    Some(caster) => Some(caster.id),
                    None => world.top_occupant(tile.position),
                };
                occupants
                    .into_iter()
                    .filter(|id| Some(*id) == pick)
                    .collect()
            }
        }
    }
}
