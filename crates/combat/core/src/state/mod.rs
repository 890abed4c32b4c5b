//! Snapshot types the combat engine reasons about.
//!
//! The engine never owns these: collaborators hand out copies through the
//! oracles in [`crate::env`], and all mutation goes back through
//! [`crate::env::CombatSink`].
mod combatant;
mod common;
mod condition;
mod tile;

pub use combatant::{ActorFlags, Combatant, HostileMarker, Role, SpecialSkills, WeaponKind};
pub use common::{Direction, EntityId, Position, ResourceMeter};
pub use condition::{Condition, ConditionKind};
pub use tile::{Tile, TileFlags, Zone};
