//! Authorization engine: who may harm whom, and where.
//!
//! Every check is pure and returns a [`Verdict`]. Checks run in a fixed
//! order and the first failing one decides the outcome. The host's
//! [`crate::env::RulesOracle`] only gets asked once every built-in rule
//! has passed.
mod engage;
mod relations;
mod target;

pub use engage::{can_engage, can_engage_tile};
pub use relations::{in_free_for_all, is_player_aligned, is_protected};
pub use target::can_target;

/// Outcome of an authorization check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    #[strum(to_string = "Allowed.")]
    Allowed,
    #[strum(to_string = "This action is not permitted in a protection zone.")]
    NotPermittedInProtectionZone,
    #[strum(to_string = "This action is not permitted in a non-pvp zone.")]
    NotPermittedInNoPvpZone,
    #[strum(to_string = "You may not attack a person in a protection zone.")]
    CannotAttackPersonInProtectionZone,
    #[strum(to_string = "You may not attack this person.")]
    CannotAttackPlayer,
    #[strum(to_string = "You may not attack this creature.")]
    CannotAttackCreature,
    #[strum(to_string = "Turn secure mode off if you really want to attack unmarked players.")]
    TurnSecureModeOff,
    #[strum(to_string = "There is not enough room.")]
    NotEnoughRoom,
    #[strum(to_string = "First go downstairs.")]
    FirstGoDownstairs,
    #[strum(to_string = "First go upstairs.")]
    FirstGoUpstairs,
    /// Refused by the host's rule hook.
    #[strum(to_string = "Sorry, not possible.")]
    NotPossible,
}

impl Verdict {
    pub fn is_allowed(self) -> bool {
        matches!(self, Verdict::Allowed)
    }
}
