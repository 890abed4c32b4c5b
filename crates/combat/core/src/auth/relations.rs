use crate::env::Env;
use crate::state::{Combatant, HostileMarker, Zone};

/// Players and summons owned by players.
pub fn is_player_aligned(env: &Env<'_>, combatant: &Combatant) -> bool {
    combatant.is_player()
        || env
            .owner_of(combatant)
            .is_some_and(|owner| owner.is_player())
}

/// Both parties stand in free-for-all cells.
pub fn in_free_for_all(env: &Env<'_>, attacker: &Combatant, target: &Combatant) -> bool {
    env.zone_of(attacker) == Zone::Pvp && env.zone_of(target) == Zone::Pvp
}

/// Whether PvP between two players is off-limits regardless of zone.
pub fn is_protected(env: &Env<'_>, attacker: &Combatant, target: &Combatant) -> bool {
    let protection_level = env.config().protection_level;
    if attacker.level < protection_level || target.level < protection_level {
        return true;
    }

    if !attacker.allows_pvp || !target.allows_pvp {
        return true;
    }

    attacker.marker == HostileMarker::WORST
        && env.entities().marker_towards(attacker.id, target.id) == HostileMarker::None
}
