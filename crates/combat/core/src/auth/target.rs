use super::{Verdict, can_engage, in_free_for_all, is_player_aligned, is_protected};
use crate::env::Env;
use crate::state::{ActorFlags, Combatant, HostileMarker, Zone};

/// Whether `attacker` may pick `target` as its current target.
///
/// Stricter than [`can_engage`]: adds self-targeting, zone and secure-mode
/// checks before delegating to it.
pub fn can_target(env: &Env<'_>, attacker: &Combatant, target: &Combatant) -> Verdict {
    if attacker.id == target.id && !attacker.has_flag(ActorFlags::MAY_TARGET_SELF) {
        return Verdict::CannotAttackPlayer;
    }

    if !attacker.has_flag(ActorFlags::IGNORE_PROTECTION_ZONE) {
        let attacker_zone = env.zone_of(attacker);
        let target_zone = env.zone_of(target);

        if attacker_zone == Zone::Protection || target_zone == Zone::Protection {
            return Verdict::NotPermittedInProtectionZone;
        }

        if is_player_aligned(env, target) {
            if attacker_zone == Zone::NoPvp {
                return Verdict::NotPermittedInNoPvpZone;
            }
            if target_zone == Zone::NoPvp {
                return Verdict::CannotAttackPersonInProtectionZone;
            }
        }
    }

    if attacker.has_flag(ActorFlags::CANNOT_USE_COMBAT) || !target.attackable {
        return if target.is_player() {
            Verdict::CannotAttackPlayer
        } else {
            Verdict::CannotAttackCreature
        };
    }

    if target.is_player() {
        if is_protected(env, attacker, target) {
            return Verdict::CannotAttackPlayer;
        }

        if attacker.secure_mode
            && !in_free_for_all(env, attacker, target)
            && env.entities().marker_towards(attacker.id, target.id) == HostileMarker::None
        {
            return Verdict::TurnSecureModeOff;
        }
    }

    can_engage(env, Some(attacker), target)
}
