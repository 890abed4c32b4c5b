use super::{Verdict, in_free_for_all, is_player_aligned, is_protected};
use crate::env::Env;
use crate::state::{ActorFlags, Combatant, Role, Tile, TileFlags, Zone};

/// Whether `attacker` may harm `target` right now.
///
/// `attacker` is `None` for environmental sources, which only answer to the
/// host's rule hook.
pub fn can_engage(env: &Env<'_>, attacker: Option<&Combatant>, target: &Combatant) -> Verdict {
    let Some(attacker) = attacker else {
        return env.rules().on_target_combat(None, target);
    };

    let verdict = match target.role {
        Role::Player => player_target(env, attacker, target),
        Role::Creature | Role::Summon { .. } => creature_target(env, attacker, target),
    };
    if !verdict.is_allowed() {
        return verdict;
    }

    if env.config().is_no_pvp() && is_player_aligned(env, attacker) {
        let target_is_player_summon = env
            .owner_of(target)
            .is_some_and(|owner| owner.is_player());

        if target.is_player() && !in_free_for_all(env, attacker, target) {
            return Verdict::CannotAttackPlayer;
        }
        if target_is_player_summon && !in_free_for_all(env, attacker, target) {
            return Verdict::CannotAttackCreature;
        }
    }

    env.rules().on_target_combat(Some(attacker), target)
}

fn player_target(env: &Env<'_>, attacker: &Combatant, target: &Combatant) -> Verdict {
    if target.has_flag(ActorFlags::CANNOT_BE_ATTACKED) {
        return Verdict::CannotAttackPlayer;
    }

    let target_flags = env.tile_flags(target.position);

    if attacker.is_player() {
        if attacker.has_flag(ActorFlags::CANNOT_ATTACK_PLAYER) {
            return Verdict::CannotAttackPlayer;
        }
        if is_protected(env, attacker, target) {
            return Verdict::CannotAttackPlayer;
        }

        if target_flags.contains(TileFlags::NO_PVP_ZONE) {
            return Verdict::NotPermittedInNoPvpZone;
        }
        let attacker_flags = env.tile_flags(attacker.position);
        if attacker_flags.contains(TileFlags::NO_PVP_ZONE)
            && !target_flags.intersects(TileFlags::NO_PVP_ZONE | TileFlags::PROTECTION_ZONE)
        {
            return Verdict::NotPermittedInNoPvpZone;
        }
    }

    if let Some(owner) = env.owner_of(attacker).filter(|owner| owner.is_player()) {
        if owner.has_flag(ActorFlags::CANNOT_ATTACK_PLAYER) {
            return Verdict::CannotAttackPlayer;
        }
        if target_flags.contains(TileFlags::NO_PVP_ZONE) {
            return Verdict::NotPermittedInNoPvpZone;
        }
        if is_protected(env, &owner, target) {
            return Verdict::CannotAttackPlayer;
        }
    }

    Verdict::Allowed
}

fn creature_target(env: &Env<'_>, attacker: &Combatant, target: &Combatant) -> Verdict {
    let target_owner_is_player = env
        .owner_of(target)
        .is_some_and(|owner| owner.is_player());

    if attacker.is_player() {
        if attacker.has_flag(ActorFlags::CANNOT_ATTACK_MONSTER) {
            return Verdict::CannotAttackCreature;
        }
        if target_owner_is_player && env.zone_of(target) == Zone::NoPvp {
            return Verdict::NotPermittedInNoPvpZone;
        }
    } else if !target_owner_is_player {
        let attacker_owner_is_player = env
            .owner_of(attacker)
            .is_some_and(|owner| owner.is_player());
        if !attacker_owner_is_player {
            return Verdict::CannotAttackCreature;
        }
    }

    Verdict::Allowed
}

/// Whether an area effect from `caster` may land on `tile`.
pub fn can_engage_tile(
    env: &Env<'_>,
    caster: Option<&Combatant>,
    tile: &Tile,
    aggressive: bool,
) -> Verdict {
    if tile.flags.blocks_area_effects() {
        return Verdict::NotEnoughRoom;
    }

    if let Some(caster) = caster {
        if caster.position.z < tile.position.z {
            return Verdict::FirstGoDownstairs;
        }
        if caster.position.z > tile.position.z {
            return Verdict::FirstGoUpstairs;
        }
        if caster.is_player() && caster.has_flag(ActorFlags::IGNORE_PROTECTION_ZONE) {
            return Verdict::Allowed;
        }
    }

    if aggressive && tile.flags.contains(TileFlags::PROTECTION_ZONE) {
        return Verdict::NotPermittedInProtectionZone;
    }

    env.rules().on_area_combat(caster, tile, aggressive)
}
