use super::{AreaShape, DirectionalAreaSet};
use crate::config::CombatConfig;
use crate::env::WorldOracle;
use crate::state::{Direction, Position, Tile};

/// World cells covered by an invocation from `caster` aimed at `target`.
///
/// Without an area the result is the target cell alone. Cells on or past
/// [`CombatConfig::MAX_LAYERS`] never hold combat, so the result is empty.
pub fn affected_tiles(
    world: &dyn WorldOracle,
    caster: Position,
    target: Position,
    area: Option<&DirectionalAreaSet>,
) -> Vec<Tile> {
    if target.z >= CombatConfig::MAX_LAYERS {
        return Vec::new();
    }

    match area {
        Some(area) => enumerate(
            world,
            area.select(caster, target),
            target,
            Direction::towards(target, caster),
        ),
        None => vec![world.tile_or_create(target)],
    }
}

/// Overlays `shape` with its anchor on `target`.
///
/// Sight lines are traced from the cell one step from `target` towards the
/// caster. Cells come back in row-major order, which later doubles as the
/// target processing order.
pub fn enumerate(
    world: &dyn WorldOracle,
    shape: &AreaShape,
    target: Position,
    toward_caster: Option<Direction>,
) -> Vec<Tile> {
    let sight_origin = toward_caster.map_or(target, |direction| target.step(direction));
    let anchor = shape.anchor();

    shape
        .affected_cells()
        .map(|cell| {
            Position::new(
                target.x + cell.col as i32 - anchor.col as i32,
                target.y + cell.row as i32 - anchor.row as i32,
                target.z,
            )
        })
        .filter(|&position| world.is_sight_clear(sight_origin, position, true))
        .map(|position| world.tile_or_create(position))
        .collect()
}
