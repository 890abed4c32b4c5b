mod common;

use std::sync::Arc;

use combat_core::area::affected_tiles;
use combat_core::{
    AreaDefinition, AreaShape, AreaTemplate, Combat, CombatConfig, CombatParams, CombatType,
    Combatant, DirectionalAreaSet, EffectId, EntityId, GridCell, Position, TileFlags,
};
use common::{Sandbox, at, at_position};

/// 3x3 grid, anchor in the centre, one extra cell directly north of it.
fn north_spike() -> AreaShape {
    AreaShape::from_codes(&[0, 1, 0, 0, 3, 0, 0, 0, 0], 3).expect("valid grid")
}

/// A spell aimed east lands its spike east of the target.
#[test]
fn east_selection_rotates_spike_clockwise() {
    let set = DirectionalAreaSet::new(north_spike());
    let caster = at(0, 5);
    let target = at(5, 5);

    let shape = set.select(caster, target);
    assert_eq!(shape.anchor(), GridCell::new(1, 1));
    assert!(shape.is_affected(1, 2), "spike must sit east of the anchor");
    assert!(!shape.is_affected(0, 1), "north cell must be gone");

    let sandbox = Sandbox::new();
    let tiles = affected_tiles(&sandbox, caster, target, Some(&set));
    let positions: Vec<Position> = tiles.iter().map(|tile| tile.position).collect();
    assert_eq!(positions, vec![at(5, 5), at(6, 5)]);
}

#[test]
fn every_direction_of_a_plain_set_is_selectable() {
    let set = DirectionalAreaSet::new(north_spike());
    let target = at(0, 0);
    for dx in -1..=1 {
        for dy in -1..=1 {
            let caster = at(-dx, -dy);
            assert!(set.try_select(caster, target).is_ok(), "dx={dx} dy={dy}");
        }
    }
}

#[test]
fn extended_set_uses_diagonal_shapes() {
    let diagonal = AreaShape::from_codes(&[1, 0, 0, 3], 2).expect("valid diagonal");
    let set = DirectionalAreaSet::new(north_spike()).with_diagonal(diagonal.clone());
    assert!(set.is_extended());

    let target = at(0, 0);
    assert_eq!(set.select(at(1, 1), target), &diagonal);
    assert_eq!(set.select(at(-1, 1), target), &diagonal.mirror());
    assert_eq!(set.select(at(1, -1), target), &diagonal.flip());
    assert_eq!(set.select(at(-1, -1), target), &diagonal.transpose());
}

#[test]
fn enumeration_skips_cells_without_sight() {
    let mut sandbox = Sandbox::new();
    sandbox.blocked_sight.insert(at(5, 4));

    let set = DirectionalAreaSet::new(north_spike());
    let tiles = affected_tiles(&sandbox, at(5, 9), at(5, 5), Some(&set));

    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0].position, at(5, 5));
    assert!(
        !sandbox.created.borrow().contains(&at(5, 4)),
        "blocked cells are never created"
    );
}

/// Caster to the south: sight is traced from the cell just south of the
/// target, not from the target itself.
#[test]
fn enumeration_traces_sight_from_the_step_towards_the_caster() {
    let set = DirectionalAreaSet::new(north_spike());
    let positions = |sandbox: &Sandbox| -> Vec<Position> {
        affected_tiles(sandbox, at(5, 9), at(5, 5), Some(&set))
            .iter()
            .map(|tile| tile.position)
            .collect()
    };

    let mut from_step = Sandbox::new();
    from_step.blocked_lines.insert((at(5, 6), at(5, 4)));
    assert_eq!(positions(&from_step), vec![at(5, 5)]);

    let mut from_target = Sandbox::new();
    from_target.blocked_lines.insert((at(5, 5), at(5, 4)));
    assert_eq!(positions(&from_target), vec![at(5, 4), at(5, 5)]);
}

#[test]
fn enumeration_stops_at_the_layer_limit() {
    let sandbox = Sandbox::new();
    let set = DirectionalAreaSet::new(north_spike());

    let below = Position::new(3, 3, CombatConfig::MAX_LAYERS - 1);
    let past = Position::new(3, 3, CombatConfig::MAX_LAYERS);

    assert!(!affected_tiles(&sandbox, below, below, Some(&set)).is_empty());
    assert!(affected_tiles(&sandbox, past, past, Some(&set)).is_empty());
    assert!(affected_tiles(&sandbox, past, past, None).is_empty());
}

#[test]
fn missing_cells_are_created_on_demand() {
    let sandbox = Sandbox::new().with_tile(at(2, 2), TileFlags::PVP_ZONE);
    let tiles = affected_tiles(&sandbox, at(2, 2), at(2, 2), None);

    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0].flags, TileFlags::PVP_ZONE);
    assert!(sandbox.created.borrow().is_empty());

    affected_tiles(&sandbox, at(2, 2), at(3, 3), None);
    assert_eq!(*sandbox.created.borrow(), vec![at(3, 3)]);
}

#[test]
fn circle_template_covers_every_occupant_in_row_major_order() {
    let area = AreaDefinition::new(AreaTemplate::Circle { radius: 2 })
        .build()
        .expect("radius 2 is valid");

    let sandbox = Sandbox::new()
        .with(Combatant::player(EntityId(1), at(0, 0)))
        .with(Combatant::creature(EntityId(2), at(4, 5)))
        .with(Combatant::creature(EntityId(3), at(5, 4)))
        .with(Combatant::creature(EntityId(4), at(9, 9)));

    let combat = Combat::new(CombatParams::new(CombatType::Fire).with_impact(EffectId(5)))
        .with_area(Arc::new(area));
    let config = CombatConfig::default();
    let (report, sink) = at_position(&combat, &sandbox, &config, None, at(5, 5), 1);

    let order: Vec<EntityId> = report.targets.iter().map(|outcome| outcome.target).collect();
    assert_eq!(order, vec![EntityId(3), EntityId(2)]);
    assert_eq!(sink.effects(EffectId(5)).len(), 5, "one impact per covered cell");
}
