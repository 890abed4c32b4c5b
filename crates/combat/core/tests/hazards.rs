mod common;

use combat_core::{
    Combat, CombatConfig, CombatParams, CombatType, Combatant, Condition, ConditionKind, EntityId,
    FieldItem, FieldKind, FieldVariant, HazardItem, ItemRef, PlacedField, Position, StepInOutcome,
    TileFlags, WorldType, step_in_field,
};
use common::{Event, Recorder, Sandbox, at, at_position, at_position_with};

const OWNER: EntityId = EntityId(1);
const CELL: Position = Position::new(4, 4, common::FLOOR);

fn fire_field() -> Combat {
    Combat::new(
        CombatParams::new(CombatType::Fire)
            .with_hazard(HazardItem::Field(FieldItem::persistent(FieldKind::FireFull))),
    )
}

fn placed(events: &[Event]) -> Vec<HazardItem> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::PlaceItem { item, .. } => Some(*item),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Placement
// ============================================================================

#[test]
fn player_fire_field_marks_the_caster_in_fight() {
    let config = CombatConfig::default();
    let sandbox = Sandbox::new().with(Combatant::player(OWNER, at(0, 0)));

    let (_, sink) = at_position(&fire_field(), &sandbox, &config, Some(1), CELL, 1);

    assert_eq!(
        sink.events,
        vec![
            Event::InFight(OWNER),
            Event::PlaceItem {
                position: CELL,
                item: HazardItem::Field(FieldItem::new(
                    FieldKind::FireFull,
                    FieldVariant::Standard
                )),
                owner: Some(OWNER),
            },
            Event::Decay(ItemRef(1)),
        ]
    );
}

#[test]
fn no_pvp_contexts_place_the_harmless_variant() {
    let harmless = HazardItem::Field(FieldItem::new(FieldKind::FireFull, FieldVariant::NoPvp));

    let config = CombatConfig::default().with_world_type(WorldType::NoPvp);
    let sandbox = Sandbox::new().with(Combatant::player(OWNER, at(0, 0)));
    let (_, sink) = at_position(&fire_field(), &sandbox, &config, Some(1), CELL, 1);
    assert_eq!(placed(&sink.events), vec![harmless]);
    assert!(!sink.events.contains(&Event::InFight(OWNER)));

    let config = CombatConfig::default();
    let sandbox = Sandbox::new()
        .with(Combatant::player(OWNER, at(0, 0)))
        .with_tile(CELL, TileFlags::NO_PVP_ZONE);
    let (_, sink) = at_position(&fire_field(), &sandbox, &config, Some(1), CELL, 1);
    assert_eq!(placed(&sink.events), vec![harmless]);
    assert!(!sink.events.contains(&Event::InFight(OWNER)));
}

#[test]
fn summons_act_for_their_owner() {
    let config = CombatConfig::default();
    let sandbox = Sandbox::new()
        .with(Combatant::player(OWNER, at(0, 0)))
        .with(Combatant::summon(EntityId(2), OWNER, at(1, 0)));

    let (_, sink) = at_position(&fire_field(), &sandbox, &config, Some(2), CELL, 1);
    assert!(sink.events.contains(&Event::InFight(OWNER)));
    assert!(sink.events.iter().any(|event| matches!(
        event,
        Event::PlaceItem { owner: Some(EntityId(2)), .. }
    )));
}

#[test]
fn wild_creatures_place_standard_fields_quietly() {
    let config = CombatConfig::default().with_world_type(WorldType::NoPvp);
    let sandbox = Sandbox::new().with(Combatant::creature(EntityId(5), at(0, 0)));

    let (_, sink) = at_position(&fire_field(), &sandbox, &config, Some(5), CELL, 1);
    assert_eq!(
        placed(&sink.events),
        vec![HazardItem::Field(FieldItem::new(FieldKind::FireFull, FieldVariant::Standard))]
    );
    assert!(!sink.events.iter().any(|event| matches!(event, Event::InFight(_))));
}

#[test]
fn plain_items_are_placed_untranslated() {
    let config = CombatConfig::default();
    let sandbox = Sandbox::new();
    let params = CombatParams::new(CombatType::Physical).with_hazard(HazardItem::Item(2016));
    let combat = Combat::new(params);

    let (_, sink) = at_position(&combat, &sandbox, &config, None, CELL, 1);
    assert_eq!(placed(&sink.events), vec![HazardItem::Item(2016)]);
    assert!(sink.events.contains(&Event::Decay(ItemRef(1))));
}

#[test]
fn refused_items_never_decay() {
    let config = CombatConfig::default();
    let sandbox = Sandbox::new().with(Combatant::creature(EntityId(5), at(0, 0)));
    let mut sink = Recorder::new();
    sink.refuse_items = true;

    let (_, sink) = at_position_with(&fire_field(), &sandbox, &config, Some(5), CELL, 1, sink);
    assert!(!sink.events.iter().any(|event| matches!(event, Event::Decay(_))));
}

// ============================================================================
// Step-in
// ============================================================================

fn field(
    kind: FieldKind,
    variant: FieldVariant,
    owner: Option<EntityId>,
    age_ms: u64,
) -> PlacedField {
    PlacedField {
        item: ItemRef(42),
        field: FieldItem::new(kind, variant),
        owner,
        position: CELL,
        age_ms,
        blocking: false,
    }
}

fn burning_sandbox() -> Sandbox {
    let mut sandbox = Sandbox::new()
        .with(Combatant::player(OWNER, at(0, 0)).with_level(50, 10))
        .with(Combatant::creature(EntityId(2), CELL))
        .with(Combatant::player(EntityId(3), CELL).with_level(50, 10));
    sandbox
        .field_conditions
        .insert(FieldKind::FireFull, Condition::new(ConditionKind::Fire, 11));
    sandbox
}

fn step(
    sandbox: &Sandbox,
    config: &CombatConfig,
    placed: &PlacedField,
    victim: u32,
) -> (StepInOutcome, Recorder) {
    let mut sink = Recorder::new();
    let outcome = step_in_field(&sandbox.env(config), &mut sink, placed, &sandbox.get(victim));
    (outcome, sink)
}

#[test]
fn walls_give_way_to_anyone_but_ghosts() {
    let config = CombatConfig::default();
    let mut sandbox = burning_sandbox();
    let wall = field(FieldKind::MagicWall, FieldVariant::Standard, Some(OWNER), 10_000);

    let (outcome, sink) = step(&sandbox, &config, &wall, 2);
    assert_eq!(outcome, StepInOutcome::Removed);
    assert_eq!(sink.events, vec![Event::RemoveItem(ItemRef(42))]);

    if let Some(ghost) = sandbox.combatants.get_mut(&EntityId(2)) {
        ghost.ghost = true;
    }
    let (outcome, sink) = step(&sandbox, &config, &wall, 2);
    assert_eq!(outcome, StepInOutcome::Kept);
    assert!(sink.events.is_empty());

    let mut blocking = field(FieldKind::Poison, FieldVariant::Standard, None, 0);
    blocking.blocking = true;
    let (outcome, _) = step(&sandbox, &config, &blocking, 3);
    assert_eq!(outcome, StepInOutcome::Removed);
}

#[test]
fn no_pvp_walls_only_vanish_in_no_pvp_contexts() {
    let sandbox = burning_sandbox();
    let wall = field(FieldKind::WildGrowth, FieldVariant::NoPvp, Some(OWNER), 10_000);

    let (outcome, _) = step(&sandbox, &CombatConfig::default(), &wall, 2);
    assert_eq!(outcome, StepInOutcome::Kept);

    let no_pvp = CombatConfig::default().with_world_type(WorldType::NoPvp);
    let (outcome, sink) = step(&sandbox, &no_pvp, &wall, 2);
    assert_eq!(outcome, StepInOutcome::Removed);
    assert_eq!(sink.events, vec![Event::RemoveItem(ItemRef(42))]);
}

#[test]
fn stale_fields_drop_the_owner_for_unprovoked_victims() {
    let config = CombatConfig::default();
    let sandbox = burning_sandbox();
    let fire = field(FieldKind::FireFull, FieldVariant::Standard, Some(OWNER), 10_000);

    let (outcome, sink) = step(&sandbox, &config, &fire, 2);
    assert_eq!(outcome, StepInOutcome::Conditioned { owner: None });
    let conditions = sink.conditions_on(EntityId(2));
    assert_eq!(conditions.len(), 1);
    assert_eq!(conditions[0].kind, ConditionKind::Fire);
    assert_eq!(conditions[0].owner, None);
}

#[test]
fn fresh_fields_and_grudges_keep_the_owner() {
    let config = CombatConfig::default();
    let mut sandbox = burning_sandbox();

    let fresh = field(FieldKind::FireFull, FieldVariant::Standard, Some(OWNER), 1_000);
    let (outcome, sink) = step(&sandbox, &config, &fresh, 2);
    assert_eq!(outcome, StepInOutcome::Conditioned { owner: Some(OWNER) });
    assert_eq!(sink.conditions_on(EntityId(2))[0].owner, Some(OWNER));

    let stale = field(FieldKind::FireFull, FieldVariant::Standard, Some(OWNER), 10_000);
    sandbox.attacked_by.insert((EntityId(2), OWNER));
    let (outcome, _) = step(&sandbox, &config, &stale, 2);
    assert_eq!(outcome, StepInOutcome::Conditioned { owner: Some(OWNER) });
}

#[test]
fn harmless_fields_keep_the_owner() {
    let stale = field(FieldKind::FireFull, FieldVariant::Standard, Some(OWNER), 10_000);

    let protected = CombatConfig::default().with_protection_level(100);
    let (outcome, _) = step(&burning_sandbox(), &protected, &stale, 3);
    assert_eq!(outcome, StepInOutcome::Conditioned { owner: Some(OWNER) });

    let open = CombatConfig::default();
    let (outcome, _) = step(&burning_sandbox(), &open, &stale, 3);
    assert_eq!(outcome, StepInOutcome::Conditioned { owner: None });

    let no_pvp = CombatConfig::default().with_world_type(WorldType::NoPvp);
    let (outcome, _) = step(&burning_sandbox(), &no_pvp, &stale, 2);
    assert_eq!(outcome, StepInOutcome::Conditioned { owner: Some(OWNER) });
}

#[test]
fn fields_without_a_condition_do_nothing() {
    let config = CombatConfig::default();
    let sandbox = burning_sandbox();
    let energy = field(FieldKind::Energy, FieldVariant::Standard, Some(OWNER), 0);

    let (outcome, sink) = step(&sandbox, &config, &energy, 2);
    assert_eq!(outcome, StepInOutcome::Kept);
    assert!(sink.events.is_empty());
}
