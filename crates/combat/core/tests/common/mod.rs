//! In-memory world and recording sink shared by the integration suites.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use combat_core::{
    ApplyError, BlockRules, BlockType, Combat, CombatConfig, CombatContext, CombatReport,
    CombatSink, Combatant, Condition, ConditionKind, DamageSpec, DispelScope, EffectId, EntityId,
    EntityOracle, Env, FieldItem, FieldKind, FormulaError, FormulaHandle, FormulaKind,
    FormulaOracle, HazardItem, HostileMarker, ItemRef, MitigationOracle, PcgRng, Position,
    ProjectileId, RulesOracle, ScriptError, ScriptHandle, ScriptOracle, Tile, TileFlags, Verdict,
    WeaponProfile, WorldOracle,
};

pub const FLOOR: u8 = 7;

pub fn at(x: i32, y: i32) -> Position {
    Position::new(x, y, FLOOR)
}

/// Routes engine events to the test output. `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Sandbox
// ============================================================================

/// A world backed by plain maps. Every oracle trait is implemented on it.
#[derive(Default)]
pub struct Sandbox {
    pub tiles: HashMap<Position, TileFlags>,
    pub combatants: BTreeMap<EntityId, Combatant>,
    pub markers: HashMap<(EntityId, EntityId), HostileMarker>,
    pub weapons: HashMap<EntityId, WeaponProfile>,
    pub combat_values: HashMap<EntityId, (i32, i32)>,
    pub immunities: HashSet<(EntityId, ConditionKind)>,
    pub attacked_by: HashSet<(EntityId, EntityId)>,
    pub blocked_sight: HashSet<Position>,
    /// Sight lines blocked only between these (from, to) cells.
    pub blocked_lines: HashSet<(Position, Position)>,
    pub negated: HashSet<EntityId>,
    pub block_results: HashMap<EntityId, BlockType>,
    pub denied_targets: HashSet<EntityId>,
    pub denied_cells: HashSet<Position>,
    pub field_conditions: HashMap<FieldKind, Condition>,
    pub formulas: HashMap<FormulaHandle, Result<(i32, i32), FormulaError>>,
    pub failing_scripts: HashSet<ScriptHandle>,
    pub created: RefCell<Vec<Position>>,
    pub script_calls: RefCell<Vec<ScriptCall>>,
    pub block_rules: RefCell<Vec<BlockRules>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptCall {
    Tile(ScriptHandle, Option<EntityId>, Position),
    Target(ScriptHandle, Option<EntityId>, EntityId),
}

impl Sandbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, combatant: Combatant) -> Self {
        self.combatants.insert(combatant.id, combatant);
        self
    }

    pub fn with_tile(mut self, position: Position, flags: TileFlags) -> Self {
        self.tiles.insert(position, flags);
        self
    }

    pub fn with_marker(
        mut self,
        attacker: EntityId,
        target: EntityId,
        marker: HostileMarker,
    ) -> Self {
        self.markers.insert((attacker, target), marker);
        self
    }

    pub fn env<'a>(&'a self, config: &'a CombatConfig) -> Env<'a> {
        Env::new(self, self, self, self, config)
            .with_formulas(self)
            .with_scripts(self)
    }

    pub fn get(&self, id: u32) -> Combatant {
        self.combatants[&EntityId(id)].clone()
    }

    pub fn tile(&self, position: Position) -> Tile {
        self.tile_or_create(position)
    }
}

impl WorldOracle for Sandbox {
    fn tile_or_create(&self, position: Position) -> Tile {
        match self.tiles.get(&position) {
            Some(flags) => Tile::new(position, *flags),
            None => {
                self.created.borrow_mut().push(position);
                Tile::placeholder(position)
            }
        }
    }

    fn is_sight_clear(&self, from: Position, to: Position, _same_floor: bool) -> bool {
        !self.blocked_sight.contains(&to) && !self.blocked_lines.contains(&(from, to))
    }

    fn occupants(&self, position: Position) -> Vec<EntityId> {
        self.combatants
            .values()
            .filter(|combatant| combatant.position == position)
            .map(|combatant| combatant.id)
            .collect()
    }

    fn observers(&self, _center: Position, _range_x: u32, _range_y: u32) -> Vec<EntityId> {
        self.combatants
            .values()
            .filter(|combatant| combatant.is_player())
            .map(|combatant| combatant.id)
            .collect()
    }

    fn field_condition(&self, field: FieldItem) -> Option<Condition> {
        self.field_conditions.get(&field.kind).cloned()
    }
}

impl EntityOracle for Sandbox {
    fn combatant(&self, id: EntityId) -> Option<Combatant> {
        self.combatants.get(&id).cloned()
    }

    fn marker_towards(&self, attacker: EntityId, target: EntityId) -> HostileMarker {
        self.markers
            .get(&(attacker, target))
            .copied()
            .unwrap_or_default()
    }

    fn weapon(&self, id: EntityId, _target: Option<EntityId>) -> Option<WeaponProfile> {
        self.weapons.get(&id).copied()
    }

    fn combat_values(&self, id: EntityId) -> Option<(i32, i32)> {
        self.combat_values.get(&id).copied()
    }

    fn is_immune(&self, id: EntityId, condition: ConditionKind) -> bool {
        self.immunities.contains(&(id, condition))
    }

    fn has_been_attacked_by(&self, id: EntityId, attacker: EntityId) -> bool {
        self.attacked_by.contains(&(id, attacker))
    }
}

impl RulesOracle for Sandbox {
    fn on_target_combat(&self, _attacker: Option<&Combatant>, target: &Combatant) -> Verdict {
        if self.denied_targets.contains(&target.id) {
            Verdict::NotPossible
        } else {
            Verdict::Allowed
        }
    }

    fn on_area_combat(
        &self,
        _caster: Option<&Combatant>,
        tile: &Tile,
        _aggressive: bool,
    ) -> Verdict {
        if self.denied_cells.contains(&tile.position) {
            Verdict::NotPossible
        } else {
            Verdict::Allowed
        }
    }
}

impl MitigationOracle for Sandbox {
    fn block_hit(
        &self,
        _caster: Option<&Combatant>,
        target: &Combatant,
        damage: &mut DamageSpec,
        rules: BlockRules,
    ) -> bool {
        self.block_rules.borrow_mut().push(rules);
        if self.negated.contains(&target.id) {
            damage.block = BlockType::Immunity;
            return true;
        }
        damage.block = self
            .block_results
            .get(&target.id)
            .copied()
            .unwrap_or_default();
        false
    }
}

impl FormulaOracle for Sandbox {
    fn min_max(
        &self,
        handle: FormulaHandle,
        _kind: FormulaKind,
        _caster: &Combatant,
        _damage: &mut DamageSpec,
    ) -> Result<(i32, i32), FormulaError> {
        self.formulas
            .get(&handle)
            .cloned()
            .unwrap_or_else(|| Err(FormulaError::Provider("unknown handle".into())))
    }
}

impl ScriptOracle for Sandbox {
    fn on_tile(
        &self,
        handle: ScriptHandle,
        caster: Option<EntityId>,
        position: Position,
    ) -> Result<(), ScriptError> {
        self.script_calls
            .borrow_mut()
            .push(ScriptCall::Tile(handle, caster, position));
        self.script_result(handle)
    }

    fn on_target(
        &self,
        handle: ScriptHandle,
        caster: Option<EntityId>,
        target: EntityId,
    ) -> Result<(), ScriptError> {
        self.script_calls
            .borrow_mut()
            .push(ScriptCall::Target(handle, caster, target));
        self.script_result(handle)
    }
}

impl Sandbox {
    fn script_result(&self, handle: ScriptHandle) -> Result<(), ScriptError> {
        if self.failing_scripts.contains(&handle) {
            Err(ScriptError::Failed(format!("script {} raised", handle.0)))
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Recorder
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Health {
        caster: Option<EntityId>,
        target: EntityId,
        damage: DamageSpec,
    },
    Mana {
        caster: Option<EntityId>,
        target: EntityId,
        damage: DamageSpec,
    },
    AddCondition {
        target: EntityId,
        condition: Condition,
    },
    RemoveCondition {
        target: EntityId,
        kind: ConditionKind,
        scope: DispelScope,
    },
    PlaceItem {
        position: Position,
        item: HazardItem,
        owner: Option<EntityId>,
    },
    RemoveItem(ItemRef),
    Decay(ItemRef),
    InFight(EntityId),
    Effect {
        observers: Option<Vec<EntityId>>,
        position: Position,
        effect: EffectId,
    },
    Distance {
        from: Position,
        to: Position,
        effect: ProjectileId,
    },
}

/// Sink that records every mutation in order.
#[derive(Default)]
pub struct Recorder {
    pub events: Vec<Event>,
    pub rejected: HashSet<EntityId>,
    pub refuse_items: bool,
    next_item: u32,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn health_deltas(&self) -> Vec<(EntityId, i32)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Health { target, damage, .. } => Some((*target, damage.total())),
                _ => None,
            })
            .collect()
    }

    pub fn conditions_on(&self, id: EntityId) -> Vec<Condition> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::AddCondition { target, condition } if *target == id => {
                    Some(condition.clone())
                }
                _ => None,
            })
            .collect()
    }

    pub fn effects(&self, effect: EffectId) -> Vec<Position> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Effect {
                    position,
                    effect: shown,
                    ..
                } if *shown == effect => Some(*position),
                _ => None,
            })
            .collect()
    }

    pub fn leech_restorations(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|event| match event {
                Event::Health { damage, .. } | Event::Mana { damage, .. } => damage.leeched,
                _ => false,
            })
            .collect()
    }

    fn delta(&self, target: EntityId) -> Result<(), ApplyError> {
        if self.rejected.contains(&target) {
            Err(ApplyError::Rejected(target))
        } else {
            Ok(())
        }
    }
}

impl CombatSink for Recorder {
    fn change_health(
        &mut self,
        caster: Option<EntityId>,
        target: EntityId,
        damage: &DamageSpec,
    ) -> Result<(), ApplyError> {
        self.delta(target)?;
        self.events.push(Event::Health {
            caster,
            target,
            damage: *damage,
        });
        Ok(())
    }

    fn change_mana(
        &mut self,
        caster: Option<EntityId>,
        target: EntityId,
        damage: &DamageSpec,
    ) -> Result<(), ApplyError> {
        self.delta(target)?;
        self.events.push(Event::Mana {
            caster,
            target,
            damage: *damage,
        });
        Ok(())
    }

    fn add_condition(&mut self, target: EntityId, condition: Condition) {
        self.events.push(Event::AddCondition { target, condition });
    }

    fn remove_condition(&mut self, target: EntityId, kind: ConditionKind, scope: DispelScope) {
        self.events
            .push(Event::RemoveCondition { target, kind, scope });
    }

    fn place_item(
        &mut self,
        position: Position,
        item: HazardItem,
        owner: Option<EntityId>,
    ) -> Result<ItemRef, ApplyError> {
        if self.refuse_items {
            return Err(ApplyError::ItemRejected(position));
        }
        self.events.push(Event::PlaceItem {
            position,
            item,
            owner,
        });
        self.next_item += 1;
        Ok(ItemRef(self.next_item))
    }

    fn remove_item(&mut self, item: ItemRef) {
        self.events.push(Event::RemoveItem(item));
    }

    fn start_decay(&mut self, item: ItemRef) {
        self.events.push(Event::Decay(item));
    }

    fn mark_in_fight(&mut self, player: EntityId) {
        self.events.push(Event::InFight(player));
    }

    fn magic_effect(
        &mut self,
        observers: Option<&[EntityId]>,
        position: Position,
        effect: EffectId,
    ) {
        self.events.push(Event::Effect {
            observers: observers.map(<[EntityId]>::to_vec),
            position,
            effect,
        });
    }

    fn distance_effect(&mut self, from: Position, to: Position, effect: ProjectileId) {
        self.events.push(Event::Distance { from, to, effect });
    }
}

// ============================================================================
// Runners
// ============================================================================

pub fn on_target(
    combat: &Combat,
    sandbox: &Sandbox,
    config: &CombatConfig,
    caster: Option<u32>,
    target: u32,
    seed: u64,
) -> (CombatReport, Recorder) {
    on_target_with(combat, sandbox, config, caster, target, seed, Recorder::new())
}

pub fn on_target_with(
    combat: &Combat,
    sandbox: &Sandbox,
    config: &CombatConfig,
    caster: Option<u32>,
    target: u32,
    seed: u64,
    mut sink: Recorder,
) -> (CombatReport, Recorder) {
    init_tracing();
    let caster = caster.map(|id| sandbox.get(id));
    let mut rng = PcgRng::new(seed);
    let report = {
        let mut ctx = CombatContext::new(sandbox.env(config), &mut sink, &mut rng);
        combat.execute_on_target(caster.as_ref(), EntityId(target), &mut ctx)
    };
    (report, sink)
}

pub fn at_position(
    combat: &Combat,
    sandbox: &Sandbox,
    config: &CombatConfig,
    caster: Option<u32>,
    position: Position,
    seed: u64,
) -> (CombatReport, Recorder) {
    at_position_with(combat, sandbox, config, caster, position, seed, Recorder::new())
}

pub fn at_position_with(
    combat: &Combat,
    sandbox: &Sandbox,
    config: &CombatConfig,
    caster: Option<u32>,
    position: Position,
    seed: u64,
    mut sink: Recorder,
) -> (CombatReport, Recorder) {
    init_tracing();
    let caster = caster.map(|id| sandbox.get(id));
    let mut rng = PcgRng::new(seed);
    let report = {
        let mut ctx = CombatContext::new(sandbox.env(config), &mut sink, &mut rng);
        combat.execute_at(caster.as_ref(), position, &mut ctx)
    };
    (report, sink)
}
