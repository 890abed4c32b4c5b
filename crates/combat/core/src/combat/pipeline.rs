//! Invocation orchestration.
//!
//! A [`Combat`] is the immutable definition of one spell or attack. Each call
//! to [`Combat::execute_on_target`] or [`Combat::execute_at`] resolves one
//! invocation against the oracles in a [`CombatContext`]:
//!
//! 1. Sample the magnitude
//! 2. Resolve affected cells and authorize candidates
//! 3. Run the per-target stages (scaling, softening, mitigation, critical)
//! 4. Write deltas and attach conditions
//! 5. Leech back to the caster
//!
//! Nothing here returns an error. Hook and mutation failures are logged and
//! only cost the affected target its remaining stages.

use std::sync::Arc;

use super::hazard::place_hazard;
use super::report::LeechOutcome;
use super::stages::{
    CriticalBonus, LeechKind, can_leech, roll_critical, roll_leech, scale_by_attributes, softens,
};
use super::{
    CombatParams, CombatReport, CombatType, DamageOrigin, DamageSpec, FormulaDescriptor, HitStatus,
    ProjectileEffect, ProjectileId, TargetOutcome, magnitude,
};
use crate::area::{DirectionalAreaSet, affected_tiles};
use crate::auth::{Verdict, can_engage, can_engage_tile};
use crate::config::CombatConfig;
use crate::env::{
    ApplyError, BlockRules, CombatSink, DispelScope, Env, RngOracle, ScriptError,
};
use crate::error::CombatError;
use crate::state::{Combatant, ConditionKind, EntityId, Position, Tile};

// ============================================================================
// Context
// ============================================================================

/// Everything one invocation runs against.
pub struct CombatContext<'a> {
    pub env: Env<'a>,
    pub sink: &'a mut dyn CombatSink,
    pub rng: &'a mut dyn RngOracle,
}

impl<'a> CombatContext<'a> {
    pub fn new(env: Env<'a>, sink: &'a mut dyn CombatSink, rng: &'a mut dyn RngOracle) -> Self {
        Self { env, sink, rng }
    }
}

// ============================================================================
// Combat
// ============================================================================

/// Immutable definition of a spell or attack.
#[derive(Clone, Debug)]
pub struct Combat {
    params: CombatParams,
    formula: Option<FormulaDescriptor>,
    area: Option<Arc<DirectionalAreaSet>>,
}

impl Combat {
    pub fn new(params: CombatParams) -> Self {
        Self {
            params,
            formula: None,
            area: None,
        }
    }

    pub fn with_formula(mut self, formula: FormulaDescriptor) -> Self {
        self.formula = Some(formula);
        self
    }

    pub fn with_area(mut self, area: Arc<DirectionalAreaSet>) -> Self {
        self.area = Some(area);
        self
    }

    pub fn params(&self) -> &CombatParams {
        &self.params
    }

    pub fn formula(&self) -> Option<&FormulaDescriptor> {
        self.formula.as_ref()
    }

    pub fn area(&self) -> Option<&DirectionalAreaSet> {
        self.area.as_deref()
    }

    /// Resolves one invocation against a single entity.
    pub fn execute_on_target(
        &self,
        caster: Option<&Combatant>,
        target: EntityId,
        ctx: &mut CombatContext<'_>,
    ) -> CombatReport {
        let mut report = CombatReport::default();
        let Some(target) = ctx.env.combatant(target) else {
            tracing::debug!(%target, "target vanished before resolution");
            return report;
        };

        if self.params.combat_type == CombatType::None {
            self.utility_on_target(caster, &target, ctx, &mut report);
            return report;
        }

        let damage = magnitude(
            self.formula.as_ref(),
            &self.params,
            caster,
            Some(target.id),
            &ctx.env,
            &mut *ctx.rng,
        );
        tracing::trace!(target = %target.id, value = damage.total(), "sampled magnitude");

        let verdict = self.authorize(caster, &target, &ctx.env);
        let is_self = caster.is_some_and(|caster| caster.id == target.id);
        if (is_self || verdict.is_allowed())
            && let Some(effect) = self.params.impact_effect
        {
            ctx.sink.magic_effect(None, target.position, effect);
        }

        if verdict.is_allowed() {
            self.target_combat(caster, &target, damage, ctx, &mut report);
        } else {
            tracing::debug!(target = %target.id, %verdict, "target denied");
            report.push(denied(&target, damage, verdict));
        }
        report
    }

    /// Resolves one invocation aimed at a cell.
    ///
    /// Without an area only `position` is affected.
    pub fn execute_at(
        &self,
        caster: Option<&Combatant>,
        position: Position,
        ctx: &mut CombatContext<'_>,
    ) -> CombatReport {
        let mut report = CombatReport::default();
        let origin = caster.map_or(position, |caster| caster.position);
        let tiles = affected_tiles(ctx.env.world(), origin, position, self.area());
        let observers = area_observers(&ctx.env, &tiles, position);

        if self.params.combat_type == CombatType::None {
            self.utility_area(caster, position, &tiles, &observers, ctx, &mut report);
        } else {
            self.damage_area(caster, position, &tiles, &observers, ctx, &mut report);
        }
        report
    }

    // ========================================================================
    // Single target
    // ========================================================================

    fn target_combat(
        &self,
        caster: Option<&Combatant>,
        target: &Combatant,
        mut damage: DamageSpec,
        ctx: &mut CombatContext<'_>,
        report: &mut CombatReport,
    ) {
        if let Some(caster) = caster {
            self.travel_visual(caster, target.position, ctx);
        }
        let caster_player = caster.filter(|caster| caster.is_player());
        let mut softened = false;

        let applied = if damage.kind() == CombatType::ManaDrain {
            ctx.sink.change_mana(caster.map(|c| c.id), target.id, &damage)
        } else {
            if let Some(player) = caster_player {
                scale_by_attributes(
                    &mut damage,
                    player,
                    CombatConfig::SINGLE_TARGET_ATTRIBUTE_DIVISOR,
                );
            }

            if self.block_hit(caster, target, &mut damage, &ctx.env) {
                report.push(outcome(target, damage, HitStatus::Blocked, false));
                return;
            }

            if let Some(player) = caster_player {
                softened = softens(player, target, &damage);
                if softened {
                    damage.halve();
                }
                if let Some(bonus) = roll_critical(&damage, player, &mut *ctx.rng) {
                    bonus.apply(&mut damage, false);
                    report.critical = true;
                }
            }

            ctx.sink.change_health(caster.map(|c| c.id), target.id, &damage)
        };

        match applied {
            Ok(()) => {
                if damage.block.lets_conditions_through() {
                    self.apply_conditions(caster, target, ctx);
                }
                if damage.critical {
                    ctx.sink
                        .magic_effect(None, target.position, CriticalBonus::effect());
                }
                if let Some(player) = caster_player
                    && player.id != target.id
                    && can_leech(&damage)
                {
                    let dealt = damage.total().saturating_abs();
                    self.leech(player, dealt, 1, ctx, report);
                }
                self.dispel(target.id, ctx);
                report.push(outcome(target, damage, HitStatus::Applied, softened));
            }
            Err(err) => {
                log_rejected(target.id, &err);
                report.push(outcome(target, damage, HitStatus::Rejected, softened));
            }
        }

        self.target_script(caster, target.id, &ctx.env);
    }

    fn utility_on_target(
        &self,
        caster: Option<&Combatant>,
        target: &Combatant,
        ctx: &mut CombatContext<'_>,
        report: &mut CombatReport,
    ) {
        let damage = DamageSpec::new(CombatType::None, self.params.origin);
        let verdict = self.authorize(caster, target, &ctx.env);
        if !verdict.is_allowed() {
            tracing::debug!(target = %target.id, %verdict, "target denied");
            report.push(denied(target, damage, verdict));
            return;
        }

        let observers = ctx.env.world().observers(
            target.position,
            CombatConfig::MAX_VIEWPORT_X,
            CombatConfig::MAX_VIEWPORT_Y,
        );

        if self.params.origin != DamageOrigin::Melee {
            self.apply_conditions(caster, target, ctx);
        }
        self.dispel(target.id, ctx);

        let tile = ctx.env.world().tile_or_create(target.position);
        self.tile_effects(caster, &tile, &observers, ctx);
        self.target_script(caster, target.id, &ctx.env);

        if let Some(caster) = caster {
            self.travel_visual(caster, target.position, ctx);
        }
        report.push(outcome(target, damage, HitStatus::Applied, false));
    }

    // ========================================================================
    // Area
    // ========================================================================

    fn damage_area(
        &self,
        caster: Option<&Combatant>,
        position: Position,
        tiles: &[Tile],
        observers: &[EntityId],
        ctx: &mut CombatContext<'_>,
        report: &mut CombatReport,
    ) {
        let mut damage = magnitude(
            self.formula.as_ref(),
            &self.params,
            caster,
            None,
            &ctx.env,
            &mut *ctx.rng,
        );
        let caster_player = caster.filter(|caster| caster.is_player());

        let mut critical = None;
        if let Some(player) = caster_player {
            scale_by_attributes(&mut damage, player, CombatConfig::AREA_ATTRIBUTE_DIVISOR);
            critical = roll_critical(&damage, player, &mut *ctx.rng);
            report.critical = critical.is_some();
        }
        tracing::trace!(
            value = damage.total(),
            critical = critical.is_some(),
            cells = tiles.len(),
            "area magnitude"
        );

        if let Some(caster) = caster {
            self.travel_visual(caster, position, ctx);
        }
        let targets = self.area_candidates(caster, tiles, observers, ctx, report);

        let mut max_dealt = 0;
        let mut hits = 0u32;
        for target in &targets {
            let mut hit = damage;
            let softened = caster_player.is_some_and(|player| softens(player, target, &hit));
            if softened {
                hit.halve();
            }
            if let Some(bonus) = critical {
                bonus.apply(&mut hit, softened);
                ctx.sink
                    .magic_effect(None, target.position, CriticalBonus::effect());
            }

            let applied = if hit.kind() == CombatType::ManaDrain {
                ctx.sink.change_mana(caster.map(|c| c.id), target.id, &hit)
            } else {
                if self.block_hit(caster, target, &mut hit, &ctx.env) {
                    report.push(outcome(target, hit, HitStatus::Blocked, softened));
                    continue;
                }
                ctx.sink.change_health(caster.map(|c| c.id), target.id, &hit)
            };

            if let Err(err) = applied {
                log_rejected(target.id, &err);
                report.push(outcome(target, hit, HitStatus::Rejected, softened));
                self.target_script(caster, target.id, &ctx.env);
                continue;
            }

            max_dealt = max_dealt.max(hit.total().saturating_abs());
            hits += 1;
            if hit.block.lets_conditions_through() {
                self.apply_conditions(caster, target, ctx);
            }
            self.dispel(target.id, ctx);
            self.target_script(caster, target.id, &ctx.env);
            report.push(outcome(target, hit, HitStatus::Applied, softened));
        }

        if let Some(player) = caster_player
            && can_leech(&damage)
            && hits > 0
            && max_dealt > 0
        {
            self.leech(player, max_dealt, hits, ctx, report);
        }
    }

    fn utility_area(
        &self,
        caster: Option<&Combatant>,
        position: Position,
        tiles: &[Tile],
        observers: &[EntityId],
        ctx: &mut CombatContext<'_>,
        report: &mut CombatReport,
    ) {
        if let Some(caster) = caster {
            self.travel_visual(caster, position, ctx);
        }

        let targets = self.area_candidates(caster, tiles, observers, ctx, report);
        for target in &targets {
            self.apply_conditions(caster, target, ctx);
            self.dispel(target.id, ctx);
            self.target_script(caster, target.id, &ctx.env);
            report.push(outcome(
                target,
                DamageSpec::new(CombatType::None, self.params.origin),
                HitStatus::Applied,
                false,
            ));
        }
    }

    /// Runs cell effects on every engageable cell and collects the authorized
    /// occupants in cell order. Denied occupants go straight to `report`.
    fn area_candidates(
        &self,
        caster: Option<&Combatant>,
        tiles: &[Tile],
        observers: &[EntityId],
        ctx: &mut CombatContext<'_>,
        report: &mut CombatReport,
    ) -> Vec<Combatant> {
        let mut targets = Vec::new();
        for tile in tiles {
            let verdict = can_engage_tile(&ctx.env, caster, tile, self.params.aggressive);
            if !verdict.is_allowed() {
                tracing::trace!(position = %tile.position, %verdict, "cell skipped");
                continue;
            }
            self.tile_effects(caster, tile, observers, ctx);

            let candidates = self
                .params
                .targeting
                .candidates(ctx.env.world(), caster, tile);
            for id in candidates {
                let Some(candidate) = ctx.env.combatant(id) else {
                    continue;
                };
                let verdict = self.authorize(caster, &candidate, &ctx.env);
                if verdict.is_allowed() {
                    targets.push(candidate);
                    if self.params.targeting.is_single_per_tile() {
                        break;
                    }
                } else {
                    tracing::debug!(target = %id, %verdict, "area candidate denied");
                    let damage = DamageSpec::new(self.params.combat_type, self.params.origin);
                    report.push(denied(&candidate, damage, verdict));
                }
            }
        }
        targets
    }

    // ========================================================================
    // Shared stages
    // ========================================================================

    /// Non-aggressive invocations reach everyone; aggressive ones never hit
    /// the caster and must pass [`can_engage`].
    fn authorize(&self, caster: Option<&Combatant>, target: &Combatant, env: &Env<'_>) -> Verdict {
        if !self.params.aggressive {
            return Verdict::Allowed;
        }
        if caster.is_some_and(|caster| caster.id == target.id) {
            return Verdict::CannotAttackPlayer;
        }
        can_engage(env, caster, target)
    }

    fn block_hit(
        &self,
        caster: Option<&Combatant>,
        target: &Combatant,
        damage: &mut DamageSpec,
        env: &Env<'_>,
    ) -> bool {
        let rules = BlockRules {
            shield: self.params.blocked_by_shield,
            armor: self.params.blocked_by_armor,
            field: self.params.hazard.is_some(),
            ignore_resistances: self.params.ignore_resistances,
        };
        let blocked = env.mitigation().block_hit(caster, target, damage, rules);
        if blocked {
            tracing::debug!(target = %target.id, block = %damage.block, "hit negated");
        }
        blocked
    }

    fn apply_conditions(
        &self,
        caster: Option<&Combatant>,
        target: &Combatant,
        ctx: &mut CombatContext<'_>,
    ) {
        let caster_id = caster.map(|caster| caster.id);
        for condition in &self.params.conditions {
            if caster_id != Some(target.id)
                && ctx.env.entities().is_immune(target.id, condition.kind)
            {
                continue;
            }
            ctx.sink
                .add_condition(target.id, condition.with_owner(caster_id));
        }
    }

    fn dispel(&self, target: EntityId, ctx: &mut CombatContext<'_>) {
        match self.params.dispel {
            ConditionKind::None => {}
            ConditionKind::Paralyze => {
                ctx.sink
                    .remove_condition(target, ConditionKind::Paralyze, DispelScope::Any);
            }
            kind => ctx
                .sink
                .remove_condition(target, kind, DispelScope::CombatOnly),
        }
    }

    fn leech(
        &self,
        caster: &Combatant,
        dealt: i32,
        hits: u32,
        ctx: &mut CombatContext<'_>,
        report: &mut CombatReport,
    ) {
        let caster = ctx
            .env
            .combatant(caster.id)
            .unwrap_or_else(|| caster.clone());

        for kind in LeechKind::ALL {
            let Some(amount) = roll_leech(kind, &caster, dealt, hits, &mut *ctx.rng) else {
                continue;
            };
            let restoration = DamageSpec::restoration(amount);
            let applied = match kind {
                LeechKind::Life => ctx.sink.change_health(None, caster.id, &restoration),
                LeechKind::Mana => ctx.sink.change_mana(None, caster.id, &restoration),
            };
            ctx.sink.magic_effect(None, caster.position, kind.effect());

            match applied {
                Ok(()) => {
                    tracing::trace!(caster = %caster.id, %kind, amount, hits, "leech");
                    report.leech.push(LeechOutcome { kind, amount });
                }
                Err(err) => log_rejected(caster.id, &err),
            }
        }
    }

    // ========================================================================
    // Side effects
    // ========================================================================

    fn tile_effects(
        &self,
        caster: Option<&Combatant>,
        tile: &Tile,
        observers: &[EntityId],
        ctx: &mut CombatContext<'_>,
    ) {
        if let Some(hazard) = self.params.hazard {
            place_hazard(hazard, caster, tile, &ctx.env, &mut *ctx.sink);
        }

        if let Some(handle) = self.params.tile_script {
            let result = ctx
                .env
                .scripts()
                .map_err(ScriptError::from)
                .and_then(|scripts| {
                    scripts.on_tile(handle, caster.map(|caster| caster.id), tile.position)
                });
            if let Err(err) = result {
                log_script_failure(handle.0, &err);
            }
        }

        if let Some(effect) = self.params.impact_effect {
            ctx.sink
                .magic_effect(Some(observers), tile.position, effect);
        }
    }

    fn target_script(&self, caster: Option<&Combatant>, target: EntityId, env: &Env<'_>) {
        let Some(handle) = self.params.target_script else {
            return;
        };
        let result = env
            .scripts()
            .map_err(ScriptError::from)
            .and_then(|scripts| scripts.on_target(handle, caster.map(|caster| caster.id), target));
        if let Err(err) = result {
            log_script_failure(handle.0, &err);
        }
    }

    fn travel_visual(&self, caster: &Combatant, to: Position, ctx: &mut CombatContext<'_>) {
        let projectile = match self.params.distance_effect {
            ProjectileEffect::None => None,
            ProjectileEffect::Fixed(projectile) => Some(projectile),
            ProjectileEffect::WeaponType if caster.is_player() => ctx
                .env
                .entities()
                .weapon(caster.id, None)
                .and_then(|weapon| ProjectileId::whirlwind(weapon.kind)),
            ProjectileEffect::WeaponType => None,
        };
        if let Some(projectile) = projectile {
            ctx.sink.distance_effect(caster.position, to, projectile);
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Observers of an area: everyone who can see any affected cell.
fn area_observers(env: &Env<'_>, tiles: &[Tile], center: Position) -> Vec<EntityId> {
    let (spread_x, spread_y) = tiles
        .iter()
        .map(|tile| tile.position.axis_distance(center))
        .fold((0, 0), |(max_x, max_y), (dx, dy)| (max_x.max(dx), max_y.max(dy)));
    env.world().observers(
        center,
        spread_x + CombatConfig::MAX_VIEWPORT_X,
        spread_y + CombatConfig::MAX_VIEWPORT_Y,
    )
}

fn outcome(
    target: &Combatant,
    damage: DamageSpec,
    status: HitStatus,
    softened: bool,
) -> TargetOutcome {
    TargetOutcome {
        target: target.id,
        damage,
        status,
        softened,
    }
}

fn denied(target: &Combatant, damage: DamageSpec, verdict: Verdict) -> TargetOutcome {
    outcome(target, damage, HitStatus::Denied(verdict), false)
}

fn log_rejected(target: EntityId, err: &ApplyError) {
    tracing::debug!(%target, code = err.error_code(), error = %err, "delta rejected");
}

fn log_script_failure(handle: u32, err: &ScriptError) {
    tracing::warn!(handle, code = err.error_code(), error = %err, "script hook failed");
}
