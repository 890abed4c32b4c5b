use crate::auth::Verdict;
use crate::combat::DamageSpec;
use crate::state::{Combatant, Tile};

/// Host-defined final say on aggression.
///
/// Consulted last by the authorization engine, after every built-in rule
/// has passed.
pub trait RulesOracle {
    fn on_target_combat(&self, _attacker: Option<&Combatant>, _target: &Combatant) -> Verdict {
        Verdict::Allowed
    }

    fn on_area_combat(
        &self,
        _caster: Option<&Combatant>,
        _tile: &Tile,
        _aggressive: bool,
    ) -> Verdict {
        Verdict::Allowed
    }
}

/// Which defences a hit may be checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BlockRules {
    pub shield: bool,
    pub armor: bool,
    /// The hit comes from an invocation that also places a field.
    pub field: bool,
    pub ignore_resistances: bool,
}

/// Defence, armor and resistance evaluation.
pub trait MitigationOracle {
    /// Mitigates `damage` in place and records the dominant block in
    /// `damage.block`. Returns `true` when the hit was fully negated.
    fn block_hit(
        &self,
        caster: Option<&Combatant>,
        target: &Combatant,
        damage: &mut DamageSpec,
        rules: BlockRules,
    ) -> bool;
}
