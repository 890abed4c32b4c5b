//! What an invocation did, per target.

use super::{DamageSpec, LeechKind};
use crate::auth::Verdict;
use crate::state::EntityId;

/// Outcome of one target within an invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitStatus {
    /// The delta was written to the target.
    Applied,
    /// Mitigation negated the hit entirely.
    Blocked,
    /// The world refused the delta; the target is skipped.
    Rejected,
    /// Authorization refused the target.
    Denied(Verdict),
}

/// Result of a single target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetOutcome {
    pub target: EntityId,
    /// Final record as handed to the sink (or as it stood when processing
    /// stopped).
    pub damage: DamageSpec,
    pub status: HitStatus,
    /// The hit was halved as player-versus-player.
    pub softened: bool,
}

impl TargetOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self.status, HitStatus::Applied)
    }
}

/// A leech restoration written back to the caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeechOutcome {
    pub kind: LeechKind,
    pub amount: i32,
}

/// Summary of one invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatReport {
    /// Targets in processing order.
    pub targets: Vec<TargetOutcome>,
    /// A critical roll succeeded for this invocation.
    pub critical: bool,
    pub leech: Vec<LeechOutcome>,
}

impl CombatReport {
    pub fn outcome(&self, target: EntityId) -> Option<&TargetOutcome> {
        self.targets.iter().find(|outcome| outcome.target == target)
    }

    pub fn applied(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.targets.iter().filter(|outcome| outcome.is_applied())
    }

    pub fn hits(&self) -> usize {
        self.applied().count()
    }

    pub fn leeched(&self, kind: LeechKind) -> Option<i32> {
        self.leech
            .iter()
            .find(|leech| leech.kind == kind)
            .map(|leech| leech.amount)
    }

    pub(crate) fn push(&mut self, outcome: TargetOutcome) {
        self.targets.push(outcome);
    }
}
