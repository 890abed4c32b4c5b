use crate::combat::CombatType;
use crate::state::{Combatant, ConditionKind, EntityId, HostileMarker, WeaponKind};

/// Weapon stats resolved for one attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponProfile {
    pub kind: WeaponKind,
    /// Maximum physical damage of the weapon against the given target.
    pub attack: i32,
    /// Elemental component carried by the weapon.
    pub element: CombatType,
    pub element_damage: i32,
}

impl WeaponProfile {
    pub fn physical(kind: WeaponKind, attack: i32) -> Self {
        Self {
            kind,
            attack,
            element: CombatType::None,
            element_damage: 0,
        }
    }

    pub fn with_element(mut self, element: CombatType, damage: i32) -> Self {
        self.element = element;
        self.element_damage = damage;
        self
    }
}

/// Read access to entity state.
pub trait EntityOracle {
    /// Current snapshot of `id`, or `None` when the entity no longer exists.
    fn combatant(&self, id: EntityId) -> Option<Combatant>;

    /// Hostile marker `attacker` holds specifically against `target`.
    fn marker_towards(&self, attacker: EntityId, target: EntityId) -> HostileMarker;

    /// Equipped weapon of `id` when attacking `target`.
    fn weapon(&self, id: EntityId, target: Option<EntityId>) -> Option<WeaponProfile>;

    /// Intrinsic `(min, max)` values of non-formula attackers.
    fn combat_values(&self, _id: EntityId) -> Option<(i32, i32)> {
        None
    }

    fn is_immune(&self, _id: EntityId, _condition: ConditionKind) -> bool {
        false
    }

    /// Whether `id` has recently been attacked by `attacker`.
    fn has_been_attacked_by(&self, _id: EntityId, _attacker: EntityId) -> bool {
        false
    }
}
