use super::EntityId;

/// Status conditions a combat action can attach to, or dispel from, a target.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConditionKind {
    #[default]
    None,
    Poison,
    Fire,
    Energy,
    Bleeding,
    Drown,
    Freezing,
    Dazzled,
    Cursed,
    Bewitched,
    Splashed,
    Haste,
    Paralyze,
    Drunk,
    Invisible,
    Outfit,
    Light,
    ManaShield,
    Regeneration,
    Muted,
    Pacified,
    InFight,
}

impl ConditionKind {
    pub fn is_none(self) -> bool {
        matches!(self, ConditionKind::None)
    }

    /// Conditions that tick damage over time.
    pub fn is_damaging(self) -> bool {
        matches!(
            self,
            ConditionKind::Poison
                | ConditionKind::Fire
                | ConditionKind::Energy
                | ConditionKind::Bleeding
                | ConditionKind::Drown
                | ConditionKind::Freezing
                | ConditionKind::Dazzled
                | ConditionKind::Cursed
                | ConditionKind::Bewitched
                | ConditionKind::Splashed
        )
    }
}

/// A condition template carried by a spell or a field.
///
/// `template` identifies the tick schedule and strength in the host's
/// condition table; the engine only copies it and stamps the owner.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    pub kind: ConditionKind,
    pub template: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub owner: Option<EntityId>,
}

impl Condition {
    pub fn new(kind: ConditionKind, template: u32) -> Self {
        Self {
            kind,
            template,
            owner: None,
        }
    }

    /// Returns a copy attributed to `owner`, leaving the template untouched.
    pub fn with_owner(&self, owner: Option<EntityId>) -> Self {
        Self {
            owner,
            ..self.clone()
        }
    }
}
