use bitflags::bitflags;

use super::{EntityId, Position, ResourceMeter};

/// What kind of entity a combatant is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Player,
    Creature,
    /// A creature controlled by another entity.
    Summon { owner: EntityId },
}

/// Hostile marker an attacker carries, ordered from clean to worst.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HostileMarker {
    #[default]
    None,
    Yellow,
    Green,
    White,
    Orange,
    Red,
    Black,
}

impl HostileMarker {
    pub const WORST: Self = HostileMarker::Black;
}

bitflags! {
    /// Account-level privileges and restrictions relevant to combat.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActorFlags: u16 {
        /// Zone override: ignores no-combat and no-PvP cells.
        const IGNORE_PROTECTION_ZONE = 1 << 0;
        const CANNOT_USE_COMBAT      = 1 << 1;
        const CANNOT_BE_ATTACKED     = 1 << 2;
        const CANNOT_ATTACK_PLAYER   = 1 << 3;
        const CANNOT_ATTACK_MONSTER  = 1 << 4;
        /// Exempts the holder from the self-targeting denial.
        const MAY_TARGET_SELF        = 1 << 5;
    }
}

/// Percentile ratings for randomized bonus stages.
///
/// `*_chance` is compared against a d100 roll, `*_amount` is the percentage
/// of the base magnitude granted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialSkills {
    pub critical_chance: u16,
    pub critical_amount: u16,
    pub life_leech_chance: u16,
    pub life_leech_amount: u16,
    pub mana_leech_chance: u16,
    pub mana_leech_amount: u16,
}

/// Equipped weapon category, used for weapon-shaped visuals.
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
pub enum WeaponKind {
    #[default]
    None,
    Sword,
    Club,
    Axe,
    Shield,
    Distance,
    Wand,
    Ammunition,
}

/// Read-only snapshot of one entity's combat-relevant state.
///
/// Snapshots are produced by the [`crate::env::EntityOracle`]; the engine
/// never mutates them and re-queries when it needs fresh values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: EntityId,
    pub role: Role,
    pub position: Position,
    pub level: u32,
    pub magic_level: u32,
    /// Percent bonus applied to physical output.
    pub strength: i32,
    /// Percent bonus applied to non-physical output.
    pub intelligence: i32,
    pub marker: HostileMarker,
    pub skills: SpecialSkills,
    pub health: ResourceMeter,
    pub mana: ResourceMeter,
    pub flags: ActorFlags,
    pub attackable: bool,
    /// Whether the combatant's vocation may take part in PvP.
    pub allows_pvp: bool,
    /// Safety toggle: refuses attacks on unmarked players.
    pub secure_mode: bool,
    pub ghost: bool,
}

impl Combatant {
    fn base(id: EntityId, role: Role, position: Position) -> Self {
        Self {
            id,
            role,
            position,
            level: 1,
            magic_level: 0,
            strength: 0,
            intelligence: 0,
            marker: HostileMarker::None,
            skills: SpecialSkills::default(),
            health: ResourceMeter::full(100),
            mana: ResourceMeter::full(0),
            flags: ActorFlags::empty(),
            attackable: true,
            allows_pvp: true,
            secure_mode: false,
            ghost: false,
        }
    }

    pub fn player(id: EntityId, position: Position) -> Self {
        Self::base(id, Role::Player, position)
    }

    pub fn creature(id: EntityId, position: Position) -> Self {
        Self::base(id, Role::Creature, position)
    }

    pub fn summon(id: EntityId, owner: EntityId, position: Position) -> Self {
        Self::base(id, Role::Summon { owner }, position)
    }

    pub fn with_level(mut self, level: u32, magic_level: u32) -> Self {
        self.level = level;
        self.magic_level = magic_level;
        self
    }

    pub fn with_skills(mut self, skills: SpecialSkills) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_attributes(mut self, strength: i32, intelligence: i32) -> Self {
        self.strength = strength;
        self.intelligence = intelligence;
        self
    }

    pub fn with_flags(mut self, flags: ActorFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_marker(mut self, marker: HostileMarker) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_health(mut self, current: u32, maximum: u32) -> Self {
        self.health = ResourceMeter::new(current, maximum);
        self
    }

    pub fn with_mana(mut self, current: u32, maximum: u32) -> Self {
        self.mana = ResourceMeter::new(current, maximum);
        self
    }

    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player)
    }

    pub fn owner(&self) -> Option<EntityId> {
        match self.role {
            Role::Summon { owner } => Some(owner),
            _ => None,
        }
    }

    pub fn has_flag(&self, flag: ActorFlags) -> bool {
        self.flags.contains(flag)
    }
}
