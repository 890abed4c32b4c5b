use bitflags::bitflags;

use super::Position;

bitflags! {
    /// Per-cell properties the combat rules care about.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u16 {
        const PROTECTION_ZONE  = 1 << 0;
        const NO_PVP_ZONE      = 1 << 1;
        const PVP_ZONE         = 1 << 2;
        const FLOOR_CHANGE     = 1 << 3;
        const BLOCK_PROJECTILE = 1 << 4;
        const TELEPORT         = 1 << 5;
    }
}

/// Zone classification derived from a cell's flags.
///
/// Protection wins over no-PvP, which wins over free-for-all.
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
pub enum Zone {
    #[default]
    Normal,
    /// No-combat zone.
    Protection,
    /// Restricted-PvP zone.
    NoPvp,
    /// Free-for-all zone.
    Pvp,
}

impl TileFlags {
    pub fn zone(self) -> Zone {
        if self.contains(Self::PROTECTION_ZONE) {
            Zone::Protection
        } else if self.contains(Self::NO_PVP_ZONE) {
            Zone::NoPvp
        } else if self.contains(Self::PVP_ZONE) {
            Zone::Pvp
        } else {
            Zone::Normal
        }
    }

    /// Cells an area effect can never land on.
    pub fn blocks_area_effects(self) -> bool {
        self.intersects(Self::BLOCK_PROJECTILE | Self::FLOOR_CHANGE | Self::TELEPORT)
    }
}

/// A world cell as seen by the combat engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub position: Position,
    pub flags: TileFlags,
}

impl Tile {
    pub fn new(position: Position, flags: TileFlags) -> Self {
        Self { position, flags }
    }

    /// A freshly created placeholder cell with no properties.
    pub fn placeholder(position: Position) -> Self {
        Self::new(position, TileFlags::empty())
    }

    pub fn zone(&self) -> Zone {
        self.flags.zone()
    }
}
