#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core value types shared by the tactics tile component and its adapters.
//!
//! Nothing in this crate holds behaviour beyond small, pure helpers. The tile
//! crate builds its state machine on top of these types, the input adapter
//! produces values the tile consumes, and the persisted save format lives here
//! so every layer agrees on stable field names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Terrain categories a tile can take.
///
/// Ordinals are part of the save format and must never be reordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TileType {
    /// Open ground.
    Grass = 0,
    /// Defensive structure.
    Fortress = 1,
    /// A player's home castle.
    PlayerCastle = 2,
    /// Tile that units may be spawned onto by its owner.
    SpawnableTile = 3,
}

impl TileType {
    /// Every tile type in ordinal order.
    pub const ALL: [TileType; 4] = [
        TileType::Grass,
        TileType::Fortress,
        TileType::PlayerCastle,
        TileType::SpawnableTile,
    ];

    /// Lowest tile type, used as the wrap target when incrementing past the end.
    pub const MIN: TileType = Self::ALL[0];

    /// Highest tile type, used as the wrap target when decrementing past the start.
    pub const MAX: TileType = Self::ALL[Self::ALL.len() - 1];

    /// Numeric ordinal written to save files.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Next tile type, wrapping from [`TileType::MAX`] to [`TileType::MIN`].
    #[must_use]
    pub fn next(self) -> Self {
        let index = usize::from(self.ordinal());
        Self::ALL.get(index + 1).copied().unwrap_or(Self::MIN)
    }

    /// Previous tile type, wrapping from [`TileType::MIN`] to [`TileType::MAX`].
    #[must_use]
    pub fn previous(self) -> Self {
        usize::from(self.ordinal())
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
            .unwrap_or(Self::MAX)
    }
}

impl TryFrom<u8> for TileType {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(CoreError::UnknownTileType(value))
    }
}

impl From<TileType> for u8 {
    fn from(value: TileType) -> Self {
        value.ordinal()
    }
}

/// Team a unit fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Red team.
    Red,
    /// Blue team.
    Blue,
}

impl Faction {
    /// Returns the other team.
    #[must_use]
    pub const fn opposing(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }
}

/// Unique identifier assigned to a unit by the unit authority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Record a tile keeps about the unit standing on it.
///
/// The tile never owns the unit; lifetime stays with the unit authority.
/// `faction` is a copy taken when the unit was placed and is not read back
/// from the unit. A team swap made through the tile refreshes it; hosts that
/// change a unit's team any other way must call
/// `Tile::refresh_occupant_faction` or passability checks use the old team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Occupant {
    /// Identifier of the unit.
    pub id: UnitId,
    /// Team the unit belonged to when last observed by the tile.
    pub faction: Faction,
}

impl Occupant {
    /// Creates a new occupant record.
    #[must_use]
    pub const fn new(id: UnitId, faction: Faction) -> Self {
        Self { id, faction }
    }
}

/// Outcome of placing an occupant onto a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OccupancyChange {
    /// The tile was empty before the placement.
    Vacant,
    /// The placement overwrote a previous occupant.
    Replaced(Occupant),
}

/// World position of a tile, captured at save time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TilePosition {
    /// Horizontal coordinate in world units.
    pub x: f32,
    /// Vertical coordinate in world units.
    pub y: f32,
}

impl TilePosition {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Serialized unit state produced and consumed by the unit authority.
///
/// Tiles pass these through without interpreting them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSnapshot {
    /// Identifier the unit carried when saved.
    pub unit_id: UnitId,
    /// Team of the unit.
    pub faction: Faction,
    /// Free-form unit archetype name.
    pub unit_type: String,
    /// Remaining health.
    pub health: i32,
}

/// Serialized state specific to spawnable tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnableSnapshot {
    /// Team that owns the spawn point, if claimed.
    pub tile_owner: Option<Faction>,
}

/// Persisted snapshot of a single tile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSaveObject {
    /// Terrain category, stored as its ordinal.
    pub tile_type: TileType,
    /// Whether units may ever stand on or pass the tile.
    pub is_walkable: bool,
    /// Horizontal world position.
    pub pos_x: f32,
    /// Vertical world position.
    pub pos_y: f32,
    /// Snapshot of the occupant, if any.
    pub occupied_unit: Option<UnitSnapshot>,
    /// Spawnable tile data, present only for spawnable tiles.
    pub spawnable_tile_data: Option<SpawnableSnapshot>,
}

impl TileSaveObject {
    /// Position recorded in the snapshot.
    #[must_use]
    pub const fn position(&self) -> TilePosition {
        TilePosition::new(self.pos_x, self.pos_y)
    }
}

/// Ordered collection of tile snapshots making up a saved board.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardSave {
    tiles: Vec<TileSaveObject>,
}

impl BoardSave {
    /// Wraps the provided tile snapshots.
    #[must_use]
    pub fn new(tiles: Vec<TileSaveObject>) -> Self {
        Self { tiles }
    }

    /// Snapshots in save order.
    #[must_use]
    pub fn tiles(&self) -> &[TileSaveObject] {
        &self.tiles
    }

    /// Parses a board from its JSON representation.
    pub fn from_json(contents: &str) -> Result<Self, CoreError> {
        serde_json::from_str(contents).map_err(CoreError::Json)
    }

    /// Renders the board as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self).map_err(CoreError::Json)
    }
}

/// Errors raised while decoding core values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A tile type ordinal outside the known range.
    #[error("unknown tile type ordinal {0}; expected 0..={max}", max = TileType::MAX.ordinal())]
    UnknownTileType(u8),
    /// The JSON payload could not be parsed or rendered.
    #[error("invalid board save json")]
    Json(#[source] serde_json::Error),
}
