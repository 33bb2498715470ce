//! Board save files and the tiles restored from them.

use std::{fmt, fs, path::Path};

use anyhow::{Context, Result};
use tactics_core::{BoardSave, Faction, TileType};
use tactics_tile::{NoGameModeInput, Tile, TileInput};
use tracing::info;

use crate::host::{MemoryGrid, MemoryUnits};

/// Reads a board save from disk.
pub(crate) fn read_board(path: &Path) -> Result<BoardSave> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read board save at {}", path.display()))?;
    BoardSave::from_json(&contents)
        .with_context(|| format!("failed to parse board save at {}", path.display()))
}

/// Writes a board save to disk as pretty-printed JSON.
pub(crate) fn write_board(path: &Path, board: &BoardSave) -> Result<()> {
    let json = board.to_json().context("failed to render board save")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write board save to {}", path.display()))
}

/// Aggregate counts describing a saved board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct BoardSummary {
    per_type: [usize; TileType::ALL.len()],
    unwalkable: usize,
    occupied: usize,
    spawnable_data: usize,
}

impl BoardSummary {
    pub(crate) fn of(board: &BoardSave) -> Self {
        let mut summary = Self::default();
        for tile in board.tiles() {
            summary.per_type[usize::from(tile.tile_type.ordinal())] += 1;
            summary.unwalkable += usize::from(!tile.is_walkable);
            summary.occupied += usize::from(tile.occupied_unit.is_some());
            summary.spawnable_data += usize::from(tile.spawnable_tile_data.is_some());
        }
        summary
    }

    fn total(&self) -> usize {
        self.per_type.iter().sum()
    }
}

impl fmt::Display for BoardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tiles: {}", self.total())?;
        for tile_type in TileType::ALL {
            let count = self.per_type[usize::from(tile_type.ordinal())];
            writeln!(f, "  {tile_type:?}: {count}")?;
        }
        writeln!(f, "unwalkable: {}", self.unwalkable)?;
        writeln!(f, "occupied: {}", self.occupied)?;
        write!(f, "with spawnable data: {}", self.spawnable_data)
    }
}

/// Tiles restored from a save, together with the units loaded onto them.
#[derive(Debug)]
pub(crate) struct Board {
    tiles: Vec<Tile>,
    units: MemoryUnits,
}

impl Board {
    /// Restores every tile and its occupant.
    pub(crate) fn restore(save: &BoardSave, placement: Option<Faction>) -> Self {
        let mut units = MemoryUnits::placing(placement);
        let tiles = save
            .tiles()
            .iter()
            .map(|snapshot| {
                let mut tile = Tile::from_save(snapshot);
                tile.load(
                    &mut units,
                    snapshot.occupied_unit.as_ref(),
                    snapshot.spawnable_tile_data.as_ref(),
                );
                tile
            })
            .collect();
        info!(units = units.len(), "board restored");
        Self { tiles, units }
    }

    pub(crate) fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Captures the current state of every tile.
    pub(crate) fn save(&self) -> BoardSave {
        BoardSave::new(self.tiles.iter().map(|tile| tile.save(&self.units)).collect())
    }

    /// Hovers the tile at `index`, applies one edit-mode frame, and leaves it.
    ///
    /// Returns the number of tile type changes reported to the grid.
    pub(crate) fn edit(&mut self, index: usize, input: TileInput) -> Result<usize> {
        let count = self.tiles.len();
        let tile = self
            .tiles
            .get_mut(index)
            .with_context(|| format!("tile index {index} out of range; board has {count} tiles"))?;
        let mut grid = MemoryGrid::editing();
        tile.on_pointer_enter(&grid);
        tile.on_pointer_over(input, &mut grid, &mut self.units, &mut NoGameModeInput);
        tile.on_pointer_exit(&grid);
        Ok(grid.type_changes())
    }
}

/// Renders one line per tile describing occupancy and passability for `faction`.
pub(crate) fn describe_tiles(board: &Board, faction: Faction) -> Vec<String> {
    board
        .tiles()
        .iter()
        .enumerate()
        .map(|(index, tile)| {
            let position = tile.position();
            let occupant = tile.occupant().map_or_else(
                || "-".to_owned(),
                |o| format!("#{} {:?}", o.id.get(), o.faction),
            );
            format!(
                "{index:>3} ({:.1}, {:.1}) {:?} occupant={occupant} empty={} passable={}",
                position.x,
                position.y,
                tile.tile_type(),
                tile.is_tile_empty(),
                tile.is_passable(faction),
            )
        })
        .collect()
}
