//! Capabilities a tile consumes from the systems that own shared board state.

use tactics_core::{Faction, Occupant, TileType, UnitId, UnitSnapshot};

use crate::{Tile, TileInput};

/// Board-level authority that tracks selection, edit mode and click routing.
pub trait GridAuthority {
    /// Reports whether the provided unit is the one currently selected.
    fn is_unit_selected(&self, unit: UnitId) -> bool;

    /// Reports whether the tile belongs to the selected unit's move pool.
    fn is_tile_in_move_pool(&self, tile: &Tile) -> bool;

    /// Reports whether map editing is active.
    fn is_map_edit_enabled(&self) -> bool;

    /// Routes a game-mode primary click on the tile.
    fn left_click_input_handler(&mut self, tile: &Tile, occupant: Option<Occupant>);

    /// Notifies the grid that the tile switched to a new type.
    fn set_tile_type(&mut self, tile: &Tile, tile_type: TileType);
}

/// Authority that owns unit lifetimes.
///
/// Placement and removal receive the tile so the authority can record
/// occupancy through [`Tile::occupy_tile`] and [`Tile::remove_unit`].
pub trait UnitAuthority {
    /// Creates the currently selected unit kind on the tile.
    fn add_unit(&mut self, tile: &mut Tile);

    /// Destroys the unit and clears it from the tile.
    fn remove_unit(&mut self, unit: UnitId, tile: &mut Tile);

    /// Reports whether a unit kind is selected for placement.
    fn has_selected_unit(&self) -> bool;

    /// Moves the unit to the opposing team, returning its new faction.
    ///
    /// Returns `None` when the authority does not know the unit.
    fn swap_unit_team(&mut self, unit: UnitId) -> Option<Faction>;

    /// Recreates a unit from its snapshot and places it on the tile.
    fn load_unit(&mut self, tile: &mut Tile, snapshot: &UnitSnapshot);

    /// Captures the unit's persisted state.
    fn save_unit(&self, unit: UnitId) -> Option<UnitSnapshot>;
}

/// Per-variant behaviour run after a game-mode click has been routed.
pub trait GameModeHook {
    /// Handles tile-specific game-mode input. Does nothing unless overridden.
    fn game_mode_input(
        &mut self,
        _tile: &mut Tile,
        _input: TileInput,
        _units: &mut dyn UnitAuthority,
    ) {
    }
}

/// Hook that performs no additional game-mode handling.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGameModeInput;

impl GameModeHook for NoGameModeInput {}
