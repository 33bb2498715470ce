#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-tile behaviour for the tactics board.
//!
//! A [`Tile`] holds its own terrain, walkability and occupant record and
//! reacts to pointer transitions delivered by whatever host owns input
//! polling. Shared board state is never reached through globals: every
//! handler receives the [`GridAuthority`] and [`UnitAuthority`] it needs, so a
//! tile can be driven by a real game loop or by recording doubles alike.

mod authority;

pub use authority::{GameModeHook, GridAuthority, NoGameModeInput, UnitAuthority};

use tactics_core::{
    Faction, Occupant, OccupancyChange, SpawnableSnapshot, TilePosition, TileSaveObject, TileType,
    UnitSnapshot,
};
use tracing::{debug, trace, warn};

/// Pointer interaction state of a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HoverState {
    /// The pointer is not over the tile.
    #[default]
    Idle,
    /// The pointer is over the tile.
    Hovered,
    /// The pointer is over the tile and its occupant is not the selected unit.
    HoveredWithUnit,
}

/// Button and key edges observed on a frame while the pointer rests on a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileInput {
    /// Primary button went down this frame.
    pub primary_pressed: bool,
    /// Secondary button went down this frame.
    pub secondary_pressed: bool,
    /// Tertiary button went down this frame.
    pub tertiary_pressed: bool,
    /// Unit placement modifier is held.
    pub unit_modifier_held: bool,
    /// Team swap key went down this frame.
    pub team_swap_pressed: bool,
}

/// Shape-specific data carried by a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileVariant {
    /// Plain tile without extra data.
    Standard,
    /// Tile that can act as a spawn point.
    Spawnable {
        /// Team that claimed the spawn point, if any.
        owner: Option<Faction>,
    },
}

impl TileVariant {
    fn for_type(tile_type: TileType) -> Self {
        match tile_type {
            TileType::SpawnableTile => Self::Spawnable { owner: None },
            TileType::Grass | TileType::Fortress | TileType::PlayerCastle => Self::Standard,
        }
    }
}

/// Spawn payload exposed by spawnable tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnPayload {
    /// Team that claimed the spawn point, if any.
    pub owner: Option<Faction>,
}

impl SpawnPayload {
    fn snapshot(self) -> SpawnableSnapshot {
        SpawnableSnapshot {
            tile_owner: self.owner,
        }
    }
}

/// A single cell of the tactics board.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    position: TilePosition,
    tile_type: TileType,
    variant: TileVariant,
    is_walkable: bool,
    occupant: Option<Occupant>,
    hover: HoverState,
    hover_highlight: bool,
}

impl Tile {
    /// Creates an unoccupied, idle tile.
    #[must_use]
    pub fn new(position: TilePosition, tile_type: TileType, is_walkable: bool) -> Self {
        Self {
            position,
            tile_type,
            variant: TileVariant::for_type(tile_type),
            is_walkable,
            occupant: None,
            hover: HoverState::Idle,
            hover_highlight: false,
        }
    }

    /// Creates a tile from a snapshot.
    ///
    /// Type, walkability, position and the spawnable variant are restored
    /// here; the variant follows `spawnable_tile_data`, not the tile type. The
    /// occupant comes back through [`Tile::load`].
    #[must_use]
    pub fn from_save(save: &TileSaveObject) -> Self {
        let mut tile = Self::new(save.position(), save.tile_type, save.is_walkable);
        tile.variant = match save.spawnable_tile_data {
            Some(data) => TileVariant::Spawnable {
                owner: data.tile_owner,
            },
            None => TileVariant::Standard,
        };
        if tile.variant != TileVariant::for_type(save.tile_type) {
            warn!(
                tile_type = ?save.tile_type,
                spawnable_data = save.spawnable_tile_data.is_some(),
                "tile type disagrees with saved spawnable data"
            );
        }
        tile
    }

    /// World position of the tile.
    #[must_use]
    pub const fn position(&self) -> TilePosition {
        self.position
    }

    /// Current terrain category.
    #[must_use]
    pub const fn tile_type(&self) -> TileType {
        self.tile_type
    }

    /// Whether units may ever stand on or pass the tile.
    #[must_use]
    pub const fn is_walkable(&self) -> bool {
        self.is_walkable
    }

    /// Shape-specific data carried by the tile.
    #[must_use]
    pub const fn variant(&self) -> TileVariant {
        self.variant
    }

    /// Spawn payload, present only on spawnable tiles.
    #[must_use]
    pub const fn spawn_payload(&self) -> Option<SpawnPayload> {
        match self.variant {
            TileVariant::Spawnable { owner } => Some(SpawnPayload { owner }),
            TileVariant::Standard => None,
        }
    }

    /// Unit currently recorded on the tile.
    #[must_use]
    pub const fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    /// Pointer interaction state.
    #[must_use]
    pub const fn hover_state(&self) -> HoverState {
        self.hover
    }

    /// True while the pointer rests on the tile and its occupant is not selected.
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hover == HoverState::HoveredWithUnit
    }

    /// Whether the hover highlight is currently shown.
    #[must_use]
    pub const fn is_hover_highlight_active(&self) -> bool {
        self.hover_highlight
    }

    /// Shows or hides the hover highlight.
    pub fn set_hover_highlight(&mut self, active: bool) {
        self.hover_highlight = active;
    }

    /// True when the tile is walkable and nobody stands on it.
    #[must_use]
    pub fn is_tile_empty(&self) -> bool {
        self.is_walkable && self.occupant.is_none()
    }

    /// True when a unit of `faction` may move through the tile.
    #[must_use]
    pub fn is_passable(&self, faction: Faction) -> bool {
        self.is_walkable
            && self
                .occupant
                .map_or(true, |occupant| occupant.faction == faction)
    }

    /// Records a unit on the tile, overwriting any previous occupant.
    pub fn occupy_tile(&mut self, occupant: Occupant) -> OccupancyChange {
        match self.occupant.replace(occupant) {
            Some(previous) => {
                warn!(
                    replaced = previous.id.get(),
                    unit = occupant.id.get(),
                    "occupied tile overwritten"
                );
                OccupancyChange::Replaced(previous)
            }
            None => OccupancyChange::Vacant,
        }
    }

    /// Clears the occupant, returning the previous record if there was one.
    pub fn remove_unit(&mut self) -> Option<Occupant> {
        self.occupant.take()
    }

    /// Updates the cached faction of the occupant after a team change.
    ///
    /// Team swaps triggered through [`Tile::on_pointer_over`] call this
    /// automatically; any other team change must call it for
    /// [`Tile::is_passable`] to see the new team. Has no effect on an empty tile.
    pub fn refresh_occupant_faction(&mut self, faction: Faction) {
        if let Some(occupant) = self.occupant.as_mut() {
            occupant.faction = faction;
        }
    }

    /// Handles the pointer entering the tile.
    pub fn on_pointer_enter(&mut self, grid: &dyn GridAuthority) {
        self.hover = match self.occupant {
            Some(occupant) if !grid.is_unit_selected(occupant.id) => HoverState::HoveredWithUnit,
            _ => HoverState::Hovered,
        };
        trace!(state = ?self.hover, "pointer entered tile");
        self.set_hover_highlight(true);
    }

    /// Handles the pointer leaving the tile.
    ///
    /// Tiles in the move pool keep their highlight.
    pub fn on_pointer_exit(&mut self, grid: &dyn GridAuthority) {
        self.hover = HoverState::Idle;
        if !grid.is_tile_in_move_pool(self) {
            self.set_hover_highlight(false);
        }
        trace!(highlight = self.hover_highlight, "pointer left tile");
    }

    /// Handles a frame during which the pointer rests on the tile.
    pub fn on_pointer_over(
        &mut self,
        input: TileInput,
        grid: &mut dyn GridAuthority,
        units: &mut dyn UnitAuthority,
        hook: &mut dyn GameModeHook,
    ) {
        if grid.is_map_edit_enabled() {
            self.edit_mode_input(input, grid, units);
        } else {
            if input.primary_pressed {
                debug!(occupant = ?self.occupant, "routing primary click to grid");
                grid.left_click_input_handler(self, self.occupant);
            }
            hook.game_mode_input(self, input, units);
        }
    }

    fn edit_mode_input(
        &mut self,
        input: TileInput,
        grid: &mut dyn GridAuthority,
        units: &mut dyn UnitAuthority,
    ) {
        if input.primary_pressed {
            if input.unit_modifier_held && units.has_selected_unit() {
                self.toggle_unit(units);
            } else {
                self.change_type(self.tile_type.next(), grid);
            }
        }

        if input.secondary_pressed {
            self.change_type(self.tile_type.previous(), grid);
        }

        if input.tertiary_pressed && units.has_selected_unit() {
            self.toggle_unit(units);
        }

        if input.team_swap_pressed {
            if let Some(occupant) = self.occupant {
                match units.swap_unit_team(occupant.id) {
                    Some(faction) => {
                        debug!(unit = occupant.id.get(), ?faction, "occupant changed team");
                        self.refresh_occupant_faction(faction);
                    }
                    None => warn!(unit = occupant.id.get(), "team swap ignored by unit authority"),
                }
            }
        }
    }

    fn toggle_unit(&mut self, units: &mut dyn UnitAuthority) {
        match self.occupant {
            Some(occupant) => {
                debug!(unit = occupant.id.get(), "removing occupant");
                units.remove_unit(occupant.id, self);
            }
            None => {
                debug!("requesting unit placement");
                units.add_unit(self);
            }
        }
    }

    fn change_type(&mut self, tile_type: TileType, grid: &mut dyn GridAuthority) {
        debug!(from = ?self.tile_type, to = ?tile_type, "tile type changed");
        self.tile_type = tile_type;
        self.variant = TileVariant::for_type(tile_type);
        grid.set_tile_type(self, tile_type);
    }

    /// Captures the tile's persisted state.
    ///
    /// The occupant's snapshot comes from the unit authority.
    #[must_use]
    pub fn save(&self, units: &dyn UnitAuthority) -> TileSaveObject {
        let occupied_unit = self.occupant.and_then(|occupant| {
            let snapshot = units.save_unit(occupant.id);
            if snapshot.is_none() {
                warn!(
                    unit = occupant.id.get(),
                    "occupant unknown to unit authority; saved as empty"
                );
            }
            snapshot
        });

        TileSaveObject {
            tile_type: self.tile_type,
            is_walkable: self.is_walkable,
            pos_x: self.position.x,
            pos_y: self.position.y,
            occupied_unit,
            spawnable_tile_data: self.spawn_payload().map(SpawnPayload::snapshot),
        }
    }

    /// Restores the occupant through the unit authority.
    ///
    /// Spawnable data is accepted but not applied yet.
    pub fn load(
        &mut self,
        units: &mut dyn UnitAuthority,
        unit: Option<&UnitSnapshot>,
        spawnable: Option<&SpawnableSnapshot>,
    ) {
        if let Some(snapshot) = unit {
            debug!(unit = snapshot.unit_id.get(), "loading occupant");
            units.load_unit(self, snapshot);
        }

        if let (Some(_), Some(data)) = (self.spawn_payload(), spawnable) {
            self.restore_spawn_payload(data);
        }
    }

    // TODO: apply `tile_owner` once spawn point ownership has a defined effect on load.
    fn restore_spawn_payload(&self, data: &SpawnableSnapshot) {
        debug!(owner = ?data.tile_owner, "spawnable tile data not restored");
    }
}
