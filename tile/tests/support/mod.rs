#![allow(dead_code)]

use std::collections::BTreeMap;

use tactics_core::{Faction, Occupant, TilePosition, TileType, UnitId, UnitSnapshot};
use tactics_tile::{GridAuthority, Tile, UnitAuthority};

#[derive(Debug, Default)]
pub struct RecordingGrid {
    pub edit_mode: bool,
    pub selected: Option<UnitId>,
    pub move_pool: Vec<TilePosition>,
    pub clicks: Vec<(TilePosition, Option<Occupant>)>,
    pub type_changes: Vec<(TilePosition, TileType)>,
}

impl RecordingGrid {
    pub fn editing() -> Self {
        Self {
            edit_mode: true,
            ..Self::default()
        }
    }
}

impl GridAuthority for RecordingGrid {
    fn is_unit_selected(&self, unit: UnitId) -> bool {
        self.selected == Some(unit)
    }

    fn is_tile_in_move_pool(&self, tile: &Tile) -> bool {
        self.move_pool.contains(&tile.position())
    }

    fn is_map_edit_enabled(&self) -> bool {
        self.edit_mode
    }

    fn left_click_input_handler(&mut self, tile: &Tile, occupant: Option<Occupant>) {
        self.clicks.push((tile.position(), occupant));
    }

    fn set_tile_type(&mut self, tile: &Tile, tile_type: TileType) {
        self.type_changes.push((tile.position(), tile_type));
    }
}

#[derive(Debug, Default)]
pub struct RecordingUnits {
    pub placement: Option<Faction>,
    pub units: BTreeMap<UnitId, UnitSnapshot>,
    pub removed: Vec<UnitId>,
    pub loaded: Vec<UnitId>,
    next_id: u32,
}

impl RecordingUnits {
    pub fn placing(faction: Faction) -> Self {
        Self {
            placement: Some(faction),
            ..Self::default()
        }
    }

    pub fn spawn(&mut self, faction: Faction) -> Occupant {
        self.next_id += 1;
        let id = UnitId::new(self.next_id);
        let _ = self.units.insert(
            id,
            UnitSnapshot {
                unit_id: id,
                faction,
                unit_type: "Knight".to_owned(),
                health: 10,
            },
        );
        Occupant::new(id, faction)
    }
}

impl UnitAuthority for RecordingUnits {
    fn add_unit(&mut self, tile: &mut Tile) {
        if let Some(faction) = self.placement {
            let occupant = self.spawn(faction);
            let _ = tile.occupy_tile(occupant);
        }
    }

    fn remove_unit(&mut self, unit: UnitId, tile: &mut Tile) {
        let _ = self.units.remove(&unit);
        self.removed.push(unit);
        let _ = tile.remove_unit();
    }

    fn has_selected_unit(&self) -> bool {
        self.placement.is_some()
    }

    fn swap_unit_team(&mut self, unit: UnitId) -> Option<Faction> {
        let snapshot = self.units.get_mut(&unit)?;
        snapshot.faction = snapshot.faction.opposing();
        Some(snapshot.faction)
    }

    fn load_unit(&mut self, tile: &mut Tile, snapshot: &UnitSnapshot) {
        let _ = self.units.insert(snapshot.unit_id, snapshot.clone());
        self.loaded.push(snapshot.unit_id);
        let _ = tile.occupy_tile(Occupant::new(snapshot.unit_id, snapshot.faction));
    }

    fn save_unit(&self, unit: UnitId) -> Option<UnitSnapshot> {
        self.units.get(&unit).cloned()
    }
}

pub fn grass_at(x: f32, y: f32) -> Tile {
    Tile::new(TilePosition::new(x, y), TileType::Grass, true)
}
