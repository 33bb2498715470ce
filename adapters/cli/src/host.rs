//! In-memory grid and unit authorities backing the command-line tools.

use std::collections::BTreeMap;

use tactics_core::{Faction, Occupant, TileType, UnitId, UnitSnapshot};
use tactics_tile::{GridAuthority, Tile, UnitAuthority};
use tracing::{debug, info, warn};

/// Grid authority with no selection and no move pool.
#[derive(Debug, Default)]
pub(crate) struct MemoryGrid {
    edit_mode: bool,
    type_changes: usize,
}

impl MemoryGrid {
    pub(crate) fn editing() -> Self {
        Self {
            edit_mode: true,
            type_changes: 0,
        }
    }

    pub(crate) const fn type_changes(&self) -> usize {
        self.type_changes
    }
}

impl GridAuthority for MemoryGrid {
    fn is_unit_selected(&self, _unit: UnitId) -> bool {
        false
    }

    fn is_tile_in_move_pool(&self, _tile: &Tile) -> bool {
        false
    }

    fn is_map_edit_enabled(&self) -> bool {
        self.edit_mode
    }

    fn left_click_input_handler(&mut self, tile: &Tile, occupant: Option<Occupant>) {
        info!(position = ?tile.position(), ?occupant, "click routed");
    }

    fn set_tile_type(&mut self, tile: &Tile, tile_type: TileType) {
        self.type_changes += 1;
        debug!(position = ?tile.position(), ?tile_type, "tile type recorded");
    }
}

/// Unit authority storing snapshots keyed by identifier.
#[derive(Debug, Default)]
pub(crate) struct MemoryUnits {
    placement: Option<Faction>,
    units: BTreeMap<UnitId, UnitSnapshot>,
}

impl MemoryUnits {
    /// Places new units of the given faction when asked to add one.
    pub(crate) fn placing(faction: Option<Faction>) -> Self {
        Self {
            placement: faction,
            units: BTreeMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.units.len()
    }

    /// Next identifier above the highest in use, or the lowest free one once
    /// the top of the range is taken.
    fn next_id(&self) -> Option<UnitId> {
        let highest = self.units.keys().next_back().map_or(0, UnitId::get);
        highest
            .checked_add(1)
            .or_else(|| {
                (1..=u32::MAX).find(|id| !self.units.contains_key(&UnitId::new(*id)))
            })
            .map(UnitId::new)
    }
}

impl UnitAuthority for MemoryUnits {
    fn add_unit(&mut self, tile: &mut Tile) {
        let Some(faction) = self.placement else {
            return;
        };
        let Some(id) = self.next_id() else {
            warn!("no unit identifiers left; placement skipped");
            return;
        };
        let _ = self.units.insert(
            id,
            UnitSnapshot {
                unit_id: id,
                faction,
                unit_type: "Soldier".to_owned(),
                health: 10,
            },
        );
        let _ = tile.occupy_tile(Occupant::new(id, faction));
    }

    fn remove_unit(&mut self, unit: UnitId, tile: &mut Tile) {
        let _ = self.units.remove(&unit);
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
        let _ = tile.occupy_tile(Occupant::new(snapshot.unit_id, snapshot.faction));
    }

    fn save_unit(&self, unit: UnitId) -> Option<UnitSnapshot> {
        self.units.get(&unit).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::TilePosition;

    #[test]
    fn placed_units_receive_fresh_identifiers() {
        let mut units = MemoryUnits::placing(Some(Faction::Red));
        let mut first = Tile::new(TilePosition::new(0.0, 0.0), TileType::Grass, true);
        let mut second = Tile::new(TilePosition::new(1.0, 0.0), TileType::Grass, true);
        units.load_unit(
            &mut first,
            &UnitSnapshot {
                unit_id: UnitId::new(4),
                faction: Faction::Blue,
                unit_type: "Archer".to_owned(),
                health: 3,
            },
        );

        units.add_unit(&mut second);

        assert_eq!(second.occupant().map(|o| o.id), Some(UnitId::new(5)));
        assert_eq!(units.len(), 2);
    }

    #[test]
    fn placement_after_highest_identifier_reuses_free_one() {
        let mut units = MemoryUnits::placing(Some(Faction::Red));
        let mut loaded = Tile::new(TilePosition::new(0.0, 0.0), TileType::Grass, true);
        let mut placed = Tile::new(TilePosition::new(1.0, 0.0), TileType::Grass, true);
        units.load_unit(
            &mut loaded,
            &UnitSnapshot {
                unit_id: UnitId::new(u32::MAX),
                faction: Faction::Blue,
                unit_type: "Archer".to_owned(),
                health: 3,
            },
        );

        units.add_unit(&mut placed);

        assert_eq!(placed.occupant().map(|o| o.id), Some(UnitId::new(1)));
        assert_eq!(units.len(), 2);
    }

    #[test]
    fn placement_without_faction_is_ignored() {
        let mut units = MemoryUnits::default();
        let mut tile = Tile::new(TilePosition::new(0.0, 0.0), TileType::Grass, true);

        units.add_unit(&mut tile);

        assert!(tile.is_tile_empty());
        assert!(!units.has_selected_unit());
    }
}
