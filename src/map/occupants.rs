//! # Units and Resources
//!
//! Bookkeeping for mobile units and resource nodes on a [`GridMap`].
//!
//! Units move freely in world space and never occupy tiles. Resource nodes
//! sit on a single tile and occupy it like a 1x1 building.

use super::{GridMap, GridPos, ObjectId, WorldPoint, WorldRect};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Side a unit fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Owner of the village
    Defender,
    /// Raiding player
    Attacker,
}

/// A unit as seen by the map: a handle, a position and a side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: ObjectId,
    pub position: WorldPoint,
    pub faction: Faction,
}

impl Unit {
    pub fn new(id: ObjectId, position: WorldPoint, faction: Faction) -> Self {
        Self {
            id,
            position,
            faction,
        }
    }
}

impl GridMap {
    /// Registers a unit, or updates it if the handle is already known.
    pub fn add_unit(&mut self, unit: Unit) {
        match self.units.iter_mut().find(|existing| existing.id == unit.id) {
            Some(existing) => *existing = unit,
            None => self.units.push(unit),
        }
    }

    /// Forgets a unit. Returns false if it was not registered.
    pub fn remove_unit(&mut self, id: ObjectId) -> bool {
        let before = self.units.len();
        self.units.retain(|unit| unit.id != id);
        self.units.len() != before
    }

    /// Moves a registered unit.
    pub fn move_unit(&mut self, id: ObjectId, position: WorldPoint) -> bool {
        match self.units.iter_mut().find(|unit| unit.id == id) {
            Some(unit) => {
                unit.position = position;
                true
            }
            None => {
                warn!("Cannot move unknown unit {}", id);
                false
            }
        }
    }

    pub fn unit(&self, id: ObjectId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    /// Units in registration order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Units whose position lies inside `area` (edges included).
    pub fn units_in_area(&self, area: &WorldRect) -> Vec<&Unit> {
        self.units
            .iter()
            .filter(|unit| area.contains(unit.position))
            .collect()
    }

    /// Closest unit not belonging to `faction` within `max_range`.
    ///
    /// Ties go to the unit registered first.
    pub fn nearest_enemy_unit(
        &self,
        position: WorldPoint,
        max_range: f32,
        faction: Faction,
    ) -> Option<&Unit> {
        self.units
            .iter()
            .filter(|unit| unit.faction != faction)
            .map(|unit| (unit, unit.position.distance(position)))
            .filter(|(_, distance)| *distance <= max_range)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(unit, _)| unit)
    }

    /// Places a resource node on a single free, buildable tile.
    pub fn add_resource(&mut self, id: ObjectId, pos: GridPos) -> bool {
        if self.holds_object(id) {
            debug!("Object {} is already on the map", id);
            return false;
        }
        match self.tile_mut(pos) {
            Some(tile) if tile.accepts_building() => {
                tile.occupy(id);
                self.resources.insert(pos, id);
                debug!("Placed resource {} at {}", id, pos);
                true
            }
            _ => false,
        }
    }

    /// Removes the resource node at `pos`, returning its handle.
    pub fn remove_resource(&mut self, pos: GridPos) -> Option<ObjectId> {
        let id = self.resources.remove(&pos)?;
        if let Some(tile) = self.tile_mut(pos) {
            if tile.occupant() == Some(id) {
                tile.vacate();
            }
        }
        Some(id)
    }

    pub fn resource_at(&self, pos: GridPos) -> Option<ObjectId> {
        self.resources.get(&pos).copied()
    }

    pub fn resources(&self) -> impl Iterator<Item = (&GridPos, &ObjectId)> {
        self.resources.iter()
    }
}
