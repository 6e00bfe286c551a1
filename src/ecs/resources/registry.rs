use std::collections::{BTreeMap, HashMap};

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;

use crate::ecs::components::Territory;
use crate::error::ClaimRejection;
use crate::model::{Actor, BlockPos, Cuboid, PlayerId, Privileges};

/// Edge length of a spatial index cell, in blocks.
const CELL_SIZE: i32 = 32;

type Cell = (i32, i32, i32);

fn cell_of(pos: BlockPos) -> Cell {
    (
        pos.x.div_euclid(CELL_SIZE),
        pos.y.div_euclid(CELL_SIZE),
        pos.z.div_euclid(CELL_SIZE),
    )
}

fn cells_covering(area: &Cuboid) -> impl Iterator<Item = Cell> {
    let (x0, y0, z0) = cell_of(area.min);
    let (x1, y1, z1) = cell_of(area.max);
    (x0..=x1).flat_map(move |x| (y0..=y1).flat_map(move |y| (z0..=z1).map(move |z| (x, y, z))))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Inserted,
    AlreadyRegistered,
}

/// Spatial index of every registered territory.
///
/// Registered areas never intersect, so any point belongs to at most one
/// territory. Territories are referenced by their marker entity; the area
/// stored here is a copy of the territory's immutable area.
#[derive(Resource, Debug, Default)]
pub struct TerritoryRegistry {
    areas: BTreeMap<Entity, Cuboid>,
    cells: HashMap<Cell, Vec<Entity>>,
}

impl TerritoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a territory unless its area intersects a registered one.
    /// Registering twice is a no-op success.
    pub fn register(
        &mut self,
        territory: Entity,
        area: Cuboid,
    ) -> Result<Registration, ClaimRejection> {
        if self.areas.contains_key(&territory) {
            return Ok(Registration::AlreadyRegistered);
        }
        if self.first_intersecting(&area).is_some() {
            return Err(ClaimRejection::Overlap);
        }
        self.areas.insert(territory, area);
        for cell in cells_covering(&area) {
            self.cells.entry(cell).or_default().push(territory);
        }
        Ok(Registration::Inserted)
    }

    /// Deregister a territory. Returns false if it was not registered.
    pub fn remove(&mut self, territory: Entity) -> bool {
        let Some(area) = self.areas.remove(&territory) else {
            return false;
        };
        for cell in cells_covering(&area) {
            if let Some(entries) = self.cells.get_mut(&cell) {
                entries.retain(|e| *e != territory);
                if entries.is_empty() {
                    self.cells.remove(&cell);
                }
            }
        }
        true
    }

    pub fn contains(&self, territory: Entity) -> bool {
        self.areas.contains_key(&territory)
    }

    pub fn area_of(&self, territory: Entity) -> Option<Cuboid> {
        self.areas.get(&territory).copied()
    }

    /// The registered territory whose area contains `pos`.
    pub fn find(&self, pos: BlockPos) -> Option<Entity> {
        self.cells
            .get(&cell_of(pos))?
            .iter()
            .copied()
            .find(|e| self.areas.get(e).is_some_and(|a| a.contains(pos)))
    }

    /// Any registered territory intersecting `area`.
    pub fn first_intersecting(&self, area: &Cuboid) -> Option<Entity> {
        cells_covering(area)
            .filter_map(|cell| self.cells.get(&cell))
            .flatten()
            .copied()
            .find(|e| self.areas.get(e).is_some_and(|a| a.intersects(area)))
    }

    /// Privileges of `actor` at `pos`; unrestricted where no territory applies.
    pub fn privileges_at<'t>(
        &self,
        actor: &Actor,
        pos: BlockPos,
        lookup: impl FnOnce(Entity) -> Option<&'t Territory>,
    ) -> Privileges {
        self.find(pos)
            .and_then(lookup)
            .map_or(Privileges::MEMBER, |t| t.resolve_privileges(actor))
    }

    /// Registered territories in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &Cuboid)> {
        self.areas.iter().map(|(e, a)| (*e, a))
    }

    pub fn entities(&self) -> Vec<Entity> {
        self.areas.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

/// When each actor was last warned for breaking guarded blocks, in world hours.
#[derive(Resource, Debug, Default)]
pub struct BreakWarnings(pub HashMap<PlayerId, f64>);

impl BreakWarnings {
    /// True if `actor` was warned less than `window_hours` before `now_hours`.
    pub fn within_window(&self, actor: &PlayerId, now_hours: f64, window_hours: f64) -> bool {
        self.0
            .get(actor)
            .is_some_and(|warned| now_hours - warned < window_hours)
    }

    /// Record a warning for `actor`, forgetting warnings that have left the window.
    pub fn record(&mut self, actor: &PlayerId, now_hours: f64, window_hours: f64) {
        self.0.retain(|_, warned| now_hours - *warned < window_hours);
        self.0.insert(actor.clone(), now_hours);
    }
}

#[cfg(test)]
mod tests {
    use bevy_ecs::world::World;

    use super::*;

    fn entities(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn overlapping_registration_fails_and_leaves_state() {
        let e = entities(2);
        let mut reg = TerritoryRegistry::new();
        let a = Cuboid::around(BlockPos::new(0, 64, 0), 16);
        let b = Cuboid::around(BlockPos::new(20, 64, 0), 16);
        assert_eq!(reg.register(e[0], a), Ok(Registration::Inserted));
        assert_eq!(reg.register(e[1], b), Err(ClaimRejection::Overlap));
        assert_eq!(reg.len(), 1);
        assert!(!reg.contains(e[1]));
        assert_eq!(reg.find(BlockPos::new(30, 64, 0)), None);
    }

    #[test]
    fn registration_is_idempotent() {
        let e = entities(1);
        let mut reg = TerritoryRegistry::new();
        let a = Cuboid::around(BlockPos::new(0, 64, 0), 16);
        reg.register(e[0], a).unwrap();
        assert_eq!(reg.register(e[0], a), Ok(Registration::AlreadyRegistered));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn find_across_cells_and_negative_coordinates() {
        let e = entities(2);
        let mut reg = TerritoryRegistry::new();
        reg.register(e[0], Cuboid::around(BlockPos::new(-40, 10, -40), 16))
            .unwrap();
        reg.register(e[1], Cuboid::around(BlockPos::new(100, 10, 100), 16))
            .unwrap();
        assert_eq!(reg.find(BlockPos::new(-56, -6, -24)), Some(e[0]));
        assert_eq!(reg.find(BlockPos::new(-23, 10, -40)), None);
        assert_eq!(reg.find(BlockPos::new(116, 26, 84)), Some(e[1]));
    }

    #[test]
    fn remove_is_idempotent_and_frees_space() {
        let e = entities(2);
        let mut reg = TerritoryRegistry::new();
        let a = Cuboid::around(BlockPos::new(0, 64, 0), 16);
        reg.register(e[0], a).unwrap();
        assert!(reg.remove(e[0]));
        assert!(!reg.remove(e[0]));
        assert!(reg.find(BlockPos::new(0, 64, 0)).is_none());
        assert_eq!(reg.register(e[1], a), Ok(Registration::Inserted));
    }

    #[test]
    fn registered_areas_never_intersect() {
        let e = entities(12);
        let mut reg = TerritoryRegistry::new();
        for (i, entity) in e.iter().enumerate() {
            let x = (i as i32) * 13 - 60;
            let z = ((i as i32) * 37) % 50;
            let _ = reg.register(*entity, Cuboid::around(BlockPos::new(x, 0, z), 8));
        }
        let areas: Vec<Cuboid> = reg.iter().map(|(_, a)| *a).collect();
        for (i, a) in areas.iter().enumerate() {
            for b in &areas[i + 1..] {
                assert!(!a.intersects(b));
            }
        }
    }

    #[test]
    fn break_warning_window() {
        let alice = PlayerId::new("alice");
        let mut warnings = BreakWarnings::default();
        assert!(!warnings.within_window(&alice, 10.0, 1.0));
        warnings.record(&alice, 10.0, 1.0);
        assert!(warnings.within_window(&alice, 10.5, 1.0));
        assert!(!warnings.within_window(&alice, 11.0, 1.0));
    }

    #[test]
    fn stale_warnings_are_pruned_on_record() {
        let alice = PlayerId::new("alice");
        let bob = PlayerId::new("bob");
        let mut warnings = BreakWarnings::default();
        warnings.record(&alice, 10.0, 1.0);
        warnings.record(&bob, 10.5, 1.0);
        assert_eq!(warnings.0.len(), 2);

        warnings.record(&bob, 11.2, 1.0);
        assert_eq!(warnings.0.len(), 1);
        assert!(!warnings.0.contains_key(&alice));
    }
}
