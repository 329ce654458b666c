// world.rs - ECS World: entity registry and type-erased component storage

use std::any::{type_name, Any, TypeId};
use std::collections::{btree_map, BTreeMap, BTreeSet, HashMap};

use crate::ecs::{Component, EntityId, WorldError};

type ComponentCell = Box<dyn Any + Send + Sync>;

/// Storage for one component type: entity id -> owned instance.
///
/// A `BTreeMap` keeps query iteration in ascending entity-id order, which
/// is what makes `get_components` deterministic across runs.
#[derive(Default)]
struct ComponentColumn {
    cells: BTreeMap<EntityId, ComponentCell>,
}

/// The ECS world: entity lifecycle, names, and component storage.
///
/// Each live entity owns zero-or-one instance of every component type and
/// has a name unique among live entities. Deletion is a hard barrier: it
/// releases all components and frees the name, so stale references fail
/// lookup instead of aliasing a recycled id.
#[derive(Default)]
pub struct World {
    next_id: u32,
    recycled: BTreeSet<u32>,
    names: HashMap<String, EntityId>,
    entities: BTreeMap<EntityId, String>,
    columns: HashMap<TypeId, ComponentColumn>,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity, allocating the lowest unused id.
    ///
    /// A `None` name auto-assigns `entity_<id>` so every live entity is
    /// addressable by messages.
    pub fn new_entity(&mut self, name: Option<&str>) -> Result<EntityId, WorldError> {
        if let Some(name) = name {
            if self.names.contains_key(name) {
                return Err(WorldError::DuplicateName {
                    name: name.to_string(),
                });
            }
        }

        let raw = match self.recycled.pop_first() {
            Some(raw) => raw,
            None => {
                let raw = self.next_id;
                self.next_id += 1;
                raw
            }
        };
        let id = EntityId::new(raw);

        let name = match name {
            Some(name) => name.to_string(),
            None => {
                let mut generated = format!("entity_{}", id.raw());
                // A caller-picked name may shadow the generated form.
                while self.names.contains_key(&generated) {
                    generated.push('_');
                }
                generated
            }
        };

        self.names.insert(name.clone(), id);
        self.entities.insert(id, name);
        Ok(id)
    }

    /// Delete an entity, releasing all of its components and its name.
    ///
    /// Deleting an id that is not alive returns [`WorldError::NotFound`];
    /// message-driven callers (the spawner's `delete` path) treat that as a
    /// silent skip, which makes repeated delete messages a no-op.
    pub fn delete_entity(&mut self, id: EntityId) -> Result<(), WorldError> {
        let name = self
            .entities
            .remove(&id)
            .ok_or(WorldError::NotFound { id })?;
        self.names.remove(&name);
        for column in self.columns.values_mut() {
            column.cells.remove(&id);
        }
        self.recycled.insert(id.raw());
        Ok(())
    }

    /// Rename a live entity, freeing its old name.
    pub fn set_name(&mut self, id: EntityId, name: &str) -> Result<(), WorldError> {
        if !self.entities.contains_key(&id) {
            return Err(WorldError::NotFound { id });
        }
        if let Some(&owner) = self.names.get(name) {
            if owner == id {
                return Ok(());
            }
            return Err(WorldError::DuplicateName {
                name: name.to_string(),
            });
        }
        if let Some(old) = self.entities.insert(id, name.to_string()) {
            self.names.remove(&old);
        }
        self.names.insert(name.to_string(), id);
        Ok(())
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Drop all entities, names, and components (new-game / end-game path).
    pub fn clear(&mut self) {
        self.next_id = 0;
        self.recycled.clear();
        self.names.clear();
        self.entities.clear();
        self.columns.clear();
    }

    /// Attach a component to an entity.
    ///
    /// An entity owns at most one component of a given type; a second add
    /// without deletion fails with [`WorldError::DuplicateComponent`].
    pub fn add_component<T: Component>(
        &mut self,
        id: EntityId,
        component: T,
    ) -> Result<(), WorldError> {
        if !self.entities.contains_key(&id) {
            return Err(WorldError::NotFound { id });
        }
        let column = self.columns.entry(TypeId::of::<T>()).or_default();
        match column.cells.entry(id) {
            btree_map::Entry::Occupied(_) => Err(WorldError::DuplicateComponent {
                id,
                component: type_name::<T>(),
            }),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(Box::new(component));
                Ok(())
            }
        }
    }

    /// Read-only view of an entity's `T` component.
    ///
    /// Absence is not a programming error — a system that requires `T`
    /// checks [`World::has_component`] first or handles the failure.
    pub fn get_component<T: Component>(&self, id: EntityId) -> Result<&T, WorldError> {
        self.columns
            .get(&TypeId::of::<T>())
            .and_then(|column| column.cells.get(&id))
            .and_then(|cell| cell.downcast_ref::<T>())
            .ok_or(WorldError::ComponentNotFound {
                id,
                component: type_name::<T>(),
            })
    }

    /// Mutable view of an entity's `T` component.
    pub fn set_component<T: Component>(&mut self, id: EntityId) -> Result<&mut T, WorldError> {
        self.columns
            .get_mut(&TypeId::of::<T>())
            .and_then(|column| column.cells.get_mut(&id))
            .and_then(|cell| cell.downcast_mut::<T>())
            .ok_or(WorldError::ComponentNotFound {
                id,
                component: type_name::<T>(),
            })
    }

    /// Whether the entity currently owns a `T`.
    pub fn has_component<T: Component>(&self, id: EntityId) -> bool {
        self.columns
            .get(&TypeId::of::<T>())
            .is_some_and(|column| column.cells.contains_key(&id))
    }

    /// Every `(entity, component)` pair for `T`, entity-id ascending.
    pub fn get_components<T: Component>(&self) -> Vec<(EntityId, &T)> {
        match self.columns.get(&TypeId::of::<T>()) {
            Some(column) => column
                .cells
                .iter()
                .filter_map(|(id, cell)| cell.downcast_ref::<T>().map(|c| (*id, c)))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Mutable analogue of [`World::get_components`], same ordering.
    pub fn set_components<T: Component>(&mut self) -> Vec<(EntityId, &mut T)> {
        match self.columns.get_mut(&TypeId::of::<T>()) {
            Some(column) => column
                .cells
                .iter_mut()
                .filter_map(|(id, cell)| cell.downcast_mut::<T>().map(|c| (*id, c)))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Resolve an entity name to its id.
    pub fn get_id(&self, name: &str) -> Result<EntityId, WorldError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| WorldError::NameNotFound {
                name: name.to_string(),
            })
    }

    /// Resolve an entity id to its name.
    pub fn get_name(&self, id: EntityId) -> Result<&str, WorldError> {
        self.entities
            .get(&id)
            .map(String::as_str)
            .ok_or(WorldError::NotFound { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Position {
        x: i32,
        y: i32,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Velocity {
        x: i32,
        y: i32,
    }

    #[test]
    fn add_then_get_roundtrip() {
        let mut world = World::new();
        let e = world.new_entity(Some("probe")).unwrap();
        world.add_component(e, Position { x: 3, y: 4 }).unwrap();

        assert_eq!(
            world.get_component::<Position>(e),
            Ok(&Position { x: 3, y: 4 })
        );
    }

    #[test]
    fn duplicate_component_fails() {
        let mut world = World::new();
        let e = world.new_entity(None).unwrap();
        world.add_component(e, Position { x: 0, y: 0 }).unwrap();

        let err = world.add_component(e, Position { x: 9, y: 9 }).unwrap_err();
        assert!(matches!(err, WorldError::DuplicateComponent { .. }));
        // The original instance is untouched.
        assert_eq!(
            world.get_component::<Position>(e),
            Ok(&Position { x: 0, y: 0 })
        );
    }

    #[test]
    fn duplicate_name_fails() {
        let mut world = World::new();
        world.new_entity(Some("player_1")).unwrap();
        let err = world.new_entity(Some("player_1")).unwrap_err();
        assert_eq!(
            err,
            WorldError::DuplicateName {
                name: "player_1".to_string()
            }
        );
    }

    #[test]
    fn unnamed_entities_get_addressable_names() {
        let mut world = World::new();
        let e = world.new_entity(None).unwrap();
        let name = world.get_name(e).unwrap().to_string();
        assert_eq!(world.get_id(&name), Ok(e));
    }

    #[test]
    fn delete_releases_components_and_name() {
        let mut world = World::new();
        let e = world.new_entity(Some("victim")).unwrap();
        world.add_component(e, Position { x: 1, y: 1 }).unwrap();
        world.add_component(e, Velocity { x: 2, y: 2 }).unwrap();

        world.delete_entity(e).unwrap();

        assert!(!world.has_component::<Position>(e));
        assert!(!world.has_component::<Velocity>(e));
        assert!(world.get_id("victim").is_err());
        assert!(!world.is_alive(e));
    }

    #[test]
    fn delete_twice_reports_not_found() {
        let mut world = World::new();
        let e = world.new_entity(None).unwrap();
        world.delete_entity(e).unwrap();
        assert_eq!(world.delete_entity(e), Err(WorldError::NotFound { id: e }));
    }

    #[test]
    fn lowest_unused_id_is_recycled() {
        let mut world = World::new();
        let a = world.new_entity(None).unwrap();
        let _b = world.new_entity(None).unwrap();
        world.delete_entity(a).unwrap();

        let c = world.new_entity(None).unwrap();
        assert_eq!(c.raw(), a.raw());
    }

    #[test]
    fn query_iterates_in_entity_id_order() {
        let mut world = World::new();
        let ids: Vec<EntityId> = (0..4).map(|_| world.new_entity(None).unwrap()).collect();
        // Insert out of id order; iteration must still come back ascending.
        for &id in ids.iter().rev() {
            world
                .add_component(id, Position {
                    x: id.raw() as i32,
                    y: 0,
                })
                .unwrap();
        }

        let seen: Vec<u32> = world
            .get_components::<Position>()
            .iter()
            .map(|(id, _)| id.raw())
            .collect();
        let mut sorted = seen.clone();
        sorted.sort_unstable();
        assert_eq!(seen, sorted);
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn set_components_mutates_in_place() {
        let mut world = World::new();
        let e = world.new_entity(None).unwrap();
        world.add_component(e, Position { x: 0, y: 0 }).unwrap();

        for (_, pos) in world.set_components::<Position>() {
            pos.x += 10;
        }
        assert_eq!(
            world.get_component::<Position>(e),
            Ok(&Position { x: 10, y: 0 })
        );
    }

    #[test]
    fn component_access_on_missing_type_fails() {
        let mut world = World::new();
        let e = world.new_entity(None).unwrap();
        assert!(matches!(
            world.get_component::<Velocity>(e),
            Err(WorldError::ComponentNotFound { .. })
        ));
        assert!(!world.has_component::<Velocity>(e));
        assert!(world.get_components::<Velocity>().is_empty());
    }

    #[test]
    fn set_name_frees_old_name() {
        let mut world = World::new();
        let e = world.new_entity(Some("old")).unwrap();
        world.set_name(e, "new").unwrap();

        assert_eq!(world.get_id("new"), Ok(e));
        assert!(world.get_id("old").is_err());

        let other = world.new_entity(None).unwrap();
        let err = world.set_name(other, "new").unwrap_err();
        assert!(matches!(err, WorldError::DuplicateName { .. }));
    }

    #[test]
    fn clear_resets_everything() {
        let mut world = World::new();
        let e = world.new_entity(Some("gone")).unwrap();
        world.add_component(e, Position { x: 1, y: 2 }).unwrap();

        world.clear();

        assert_eq!(world.entity_count(), 0);
        assert!(world.get_id("gone").is_err());
        let fresh = world.new_entity(None).unwrap();
        assert_eq!(fresh.raw(), 0);
    }
}
