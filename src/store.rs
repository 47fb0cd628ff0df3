//! Ordered in-memory collection of entities.
//!
//! The store is a plain synchronous structure. It is owned by exactly one
//! [`ResourceActor`](crate::actor_framework::ResourceActor), which is what
//! serializes mutations; the store itself does no locking.

use std::sync::Arc;

use crate::actor_framework::Entity;

/// Full ordered view of a collection at one point in time.
pub type Snapshot<T> = Arc<[T]>;

/// Insertion-ordered entity collection with counter-based id assignment.
pub struct EntityStore<T: Entity> {
    items: Vec<T>,
    next_seq: u64,
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_seq: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Linear lookup by id.
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// All entities in insertion order.
    pub fn list(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        Arc::from(self.items.as_slice())
    }

    /// Appends a new entity and returns it.
    ///
    /// The id comes from a counter that only ever grows, so an id is never
    /// handed out twice even after deletes.
    pub fn create(&mut self, input: T::Input) -> T {
        let id = T::assign_id(self.next_seq);
        self.next_seq += 1;

        let item = T::from_input(id, input);
        self.items.push(item.clone());
        item
    }

    /// Overwrites every input field of the matching entity. The id is kept.
    pub fn update(&mut self, id: &T::Id, input: T::Input) -> Option<T> {
        let item = self.items.iter_mut().find(|item| item.id() == id)?;
        item.apply_input(input);
        Some(item.clone())
    }

    /// Removes the matching entity without reordering the rest.
    pub fn delete(&mut self, id: &T::Id) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }
}
