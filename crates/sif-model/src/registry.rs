//! Per-kind entity collection of a simulation.

use std::collections::HashMap;

use sif_core::{DataMap, Id, SifError, SifResult};
use tracing::debug;

use crate::entity::{Entity, EntityBase, Handle, Rebind, SimToken};

/// Entities of one kind, in ID order.
///
/// IDs are dense and append-only: the n-th registered entity gets ID n.
/// Names are unique within the registry.
#[derive(Debug)]
pub struct Registry<T> {
    sim: SimToken,
    items: Vec<T>,
    by_name: HashMap<String, Id<T>>,
}

impl<T: Entity> Registry<T> {
    pub(crate) fn new(sim: SimToken) -> Self {
        Self {
            sim,
            items: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register a new entity built from its base.
    pub(crate) fn insert(
        &mut self,
        name: impl Into<String>,
        data: DataMap,
        build: impl FnOnce(EntityBase<T>) -> T,
    ) -> SifResult<Handle<T>> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SifError::EmptyName {
                kind: T::KIND.section_name(),
            });
        }
        if self.by_name.contains_key(&name) {
            return Err(SifError::DuplicateName {
                kind: T::KIND.section_name(),
                name,
            });
        }

        let index = u32::try_from(self.items.len()).map_err(|_| SifError::TooMany {
            kind: T::KIND.section_name(),
        })?;
        let id = Id::from_index(index);
        debug!(kind = %T::KIND, %name, %id, "registered entity");

        self.by_name.insert(name.clone(), id);
        self.items.push(build(EntityBase::new(id, name, data)));
        Ok(self.handle(id))
    }

    /// Copy of this registry owned by the simulation `sim`, with the handles
    /// held by its entities moved along.
    pub(crate) fn duplicate(&self, sim: SimToken) -> Self
    where
        T: Clone + Rebind,
    {
        let items = self
            .items
            .iter()
            .map(|item| {
                let mut item = item.clone();
                item.rebind(self.sim, sim);
                item
            })
            .collect();
        Self {
            sim,
            items,
            by_name: self.by_name.clone(),
        }
    }

    fn handle(&self, id: Id<T>) -> Handle<T> {
        Handle { sim: self.sim, id }
    }

    /// Whether `handle` was issued by the simulation owning this registry.
    pub fn owns(&self, handle: Handle<T>) -> bool {
        handle.sim == self.sim
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        if !self.owns(handle) {
            return None;
        }
        self.items.get(handle.id.index() as usize)
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        if !self.owns(handle) {
            return None;
        }
        self.items.get_mut(handle.id.index() as usize)
    }

    pub fn find(&self, name: &str) -> Option<Handle<T>> {
        self.by_name.get(name).map(|&id| self.handle(id))
    }

    /// Resolve a reference held by the entity called `owner`.
    pub(crate) fn resolve(&self, owner: &str, handle: Handle<T>) -> SifResult<&T> {
        if !self.owns(handle) {
            return Err(SifError::ForeignReference {
                kind: T::KIND.section_name(),
                owner: owner.to_string(),
            });
        }
        self.items
            .get(handle.id.index() as usize)
            .ok_or_else(|| SifError::DanglingReference {
                kind: T::KIND.section_name(),
                owner: owner.to_string(),
                id: handle.id.get(),
            })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Handles of all entities, in ID order.
    pub fn handles(&self) -> impl Iterator<Item = Handle<T>> + '_ {
        self.items.iter().map(|item| self.handle(item.id()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
