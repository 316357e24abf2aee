//! # Extents
//!
//! Every registered instance is kept in the extent of its type for the lifetime
//! of the owning [`Extents`]. There is no removal; identities are never reused.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use tracing::trace;

use crate::object::{Entity, Kind, ObjectRef, Oid};

/// All instances of one type, in registration order.
pub struct Extent<T> {
    items: Vec<T>,
}

impl<T: Entity> Extent<T> {
    fn new() -> Self {
        Self { items: Vec::new() }
    }

    fn push(&mut self, value: T) -> Oid<T> {
        self.items.push(value);
        Oid::from_number(self.items.len() as u64)
    }

    pub fn get(&self, oid: Oid<T>) -> Option<&T> {
        index_of(oid.number()).and_then(|idx| self.items.get(idx))
    }

    pub fn get_mut(&mut self, oid: Oid<T>) -> Option<&mut T> {
        index_of(oid.number()).and_then(|idx| self.items.get_mut(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Oid<T>, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(idx, item)| (Oid::from_number(idx as u64 + 1), item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn index_of(number: u64) -> Option<usize> {
    number.checked_sub(1).and_then(|idx| usize::try_from(idx).ok())
}

/// The extents of every registered type, keyed by type.
#[derive(Default)]
pub struct Extents {
    by_type: HashMap<TypeId, Box<dyn Any>>,
    sizes: HashMap<TypeId, u64>,
}

impl Extents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to the extent of `T`, assigning it the next number for that type.
    pub fn register<T: Entity>(&mut self, value: T) -> Oid<T> {
        let type_id = TypeId::of::<T>();
        let mut extent = self
            .by_type
            .remove(&type_id)
            .and_then(|boxed| boxed.downcast::<Extent<T>>().ok())
            .unwrap_or_else(|| Box::new(Extent::new()));
        let oid = extent.push(value);
        self.by_type.insert(type_id, extent);
        self.sizes.insert(type_id, oid.number());
        trace!(object = %oid, "registered in extent");
        oid
    }

    pub fn get<T: Entity>(&self, oid: Oid<T>) -> Option<&T> {
        self.extent::<T>().and_then(|extent| extent.get(oid))
    }

    pub fn get_mut<T: Entity>(&mut self, oid: Oid<T>) -> Option<&mut T> {
        self.by_type
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_mut::<Extent<T>>())
            .and_then(|extent| extent.get_mut(oid))
    }

    /// Every instance of `T` with its identity, in registration order.
    pub fn all<T: Entity>(&self) -> impl Iterator<Item = (Oid<T>, &T)> {
        self.extent::<T>().into_iter().flat_map(|extent| extent.iter())
    }

    pub fn len<T: Entity>(&self) -> usize {
        self.extent::<T>().map_or(0, Extent::len)
    }

    /// Whether `object` was handed out by this registry.
    pub fn contains(&self, object: ObjectRef) -> bool {
        let size = self
            .sizes
            .get(&object.kind().type_id())
            .copied()
            .unwrap_or(0);
        (1..=size).contains(&object.number())
    }

    /// Identities of every registered instance of `kind`.
    pub fn refs_of(&self, kind: Kind) -> impl Iterator<Item = ObjectRef> + use<> {
        let size = self.sizes.get(&kind.type_id()).copied().unwrap_or(0);
        (1..=size).map(move |number| ObjectRef::new(kind, number))
    }

    fn extent<T: Entity>(&self) -> Option<&Extent<T>> {
        self.by_type
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<Extent<T>>())
    }
}
