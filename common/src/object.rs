//! # Object Identity
//!
//! Objects taking part in associations are referred to by identity, never by
//! reference. [`Oid<T>`] is the typed handle callers hold; [`ObjectRef`] is the
//! type-erased form association storage works with.

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A type whose instances live in an extent and can take part in associations.
pub trait Entity: Any {
    /// Display name of the type, used in diagnostics and object references.
    const KIND: &'static str;
}

/// Runtime identity of an entity type.
#[derive(Debug, Clone, Copy)]
pub struct Kind {
    type_id: TypeId,
    name: &'static str,
}

impl Kind {
    pub fn new<T: Any>(name: &'static str) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name,
        }
    }

    pub fn of<T: Entity>() -> Self {
        Self::new::<T>(T::KIND)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Kind {}

impl Hash for Kind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Type-erased identity: the kind of an object plus its number within that kind's extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    kind: Kind,
    number: u64,
}

impl ObjectRef {
    pub fn new(kind: Kind, number: u64) -> Self {
        Self { kind, number }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    /// Recovers the typed handle if this reference points at a `T`.
    pub fn downcast<T: Entity>(self) -> Option<Oid<T>> {
        (self.kind == Kind::of::<T>()).then(|| Oid::from_number(self.number))
    }
}

impl PartialOrd for ObjectRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ObjectRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .name
            .cmp(other.kind.name)
            .then(self.number.cmp(&other.number))
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind.name, self.number)
    }
}

/// Typed identity of a registered `T`.
///
/// Numbers start at 1 and are assigned in registration order per type.
pub struct Oid<T> {
    number: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Oid<T> {
    pub(crate) fn from_number(number: u64) -> Self {
        Self {
            number,
            _marker: PhantomData,
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }
}

impl<T: Entity> Oid<T> {
    pub fn erase(self) -> ObjectRef {
        ObjectRef::new(Kind::of::<T>(), self.number)
    }
}

impl<T: Entity> From<Oid<T>> for ObjectRef {
    fn from(oid: Oid<T>) -> Self {
        oid.erase()
    }
}

// Manual impls: derives would put bounds on `T`.
impl<T> Clone for Oid<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Oid<T> {}

impl<T> PartialEq for Oid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl<T> Eq for Oid<T> {}

impl<T> Hash for Oid<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}

impl<T> PartialOrd for Oid<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Oid<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number.cmp(&other.number)
    }
}

impl<T: Entity> fmt::Debug for Oid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", T::KIND, self.number)
    }
}

impl<T: Entity> fmt::Display for Oid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", T::KIND, self.number)
    }
}
