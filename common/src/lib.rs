//! # CineOS Relations
//!
//! In-memory bookkeeping of typed, cardinality-bounded relationships between
//! live objects.
//!
//! * **[`object`]** / **[`extent`]**: identities and the per-type collections of registered instances.
//! * **[`association`]**: standard, reflexive and qualified association definitions.
//! * **[`registry`]**: the name → definition map, including named direction views.
//! * **[`ownership`]**: whole-part (composition) records.
//! * **[`catalog`]**: the facade entities talk to. One [`Catalog`] per application or test.

pub mod association;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extent;
pub mod log;
pub mod object;
pub mod ownership;
pub mod registry;

pub use association::{Bounds, Side, UNBOUNDED};
pub use catalog::Catalog;
pub use error::{RelationError, Result};
pub use object::{Entity, Kind, ObjectRef, Oid};
