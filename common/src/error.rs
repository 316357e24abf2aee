//! Error types for association, extent and ownership operations.
//!
//! Every failure is raised before any state changes.

use thiserror::Error;

use crate::association::Side;
use crate::object::ObjectRef;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationError {
    #[error("association name cannot be empty or whitespace")]
    InvalidName,

    #[error("invalid bound for the {side} role of '{name}': {reason}")]
    InvalidBound {
        name: String,
        side: Side,
        reason: &'static str,
    },

    #[error("an association or view named '{0}' already exists")]
    DuplicateAssociation(String),

    #[error("association '{0}' doesn't exist")]
    AssociationNotFound(String),

    #[error("qualified association '{0}' was registered without a qualifier equality rule")]
    MissingComparer(String),

    #[error(
        "linking {object} in '{association}' would exceed the upper bound of {upper} on the {side} role"
    )]
    CardinalityExceeded {
        association: String,
        side: Side,
        object: ObjectRef,
        upper: usize,
    },

    #[error("{object} plays no role in association '{association}'")]
    RoleMismatch {
        association: String,
        object: ObjectRef,
    },

    #[error("reflexive association '{0}' needs two distinct, non-empty role names")]
    InvalidRoles(String),

    #[error("'{association}' has no role named '{role}'")]
    UnknownRole { association: String, role: String },

    #[error("'{association}' is not a {expected} association")]
    KindMismatch {
        association: String,
        expected: &'static str,
    },

    #[error("qualifier for '{association}' must be of type {expected}")]
    QualifierType {
        association: String,
        expected: &'static str,
    },

    #[error("{first} and {second} are already linked in '{association}'")]
    AlreadyLinked {
        association: String,
        first: ObjectRef,
        second: ObjectRef,
    },

    #[error("{first} and {second} are not linked in '{association}'")]
    NotLinked {
        association: String,
        first: ObjectRef,
        second: ObjectRef,
    },

    #[error("{0} is not registered in any extent")]
    UnknownObject(ObjectRef),

    #[error("views '{forward}' and '{backward}' do not describe opposite directions of one association")]
    ViewMismatch { forward: String, backward: String },

    #[error("{part} is already a part of {owner}")]
    PartAlreadyOwned { part: ObjectRef, owner: ObjectRef },

    #[error("{0} cannot be a part of itself")]
    SelfOwnership(ObjectRef),
}

pub type Result<T> = std::result::Result<T, RelationError>;
