//! # Association Definitions
//!
//! An association is a named, bounded relationship between two roles. The two
//! variants are kept behind one sum type and told apart by pattern matching:
//!
//! * [`StandardAssociation`]: plain partner sets, either between two types or
//!   between two named roles of the same type (reflexive).
//! * [`QualifiedAssociation`]: partners on the second role are found through a
//!   key compared with an equality rule supplied at registration.

use std::fmt;

use crate::config::DuplicateLinks;
use crate::error::{RelationError, Result};
use crate::object::{Kind, ObjectRef};

mod qualified;
mod standard;

pub use qualified::{QualifiedAssociation, QualifierEq};
pub use standard::{Roles, StandardAssociation};

/// Upper bound meaning "no practical cap".
pub const UNBOUNDED: usize = usize::MAX;

/// One of the two roles of an association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => f.write_str("first"),
            Side::Second => f.write_str("second"),
        }
    }
}

/// Cardinality bounds of both roles.
///
/// The bounds of a role limit how many partners a single object playing that
/// role may hold within the association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub lower1: usize,
    pub upper1: usize,
    pub lower2: usize,
    pub upper2: usize,
}

impl Bounds {
    pub const fn new(lower1: usize, upper1: usize, lower2: usize, upper2: usize) -> Self {
        Self {
            lower1,
            upper1,
            lower2,
            upper2,
        }
    }

    /// Upper bounds only; both lower bounds are 0.
    pub const fn upper(upper1: usize, upper2: usize) -> Self {
        Self::new(0, upper1, 0, upper2)
    }

    /// Many-to-many without a practical cap.
    pub const fn many() -> Self {
        Self::upper(UNBOUNDED, UNBOUNDED)
    }

    pub fn lower_for(&self, side: Side) -> usize {
        match side {
            Side::First => self.lower1,
            Side::Second => self.lower2,
        }
    }

    pub fn upper_for(&self, side: Side) -> usize {
        match side {
            Side::First => self.upper1,
            Side::Second => self.upper2,
        }
    }

    pub fn as_tuple(&self) -> (usize, usize, usize, usize) {
        (self.lower1, self.upper1, self.lower2, self.upper2)
    }

    pub(crate) fn validate(&self, name: &str) -> Result<()> {
        for side in [Side::First, Side::Second] {
            let reason = if self.upper_for(side) == 0 {
                "upper bound must be greater than zero"
            } else if self.lower_for(side) > self.upper_for(side) {
                "lower bound cannot exceed upper bound"
            } else {
                continue;
            };
            return Err(RelationError::InvalidBound {
                name: name.to_string(),
                side,
                reason,
            });
        }
        Ok(())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::many()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn upper(u: usize) -> String {
            if u == UNBOUNDED { "*".into() } else { u.to_string() }
        }
        write!(
            f,
            "{}..{} / {}..{}",
            self.lower1,
            upper(self.upper1),
            self.lower2,
            upper(self.upper2)
        )
    }
}

/// An object whose partner count is below the lower bound of its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundViolation {
    pub association: String,
    pub side: Side,
    pub object: ObjectRef,
    pub count: usize,
    pub lower: usize,
}

#[derive(Debug)]
pub enum Association {
    Standard(StandardAssociation),
    Qualified(QualifiedAssociation),
}

impl Association {
    pub fn name(&self) -> &str {
        match self {
            Association::Standard(a) => a.name(),
            Association::Qualified(a) => a.name(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Association::Standard(a) => a.bounds(),
            Association::Qualified(a) => a.bounds(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Association::Standard(a) if a.is_reflexive() => "reflexive",
            Association::Standard(_) => "standard",
            Association::Qualified(_) => "qualified",
        }
    }

    /// Kinds playing the first and second role.
    pub fn kinds(&self) -> (Kind, Kind) {
        match self {
            Association::Standard(a) => a.roles().kinds(),
            Association::Qualified(a) => (a.identifier_kind(), a.identifiable_kind()),
        }
    }

    /// Partners of `object` when it plays the role on `side`.
    pub fn partners_on(&self, side: Side, object: ObjectRef) -> Vec<ObjectRef> {
        match self {
            Association::Standard(a) => a.partners_on(side, object),
            Association::Qualified(a) => a.partners_on(side, object),
        }
    }

    pub fn count_on(&self, side: Side, object: ObjectRef) -> usize {
        match self {
            Association::Standard(a) => a.count_on(side, object),
            Association::Qualified(a) => a.count_on(side, object),
        }
    }

    /// Every partner of `object` on whichever side(s) its kind plays.
    pub fn partners_of(&self, object: ObjectRef) -> Result<Vec<ObjectRef>> {
        match self {
            Association::Standard(a) => a.partners_of(object),
            Association::Qualified(a) => a.partners_of(object),
        }
    }

    pub fn as_standard(&self) -> Result<&StandardAssociation> {
        match self {
            Association::Standard(a) => Ok(a),
            Association::Qualified(a) => Err(kind_mismatch(a.name(), "standard")),
        }
    }

    pub fn as_standard_mut(&mut self) -> Result<&mut StandardAssociation> {
        match self {
            Association::Standard(a) => Ok(a),
            Association::Qualified(a) => Err(kind_mismatch(a.name(), "standard")),
        }
    }

    pub fn as_qualified(&self) -> Result<&QualifiedAssociation> {
        match self {
            Association::Qualified(a) => Ok(a),
            Association::Standard(a) => Err(kind_mismatch(a.name(), "qualified")),
        }
    }

    pub fn as_qualified_mut(&mut self) -> Result<&mut QualifiedAssociation> {
        match self {
            Association::Qualified(a) => Ok(a),
            Association::Standard(a) => Err(kind_mismatch(a.name(), "qualified")),
        }
    }
}

fn kind_mismatch(association: &str, expected: &'static str) -> RelationError {
    RelationError::KindMismatch {
        association: association.to_string(),
        expected,
    }
}

/// Degree bookkeeping shared by both variants.
pub(crate) fn check_room(
    name: &str,
    bounds: &Bounds,
    policy: DuplicateLinks,
    already_linked: bool,
    first: (ObjectRef, usize),
    second: (ObjectRef, usize),
) -> Result<()> {
    if already_linked && policy == DuplicateLinks::Reject {
        return Err(RelationError::AlreadyLinked {
            association: name.to_string(),
            first: first.0,
            second: second.0,
        });
    }
    for (side, (object, count)) in [(Side::First, first), (Side::Second, second)] {
        let upper = bounds.upper_for(side);
        if count >= upper {
            return Err(RelationError::CardinalityExceeded {
                association: name.to_string(),
                side,
                object,
                upper,
            });
        }
    }
    Ok(())
}
