//! # Ownership
//!
//! Whole-part records, kept apart from associations. A part has at most one
//! owner; destroying an owner destroys its parts, transitively.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{RelationError, Result};
use crate::object::ObjectRef;

#[derive(Debug, Default)]
pub struct Ownership {
    parts: HashMap<ObjectRef, Vec<ObjectRef>>,
    owners: HashMap<ObjectRef, ObjectRef>,
}

impl Ownership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails if `part` cannot be added to the parts of `owner`.
    ///
    /// Re-parenting is refused: release the part from its current owner first.
    pub fn check(&self, owner: ObjectRef, part: ObjectRef) -> Result<()> {
        if owner == part {
            return Err(RelationError::SelfOwnership(part));
        }
        if let Some(current) = self.owners.get(&part) {
            return Err(RelationError::PartAlreadyOwned {
                part,
                owner: *current,
            });
        }
        // an owner nested under its own part would make the cascade cyclic
        if self.ancestors(owner).any(|ancestor| ancestor == part) {
            return Err(RelationError::PartAlreadyOwned { part: owner, owner: part });
        }
        Ok(())
    }

    /// Appends `part` to the parts of `owner`.
    pub fn add_part(&mut self, owner: ObjectRef, part: ObjectRef) -> Result<()> {
        self.check(owner, part)?;
        self.parts.entry(owner).or_default().push(part);
        self.owners.insert(part, owner);
        debug!(%owner, %part, "added part");
        Ok(())
    }

    /// Parts of `owner` in insertion order.
    pub fn parts_of(&self, owner: ObjectRef) -> &[ObjectRef] {
        self.parts.get(&owner).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn owner_of(&self, part: ObjectRef) -> Option<ObjectRef> {
        self.owners.get(&part).copied()
    }

    /// Everything destroying `owner` would destroy, depth-first.
    pub fn cascade(&self, owner: ObjectRef) -> Vec<ObjectRef> {
        let mut out = Vec::new();
        let mut stack: Vec<ObjectRef> = self.parts_of(owner).iter().rev().copied().collect();
        while let Some(part) = stack.pop() {
            out.push(part);
            stack.extend(self.parts_of(part).iter().rev());
        }
        out
    }

    /// Detaches the whole part tree of `owner` and returns it in cascade order.
    pub fn release(&mut self, owner: ObjectRef) -> Vec<ObjectRef> {
        let released = self.cascade(owner);
        self.parts.remove(&owner);
        for part in &released {
            self.parts.remove(part);
            self.owners.remove(part);
        }
        debug!(%owner, released = released.len(), "released parts");
        released
    }

    fn ancestors(&self, object: ObjectRef) -> impl Iterator<Item = ObjectRef> + '_ {
        std::iter::successors(self.owner_of(object), |current| self.owner_of(*current))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
