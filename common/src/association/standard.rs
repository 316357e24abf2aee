use std::collections::HashMap;

use tracing::debug;

use super::{Bounds, Side, check_room};
use crate::config::DuplicateLinks;
use crate::error::{RelationError, Result};
use crate::object::{Kind, ObjectRef};

/// Which objects may play which role.
#[derive(Debug, Clone)]
pub enum Roles {
    /// Two types; an object's side follows from its kind.
    Typed { first: Kind, second: Kind },
    /// One type on both sides; sides are told apart by role name.
    Reflexive {
        kind: Kind,
        first_role: String,
        second_role: String,
    },
}

impl Roles {
    pub fn kinds(&self) -> (Kind, Kind) {
        match self {
            Roles::Typed { first, second } => (*first, *second),
            Roles::Reflexive { kind, .. } => (*kind, *kind),
        }
    }

    /// Sides an object of `kind` can play.
    pub fn sides_of(&self, kind: Kind) -> Vec<Side> {
        let (first, second) = self.kinds();
        [(Side::First, first), (Side::Second, second)]
            .into_iter()
            .filter(|(_, k)| *k == kind)
            .map(|(side, _)| side)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge {
    first: ObjectRef,
    second: ObjectRef,
}

impl Edge {
    fn end(&self, side: Side) -> ObjectRef {
        match side {
            Side::First => self.first,
            Side::Second => self.second,
        }
    }
}

/// An unindexed association: one undirected edge list, read from either end.
#[derive(Debug)]
pub struct StandardAssociation {
    name: String,
    roles: Roles,
    bounds: Bounds,
    policy: DuplicateLinks,
    edges: Vec<Edge>,
    degree: HashMap<(Side, ObjectRef), usize>,
}

impl StandardAssociation {
    pub(crate) fn new(name: String, roles: Roles, bounds: Bounds, policy: DuplicateLinks) -> Self {
        Self {
            name,
            roles,
            bounds,
            policy,
            edges: Vec::new(),
            degree: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_reflexive(&self) -> bool {
        matches!(self.roles, Roles::Reflexive { .. })
    }

    /// Number of links currently held.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Puts `a` and `b` in (first, second) order.
    ///
    /// Typed roles are resolved from the kinds, in either argument order.
    /// Reflexive roles take `a` as the first role.
    pub fn orient(&self, a: ObjectRef, b: ObjectRef) -> Result<(ObjectRef, ObjectRef)> {
        let (first, second) = self.roles.kinds();
        if a.kind() == first && b.kind() == second {
            Ok((a, b))
        } else if a.kind() == second && b.kind() == first {
            Ok((b, a))
        } else {
            let stranger = if a.kind() == first || a.kind() == second { b } else { a };
            Err(self.role_mismatch(stranger))
        }
    }

    /// Places `object` on `side` and `partner` on the opposite side.
    pub fn orient_at(
        &self,
        side: Side,
        object: ObjectRef,
        partner: ObjectRef,
    ) -> Result<(ObjectRef, ObjectRef)> {
        let (first, second) = match side {
            Side::First => (object, partner),
            Side::Second => (partner, object),
        };
        let (first_kind, second_kind) = self.roles.kinds();
        if first.kind() != first_kind {
            return Err(self.role_mismatch(first));
        }
        if second.kind() != second_kind {
            return Err(self.role_mismatch(second));
        }
        Ok((first, second))
    }

    /// Orients a reflexive pair by role names.
    pub fn orient_roles(
        &self,
        role_a: &str,
        a: ObjectRef,
        role_b: &str,
        b: ObjectRef,
    ) -> Result<(ObjectRef, ObjectRef)> {
        let Roles::Reflexive {
            kind,
            first_role,
            second_role,
        } = &self.roles
        else {
            return Err(RelationError::KindMismatch {
                association: self.name.clone(),
                expected: "reflexive",
            });
        };
        for object in [a, b] {
            if object.kind() != *kind {
                return Err(self.role_mismatch(object));
            }
        }
        if role_a == first_role && role_b == second_role {
            Ok((a, b))
        } else if role_a == second_role && role_b == first_role {
            Ok((b, a))
        } else {
            let role = if role_a == first_role || role_a == second_role {
                role_b
            } else {
                role_a
            };
            Err(RelationError::UnknownRole {
                association: self.name.clone(),
                role: role.to_string(),
            })
        }
    }

    /// Fails if linking the oriented pair would break a bound or the duplicate policy.
    pub fn check(&self, first: ObjectRef, second: ObjectRef) -> Result<()> {
        check_room(
            &self.name,
            &self.bounds,
            self.policy,
            self.contains(first, second),
            (first, self.count_on(Side::First, first)),
            (second, self.count_on(Side::Second, second)),
        )
    }

    /// Links an oriented pair.
    pub(crate) fn insert(&mut self, first: ObjectRef, second: ObjectRef) -> Result<()> {
        self.check(first, second)?;
        self.edges.push(Edge { first, second });
        *self.degree.entry((Side::First, first)).or_default() += 1;
        *self.degree.entry((Side::Second, second)).or_default() += 1;
        debug!(association = %self.name, %first, %second, "linked");
        Ok(())
    }

    /// Fails if linking every oriented pair together would break a bound or
    /// the duplicate policy. Pairs earlier in the batch count against later ones.
    pub fn check_all(&self, pairs: &[(ObjectRef, ObjectRef)]) -> Result<()> {
        let mut pending: HashMap<(Side, ObjectRef), usize> = HashMap::new();
        for (idx, &(first, second)) in pairs.iter().enumerate() {
            let repeated = pairs[..idx].contains(&(first, second));
            let first_count = self.count_on(Side::First, first)
                + pending.get(&(Side::First, first)).copied().unwrap_or(0);
            let second_count = self.count_on(Side::Second, second)
                + pending.get(&(Side::Second, second)).copied().unwrap_or(0);
            check_room(
                &self.name,
                &self.bounds,
                self.policy,
                repeated || self.contains(first, second),
                (first, first_count),
                (second, second_count),
            )?;
            *pending.entry((Side::First, first)).or_default() += 1;
            *pending.entry((Side::Second, second)).or_default() += 1;
        }
        Ok(())
    }

    /// Links every oriented pair, or none of them.
    pub(crate) fn insert_all(&mut self, pairs: &[(ObjectRef, ObjectRef)]) -> Result<()> {
        self.check_all(pairs)?;
        for &(first, second) in pairs {
            self.insert(first, second)?;
        }
        Ok(())
    }

    pub fn link(&mut self, a: ObjectRef, b: ObjectRef) -> Result<()> {
        let (first, second) = self.orient(a, b)?;
        self.insert(first, second)
    }

    /// Removes the most recent link between `a` and `b`.
    pub fn unlink(&mut self, a: ObjectRef, b: ObjectRef) -> Result<()> {
        let (first, second) = self.orient(a, b)?;
        let wanted = Edge { first, second };
        let Some(idx) = self.edges.iter().rposition(|edge| *edge == wanted) else {
            return Err(RelationError::NotLinked {
                association: self.name.clone(),
                first,
                second,
            });
        };
        self.edges.remove(idx);
        for key in [(Side::First, first), (Side::Second, second)] {
            if let Some(count) = self.degree.get_mut(&key) {
                *count -= 1;
                if *count == 0 {
                    self.degree.remove(&key);
                }
            }
        }
        debug!(association = %self.name, %first, %second, "unlinked");
        Ok(())
    }

    pub fn contains(&self, first: ObjectRef, second: ObjectRef) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.first == first && edge.second == second)
    }

    /// Partners of `object` playing `side`, in link order.
    pub fn partners_on(&self, side: Side, object: ObjectRef) -> Vec<ObjectRef> {
        self.edges
            .iter()
            .filter(|edge| edge.end(side) == object)
            .map(|edge| edge.end(side.opposite()))
            .collect()
    }

    pub fn count_on(&self, side: Side, object: ObjectRef) -> usize {
        self.degree.get(&(side, object)).copied().unwrap_or(0)
    }

    /// Partners of `object` on every side its kind plays, in link order.
    pub fn partners_of(&self, object: ObjectRef) -> Result<Vec<ObjectRef>> {
        let sides = self.roles.sides_of(object.kind());
        if sides.is_empty() {
            return Err(self.role_mismatch(object));
        }
        let partners = self
            .edges
            .iter()
            .filter_map(|edge| {
                sides
                    .iter()
                    .find(|side| edge.end(**side) == object)
                    .map(|side| edge.end(side.opposite()))
            })
            .collect();
        Ok(partners)
    }

    fn role_mismatch(&self, object: ObjectRef) -> RelationError {
        RelationError::RoleMismatch {
            association: self.name.clone(),
            object,
        }
    }
}
