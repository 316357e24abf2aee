use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use super::{Bounds, Side, check_room};
use crate::config::DuplicateLinks;
use crate::error::{RelationError, Result};
use crate::object::{Kind, ObjectRef};

/// Equality rule over qualifier keys.
pub trait QualifierEq<Q>: 'static {
    fn same(&self, a: &Q, b: &Q) -> bool;
}

impl<Q, F> QualifierEq<Q> for F
where
    F: Fn(&Q, &Q) -> bool + 'static,
{
    fn same(&self, a: &Q, b: &Q) -> bool {
        self(a, b)
    }
}

trait ErasedRule {
    fn same(&self, a: &dyn Any, b: &dyn Any) -> bool;
}

struct TypedRule<Q> {
    rule: Box<dyn QualifierEq<Q>>,
}

impl<Q: 'static> ErasedRule for TypedRule<Q> {
    fn same(&self, a: &dyn Any, b: &dyn Any) -> bool {
        match (a.downcast_ref::<Q>(), b.downcast_ref::<Q>()) {
            (Some(a), Some(b)) => self.rule.same(a, b),
            _ => false,
        }
    }
}

struct QualifiedLink {
    identifier: ObjectRef,
    qualifier: Box<dyn Any>,
    identifiable: ObjectRef,
}

/// An association whose identifiables are reached from an identifier through a key.
///
/// The identifier plays the first role, the identifiable the second.
pub struct QualifiedAssociation {
    name: String,
    identifier: Kind,
    identifiable: Kind,
    qualifier: (TypeId, &'static str),
    bounds: Bounds,
    policy: DuplicateLinks,
    rule: Box<dyn ErasedRule>,
    links: Vec<QualifiedLink>,
    degree: HashMap<(Side, ObjectRef), usize>,
}

impl QualifiedAssociation {
    pub(crate) fn new<Q: 'static>(
        name: String,
        identifier: Kind,
        identifiable: Kind,
        bounds: Bounds,
        policy: DuplicateLinks,
        rule: Box<dyn QualifierEq<Q>>,
    ) -> Self {
        Self {
            name,
            identifier,
            identifiable,
            qualifier: (TypeId::of::<Q>(), type_name::<Q>()),
            bounds,
            policy,
            rule: Box::new(TypedRule { rule }),
            links: Vec::new(),
            degree: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn identifier_kind(&self) -> Kind {
        self.identifier
    }

    pub fn identifiable_kind(&self) -> Kind {
        self.identifiable
    }

    pub fn qualifier_type(&self) -> &'static str {
        self.qualifier.1
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Fails if linking would break a bound, the duplicate policy, or the role/key types.
    pub fn check<Q: 'static>(
        &self,
        identifier: ObjectRef,
        qualifier: &Q,
        identifiable: ObjectRef,
    ) -> Result<()> {
        self.expect_roles(identifier, identifiable)?;
        self.expect_qualifier::<Q>()?;
        let already_linked = self
            .matching(identifier, qualifier)
            .any(|link| link.identifiable == identifiable);
        check_room(
            &self.name,
            &self.bounds,
            self.policy,
            already_linked,
            (identifier, self.count_on(Side::First, identifier)),
            (identifiable, self.count_on(Side::Second, identifiable)),
        )
    }

    pub fn link<Q: 'static>(
        &mut self,
        identifier: ObjectRef,
        qualifier: Q,
        identifiable: ObjectRef,
    ) -> Result<()> {
        self.check(identifier, &qualifier, identifiable)?;
        self.links.push(QualifiedLink {
            identifier,
            qualifier: Box::new(qualifier),
            identifiable,
        });
        *self.degree.entry((Side::First, identifier)).or_default() += 1;
        *self.degree.entry((Side::Second, identifiable)).or_default() += 1;
        debug!(association = %self.name, %identifier, %identifiable, "linked with qualifier");
        Ok(())
    }

    /// Identifiables reachable from `identifier` under a key equal to `qualifier`.
    pub fn lookup<Q: 'static>(&self, identifier: ObjectRef, qualifier: &Q) -> Result<Vec<ObjectRef>> {
        if identifier.kind() != self.identifier {
            return Err(self.role_mismatch(identifier));
        }
        self.expect_qualifier::<Q>()?;
        let found: Vec<ObjectRef> = self
            .matching(identifier, qualifier)
            .map(|link| link.identifiable)
            .collect();
        trace!(association = %self.name, %identifier, hits = found.len(), "qualified lookup");
        Ok(found)
    }

    /// Removes the most recent link of `identifiable` under `qualifier`.
    pub fn unlink<Q: 'static>(
        &mut self,
        identifier: ObjectRef,
        qualifier: &Q,
        identifiable: ObjectRef,
    ) -> Result<()> {
        self.expect_roles(identifier, identifiable)?;
        self.expect_qualifier::<Q>()?;
        let Some(idx) = self.links.iter().rposition(|link| {
            link.identifier == identifier
                && link.identifiable == identifiable
                && self.rule.same(link.qualifier.as_ref(), qualifier)
        }) else {
            return Err(RelationError::NotLinked {
                association: self.name.clone(),
                first: identifier,
                second: identifiable,
            });
        };
        self.links.remove(idx);
        for key in [(Side::First, identifier), (Side::Second, identifiable)] {
            if let Some(count) = self.degree.get_mut(&key) {
                *count -= 1;
                if *count == 0 {
                    self.degree.remove(&key);
                }
            }
        }
        Ok(())
    }

    pub fn partners_on(&self, side: Side, object: ObjectRef) -> Vec<ObjectRef> {
        self.links
            .iter()
            .filter_map(|link| match side {
                Side::First if link.identifier == object => Some(link.identifiable),
                Side::Second if link.identifiable == object => Some(link.identifier),
                _ => None,
            })
            .collect()
    }

    pub fn count_on(&self, side: Side, object: ObjectRef) -> usize {
        self.degree.get(&(side, object)).copied().unwrap_or(0)
    }

    pub fn partners_of(&self, object: ObjectRef) -> Result<Vec<ObjectRef>> {
        if object.kind() == self.identifier {
            Ok(self.partners_on(Side::First, object))
        } else if object.kind() == self.identifiable {
            Ok(self.partners_on(Side::Second, object))
        } else {
            Err(self.role_mismatch(object))
        }
    }

    /// Every identifiable linked to `identifier`, whatever its key.
    pub fn identifiables_of(&self, identifier: ObjectRef) -> Vec<ObjectRef> {
        self.partners_on(Side::First, identifier)
    }

    pub fn identifiers_of(&self, identifiable: ObjectRef) -> Vec<ObjectRef> {
        self.partners_on(Side::Second, identifiable)
    }

    fn matching<'a, Q: 'static>(
        &'a self,
        identifier: ObjectRef,
        qualifier: &'a Q,
    ) -> impl Iterator<Item = &'a QualifiedLink> {
        self.links.iter().filter(move |link| {
            link.identifier == identifier && self.rule.same(link.qualifier.as_ref(), qualifier)
        })
    }

    fn expect_roles(&self, identifier: ObjectRef, identifiable: ObjectRef) -> Result<()> {
        if identifier.kind() != self.identifier {
            return Err(self.role_mismatch(identifier));
        }
        if identifiable.kind() != self.identifiable {
            return Err(self.role_mismatch(identifiable));
        }
        Ok(())
    }

    fn expect_qualifier<Q: 'static>(&self) -> Result<()> {
        if TypeId::of::<Q>() == self.qualifier.0 {
            Ok(())
        } else {
            Err(RelationError::QualifierType {
                association: self.name.clone(),
                expected: self.qualifier.1,
            })
        }
    }

    fn role_mismatch(&self, object: ObjectRef) -> RelationError {
        RelationError::RoleMismatch {
            association: self.name.clone(),
            object,
        }
    }
}

impl fmt::Debug for QualifiedAssociation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QualifiedAssociation")
            .field("name", &self.name)
            .field("identifier", &self.identifier)
            .field("identifiable", &self.identifiable)
            .field("qualifier", &self.qualifier.1)
            .field("bounds", &self.bounds)
            .field("links", &self.links.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Entity;

    struct Room;
    impl Entity for Room {
        const KIND: &'static str = "Room";
    }

    struct Seat;
    impl Entity for Seat {
        const KIND: &'static str = "Seat";
    }

    fn room(n: u64) -> ObjectRef {
        ObjectRef::new(Kind::of::<Room>(), n)
    }

    fn seat(n: u64) -> ObjectRef {
        ObjectRef::new(Kind::of::<Seat>(), n)
    }

    fn by_number(bounds: Bounds) -> QualifiedAssociation {
        QualifiedAssociation::new::<i32>(
            "RoomSeat".into(),
            Kind::of::<Room>(),
            Kind::of::<Seat>(),
            bounds,
            DuplicateLinks::Reject,
            Box::new(|a: &i32, b: &i32| a == b),
        )
    }

    #[test]
    fn lookup_matches_on_the_key() {
        let mut assoc = by_number(Bounds::many());
        assoc.link(room(1), 5, seat(1)).unwrap();

        assert_eq!(assoc.lookup(room(1), &5).unwrap(), [seat(1)]);
        assert!(assoc.lookup(room(1), &6).unwrap().is_empty());
        assert!(assoc.lookup(room(2), &5).unwrap().is_empty());
    }

    #[test]
    fn registered_rule_is_used_instead_of_structural_equality() {
        let mut assoc = QualifiedAssociation::new::<String>(
            "RoomSeatByLabel".into(),
            Kind::of::<Room>(),
            Kind::of::<Seat>(),
            Bounds::many(),
            DuplicateLinks::Reject,
            Box::new(|a: &String, b: &String| a.eq_ignore_ascii_case(b)),
        );
        assoc.link(room(1), "a7".to_string(), seat(3)).unwrap();

        assert_eq!(assoc.lookup(room(1), &"A7".to_string()).unwrap(), [seat(3)]);
    }

    #[test]
    fn wrong_qualifier_type_is_refused() {
        let mut assoc = by_number(Bounds::many());
        let err = assoc.link(room(1), 5u8, seat(1)).unwrap_err();
        assert!(matches!(err, RelationError::QualifierType { expected: "i32", .. }));
        assert!(assoc.is_empty());
    }

    #[test]
    fn bounds_apply_per_identifier_and_identifiable() {
        let mut assoc = by_number(Bounds::new(0, 2, 0, 1));
        assoc.link(room(1), 1, seat(1)).unwrap();
        assoc.link(room(1), 2, seat(2)).unwrap();

        let err = assoc.link(room(1), 3, seat(3)).unwrap_err();
        assert!(matches!(err, RelationError::CardinalityExceeded { side: Side::First, .. }));

        let err = assoc.link(room(2), 1, seat(1)).unwrap_err();
        assert!(matches!(err, RelationError::CardinalityExceeded { side: Side::Second, .. }));
        assert_eq!(assoc.len(), 2);
    }

    #[test]
    fn partners_ignore_the_key() {
        let mut assoc = by_number(Bounds::many());
        assoc.link(room(1), 1, seat(1)).unwrap();
        assoc.link(room(1), 1, seat(2)).unwrap();

        assert_eq!(assoc.partners_of(room(1)).unwrap(), [seat(1), seat(2)]);
        assert_eq!(assoc.partners_of(seat(2)).unwrap(), [room(1)]);
        assert_eq!(assoc.lookup(room(1), &1).unwrap(), [seat(1), seat(2)]);
        assert_eq!(assoc.identifiables_of(room(1)), [seat(1), seat(2)]);
        assert_eq!(assoc.identifiers_of(seat(1)), [room(1)]);
    }

    #[test]
    fn unlink_removes_the_keyed_link() {
        let mut assoc = by_number(Bounds::many());
        assoc.link(room(1), 4, seat(1)).unwrap();
        assoc.unlink(room(1), &4, seat(1)).unwrap();

        assert!(assoc.lookup(room(1), &4).unwrap().is_empty());
        assert_eq!(assoc.count_on(Side::Second, seat(1)), 0);
        assert!(assoc.unlink(room(1), &4, seat(1)).is_err());
    }
}
