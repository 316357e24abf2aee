//! # Association Registry
//!
//! Maps association names to their definitions, in registration order. A
//! definition may also be given two *views*: names for its First→Second and
//! Second→First traversals (`FromReservationToSeat` / `FromSeatToReservation`).
//! Views and associations share one namespace.

use std::marker::PhantomData;

use indexmap::IndexMap;
use tracing::debug;

use crate::association::{
    Association, Bounds, QualifiedAssociation, QualifierEq, Roles, Side, StandardAssociation,
};
use crate::config::DuplicateLinks;
use crate::error::{RelationError, Result};
use crate::object::{Entity, Kind, ObjectRef};

/// A named traversal direction of an association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub association: String,
    /// Side of the object the traversal starts from.
    pub from: Side,
}

#[derive(Debug, Default)]
pub struct AssociationRegistry {
    associations: IndexMap<String, Association>,
    views: IndexMap<String, View>,
    policy: DuplicateLinks,
}

impl AssociationRegistry {
    pub fn new(policy: DuplicateLinks) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Registers a standard association between `A` (first role) and `B` (second role).
    pub fn register_association<A: Entity, B: Entity>(&mut self, name: &str, bounds: Bounds) -> Result<()> {
        bounds.validate(name)?;
        self.check_new_name(name)?;
        let roles = Roles::Typed {
            first: Kind::of::<A>(),
            second: Kind::of::<B>(),
        };
        self.insert(Association::Standard(StandardAssociation::new(
            name.to_string(),
            roles,
            bounds,
            self.policy,
        )));
        Ok(())
    }

    /// Registers an association between two named roles of the same type `T`.
    pub fn register_reflexive<T: Entity>(
        &mut self,
        name: &str,
        first_role: &str,
        second_role: &str,
        bounds: Bounds,
    ) -> Result<()> {
        bounds.validate(name)?;
        self.check_new_name(name)?;
        if first_role.trim().is_empty() || second_role.trim().is_empty() || first_role == second_role {
            return Err(RelationError::InvalidRoles(name.to_string()));
        }
        let roles = Roles::Reflexive {
            kind: Kind::of::<T>(),
            first_role: first_role.to_string(),
            second_role: second_role.to_string(),
        };
        self.insert(Association::Standard(StandardAssociation::new(
            name.to_string(),
            roles,
            bounds,
            self.policy,
        )));
        Ok(())
    }

    /// Starts registering a qualified association: `I` identifies `T` through a `Q` key.
    pub fn qualified<I: Entity, T: Entity, Q: 'static>(&mut self, name: &str) -> QualifiedBuilder<'_, I, T, Q> {
        QualifiedBuilder {
            registry: self,
            name: name.to_string(),
            bounds: Bounds::many(),
            rule: None,
            _roles: PhantomData,
        }
    }

    /// Names the two traversal directions of `association`.
    ///
    /// `forward` starts from the first role, `backward` from the second.
    pub fn register_views(&mut self, association: &str, forward: &str, backward: &str) -> Result<()> {
        if !self.exists(association) {
            return Err(RelationError::AssociationNotFound(association.to_string()));
        }
        self.check_new_name(forward)?;
        self.check_new_name(backward)?;
        if forward == backward {
            return Err(RelationError::DuplicateAssociation(backward.to_string()));
        }
        for (name, from) in [(forward, Side::First), (backward, Side::Second)] {
            self.views.insert(
                name.to_string(),
                View {
                    association: association.to_string(),
                    from,
                },
            );
        }
        debug!(association, forward, backward, "registered views");
        Ok(())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.associations.contains_key(name)
    }

    /// Bounds of the association named `name`; `None` when there is no such association.
    pub fn bounds_for(&self, name: &str) -> Option<Bounds> {
        self.associations.get(name).map(Association::bounds)
    }

    pub fn get(&self, name: &str) -> Result<&Association> {
        self.associations
            .get(name)
            .ok_or_else(|| RelationError::AssociationNotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Association> {
        self.associations
            .get_mut(name)
            .ok_or_else(|| RelationError::AssociationNotFound(name.to_string()))
    }

    pub fn view(&self, name: &str) -> Option<&View> {
        self.views.get(name)
    }

    /// Looks `name` up as an association or a view.
    ///
    /// Views also yield the side their traversal starts from.
    pub fn resolve(&self, name: &str) -> Result<(&Association, Option<Side>)> {
        if let Some(association) = self.associations.get(name) {
            return Ok((association, None));
        }
        match self.views.get(name) {
            Some(view) => Ok((self.get(&view.association)?, Some(view.from))),
            None => Err(RelationError::AssociationNotFound(name.to_string())),
        }
    }

    /// Views registered for `association`, forward first.
    pub fn views_of<'a>(&'a self, association: &'a str) -> impl Iterator<Item = (&'a str, &'a View)> {
        self.views
            .iter()
            .filter(move |(_, view)| view.association == association)
            .map(|(name, view)| (name.as_str(), view))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Association> {
        self.associations.values()
    }

    pub fn len(&self) -> usize {
        self.associations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.associations.is_empty()
    }

    pub fn link(&mut self, name: &str, a: ObjectRef, b: ObjectRef) -> Result<()> {
        self.get_mut(name)?.as_standard_mut()?.link(a, b)
    }

    /// Links two objects of a reflexive association by role name.
    pub fn link_roles(
        &mut self,
        name: &str,
        role_a: &str,
        a: ObjectRef,
        role_b: &str,
        b: ObjectRef,
    ) -> Result<()> {
        let association = self.get_mut(name)?.as_standard_mut()?;
        let (first, second) = association.orient_roles(role_a, a, role_b, b)?;
        association.insert(first, second)
    }

    fn check_new_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(RelationError::InvalidName);
        }
        if self.associations.contains_key(name) || self.views.contains_key(name) {
            return Err(RelationError::DuplicateAssociation(name.to_string()));
        }
        Ok(())
    }

    fn insert(&mut self, association: Association) {
        debug!(
            name = association.name(),
            kind = association.label(),
            bounds = %association.bounds(),
            "registered association"
        );
        self.associations
            .insert(association.name().to_string(), association);
    }
}

/// Collects the parts of a qualified association before registering it.
pub struct QualifiedBuilder<'r, I, T, Q> {
    registry: &'r mut AssociationRegistry,
    name: String,
    bounds: Bounds,
    rule: Option<Box<dyn QualifierEq<Q>>>,
    _roles: PhantomData<fn() -> (I, T)>,
}

impl<I: Entity, T: Entity, Q: 'static> QualifiedBuilder<'_, I, T, Q> {
    /// Identifier bounds first, identifiable bounds second. Defaults to [`Bounds::many`].
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Equality rule used for every lookup by key.
    pub fn compare_with(mut self, rule: impl QualifierEq<Q>) -> Self {
        self.rule = Some(Box::new(rule));
        self
    }

    pub fn register(self) -> Result<()> {
        let Some(rule) = self.rule else {
            return Err(RelationError::MissingComparer(self.name));
        };
        self.bounds.validate(&self.name)?;
        self.registry.check_new_name(&self.name)?;
        let association = QualifiedAssociation::new(
            self.name,
            Kind::of::<I>(),
            Kind::of::<T>(),
            self.bounds,
            self.registry.policy,
            rule,
        );
        self.registry.insert(Association::Qualified(association));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::association::UNBOUNDED;

    struct Client;
    impl Entity for Client {
        const KIND: &'static str = "Client";
    }

    struct Reservation;
    impl Entity for Reservation {
        const KIND: &'static str = "Reservation";
    }

    fn registry() -> AssociationRegistry {
        AssociationRegistry::new(DuplicateLinks::Reject)
    }

    #[test]
    fn registered_bounds_are_returned_verbatim() {
        let mut reg = registry();
        let bounds = Bounds::new(1, 1, 0, UNBOUNDED);
        reg.register_association::<Reservation, Client>("ReservationClient", bounds)
            .unwrap();

        assert!(reg.exists("ReservationClient"));
        assert_eq!(reg.bounds_for("ReservationClient"), Some(bounds));
    }

    #[test]
    fn unknown_name_has_no_bounds() {
        assert_eq!(registry().bounds_for("unknown"), None);
        assert!(!registry().exists("unknown"));
    }

    #[test]
    fn duplicate_name_keeps_the_original() {
        let mut reg = registry();
        reg.register_association::<Reservation, Client>("rc", Bounds::upper(1, 5))
            .unwrap();

        let err = reg
            .register_association::<Reservation, Client>("rc", Bounds::upper(2, 2))
            .unwrap_err();
        assert_eq!(err, RelationError::DuplicateAssociation("rc".into()));
        assert_eq!(reg.bounds_for("rc"), Some(Bounds::upper(1, 5)));
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut reg = registry();
        reg.register_association::<Reservation, Client>("rc", Bounds::many())
            .unwrap();
        reg.register_association::<Reservation, Client>("RC", Bounds::many())
            .unwrap();
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn validation_order_is_bounds_then_name() {
        let mut reg = registry();
        let err = reg
            .register_association::<Reservation, Client>("  ", Bounds::upper(0, 1))
            .unwrap_err();
        assert!(matches!(err, RelationError::InvalidBound { .. }));

        let err = reg
            .register_association::<Reservation, Client>("  ", Bounds::many())
            .unwrap_err();
        assert_eq!(err, RelationError::InvalidName);
        assert!(reg.is_empty());
    }

    #[test]
    fn qualified_requires_a_rule() {
        let mut reg = registry();
        let err = reg
            .qualified::<Client, Reservation, u32>("ClientBooking")
            .register()
            .unwrap_err();
        assert_eq!(err, RelationError::MissingComparer("ClientBooking".into()));
        assert!(!reg.exists("ClientBooking"));

        reg.qualified::<Client, Reservation, u32>("ClientBooking")
            .bounds(Bounds::upper(10, 1))
            .compare_with(|a: &u32, b: &u32| a == b)
            .register()
            .unwrap();
        assert_eq!(reg.get("ClientBooking").unwrap().label(), "qualified");
        assert_eq!(reg.bounds_for("ClientBooking"), Some(Bounds::upper(10, 1)));
    }

    #[test]
    fn views_resolve_to_their_side() {
        let mut reg = registry();
        reg.register_association::<Reservation, Client>("rc", Bounds::many())
            .unwrap();
        reg.register_views("rc", "FromReservationToClient", "FromClientToReservation")
            .unwrap();

        let (assoc, side) = reg.resolve("FromClientToReservation").unwrap();
        assert_eq!(assoc.name(), "rc");
        assert_eq!(side, Some(Side::Second));
        assert_eq!(reg.resolve("rc").unwrap().1, None);
        assert!(!reg.exists("FromClientToReservation"));

        let names: Vec<&str> = reg.views_of("rc").map(|(name, _)| name).collect();
        assert_eq!(names, ["FromReservationToClient", "FromClientToReservation"]);
    }

    #[test]
    fn views_share_the_association_namespace() {
        let mut reg = registry();
        reg.register_association::<Reservation, Client>("rc", Bounds::many())
            .unwrap();
        assert!(matches!(
            reg.register_views("rc", "rc", "back"),
            Err(RelationError::DuplicateAssociation(_))
        ));
        assert!(matches!(
            reg.register_views("missing", "a", "b"),
            Err(RelationError::AssociationNotFound(_))
        ));
        reg.register_views("rc", "fwd", "back").unwrap();
        assert!(matches!(
            reg.register_association::<Reservation, Client>("fwd", Bounds::many()),
            Err(RelationError::DuplicateAssociation(_))
        ));
    }

    #[test]
    fn reflexive_needs_distinct_roles() {
        let mut reg = registry();
        let err = reg
            .register_reflexive::<Client>("Referral", "referrer", "referrer", Bounds::many())
            .unwrap_err();
        assert_eq!(err, RelationError::InvalidRoles("Referral".into()));

        reg.register_reflexive::<Client>("Referral", "referrer", "referee", Bounds::upper(UNBOUNDED, 1))
            .unwrap();
        assert_eq!(reg.get("Referral").unwrap().label(), "reflexive");
    }

    #[test]
    fn link_on_qualified_is_a_kind_mismatch() {
        let mut reg = registry();
        reg.qualified::<Client, Reservation, u32>("cb")
            .compare_with(|a: &u32, b: &u32| a == b)
            .register()
            .unwrap();

        let client = ObjectRef::new(Kind::of::<Client>(), 1);
        let reservation = ObjectRef::new(Kind::of::<Reservation>(), 1);
        assert!(matches!(
            reg.link("cb", client, reservation),
            Err(RelationError::KindMismatch { expected: "standard", .. })
        ));
    }
}
