//! # Relationship Catalog
//!
//! The [`Catalog`] bundles the extents, the association registry and the
//! ownership records of one application (or one test). Entities never hold
//! references to each other; they hold identities and ask the catalog.

use tracing::{trace, warn};

use crate::association::{Association, BoundViolation, Bounds, QualifierEq, Side};
use crate::config::Config;
use crate::error::{RelationError, Result};
use crate::extent::Extents;
use crate::object::{Entity, ObjectRef, Oid};
use crate::ownership::Ownership;
use crate::registry::{AssociationRegistry, QualifiedBuilder, View};

#[derive(Default)]
pub struct Catalog {
    config: Config,
    extents: Extents,
    registry: AssociationRegistry,
    ownership: Ownership,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            config: config.clone(),
            registry: AssociationRegistry::new(config.duplicate_links),
            ..Self::default()
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn extents(&self) -> &Extents {
        &self.extents
    }

    pub fn registry(&self) -> &AssociationRegistry {
        &self.registry
    }

    pub fn ownership(&self) -> &Ownership {
        &self.ownership
    }

    // ── Extents ────────────────────────────────────────────────

    pub fn register<T: Entity>(&mut self, value: T) -> Oid<T> {
        self.extents.register(value)
    }

    pub fn get<T: Entity>(&self, oid: Oid<T>) -> Option<&T> {
        self.extents.get(oid)
    }

    pub fn get_mut<T: Entity>(&mut self, oid: Oid<T>) -> Option<&mut T> {
        self.extents.get_mut(oid)
    }

    pub fn all<T: Entity>(&self) -> impl Iterator<Item = (Oid<T>, &T)> {
        self.extents.all::<T>()
    }

    // ── Registration ───────────────────────────────────────────

    pub fn register_association<A: Entity, B: Entity>(&mut self, name: &str, bounds: Bounds) -> Result<()> {
        self.registry.register_association::<A, B>(name, bounds)
    }

    pub fn register_reflexive<T: Entity>(
        &mut self,
        name: &str,
        first_role: &str,
        second_role: &str,
        bounds: Bounds,
    ) -> Result<()> {
        self.registry
            .register_reflexive::<T>(name, first_role, second_role, bounds)
    }

    pub fn qualified<I: Entity, T: Entity, Q: 'static>(&mut self, name: &str) -> QualifiedBuilder<'_, I, T, Q> {
        self.registry.qualified::<I, T, Q>(name)
    }

    /// Registers a qualified association in one call.
    pub fn register_qualified<I: Entity, T: Entity, Q: 'static>(
        &mut self,
        name: &str,
        bounds: Bounds,
        rule: impl QualifierEq<Q>,
    ) -> Result<()> {
        self.qualified::<I, T, Q>(name)
            .bounds(bounds)
            .compare_with(rule)
            .register()
    }

    pub fn register_views(&mut self, association: &str, forward: &str, backward: &str) -> Result<()> {
        self.registry.register_views(association, forward, backward)
    }

    pub fn association_exists(&self, name: &str) -> bool {
        self.registry.exists(name)
    }

    pub fn bounds_for(&self, name: &str) -> Option<Bounds> {
        self.registry.bounds_for(name)
    }

    // ── Standard links ─────────────────────────────────────────

    pub fn link(&mut self, name: &str, a: impl Into<ObjectRef>, b: impl Into<ObjectRef>) -> Result<()> {
        let (a, b) = (a.into(), b.into());
        self.expect_known(&[a, b])?;
        self.registry
            .link(name, a, b)
            .inspect_err(|err| warn!(association = name, %err, "link refused"))
    }

    /// Links two objects of a reflexive association by role name.
    pub fn link_roles(
        &mut self,
        name: &str,
        role_a: &str,
        a: impl Into<ObjectRef>,
        role_b: &str,
        b: impl Into<ObjectRef>,
    ) -> Result<()> {
        let (a, b) = (a.into(), b.into());
        self.expect_known(&[a, b])?;
        self.registry
            .link_roles(name, role_a, a, role_b, b)
            .inspect_err(|err| warn!(association = name, %err, "link refused"))
    }

    pub fn unlink(&mut self, name: &str, a: impl Into<ObjectRef>, b: impl Into<ObjectRef>) -> Result<()> {
        self.registry
            .get_mut(name)?
            .as_standard_mut()?
            .unlink(a.into(), b.into())
    }

    /// Links `this` to `partner` through a pair of views.
    ///
    /// `forward` must start from the side `this` plays and `backward` must be
    /// the opposite view of the same association.
    pub fn add_association(
        &mut self,
        forward: &str,
        backward: &str,
        this: impl Into<ObjectRef>,
        partner: impl Into<ObjectRef>,
    ) -> Result<()> {
        self.add_associations(forward, backward, this, [partner.into()])
    }

    /// Links `this` to every partner through a pair of views, or to none of them.
    pub fn add_associations(
        &mut self,
        forward: &str,
        backward: &str,
        this: impl Into<ObjectRef>,
        partners: impl IntoIterator<Item = impl Into<ObjectRef>>,
    ) -> Result<()> {
        let this = this.into();
        let partners: Vec<ObjectRef> = partners.into_iter().map(Into::into).collect();
        let (association, pairs) = self
            .plan_links(forward, backward, this, &partners)
            .inspect_err(|err| warn!(view = forward, %err, "links refused"))?;
        self.registry
            .get_mut(&association)?
            .as_standard_mut()?
            .insert_all(&pairs)
    }

    /// Fails where [`Catalog::add_associations`] would, without linking anything.
    ///
    /// Lets a constructor validate every link it is about to make before the first one.
    pub fn check_associations(
        &self,
        forward: &str,
        backward: &str,
        this: impl Into<ObjectRef>,
        partners: impl IntoIterator<Item = impl Into<ObjectRef>>,
    ) -> Result<()> {
        let partners: Vec<ObjectRef> = partners.into_iter().map(Into::into).collect();
        self.plan_links(forward, backward, this.into(), &partners)
            .map(|_| ())
    }

    /// Resolves the views and orients every pair, checking kinds and bounds.
    fn plan_links(
        &self,
        forward: &str,
        backward: &str,
        this: ObjectRef,
        partners: &[ObjectRef],
    ) -> Result<(String, Vec<(ObjectRef, ObjectRef)>)> {
        self.expect_known(&[this])?;
        self.expect_known(partners)?;

        let view = self.view_pair(forward, backward)?;
        let association = self.registry.get(&view.association)?.as_standard()?;
        let pairs = partners
            .iter()
            .map(|partner| association.orient_at(view.from, this, *partner))
            .collect::<Result<Vec<_>>>()?;
        association.check_all(&pairs)?;
        Ok((view.association, pairs))
    }

    /// Partners of `object` through an association or one of its views, in link order.
    ///
    /// Through an association name an object gets its partners on every side
    /// its type plays; through a view only those on the view's starting side.
    pub fn linked_objects(&self, name: &str, object: impl Into<ObjectRef>) -> Result<Vec<ObjectRef>> {
        let object = object.into();
        let (association, from) = self.registry.resolve(name)?;
        let partners = match from {
            None => association.partners_of(object)?,
            Some(side) => {
                expect_side(association, side, object)?;
                association.partners_on(side, object)
            }
        };
        trace!(name, %object, found = partners.len(), "linked objects");
        Ok(partners)
    }

    /// Typed form of [`Catalog::linked_objects`]; partners of other types are skipped.
    pub fn linked<T: Entity>(&self, name: &str, object: impl Into<ObjectRef>) -> Result<Vec<Oid<T>>> {
        Ok(self
            .linked_objects(name, object)?
            .into_iter()
            .filter_map(ObjectRef::downcast::<T>)
            .collect())
    }

    /// First typed partner, for roles bounded to a single partner.
    pub fn linked_one<T: Entity>(&self, name: &str, object: impl Into<ObjectRef>) -> Result<Option<Oid<T>>> {
        Ok(self.linked::<T>(name, object)?.into_iter().next())
    }

    // ── Qualified links ────────────────────────────────────────

    pub fn link_qualified<Q: 'static>(
        &mut self,
        name: &str,
        identifier: impl Into<ObjectRef>,
        qualifier: Q,
        identifiable: impl Into<ObjectRef>,
    ) -> Result<()> {
        let (identifier, identifiable) = (identifier.into(), identifiable.into());
        self.expect_known(&[identifier, identifiable])?;
        self.registry
            .get_mut(name)?
            .as_qualified_mut()?
            .link(identifier, qualifier, identifiable)
            .inspect_err(|err| warn!(association = name, %err, "qualified link refused"))
    }

    /// Identifiables linked to `identifier` under a key equal to `qualifier`.
    pub fn lookup<Q: 'static>(
        &self,
        name: &str,
        identifier: impl Into<ObjectRef>,
        qualifier: &Q,
    ) -> Result<Vec<ObjectRef>> {
        self.registry
            .get(name)?
            .as_qualified()?
            .lookup(identifier.into(), qualifier)
    }

    pub fn unlink_qualified<Q: 'static>(
        &mut self,
        name: &str,
        identifier: impl Into<ObjectRef>,
        qualifier: &Q,
        identifiable: impl Into<ObjectRef>,
    ) -> Result<()> {
        self.registry
            .get_mut(name)?
            .as_qualified_mut()?
            .unlink(identifier.into(), qualifier, identifiable.into())
    }

    // ── Lower bounds ───────────────────────────────────────────

    /// Registered objects holding fewer partners than their role's lower bound.
    pub fn missing_partners(&self, name: &str) -> Result<Vec<BoundViolation>> {
        let association = self.registry.get(name)?;
        let bounds = association.bounds();
        let (first, second) = association.kinds();

        let mut violations = Vec::new();
        for (side, kind) in [(Side::First, first), (Side::Second, second)] {
            let lower = bounds.lower_for(side);
            if lower == 0 {
                continue;
            }
            for object in self.extents.refs_of(kind) {
                let count = association.count_on(side, object);
                if count < lower {
                    violations.push(BoundViolation {
                        association: name.to_string(),
                        side,
                        object,
                        count,
                        lower,
                    });
                }
            }
        }
        Ok(violations)
    }

    // ── Ownership ──────────────────────────────────────────────

    pub fn add_part(&mut self, owner: impl Into<ObjectRef>, part: impl Into<ObjectRef>) -> Result<()> {
        let (owner, part) = (owner.into(), part.into());
        self.expect_known(&[owner, part])?;
        self.ownership.add_part(owner, part)
    }

    /// Fails where [`Catalog::add_part`] would, without recording anything.
    pub fn check_part(&self, owner: impl Into<ObjectRef>, part: impl Into<ObjectRef>) -> Result<()> {
        let (owner, part) = (owner.into(), part.into());
        self.expect_known(&[owner, part])?;
        self.ownership.check(owner, part)
    }

    pub fn parts_of(&self, owner: impl Into<ObjectRef>) -> &[ObjectRef] {
        self.ownership.parts_of(owner.into())
    }

    /// Typed parts of `owner`; parts of other types are skipped.
    pub fn parts<T: Entity>(&self, owner: impl Into<ObjectRef>) -> Vec<Oid<T>> {
        self.parts_of(owner)
            .iter()
            .filter_map(|part| part.downcast::<T>())
            .collect()
    }

    pub fn owner_of(&self, part: impl Into<ObjectRef>) -> Option<ObjectRef> {
        self.ownership.owner_of(part.into())
    }

    pub fn cascade(&self, owner: impl Into<ObjectRef>) -> Vec<ObjectRef> {
        self.ownership.cascade(owner.into())
    }

    pub fn release(&mut self, owner: impl Into<ObjectRef>) -> Vec<ObjectRef> {
        self.ownership.release(owner.into())
    }

    /// Fails with `UnknownObject` for the first object no extent handed out.
    pub fn expect_known(&self, objects: &[ObjectRef]) -> Result<()> {
        match objects.iter().find(|object| !self.extents.contains(**object)) {
            Some(unknown) => Err(RelationError::UnknownObject(*unknown)),
            None => Ok(()),
        }
    }

    fn view_pair(&self, forward: &str, backward: &str) -> Result<View> {
        let lookup = |name: &str| {
            self.registry
                .view(name)
                .cloned()
                .ok_or_else(|| RelationError::AssociationNotFound(name.to_string()))
        };
        let (fwd, back) = (lookup(forward)?, lookup(backward)?);
        if fwd.association != back.association || fwd.from == back.from {
            return Err(RelationError::ViewMismatch {
                forward: forward.to_string(),
                backward: backward.to_string(),
            });
        }
        Ok(fwd)
    }
}

fn expect_side(association: &Association, side: Side, object: ObjectRef) -> Result<()> {
    let kind = match side {
        Side::First => association.kinds().0,
        Side::Second => association.kinds().1,
    };
    if object.kind() == kind {
        Ok(())
    } else {
        Err(RelationError::RoleMismatch {
            association: association.name().to_string(),
            object,
        })
    }
}
