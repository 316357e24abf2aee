use chrono::{NaiveDateTime, TimeDelta};
use cineos_common::{Catalog, Entity, ObjectRef, Oid, Result};
use tracing::debug;

use super::{Cinema, Medium, ProjectionRoom, Reservation, RoomExt};
use crate::schema::{
    FROM_MEDIUM_TO_PROJECTION, FROM_PROJECTION_TO_MEDIUM, FROM_PROJECTION_TO_ROOM,
    FROM_ROOM_TO_PROJECTION,
};

/// A screening: one room, one or more media, a start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub starts_at: NaiveDateTime,
    pub length_minutes: u32,
}

impl Entity for Projection {
    const KIND: &'static str = "Projection";
}

impl Projection {
    /// Schedules a screening of `media` in `room`.
    ///
    /// Nothing is linked unless every link can be made.
    pub fn create(
        catalog: &mut Catalog,
        room: Oid<ProjectionRoom>,
        media: impl IntoIterator<Item = Oid<Medium>>,
        starts_at: NaiveDateTime,
        length_minutes: u32,
    ) -> Result<Oid<Projection>> {
        let media: Vec<Oid<Medium>> = media.into_iter().collect();
        let mut inputs: Vec<ObjectRef> = media.iter().map(|medium| medium.erase()).collect();
        inputs.push(room.erase());
        catalog.expect_known(&inputs)?;

        let projection = catalog.register(Projection {
            starts_at,
            length_minutes,
        });
        catalog.check_associations(FROM_PROJECTION_TO_ROOM, FROM_ROOM_TO_PROJECTION, projection, [room])?;
        catalog.check_associations(
            FROM_PROJECTION_TO_MEDIUM,
            FROM_MEDIUM_TO_PROJECTION,
            projection,
            media.iter().copied(),
        )?;

        catalog.add_association(FROM_PROJECTION_TO_ROOM, FROM_ROOM_TO_PROJECTION, projection, room)?;
        catalog.add_associations(
            FROM_PROJECTION_TO_MEDIUM,
            FROM_MEDIUM_TO_PROJECTION,
            projection,
            media.iter().copied(),
        )?;
        debug!(%projection, %room, %starts_at, "projection scheduled");
        Ok(projection)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.starts_at + TimeDelta::minutes(i64::from(self.length_minutes))
    }
}

pub trait ProjectionExt {
    fn room(self, catalog: &Catalog) -> Result<Option<Oid<ProjectionRoom>>>;
    fn cinema(self, catalog: &Catalog) -> Result<Option<Oid<Cinema>>>;
    fn media(self, catalog: &Catalog) -> Result<Vec<Oid<Medium>>>;
    /// Reservations composed into this projection.
    fn reservations(self, catalog: &Catalog) -> Vec<Oid<Reservation>>;
}

impl ProjectionExt for Oid<Projection> {
    fn room(self, catalog: &Catalog) -> Result<Option<Oid<ProjectionRoom>>> {
        catalog.linked_one(FROM_PROJECTION_TO_ROOM, self)
    }

    fn cinema(self, catalog: &Catalog) -> Result<Option<Oid<Cinema>>> {
        Ok(self.room(catalog)?.and_then(|room| room.cinema(catalog)))
    }

    fn media(self, catalog: &Catalog) -> Result<Vec<Oid<Medium>>> {
        catalog.linked(FROM_PROJECTION_TO_MEDIUM, self)
    }

    fn reservations(self, catalog: &Catalog) -> Vec<Oid<Reservation>> {
        catalog.parts::<Reservation>(self)
    }
}
