use cineos_common::{Catalog, Entity, Oid, Result};

use super::{Cinema, Projection, Seat, SeatPosition};
use crate::schema::{FROM_ROOM_TO_PROJECTION, FROM_ROOM_TO_SEAT, ROOM_SEAT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionRoom {
    pub number: u16,
}

impl Entity for ProjectionRoom {
    const KIND: &'static str = "ProjectionRoom";
}

impl ProjectionRoom {
    /// Builds a room inside `cinema` with `rows` rows of `seats_per_row` seats.
    ///
    /// Rows are lettered from `A`; at most 26 rows are built.
    pub fn create(
        catalog: &mut Catalog,
        cinema: Oid<Cinema>,
        number: u16,
        rows: u8,
        seats_per_row: u16,
    ) -> Result<Oid<ProjectionRoom>> {
        let room = catalog.register(ProjectionRoom { number });
        catalog.add_part(cinema, room)?;

        for row in (b'A'..=b'Z').take(rows as usize).map(char::from) {
            for number in 1..=seats_per_row {
                let position = SeatPosition::new(row, number);
                let seat = catalog.register(Seat { position });
                catalog.link_qualified(ROOM_SEAT, room, position, seat)?;
                catalog.add_part(room, seat)?;
            }
        }
        Ok(room)
    }
}

pub trait RoomExt {
    fn cinema(self, catalog: &Catalog) -> Option<Oid<Cinema>>;
    fn seats(self, catalog: &Catalog) -> Result<Vec<Oid<Seat>>>;
    /// The seat at `position`, found through the room's qualified index.
    fn seat_at(self, catalog: &Catalog, position: SeatPosition) -> Result<Option<Oid<Seat>>>;
    fn projections(self, catalog: &Catalog) -> Result<Vec<Oid<Projection>>>;
}

impl RoomExt for Oid<ProjectionRoom> {
    fn cinema(self, catalog: &Catalog) -> Option<Oid<Cinema>> {
        catalog.owner_of(self).and_then(|owner| owner.downcast())
    }

    fn seats(self, catalog: &Catalog) -> Result<Vec<Oid<Seat>>> {
        catalog.linked(FROM_ROOM_TO_SEAT, self)
    }

    fn seat_at(self, catalog: &Catalog, position: SeatPosition) -> Result<Option<Oid<Seat>>> {
        Ok(catalog
            .lookup(ROOM_SEAT, self, &position)?
            .into_iter()
            .find_map(|seat| seat.downcast()))
    }

    fn projections(self, catalog: &Catalog) -> Result<Vec<Oid<Projection>>> {
        catalog.linked(FROM_ROOM_TO_PROJECTION, self)
    }
}
