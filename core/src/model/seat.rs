use cineos_common::{Catalog, Entity, Oid, Result};

use super::{ProjectionRoom, Reservation, SeatPosition};
use crate::schema::{FROM_SEAT_TO_RESERVATION, FROM_SEAT_TO_ROOM};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub position: SeatPosition,
}

impl Entity for Seat {
    const KIND: &'static str = "Seat";
}

pub trait SeatExt {
    fn room(self, catalog: &Catalog) -> Result<Option<Oid<ProjectionRoom>>>;
    fn reservations(self, catalog: &Catalog) -> Result<Vec<Oid<Reservation>>>;
}

impl SeatExt for Oid<Seat> {
    fn room(self, catalog: &Catalog) -> Result<Option<Oid<ProjectionRoom>>> {
        catalog.linked_one(FROM_SEAT_TO_ROOM, self)
    }

    fn reservations(self, catalog: &Catalog) -> Result<Vec<Oid<Reservation>>> {
        catalog.linked(FROM_SEAT_TO_RESERVATION, self)
    }
}
