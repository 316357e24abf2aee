use chrono::{Local, NaiveDateTime};
use cineos_common::{Catalog, Entity, ObjectRef, Oid};
use tracing::debug;

use super::{Client, Projection, Seat};
use crate::error::{BookingError, Result};
use crate::schema::{
    FROM_CLIENT_TO_RESERVATION, FROM_RESERVATION_TO_CLIENT, FROM_RESERVATION_TO_SEAT,
    FROM_SEAT_TO_RESERVATION,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub made_at: NaiveDateTime,
    pub redeemed: bool,
}

impl Entity for Reservation {
    const KIND: &'static str = "Reservation";
}

impl Reservation {
    /// Books `seats` for `client` and composes the reservation into `projection`.
    ///
    /// Every link is checked before the first one is made. A refused link
    /// leaves no links behind, though the reservation stays in its extent;
    /// an unknown client, projection or seat refuses before registering.
    pub fn create(
        catalog: &mut Catalog,
        client: Oid<Client>,
        projection: Oid<Projection>,
        seats: impl IntoIterator<Item = Oid<Seat>>,
    ) -> Result<Oid<Reservation>> {
        let seats: Vec<Oid<Seat>> = seats.into_iter().collect();
        if seats.is_empty() {
            return Err(BookingError::NoSeats);
        }
        let mut inputs: Vec<ObjectRef> = seats.iter().map(|seat| seat.erase()).collect();
        inputs.extend([client.erase(), projection.erase()]);
        catalog.expect_known(&inputs)?;

        let reservation = catalog.register(Reservation {
            made_at: Local::now().naive_local(),
            redeemed: false,
        });
        catalog.check_associations(
            FROM_RESERVATION_TO_SEAT,
            FROM_SEAT_TO_RESERVATION,
            reservation,
            seats.iter().copied(),
        )?;
        catalog.check_associations(
            FROM_RESERVATION_TO_CLIENT,
            FROM_CLIENT_TO_RESERVATION,
            reservation,
            [client],
        )?;
        catalog.check_part(projection, reservation)?;

        catalog.add_associations(
            FROM_RESERVATION_TO_SEAT,
            FROM_SEAT_TO_RESERVATION,
            reservation,
            seats.iter().copied(),
        )?;
        catalog.add_association(
            FROM_RESERVATION_TO_CLIENT,
            FROM_CLIENT_TO_RESERVATION,
            reservation,
            client,
        )?;
        catalog.add_part(projection, reservation)?;

        debug!(%reservation, %client, %projection, seats = seats.len(), "reservation made");
        Ok(reservation)
    }
}

pub trait ReservationExt {
    fn client(self, catalog: &Catalog) -> Result<Option<Oid<Client>>>;
    fn seats(self, catalog: &Catalog) -> Result<Vec<Oid<Seat>>>;
    fn projection(self, catalog: &Catalog) -> Option<Oid<Projection>>;
    fn is_redeemed(self, catalog: &Catalog) -> bool;
    /// Marks the tickets as used at the door. Redeeming twice is harmless.
    fn redeem(self, catalog: &mut Catalog) -> Result<()>;
}

impl ReservationExt for Oid<Reservation> {
    fn client(self, catalog: &Catalog) -> Result<Option<Oid<Client>>> {
        Ok(catalog.linked_one(FROM_RESERVATION_TO_CLIENT, self)?)
    }

    fn seats(self, catalog: &Catalog) -> Result<Vec<Oid<Seat>>> {
        Ok(catalog.linked(FROM_RESERVATION_TO_SEAT, self)?)
    }

    fn projection(self, catalog: &Catalog) -> Option<Oid<Projection>> {
        catalog.owner_of(self).and_then(|owner| owner.downcast())
    }

    fn is_redeemed(self, catalog: &Catalog) -> bool {
        catalog.get(self).is_some_and(|reservation| reservation.redeemed)
    }

    fn redeem(self, catalog: &mut Catalog) -> Result<()> {
        let reservation = catalog
            .get_mut(self)
            .ok_or_else(|| BookingError::Missing(self.to_string()))?;
        reservation.redeemed = true;
        Ok(())
    }
}
