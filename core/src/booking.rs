//! # Booking Service
//!
//! Implements the "reserve seats" use case.
//!
//! Callers name seats by their position in the room (`B7`); the service turns
//! those positions into seat objects through the room's qualified index and
//! hands them to [`Reservation::create`].

use cineos_common::{Catalog, Oid};
use tracing::debug;

use crate::error::{BookingError, Result};
use crate::model::{Client, Projection, ProjectionExt, Reservation, RoomExt, Seat, SeatPosition};

/// Application service for seat reservations.
///
/// Borrows the catalog mutably for as long as it lives.
pub struct BookingService<'c> {
    catalog: &'c mut Catalog,
}

impl<'c> BookingService<'c> {
    pub fn new(catalog: &'c mut Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Books the seats at `positions` in the projection's room for `client`.
    ///
    /// The process involves:
    /// 1. **Resolving**: every position must name a seat of the projection's room.
    /// 2. **Reserving**: the seats are linked to a new reservation all at once.
    pub fn reserve(
        &mut self,
        client: Oid<Client>,
        projection: Oid<Projection>,
        positions: &[SeatPosition],
    ) -> Result<Oid<Reservation>> {
        if positions.is_empty() {
            return Err(BookingError::NoSeats);
        }
        let seats = self.resolve_seats(projection, positions)?;
        debug!(%projection, seats = seats.len(), "seats resolved");

        Reservation::create(self.catalog, client, projection, seats)
    }

    /// Seats of the projection's room at `positions`, in the same order.
    pub fn resolve_seats(
        &self,
        projection: Oid<Projection>,
        positions: &[SeatPosition],
    ) -> Result<Vec<Oid<Seat>>> {
        let room = projection
            .room(self.catalog)?
            .ok_or(BookingError::NoRoom(projection))?;

        positions
            .iter()
            .map(|&position| {
                room.seat_at(self.catalog, position)?
                    .ok_or(BookingError::UnknownSeat { room, position })
            })
            .collect()
    }

    /// Finds a client by e-mail or by full name, ignoring case.
    pub fn find_client(&self, name: &str) -> Option<Oid<Client>> {
        let name = name.trim();
        self.catalog
            .all::<Client>()
            .find(|(_, client)| {
                client.email.eq_ignore_ascii_case(name)
                    || client.full_name().eq_ignore_ascii_case(name)
            })
            .map(|(oid, _)| oid)
    }

    /// The projection registered under `number`.
    pub fn projection(&self, number: u64) -> Option<Oid<Projection>> {
        self.catalog
            .all::<Projection>()
            .map(|(oid, _)| oid)
            .find(|oid| oid.number() == number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ReservationExt, SeatExt};
    use crate::sample;

    fn seeded() -> (Catalog, sample::SampleData) {
        let mut catalog = crate::schema::catalog().unwrap();
        let data = sample::seed(&mut catalog).unwrap();
        (catalog, data)
    }

    fn positions(raw: &[&str]) -> Vec<SeatPosition> {
        raw.iter().map(|p| p.parse().unwrap()).collect()
    }

    #[test]
    fn reserve_links_the_seats_at_the_given_positions() {
        let (mut catalog, data) = seeded();
        let mut service = BookingService::new(&mut catalog);

        let reservation = service
            .reserve(data.clients[0], data.projections[0], &positions(&["A1", "a2", "B3"]))
            .unwrap();

        let catalog = service.catalog();
        let seats = reservation.seats(catalog).unwrap();
        let booked: Vec<String> = seats
            .iter()
            .map(|seat| catalog.get(*seat).unwrap().position.to_string())
            .collect();
        assert_eq!(booked, ["A1", "A2", "B3"]);
        assert_eq!(reservation.client(catalog).unwrap(), Some(data.clients[0]));
        assert_eq!(reservation.projection(catalog), Some(data.projections[0]));
        assert_eq!(seats[0].reservations(catalog).unwrap(), vec![reservation]);
    }

    #[test]
    fn unknown_position_is_reported_before_anything_is_linked() {
        let (mut catalog, data) = seeded();
        let before = catalog.all::<Reservation>().count();
        let mut service = BookingService::new(&mut catalog);

        let err = service
            .reserve(data.clients[0], data.projections[0], &positions(&["A1", "Z99"]))
            .unwrap_err();

        assert!(matches!(err, BookingError::UnknownSeat { position, .. } if position.to_string() == "Z99"));
        assert_eq!(catalog.all::<Reservation>().count(), before);
    }

    #[test]
    fn empty_seat_list_is_refused() {
        let (mut catalog, data) = seeded();
        let mut service = BookingService::new(&mut catalog);
        let err = service
            .reserve(data.clients[0], data.projections[0], &[])
            .unwrap_err();
        assert!(matches!(err, BookingError::NoSeats));
    }

    #[test]
    fn clients_are_found_by_name_or_email() {
        let (mut catalog, data) = seeded();
        let service = BookingService::new(&mut catalog);
        let first = service.catalog().get(data.clients[0]).unwrap().clone();

        assert_eq!(service.find_client(&first.email.to_uppercase()), Some(data.clients[0]));
        assert_eq!(service.find_client(&first.full_name()), Some(data.clients[0]));
        assert_eq!(service.find_client("nobody"), None);
    }

    #[test]
    fn projections_are_found_by_number() {
        let (mut catalog, data) = seeded();
        let service = BookingService::new(&mut catalog);
        assert_eq!(service.projection(1), Some(data.projections[0]));
        assert_eq!(service.projection(999), None);
    }
}
