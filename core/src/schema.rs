//! # Association Schema
//!
//! Every association the domain uses, with its bounds and direction views.
//! [`register`] must run on a catalog before any entity is linked.
//!
//! | Association         | First role        | Second role         | Kind      |
//! |---------------------|-------------------|---------------------|-----------|
//! | `ReservationSeat`   | Reservation 1..*  | Seat 0..*           | standard  |
//! | `ReservationClient` | Reservation 1..1  | Client 0..*         | standard  |
//! | `ProjectionRoom`    | Projection 1..1   | ProjectionRoom 0..* | standard  |
//! | `ProjectionMedium`  | Projection 1..*   | Medium 0..*         | standard  |
//! | `RoomSeat`          | ProjectionRoom 0..* | Seat 1..1 (by [`SeatPosition`]) | qualified |
//!
//! Composition (cinema → rooms → seats, projection → reservations) is kept in
//! the catalog's ownership records, not here.

use cineos_common::{Bounds, Catalog, Result, UNBOUNDED};

use crate::model::{Client, Medium, Projection, ProjectionRoom, Reservation, Seat, SeatPosition};

pub const RESERVATION_SEAT: &str = "ReservationSeat";
pub const FROM_RESERVATION_TO_SEAT: &str = "FromReservationToSeat";
pub const FROM_SEAT_TO_RESERVATION: &str = "FromSeatToReservation";

pub const RESERVATION_CLIENT: &str = "ReservationClient";
pub const FROM_RESERVATION_TO_CLIENT: &str = "FromReservationToClient";
pub const FROM_CLIENT_TO_RESERVATION: &str = "FromClientToReservation";

pub const PROJECTION_ROOM: &str = "ProjectionRoom";
pub const FROM_PROJECTION_TO_ROOM: &str = "FromProjectionToRoom";
pub const FROM_ROOM_TO_PROJECTION: &str = "FromRoomToProjection";

pub const PROJECTION_MEDIUM: &str = "ProjectionMedium";
pub const FROM_PROJECTION_TO_MEDIUM: &str = "FromProjectionToMedium";
pub const FROM_MEDIUM_TO_PROJECTION: &str = "FromMediumToProjection";

pub const ROOM_SEAT: &str = "RoomSeat";
pub const FROM_ROOM_TO_SEAT: &str = "FromRoomToSeat";
pub const FROM_SEAT_TO_ROOM: &str = "FromSeatToRoom";

pub fn register(catalog: &mut Catalog) -> Result<()> {
    catalog.register_association::<Reservation, Seat>(
        RESERVATION_SEAT,
        Bounds::new(1, UNBOUNDED, 0, UNBOUNDED),
    )?;
    catalog.register_views(RESERVATION_SEAT, FROM_RESERVATION_TO_SEAT, FROM_SEAT_TO_RESERVATION)?;

    catalog.register_association::<Reservation, Client>(
        RESERVATION_CLIENT,
        Bounds::new(1, 1, 0, UNBOUNDED),
    )?;
    catalog.register_views(
        RESERVATION_CLIENT,
        FROM_RESERVATION_TO_CLIENT,
        FROM_CLIENT_TO_RESERVATION,
    )?;

    catalog.register_association::<Projection, ProjectionRoom>(
        PROJECTION_ROOM,
        Bounds::new(1, 1, 0, UNBOUNDED),
    )?;
    catalog.register_views(PROJECTION_ROOM, FROM_PROJECTION_TO_ROOM, FROM_ROOM_TO_PROJECTION)?;

    catalog.register_association::<Projection, Medium>(
        PROJECTION_MEDIUM,
        Bounds::new(1, UNBOUNDED, 0, UNBOUNDED),
    )?;
    catalog.register_views(
        PROJECTION_MEDIUM,
        FROM_PROJECTION_TO_MEDIUM,
        FROM_MEDIUM_TO_PROJECTION,
    )?;

    catalog
        .qualified::<ProjectionRoom, Seat, SeatPosition>(ROOM_SEAT)
        .bounds(Bounds::new(0, UNBOUNDED, 1, 1))
        .compare_with(SeatPosition::same_place)
        .register()?;
    catalog.register_views(ROOM_SEAT, FROM_ROOM_TO_SEAT, FROM_SEAT_TO_ROOM)?;

    Ok(())
}

/// A catalog with the whole schema registered.
pub fn catalog() -> Result<Catalog> {
    let mut catalog = Catalog::new();
    register(&mut catalog)?;
    Ok(catalog)
}
