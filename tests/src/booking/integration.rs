#![cfg(test)]
use chrono::NaiveDate;
use cineos_common::{Bounds, Catalog, Kind, ObjectRef, Oid, RelationError, UNBOUNDED};
use cineos_core::booking::BookingService;
use cineos_core::model::{
    CinemaExt, ClientExt, Medium, MediumExt, Projection, ProjectionExt, Reservation,
    ReservationExt, RoomExt, Seat, SeatExt, SeatPosition,
};
use cineos_core::schema::{
    self, FROM_RESERVATION_TO_SEAT, FROM_SEAT_TO_RESERVATION, RESERVATION_CLIENT,
    RESERVATION_SEAT,
};
use cineos_core::{sample, BookingError};

fn positions(raw: &[&str]) -> Vec<SeatPosition> {
    raw.iter().map(|raw| raw.parse().unwrap()).collect()
}

fn made_at() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|day| day.and_hms_opt(19, 30, 0))
        .unwrap()
}

/// A reservation with three seats, where each seat may be held by one reservation.
#[test]
fn reservation_with_three_seats() {
    let mut catalog = Catalog::new();
    catalog
        .register_association::<Seat, Reservation>(RESERVATION_SEAT, Bounds::new(1, 1, 0, UNBOUNDED))
        .unwrap();
    catalog
        .register_views(RESERVATION_SEAT, FROM_SEAT_TO_RESERVATION, FROM_RESERVATION_TO_SEAT)
        .unwrap();

    let seats: Vec<Oid<Seat>> = ["A1", "A2", "A3"]
        .iter()
        .map(|raw| {
            catalog.register(Seat {
                position: raw.parse().unwrap(),
            })
        })
        .collect();
    let reservation = catalog.register(Reservation {
        made_at: made_at(),
        redeemed: false,
    });

    catalog
        .add_associations(
            FROM_RESERVATION_TO_SEAT,
            FROM_SEAT_TO_RESERVATION,
            reservation,
            seats.iter().copied(),
        )
        .unwrap();

    assert_eq!(
        catalog.linked::<Seat>(FROM_RESERVATION_TO_SEAT, reservation).unwrap(),
        seats
    );
    for seat in &seats {
        assert_eq!(
            catalog.linked_objects(FROM_SEAT_TO_RESERVATION, *seat).unwrap(),
            vec![ObjectRef::from(reservation)]
        );
    }

    let late = catalog.register(Reservation {
        made_at: made_at(),
        redeemed: false,
    });
    let err = catalog
        .add_association(FROM_RESERVATION_TO_SEAT, FROM_SEAT_TO_RESERVATION, late, seats[1])
        .unwrap_err();
    assert!(matches!(err, RelationError::CardinalityExceeded { upper: 1, .. }));
    assert!(catalog.linked::<Seat>(FROM_RESERVATION_TO_SEAT, late).unwrap().is_empty());
}

#[test]
fn booking_through_the_sample_cinema() {
    let mut catalog = schema::catalog().unwrap();
    let data = sample::seed(&mut catalog).unwrap();
    let (ada, jan) = (data.clients[0], data.clients[1]);
    let evening = data.projections[0];

    let mut service = BookingService::new(&mut catalog);
    let first = service.reserve(ada, evening, &positions(&["D4", "D5"])).unwrap();
    let second = service.reserve(jan, evening, &positions(&["d6"])).unwrap();
    let other_room = service
        .reserve(jan, data.projections[2], &positions(&["A1"]))
        .unwrap();

    assert_eq!(evening.reservations(&catalog), vec![first, second]);
    assert_eq!(jan.reservations(&catalog).unwrap(), vec![second, other_room]);
    assert_eq!(ada.reservations(&catalog).unwrap(), vec![first]);

    let seat = first.seats(&catalog).unwrap()[1];
    assert_eq!(catalog.get(seat).unwrap().position, SeatPosition::new('D', 5));
    assert_eq!(seat.room(&catalog).unwrap(), Some(data.rooms[0]));
    assert_eq!(
        other_room.projection(&catalog).and_then(|p| p.room(&catalog).ok().flatten()),
        Some(data.rooms[1])
    );

    assert!(catalog.missing_partners(RESERVATION_CLIENT).unwrap().is_empty());
    assert!(catalog.missing_partners(RESERVATION_SEAT).unwrap().is_empty());
}

#[test]
fn seats_are_resolved_in_the_projection_room_only() {
    let mut catalog = schema::catalog().unwrap();
    let data = sample::seed(&mut catalog).unwrap();

    // the small room has three rows
    let mut service = BookingService::new(&mut catalog);
    let err = service
        .reserve(data.clients[2], data.projections[2], &positions(&["E1"]))
        .unwrap_err();

    match err {
        BookingError::UnknownSeat { room, position } => {
            assert_eq!(room, data.rooms[1]);
            assert_eq!(position, SeatPosition::new('E', 1));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(data.clients[2].reservations(&catalog).unwrap().is_empty());
}

#[test]
fn closing_a_cinema_cascades_to_rooms_and_seats() {
    let mut catalog = schema::catalog().unwrap();
    let data = sample::seed(&mut catalog).unwrap();

    let seats: usize = data
        .cinema
        .rooms(&catalog)
        .iter()
        .map(|room| room.seats(&catalog).unwrap().len())
        .sum();
    let cascade = catalog.cascade(data.cinema);
    assert_eq!(cascade.len(), data.rooms.len() + seats);
    assert_eq!(cascade[0], data.rooms[0].erase());

    let released = catalog.release(data.cinema);
    assert_eq!(released, cascade);
    assert!(data.cinema.rooms(&catalog).is_empty());
    assert_eq!(data.rooms[0].cinema(&catalog), None);
    // extents keep everything
    assert_eq!(catalog.all::<Seat>().count(), seats);
}

#[test]
fn reservation_for_an_unknown_projection_links_nothing() {
    let mut catalog = schema::catalog().unwrap();
    let data = sample::seed(&mut catalog).unwrap();
    let ada = data.clients[0];
    let seat = data.rooms[0].seats(&catalog).unwrap()[0];
    let missing = ObjectRef::new(Kind::of::<Projection>(), 99)
        .downcast::<Projection>()
        .unwrap();
    let before = catalog.all::<Reservation>().count();

    let err = Reservation::create(&mut catalog, ada, missing, [seat]).unwrap_err();

    assert!(matches!(
        err,
        BookingError::Relation(RelationError::UnknownObject(object)) if object == missing.erase()
    ));
    assert!(seat.reservations(&catalog).unwrap().is_empty());
    assert!(ada.reservations(&catalog).unwrap().is_empty());
    assert_eq!(catalog.all::<Reservation>().count(), before);
}

#[test]
fn reservation_for_an_unknown_client_links_nothing() {
    let mut catalog = schema::catalog().unwrap();
    let data = sample::seed(&mut catalog).unwrap();
    let evening = data.projections[0];
    let seats = data.rooms[0].seats(&catalog).unwrap();
    let missing = ObjectRef::new(Kind::of::<cineos_core::model::Client>(), 99)
        .downcast()
        .unwrap();

    let err = Reservation::create(&mut catalog, missing, evening, seats[..2].iter().copied())
        .unwrap_err();

    assert!(matches!(
        err,
        BookingError::Relation(RelationError::UnknownObject(_))
    ));
    assert!(seats[0].reservations(&catalog).unwrap().is_empty());
    assert!(seats[1].reservations(&catalog).unwrap().is_empty());
    assert!(evening.reservations(&catalog).is_empty());
}

#[test]
fn projection_with_an_unknown_medium_links_nothing() {
    let mut catalog = schema::catalog().unwrap();
    let data = sample::seed(&mut catalog).unwrap();
    let room = data.rooms[1];
    let missing = ObjectRef::new(Kind::of::<Medium>(), 99)
        .downcast::<Medium>()
        .unwrap();
    let scheduled = room.projections(&catalog).unwrap();
    let before = catalog.all::<Projection>().count();

    let err = Projection::create(&mut catalog, room, [data.media[0], missing], made_at(), 90)
        .unwrap_err();

    assert_eq!(err, RelationError::UnknownObject(missing.erase()));
    assert_eq!(room.projections(&catalog).unwrap(), scheduled);
    assert_eq!(
        data.media[0].projections(&catalog).unwrap(),
        data.projections[..2].to_vec()
    );
    assert_eq!(catalog.all::<Projection>().count(), before);
}
