//! # Sample Cinema
//!
//! A small, fixed object graph for the CLI and for tests: one cinema with two
//! rooms, a few media and clients, and three projections starting today.
//! No reservations are made here.

use chrono::{Local, NaiveDateTime, NaiveTime, TimeDelta};
use cineos_common::{Catalog, Oid};

use crate::error::Result;
use crate::model::{Cinema, Client, Medium, MediumFormat, Projection, ProjectionRoom};

/// Handles to everything [`seed`] created, in creation order.
#[derive(Debug, Clone)]
pub struct SampleData {
    pub cinema: Oid<Cinema>,
    pub rooms: Vec<Oid<ProjectionRoom>>,
    pub media: Vec<Oid<Medium>>,
    pub clients: Vec<Oid<Client>>,
    pub projections: Vec<Oid<Projection>>,
}

/// (room number, rows, seats per row)
const ROOMS: [(u16, u8, u16); 2] = [(1, 5, 8), (2, 3, 6)];

const MEDIA: [(&str, MediumFormat); 4] = [
    ("Trailer block", MediumFormat::Digital2D),
    ("The Third Man", MediumFormat::Film35mm),
    ("Arrival", MediumFormat::Digital2D),
    ("Dune: Part Two", MediumFormat::Imax),
];

const CLIENTS: [(&str, &str, &str); 3] = [
    ("Ada", "Kowalska", "ada.kowalska@example.com"),
    ("Jan", "Nowak", "jan.nowak@example.com"),
    ("Maria", "Wiśniewska", "maria.w@example.com"),
];

pub fn seed(catalog: &mut Catalog) -> Result<SampleData> {
    let cinema = Cinema::create(catalog, "Kino Iluzjon", "Warszawa");

    let rooms = ROOMS
        .iter()
        .map(|&(number, rows, seats)| ProjectionRoom::create(catalog, cinema, number, rows, seats))
        .collect::<cineos_common::Result<Vec<_>>>()?;

    let media: Vec<_> = MEDIA
        .iter()
        .map(|&(title, format)| {
            catalog.register(Medium {
                title: title.to_string(),
                format,
            })
        })
        .collect();

    let clients: Vec<_> = CLIENTS
        .iter()
        .map(|&(first, last, email)| catalog.register(Client::new(first, last, email)))
        .collect();

    let evening = today_at(18);
    let trailers = media[0];
    let projections = vec![
        Projection::create(catalog, rooms[0], [trailers, media[1]], evening, 104)?,
        Projection::create(catalog, rooms[0], [trailers, media[2]], evening + TimeDelta::hours(2), 116)?,
        Projection::create(catalog, rooms[1], [media[3]], evening + TimeDelta::minutes(30), 166)?,
    ];

    Ok(SampleData {
        cinema,
        rooms,
        media,
        clients,
        projections,
    })
}

fn today_at(hour: i64) -> NaiveDateTime {
    Local::now().date_naive().and_time(NaiveTime::default()) + TimeDelta::hours(hour)
}
