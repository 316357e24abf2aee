use anyhow::Context;
use cineos_common::config::Config;
use cineos_common::{Catalog, Oid, success, warn};
use cineos_core::booking::BookingService;
use cineos_core::model::{
    CinemaExt, Projection, ProjectionExt, ReservationExt, RoomExt, SeatPosition,
};
use cineos_core::sample::{self, SampleData};
use colored::*;

use crate::terminal::{colors, format, print};

/// (client index, projection index, seats)
const BOOKINGS: [(usize, usize, &[&str]); 4] = [
    (0, 0, &["C4", "C5"]),
    (1, 0, &["E1", "E2", "E3"]),
    (2, 1, &["A8"]),
    (1, 2, &["b3", "B4"]),
];

pub fn demo(cfg: &Config) -> anyhow::Result<()> {
    let mut catalog = Catalog::with_config(cfg);
    cineos_core::schema::register(&mut catalog).context("registering the cinema schema")?;
    let data = sample::seed(&mut catalog).context("seeding the sample cinema")?;

    book_samples(&mut catalog, &data)?;
    check_lower_bounds(&catalog)?;

    print::header("programme", cfg.quiet);
    print_cinema(&catalog, &data, cfg)?;
    print_summary(&catalog, &data, cfg)
}

fn book_samples(catalog: &mut Catalog, data: &SampleData) -> anyhow::Result<()> {
    let mut service = BookingService::new(catalog);
    for (client, projection, raw) in BOOKINGS {
        let positions = raw
            .iter()
            .map(|raw| raw.parse::<SeatPosition>())
            .collect::<Result<Vec<_>, _>>()?;
        service
            .reserve(data.clients[client], data.projections[projection], &positions)
            .with_context(|| format!("booking {} for sample client {client}", raw.join(", ")))?;
    }

    let first = data.projections[0].reservations(service.catalog());
    if let Some(reservation) = first.first() {
        reservation.redeem(catalog)?;
    }
    Ok(())
}

fn check_lower_bounds(catalog: &Catalog) -> anyhow::Result<()> {
    for association in catalog.registry().iter() {
        for violation in catalog.missing_partners(association.name())? {
            warn!(
                "{} holds {} partner(s) in '{}', needs at least {}",
                violation.object, violation.count, violation.association, violation.lower
            );
        }
    }
    Ok(())
}

fn print_cinema(catalog: &Catalog, data: &SampleData, cfg: &Config) -> anyhow::Result<()> {
    if let Some(cinema) = catalog.get(data.cinema) {
        let rooms = data.cinema.rooms(catalog);
        let seats = rooms
            .iter()
            .map(|room| room.seats(catalog).map(|seats| seats.len()))
            .sum::<Result<usize, _>>()?;
        print::summary(&[
            ("Cinema", format!("{}, {}", cinema.name, cinema.city)),
            ("Rooms", format!("{} rooms, {seats} seats", rooms.len())),
        ]);
        print::blank();
    }

    if cfg.quiet >= 2 {
        return Ok(());
    }

    let projections = data.cinema.projections(catalog)?;
    for (idx, projection) in projections.iter().enumerate() {
        print_projection_tree(catalog, *projection, idx + 1)?;
        if idx + 1 != projections.len() {
            print::blank();
        }
    }
    Ok(())
}

fn print_projection_tree(catalog: &Catalog, projection: Oid<Projection>, idx: usize) -> anyhow::Result<()> {
    let mut details = format::projection_to_details(catalog, projection)?;

    let reservations = projection.reservations(catalog);
    details.push((
        "Booked".to_string(),
        format!("{} reservation(s)", reservations.len()).color(colors::ACCENT),
    ));
    print::entry(idx, &format::projection_title(catalog, projection)?, &details);

    for (i, reservation) in reservations.iter().enumerate() {
        let details = format::reservation_to_details(catalog, *reservation)?;
        print::nested(&reservation.to_string(), &details, i + 1 == reservations.len());
    }
    Ok(())
}

fn print_summary(catalog: &Catalog, data: &SampleData, cfg: &Config) -> anyhow::Result<()> {
    let mut reservations = 0;
    let mut seats = 0;
    for projection in &data.projections {
        for reservation in projection.reservations(catalog) {
            reservations += 1;
            seats += reservation.seats(catalog)?.len();
        }
    }

    let reservations: ColoredString = format!("{reservations} reservations").bold().green();
    let seats: ColoredString = format!("{seats} seats").bold().yellow();
    let output: &ColoredString = &format!(
        "Programme ready: {reservations} holding {seats} across {} projections",
        data.projections.len()
    )
    .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::rule();
            print::centered(output);
        }
        _ => {
            print::blank();
            success!("{}", output)
        }
    }
    Ok(())
}
