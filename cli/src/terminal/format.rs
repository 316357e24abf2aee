use crate::terminal::colors;
use chrono::NaiveDateTime;
use cineos_common::{Catalog, Oid};
use cineos_core::model::{
    Client, Medium, Projection, ProjectionExt, Reservation, ReservationExt, Seat,
};
use colored::*;

pub type Detail = (String, ColoredString);

pub fn time(at: NaiveDateTime) -> ColoredString {
    at.format("%a %H:%M").to_string().color(colors::TIME)
}

pub fn seat_list(catalog: &Catalog, seats: &[Oid<Seat>]) -> ColoredString {
    seats
        .iter()
        .filter_map(|seat| catalog.get(*seat))
        .map(|seat| seat.position.to_string())
        .collect::<Vec<String>>()
        .join(", ")
        .color(colors::SEAT)
}

pub fn client_name(catalog: &Catalog, client: Option<Oid<Client>>) -> ColoredString {
    client
        .and_then(|client| catalog.get(client))
        .map_or_else(|| "unknown".dimmed(), |client| client.full_name().color(colors::CLIENT))
}

pub fn projection_title(catalog: &Catalog, projection: Oid<Projection>) -> cineos_common::Result<String> {
    let titles: Vec<String> = projection
        .media(catalog)?
        .into_iter()
        .filter_map(|medium| catalog.get::<Medium>(medium))
        .map(|medium| format!("{} ({})", medium.title, medium.format))
        .collect();
    Ok(titles.join(" + "))
}

pub fn projection_to_details(
    catalog: &Catalog,
    projection: Oid<Projection>,
) -> cineos_common::Result<Vec<Detail>> {
    let mut details: Vec<Detail> = Vec::new();

    if let Some(value) = catalog.get(projection) {
        details.push(("Starts".to_string(), time(value.starts_at)));
        details.push(("Ends".to_string(), time(value.ends_at())));
    }

    if let Some(room) = projection.room(catalog)?.and_then(|room| catalog.get(room)) {
        details.push(("Room".to_string(), room.number.to_string().color(colors::ACCENT)));
    }

    details.push(("Shows".to_string(), projection_title(catalog, projection)?.normal()));
    Ok(details)
}

pub fn reservation_to_details(
    catalog: &Catalog,
    reservation: Oid<Reservation>,
) -> cineos_core::Result<Vec<Detail>> {
    let mut details: Vec<Detail> = vec![
        ("Client".to_string(), client_name(catalog, reservation.client(catalog)?)),
        ("Seats".to_string(), seat_list(catalog, &reservation.seats(catalog)?)),
    ];

    if let Some(value) = catalog.get(reservation) {
        let status = if value.redeemed {
            "redeemed".green()
        } else {
            "open".yellow()
        };
        details.push(("Made".to_string(), time(value.made_at)));
        details.push(("Status".to_string(), status));
    }
    Ok(details)
}
