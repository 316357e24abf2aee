use anyhow::{Context, anyhow};
use cineos_common::config::Config;
use cineos_common::{Catalog, success};
use cineos_core::booking::BookingService;
use cineos_core::model::SeatPosition;
use cineos_core::sample;
use colored::*;

use crate::terminal::{colors, format, print};

pub fn reserve(client: &str, projection: u64, seats: &[SeatPosition], cfg: &Config) -> anyhow::Result<()> {
    let mut catalog = Catalog::with_config(cfg);
    cineos_core::schema::register(&mut catalog).context("registering the cinema schema")?;
    sample::seed(&mut catalog).context("seeding the sample cinema")?;

    let mut service = BookingService::new(&mut catalog);
    let client_oid = service
        .find_client(client)
        .ok_or_else(|| anyhow!("no client called '{client}'"))?;
    let projection_oid = service
        .projection(projection)
        .ok_or_else(|| anyhow!("there is no projection {projection}"))?;

    let reservation = match service.reserve(client_oid, projection_oid, seats) {
        Ok(reservation) => reservation,
        Err(err) => {
            print::nothing_booked();
            return Err(err).context("booking failed");
        }
    };

    if cfg.quiet < 2 {
        let mut details = format::projection_to_details(&catalog, projection_oid)?;
        details.extend(format::reservation_to_details(&catalog, reservation)?);
        print::entry(
            projection as usize,
            &format::projection_title(&catalog, projection_oid)?,
            &details,
        );
    }

    let seats: ColoredString = format!("{} seat(s)", seats.len()).color(colors::SEAT).bold();
    success!("{reservation} holds {seats}");
    Ok(())
}
