//! # Domain Entities
//!
//! Entities carry their own attributes only. Relationships live in the
//! catalog and are read through the `*Ext` traits implemented on each
//! entity's [`Oid`](cineos_common::Oid).

mod cinema;
mod client;
mod medium;
mod position;
mod projection;
mod reservation;
mod room;
mod seat;

pub use cinema::{Cinema, CinemaExt};
pub use client::{Client, ClientExt};
pub use medium::{Medium, MediumExt, MediumFormat};
pub use position::{ParsePositionError, SeatPosition};
pub use projection::{Projection, ProjectionExt};
pub use reservation::{Reservation, ReservationExt};
pub use room::{ProjectionRoom, RoomExt};
pub use seat::{Seat, SeatExt};
