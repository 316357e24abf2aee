//! # CineOS Domain
//!
//! Cinema booking entities expressed on top of the relationship catalog of
//! `cineos-common`.
//!
//! * **[`model`]**: entities and the accessors that walk their associations.
//! * **[`schema`]**: association and view names, and their registration.
//! * **[`booking`]**: the reservation use case.
//! * **[`sample`]**: a small cinema used by the CLI and tests.

pub mod booking;
pub mod error;
pub mod model;
pub mod sample;
pub mod schema;

pub use error::{BookingError, Result};
