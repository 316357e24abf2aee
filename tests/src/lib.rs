//! Cross-crate scenarios for the relationship catalog and the cinema domain.
//!
//! Everything here is compiled for `cargo test` only.

mod booking;
mod relations;
