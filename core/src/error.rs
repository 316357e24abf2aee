use cineos_common::{Oid, RelationError};
use thiserror::Error;

use crate::model::{Projection, ProjectionRoom, SeatPosition};

#[derive(Debug, Error)]
pub enum BookingError {
    #[error(transparent)]
    Relation(#[from] RelationError),

    #[error("a reservation needs at least one seat")]
    NoSeats,

    #[error("{room} has no seat {position}")]
    UnknownSeat {
        room: Oid<ProjectionRoom>,
        position: SeatPosition,
    },

    #[error("{0} is not assigned to a projection room")]
    NoRoom(Oid<Projection>),

    #[error("{0} is not registered")]
    Missing(String),
}

pub type Result<T> = std::result::Result<T, BookingError>;
