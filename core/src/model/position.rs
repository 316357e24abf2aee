//! # Seat Positions
//!
//! A position is a row letter followed by a seat number, e.g. `B7`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatPosition {
    pub row: char,
    pub number: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePositionError {
    #[error("seat position cannot be empty")]
    Empty,
    #[error("invalid row '{0}': rows are single letters")]
    Row(char),
    #[error("invalid seat number in '{0}'")]
    Number(String),
}

impl SeatPosition {
    pub fn new(row: char, number: u16) -> Self {
        Self {
            row: row.to_ascii_uppercase(),
            number,
        }
    }

    /// Qualifier equality used by the room → seat association.
    ///
    /// Rows compare case-insensitively.
    pub fn same_place(a: &SeatPosition, b: &SeatPosition) -> bool {
        a.row.eq_ignore_ascii_case(&b.row) && a.number == b.number
    }
}

impl FromStr for SeatPosition {
    type Err = ParsePositionError;

    /// Parses `"B7"`, `"b7"` or `" B 7 "`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let row = chars.next().ok_or(ParsePositionError::Empty)?;
        if !row.is_ascii_alphabetic() {
            return Err(ParsePositionError::Row(row));
        }

        let number = chars
            .as_str()
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ParsePositionError::Number(trimmed.to_string()))?;

        Ok(Self::new(row, number))
    }
}

impl fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.number)
    }
}
