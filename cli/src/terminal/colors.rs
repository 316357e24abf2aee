use colored::Color;

pub const PRIMARY: Color = Color::BrightBlue;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const CLIENT: Color = Color::Cyan;
pub const SEAT: Color = Color::BrightGreen;
pub const TIME: Color = Color::Magenta;
pub const BOUNDS: Color = Color::Yellow;
