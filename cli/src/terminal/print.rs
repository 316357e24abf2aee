//! Everything `cineos` writes to the terminal.
//!
//! Lines are emitted as `tracing` events under [`TARGET_PRINT`], which the
//! formatter in `logging` writes out verbatim.

use cineos_common::log::TARGET_PRINT;
use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::colors;
use crate::terminal::format::Detail;

pub const WIDTH: usize = 64;
const DETAIL_KEY_WIDTH: usize = 10;

const LOGO: &str = r#"
          ___ _            ___  ___
         / __(_)_ _  ___  / _ \/ __|
        | (__| | ' \/ -_)| (_) \__ \
         \___|_|_||_\___| \___/|___/
"#;

const NOTHING_BOOKED: &str = r#"
         _  _  ___    ___ ___   _ _____ ___
        | \| |/ _ \  / __| __| /_\_   _/ __|
        | .` | (_) | \__ \ _| / _ \| | \__ \
        |_|\_|\___/  |___/___/_/ \_\_| |___/
"#;

pub fn line(msg: &str) {
    info!(target: TARGET_PRINT, raw_msg = msg);
}

pub fn blank() {
    line("");
}

pub fn banner(no_banner: bool, quiet: u8) {
    if no_banner || quiet > 0 {
        return;
    }
    line(&LOGO.color(colors::PRIMARY).bold().to_string());
    let title = format!("⟦ CINEOS v{} ⟧", env!("CARGO_PKG_VERSION"));
    line(&titled_rule(&title.bright_green().bold().to_string(), UnicodeWidthStr::width(title.as_str()), "═"));
}

/// A section title centred in a thin rule. Hidden from quiet level 1.
pub fn header(title: &str, quiet: u8) {
    if quiet > 0 {
        return;
    }
    let title = format!("⟦ {} ⟧", title.to_uppercase());
    line(&titled_rule(&title.bright_green().to_string(), UnicodeWidthStr::width(title.as_str()), "─"));
}

/// A full-width double rule.
pub fn rule() {
    line(&"═".repeat(WIDTH).color(colors::SEPARATOR).to_string());
}

pub fn centered(msg: &str) {
    let (left, _) = split_padding(console::measure_text_width(msg));
    line(&format!("{}{msg}", " ".repeat(left)));
}

pub fn nothing_booked() {
    line(&NOTHING_BOOKED.red().bold().to_string());
}

/// `key....: value` lines, keys padded to the longest one.
pub fn summary(pairs: &[(&str, String)]) {
    let width = pairs
        .iter()
        .map(|(key, _)| UnicodeWidthStr::width(*key))
        .max()
        .unwrap_or(0);
    for (key, value) in pairs {
        line(&format!(
            "{} {}{}{} {}",
            ">".color(colors::SEPARATOR),
            key.color(colors::PRIMARY),
            dots(key, width + 1).color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value.color(colors::TEXT_DEFAULT)
        ));
    }
}

/// `[idx] title` over a one-level tree of details.
pub fn entry(idx: usize, title: &str, details: &[Detail]) {
    line(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        title.color(colors::PRIMARY)
    ));
    tree(details, "");
}

/// A labelled tree hung below the last branch of an [`entry`].
/// `last` closes the outer branch instead of continuing it.
pub fn nested(label: &str, details: &[Detail], last: bool) {
    line(&format!("    {}", label.color(colors::PRIMARY)));
    let indent = if last { "   " } else { " │ " };
    tree(details, &indent.color(colors::SEPARATOR).to_string());
}

fn tree(details: &[Detail], indent: &str) {
    for (i, (key, value)) in details.iter().enumerate() {
        let branch = if i + 1 == details.len() { "└─" } else { "├─" };
        line(&format!(
            "{indent} {} {}{}{} {value}",
            branch.color(colors::SEPARATOR),
            key.color(colors::TEXT_DEFAULT),
            dots(key, DETAIL_KEY_WIDTH).color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR)
        ));
    }
}

fn titled_rule(title: &str, title_width: usize, fill: &str) -> String {
    let (left, right) = split_padding(title_width);
    format!(
        "{}{title}{}",
        fill.repeat(left).color(colors::SEPARATOR),
        fill.repeat(right).color(colors::SEPARATOR)
    )
}

/// Columns left and right of `used` columns centred in [`WIDTH`].
fn split_padding(used: usize) -> (usize, usize) {
    let free = WIDTH.saturating_sub(used);
    (free / 2, free - free / 2)
}

/// Dots filling `key` up to `width` display columns.
fn dots(key: &str, width: usize) -> String {
    ".".repeat(width.saturating_sub(UnicodeWidthStr::width(key)))
}
