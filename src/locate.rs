//! Finding the section a line belongs to.

use crate::section::Section;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
/// Which way to look (or grow) from a line.
pub enum Direction {
    /// Toward earlier lines.
    Up,
    /// Toward later lines.
    Down,
}

#[must_use]
/// The section whose inclusive line bounds contain `line`.
///
/// Sections never overlap, so the first match is the only match.
pub fn find_enclosing(sections: &[Section], line: usize) -> Option<(usize, &Section)> {
    sections
        .iter()
        .enumerate()
        .find(|(_, section)| section.contains(line))
}

#[must_use]
/// The section nearest to a line that no section contains.
///
/// Looking up gives the last section starting before `line`; looking down gives
/// the first section ending after it.
pub fn find_nearest(sections: &[Section], line: usize, direction: Direction) -> Option<(usize, &Section)> {
    match direction {
        Direction::Up => sections
            .iter()
            .enumerate()
            .rev()
            .find(|(_, section)| section.start_line < line),
        Direction::Down => sections
            .iter()
            .enumerate()
            .find(|(_, section)| section.end_line > line),
    }
}

#[cfg(test)]
#[path = "tests/locate.rs"]
mod tests;
