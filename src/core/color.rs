//! Property colors and their published set sizes and rent tables

use serde::{Deserialize, Serialize};
use std::fmt;

/// Property color group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Brown,
    DarkBlue,
    Green,
    LightBlue,
    Orange,
    Pink,
    Red,
    Yellow,
    Railroad,
    Utility,
}

impl Color {
    pub const ALL: [Color; 10] = [
        Color::Brown,
        Color::DarkBlue,
        Color::Green,
        Color::LightBlue,
        Color::Orange,
        Color::Pink,
        Color::Red,
        Color::Yellow,
        Color::Railroad,
        Color::Utility,
    ];

    /// Number of properties needed for a complete set
    pub fn set_size(&self) -> usize {
        match self {
            Color::Brown | Color::DarkBlue | Color::Utility => 2,
            Color::Railroad => 4,
            _ => 3,
        }
    }

    /// Base rent by number of properties held, indexed by `count - 1`
    pub fn rent_table(&self) -> &'static [u32] {
        match self {
            Color::Brown => &[1, 2],
            Color::DarkBlue => &[3, 8],
            Color::Green => &[2, 4, 7],
            Color::LightBlue => &[1, 2, 3],
            Color::Orange => &[1, 3, 5],
            Color::Pink => &[1, 2, 4],
            Color::Red => &[2, 3, 6],
            Color::Yellow => &[2, 4, 6],
            Color::Railroad => &[1, 2, 3, 4],
            Color::Utility => &[1, 2],
        }
    }

    /// Base rent for holding `count` properties of this color
    ///
    /// Zero properties charge nothing; counts past the table clamp to its
    /// last entry.
    pub fn base_rent(&self, count: usize) -> u32 {
        let table = self.rent_table();
        match count {
            0 => 0,
            n => table[(n - 1).min(table.len() - 1)],
        }
    }

    /// Face value of a plain property card of this color
    pub fn property_value(&self) -> u32 {
        match self {
            Color::Brown | Color::LightBlue => 1,
            Color::Orange | Color::Pink | Color::Railroad | Color::Utility => 2,
            Color::Red | Color::Yellow => 3,
            Color::DarkBlue | Color::Green => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Color::Brown => "brown",
            Color::DarkBlue => "dark blue",
            Color::Green => "green",
            Color::LightBlue => "light blue",
            Color::Orange => "orange",
            Color::Pink => "pink",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Railroad => "railroad",
            Color::Utility => "utility",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
