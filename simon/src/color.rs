use std::fmt;
use std::str::FromStr;

use crate::error::SimonError;

/// One of the four board tiles. Each tile owns a fixed pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileColor {
    Green,
    Red,
    Yellow,
    Blue,
}

impl TileColor {
    /// Board order: top-left, top-right, bottom-left, bottom-right.
    pub const ALL: [TileColor; 4] = [
        TileColor::Green,
        TileColor::Red,
        TileColor::Yellow,
        TileColor::Blue,
    ];

    pub const fn index(self) -> usize {
        match self {
            TileColor::Green => 0,
            TileColor::Red => 1,
            TileColor::Yellow => 2,
            TileColor::Blue => 3,
        }
    }

    /// C major arpeggio: C4, E4, G4, C5.
    pub const fn frequency_hz(self) -> f32 {
        match self {
            TileColor::Green => 261.6,
            TileColor::Red => 329.6,
            TileColor::Yellow => 392.0,
            TileColor::Blue => 523.3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TileColor::Green => "green",
            TileColor::Red => "red",
            TileColor::Yellow => "yellow",
            TileColor::Blue => "blue",
        }
    }
}

impl fmt::Display for TileColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TileColor {
    type Err = SimonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SimonError::UnknownColor(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_board_order() {
        for (i, color) in TileColor::ALL.into_iter().enumerate() {
            assert_eq!(color.index(), i);
        }
    }
}
