use crossterm::style::{Color, Stylize};

use std::fmt;

/// Represents a cell in the grid: a wall, an open passage, or an open passage marked as part of
/// an agent's trail.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Wall,
    Open,
    /// Cosmetic trail marker. Still counts as open for every brain.
    Marked,
}

impl Cell {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;

    /// Whether an agent may stand on this cell.
    pub fn is_open(self) -> bool {
        !matches!(self, Cell::Wall)
    }

    /// Single-character form used by [`super::Grid::to_ascii`] and [`super::Grid::from_ascii`].
    pub fn ascii(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Open => '.',
            Cell::Marked => '*',
        }
    }

    pub fn from_ascii(c: char) -> Option<Cell> {
        match c {
            '#' => Some(Cell::Wall),
            '.' | ' ' => Some(Cell::Open),
            '*' => Some(Cell::Marked),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Cell::Wall => "⬜".with(Color::White),
            Cell::Open => "  ".with(Color::Reset),
            Cell::Marked => "🟩".with(Color::Green),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Cell::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
