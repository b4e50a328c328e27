use crossterm::execute;
use crossterm::style::{Color, StyledContent, Stylize};
use std::io::Write;

use crate::maze::{RectBoard, RectDirection, Topology};

/// The width of each rendered cell when displayed, in character widths.
pub const CELL_WIDTH: u16 = 2;

const WALL: &str = "⬜";
const OPEN: &str = "  ";

fn glyph(wall: bool) -> StyledContent<&'static str> {
    let styled = if wall {
        WALL.with(Color::White)
    } else {
        OPEN.with(Color::Reset)
    };

    #[cfg(debug_assertions)]
    {
        use unicode_width::UnicodeWidthStr;
        assert_eq!(
            styled.content().width(),
            CELL_WIDTH as usize,
            "Each cell must occupy exactly two character widths."
        );
    }

    styled
}

/// Lays a rectangular board out as a `(2w + 1) x (2h + 1)` character grid:
/// cells at odd coordinates, walls between and around them. Built from wall
/// queries only, one line per grid row.
pub fn layout(board: &RectBoard) -> Vec<String> {
    if board.is_empty() {
        return Vec::new();
    }
    let width = board.width();
    let height = board.height();
    let mut lines = Vec::with_capacity(height as usize * 2 + 1);

    for y in 0..height {
        // wall line above row y: corners and top walls
        let mut above = String::new();
        for x in 0..width {
            above.push_str(&glyph(true).to_string());
            above.push_str(&glyph(board.has_wall((x, y), RectDirection::Top)).to_string());
        }
        above.push_str(&glyph(true).to_string());
        lines.push(above);

        // cell line: left walls and cell interiors
        let mut row = String::new();
        for x in 0..width {
            row.push_str(&glyph(board.has_wall((x, y), RectDirection::Left)).to_string());
            row.push_str(&glyph(false).to_string());
        }
        row.push_str(&glyph(true).to_string());
        lines.push(row);
    }

    // wall line below the bottom row
    let mut below = String::new();
    for x in 0..width {
        below.push_str(&glyph(true).to_string());
        below.push_str(&glyph(board.has_wall((x, height - 1), RectDirection::Bottom)).to_string());
    }
    below.push_str(&glyph(true).to_string());
    lines.push(below);

    lines
}

/// Renders a rectangular board to the terminal, clearing the screen first.
pub fn render_rect(board: &RectBoard, out: &mut impl Write) -> std::io::Result<()> {
    execute!(
        out,
        crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        crossterm::cursor::MoveTo(0, 0),
    )?;
    for line in layout(board) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
