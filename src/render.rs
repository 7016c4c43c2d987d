//! Terminal rendering of the board with ANSI colors.

use std::fmt::Write;

use blokus_engine::games::blokus::{Board, Color};

fn ansi_code(color: Color) -> u8 {
    match color {
        Color::Blue => 34,
        Color::Yellow => 33,
        Color::Red => 31,
        Color::Green => 32,
    }
}

fn cell_symbol(owner: Option<Color>) -> String {
    match owner {
        Some(c) => format!("\x1b[1;{}m{}\x1b[0m", ansi_code(c), &c.name()[..1]),
        None => " ".to_string(),
    }
}

pub fn render_board(board: &Board) -> String {
    let divider = format!("+{}", "---+".repeat(board.dimensions()));
    let mut out = String::new();
    let _ = writeln!(out, "{divider}");
    for row in board.grid() {
        out.push('|');
        for &owner in row {
            let _ = write!(out, " {} |", cell_symbol(owner));
        }
        out.push('\n');
        let _ = writeln!(out, "{divider}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use blokus_engine::games::blokus::Coord;

    #[test]
    fn test_render_board_layout() {
        let mut board = Board::new(2).unwrap();
        board.place(&[Coord::new(0, 1)], Color::Blue).unwrap();
        let rendered = render_board(&board);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "+---+---+");
        assert_eq!(lines[1], "|   | \x1b[1;34mB\x1b[0m |");
        assert_eq!(lines[2], "+---+---+");
        assert_eq!(lines[3], "|   |   |");
        assert_eq!(lines[4], lines[0]);
    }
}
