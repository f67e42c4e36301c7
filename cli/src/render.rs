use std::fmt::Write;

use degen_core::{CellView, GameStatus, SessionView};

fn glyph(cell: CellView) -> char {
    match cell {
        CellView { mine_hit: true, .. } => 'X',
        CellView {
            mine_visible: true,
            flagged: true,
            ..
        } => 'F',
        CellView {
            mine_visible: true,
            ..
        } => '*',
        CellView { flagged: true, .. } => 'F',
        CellView {
            revealed: true,
            neighbor_count: 0,
            ..
        } => '.',
        CellView {
            revealed: true,
            neighbor_count,
            ..
        } => char::from(b'0' + neighbor_count),
        _ => '#',
    }
}

/// Draws the board with its counters, `best` being the stored best time for this difficulty.
pub fn render(view: &SessionView, best: Option<u32>) -> String {
    let mut out = String::new();
    let best = best.map_or_else(|| "-".to_owned(), |secs| secs.to_string());
    // writing into a String cannot fail
    let _ = writeln!(
        out,
        "{} ({})  Mines: {}  Time: {}s  Best Time: {}s",
        view.difficulty.title(),
        view.difficulty,
        view.mines_left,
        view.elapsed_secs,
        best
    );

    let (rows, cols) = view.size();
    out.push_str("   ");
    for col in 0..cols {
        let _ = write!(out, "{col:>3}");
    }
    out.push('\n');
    for row in 0..rows {
        let _ = write!(out, "{row:>3}");
        for col in 0..cols {
            let _ = write!(out, "{:>3}", glyph(view.cell_at((row, col))));
        }
        out.push('\n');
    }

    out.push_str(match view.status {
        GameStatus::NotStarted => "Pick a cell to start.",
        GameStatus::InProgress => "Careful now.",
        GameStatus::Won => "Cleared!",
        GameStatus::Lost => "Boom.",
    });
    out
}
