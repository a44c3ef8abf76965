use std::fmt::Write;
use sweeper_core::{CellView, DisplayValue, Outcome, Overlay, Session};

fn cell_glyph(cell: CellView) -> char {
    match (cell.overlay, cell.display) {
        (Overlay::Flagged, _) => 'F',
        (_, DisplayValue::Mine) => '*',
        (_, DisplayValue::Count(0)) => '.',
        (_, DisplayValue::Count(count)) => char::from(b'0' + count),
        (_, DisplayValue::Empty) => '#',
    }
}

/// Text grid with column indices on top and row indices on the left.
pub fn board(session: &Session) -> String {
    let snapshot = session.cells_snapshot();
    let (rows, cols) = snapshot.dim();
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..cols {
        let _ = write!(out, "{:>3}", col);
    }
    out.push('\n');

    for row in 0..rows {
        let _ = write!(out, "{:>3}", row);
        for col in 0..cols {
            let _ = write!(out, "{:>3}", cell_glyph(snapshot[[row, col]]));
        }
        out.push('\n');
    }
    out
}

pub fn status(session: &Session) -> String {
    match session.outcome() {
        Outcome::Playing => format!("mines left: {}", session.mines_left()),
        Outcome::Won => "you won!".to_string(),
        Outcome::Lost => match session.triggered_mine() {
            Some((row, col)) => format!("boom at {} {}, you lost", row, col),
            None => "you lost".to_string(),
        },
    }
}
