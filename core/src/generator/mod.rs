use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Minefield>;
}

/// Which cells mine sampling may land on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// Every cell of the board.
    #[default]
    Uniform,
    /// Every cell except the last row and last column, matching boards produced by older front ends.
    Legacy,
}

impl Placement {
    /// Exclusive upper bounds for sampled `(row, col)`.
    pub const fn sample_bounds(self, (rows, cols): Coord2) -> Coord2 {
        match self {
            Placement::Uniform => (rows, cols),
            Placement::Legacy => (rows.saturating_sub(1), cols.saturating_sub(1)),
        }
    }

    pub const fn candidate_cells(self, size: Coord2) -> CellCount {
        let (rows, cols) = self.sample_bounds(size);
        mult(rows, cols)
    }
}
