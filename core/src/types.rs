use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Inclusive bounding box around a cell, clipped to the grid.
///
/// Covers the cell itself and its (up to) eight neighbors. Mine counting and
/// flood fill both walk this box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub row_from: Coord,
    pub row_to: Coord,
    pub col_from: Coord,
    pub col_to: Coord,
}

impl Area {
    /// Callers must pass `center` inside `bounds`.
    pub(crate) fn around((row, col): Coord2, (rows, cols): Coord2) -> Self {
        Self {
            row_from: row.saturating_sub(1),
            row_to: row.saturating_add(1).min(rows - 1),
            col_from: col.saturating_sub(1),
            col_to: col.saturating_add(1).min(cols - 1),
        }
    }

    /// Row-major walk over every cell in the box, center included.
    pub fn iter(&self) -> AreaIter {
        AreaIter {
            area: *self,
            next: Some((self.row_from, self.col_from)),
        }
    }
}

impl IntoIterator for Area {
    type Item = Coord2;
    type IntoIter = AreaIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug)]
pub struct AreaIter {
    area: Area,
    next: Option<Coord2>,
}

impl Iterator for AreaIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let (row, col) = current;
        self.next = if col < self.area.col_to {
            Some((row, col + 1))
        } else if row < self.area.row_to {
            Some((row + 1, self.area.col_from))
        } else {
            None
        };
        Some(current)
    }
}
