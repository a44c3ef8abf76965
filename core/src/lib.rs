#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod config;
mod engine;
mod error;
mod generator;
mod tile;
mod types;

/// Mine positions plus the adjacent-mine count of every safe cell.
///
/// Counts are computed once when the board is built and the grid is never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MinefieldRepr")]
pub struct Minefield {
    cells: Array2<CellValue>,
    mine_count: CellCount,
}

/// Untrusted wire form, only accepted when it matches a board rebuilt from its mines.
#[derive(Deserialize)]
struct MinefieldRepr {
    cells: Array2<CellValue>,
    mine_count: CellCount,
}

impl TryFrom<MinefieldRepr> for Minefield {
    type Error = GameError;

    fn try_from(repr: MinefieldRepr) -> Result<Self> {
        let mine_mask = repr.cells.map(|cell| cell.is_mine());
        let minefield = Self::from_mine_mask(&mine_mask)?;
        if minefield.cells != repr.cells || minefield.mine_count != repr.mine_count {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(minefield)
    }
}

impl Minefield {
    /// Builds a board from a mask of mine positions.
    ///
    /// Fails when the mask is empty or larger than [`Coord::MAX`] on either axis.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let size: Coord2 = (
            rows.try_into().map_err(|_| GameError::InvalidConfiguration)?,
            cols.try_into().map_err(|_| GameError::InvalidConfiguration)?,
        );
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidConfiguration);
        }

        let mut cells: Array2<CellValue> = Array2::default(size.to_nd_index());
        let mut mine_count: CellCount = 0;
        for ((row, col), &is_mine) in mine_mask.indexed_iter() {
            if !is_mine {
                continue;
            }
            cells[[row, col]] = CellValue::Mine;
            mine_count += 1;
        }

        for row in 0..size.0 {
            for col in 0..size.1 {
                let coords = (row, col);
                if cells[coords.to_nd_index()].is_mine() {
                    continue;
                }
                let adjacent = Area::around(coords, size)
                    .iter()
                    .filter(|&pos| cells[pos.to_nd_index()].is_mine())
                    .count();
                // a 3x3 box holds at most 8 mines around a safe center
                cells[coords.to_nd_index()] = CellValue::Count(adjacent as u8);
            }
        }

        Ok(Self { cells, mine_count })
    }

    /// Builds a board with mines at the given positions, duplicates collapse.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidConfiguration);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::IndexOutOfRange);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(&mine_mask)
    }

    /// Random board with mines sampled uniformly over the whole grid.
    pub fn generate(config: GameConfig, seed: u64) -> Result<Self> {
        RandomMinefieldGenerator::new(seed).generate(config)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::IndexOutOfRange)
        }
    }

    /// `(rows, cols)`
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // construction guarantees both axes fit in a `Coord`
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn value_at(&self, coords: Coord2) -> Result<CellValue> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    /// Clipped inclusive bounding box of the cell and its neighbors.
    pub fn neighborhood(&self, coords: Coord2) -> Result<Area> {
        let coords = self.validate_coords(coords)?;
        Ok(Area::around(coords, self.size()))
    }

    /// Row-major walk over every coordinate of the board.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub(crate) fn area_around(&self, coords: Coord2) -> Area {
        Area::around(coords, self.size())
    }
}

impl Index<Coord2> for Minefield {
    type Output = CellValue;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_count(field: &Minefield, (row, col): Coord2) -> u8 {
        let (rows, cols) = field.size();
        let mut count = 0;
        for r in row.saturating_sub(1)..=row + 1 {
            for c in col.saturating_sub(1)..=col + 1 {
                if r < rows && c < cols && (r, c) != (row, col) && field.contains_mine((r, c)) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn counts_match_brute_force_on_fixed_board() {
        let mines = &[(0, 0), (0, 3), (1, 1), (3, 2), (4, 4)];
        let field = Minefield::from_mine_coords((5, 5), mines).unwrap();

        assert_eq!(field.mine_count(), 5);
        for coords in field.iter_coords() {
            match field[coords] {
                CellValue::Mine => assert!(mines.contains(&coords)),
                CellValue::Count(count) => {
                    assert_eq!(count, brute_force_count(&field, coords), "{coords:?}")
                }
            }
        }
    }

    #[test]
    fn two_diagonal_mines_give_center_two() {
        let field = Minefield::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(field.value_at((1, 1)), Ok(CellValue::Count(2)));
        assert_eq!(field.value_at((0, 2)), Ok(CellValue::Count(0)));
        assert_eq!(field.value_at((0, 1)), Ok(CellValue::Count(1)));
        assert_eq!(field.value_at((2, 2)), Ok(CellValue::Mine));
    }

    #[test]
    fn surrounded_cell_counts_eight() {
        let mines: alloc::vec::Vec<Coord2> = Area::around((1, 1), (3, 3))
            .iter()
            .filter(|&pos| pos != (1, 1))
            .collect();
        let field = Minefield::from_mine_coords((3, 3), &mines).unwrap();

        assert_eq!(field[(1, 1)], CellValue::Count(8));
        assert_eq!(field.safe_cell_count(), 1);
    }

    #[test]
    fn duplicate_mines_collapse() {
        let field = Minefield::from_mine_coords((2, 2), &[(0, 0), (0, 0)]).unwrap();

        assert_eq!(field.mine_count(), 1);
    }

    #[test]
    fn out_of_range_queries_fail() {
        let field = Minefield::from_mine_coords((3, 4), &[(0, 0)]).unwrap();

        assert_eq!(field.size(), (3, 4));
        assert_eq!(field.value_at((3, 0)), Err(GameError::IndexOutOfRange));
        assert_eq!(field.value_at((0, 4)), Err(GameError::IndexOutOfRange));
        assert_eq!(field.neighborhood((7, 7)), Err(GameError::IndexOutOfRange));
        assert_eq!(
            Minefield::from_mine_coords((3, 4), &[(3, 3)]),
            Err(GameError::IndexOutOfRange)
        );
    }

    #[test]
    fn empty_board_is_rejected() {
        assert_eq!(
            Minefield::from_mine_coords((0, 4), &[]),
            Err(GameError::InvalidConfiguration)
        );
    }

    #[test]
    fn neighborhood_is_clipped_box_with_center() {
        let field = Minefield::from_mine_coords((3, 4), &[]).unwrap();

        let area = field.neighborhood((0, 3)).unwrap();

        assert_eq!(
            area,
            Area {
                row_from: 0,
                row_to: 1,
                col_from: 2,
                col_to: 3,
            }
        );
    }

    #[test]
    fn game_config_reflects_board() {
        let field = Minefield::from_mine_coords((2, 3), &[(1, 2)]).unwrap();

        assert_eq!(field.game_config(), GameConfig::new_unchecked((2, 3), 1));
        assert_eq!(field.total_cells(), 6);
        assert_eq!(field.iter_coords().count(), 6);
    }

    #[test]
    fn deserialize_accepts_consistent_board() {
        let field = Minefield::from_mine_coords((2, 2), &[(0, 0)]).unwrap();

        let json = serde_json::to_string(&field).unwrap();

        assert_eq!(serde_json::from_str::<Minefield>(&json).unwrap(), field);
    }

    #[test]
    fn deserialize_rejects_tampered_counts() {
        let field = Minefield::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains("\"mine_count\":1"), "{json}");

        let wrong_total = json.replace("\"mine_count\":1", "\"mine_count\":9");
        assert!(serde_json::from_str::<Minefield>(&wrong_total).is_err());

        let wrong_cell = json.replacen("{\"Count\":1}", "{\"Count\":5}", 1);
        assert_ne!(wrong_cell, json);
        assert!(serde_json::from_str::<Minefield>(&wrong_cell).is_err());
    }
}
