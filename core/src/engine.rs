use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Playing,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::Playing
    }
}

/// A cell whose display changed during a single action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedCell {
    pub coords: Coord2,
    pub display: DisplayValue,
}

/// Result of a reveal, `changed` lists cells in the order they were opened, terminal sweep included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealReport {
    pub outcome: Outcome,
    pub changed: Vec<ChangedCell>,
}

impl RevealReport {
    fn unchanged(outcome: Outcome) -> Self {
        Self {
            outcome,
            changed: Vec::new(),
        }
    }

    pub fn has_update(&self) -> bool {
        !self.changed.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Flagged | Self::Unflagged => true,
        }
    }

    /// Whether the cell carries a flag after the toggle.
    pub const fn flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// One game from the first reveal to the terminal sweep.
///
/// The overlay is the only record of what the player has uncovered, front ends
/// render from [`Session::cells_snapshot`] or the reported changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SessionRepr")]
pub struct Session {
    minefield: Minefield,
    overlay: Array2<Overlay>,
    revealed_safe: CellCount,
    flagged_count: CellCount,
    outcome: Outcome,
    triggered_mine: Option<Coord2>,
}

#[derive(Deserialize)]
struct SessionRepr {
    minefield: Minefield,
    overlay: Array2<Overlay>,
    revealed_safe: CellCount,
    flagged_count: CellCount,
    outcome: Outcome,
    triggered_mine: Option<Coord2>,
}

impl TryFrom<SessionRepr> for Session {
    type Error = GameError;

    /// Counters and the overlay shape must agree with the board.
    fn try_from(repr: SessionRepr) -> Result<Self> {
        let size = repr.minefield.size();
        if repr.overlay.dim() != (usize::from(size.0), usize::from(size.1)) {
            return Err(GameError::InvalidConfiguration);
        }

        let mut revealed_safe: CellCount = 0;
        let mut flagged_count: CellCount = 0;
        for coords in repr.minefield.iter_coords() {
            match repr.overlay[coords.to_nd_index()] {
                Overlay::Flagged => flagged_count += 1,
                Overlay::Revealed if !repr.minefield.contains_mine(coords) => revealed_safe += 1,
                Overlay::Revealed | Overlay::Hidden => {}
            }
        }
        if revealed_safe != repr.revealed_safe || flagged_count != repr.flagged_count {
            return Err(GameError::InvalidConfiguration);
        }

        if let Some(coords) = repr.triggered_mine {
            let coords = repr.minefield.validate_coords(coords)?;
            if !repr.minefield.contains_mine(coords) {
                return Err(GameError::InvalidConfiguration);
            }
        }

        Ok(Self {
            minefield: repr.minefield,
            overlay: repr.overlay,
            revealed_safe,
            flagged_count,
            outcome: repr.outcome,
            triggered_mine: repr.triggered_mine,
        })
    }
}

impl Session {
    pub fn new(minefield: Minefield) -> Self {
        let size = minefield.size();
        Self {
            minefield,
            overlay: Array2::default(size.to_nd_index()),
            revealed_safe: 0,
            flagged_count: 0,
            outcome: Default::default(),
            triggered_mine: None,
        }
    }

    /// Fresh board with uniform mine placement.
    pub fn start(config: GameConfig, seed: u64) -> Result<Self> {
        Self::start_with(RandomMinefieldGenerator::new(seed), config)
    }

    pub fn start_with(generator: impl MinefieldGenerator, config: GameConfig) -> Result<Self> {
        let minefield = generator.generate(config)?;
        log::debug!("Session started on {:?}", minefield.game_config());
        Ok(Self::new(minefield))
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn minefield(&self) -> &Minefield {
        &self.minefield
    }

    pub fn size(&self) -> Coord2 {
        self.minefield.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.minefield.mine_count()
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.minefield.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Safe cells uncovered so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn overlay_at(&self, coords: Coord2) -> Result<Overlay> {
        let coords = self.minefield.validate_coords(coords)?;
        Ok(self.overlay[coords.to_nd_index()])
    }

    pub fn display_at(&self, coords: Coord2) -> Result<DisplayValue> {
        let coords = self.minefield.validate_coords(coords)?;
        Ok(self.display(coords))
    }

    pub fn cells_snapshot(&self) -> Array2<CellView> {
        Array2::from_shape_fn(self.overlay.raw_dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            CellView {
                overlay: self.overlay[coords.to_nd_index()],
                display: self.display(coords),
            }
        })
    }

    /// Flags a hidden cell or clears a flag, revealed cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.minefield.validate_coords(coords)?;
        self.check_playing()?;

        let cell = &mut self.overlay[coords.to_nd_index()];
        Ok(match *cell {
            Overlay::Hidden => {
                *cell = Overlay::Flagged;
                self.flagged_count += 1;
                Flagged
            }
            Overlay::Flagged => {
                *cell = Overlay::Hidden;
                self.flagged_count -= 1;
                Unflagged
            }
            Overlay::Revealed => NoChange,
        })
    }

    /// Opens a hidden cell, cascading through zero cells, and ends the game on a mine or on the last safe cell.
    ///
    /// Flagged and already revealed targets are ignored.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        let coords = self.minefield.validate_coords(coords)?;
        self.check_playing()?;

        if self.overlay[coords.to_nd_index()] != Overlay::Hidden {
            return Ok(RevealReport::unchanged(self.outcome));
        }

        let mut changed = Vec::new();
        let value = self.minefield[coords];
        match value {
            CellValue::Mine => {
                self.open_cell(coords, &mut changed);
                self.triggered_mine = Some(coords);
                self.end_game(Outcome::Lost, &mut changed);
            }
            CellValue::Count(0) => self.flood_fill(coords, &mut changed),
            CellValue::Count(_) => self.open_cell(coords, &mut changed),
        }

        if !self.is_finished() && self.revealed_safe == self.minefield.safe_cell_count() {
            self.end_game(Outcome::Won, &mut changed);
        }

        Ok(RevealReport {
            outcome: self.outcome,
            changed,
        })
    }

    fn flood_fill(&mut self, origin: Coord2, changed: &mut Vec<ChangedCell>) {
        self.open_cell(origin, changed);
        let mut to_visit = VecDeque::from([origin]);
        log::trace!("Starting flood-fill from {:?}", origin);

        // only zero cells are queued, and each only once since it is revealed when queued
        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.minefield.area_around(visit_coords) {
                if !self.overlay[pos.to_nd_index()].is_unrevealed() {
                    continue;
                }

                self.open_cell(pos, changed);
                if self.minefield[pos].is_zero() {
                    to_visit.push_back(pos);
                }
            }
        }
        log::trace!("Flood-fill from {:?} opened {} cells", origin, changed.len());
    }

    /// Marks the cell revealed, overriding a flag.
    fn open_cell(&mut self, coords: Coord2, changed: &mut Vec<ChangedCell>) {
        let cell = &mut self.overlay[coords.to_nd_index()];
        if *cell == Overlay::Flagged {
            self.flagged_count -= 1;
        }
        *cell = Overlay::Revealed;
        if !self.minefield[coords].is_mine() {
            self.revealed_safe += 1;
        }
        changed.push(ChangedCell {
            coords,
            display: self.display(coords),
        });
    }

    fn end_game(&mut self, outcome: Outcome, changed: &mut Vec<ChangedCell>) {
        if self.is_finished() {
            return;
        }
        self.outcome = outcome;
        log::debug!("Game ended: {:?}", outcome);
        self.sweep(changed);
    }

    /// One-time pass after the game ends, flagged cells stay as the player left them.
    fn sweep(&mut self, changed: &mut Vec<ChangedCell>) {
        let won = matches!(self.outcome, Outcome::Won);
        for coords in self.minefield.iter_coords() {
            if self.overlay[coords.to_nd_index()] != Overlay::Hidden {
                continue;
            }
            if won || self.minefield.contains_mine(coords) {
                self.open_cell(coords, changed);
            }
        }
    }

    fn display(&self, coords: Coord2) -> DisplayValue {
        DisplayValue::project(self.overlay[coords.to_nd_index()], self.minefield[coords])
    }

    fn check_playing(&self) -> Result<()> {
        if self.is_finished() {
            Err(GameError::InvalidTransition)
        } else {
            Ok(())
        }
    }
}
