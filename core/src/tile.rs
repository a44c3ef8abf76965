use serde::{Deserialize, Serialize};

/// Immutable content of a minefield cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    /// Mines in the clipped 8-neighborhood, `0..=8`.
    Count(u8),
}

impl CellValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Count(0))
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Canonical player-visible state stored by the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlay {
    Hidden,
    Flagged,
    Revealed,
}

impl Overlay {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What a front end should draw inside a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayValue {
    Empty,
    Count(u8),
    Mine,
}

impl DisplayValue {
    /// Projection of the overlay over the true value, hidden and flagged cells show nothing.
    pub const fn project(overlay: Overlay, value: CellValue) -> Self {
        match (overlay, value) {
            (Overlay::Revealed, CellValue::Mine) => Self::Mine,
            (Overlay::Revealed, CellValue::Count(count)) => Self::Count(count),
            (Overlay::Hidden | Overlay::Flagged, _) => Self::Empty,
        }
    }
}

/// Element of a full-board snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub overlay: Overlay,
    pub display: DisplayValue,
}
