use ndarray::Array2;

use super::*;

/// Rejection sampling over the allowed cells: a sample that lands on an existing mine is drawn again.
///
/// No start cell is protected, the first reveal may hit a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    placement: Placement,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            placement: Placement::Uniform,
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Minefield> {
        use rand::prelude::*;

        config.validate()?;
        let candidates = self.placement.candidate_cells(config.size);
        if config.mines > candidates {
            log::warn!(
                "Cannot place {} mines on {} candidate cells with {:?} placement",
                config.mines,
                candidates,
                self.placement
            );
            return Err(GameError::InvalidConfiguration);
        }
        log::debug!(
            "Generating {:?} with seed {} and {:?} placement",
            config,
            self.seed,
            self.placement
        );

        let (max_row, max_col) = self.placement.sample_bounds(config.size);
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;
        let mut rejected: u32 = 0;

        while placed < config.mines {
            let coords: Coord2 = (rng.random_range(0..max_row), rng.random_range(0..max_col));
            let cell = &mut mines[coords.to_nd_index()];
            if *cell {
                rejected += 1;
                continue;
            }
            *cell = true;
            placed += 1;
        }
        log::trace!("Placed {} mines, {} samples rejected", placed, rejected);

        let minefield = Minefield::from_mine_mask(&mines)?;

        // double check mine count
        if minefield.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                minefield.mine_count(),
                config.mines
            );
        }
        Ok(minefield)
    }
}
