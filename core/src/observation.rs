use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a player can see of a session: face-up values and progress, never the
/// hidden layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub size: Coord,
    pub cells: Array2<Option<PairId>>,
    pub remaining_pairs: CellCount,
    pub locked: bool,
}

impl Observation {
    pub fn new(
        size: Coord,
        cells: Array2<Option<PairId>>,
        remaining_pairs: CellCount,
        locked: bool,
    ) -> Result<Self> {
        let obs = Self {
            size,
            cells,
            remaining_pairs,
            locked,
        };
        obs.validate()?;
        Ok(obs)
    }

    pub fn from_session(session: &Session) -> Self {
        let size = session.size();
        let mut cells = Array2::from_elem((size, size).to_nd_index(), None);

        for coords in iter_cells(size) {
            cells[coords.to_nd_index()] = session.visible_pair_at(coords);
        }

        Self {
            size,
            cells,
            remaining_pairs: session.remaining_pairs(),
            locked: session.is_locked(),
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<PairId> {
        self.cells.get(coords.to_nd_index()).copied().flatten()
    }

    pub fn validate(&self) -> Result<()> {
        let expected = (usize::from(self.size), usize::from(self.size));
        if self.cells.dim() != expected {
            return Err(GameError::InvalidBoardShape);
        }

        let pair_count = GameConfig::new(self.size)?.pair_count();
        if self.remaining_pairs > pair_count {
            return Err(GameError::UnbalancedPairs);
        }

        Ok(())
    }
}
