#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use hashbrown::HashMap;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use error::*;
pub use generator::*;
pub use observation::*;
pub use session::*;
pub use state::*;
pub use types::*;

mod error;
mod generator;
mod observation;
mod session;
mod state;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
}

impl GameConfig {
    pub const MIN_SIZE: Coord = 2;
    pub const MAX_SIZE: Coord = 16;

    pub const fn new_unchecked(size: Coord) -> Self {
        Self { size }
    }

    pub fn new(size: Coord) -> Result<Self> {
        if !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&size) {
            return Err(GameError::InvalidSize);
        }
        if size % 2 != 0 {
            return Err(GameError::OddSize);
        }
        Ok(Self::new_unchecked(size))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub const fn pair_count(&self) -> CellCount {
        self.total_cells() / 2
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(4)
    }
}

/// Immutable square grid of pair ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pairs: Array2<PairId>,
    pair_count: CellCount,
}

impl Board {
    /// Builds a board from a row-major grid, checking that it is square with an
    /// even side and that every id in `1..=pairs` appears exactly twice.
    pub fn from_pairs(pairs: Array2<PairId>) -> Result<Self> {
        let (rows, cols) = pairs.dim();
        if rows != cols {
            return Err(GameError::InvalidBoardShape);
        }
        let size: Coord = rows.try_into().map_err(|_| GameError::InvalidSize)?;
        let config = GameConfig::new(size)?;
        let pair_count = config.pair_count();

        let mut seen: HashMap<PairId, u8> = HashMap::with_capacity(pair_count.into());
        for &pair in pairs.iter() {
            if pair == 0 || pair > pair_count {
                return Err(GameError::UnbalancedPairs);
            }
            *seen.entry(pair).or_default() += 1;
        }
        if seen.len() != usize::from(pair_count) || seen.values().any(|&count| count != 2) {
            return Err(GameError::UnbalancedPairs);
        }

        Ok(Self { pairs, pair_count })
    }

    pub fn from_rows<R: AsRef<[PairId]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let row = row.as_ref();
            if row.len() != size {
                return Err(GameError::InvalidBoardShape);
            }
            cells.extend_from_slice(row);
        }
        let pairs =
            Array2::from_shape_vec((size, size), cells).map_err(|_| GameError::InvalidBoardShape)?;
        Self::from_pairs(pairs)
    }

    /// Callers guarantee the pairing invariant; used by generators.
    pub(crate) fn from_shuffled(config: GameConfig, cells: Vec<PairId>) -> Self {
        let side = usize::from(config.size);
        debug_assert_eq!(cells.len(), side * side);
        let pairs = Array2::from_shape_vec((side, side), cells)
            .expect("generator should fill every cell");
        Self {
            pairs,
            pair_count: config.pair_count(),
        }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord {
        // Side length is checked against `GameConfig::MAX_SIZE` on construction.
        self.pairs.nrows() as Coord
    }

    pub fn pair_count(&self) -> CellCount {
        self.pair_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn pair_at(&self, coords: Coord2) -> Result<PairId> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// Compares the values under two cells. Identical coordinates match.
    pub fn is_match(&self, first: Coord2, second: Coord2) -> Result<bool> {
        Ok(self.pair_at(first)? == self.pair_at(second)?)
    }

    /// Both positions holding `pair`, in row-major order.
    pub fn positions_of(&self, pair: PairId) -> Option<(Coord2, Coord2)> {
        let mut found = iter_cells(self.size()).filter(|&coords| self[coords] == pair);
        Some((found.next()?, found.next()?))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[PairId]> {
        self.pairs
            .rows()
            .into_iter()
            .filter_map(|row| row.to_slice())
    }
}

impl Index<Coord2> for Board {
    type Output = PairId;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.pairs[coords.to_nd_index()]
    }
}

/// Builds a freshly shuffled board of the given side length using the thread RNG.
#[cfg(feature = "thread_rng")]
pub fn create_board(size: Coord) -> Result<Board> {
    let config = GameConfig::new(size)?;
    Ok(create_board_with_rng(config, &mut rand::rng()))
}

/// True iff both cells hold the same pair id.
pub fn is_match(board: &Board, first: Coord2, second: Coord2) -> Result<bool> {
    board.is_match(first, second)
}
