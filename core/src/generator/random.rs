use super::*;
use alloc::vec::Vec;
use rand::prelude::*;

/// Uniform generation strategy: every arrangement of the pairs is equally likely.
/// The same seed and config always yield the same board.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        log::debug!("generating board with seed {}", self.seed);
        create_board_with_rng(config, &mut rng)
    }
}

/// Lays out ids `1..=pairs` twice each, shuffles them, and fills the grid row by row.
pub fn create_board_with_rng<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Board {
    let pair_count = config.pair_count();
    let mut cards: Vec<PairId> = (1..=pair_count).chain(1..=pair_count).collect();
    cards.shuffle(rng);

    log::debug!(
        "generated {size}x{size} board with {pair_count} pairs",
        size = config.size
    );
    Board::from_shuffled(config, cards)
}
