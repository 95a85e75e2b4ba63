use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Face-up flags for every cell, laid out like the [`Board`] it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealedState {
    revealed: Array2<bool>,
}

impl RevealedState {
    pub fn new(size: Coord) -> Self {
        let side = usize::from(size);
        Self {
            revealed: Array2::default((side, side)),
        }
    }

    pub fn for_board(board: &Board) -> Self {
        Self::new(board.size())
    }

    pub fn size(&self) -> Coord {
        self.revealed.nrows() as Coord
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.validate_coords(coords)
            .is_ok_and(|coords| self.revealed[coords.to_nd_index()])
    }

    pub fn revealed_count(&self) -> CellCount {
        // Bounded by `GameConfig::MAX_SIZE` squared.
        self.revealed.iter().filter(|&&is_up| is_up).count() as CellCount
    }

    pub fn all_revealed(&self) -> bool {
        self.revealed.iter().all(|&is_up| is_up)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.revealed[coords.to_nd_index()] = true;
        Ok(())
    }

    /// Turns both cells face down. Already hidden cells stay hidden.
    pub fn hide(&mut self, first: Coord2, second: Coord2) -> Result<()> {
        let first = self.validate_coords(first)?;
        let second = self.validate_coords(second)?;
        self.revealed[first.to_nd_index()] = false;
        self.revealed[second.to_nd_index()] = false;
        Ok(())
    }
}

impl Index<Coord2> for RevealedState {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.revealed[coords.to_nd_index()]
    }
}

pub fn reveal_card(state: &mut RevealedState, coords: Coord2) -> Result<()> {
    state.reveal(coords)
}

pub fn hide_cards(state: &mut RevealedState, first: Coord2, second: Coord2) -> Result<()> {
    state.hide(first, second)
}

/// New board from `generator` plus an all-hidden state of the same shape.
pub fn initialize_game_with<G: BoardGenerator>(
    generator: G,
    config: GameConfig,
) -> (Board, RevealedState) {
    let board = generator.generate(config);
    let state = RevealedState::for_board(&board);
    (board, state)
}

#[cfg(feature = "thread_rng")]
pub fn initialize_game(size: Coord) -> Result<(Board, RevealedState)> {
    let board = create_board(size)?;
    let state = RevealedState::for_board(&board);
    Ok((board, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_hidden_and_square() {
        let (board, state) =
            initialize_game_with(RandomBoardGenerator::new(3), GameConfig::default());

        assert_eq!(state.size(), board.size());
        assert_eq!(state.revealed_count(), 0);
        assert!(iter_cells(4).all(|coords| !state[coords]));
    }

    #[test]
    fn reveal_then_hide() {
        let mut state = RevealedState::new(2);

        reveal_card(&mut state, (0, 1)).unwrap();
        reveal_card(&mut state, (1, 0)).unwrap();
        assert!(state.is_revealed((0, 1)));
        assert!(state.is_revealed((1, 0)));
        assert_eq!(state.revealed_count(), 2);

        hide_cards(&mut state, (0, 1), (1, 0)).unwrap();
        assert!(!state.is_revealed((0, 1)));
        assert!(!state.is_revealed((1, 0)));
    }

    #[test]
    fn hide_is_idempotent() {
        let mut state = RevealedState::new(2);
        reveal_card(&mut state, (1, 1)).unwrap();
        let before = state.clone();

        hide_cards(&mut state, (0, 0), (0, 1)).unwrap();
        hide_cards(&mut state, (0, 0), (0, 1)).unwrap();

        assert_eq!(state, before);
    }

    #[test]
    fn out_of_range_coords_are_rejected() {
        let mut state = RevealedState::new(2);

        assert_eq!(reveal_card(&mut state, (2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(
            hide_cards(&mut state, (0, 0), (0, 9)),
            Err(GameError::InvalidCoords)
        );
        assert!(!state.is_revealed((5, 5)));
        assert_eq!(state.revealed_count(), 0);
    }

    #[test]
    fn two_by_two_scenario() {
        let rows: [[PairId; 2]; 2] = [[1, 2], [2, 1]];
        let board = Board::from_rows(&rows).unwrap();
        let mut state = RevealedState::for_board(&board);
        let (a, b) = board.positions_of(1).unwrap();
        let (c, _) = board.positions_of(2).unwrap();

        reveal_card(&mut state, a).unwrap();
        reveal_card(&mut state, b).unwrap();
        assert_eq!(is_match(&board, a, b), Ok(true));

        let mut state = RevealedState::for_board(&board);
        reveal_card(&mut state, a).unwrap();
        reveal_card(&mut state, c).unwrap();
        assert_eq!(is_match(&board, a, c), Ok(false));
        hide_cards(&mut state, a, c).unwrap();
        assert!(!state.is_revealed(a));
        assert!(!state.is_revealed(c));
    }

    #[cfg(feature = "thread_rng")]
    #[test]
    fn initialize_game_shapes_match() {
        let (board, state) = initialize_game(6).unwrap();
        assert_eq!(board.size(), 6);
        assert_eq!(state.size(), 6);
        assert!(!state.all_revealed());
        assert_eq!(initialize_game(3), Err(GameError::OddSize));
    }
}
