use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Ready,
    Active,
    Won,
}

impl SessionState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Where the current turn stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    Idle,
    OneSelected(Coord2),
    /// Two mismatched cards are face up until [`Session::resolve_mismatch`].
    AwaitingHide(Coord2, Coord2),
}

impl TurnState {
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::AwaitingHide(..))
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    FirstRevealed(Coord2),
    Matched {
        pair: PairId,
        first: Coord2,
        second: Coord2,
    },
    Mismatched {
        first: Coord2,
        second: Coord2,
    },
    Won {
        pair: PairId,
        first: Coord2,
        second: Coord2,
    },
}

impl TurnOutcome {
    pub const fn completes_turn(self) -> bool {
        !matches!(self, Self::FirstRevealed(_))
    }

    pub const fn is_match(self) -> bool {
        matches!(self, Self::Matched { .. } | Self::Won { .. })
    }
}

/// One game in progress: board, face-up cards, current selection and counters.
///
/// Front ends feed every cell activation into [`Session::activate`] and, once a
/// mismatch has been shown for as long as they like, call
/// [`Session::resolve_mismatch`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    board: Board,
    revealed: RevealedState,
    matched: Array2<bool>,
    turn: TurnState,
    state: SessionState,
    remaining_pairs: CellCount,
    turns_taken: u32,
    mismatches: u32,
}

impl Session {
    pub fn new(board: Board) -> Self {
        let size = board.size();
        Self {
            revealed: RevealedState::new(size),
            matched: Array2::default((size, size).to_nd_index()),
            remaining_pairs: board.pair_count(),
            board,
            turn: Default::default(),
            state: Default::default(),
            turns_taken: 0,
            mismatches: 0,
        }
    }

    pub fn with_generator<G: BoardGenerator>(generator: G, config: GameConfig) -> Self {
        Self::new(generator.generate(config))
    }

    /// Deals a fresh board of the same size, discarding all progress.
    pub fn restart_with<G: BoardGenerator>(&mut self, generator: G) {
        let config = self.board.game_config();
        log::debug!("restarting {}x{} session", config.size, config.size);
        *self = Self::with_generator(generator, config);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn revealed(&self) -> &RevealedState {
        &self.revealed
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn size(&self) -> Coord {
        self.board.size()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_locked(&self) -> bool {
        self.turn.is_locked()
    }

    pub fn remaining_pairs(&self) -> CellCount {
        self.remaining_pairs
    }

    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    pub fn mismatches(&self) -> u32 {
        self.mismatches
    }

    pub fn is_matched(&self, coords: Coord2) -> bool {
        self.board
            .validate_coords(coords)
            .is_ok_and(|coords| self.matched[coords.to_nd_index()])
    }

    /// Value shown at `coords`, if the card is face up.
    pub fn visible_pair_at(&self, coords: Coord2) -> Option<PairId> {
        self.revealed
            .is_revealed(coords)
            .then(|| self.board[coords])
    }

    pub fn can_activate(&self, coords: Coord2) -> bool {
        !self.is_finished()
            && !self.is_locked()
            && self.board.validate_coords(coords).is_ok()
            && !self.revealed.is_revealed(coords)
    }

    /// Flips the card at `coords` as part of the current turn.
    ///
    /// The second card of a turn is compared against the first right away. A match
    /// stays face up for good; a mismatch locks the session until
    /// [`Session::resolve_mismatch`] turns both cards back down.
    pub fn activate(&mut self, coords: Coord2) -> Result<TurnOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;

        let first = match self.turn {
            TurnState::AwaitingHide(..) => return Err(GameError::Locked),
            TurnState::OneSelected(first) if first == coords => {
                return Err(GameError::SameCell);
            }
            TurnState::OneSelected(first) => Some(first),
            TurnState::Idle => None,
        };

        if self.revealed[coords] {
            return Err(GameError::AlreadyRevealed);
        }

        log::trace!("activate {:?} during {:?}", coords, self.turn);
        self.revealed.reveal(coords)?;
        self.mark_started();

        let Some(first) = first else {
            self.turn = TurnState::OneSelected(coords);
            return Ok(TurnOutcome::FirstRevealed(coords));
        };

        self.complete_turn(first, coords)
    }

    /// Hides the pending mismatched pair and unlocks the session.
    /// Returns the hidden cells, or `None` when no mismatch was pending.
    pub fn resolve_mismatch(&mut self) -> Result<Option<(Coord2, Coord2)>> {
        let TurnState::AwaitingHide(first, second) = self.turn else {
            return Ok(None);
        };

        if self.is_matched(first) || self.is_matched(second) {
            log::warn!("refusing to hide matched cards {:?} / {:?}", first, second);
        } else {
            self.revealed.hide(first, second)?;
        }
        self.turn = TurnState::Idle;
        log::debug!("hid mismatched cards {:?} and {:?}", first, second);
        Ok(Some((first, second)))
    }

    fn complete_turn(&mut self, first: Coord2, second: Coord2) -> Result<TurnOutcome> {
        self.turns_taken = self.turns_taken.saturating_add(1);

        if !self.board.is_match(first, second)? {
            self.mismatches = self.mismatches.saturating_add(1);
            self.turn = TurnState::AwaitingHide(first, second);
            log::debug!("mismatch {:?} / {:?}", first, second);
            return Ok(TurnOutcome::Mismatched { first, second });
        }

        let pair = self.board[first];
        self.matched[first.to_nd_index()] = true;
        self.matched[second.to_nd_index()] = true;
        self.remaining_pairs = self.remaining_pairs.saturating_sub(1);
        self.turn = TurnState::Idle;
        log::debug!(
            "matched pair {} at {:?} / {:?}, {} left",
            pair,
            first,
            second,
            self.remaining_pairs
        );

        Ok(if self.remaining_pairs == 0 {
            self.state = SessionState::Won;
            TurnOutcome::Won {
                pair,
                first,
                second,
            }
        } else {
            TurnOutcome::Matched {
                pair,
                first,
                second,
            }
        })
    }

    fn mark_started(&mut self) {
        if matches!(self.state, SessionState::Ready) {
            self.state = SessionState::Active;
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
