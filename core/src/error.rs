use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board size must be between 2 and 16")]
    InvalidSize,
    #[error("Board size must be even so every card has a partner")]
    OddSize,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Every pair id must appear exactly twice")]
    UnbalancedPairs,
    #[error("The same card cannot be picked twice in one turn")]
    SameCell,
    #[error("Card is already face up")]
    AlreadyRevealed,
    #[error("Mismatched cards are still showing")]
    Locked,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
