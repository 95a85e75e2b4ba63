use chrono::prelude::*;
use std::fmt::Write as _;
use std::io::{BufRead, Write};
use thiserror::Error;
use twinflip_core as game;

use crate::game::GameSession;
use crate::settings::Settings;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputError {
    #[error("Invalid input! Enter row and column as two numbers, e.g. `1 2`.")]
    NotTwoNumbers,
    #[error("Coordinates are outside the board, use 0 to {max}.")]
    OutOfRange { max: game::Coord },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Pick(game::Coord2),
    Quit,
}

/// Parses one prompt answer: `row col` (0-indexed) or `q`/`quit`.
pub(crate) fn parse_command(line: &str, size: game::Coord) -> Result<Command, InputError> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Ok(Command::Quit);
    }

    let mut numbers = line.split_whitespace().map(str::parse::<i64>);
    let (Some(Ok(row)), Some(Ok(col)), None) = (numbers.next(), numbers.next(), numbers.next())
    else {
        return Err(InputError::NotTwoNumbers);
    };

    let in_range = |value: i64| (0..i64::from(size)).contains(&value);
    if !in_range(row) || !in_range(col) {
        return Err(InputError::OutOfRange {
            max: size.saturating_sub(1),
        });
    }

    // Both values are below `size`, which is a `Coord`.
    Ok(Command::Pick((row as game::Coord, col as game::Coord)))
}

/// Draws the grid, one row per line: face-up values right-aligned, face-down
/// cards as `marker`.
pub(crate) fn render(obs: &game::Observation, marker: &str) -> String {
    let mut out = String::new();
    for row in 0..obs.size {
        for col in 0..obs.size {
            let _ = match obs.cell_at((row, col)) {
                Some(pair) => write!(out, "{pair:>2} "),
                None => write!(out, "{marker:<2} "),
            };
        }
        out.push('\n');
    }
    out
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct RoundSummary {
    pub seed: u64,
    pub won: bool,
    pub turns: u32,
    pub mismatches: u32,
    pub elapsed_secs: u32,
}

impl RoundSummary {
    fn of(game: &GameSession) -> Self {
        Self {
            seed: game.seed,
            won: game.session.is_finished(),
            turns: game.session.turns_taken(),
            mismatches: game.session.mismatches(),
            elapsed_secs: game.elapsed_secs(Utc::now()),
        }
    }
}

/// Line-oriented front end: reads coordinates from `input`, writes the board and
/// messages to `output`.
pub(crate) struct Console<R, W> {
    input: R,
    output: W,
    settings: Settings,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub(crate) fn new(input: R, output: W, settings: Settings) -> Self {
        Self {
            input,
            output,
            settings,
        }
    }

    /// Plays rounds until the player quits, input ends, or they decline another round.
    pub(crate) fn run(&mut self, mut game: GameSession) -> anyhow::Result<Vec<RoundSummary>> {
        let mut rounds = Vec::new();
        loop {
            let won = self.play_round(&mut game)?;
            let summary = RoundSummary::of(&game);
            log::info!(
                "round finished (seed {}): won={} turns={} misses={} time={}s",
                summary.seed,
                summary.won,
                summary.turns,
                summary.mismatches,
                summary.elapsed_secs
            );
            rounds.push(summary);

            if !won || !self.settings.play_again_prompt || !self.ask_play_again()? {
                break;
            }
            game.restart(rand::random());
        }
        Ok(rounds)
    }

    fn play_round(&mut self, game: &mut GameSession) -> anyhow::Result<bool> {
        writeln!(
            self.output,
            "Find all {} pairs! Enter row and column (0-indexed), or `q` to quit.",
            game.session.board().pair_count()
        )?;

        while !game.session.is_finished() {
            self.print_board(game)?;
            if self.pick(game, "First card")?.is_none() {
                return Ok(false);
            }

            self.print_board(game)?;
            let Some(outcome) = self.pick(game, "Second card")? else {
                return Ok(false);
            };
            self.print_board(game)?;

            match outcome {
                game::TurnOutcome::Matched { .. } => writeln!(self.output, "Pair found!")?,
                game::TurnOutcome::Won { .. } => {
                    let elapsed = game.elapsed_secs(Utc::now());
                    writeln!(
                        self.output,
                        "Congratulations! You found all pairs in {} turns ({} misses, {}s).",
                        game.session.turns_taken(),
                        game.session.mismatches(),
                        elapsed
                    )?;
                }
                game::TurnOutcome::Mismatched { .. } => {
                    writeln!(self.output, "No pair! The cards will be hidden again.")?;
                    self.output.flush()?;
                    let delay = self.settings.mismatch_delay();
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                    game.session.resolve_mismatch()?;
                }
                game::TurnOutcome::FirstRevealed(coords) => {
                    log::error!("second pick at {:?} did not complete the turn", coords);
                }
            }
        }

        Ok(true)
    }

    /// Prompts until a card is flipped. `None` when the player quits or input ends.
    fn pick(
        &mut self,
        game: &mut GameSession,
        prompt: &str,
    ) -> anyhow::Result<Option<game::TurnOutcome>> {
        loop {
            let Some(line) = self.prompt(&format!("{prompt} (row col): "))? else {
                return Ok(None);
            };

            let coords = match parse_command(&line, game.session.size()) {
                Ok(Command::Pick(coords)) => coords,
                Ok(Command::Quit) => {
                    log::debug!("player quit");
                    return Ok(None);
                }
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };

            match game.activate(coords, Utc::now()) {
                Ok(outcome) => return Ok(Some(outcome)),
                Err(game::GameError::SameCell) => {
                    writeln!(self.output, "You cannot pick the same card twice!")?;
                }
                Err(err @ game::GameError::AlreadyRevealed) => writeln!(self.output, "{err}")?,
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn ask_play_again(&mut self) -> anyhow::Result<bool> {
        let answer = self.prompt("Play again? [y/n]: ")?;
        Ok(answer.is_some_and(|answer| {
            let answer = answer.trim();
            answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
        }))
    }

    fn prompt(&mut self, text: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn print_board(&mut self, game: &GameSession) -> anyhow::Result<()> {
        let board = render(&game.observation(), &self.settings.hidden_marker);
        write!(self.output, "{board}")?;
        Ok(())
    }
}
