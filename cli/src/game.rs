use chrono::prelude::*;
use twinflip_core as game;

/// A [`game::Session`] plus the wall-clock bookkeeping the console reports.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    pub session: game::Session,
    pub seed: u64,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl GameSession {
    pub(crate) fn new(config: game::GameConfig, seed: u64) -> Self {
        log::debug!("new {}x{} game, seed {}", config.size, config.size, seed);
        let generator = game::RandomBoardGenerator::new(seed);
        Self {
            session: game::Session::with_generator(generator, config),
            seed,
            started_at: None,
            ended_at: None,
        }
    }

    /// Deals a new board of the same size and resets the clock.
    pub(crate) fn restart(&mut self, seed: u64) {
        self.session
            .restart_with(game::RandomBoardGenerator::new(seed));
        self.seed = seed;
        self.started_at = None;
        self.ended_at = None;
    }

    pub(crate) fn activate(
        &mut self,
        coords: game::Coord2,
        now: DateTime<Utc>,
    ) -> game::Result<game::TurnOutcome> {
        let outcome = self.session.activate(coords)?;
        self.on_successful_move(now);
        Ok(outcome)
    }

    pub(crate) fn observation(&self) -> game::Observation {
        game::Observation::from_session(&self.session)
    }

    pub(crate) fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    fn on_successful_move(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        if self.session.is_finished() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn solve(play: &mut GameSession, now: DateTime<Utc>) {
        let pairs = play.session.board().pair_count();
        for pair in 1..=pairs {
            let (a, b) = play.session.board().positions_of(pair).unwrap();
            play.activate(a, now).unwrap();
            play.activate(b, now).unwrap();
        }
    }

    #[test]
    fn clock_starts_on_first_move_and_stops_on_win() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut play = GameSession::new(game::GameConfig::new(2).unwrap(), 9);
        assert_eq!(play.elapsed_secs(start), 0);

        let (a, _) = play.session.board().positions_of(1).unwrap();
        play.activate(a, start).unwrap();
        assert_eq!(play.started_at, Some(start));
        assert_eq!(play.elapsed_secs(start + TimeDelta::seconds(5)), 5);

        let (_, b) = play.session.board().positions_of(1).unwrap();
        play.activate(b, start).unwrap();
        let end = start + TimeDelta::seconds(30);
        let (c, d) = play.session.board().positions_of(2).unwrap();
        play.activate(c, end).unwrap();
        play.activate(d, end).unwrap();

        assert!(play.session.is_finished());
        assert_eq!(play.elapsed_secs(end + TimeDelta::seconds(100)), 30);
    }

    #[test]
    fn rejected_moves_do_not_start_clock() {
        let now = Utc::now();
        let mut play = GameSession::new(game::GameConfig::new(2).unwrap(), 1);

        assert_eq!(
            play.activate((4, 4), now),
            Err(game::GameError::InvalidCoords)
        );
        assert_eq!(play.started_at, None);
    }

    #[test]
    fn seed_is_reproducible() {
        let config = game::GameConfig::new(4).unwrap();
        let mut a = GameSession::new(config, 77);
        let b = GameSession::new(config, 77);
        assert_eq!(a.session.board(), b.session.board());

        solve(&mut a, Utc::now());
        assert!(a.session.is_finished());
        assert!(a.ended_at.is_some());
    }

    #[test]
    fn restart_resets_progress_and_clock() {
        let mut play = GameSession::new(game::GameConfig::new(2).unwrap(), 3);
        solve(&mut play, Utc::now());

        play.restart(4);

        assert_eq!(play.seed, 4);
        assert_eq!(play.started_at, None);
        assert_eq!(play.ended_at, None);
        assert!(!play.session.is_finished());
        assert_eq!(play.session.remaining_pairs(), 2);
    }
}
