use std::collections::BTreeSet;

use tracing::{debug, info};
use uuid::Uuid;

use game_types::{
    BOARD_SIZE, GameError, GameMode, GamePhase, GameStatus, Player, RejectReason, SessionState,
    WordVerdict,
};

use crate::{LetterPool, PuzzleSelector, ScoringEngine, WordValidator};

/// Countdown length for one turn, in ticks of one time unit each.
pub const TURN_TICKS: u32 = 30;

/// Per-turn state, built when a number is selected and discarded when the
/// result is advanced past. The number lives here until commit; it only
/// enters `used_numbers` once the turn resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTurn {
    pub number: u8,
    /// Scrambled presentation order, never the bank's canonical order.
    pub letters: Vec<char>,
    pub pool: LetterPool,
    pub ticks_remaining: u32,
}

/// How a turn step resolved. `Rejected` is a non-transition: the session
/// stays in the playing phase and the countdown keeps running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Accepted { word: String, points: u32 },
    Rejected { word: String, reason: RejectReason },
    Expired { number: u8 },
}

/// One game session: the persisted record plus the engine-only turn state.
/// All access is serialized by the caller; every transition runs
/// read-validate-write to completion.
#[derive(Debug, Clone)]
pub struct Session {
    pub state: SessionState,
    turn: Option<ActiveTurn>,
}

impl Session {
    pub fn new(id: Uuid, players: [Player; 2], mode: GameMode) -> Self {
        let active_player_index = match mode {
            GameMode::Competitive => Some(0),
            GameMode::Cooperative => None,
        };

        let state = SessionState {
            id,
            players: players.into(),
            used_numbers: BTreeSet::new(),
            mode,
            active_player_index,
            phase: GamePhase::Selecting,
            status: GameStatus::Waiting,
            created_at: chrono::Utc::now().to_rfc3339(),
            ended_at: None,
        };

        Self { state, turn: None }
    }

    pub fn active_turn(&self) -> Option<&ActiveTurn> {
        self.turn.as_ref()
    }

    /// Move the session from waiting to playing.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.state.status != GameStatus::Waiting {
            return Err(GameError::invalid_transition("start", self.state.phase));
        }
        self.state.status = GameStatus::Playing;
        info!(session_id = %self.state.id, mode = ?self.state.mode, "session started");
        Ok(())
    }

    /// Pick a numbered puzzle: loads its scrambled letters, builds a fresh
    /// pool, and starts the countdown. The number is held in-progress, not
    /// yet committed.
    pub fn select_number(
        &mut self,
        number: u8,
        selector: &PuzzleSelector,
    ) -> Result<&ActiveTurn, GameError> {
        if self.state.status != GameStatus::Playing || self.state.phase != GamePhase::Selecting {
            return Err(GameError::invalid_transition(
                "select a number",
                self.state.phase,
            ));
        }

        let puzzle = selector.select(number, &self.state.used_numbers)?;
        let pool = LetterPool::from_letters(puzzle.letters.iter().copied());

        self.state.phase = GamePhase::Playing;
        info!(
            session_id = %self.state.id,
            number,
            letters = puzzle.letters.len(),
            "puzzle selected"
        );

        Ok(self.turn.insert(ActiveTurn {
            number,
            letters: puzzle.letters,
            pool,
            ticks_remaining: TURN_TICKS,
        }))
    }

    /// Submit a word for the current turn, validated against the puzzle's
    /// full letter set. A valid word awards points, commits the number, and
    /// ends the turn; an invalid one leaves the session playing with only
    /// the rejection reason surfaced.
    pub fn submit_word(
        &mut self,
        word: &str,
        validator: &WordValidator,
    ) -> Result<TurnOutcome, GameError> {
        if self.state.status != GameStatus::Playing || self.state.phase != GamePhase::Playing {
            return Err(GameError::invalid_transition(
                "submit a word",
                self.state.phase,
            ));
        }
        let Some(turn) = self.turn.as_ref() else {
            return Err(GameError::invalid_transition(
                "submit a word",
                self.state.phase,
            ));
        };

        let verdict = validator.validate(word, &turn.pool);
        let number = turn.number;
        let word = word.trim().to_ascii_lowercase();

        match verdict {
            WordVerdict::Rejected { reason } => {
                debug!(session_id = %self.state.id, %word, %reason, "word rejected");
                Ok(TurnOutcome::Rejected { word, reason })
            }
            WordVerdict::Accepted { points } => {
                self.award_points(points);
                self.commit_turn(number);
                info!(session_id = %self.state.id, %word, points, number, "word accepted");
                Ok(TurnOutcome::Accepted { word, points })
            }
        }
    }

    /// Count the countdown down by one tick. The caller issues
    /// `time_expire` exactly once when this reaches zero.
    pub fn tick(&mut self) -> Result<u32, GameError> {
        if self.state.status != GameStatus::Playing || self.state.phase != GamePhase::Playing {
            return Err(GameError::invalid_transition(
                "tick the countdown",
                self.state.phase,
            ));
        }
        let Some(turn) = self.turn.as_mut() else {
            return Err(GameError::invalid_transition(
                "tick the countdown",
                self.state.phase,
            ));
        };
        turn.ticks_remaining = turn.ticks_remaining.saturating_sub(1);
        Ok(turn.ticks_remaining)
    }

    /// The countdown ran out: commit the number with zero points awarded.
    /// Turn ownership advances exactly as a scored word does.
    pub fn time_expire(&mut self) -> Result<TurnOutcome, GameError> {
        if self.state.status != GameStatus::Playing || self.state.phase != GamePhase::Playing {
            return Err(GameError::invalid_transition(
                "expire the turn",
                self.state.phase,
            ));
        }
        let Some(turn) = self.turn.as_ref() else {
            return Err(GameError::invalid_transition(
                "expire the turn",
                self.state.phase,
            ));
        };

        let number = turn.number;
        self.commit_turn(number);
        info!(session_id = %self.state.id, number, "turn expired with no word");
        Ok(TurnOutcome::Expired { number })
    }

    /// Leave the result screen: clears per-turn state and either loops back
    /// to selecting or terminates once every number is used.
    pub fn auto_advance(&mut self) -> Result<GameStatus, GameError> {
        if self.state.status != GameStatus::Playing || self.state.phase != GamePhase::Result {
            return Err(GameError::invalid_transition("advance", self.state.phase));
        }

        self.turn = None;
        if self.state.used_numbers.len() >= BOARD_SIZE {
            self.finish_now();
        } else {
            self.state.phase = GamePhase::Selecting;
        }
        Ok(self.state.status)
    }

    /// Externally triggered early end. The session becomes immutable.
    pub fn finish(&mut self) -> Result<(), GameError> {
        if self.state.status == GameStatus::Finished {
            return Err(GameError::invalid_transition("finish", self.state.phase));
        }
        self.turn = None;
        self.finish_now();
        Ok(())
    }

    /// Click one letter tile out of the pool.
    pub fn consume_letter(&mut self, letter: char) -> Result<(), GameError> {
        self.turn_pool_mut("arrange letters")?.consume(letter)
    }

    /// Return one arranged letter to the pool.
    pub fn release_letter(&mut self, letter: char) -> Result<(), GameError> {
        self.turn_pool_mut("arrange letters")?.release(letter)
    }

    /// Clear the whole arrangement.
    pub fn clear_arrangement(&mut self) -> Result<(), GameError> {
        self.turn_pool_mut("arrange letters")?.reset();
        Ok(())
    }

    /// Highest score wins; a tie has no winner.
    pub fn winner(&self) -> Option<&Player> {
        let best = self.state.players.iter().max_by_key(|p| p.score)?;
        let tied = self
            .state
            .players
            .iter()
            .filter(|p| p.score == best.score)
            .count();
        (tied == 1).then_some(best)
    }

    fn turn_pool_mut(&mut self, action: &str) -> Result<&mut LetterPool, GameError> {
        if self.state.status != GameStatus::Playing || self.state.phase != GamePhase::Playing {
            return Err(GameError::invalid_transition(action, self.state.phase));
        }
        match self.turn.as_mut() {
            Some(turn) => Ok(&mut turn.pool),
            None => Err(GameError::invalid_transition(action, self.state.phase)),
        }
    }

    fn award_points(&mut self, points: u32) {
        match self.state.mode {
            GameMode::Competitive => {
                if let Some(index) = self.state.active_player_index {
                    self.state.players[index].score += points;
                }
            }
            GameMode::Cooperative => {
                let share = ScoringEngine::cooperative_share(points);
                for player in &mut self.state.players {
                    player.score += share;
                }
            }
        }
    }

    fn commit_turn(&mut self, number: u8) {
        self.state.used_numbers.insert(number);
        if let Some(index) = self.state.active_player_index.as_mut() {
            *index = (*index + 1) % self.state.players.len();
        }
        self.state.phase = GamePhase::Result;
    }

    fn finish_now(&mut self) {
        self.state.status = GameStatus::Finished;
        self.state.ended_at = Some(chrono::Utc::now().to_rfc3339());
        info!(
            session_id = %self.state.id,
            numbers_used = self.state.used_numbers.len(),
            "session finished"
        );
    }
}
