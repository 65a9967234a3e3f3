use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use game_core::{
    Dictionary, PuzzleSelector, PuzzleSource, Session, SessionEvent, SessionEventBus,
    SessionEventHandler, TurnOutcome, WordValidator,
};
use game_store::SessionStore;
use game_types::{GameError, GameMode, GamePhase, GameStatus, Player, SessionState};

use crate::Config;

struct ActiveSession {
    session: Session,
    last_activity: Instant,
    /// Bumped on every puzzle selection; a countdown task stops as soon as
    /// the serial it was spawned for is no longer current.
    turn_serial: u64,
}

impl ActiveSession {
    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    fn is_idle(&self, timeout: Duration) -> bool {
        self.last_activity.elapsed() > timeout
    }
}

/// Owns the live sessions and drives their timers. Each transition takes
/// the session's write guard for its whole read-validate-write, so exactly
/// one transition is in flight per session at a time. The dictionary and
/// puzzle bank are read-only and shared across all sessions.
pub struct SessionManager {
    active_sessions: RwLock<HashMap<Uuid, ActiveSession>>,
    validator: WordValidator,
    selector: PuzzleSelector,
    store: Arc<dyn SessionStore>,
    event_bus: Mutex<SessionEventBus>,
    config: Config,
}

impl SessionManager {
    pub fn new(
        dictionary: Arc<dyn Dictionary>,
        puzzles: Arc<dyn PuzzleSource>,
        store: Arc<dyn SessionStore>,
        config: Config,
    ) -> Self {
        Self {
            active_sessions: RwLock::new(HashMap::new()),
            validator: WordValidator::new(dictionary),
            selector: PuzzleSelector::new(puzzles),
            store,
            event_bus: Mutex::new(SessionEventBus::new()),
            config,
        }
    }

    pub fn add_event_handler(&self, handler: Box<dyn SessionEventHandler>) {
        let mut bus = self.event_bus.lock().unwrap_or_else(|e| e.into_inner());
        bus.add_handler(handler);
    }

    fn publish(&self, event: SessionEvent) {
        // A panicking handler poisons the lock; recover it so later events
        // still reach the remaining handlers.
        let mut bus = self.event_bus.lock().unwrap_or_else(|e| e.into_inner());
        bus.publish(event);
    }

    pub async fn create_session(
        &self,
        players: [Player; 2],
        mode: GameMode,
    ) -> Result<SessionState, GameError> {
        let session = Session::new(Uuid::new_v4(), players, mode);
        let state = self.store.create(session.state.clone()).await?;
        let id = state.id;

        {
            let mut sessions = self.active_sessions.write().await;
            sessions.insert(
                id,
                ActiveSession {
                    session,
                    last_activity: Instant::now(),
                    turn_serial: 0,
                },
            );
        }

        info!(session_id = %id, ?mode, "session created");
        self.publish(SessionEvent::SessionCreated {
            session_id: id,
            players: state.players.clone(),
            mode,
        });
        Ok(state)
    }

    pub async fn start_session(&self, id: Uuid) -> Result<SessionState, GameError> {
        let mut sessions = self.active_sessions.write().await;
        let active = sessions
            .get_mut(&id)
            .ok_or(GameError::SessionNotFound { id })?;

        let snapshot = active.session.clone();
        active.session.start()?;
        match self.store.update(id, active.session.state.clone()).await {
            Ok(state) => {
                active.touch();
                Ok(state)
            }
            Err(err) => {
                active.session = snapshot;
                Err(err)
            }
        }
    }

    /// Pick a numbered puzzle and start its countdown. Returns the
    /// scrambled letters for display.
    pub async fn select_number(
        self: &Arc<Self>,
        id: Uuid,
        number: u8,
    ) -> Result<Vec<char>, GameError> {
        let (letters, serial) = {
            let mut sessions = self.active_sessions.write().await;
            let active = sessions
                .get_mut(&id)
                .ok_or(GameError::SessionNotFound { id })?;

            let snapshot = active.session.clone();
            let letters = active
                .session
                .select_number(number, &self.selector)?
                .letters
                .clone();
            match self.store.update(id, active.session.state.clone()).await {
                Ok(_) => {
                    active.turn_serial += 1;
                    active.touch();
                    (letters, active.turn_serial)
                }
                Err(err) => {
                    active.session = snapshot;
                    return Err(err);
                }
            }
        };

        self.publish(SessionEvent::PuzzleSelected {
            session_id: id,
            number,
            letters: letters.clone(),
        });
        self.spawn_countdown(id, serial);
        Ok(letters)
    }

    /// Submit a word for the current turn. Rejections leave the session
    /// playing and are not persisted; accepted words are committed to the
    /// store before the result screen's auto-advance is scheduled.
    pub async fn submit_word(
        self: &Arc<Self>,
        id: Uuid,
        word: &str,
    ) -> Result<TurnOutcome, GameError> {
        let outcome = {
            let mut sessions = self.active_sessions.write().await;
            let active = sessions
                .get_mut(&id)
                .ok_or(GameError::SessionNotFound { id })?;

            let snapshot = active.session.clone();
            let outcome = active.session.submit_word(word, &self.validator)?;
            if matches!(outcome, TurnOutcome::Accepted { .. }) {
                if let Err(err) = self.store.update(id, active.session.state.clone()).await {
                    active.session = snapshot;
                    return Err(err);
                }
            }
            active.touch();
            outcome
        };

        match &outcome {
            TurnOutcome::Accepted { word, points } => {
                self.publish(SessionEvent::WordAccepted {
                    session_id: id,
                    word: word.clone(),
                    points: *points,
                });
                self.spawn_auto_advance(id);
            }
            TurnOutcome::Rejected { word, reason } => {
                self.publish(SessionEvent::WordRejected {
                    session_id: id,
                    word: word.clone(),
                    reason: *reason,
                });
            }
            TurnOutcome::Expired { .. } => {}
        }
        Ok(outcome)
    }

    /// Leave the result screen. Called by the auto-advance timer; exposed
    /// for callers that drive sessions manually.
    pub async fn advance(&self, id: Uuid) -> Result<GameStatus, GameError> {
        let (status, final_scores) = {
            let mut sessions = self.active_sessions.write().await;
            let active = sessions
                .get_mut(&id)
                .ok_or(GameError::SessionNotFound { id })?;

            let snapshot = active.session.clone();
            let status = active.session.auto_advance()?;
            let persisted = if status == GameStatus::Finished {
                self.store
                    .mark_finished(id, active.session.state.clone())
                    .await
            } else {
                self.store.update(id, active.session.state.clone()).await
            };
            if let Err(err) = persisted {
                active.session = snapshot;
                return Err(err);
            }
            active.touch();
            let final_scores =
                (status == GameStatus::Finished).then(|| active.session.state.players.clone());
            (status, final_scores)
        };

        if let Some(final_scores) = final_scores {
            self.publish(SessionEvent::SessionFinished {
                session_id: id,
                final_scores,
            });
        }
        Ok(status)
    }

    /// Externally triggered early end.
    pub async fn end_session(&self, id: Uuid) -> Result<SessionState, GameError> {
        let state = {
            let mut sessions = self.active_sessions.write().await;
            let active = sessions
                .get_mut(&id)
                .ok_or(GameError::SessionNotFound { id })?;

            let snapshot = active.session.clone();
            active.session.finish()?;
            match self
                .store
                .mark_finished(id, active.session.state.clone())
                .await
            {
                Ok(state) => {
                    active.touch();
                    state
                }
                Err(err) => {
                    active.session = snapshot;
                    return Err(err);
                }
            }
        };

        self.publish(SessionEvent::SessionFinished {
            session_id: id,
            final_scores: state.players.clone(),
        });
        Ok(state)
    }

    pub async fn get_session_state(&self, id: Uuid) -> Result<Option<SessionState>, GameError> {
        {
            let sessions = self.active_sessions.read().await;
            if let Some(active) = sessions.get(&id) {
                return Ok(Some(active.session.state.clone()));
            }
        }
        self.store.find_by_id(id).await
    }

    pub async fn remaining_ticks(&self, id: Uuid) -> Option<u32> {
        let sessions = self.active_sessions.read().await;
        sessions
            .get(&id)
            .and_then(|active| active.session.active_turn())
            .map(|turn| turn.ticks_remaining)
    }

    pub async fn active_session_count(&self) -> usize {
        self.active_sessions.read().await.len()
    }

    /// Drop sessions with no activity inside the idle timeout. The store
    /// keeps their last persisted record.
    pub async fn cleanup_idle_sessions(&self) {
        let timeout = Duration::from_secs(self.config.session_idle_timeout_seconds);
        let mut sessions = self.active_sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, active| !active.is_idle(timeout));
        let dropped = before - sessions.len();
        if dropped > 0 {
            info!(dropped, "idle sessions dropped");
        }
    }

    /// Per-turn countdown: one cooperative tick per interval, cancellable
    /// at every tick boundary, and exactly one expiry when it reaches zero.
    fn spawn_countdown(self: &Arc<Self>, id: Uuid, serial: u64) {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_millis(manager.config.tick_interval_ms));
            interval.tick().await; // the first tick completes immediately
            loop {
                interval.tick().await;
                let mut sessions = manager.active_sessions.write().await;
                let Some(active) = sessions.get_mut(&id) else {
                    return;
                };
                if active.turn_serial != serial || active.session.state.phase != GamePhase::Playing
                {
                    return; // the turn resolved some other way
                }

                match active.session.tick() {
                    Ok(ticks_remaining) if ticks_remaining > 0 => {}
                    Ok(_) => {
                        let snapshot = active.session.clone();
                        let number = match active.session.time_expire() {
                            Ok(TurnOutcome::Expired { number }) => number,
                            _ => return,
                        };
                        match manager.store.update(id, active.session.state.clone()).await {
                            Ok(_) => {
                                active.touch();
                                drop(sessions);
                                manager.publish(SessionEvent::TurnExpired {
                                    session_id: id,
                                    number,
                                });
                                manager.spawn_auto_advance(id);
                                return;
                            }
                            Err(err) => {
                                // Roll back and keep ticking: the turn stays
                                // at zero, so the expiry is retried on every
                                // tick until the store takes it.
                                active.session = snapshot;
                                warn!(
                                    session_id = %id, %err,
                                    "failed to persist turn expiry, retrying"
                                );
                            }
                        }
                    }
                    Err(_) => return,
                }
            }
        });
    }

    /// Timed, non-cancellable move off the result screen.
    fn spawn_auto_advance(self: &Arc<Self>, id: Uuid) {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(manager.config.result_delay_seconds)).await;
            if let Err(err) = manager.advance(id).await {
                warn!(session_id = %id, %err, "auto-advance failed");
            }
        });
    }
}
