use uuid::Uuid;

use game_types::{GameMode, Player, RejectReason};

#[derive(Debug, Clone)]
pub enum SessionEvent {
    SessionCreated {
        session_id: Uuid,
        players: Vec<Player>,
        mode: GameMode,
    },
    PuzzleSelected {
        session_id: Uuid,
        number: u8,
        letters: Vec<char>,
    },
    WordAccepted {
        session_id: Uuid,
        word: String,
        points: u32,
    },
    WordRejected {
        session_id: Uuid,
        word: String,
        reason: RejectReason,
    },
    TurnExpired {
        session_id: Uuid,
        number: u8,
    },
    SessionFinished {
        session_id: Uuid,
        final_scores: Vec<Player>,
    },
}

impl SessionEvent {
    pub fn session_id(&self) -> Uuid {
        match self {
            SessionEvent::SessionCreated { session_id, .. } => *session_id,
            SessionEvent::PuzzleSelected { session_id, .. } => *session_id,
            SessionEvent::WordAccepted { session_id, .. } => *session_id,
            SessionEvent::WordRejected { session_id, .. } => *session_id,
            SessionEvent::TurnExpired { session_id, .. } => *session_id,
            SessionEvent::SessionFinished { session_id, .. } => *session_id,
        }
    }
}

/// Event handler trait for processing session events
pub trait SessionEventHandler: Send {
    fn handle_event(&mut self, event: SessionEvent);
}

/// Simple event bus for distributing session events
pub struct SessionEventBus {
    handlers: Vec<Box<dyn SessionEventHandler>>,
}

impl SessionEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn SessionEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: SessionEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for SessionEventBus {
    fn default() -> Self {
        Self::new()
    }
}
