use thiserror::Error;

/// Every failure a table operation can report.
///
/// A rejected operation never mutates the table: callers may retry or issue a
/// different command on the same table afterwards.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Table is full ({capacity} seats)")]
    TableFull { capacity: usize },
    #[error("Player {0} is already seated")]
    AlreadyInGame(String),
    #[error("Player {0} is not seated at this table")]
    UnknownPlayer(String),
    #[error("Player {0} cannot mark ready while a hand is running")]
    CannotMarkReady(String),
    #[error("Table is not ready to start")]
    NotReady,
    #[error("Hand already started")]
    AlreadyStarted,
    #[error("No hand has been started")]
    GameNotStarted,
    #[error("Hand is not finished")]
    GameNotFinished,
    #[error("Deck is empty")]
    EmptyDeck,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("A hand is in progress")]
    HandInProgress,
    #[error("It's not {actual}'s turn (expected {expected})")]
    NotPlayersTurn { expected: String, actual: String },
    #[error("Cannot check facing a bet of {to_call}")]
    CannotCheck { to_call: u32 },
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("Turn {0} is no longer active")]
    StaleTurn(u64),
    #[error("Invalid card: {0}")]
    InvalidCard(String),
    #[error("Invalid hand: {0}")]
    InvalidHand(String),
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Invalid table record: {0}")]
    InvalidRecord(String),
}

impl GameError {
    /// Machine-readable code reported to transport collaborators.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::TableFull { .. } => "table_full",
            GameError::AlreadyInGame(_) => "player_in_game",
            GameError::UnknownPlayer(_) => "player_not_exist",
            GameError::CannotMarkReady(_) => "cannot_mark_ready",
            GameError::NotReady => "game_not_ready_to_start",
            GameError::AlreadyStarted => "game_already_started",
            GameError::GameNotStarted => "game_not_started",
            GameError::GameNotFinished => "game_not_finish",
            GameError::EmptyDeck => "empty_deck",
            GameError::NoHandInProgress => "no_hand_in_progress",
            GameError::HandInProgress => "hand_in_progress",
            GameError::NotPlayersTurn { .. } => "not_players_turn",
            GameError::CannotCheck { .. } => "cannot_check",
            GameError::InvalidBetAmount { .. } => "invalid_bet_amount",
            GameError::StaleTurn(_) => "stale_turn",
            GameError::InvalidCard(_) => "invalid_card",
            GameError::InvalidHand(_) => "invalid_hand",
            GameError::InvalidParameters(_) => "invalid_parameters",
            GameError::InvalidRecord(_) => "invalid_record",
        }
    }

    /// Precondition errors describe a request made in the wrong state.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            GameError::NotReady
                | GameError::AlreadyStarted
                | GameError::GameNotStarted
                | GameError::GameNotFinished
                | GameError::NoHandInProgress
                | GameError::HandInProgress
                | GameError::CannotMarkReady(_)
                | GameError::NotPlayersTurn { .. }
                | GameError::StaleTurn(_)
        )
    }
}
