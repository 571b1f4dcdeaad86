//! Async table service around `holdem-engine`.
//!
//! A [`TableManager`] owns the live tables. Each table sits behind a
//! [`TableHandle`] that serializes commands, drives the per-turn
//! [`RoundTimer`] and mirrors engine events to tracing and the [`EventBus`].

pub mod errors;
pub mod events;
pub mod logging;
pub mod manager;
pub mod settings;
pub mod table;
pub mod timer;

pub use errors::{ErrorResponse, ErrorSeverity, IntoErrorResponse, TableError};
pub use events::{EventBus, EventSubscription, TableNotice};
pub use logging::{init_logging, init_logging_with, init_test_logging, LogEntry, LogFormat, TestLogSubscriber};
pub use manager::{
    InMemoryDirectory, JsonDirStore, MemoryTableStore, PlayerDirectory, PlayerProfile,
    TableManager, TableStore,
};
pub use settings::{ServiceSettings, SettingsError};
pub use table::{TableHandle, TableId, TableSnapshot};
pub use timer::{RoundTimer, TimerOutcome};
