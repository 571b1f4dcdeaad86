use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use holdem_engine::config::GameParameters;
use holdem_engine::record::TableRecord;
use holdem_engine::table::Table;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TableError;
use crate::events::{EventBus, EventSubscription};
use crate::settings::ServiceSettings;
use crate::table::{TableHandle, TableId};

/// What the directory knows about a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub balance: u64,
}

/// Resolves player names to profiles when seating.
pub trait PlayerDirectory: Send + Sync {
    fn profile(&self, name: &str) -> Option<PlayerProfile>;
}

#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    profiles: RwLock<HashMap<String, PlayerProfile>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, name: &str, balance: u64) -> Result<(), TableError> {
        let mut guard = self
            .profiles
            .write()
            .map_err(|_| TableError::StoragePoisoned)?;
        guard.insert(
            name.to_string(),
            PlayerProfile {
                name: name.to_string(),
                balance,
            },
        );
        Ok(())
    }
}

impl PlayerDirectory for InMemoryDirectory {
    fn profile(&self, name: &str) -> Option<PlayerProfile> {
        self.profiles.read().ok()?.get(name).cloned()
    }
}

/// Persistence for [`TableRecord`]s.
pub trait TableStore: Send + Sync {
    fn save(&self, record: &TableRecord) -> Result<(), TableError>;
    fn load(&self, id: &str) -> Result<Option<TableRecord>, TableError>;
    /// Returns whether a record was removed.
    fn remove(&self, id: &str) -> Result<bool, TableError>;
    fn ids(&self) -> Result<Vec<TableId>, TableError>;
}

/// Keeps records as JSON text in memory.
#[derive(Debug, Default)]
pub struct MemoryTableStore {
    records: RwLock<HashMap<TableId, String>>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableStore for MemoryTableStore {
    fn save(&self, record: &TableRecord) -> Result<(), TableError> {
        let json = serde_json::to_string(record).map_err(|e| TableError::Store(e.to_string()))?;
        let mut guard = self
            .records
            .write()
            .map_err(|_| TableError::StoragePoisoned)?;
        guard.insert(record.id.clone(), json);
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<TableRecord>, TableError> {
        let guard = self
            .records
            .read()
            .map_err(|_| TableError::StoragePoisoned)?;
        guard
            .get(id)
            .map(|json| serde_json::from_str(json).map_err(|e| TableError::Store(e.to_string())))
            .transpose()
    }

    fn remove(&self, id: &str) -> Result<bool, TableError> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| TableError::StoragePoisoned)?;
        Ok(guard.remove(id).is_some())
    }

    fn ids(&self) -> Result<Vec<TableId>, TableError> {
        let guard = self
            .records
            .read()
            .map_err(|_| TableError::StoragePoisoned)?;
        let mut ids: Vec<TableId> = guard.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

/// One pretty-printed `<id>.json` file per table under a directory.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, TableError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| TableError::Store(e.to_string()))?;
        Ok(Self { dir })
    }

    fn path(&self, id: &str) -> Result<PathBuf, TableError> {
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(TableError::Store(format!("invalid table id: {id}")));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }
}

impl TableStore for JsonDirStore {
    fn save(&self, record: &TableRecord) -> Result<(), TableError> {
        let path = self.path(&record.id)?;
        let json =
            serde_json::to_string_pretty(record).map_err(|e| TableError::Store(e.to_string()))?;
        fs::write(path, json).map_err(|e| TableError::Store(e.to_string()))
    }

    fn load(&self, id: &str) -> Result<Option<TableRecord>, TableError> {
        let path = self.path(id)?;
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path).map_err(|e| TableError::Store(e.to_string()))?;
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| TableError::Store(e.to_string()))
    }

    fn remove(&self, id: &str) -> Result<bool, TableError> {
        let path = self.path(id)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path).map_err(|e| TableError::Store(e.to_string()))?;
        Ok(true)
    }

    fn ids(&self) -> Result<Vec<TableId>, TableError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| TableError::Store(e.to_string()))?;
        let mut ids = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| TableError::Store(e.to_string()))?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Owns every live table, keyed by id.
pub struct TableManager {
    tables: RwLock<HashMap<TableId, TableHandle>>,
    bus: EventBus,
    settings: ServiceSettings,
    directory: Arc<dyn PlayerDirectory>,
    store: Arc<dyn TableStore>,
}

impl TableManager {
    pub fn new(
        settings: ServiceSettings,
        directory: Arc<dyn PlayerDirectory>,
        store: Arc<dyn TableStore>,
    ) -> Result<Self, TableError> {
        settings.validate()?;
        Ok(Self {
            tables: RwLock::new(HashMap::new()),
            bus: EventBus::with_buffer(settings.event_buffer),
            settings,
            directory,
            store,
        })
    }

    /// In-memory directory and store with default settings.
    pub fn in_memory(directory: Arc<dyn PlayerDirectory>) -> Result<Self, TableError> {
        Self::new(
            ServiceSettings::default(),
            directory,
            Arc::new(MemoryTableStore::new()),
        )
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Opens a table; `None` uses the default parameters from settings.
    pub fn create_table(&self, params: Option<GameParameters>) -> Result<TableHandle, TableError> {
        let params = params.unwrap_or_else(|| self.settings.default_parameters.clone());
        let table = Table::new(params)?;
        self.insert(Uuid::new_v4().to_string(), table)
    }

    /// Opens a table whose shuffles replay from `seed`.
    pub fn create_seeded_table(
        &self,
        params: Option<GameParameters>,
        seed: u64,
    ) -> Result<TableHandle, TableError> {
        let params = params.unwrap_or_else(|| self.settings.default_parameters.clone());
        let table = Table::with_seed(params, seed)?;
        self.insert(Uuid::new_v4().to_string(), table)
    }

    pub fn get(&self, id: &str) -> Result<TableHandle, TableError> {
        let guard = self
            .tables
            .read()
            .map_err(|_| TableError::StoragePoisoned)?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| TableError::NotFound(id.to_string()))
    }

    pub fn table_ids(&self) -> Result<Vec<TableId>, TableError> {
        let guard = self
            .tables
            .read()
            .map_err(|_| TableError::StoragePoisoned)?;
        let mut ids: Vec<TableId> = guard.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    pub fn subscribe(&self, id: &str) -> Result<EventSubscription, TableError> {
        self.get(id)?;
        Ok(self.bus.subscribe(id))
    }

    /// Seats a registered player with the table's starting tokens.
    ///
    /// # Errors
    ///
    /// - [`TableError::UnknownAccount`] when the directory does not know `name`
    /// - [`TableError::InsufficientBalance`] when the balance is below the buy-in
    pub fn seat_player(&self, id: &str, name: &str) -> Result<(), TableError> {
        let handle = self.get(id)?;
        let profile = self
            .directory
            .profile(name)
            .ok_or_else(|| TableError::UnknownAccount(name.to_string()))?;
        let params = handle.params()?;
        let (buy_in, tokens) = (params.buy_in, params.tokens);
        if profile.balance < u64::from(buy_in) {
            return Err(TableError::InsufficientBalance {
                name: name.to_string(),
                buy_in,
            });
        }
        handle.seat(name, tokens)?;
        tracing::info!(table_id = %id, player = %name, tokens, "player seated");
        Ok(())
    }

    pub fn save(&self, id: &str) -> Result<TableRecord, TableError> {
        let record = self.get(id)?.record()?;
        self.store.save(&record)?;
        tracing::debug!(table_id = %id, hand = record.hand_number, "table saved");
        Ok(record)
    }

    /// Restores a table from the store, replacing any live table with the
    /// same id. A hand that was running when the record was taken comes back
    /// cancelled with every committed chip refunded.
    pub fn load(&self, id: &str) -> Result<TableHandle, TableError> {
        let record = self
            .store
            .load(id)?
            .ok_or_else(|| TableError::NotFound(id.to_string()))?;
        let was_in_hand = record.in_hand;
        let table = Table::from_record(record)?;
        let handle = self.insert(id.to_string(), table)?;
        tracing::info!(table_id = %id, was_in_hand, "table loaded");
        Ok(handle)
    }

    /// Drops the live table, its subscribers and any stored record.
    pub fn remove(&self, id: &str) -> Result<(), TableError> {
        let removed = {
            let mut guard = self
                .tables
                .write()
                .map_err(|_| TableError::StoragePoisoned)?;
            guard.remove(id)
        };
        let stored = self.store.remove(id)?;
        if removed.is_none() && !stored {
            return Err(TableError::NotFound(id.to_string()));
        }
        self.bus.drop_table(id);
        tracing::info!(table_id = %id, "table removed");
        Ok(())
    }

    fn insert(&self, id: TableId, table: Table) -> Result<TableHandle, TableError> {
        let handle = TableHandle::new(
            id.clone(),
            table,
            self.bus.clone(),
            self.settings.timer_tick(),
        );
        let mut guard = self
            .tables
            .write()
            .map_err(|_| TableError::StoragePoisoned)?;
        guard.insert(id.clone(), handle.clone());
        tracing::info!(table_id = %id, "table opened");
        Ok(handle)
    }
}
