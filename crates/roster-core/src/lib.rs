//! # Roster Core
//!
//! Record management with a cache that stays consistent with its store.
//!
//! Records (`name`, `score`) live in a [`RecordStore`] with soft-delete
//! semantics. A [`RecordService`] validates every write, applies it to the
//! store first and then mirrors it into a bounded FIFO cache keyed by record
//! id, so the cache never holds a value the store rejected.
//!
//! ## Features
//!
//! - **Bounded FIFO cache**: fixed capacity, insertion-order eviction, hit/miss
//!   statistics
//! - **Soft delete**: deleted records stay stored but vanish from queries
//! - **SQLite or in-memory storage**
//! - **Layered configuration**: defaults, `roster.toml`, `ROSTER_*` environment
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roster_core::{RecordDraft, Roster, RosterConfig};
//!
//! let roster = Roster::open(&RosterConfig::load()?)?;
//! let service = roster.service();
//!
//! let ana = service.create(&RecordDraft::new("Ana", 5.0))?;
//! let ana = service.update(ana.id, &RecordDraft::new("Ana", 6.0))?;
//! service.delete(ana.id)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// =============================================================================
// STYLISTIC LINTS - Safe to allow globally (no bug risk)
// =============================================================================
#![allow(clippy::option_if_let_else)]
#![allow(clippy::significant_drop_tightening)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_errors_doc)]

pub mod cache;
pub mod config;
pub mod error;
pub mod record;
pub mod service;
pub mod store;
pub mod validator;

pub use cache::{BoundedCache, CacheMiss, CacheStats};
pub use config::{CacheConfig, ConfigError, DatabaseConfig, LoggingConfig, RosterConfig};
pub use error::{Error, Result};
pub use record::{Record, RecordDraft, RecordId};
pub use service::RecordService;
pub use store::{MemoryStore, RecordStore, SqliteStore, StoreError, StoreResult};
pub use validator::Validator;

use std::sync::Arc;

/// Wired-up application: configuration, store and service.
#[derive(Debug)]
pub struct Roster {
    config: RosterConfig,
    service: RecordService,
}

impl Roster {
    /// Opens the SQLite store described by `config` and wires the service.
    ///
    /// Uses an in-memory database when `database.in_memory` is set, otherwise
    /// the file at `database.path` (created with its parent directories if
    /// missing).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid configuration and
    /// [`Error::Store`] if the database cannot be opened or seeded.
    pub fn open(config: &RosterConfig) -> Result<Self> {
        config.validate()?;

        let store = if config.database.in_memory {
            SqliteStore::in_memory()?
        } else {
            SqliteStore::open(&config.database.path)?
        };

        Self::with_store(Arc::new(store), config)
    }

    /// Wires the service over an existing store.
    ///
    /// Seeds demo records first when `database.init_data` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid configuration and
    /// [`Error::Store`] if seeding fails.
    pub fn with_store(store: Arc<dyn RecordStore>, config: &RosterConfig) -> Result<Self> {
        config.validate()?;

        let cache = BoundedCache::new(config.cache.size);
        let service = RecordService::new(store, cache).with_read_through(config.cache.read_through);

        if config.database.init_data {
            service.reseed()?;
        }

        tracing::info!(
            cache_size = config.cache.size,
            read_through = config.cache.read_through,
            in_memory = config.database.in_memory,
            "Roster initialized"
        );

        Ok(Self {
            config: config.clone(),
            service,
        })
    }

    /// The record service.
    #[must_use]
    pub fn service(&self) -> &RecordService {
        &self.service
    }

    /// The configuration this instance was built from.
    #[must_use]
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }
}
