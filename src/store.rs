//! Main Store struct selecting and fronting one backend.

use crate::backend::{Backend, InMemoryBackend};
use crate::error::Result;
use crate::filter::Filter;
use crate::seed::Seeder;
use crate::types::{Person, RecordId, StoreMode};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Store configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Persistent backend connection string. `None` selects in-memory mode.
    pub uri: Option<String>,

    /// Database holding the person collection.
    pub database: String,

    /// Collection holding persons.
    pub collection: String,

    /// Number of synthetic persons written into an empty store on open.
    pub seed_count: usize,

    /// Fixed seed for synthetic data. Drawn from OS entropy when unset.
    pub seed: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: Some("mongodb://localhost:27017/?serverSelectionTimeoutMS=2000".to_string()),
            database: "hr".to_string(),
            collection: "people".to_string(),
            seed_count: 100,
            seed: None,
        }
    }
}

impl StoreConfig {
    /// Default configuration without a persistent backend.
    pub fn in_memory() -> Self {
        Self {
            uri: None,
            ..Default::default()
        }
    }
}

/// The person store.
///
/// Holds one backend for its whole lifetime; callers never see which.
pub struct Store {
    backend: Box<dyn Backend>,
}

impl Store {
    /// Select a backend, then seed it if it is empty.
    ///
    /// An unreachable persistent backend is not an error: the store falls
    /// back to in-memory mode for the rest of its life.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let store = Self::with_backend(Self::select_backend(&config));
        info!(mode = %store.mode(), "person store opened");

        if config.seed_count > 0 {
            let seeder = match config.seed {
                Some(seed) => Seeder::new(config.seed_count).with_seed(seed),
                None => Seeder::new(config.seed_count),
            };
            seeder.seed_if_empty(&store)?;
        }

        Ok(store)
    }

    /// Empty in-memory store, without seeding.
    pub fn in_memory() -> Self {
        Self::with_backend(Box::new(InMemoryBackend::new()))
    }

    /// Wrap an already constructed backend.
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    #[cfg(feature = "mongodb")]
    fn select_backend(config: &StoreConfig) -> Box<dyn Backend> {
        use crate::backend::MongoBackend;

        let Some(uri) = config.uri.as_deref() else {
            return Box::new(InMemoryBackend::new());
        };

        match MongoBackend::connect(uri, &config.database, &config.collection) {
            Ok(backend) => Box::new(backend),
            Err(e) => {
                warn!(error = %e, "no persistent backend available, using in-memory storage");
                Box::new(InMemoryBackend::new())
            }
        }
    }

    #[cfg(not(feature = "mongodb"))]
    fn select_backend(config: &StoreConfig) -> Box<dyn Backend> {
        if config.uri.is_some() {
            let e = crate::error::StoreError::BackendUnavailable(
                "built without the mongodb feature".into(),
            );
            warn!(error = %e, "no persistent backend available, using in-memory storage");
        }
        Box::new(InMemoryBackend::new())
    }

    /// Which backend is active.
    pub fn mode(&self) -> StoreMode {
        self.backend.mode()
    }

    // --- Record Operations ---

    /// Store a new person and return its id.
    pub fn create(&self, person: Person) -> Result<RecordId> {
        let id = self.backend.insert(person)?;
        debug!(%id, "person created");
        Ok(id)
    }

    /// Fetch a person by id text.
    pub fn get(&self, id: &str) -> Result<Person> {
        self.backend.get(RecordId::parse(id)?)
    }

    /// All persons matching `filter`. Order is unspecified.
    pub fn list(&self, filter: &Filter) -> Result<Vec<Person>> {
        self.backend.list(filter)
    }

    /// Replace an existing person. The id is kept.
    pub fn update(&self, id: &str, person: Person) -> Result<()> {
        let id = RecordId::parse(id)?;
        self.backend.replace(id, person)?;
        debug!(%id, "person updated");
        Ok(())
    }

    /// Remove a person.
    pub fn delete(&self, id: &str) -> Result<()> {
        let id = RecordId::parse(id)?;
        self.backend.delete(id)?;
        debug!(%id, "person deleted");
        Ok(())
    }

    /// Number of stored persons.
    pub fn count(&self) -> Result<u64> {
        self.backend.count()
    }

    /// Whether the store holds no persons.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.count()? == 0)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("mode", &self.mode()).finish()
    }
}
