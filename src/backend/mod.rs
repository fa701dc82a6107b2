//! Storage backends behind the person store.
//!
//! A [`Store`](crate::Store) holds exactly one backend, chosen when it is
//! built. Backends work on parsed ids; id text is parsed by the store.

pub mod memory;
#[cfg(feature = "mongodb")]
pub mod mongo;

use crate::error::Result;
use crate::filter::Filter;
use crate::types::{Person, RecordId, StoreMode};

pub use memory::InMemoryBackend;
#[cfg(feature = "mongodb")]
pub use mongo::MongoBackend;

/// Storage engine for person records.
pub trait Backend: Send + Sync {
    /// Which mode this backend represents.
    fn mode(&self) -> StoreMode;

    /// Insert a new person and return its assigned id. Any id on `person` is ignored.
    fn insert(&self, person: Person) -> Result<RecordId>;

    /// Fetch a copy of one person.
    fn get(&self, id: RecordId) -> Result<Person>;

    /// All persons matching `filter`.
    fn list(&self, filter: &Filter) -> Result<Vec<Person>>;

    /// Replace every non-id field of an existing person.
    fn replace(&self, id: RecordId, person: Person) -> Result<()>;

    /// Remove a person.
    fn delete(&self, id: RecordId) -> Result<()>;

    /// Number of stored persons.
    fn count(&self) -> Result<u64>;
}
