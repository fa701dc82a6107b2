//! # Person Store
//!
//! A record store for persons that behaves the same whether it runs on
//! MongoDB or, when no server is reachable, on an in-process map.
//!
//! ## Core Concepts
//!
//! - **Records**: `Person` values keyed by an opaque 12-byte `RecordId`
//! - **Backends**: one `Backend` chosen when the store opens, never switched
//! - **Filters**: named multi-valued criteria compiled into set-membership tests
//! - **Seeding**: empty stores are filled with synthetic persons on open
//!
//! ## Example
//!
//! ```ignore
//! use person_store::{compile, group_query_pairs, Person, Store, StoreConfig};
//!
//! let store = Store::open(StoreConfig::default())?;
//!
//! let id = store.create(Person::new("Ann", "Lee").with_location("Paris", "France"))?;
//! let ann = store.get(&id.to_string())?;
//!
//! // GET /person?city=Paris,Rome
//! let filter = compile(&group_query_pairs([("city", "Paris,Rome")]));
//! let people = store.list(&filter)?;
//! ```

pub mod backend;
pub mod error;
pub mod filter;
pub mod seed;
pub mod store;
pub mod types;

// Re-exports
pub use backend::{Backend, InMemoryBackend};
#[cfg(feature = "mongodb")]
pub use backend::MongoBackend;
pub use error::{Result, StoreError};
pub use filter::{
    compile, compile_fields, group_query_pairs, Filter, FilterField, PERSON_FILTER_FIELDS,
};
pub use seed::{generate_people, Seeder, DEFAULT_SEED_COUNT};
pub use store::{Store, StoreConfig};
pub use types::*;
