//! MongoDB backend.
//!
//! Uses the driver's blocking API; each operation blocks the calling thread
//! on network I/O. The client is kept open for as long as the backend lives.

use super::Backend;
use crate::error::{Result, StoreError};
use crate::filter::Filter;
use crate::types::{Location, Person, RecordId, StoreMode};
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::FindOptions;
use mongodb::sync::{Client, Collection};
use serde::{Deserialize, Serialize};

/// Stored layout of a person.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct PersonDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    firstname: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    lastname: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
}

impl PersonDocument {
    /// Layout for insert or replace. The id is left for the server to keep or assign.
    fn from_person(person: Person) -> Self {
        Self {
            id: None,
            firstname: person.firstname,
            lastname: person.lastname,
            location: person.location,
        }
    }

    fn into_person(self) -> Person {
        Person {
            id: self.id.map(record_id),
            firstname: self.firstname,
            lastname: self.lastname,
            location: self.location,
        }
    }
}

fn object_id(id: RecordId) -> ObjectId {
    ObjectId::from_bytes(id.bytes())
}

fn record_id(oid: ObjectId) -> RecordId {
    RecordId::from_bytes(oid.bytes())
}

/// Translate a filter into a query document: `{path: {"$in": [values]}}` per criterion.
fn filter_document(filter: &Filter) -> Document {
    let mut document = Document::new();
    for (path, values) in filter.criteria() {
        let values: Vec<&str> = values.iter().map(String::as_str).collect();
        document.insert(path, doc! { "$in": values });
    }
    document
}

/// Backend storing persons in a MongoDB collection.
pub struct MongoBackend {
    _client: Client,
    people: Collection<PersonDocument>,
}

impl MongoBackend {
    /// Connect and verify the server answers a ping.
    ///
    /// Fails with [`StoreError::BackendUnavailable`] if the uri is invalid
    /// or no server can be reached.
    pub fn connect(uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .map_err(|e| StoreError::BackendUnavailable(e.to_string()))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .map_err(|e| StoreError::BackendUnavailable(e.to_string()))?;

        let people = client.database(database).collection(collection);
        Ok(Self {
            _client: client,
            people,
        })
    }
}

impl Backend for MongoBackend {
    fn mode(&self) -> StoreMode {
        StoreMode::Persistent
    }

    fn insert(&self, person: Person) -> Result<RecordId> {
        let result = self
            .people
            .insert_one(PersonDocument::from_person(person), None)?;

        result
            .inserted_id
            .as_object_id()
            .map(record_id)
            .ok_or_else(|| {
                StoreError::Internal(format!(
                    "server assigned a non-ObjectId id: {}",
                    result.inserted_id
                ))
            })
    }

    fn get(&self, id: RecordId) -> Result<Person> {
        self.people
            .find_one(doc! { "_id": object_id(id) }, None)?
            .map(PersonDocument::into_person)
            .ok_or(StoreError::NotFound(id))
    }

    fn list(&self, filter: &Filter) -> Result<Vec<Person>> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let cursor = self.people.find(filter_document(filter), options)?;

        let mut people = Vec::new();
        for document in cursor {
            people.push(document?.into_person());
        }
        Ok(people)
    }

    fn replace(&self, id: RecordId, person: Person) -> Result<()> {
        let result = self.people.replace_one(
            doc! { "_id": object_id(id) },
            PersonDocument::from_person(person),
            None,
        )?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn delete(&self, id: RecordId) -> Result<()> {
        let result = self.people.delete_one(doc! { "_id": object_id(id) }, None)?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn count(&self) -> Result<u64> {
        Ok(self.people.count_documents(None, None)?)
    }
}
