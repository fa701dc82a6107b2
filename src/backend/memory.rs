//! Process-local backend.

use super::Backend;
use crate::error::{Result, StoreError};
use crate::filter::Filter;
use crate::types::{Person, RecordId, StoreMode};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Backend keeping persons in a map guarded by one lock.
///
/// Ordered by id, so listing is deterministic for fixed content.
#[derive(Default)]
pub struct InMemoryBackend {
    people: RwLock<BTreeMap<RecordId, Person>>,
}

impl InMemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for InMemoryBackend {
    fn mode(&self) -> StoreMode {
        StoreMode::InMemory
    }

    fn insert(&self, person: Person) -> Result<RecordId> {
        let mut people = self.people.write();
        let mut id = RecordId::generate();
        while people.contains_key(&id) {
            id = RecordId::generate();
        }
        people.insert(id, person.with_id(id));
        Ok(id)
    }

    fn get(&self, id: RecordId) -> Result<Person> {
        self.people
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn list(&self, filter: &Filter) -> Result<Vec<Person>> {
        Ok(self
            .people
            .read()
            .values()
            .filter(|person| filter.matches(person))
            .cloned()
            .collect())
    }

    fn replace(&self, id: RecordId, person: Person) -> Result<()> {
        let mut people = self.people.write();
        let slot = people.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *slot = person.with_id(id);
        Ok(())
    }

    fn delete(&self, id: RecordId) -> Result<()> {
        self.people
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    fn count(&self) -> Result<u64> {
        Ok(self.people.read().len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_id() {
        let backend = InMemoryBackend::new();
        let id = backend.insert(Person::new("Ann", "Lee")).unwrap();

        let stored = backend.get(id).unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.firstname, "Ann");
    }

    #[test]
    fn test_insert_ignores_caller_id() {
        let backend = InMemoryBackend::new();
        let foreign = RecordId::from_bytes([7; 12]);
        let mut person = Person::new("Ann", "Lee");
        person.id = Some(foreign);

        let id = backend.insert(person).unwrap();
        assert_ne!(id, foreign);
        assert!(matches!(backend.get(foreign), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_get_returns_detached_copy() {
        let backend = InMemoryBackend::new();
        let id = backend.insert(Person::new("Ann", "Lee")).unwrap();

        let mut copy = backend.get(id).unwrap();
        copy.firstname = "Changed".into();

        assert_eq!(backend.get(id).unwrap().firstname, "Ann");
    }

    #[test]
    fn test_replace_keeps_id() {
        let backend = InMemoryBackend::new();
        let id = backend.insert(Person::new("Ann", "Lee")).unwrap();

        let mut replacement = Person::new("Bo", "Ray");
        replacement.id = Some(RecordId::from_bytes([1; 12]));
        backend.replace(id, replacement).unwrap();

        let stored = backend.get(id).unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.firstname, "Bo");
        assert_eq!(backend.count().unwrap(), 1);
    }

    #[test]
    fn test_missing_records() {
        let backend = InMemoryBackend::new();
        let id = RecordId::generate();

        assert!(matches!(backend.get(id), Err(StoreError::NotFound(_))));
        assert!(matches!(
            backend.replace(id, Person::default()),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(backend.delete(id), Err(StoreError::NotFound(_))));
        assert_eq!(backend.count().unwrap(), 0);
    }
}
