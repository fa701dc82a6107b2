//! Core types for the person store.

use crate::error::{Result, StoreError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Length of a record id in bytes.
pub const RECORD_ID_LEN: usize = 12;

/// Length of the hex form of a record id.
pub const RECORD_ID_HEX_LEN: usize = RECORD_ID_LEN * 2;

/// Opaque identifier for a stored person.
///
/// Laid out like a document-database object id: a 4-byte big-endian
/// seconds timestamp, 5 bytes unique to this process and a 3-byte
/// counter. Both backends exchange ids in the same 24-character hex form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId([u8; RECORD_ID_LEN]);

impl RecordId {
    /// Allocate a fresh id.
    pub fn generate() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);
        let counter = next_counter();

        let mut bytes = [0u8; RECORD_ID_LEN];
        bytes[0..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(process_unique());
        bytes[9..12].copy_from_slice(&counter.to_be_bytes()[1..4]);
        RecordId(bytes)
    }

    /// Build an id from its raw bytes.
    pub fn from_bytes(bytes: [u8; RECORD_ID_LEN]) -> Self {
        RecordId(bytes)
    }

    /// Raw bytes of the id.
    pub fn bytes(&self) -> [u8; RECORD_ID_LEN] {
        self.0
    }

    /// Parse from the 24-character hex form.
    pub fn parse(text: &str) -> Result<Self> {
        if text.len() != RECORD_ID_HEX_LEN {
            return Err(StoreError::InvalidArgument(format!(
                "record id must be {} hex characters, got {:?}",
                RECORD_ID_HEX_LEN, text
            )));
        }
        let mut bytes = [0u8; RECORD_ID_LEN];
        hex::decode_to_slice(text, &mut bytes)?;
        Ok(RecordId(bytes))
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Seconds since the Unix epoch at which the id was allocated.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

fn process_unique() -> &'static [u8; 5] {
    static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
    PROCESS_UNIQUE.get_or_init(rand::random)
}

fn next_counter() -> u32 {
    static COUNTER: OnceLock<AtomicU32> = OnceLock::new();
    COUNTER
        .get_or_init(|| AtomicU32::new(rand::random::<u32>() & 0x00ff_ffff))
        .fetch_add(1, Ordering::Relaxed)
        & 0x00ff_ffff
}

impl FromStr for RecordId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        RecordId::parse(s)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.to_hex())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        RecordId::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Where a person lives.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
}

/// A stored person.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Assigned by the store on create; `None` until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub firstname: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub lastname: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Person {
    /// Create an unpersisted person.
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            id: None,
            firstname: firstname.into(),
            lastname: lastname.into(),
            location: None,
        }
    }

    /// Set the location.
    pub fn with_location(mut self, city: impl Into<String>, country: impl Into<String>) -> Self {
        self.location = Some(Location {
            city: city.into(),
            country: country.into(),
        });
        self
    }

    /// Copy of this person carrying `id`.
    pub(crate) fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Which backend a store is running on. Fixed when the store is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreMode {
    Persistent,
    InMemory,
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreMode::Persistent => write!(f, "persistent"),
            StoreMode::InMemory => write!(f, "in-memory"),
        }
    }
}
