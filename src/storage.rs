//! Save/load contract for component records.
//!
//! Every persistent record (agents, emitters, timed emitters, absorbers) is
//! saved as a flat [`StorageContainer`]: a map of camelCase field names to
//! primitive or vector values. Loading tolerates missing optional fields,
//! falling back to the record's defaults (an absent `agentId` loads as
//! [`AgentId::NULL`](crate::components::agent::AgentId::NULL)).
//!
//! The encoding is plain `serde_json` values, so any record type that
//! derives `Serialize`/`Deserialize` gets [`Storage`] for free.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Flat field-name to value mapping used for persistence.
pub type StorageContainer = Map<String, Value>;

/// Errors raised while saving or loading a record.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The record did not encode to a key/value object.
    #[error("record is not a key/value object")]
    NotAnObject,
    /// A field had the wrong type or the record could not be encoded.
    #[error("invalid record: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Symmetric save/load for a persistent record.
pub trait Storage: Sized {
    /// Encode this record as a flat field map.
    fn storage(&self) -> Result<StorageContainer, StorageError>;

    /// Decode a record, defaulting absent fields.
    fn load(storage: &StorageContainer) -> Result<Self, StorageError>;
}

impl<T> Storage for T
where
    T: Serialize + DeserializeOwned,
{
    fn storage(&self) -> Result<StorageContainer, StorageError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(StorageError::NotAnObject),
        }
    }

    fn load(storage: &StorageContainer) -> Result<Self, StorageError> {
        Ok(serde_json::from_value(Value::Object(storage.clone()))?)
    }
}

/// Interpret an arbitrary JSON value as a storage record.
pub fn as_container(value: &Value) -> Result<&StorageContainer, StorageError> {
    value.as_object().ok_or(StorageError::NotAnObject)
}
