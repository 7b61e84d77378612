use tf_model::EventId;

use crate::error::{Result, StoreError};

pub const EVENTS_PREFIX: &str = "events/";
pub const GUESTS_FILE: &str = "guests.csv";
pub const META_FILE: &str = "meta.json";

/// Minimal key/value blob storage, modelled on an S3 bucket.
///
/// Keys are `/`-separated relative paths. All calls block until complete.
pub trait ObjectStore {
    /// Returns `None` when the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    fn put(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Returns `false` when there was nothing to delete.
    fn delete(&self, key: &str) -> Result<bool>;

    /// All keys starting with `prefix`, sorted.
    fn list(&self, prefix: &str) -> Result<Vec<String>>;
}

impl<S: ObjectStore + ?Sized> ObjectStore for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        (**self).put(key, bytes)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        (**self).delete(key)
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        (**self).list(prefix)
    }
}

/// `events/{event_id}/`
pub fn event_prefix(event_id: &EventId) -> String {
    format!("{EVENTS_PREFIX}{event_id}/")
}

pub fn guests_key(event_id: &EventId) -> String {
    format!("{}{GUESTS_FILE}", event_prefix(event_id))
}

pub fn meta_key(event_id: &EventId) -> String {
    format!("{}{META_FILE}", event_prefix(event_id))
}

/// Rejects keys that could escape the store root.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('/')
        && !key.contains('\\')
        && key
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey {
            key: key.to_string(),
        })
    }
}
