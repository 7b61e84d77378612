//! Event repository: create, load, edit and delete events in an object store.

use chrono::NaiveDate;
use tf_ingest::{CsvTable, Registry, build_registry_from_table};
use tf_model::{AdminToken, ColumnMapping, DELETE_AFTER_FORMAT, EventId, EventMeta};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::object::{EVENTS_PREFIX, META_FILE, ObjectStore, event_prefix, guests_key, meta_key};

/// Attempts at drawing an unused random event id before giving up.
const MAX_ID_ATTEMPTS: usize = 16;

/// Input for [`EventRepository::create_event`].
#[derive(Debug, Clone)]
pub struct NewEvent<'a> {
    pub title: &'a str,
    pub guests_csv: &'a [u8],
    pub mapping: ColumnMapping,
    pub table_prefix: &'a str,
    pub delete_after: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct CreatedEvent {
    pub event_id: EventId,
    pub meta: EventMeta,
    pub guest_count: usize,
}

/// An event as read back from storage.
#[derive(Debug, Clone)]
pub struct LoadedEvent {
    pub event_id: EventId,
    pub meta: EventMeta,
    /// Full guest list including columns outside the mapping.
    pub guests: CsvTable,
}

impl LoadedEvent {
    /// Applies the stored column mapping to the guest list.
    pub fn registry(&self) -> Result<Registry> {
        Ok(build_registry_from_table(
            &self.guests,
            &self.meta.column_mapping,
        )?)
    }
}

#[derive(Debug, Clone)]
pub struct EventRepository<S> {
    store: S,
}

impl<S: ObjectStore> EventRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stores a new event.
    ///
    /// The guest list must build a registry under `mapping`; nothing is written
    /// otherwise.
    pub fn create_event(&self, request: &NewEvent<'_>) -> Result<CreatedEvent> {
        let guests = CsvTable::from_bytes(request.guests_csv)?;
        let registry = build_registry_from_table(&guests, &request.mapping)?;

        let event_id = self.unused_event_id()?;
        let mut meta = EventMeta::new(
            request.title,
            AdminToken::generate(),
            request.mapping.clone(),
            request.table_prefix,
        );
        meta.delete_after = request
            .delete_after
            .map(|date| date.format(DELETE_AFTER_FORMAT).to_string());

        self.store.put(&guests_key(&event_id), &guests.to_csv_bytes()?)?;
        self.save_meta(&event_id, &meta)?;

        info!(event_id = %event_id, guests = registry.len(), "created event");
        Ok(CreatedEvent {
            event_id,
            meta,
            guest_count: registry.len(),
        })
    }

    fn unused_event_id(&self) -> Result<EventId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = EventId::generate();
            if self.store.list(&event_prefix(&candidate))?.is_empty() {
                return Ok(candidate);
            }
            debug!(event_id = %candidate, "event id collision");
        }
        Err(StoreError::IdExhausted)
    }

    /// Loads an event; a missing guest list or metadata object means not found.
    pub fn load_event(&self, event_id: &EventId) -> Result<LoadedEvent> {
        let not_found = || StoreError::NotFound {
            event_id: event_id.to_string(),
        };
        let meta_key = meta_key(event_id);
        let meta_bytes = self.store.get(&meta_key)?.ok_or_else(not_found)?;
        let guest_bytes = self.store.get(&guests_key(event_id))?.ok_or_else(not_found)?;

        let meta: EventMeta = serde_json::from_slice(&meta_bytes).map_err(|source| {
            StoreError::Json {
                key: meta_key.clone(),
                source,
            }
        })?;
        let guests = CsvTable::from_bytes(&guest_bytes)?;

        debug!(event_id = %event_id, rows = guests.row_count(), "loaded event");
        Ok(LoadedEvent {
            event_id: event_id.clone(),
            meta,
            guests,
        })
    }

    pub fn save_meta(&self, event_id: &EventId, meta: &EventMeta) -> Result<()> {
        let json = serde_json::to_vec_pretty(meta).map_err(StoreError::Serialize)?;
        self.store.put(&meta_key(event_id), &json)
    }

    /// Writes an edited guest list after checking it still fits the mapping.
    pub fn save_guests(&self, event_id: &EventId, meta: &EventMeta, guests: &CsvTable) -> Result<()> {
        build_registry_from_table(guests, &meta.column_mapping)?;
        self.store.put(&guests_key(event_id), &guests.to_csv_bytes()?)?;
        info!(event_id = %event_id, rows = guests.row_count(), "saved guest list");
        Ok(())
    }

    /// Replaces the guest list with a new upload.
    ///
    /// Without an explicit mapping the stored one is reused. When a new mapping
    /// is given it is recorded in the metadata.
    pub fn replace_guests(
        &self,
        event_id: &EventId,
        guests_csv: &[u8],
        mapping: Option<ColumnMapping>,
    ) -> Result<LoadedEvent> {
        let mut event = self.load_event(event_id)?;
        let guests = CsvTable::from_bytes(guests_csv)?;
        let mapping = mapping.unwrap_or_else(|| event.meta.column_mapping.clone());
        build_registry_from_table(&guests, &mapping)?;

        self.store.put(&guests_key(event_id), &guests.to_csv_bytes()?)?;
        if mapping != event.meta.column_mapping {
            event.meta.column_mapping = mapping;
            self.save_meta(event_id, &event.meta)?;
        }
        info!(event_id = %event_id, rows = guests.row_count(), "replaced guest list");
        event.guests = guests;
        Ok(event)
    }

    /// Deletes every object under the event's prefix; returns how many.
    pub fn delete_event(&self, event_id: &EventId) -> Result<usize> {
        let keys = self.store.list(&event_prefix(event_id))?;
        let mut deleted = 0;
        for key in &keys {
            if self.store.delete(key)? {
                deleted += 1;
            }
        }
        info!(event_id = %event_id, objects = deleted, "deleted event");
        Ok(deleted)
    }

    /// Ids of all events that have a metadata object.
    pub fn list_events(&self) -> Result<Vec<EventId>> {
        let suffix = format!("/{META_FILE}");
        let ids = self
            .store
            .list(EVENTS_PREFIX)?
            .iter()
            .filter_map(|key| key.strip_prefix(EVENTS_PREFIX)?.strip_suffix(&suffix))
            .filter_map(|id| EventId::new(id).ok())
            .collect();
        Ok(ids)
    }
}
