//! Event persistence for TableFinder.
//!
//! Each event is two objects under `events/{event_id}/`:
//!
//! - `guests.csv`: the uploaded guest list, all columns
//! - `meta.json`: [`EventMeta`](tf_model::EventMeta)
//!
//! Storage goes through the [`ObjectStore`] trait so the same repository and
//! cleanup code run against a directory on disk or an in-memory map.

pub mod access;
pub mod cleanup;
pub mod error;
pub mod fs_store;
pub mod memory;
pub mod object;
pub mod repository;

pub use access::{Access, admin_url, guest_url, resolve_access};
pub use cleanup::{CleanupEntry, CleanupOptions, CleanupOutcome, CleanupReport, run_cleanup};
pub use error::{Result, StoreError};
pub use fs_store::FsObjectStore;
pub use memory::MemoryObjectStore;
pub use object::{EVENTS_PREFIX, GUESTS_FILE, META_FILE, ObjectStore, event_prefix, guests_key, meta_key};
pub use repository::{CreatedEvent, EventRepository, LoadedEvent, NewEvent};
