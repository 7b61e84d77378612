pub mod error;
pub mod event;
pub mod guest;
pub mod ids;
pub mod mapping;

pub use error::{ModelError, SchemaError};
pub use event::{
    AdminRecoveryFile, DEFAULT_TABLE_PREFIX, DEFAULT_TITLE, DELETE_AFTER_FORMAT, EventMeta,
    parse_delete_after,
};
pub use guest::{GuestRecord, NameField};
pub use ids::{AdminToken, EventId};
pub use mapping::{CanonicalField, ColumnMapping};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovery_file_serializes() {
        let meta = EventMeta::new(
            "Gala",
            AdminToken::new("a1b2c3d4").unwrap(),
            ColumnMapping::default(),
            "Room",
        );
        let event_id = EventId::new("abc123").unwrap();
        let recovery = AdminRecoveryFile::from_meta(&event_id, &meta);
        let json = serde_json::to_string(&recovery).expect("serialize recovery");
        let round: AdminRecoveryFile = serde_json::from_str(&json).expect("deserialize recovery");
        assert_eq!(round.event_id, "abc123");
        assert_eq!(round.creator_token, "a1b2c3d4");
        assert_eq!(round.table_prefix, "Room");
    }
}
