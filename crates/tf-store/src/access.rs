use tf_model::{AdminToken, EventId, EventMeta};

/// What a visitor may do with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Presented the creator token: may edit and delete.
    Admin,
    /// Guest lookup only.
    Guest,
}

impl Access {
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// A wrong or missing token silently yields guest access.
pub fn resolve_access(meta: &EventMeta, token: Option<&str>) -> Access {
    if meta.is_creator(token) {
        Access::Admin
    } else {
        Access::Guest
    }
}

/// Link guests open (and the QR code encodes).
pub fn guest_url(base_url: &str, event_id: &EventId) -> String {
    format!("{}/?event={event_id}", base_url.trim_end_matches('/'))
}

/// Link that opens the admin view.
pub fn admin_url(base_url: &str, event_id: &EventId, token: &AdminToken) -> String {
    format!("{}&token={}", guest_url(base_url, event_id), token.as_str())
}
