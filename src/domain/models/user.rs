use serde::{Deserialize, Serialize};

/// Caller identity forwarded by the gateway. The platform's user store
/// lives behind the gateway; this service only consumes id and role.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserIdentity {
    pub id: String,
    pub role: String,
}

impl UserIdentity {
    pub fn is_organizer(&self) -> bool {
        self.role == "ORGANIZER" || self.role == "ADMIN"
    }

    pub fn is_admin(&self) -> bool {
        self.role == "ADMIN"
    }
}
