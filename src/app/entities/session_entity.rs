use serde::{Deserialize, Serialize};

use crate::app::storage::{ADMIN_TOKEN_KEY, VOTER_TOKEN_KEY};

/// Role resolved by the credential service. Anything the service does not
/// report as `admin` is treated as a plain voter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Voter,
}

impl Role {
    pub fn parse(value: &str) -> Role {
        if value == "admin" {
            Role::Admin
        } else {
            Role::Voter
        }
    }

    /// Storage slot the session token is persisted under. Admin and voter
    /// tokens never share a slot.
    pub fn token_key(&self) -> &'static str {
        match self {
            Role::Admin => ADMIN_TOKEN_KEY,
            Role::Voter => VOTER_TOKEN_KEY,
        }
    }

    /// Page the login flow redirects to for this role.
    pub fn landing_page(&self) -> &'static str {
        match self {
            Role::Admin => "admin.html",
            Role::Voter => "index.html",
        }
    }
}

/// Transient state bridging the two login phases. Produced by the credential
/// check, consumed by OTP submission, discarded when the page goes away.
#[derive(Debug, Clone)]
pub struct PendingAuth {
    pub temp_token: String,
    pub role: Role,
    pub email: String,
    pub voter_id: String,
    /// Set only when the OTP provider was unreachable and the configuration
    /// allows the fixed-code fallback.
    pub use_mock: bool,
}
