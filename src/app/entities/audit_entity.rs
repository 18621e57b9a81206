use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Append-only feed entry from the `audit_trail` table. The same shape
/// arrives from the initial query and from live insert events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub transaction_hash: String,

    pub event_type: String,

    pub block_number: u64,

    /// Seconds since epoch.
    pub timestamp: i64,
}

impl AuditRecord {
    /// Shortened hash for display: first 10 and last 8 characters.
    pub fn short_hash(&self) -> String {
        let hash = &self.transaction_hash;
        if hash.len() > 18 {
            format!("{}...{}", &hash[..10], &hash[hash.len() - 8..])
        } else {
            hash.clone()
        }
    }

    pub fn display_time(&self) -> String {
        match Utc.timestamp_opt(self.timestamp, 0).single() {
            Some(ts) => ts.format("%d/%m/%Y %H:%M:%S").to_string(),
            None => String::new(),
        }
    }
}
