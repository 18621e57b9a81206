use std::collections::HashMap;
use std::sync::Mutex;

/// Session-token slot for an admin login.
pub const ADMIN_TOKEN_KEY: &str = "jwtTokenAdmin";
/// Session-token slot for a voter login.
pub const VOTER_TOKEN_KEY: &str = "jwtTokenVoter";
/// Email the OTP was dispatched to, kept for provider-side verification.
pub const EMAIL_FOR_SIGN_IN_KEY: &str = "emailForSignIn";
/// Access key the feed client authenticates with.
pub const FEED_ACCESS_KEY: &str = "feedAccessKey";

/// Client-local key/value store, the stand-in for browser local storage.
/// Values have no defined expiry; the store lives as long as the client
/// session does.
#[derive(Debug, Default)]
pub struct LocalStore {
    items: Mutex<HashMap<String, String>>,
}

impl LocalStore {
    pub fn new() -> Self {
        LocalStore::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) {
        self.items.lock().unwrap().remove(key);
    }
}
