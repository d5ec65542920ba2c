use std::collections::HashMap;

use crate::auth::{digests_match, password_digest};
use crate::config::UserEntry;

use super::UserIdentity;

/// Read-only account store backing credential checks
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<String, UserEntry>,
}

impl UserDirectory {
    pub fn new(entries: impl IntoIterator<Item = UserEntry>) -> Self {
        let users = entries
            .into_iter()
            .map(|entry| (entry.email.to_lowercase(), entry))
            .collect();
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Look up an account by email (case-insensitive) and check its password
    pub fn verify(&self, email: &str, password: &str) -> Option<UserIdentity> {
        let entry = self.users.get(&email.trim().to_lowercase())?;
        if !digests_match(&entry.password_sha256, &password_digest(password)) {
            return None;
        }

        Some(UserIdentity {
            id: entry.email.clone(),
            name: entry.name.clone(),
            email: entry.email.clone(),
        })
    }
}
