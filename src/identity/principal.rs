use serde::{Deserialize, Serialize};

use super::role::Role;

/// Authenticated user profile as held by the session and persisted to storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    /// First character of each whitespace-separated name token, uppercased.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}
