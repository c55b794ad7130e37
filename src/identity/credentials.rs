use once_cell::sync::Lazy;

use super::principal::Identity;
use super::role::Role;

/// Known account. The secret is compared in plaintext and never leaves this module's callers.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub secret: String,
    pub role: Role,
}

impl CredentialRecord {
    fn new(id: u32, name: &str, email: &str, secret: &str, role: Role) -> Self {
        Self { id, name: name.into(), email: email.into(), secret: secret.into(), role }
    }

    /// Identity with the secret stripped.
    pub fn to_identity(&self) -> Identity {
        Identity { id: self.id, name: self.name.clone(), email: self.email.clone(), role: self.role }
    }
}

static DEMO_ACCOUNTS: Lazy<Vec<CredentialRecord>> = Lazy::new(|| {
    vec![
        CredentialRecord::new(1, "Admin User", "admin@example.com", "password", Role::Admin),
        CredentialRecord::new(2, "Teacher User", "teacher@example.com", "password", Role::Teacher),
        CredentialRecord::new(3, "Student User", "student@example.com", "password", Role::Student),
        CredentialRecord::new(4, "School Admin User", "schooladmin@example.com", "password", Role::SchoolAdmin),
    ]
});

/// Static lookup table standing in for a user directory.
#[derive(Debug, Clone)]
pub struct CredentialDirectory {
    records: Vec<CredentialRecord>,
}

impl Default for CredentialDirectory {
    fn default() -> Self { Self { records: DEMO_ACCOUNTS.clone() } }
}

impl CredentialDirectory {
    /// Exact, case-sensitive match on both email and secret.
    pub fn find(&self, email: &str, secret: &str) -> Option<&CredentialRecord> {
        self.records.iter().find(|r| r.email == email && r.secret == secret)
    }
}
