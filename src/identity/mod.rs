//! Identity, session and role-based access control for the dashboard.
//! Keep the public surface thin and split implementation across sub-modules.

mod role;
mod principal;
mod credentials;
mod session;
mod provider;
mod guard;

pub use role::Role;
pub use principal::Identity;
pub use credentials::{CredentialDirectory, CredentialRecord};
pub use session::{SessionStore, SESSION_KEY};
pub use provider::{Authenticator, LocalAuthenticator, LoginCoordinator, LoginOutcome, LoginRequest};
pub use guard::{classify, evaluate, is_public, GuardDecision, GuardState, RouteGuard, LOGIN_PATH, PUBLIC_PATHS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("session storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("unknown role: {0}")]
    UnknownRole(String),
}
