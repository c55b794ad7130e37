use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::credentials::CredentialDirectory;
use super::principal::Identity;
use super::session::SessionStore;
use super::AuthError;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Credential check behind an async boundary so a remote directory can replace
/// the local table without changing callers.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, email: &str, secret: &str) -> Result<Identity, AuthError>;
}

/// Authenticates against a static credential table after a fixed latency.
pub struct LocalAuthenticator {
    pub directory: CredentialDirectory,
    pub latency: Duration,
}

impl LocalAuthenticator {
    pub fn new(directory: CredentialDirectory, latency: Duration) -> Self { Self { directory, latency } }
}

#[async_trait]
impl Authenticator for LocalAuthenticator {
    async fn authenticate(&self, email: &str, secret: &str) -> Result<Identity, AuthError> {
        if !self.latency.is_zero() { tokio::time::sleep(self.latency).await; }
        // plaintext, case-sensitive comparison on both fields
        match self.directory.find(email, secret) {
            Some(rec) => Ok(rec.to_identity()),
            None => Err(AuthError::InvalidCredentials),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials matched and the identity is now the current session.
    Authenticated(Identity),
    /// Credentials did not match; the session is unchanged.
    Rejected,
    /// A newer login or a logout started while this one was in flight; its result was dropped.
    Superseded,
}

struct PendingGuard<'a>(&'a AtomicUsize);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) { self.0.fetch_sub(1, Ordering::SeqCst); }
}

/// Runs logins against an [`Authenticator`] and commits results to the [`SessionStore`].
///
/// Every login takes a generation ticket. A result is committed only while its
/// ticket is still the latest one, so a slow earlier login can never overwrite a
/// newer login or resurrect a session after logout.
pub struct LoginCoordinator {
    authenticator: Arc<dyn Authenticator>,
    sessions: Arc<SessionStore>,
    generation: Mutex<u64>,
    pending: AtomicUsize,
}

impl LoginCoordinator {
    pub fn new(authenticator: Arc<dyn Authenticator>, sessions: Arc<SessionStore>) -> Self {
        Self { authenticator, sessions, generation: Mutex::new(0), pending: AtomicUsize::new(0) }
    }

    fn next_ticket(&self) -> u64 {
        let mut g = self.generation.lock();
        *g += 1;
        *g
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<LoginOutcome, AuthError> {
        let ticket = self.next_ticket();
        self.pending.fetch_add(1, Ordering::SeqCst);
        let _pending = PendingGuard(&self.pending);
        debug!(target: "auth", email = %req.email, ticket, "auth.login started");

        let result = self.authenticator.authenticate(&req.email, &req.password).await;

        // Check and commit under one generation lock; logout clears under the same lock.
        // The save is a small synchronous write, accepted on the async worker.
        let g = self.generation.lock();
        if *g != ticket {
            debug!(target: "auth", email = %req.email, ticket, latest = *g, "auth.login superseded");
            return Ok(LoginOutcome::Superseded);
        }
        match result {
            Ok(identity) => {
                self.sessions.save(identity.clone());
                drop(g);
                info!(target: "auth", user = %identity.email, role = %identity.role, "auth.login ok");
                Ok(LoginOutcome::Authenticated(identity))
            }
            Err(AuthError::InvalidCredentials) => {
                drop(g);
                warn!(target: "auth", email = %req.email, "auth.login rejected");
                Ok(LoginOutcome::Rejected)
            }
            Err(e) => Err(e),
        }
    }

    /// End the session and invalidate any login still in flight.
    pub fn logout(&self) {
        let mut g = self.generation.lock();
        *g += 1;
        let who = self.sessions.current().map(|i| i.email);
        self.sessions.clear();
        drop(g);
        info!(target: "auth", user = ?who, "auth.logout");
    }

    /// True while at least one login is awaiting its authenticator.
    pub fn is_pending(&self) -> bool { self.pending.load(Ordering::SeqCst) > 0 }

    pub fn sessions(&self) -> &Arc<SessionStore> { &self.sessions }
}
