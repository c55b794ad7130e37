//! Explicit application context: owns the session store and everything that reads
//! or mutates it. Built once by the bootstrap and shared by reference.

use std::sync::Arc;

use anyhow::Context as _;
use tracing::info;

use crate::config::Config;
use crate::identity::{
    Authenticator, CredentialDirectory, GuardDecision, Identity, LocalAuthenticator, LoginCoordinator, RouteGuard,
    SessionStore,
};
use crate::layout::{self, Content, Layout};
use crate::navigation::{self, NavEntry};
use crate::storage::{FileKv, KvBackend, MemoryKv};

pub struct AppContext {
    pub config: Config,
    pub sessions: Arc<SessionStore>,
    pub logins: LoginCoordinator,
    pub guard: RouteGuard,
}

impl AppContext {
    /// Wire the context from configuration and restore the persisted session.
    pub fn bootstrap(config: Config) -> anyhow::Result<Arc<Self>> {
        let backend: Arc<dyn KvBackend> = if config.persist_session {
            let kv = FileKv::open(&config.data_dir)
                .with_context(|| format!("While opening session storage under {}", config.data_dir.display()))?;
            info!(target: "startup", path = %kv.path().display(), "session storage: file");
            Arc::new(kv)
        } else {
            info!(target: "startup", "session storage: memory only");
            Arc::new(MemoryKv::new())
        };
        let authenticator = Arc::new(LocalAuthenticator::new(CredentialDirectory::default(), config.login_delay));
        Ok(Arc::new(Self::with_parts(config, backend, authenticator)))
    }

    /// Assemble from explicit parts. Loads the session exactly once.
    pub fn with_parts(config: Config, backend: Arc<dyn KvBackend>, authenticator: Arc<dyn Authenticator>) -> Self {
        let sessions = Arc::new(SessionStore::new(backend));
        sessions.load();
        Self {
            config,
            logins: LoginCoordinator::new(authenticator, sessions.clone()),
            guard: RouteGuard::new(sessions.clone()),
            sessions,
        }
    }

    pub fn current(&self) -> Option<Identity> { self.sessions.current() }

    pub fn check(&self, path: &str) -> GuardDecision { self.guard.check(path) }

    pub fn navigation(&self, path: &str) -> Vec<NavEntry> {
        let mut nav = navigation::resolve(self.sessions.role());
        navigation::mark_active(&mut nav, path);
        nav
    }

    pub fn layout(&self, title: &str, content: Content, path: &str) -> Layout {
        let session = self.sessions.current();
        layout::compose(title, content, session.as_ref(), path)
    }
}
