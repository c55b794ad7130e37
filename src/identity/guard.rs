use std::sync::Arc;

use tracing::debug;

use super::principal::Identity;
use super::session::SessionStore;

/// Paths reachable without a session. Matched exactly.
pub const PUBLIC_PATHS: [&str; 2] = ["/login", "/register"];

pub const LOGIN_PATH: &str = "/login";

/// Entry points with no content of their own; a session is sent to its role home.
const ENTRY_PATHS: [&str; 2] = ["/", "/dashboard"];

/// Where a navigation stands relative to the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Unauthenticated,
    AuthenticatedMatchingSection,
    AuthenticatedWrongSection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

pub fn is_public(path: &str) -> bool { PUBLIC_PATHS.contains(&path) }

/// Second path segment of a `/dashboard/...` path, if the path is under the dashboard.
fn dashboard_section(path: &str) -> Option<&str> {
    let rest = path.strip_prefix("/dashboard/")?;
    Some(rest.split('/').next().unwrap_or(""))
}

pub fn classify(path: &str, session: Option<&Identity>) -> GuardState {
    let Some(identity) = session else { return GuardState::Unauthenticated; };
    if is_public(path) || ENTRY_PATHS.contains(&path) {
        return GuardState::AuthenticatedWrongSection;
    }
    match dashboard_section(path) {
        Some(section) if section != identity.role.section() => GuardState::AuthenticatedWrongSection,
        _ => GuardState::AuthenticatedMatchingSection,
    }
}

/// Decide a navigation. Pure; every redirect target is itself allowed for the same session.
pub fn evaluate(path: &str, session: Option<&Identity>) -> GuardDecision {
    match (classify(path, session), session) {
        (GuardState::Unauthenticated, _) if is_public(path) => GuardDecision::Allow,
        (GuardState::Unauthenticated, _) => GuardDecision::Redirect(LOGIN_PATH.to_string()),
        (GuardState::AuthenticatedWrongSection, Some(identity)) => GuardDecision::Redirect(identity.role.home_path()),
        _ => GuardDecision::Allow,
    }
}

/// Route guard bound to the application's session store.
#[derive(Clone)]
pub struct RouteGuard {
    sessions: Arc<SessionStore>,
}

impl RouteGuard {
    pub fn new(sessions: Arc<SessionStore>) -> Self { Self { sessions } }

    /// Evaluate `path` against a snapshot of the current session.
    pub fn check(&self, path: &str) -> GuardDecision {
        let session = self.sessions.current();
        let decision = evaluate(path, session.as_ref());
        if let GuardDecision::Redirect(to) = &decision {
            debug!(target: "guard", from = path, to = %to, role = ?session.as_ref().map(|i| i.role), "guard.redirect");
        }
        decision
    }
}
