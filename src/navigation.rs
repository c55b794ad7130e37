//! Role-specific sidebar navigation.
//!
//! Entries are derived from the role on every render and never stored.

use serde::Serialize;

use crate::identity::Role;

/// Icon reference rendered next to a navigation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Home,
    Calendar,
    BookOpen,
    Users,
    GraduationCap,
    BookCopy,
    FileText,
    BarChart,
}

impl Icon {
    pub fn name(&self) -> &'static str {
        match self {
            Icon::Home => "home",
            Icon::Calendar => "calendar",
            Icon::BookOpen => "book-open",
            Icon::Users => "users",
            Icon::GraduationCap => "graduation-cap",
            Icon::BookCopy => "book-copy",
            Icon::FileText => "file-text",
            Icon::BarChart => "bar-chart",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub label: &'static str,
    pub href: String,
    pub icon: Icon,
    /// Set by [`mark_active`] for the entry matching the current path.
    pub active: bool,
}

impl NavEntry {
    fn new(label: &'static str, href: impl Into<String>, icon: Icon) -> Self {
        Self { label, href: href.into(), icon, active: false }
    }
}

pub const CALENDAR_PATH: &str = "/calendar";

fn role_entries(role: Role) -> &'static [(&'static str, &'static str, Icon)] {
    match role {
        Role::Admin => &[
            ("Schools", "schools", Icon::BookOpen),
            ("Teachers", "teachers", Icon::Users),
            ("Students", "students", Icon::GraduationCap),
            ("Subjects", "subjects", Icon::BookCopy),
            ("Homeworks", "homeworks", Icon::FileText),
        ],
        Role::Teacher => &[
            ("My Subjects", "subjects", Icon::BookCopy),
            ("Homeworks", "homeworks", Icon::FileText),
            ("Students", "students", Icon::GraduationCap),
            ("Analytics", "analytics", Icon::BarChart),
        ],
        Role::Student => &[
            ("My Subjects", "subjects", Icon::BookCopy),
            ("Homeworks", "homeworks", Icon::FileText),
        ],
        Role::SchoolAdmin => &[
            ("Manage Teachers", "manage-teachers", Icon::Users),
            ("Manage Students", "manage-students", Icon::GraduationCap),
            ("School Analytics", "analytics", Icon::BarChart),
        ],
    }
}

/// Common entries (dashboard home, calendar) followed by the role's own entries.
pub fn resolve(role: Option<Role>) -> Vec<NavEntry> {
    let home = role.map(|r| r.home_path()).unwrap_or_else(|| "/".to_string());
    let mut out = vec![
        NavEntry::new("Dashboard", home, Icon::Home),
        NavEntry::new("Calendar", CALENDAR_PATH, Icon::Calendar),
    ];
    if let Some(r) = role {
        let base = r.home_path();
        out.extend(role_entries(r).iter().map(|(label, leaf, icon)| NavEntry::new(*label, format!("{}/{}", base, leaf), *icon)));
    }
    out
}

/// Flag entries whose href equals `path` exactly.
pub fn mark_active(entries: &mut [NavEntry], path: &str) {
    for e in entries.iter_mut() { e.active = e.href == path; }
}
