//! Dashboard chrome: sidebar navigation and header composed around a page's content.
//!
//! The composer only reads the session; pages hand it a title and a content slot.

use std::fmt::Write as _;

use serde::Serialize;

use crate::identity::{Identity, Role};
use crate::navigation::{self, NavEntry};

const BRAND: &str = "EduManage";
const FALLBACK_INITIALS: &str = "U";

/// Role-keyed theme tag. School admins and anonymous pages use the default look.
pub fn theme_for(role: Option<Role>) -> Option<&'static str> {
    match role? {
        Role::Admin => Some("admin-theme"),
        Role::Teacher => Some("teacher-theme"),
        Role::Student => Some("student-theme"),
        Role::SchoolAdmin => None,
    }
}

/// Content placed in the layout's single slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Plain text, escaped on render.
    Text(String),
    /// Markup produced by the host itself; inserted as is.
    Trusted(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub title: String,
    pub initials: String,
    pub name: Option<String>,
    pub role_label: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub header: Header,
    pub nav: Vec<NavEntry>,
    pub theme: Option<&'static str>,
    pub content: Content,
}

fn initials_for(session: Option<&Identity>) -> String {
    match session.map(Identity::initials) {
        Some(i) if !i.is_empty() => i,
        _ => FALLBACK_INITIALS.to_string(),
    }
}

/// Assemble chrome for `path` around `content` for the given session.
pub fn compose(title: &str, content: Content, session: Option<&Identity>, path: &str) -> Layout {
    let role = session.map(|i| i.role);
    let mut nav = navigation::resolve(role);
    navigation::mark_active(&mut nav, path);
    Layout {
        header: Header {
            title: title.to_string(),
            initials: initials_for(session),
            name: session.map(|i| i.name.clone()),
            role_label: role.map(|r| r.label()),
        },
        nav,
        theme: theme_for(role),
        content,
    }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl Layout {
    pub fn render_html(&self) -> String {
        let mut h = String::with_capacity(2048);
        let theme = self.theme.unwrap_or("");
        let _ = write!(h, "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{} | {}</title></head>\n", escape(&self.header.title), BRAND);
        let _ = writeln!(h, "<body class=\"dashboard {}\">", theme);

        // sidebar
        let _ = writeln!(h, "<aside class=\"sidebar {}\">", theme);
        let _ = writeln!(h, "<div class=\"brand\">{}</div>", BRAND);
        if let (Some(name), Some(label)) = (&self.header.name, self.header.role_label) {
            let _ = writeln!(h, "<div class=\"user-card\"><p class=\"user-name\">{}</p><p class=\"user-role\">{}</p></div>", escape(name), label);
        }
        h.push_str("<nav>\n");
        for e in &self.nav {
            let class = if e.active { "nav-item active" } else { "nav-item" };
            let _ = writeln!(h, "<a class=\"{}\" href=\"{}\" data-icon=\"{}\">{}</a>", class, escape(&e.href), e.icon.name(), escape(e.label));
        }
        h.push_str("</nav>\n");
        if self.header.name.is_some() {
            h.push_str("<form method=\"post\" action=\"/logout\"><button type=\"submit\">Logout</button></form>\n");
        }
        h.push_str("</aside>\n");

        // header + content
        h.push_str("<div class=\"main\">\n<header>\n");
        let _ = writeln!(h, "<h1>{}</h1>", escape(&self.header.title));
        let _ = writeln!(h, "<span class=\"avatar\">{}</span>", escape(&self.header.initials));
        if let Some(name) = &self.header.name {
            let _ = writeln!(h, "<span class=\"user-name\">{}</span>", escape(name));
        }
        if let Some(label) = self.header.role_label {
            let _ = writeln!(h, "<span class=\"user-role\">{}</span>", label);
        }
        h.push_str("</header>\n<main>\n");
        match &self.content {
            Content::Text(t) => { let _ = writeln!(h, "<p>{}</p>", escape(t)); }
            Content::Trusted(m) => { h.push_str(m); h.push('\n'); }
        }
        h.push_str("</main>\n</div>\n</body></html>\n");
        h
    }
}
