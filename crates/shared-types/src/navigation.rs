//! Navigation shell rules shared by the navbar and its tests.

use chrono::{DateTime, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
}

pub const NAV_LINKS: [NavLink; 3] = [
    NavLink { label: "Dashboard", path: "/" },
    NavLink { label: "Curriculum", path: "/curriculum" },
    NavLink { label: "Profile", path: "/profile" },
];

/// A link is active only on an exact path match.
pub fn is_active(link_path: &str, current_path: &str) -> bool {
    link_path == current_path
}

pub fn active_link(current_path: &str) -> Option<&'static NavLink> {
    NAV_LINKS.iter().find(|link| is_active(link.path, current_path))
}

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > 0.0
}

/// Upper-cased first character of the email, or `?` when there is none.
pub fn avatar_initial(email: Option<&str>) -> String {
    email
        .and_then(|e| e.trim().chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

/// Short date for "Started ..." lines. Accepts RFC 3339 timestamps or bare
/// `YYYY-MM-DD` dates and echoes anything else unchanged.
pub fn format_started_date(created_at: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(created_at) {
        return dt.format("%-m/%-d/%Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(created_at, "%Y-%m-%d") {
        return date.format("%-m/%-d/%Y").to_string();
    }
    created_at.to_string()
}
