//! Navigation shared by every page.

use serde::Serialize;

use crate::domain::user::UserRole;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavRoute {
    pub label: &'static str,
    pub href: &'static str,
}

const fn route(label: &'static str, href: &'static str) -> NavRoute {
    NavRoute { label, href }
}

/// Navbar entries for the given role.
pub fn nav_routes(role: Option<UserRole>) -> Vec<NavRoute> {
    match role {
        Some(UserRole::Seeker) => vec![route("Home", "/skr/"), route("Grab Tasks", "/skr/tasks/")],
        Some(UserRole::Provider) => vec![route("Home", "/pdr/"), route("Tasks", "/pdr/tasks/")],
        _ => vec![
            route("Home", "/#"),
            route("About", "/#about"),
            route("Contact Us", "/#contact-us"),
        ],
    }
}
