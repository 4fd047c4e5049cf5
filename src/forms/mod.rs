//! Form definitions backing the marketplace routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod jobs;
pub mod profile;
pub mod users;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("could not read the submitted form")]
    Malformed,

    #[error("invalid job name")]
    InvalidName,

    #[error("price must be a non-negative number")]
    InvalidPrice,

    #[error("invalid skill")]
    InvalidSkill,

    #[error("proposal cannot be empty")]
    InvalidProposal,

    #[error("invalid application status")]
    InvalidStatus,

    #[error("username cannot be empty or contain spaces")]
    InvalidUsername,

    #[error("every address field except the street is required")]
    InvalidAddress,

    #[error("invalid user id")]
    InvalidUserId,

    #[error("no users selected")]
    EmptySelection,
}

/// Local path to go back to after a mutation, `fallback` for anything else.
pub fn safe_return_to(return_to: Option<&str>, fallback: &str) -> String {
    match return_to.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_to_accepts_only_local_paths() {
        assert_eq!(
            safe_return_to(Some("/admin/users?page=2&search=ann"), "/admin/users"),
            "/admin/users?page=2&search=ann"
        );
        assert_eq!(safe_return_to(Some("//evil.example"), "/x"), "/x");
        assert_eq!(safe_return_to(Some("https://evil.example"), "/x"), "/x");
        assert_eq!(safe_return_to(None, "/x"), "/x");
    }
}
