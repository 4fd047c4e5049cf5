//! DTOs used by the users admin pages.

use serde::Serialize;

use crate::domain::types::UserId;
use crate::domain::user::User;
use crate::domain::verification::{Verification, verifications_for};
use crate::pagination::Paginated;

/// One row of the users table.
#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    pub id: UserId,
    pub email: String,
    pub role: &'static str,
    pub joined_at: String,
    pub verifications: Vec<Verification>,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        Self {
            verifications: verifications_for(Some(&user)),
            id: user.id,
            role: user.role.label(),
            joined_at: user.created_at.format("%b %-d, %Y").to_string(),
            email: user.email.into_inner(),
        }
    }
}

pub struct UsersPageData {
    pub users: Paginated<UserRow>,
    /// Current list URL, posted back by delete forms.
    pub return_to: String,
}

pub struct UserDetailsData {
    pub user: UserRow,
    pub username: Option<String>,
    pub full_name: String,
}
