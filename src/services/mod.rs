//! Business workflows invoked by the HTTP handlers.
//!
//! Every service takes the signed-in user and a repository bounded by the
//! traits it needs, performs the role check, and returns plain data for the
//! template or API layer.

use pushkind_common::pagination::DEFAULT_ITEMS_PER_PAGE;
use pushkind_common::routes::check_role;

use crate::domain::user::{User, UserRole};
use crate::list_view::{ListQuery, QueryParams};
use crate::models::auth::AuthenticatedUser;
use crate::repository::UserWriter;

pub mod api;
pub mod errors;
pub mod jobs;
pub mod profile;
pub mod users;

pub use errors::{ServiceError, ServiceResult};

/// Whether the user's roles grant `role`.
pub fn has_role(user: &AuthenticatedUser, role: UserRole) -> bool {
    check_role(role.code(), &user.roles)
}

pub fn ensure_role(user: &AuthenticatedUser, role: UserRole) -> ServiceResult<()> {
    if has_role(user, role) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Page and search requested by a list URL.
pub fn list_query(params: &QueryParams) -> ListQuery {
    ListQuery::from_params(params, DEFAULT_ITEMS_PER_PAGE)
}

/// `path` followed by the list parameters, if any.
pub fn list_url(path: &str, params: &QueryParams) -> String {
    if params.is_empty() {
        path.to_string()
    } else {
        format!("{path}{}", params.to_href())
    }
}

/// Mirrors the signed-in account into the local `users` table.
pub fn sync_user<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let new_user = user.to_new_user().map_err(|err| {
        log::error!("Token claims do not describe a marketplace user: {err}");
        ServiceError::Unauthorized
    })?;

    repo.upsert_user(&new_user).map_err(|err| {
        log::error!("Failed to sync user {}: {err}", user.sub);
        ServiceError::from(err)
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::types::UserId;
    use crate::models::auth::AuthenticatedUser;

    pub fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: UserId::new().to_string(),
            email: "user@example.com".to_string(),
            name: "User".to_string(),
            roles: roles.iter().map(|role| role.to_string()).collect(),
            email_verified: false,
            exp: 0,
        }
    }
}
