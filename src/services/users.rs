//! Users administration.

use crate::domain::types::UserId;
use crate::domain::user::UserRole;
use crate::dto::users::{UserDetailsData, UserRow, UsersPageData};
use crate::forms::users::{DeleteUsersForm, DeleteUsersPayload};
use crate::list_view::{ListResult, QueryParams};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{UserListQuery, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role, list_query, list_url};

pub const USERS_PATH: &str = "/admin/users";

/// Loads one page of the users table for the raw query string `params`.
pub fn load_users_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &QueryParams,
) -> ServiceResult<UsersPageData>
where
    R: UserReader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let query = list_query(params);
    let (total, users) = repo.list_users(UserListQuery::from(&query)).map_err(|err| {
        log::error!("Failed to list users: {err}");
        err
    })?;

    let users = Paginated::new(ListResult::new(users, total), &query, params).map(UserRow::from);

    Ok(UsersPageData {
        users,
        return_to: list_url(USERS_PATH, params),
    })
}

pub fn load_user_details<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: &str,
) -> ServiceResult<UserDetailsData>
where
    R: UserReader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let user_id = user_id.parse::<UserId>().map_err(|_| ServiceError::NotFound)?;
    let account = repo
        .get_user_by_id(&user_id)?
        .ok_or(ServiceError::NotFound)?;
    let profile = repo.get_profile_by_user_id(&user_id)?;

    Ok(UserDetailsData {
        user: UserRow::from(account),
        full_name: profile
            .as_ref()
            .map(|profile| profile.full_name())
            .unwrap_or_else(|| "N/A".to_string()),
        username: profile.map(|profile| profile.username.into_inner()),
    })
}

/// Deletes one account with everything it owns.
pub fn delete_user<R>(repo: &R, user: &AuthenticatedUser, user_id: &str) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let user_id = user_id.parse::<UserId>().map_err(|_| ServiceError::NotFound)?;
    if user.sub == user_id.to_string() {
        return Err(ServiceError::Form("You cannot delete your own account".to_string()));
    }

    repo.delete_user(&user_id).map_err(|err| {
        log::error!("Failed to delete user {user_id}: {err}");
        ServiceError::from(err)
    })
}

/// Deletes every selected account, returning how many were removed.
pub fn delete_users<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &DeleteUsersForm,
) -> ServiceResult<usize>
where
    R: UserWriter + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let payload = DeleteUsersPayload::try_from(form)?;
    let ids: Vec<UserId> = payload
        .ids
        .into_iter()
        .filter(|id| id.to_string() != user.sub)
        .collect();
    if ids.is_empty() {
        return Err(ServiceError::Form("You cannot delete your own account".to_string()));
    }

    repo.delete_users(&ids).map_err(|err| {
        log::error!("Failed to delete users: {err}");
        ServiceError::from(err)
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::UserEmail;
    use crate::domain::user::User;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user_with_roles;

    fn account(email: &str) -> User {
        User {
            id: UserId::new(),
            email: UserEmail::new(email).expect("valid email"),
            role: UserRole::Seeker,
            email_confirmed_at: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn listing_requires_admin() {
        let mut repo = MockRepository::new();
        repo.expect_list_users().times(0);

        let result = load_users_page(&repo, &user_with_roles(&["skr"]), &QueryParams::default());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn listing_passes_search_and_page_to_repository() {
        let mut repo = MockRepository::new();
        repo.expect_list_users()
            .withf(|query| {
                query.search.as_deref() == Some("ann")
                    && query.pagination.map(|p| (p.page, p.per_page)) == Some((2, 10))
            })
            .times(1)
            .returning(|_| Ok((11, vec![account("ann@example.com")])));

        let params = QueryParams::parse("page=2&search=ann");
        let data = load_users_page(&repo, &user_with_roles(&["admin"]), &params)
            .expect("page loads");

        assert_eq!(data.users.page_count, 2);
        assert_eq!(data.users.items[0].email, "ann@example.com");
        assert_eq!(data.return_to, "/admin/users?page=2&search=ann");
    }

    #[test]
    fn bulk_delete_with_empty_selection_is_a_form_error() {
        let mut repo = MockRepository::new();
        repo.expect_delete_users().times(0);

        let result = delete_users(
            &repo,
            &user_with_roles(&["admin"]),
            &DeleteUsersForm::default(),
        );

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn bulk_delete_skips_the_current_admin() {
        let admin = user_with_roles(&["admin"]);
        let other = UserId::new();
        let expected = vec![other];

        let mut repo = MockRepository::new();
        repo.expect_delete_users()
            .withf(move |ids| ids == expected.as_slice())
            .times(1)
            .returning(|ids| Ok(ids.len()));

        let form = DeleteUsersForm {
            ids: vec![admin.sub.clone(), other.to_string()],
            return_to: None,
        };
        assert_eq!(delete_users(&repo, &admin, &form).expect("deleted"), 1);
    }

    #[test]
    fn deleting_unknown_user_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_user()
            .returning(|_| Err(crate::repository::errors::RepositoryError::NotFound));

        let result = delete_user(&repo, &user_with_roles(&["admin"]), &UserId::new().to_string());

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
