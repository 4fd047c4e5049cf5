//! JSON list endpoints consumed by client-side list views.

use crate::domain::job::{Job, JobStatus};
use crate::domain::user::{User, UserRole};
use crate::list_view::{ListResult, QueryParams};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{JobListQuery, JobReader, UserListQuery, UserReader};
use crate::services::{ServiceError, ServiceResult, ensure_role, list_query};

/// One page of users matching `search`, with the filtered total.
pub fn list_users<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &QueryParams,
) -> ServiceResult<ListResult<User>>
where
    R: UserReader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let query = list_query(params);
    let (total, users) = repo.list_users(UserListQuery::from(&query)).map_err(|err| {
        log::error!("Failed to list users: {err}");
        err
    })?;

    Ok(ListResult::new(users, total))
}

/// One page of open jobs matching `search`, with the filtered total.
pub fn list_open_jobs<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &QueryParams,
) -> ServiceResult<ListResult<Job>>
where
    R: JobReader + ?Sized,
{
    user.role().ok_or(ServiceError::Unauthorized)?;

    let query = list_query(params);
    let (total, jobs) = repo
        .list_jobs(JobListQuery::from(&query).status(JobStatus::Open))
        .map_err(|err| {
            log::error!("Failed to list jobs: {err}");
            err
        })?;

    Ok(ListResult::new(jobs, total))
}
