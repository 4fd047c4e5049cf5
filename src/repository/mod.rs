//! Storage traits and their Diesel implementation.
//!
//! Services depend on the narrow `*Reader`/`*Writer` traits so tests can swap
//! in hand-written or mocked repositories.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::address::{Address, NewAddress};
use crate::domain::application::{ApplicationStatus, JobApplication, NewJobApplication};
use crate::domain::job::{Job, JobStatus, NewJob};
use crate::domain::profile::{NewProfile, Profile};
use crate::domain::types::{ApplicationId, JobId, ProfileId, UserId, Username};
use crate::domain::user::{NewUser, User};
use crate::list_view::ListQuery;
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod address;
pub mod application;
pub mod errors;
pub mod job;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod user;

/// Cloneable handle over the connection pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// SQL `OFFSET`/`LIMIT` values. Both saturate at `i64::MAX`, so a page past
/// the end of the table yields no rows instead of wrapping to the first one.
impl Pagination {
    pub fn offset(&self) -> i64 {
        let offset = (self.page.max(1) - 1).saturating_mul(self.per_page);
        i64::try_from(offset).unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

/// Converts a SQL `COUNT(*)` into a row total.
pub(crate) fn row_count(count: i64) -> RepositoryResult<usize> {
    usize::try_from(count)
        .map_err(|_| RepositoryError::Unexpected(format!("Invalid row count: {count}")))
}

impl From<&ListQuery> for Pagination {
    fn from(query: &ListQuery) -> Self {
        Self {
            page: query.page,
            per_page: query.page_size,
        }
    }
}

/// Pattern for a case-insensitive substring match, to be used with `ESCAPE '\'`.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Users matching an optional email substring, newest first.
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl UserListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_string();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl From<&ListQuery> for UserListQuery {
    fn from(query: &ListQuery) -> Self {
        Self::new()
            .search(query.search.as_str())
            .paginate(query.page, query.page_size)
    }
}

/// Jobs matching an optional name substring, newest first.
#[derive(Debug, Clone, Default)]
pub struct JobListQuery {
    pub provider_id: Option<UserId>,
    pub status: Option<JobStatus>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl JobListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provider(mut self, provider_id: UserId) -> Self {
        self.provider_id = Some(provider_id);
        self
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_string();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl From<&ListQuery> for JobListQuery {
    fn from(query: &ListQuery) -> Self {
        Self::new()
            .search(query.search.as_str())
            .paginate(query.page, query.page_size)
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: &UserId) -> RepositoryResult<Option<User>>;
    /// Returns the number of users matching the filter and the requested page.
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    fn get_profile_by_user_id(&self, user_id: &UserId) -> RepositoryResult<Option<Profile>>;
    fn get_profile_by_username(&self, username: &Username) -> RepositoryResult<Option<Profile>>;
}

pub trait UserWriter {
    /// Inserts the account or refreshes its email and role.
    fn upsert_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    /// Deletes the account with its profile, addresses, jobs and applications.
    fn delete_user(&self, id: &UserId) -> RepositoryResult<()>;
    /// Deletes every listed account that exists, returning how many were removed.
    fn delete_users(&self, ids: &[UserId]) -> RepositoryResult<usize>;
    fn save_profile(&self, profile: &NewProfile) -> RepositoryResult<Profile>;
}

pub trait JobReader {
    fn get_job_by_id(&self, id: JobId) -> RepositoryResult<Option<Job>>;
    /// Returns the number of jobs matching the filter and the requested page.
    fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<Job>)>;
}

pub trait JobWriter {
    /// Creates the job, inserting unknown skills on the way.
    fn create_job(&self, new_job: &NewJob) -> RepositoryResult<Job>;
    fn delete_job(&self, id: JobId) -> RepositoryResult<()>;
}

pub trait ApplicationReader {
    fn get_application_by_id(&self, id: ApplicationId)
    -> RepositoryResult<Option<JobApplication>>;
    fn get_application_for(
        &self,
        job_id: JobId,
        user_id: &UserId,
    ) -> RepositoryResult<Option<JobApplication>>;
    /// Applications to `job_id` with their applicants, oldest first.
    fn list_job_applications(&self, job_id: JobId)
    -> RepositoryResult<Vec<(JobApplication, User)>>;
}

pub trait ApplicationWriter {
    fn create_application(
        &self,
        application: &NewJobApplication,
    ) -> RepositoryResult<JobApplication>;
    fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> RepositoryResult<JobApplication>;
}

pub trait AddressReader {
    fn list_addresses(&self, profile_id: ProfileId) -> RepositoryResult<Vec<Address>>;
}

pub trait AddressWriter {
    fn create_address(&self, address: &NewAddress) -> RepositoryResult<Address>;
}
