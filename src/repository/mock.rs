//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::address::{Address, NewAddress};
use crate::domain::application::{ApplicationStatus, JobApplication, NewJobApplication};
use crate::domain::job::{Job, NewJob};
use crate::domain::profile::{NewProfile, Profile};
use crate::domain::types::{ApplicationId, JobId, ProfileId, UserId, Username};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AddressReader, AddressWriter, ApplicationReader, ApplicationWriter, JobListQuery, JobReader,
    JobWriter, UserListQuery, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: &UserId) -> RepositoryResult<Option<User>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
        fn get_profile_by_user_id(&self, user_id: &UserId) -> RepositoryResult<Option<Profile>>;
        fn get_profile_by_username(&self, username: &Username) -> RepositoryResult<Option<Profile>>;
    }

    impl UserWriter for Repository {
        fn upsert_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn delete_user(&self, id: &UserId) -> RepositoryResult<()>;
        fn delete_users(&self, ids: &[UserId]) -> RepositoryResult<usize>;
        fn save_profile(&self, profile: &NewProfile) -> RepositoryResult<Profile>;
    }

    impl JobReader for Repository {
        fn get_job_by_id(&self, id: JobId) -> RepositoryResult<Option<Job>>;
        fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<Job>)>;
    }

    impl JobWriter for Repository {
        fn create_job(&self, new_job: &NewJob) -> RepositoryResult<Job>;
        fn delete_job(&self, id: JobId) -> RepositoryResult<()>;
    }

    impl ApplicationReader for Repository {
        fn get_application_by_id(&self, id: ApplicationId) -> RepositoryResult<Option<JobApplication>>;
        fn get_application_for(
            &self,
            job_id: JobId,
            user_id: &UserId,
        ) -> RepositoryResult<Option<JobApplication>>;
        fn list_job_applications(&self, job_id: JobId) -> RepositoryResult<Vec<(JobApplication, User)>>;
    }

    impl ApplicationWriter for Repository {
        fn create_application(&self, application: &NewJobApplication) -> RepositoryResult<JobApplication>;
        fn update_application_status(
            &self,
            id: ApplicationId,
            status: ApplicationStatus,
        ) -> RepositoryResult<JobApplication>;
    }

    impl AddressReader for Repository {
        fn list_addresses(&self, profile_id: ProfileId) -> RepositoryResult<Vec<Address>>;
    }

    impl AddressWriter for Repository {
        fn create_address(&self, address: &NewAddress) -> RepositoryResult<Address>;
    }
}
