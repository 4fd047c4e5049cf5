//! Job boards, postings and applications.

use crate::domain::application::{ApplicationStatus, NewJobApplication};
use crate::domain::job::{Job, JobStatus};
use crate::domain::types::{ApplicationId, JobId, Proposal, UserId};
use crate::domain::user::UserRole;
use crate::dto::jobs::{ApplicantRow, ApplicantsPageData, JobBoard, JobDetailsData, JobsPageData};
use crate::forms::jobs::{AddJobForm, AddJobPayload, ApplicationStatusForm, ApplyJobForm};
use crate::list_view::{ListResult, QueryParams};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::errors::RepositoryError;
use crate::repository::{
    ApplicationReader, ApplicationWriter, JobListQuery, JobReader, JobWriter, UserWriter,
};
use crate::services::{
    ServiceError, ServiceResult, ensure_role, has_role, list_query, list_url, sync_user,
};

fn board_role(board: JobBoard) -> UserRole {
    match board {
        JobBoard::Admin => UserRole::Admin,
        JobBoard::Open => UserRole::Seeker,
        JobBoard::Own => UserRole::Provider,
    }
}

fn current_user_id(user: &AuthenticatedUser) -> ServiceResult<UserId> {
    user.user_id().map_err(|err| {
        log::error!("Token subject is not a user id: {err}");
        ServiceError::Unauthorized
    })
}

fn parse_job_id(job_id: i32) -> ServiceResult<JobId> {
    JobId::new(job_id).map_err(|_| ServiceError::NotFound)
}

/// Loads the job owned by the signed-in provider.
fn owned_job<R>(repo: &R, user: &AuthenticatedUser, job_id: JobId) -> ServiceResult<Job>
where
    R: JobReader + ?Sized,
{
    ensure_role(user, UserRole::Provider)?;
    let owner = current_user_id(user)?;

    match repo.get_job_by_id(job_id)? {
        Some(job) if job.is_owned_by(&owner) => Ok(job),
        Some(_) => Err(ServiceError::Unauthorized),
        None => Err(ServiceError::NotFound),
    }
}

/// Loads one page of `board` for the raw query string `params`.
pub fn load_jobs_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    board: JobBoard,
    params: &QueryParams,
) -> ServiceResult<JobsPageData>
where
    R: JobReader + ?Sized,
{
    ensure_role(user, board_role(board))?;

    let query = list_query(params);
    let mut job_query = JobListQuery::from(&query);
    match board {
        JobBoard::Admin => {}
        JobBoard::Open => job_query = job_query.status(JobStatus::Open),
        JobBoard::Own => job_query = job_query.provider(current_user_id(user)?),
    }

    let (total, jobs) = repo.list_jobs(job_query).map_err(|err| {
        log::error!("Failed to list jobs: {err}");
        err
    })?;

    Ok(JobsPageData {
        board,
        jobs: Paginated::new(ListResult::new(jobs, total), &query, params),
        return_to: list_url(board.path(), params),
    })
}

/// Posts a new job on behalf of the signed-in provider.
pub fn create_job<R>(repo: &R, user: &AuthenticatedUser, form: AddJobForm) -> ServiceResult<Job>
where
    R: JobWriter + UserWriter + ?Sized,
{
    ensure_role(user, UserRole::Provider)?;

    let payload = AddJobPayload::try_from(form)?;
    let provider = sync_user(repo, user)?;

    repo.create_job(&payload.into_domain(provider.id))
        .map_err(|err| {
            log::error!("Failed to create job: {err}");
            ServiceError::from(err)
        })
}

pub fn load_job_details<R>(
    repo: &R,
    user: &AuthenticatedUser,
    job_id: i32,
) -> ServiceResult<JobDetailsData>
where
    R: JobReader + ApplicationReader + ?Sized,
{
    let user_id = current_user_id(user)?;
    let job = repo
        .get_job_by_id(parse_job_id(job_id)?)?
        .ok_or(ServiceError::NotFound)?;
    let application = repo.get_application_for(job.id, &user_id)?;

    let is_seeker = has_role(user, UserRole::Seeker);
    Ok(JobDetailsData {
        is_owner: job.is_owned_by(&user_id),
        can_apply: is_seeker && application.is_none() && job.status == JobStatus::Open,
        application,
        job,
    })
}

/// Submits the seeker's proposal for an open job.
pub fn apply_to_job<R>(
    repo: &R,
    user: &AuthenticatedUser,
    job_id: i32,
    form: ApplyJobForm,
) -> ServiceResult<()>
where
    R: JobReader + ApplicationReader + ApplicationWriter + UserWriter + ?Sized,
{
    ensure_role(user, UserRole::Seeker)?;

    let proposal = Proposal::try_from(form)?;
    let job = repo
        .get_job_by_id(parse_job_id(job_id)?)?
        .ok_or(ServiceError::NotFound)?;
    if job.status != JobStatus::Open {
        return Err(ServiceError::Form("This job no longer accepts applications".to_string()));
    }

    let seeker = sync_user(repo, user)?;
    if repo.get_application_for(job.id, &seeker.id)?.is_some() {
        return Err(ServiceError::Form("You already applied to this job".to_string()));
    }

    match repo.create_application(&NewJobApplication::new(job.id, seeker.id, proposal)) {
        Ok(_) => Ok(()),
        Err(RepositoryError::Duplicate(_)) => {
            Err(ServiceError::Form("You already applied to this job".to_string()))
        }
        Err(err) => {
            log::error!("Failed to apply to job {}: {err}", job.id);
            Err(err.into())
        }
    }
}

pub fn load_applicants<R>(
    repo: &R,
    user: &AuthenticatedUser,
    job_id: i32,
) -> ServiceResult<ApplicantsPageData>
where
    R: JobReader + ApplicationReader + ?Sized,
{
    let job = owned_job(repo, user, parse_job_id(job_id)?)?;

    let applicants = repo
        .list_job_applications(job.id)?
        .into_iter()
        .map(|(application, applicant)| ApplicantRow {
            application,
            email: applicant.email.into_inner(),
        })
        .collect();

    Ok(ApplicantsPageData { job, applicants })
}

/// Accepts or declines an application to one of the provider's jobs.
///
/// Returns the job the application belongs to.
pub fn set_application_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    application_id: i32,
    form: ApplicationStatusForm,
) -> ServiceResult<JobId>
where
    R: JobReader + ApplicationReader + ApplicationWriter + ?Sized,
{
    ensure_role(user, UserRole::Provider)?;

    let status = ApplicationStatus::try_from(form)?;
    let application_id = ApplicationId::new(application_id).map_err(|_| ServiceError::NotFound)?;
    let application = repo
        .get_application_by_id(application_id)?
        .ok_or(ServiceError::NotFound)?;
    let job = owned_job(repo, user, application.job_id)?;

    repo.update_application_status(application.id, status)
        .map_err(|err| {
            log::error!("Failed to update application {application_id}: {err}");
            ServiceError::from(err)
        })?;

    Ok(job.id)
}

pub fn delete_job<R>(repo: &R, user: &AuthenticatedUser, job_id: i32) -> ServiceResult<()>
where
    R: JobReader + JobWriter + ?Sized,
{
    let job = owned_job(repo, user, parse_job_id(job_id)?)?;

    repo.delete_job(job.id).map_err(|err| {
        log::error!("Failed to delete job {}: {err}", job.id);
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::Utc;

    use super::*;
    use crate::domain::application::JobApplication;
    use crate::domain::job::NewJob;
    use crate::domain::types::{JobDescription, JobName, JobPrice, UserEmail};
    use crate::domain::user::{NewUser, User};
    use crate::domain::profile::{NewProfile, Profile};
    use crate::repository::errors::RepositoryResult;
    use crate::services::test_support::user_with_roles;

    /// In-memory board with a single open job owned by `provider`.
    struct BoardRepo {
        provider: UserId,
        status: JobStatus,
        applications: RefCell<Vec<JobApplication>>,
    }

    impl BoardRepo {
        fn new(provider: UserId, status: JobStatus) -> Self {
            Self {
                provider,
                status,
                applications: RefCell::new(Vec::new()),
            }
        }

        fn job(&self) -> Job {
            Job {
                id: JobId::new(1).expect("valid id"),
                provider_id: self.provider,
                name: JobName::new("Paint fence").expect("valid name"),
                description: JobDescription::default(),
                price: JobPrice::new(100.0).expect("valid price"),
                status: self.status,
                created_at: Utc::now().naive_utc(),
                skills: Vec::new(),
            }
        }
    }

    impl JobReader for BoardRepo {
        fn get_job_by_id(&self, id: JobId) -> RepositoryResult<Option<Job>> {
            Ok((id.get() == 1).then(|| self.job()))
        }

        fn list_jobs(&self, _query: JobListQuery) -> RepositoryResult<(usize, Vec<Job>)> {
            Ok((1, vec![self.job()]))
        }
    }

    impl ApplicationReader for BoardRepo {
        fn get_application_by_id(
            &self,
            id: ApplicationId,
        ) -> RepositoryResult<Option<JobApplication>> {
            Ok(self
                .applications
                .borrow()
                .iter()
                .find(|a| a.id == id)
                .cloned())
        }

        fn get_application_for(
            &self,
            job_id: JobId,
            user_id: &UserId,
        ) -> RepositoryResult<Option<JobApplication>> {
            Ok(self
                .applications
                .borrow()
                .iter()
                .find(|a| a.job_id == job_id && &a.user_id == user_id)
                .cloned())
        }

        fn list_job_applications(
            &self,
            _job_id: JobId,
        ) -> RepositoryResult<Vec<(JobApplication, User)>> {
            Ok(Vec::new())
        }
    }

    impl ApplicationWriter for BoardRepo {
        fn create_application(
            &self,
            application: &NewJobApplication,
        ) -> RepositoryResult<JobApplication> {
            let mut applications = self.applications.borrow_mut();
            let created = JobApplication {
                id: ApplicationId::new(applications.len() as i32 + 1).expect("valid id"),
                job_id: application.job_id,
                user_id: application.user_id,
                proposal: application.proposal.clone(),
                status: ApplicationStatus::Pending,
                created_at: Utc::now().naive_utc(),
            };
            applications.push(created.clone());
            Ok(created)
        }

        fn update_application_status(
            &self,
            id: ApplicationId,
            status: ApplicationStatus,
        ) -> RepositoryResult<JobApplication> {
            let mut applications = self.applications.borrow_mut();
            let application = applications
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or(RepositoryError::NotFound)?;
            application.status = status;
            Ok(application.clone())
        }
    }

    impl JobWriter for BoardRepo {
        fn create_job(&self, _new_job: &NewJob) -> RepositoryResult<Job> {
            Ok(self.job())
        }

        fn delete_job(&self, _id: JobId) -> RepositoryResult<()> {
            Ok(())
        }
    }

    impl UserWriter for BoardRepo {
        fn upsert_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
            Ok(User {
                id: new_user.id,
                email: new_user.email.clone(),
                role: new_user.role,
                email_confirmed_at: new_user.email_confirmed_at,
                created_at: Utc::now().naive_utc(),
            })
        }

        fn delete_user(&self, _id: &UserId) -> RepositoryResult<()> {
            Ok(())
        }

        fn delete_users(&self, ids: &[UserId]) -> RepositoryResult<usize> {
            Ok(ids.len())
        }

        fn save_profile(&self, _profile: &NewProfile) -> RepositoryResult<Profile> {
            Err(RepositoryError::Unexpected("not used".to_string()))
        }
    }

    fn proposal() -> ApplyJobForm {
        ApplyJobForm {
            proposal: "I have my own ladder".to_string(),
        }
    }

    #[test]
    fn second_application_is_a_form_error() {
        let repo = BoardRepo::new(UserId::new(), JobStatus::Open);
        let seeker = user_with_roles(&["skr"]);

        apply_to_job(&repo, &seeker, 1, proposal()).expect("first application");
        let second = apply_to_job(&repo, &seeker, 1, proposal());

        assert!(matches!(second, Err(ServiceError::Form(message)) if message.contains("already")));
        assert_eq!(repo.applications.borrow().len(), 1);
    }

    #[test]
    fn closed_job_rejects_applications() {
        let repo = BoardRepo::new(UserId::new(), JobStatus::Closed);

        let result = apply_to_job(&repo, &user_with_roles(&["skr"]), 1, proposal());

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn providers_cannot_apply() {
        let repo = BoardRepo::new(UserId::new(), JobStatus::Open);

        let result = apply_to_job(&repo, &user_with_roles(&["pdr"]), 1, proposal());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn details_show_existing_application() {
        let repo = BoardRepo::new(UserId::new(), JobStatus::Open);
        let seeker = user_with_roles(&["skr"]);

        let before = load_job_details(&repo, &seeker, 1).expect("loads");
        assert!(before.can_apply);

        apply_to_job(&repo, &seeker, 1, proposal()).expect("applied");
        let after = load_job_details(&repo, &seeker, 1).expect("loads");
        assert!(!after.can_apply);
        assert!(after.application.is_some());
        assert!(!after.is_owner);
    }

    #[test]
    fn only_the_owner_decides_on_applications() {
        let owner = user_with_roles(&["pdr"]);
        let owner_id = owner.user_id().expect("valid id");
        let repo = BoardRepo::new(owner_id, JobStatus::Open);
        apply_to_job(&repo, &user_with_roles(&["skr"]), 1, proposal()).expect("applied");

        let accept = || ApplicationStatusForm {
            status: "accepted".to_string(),
        };
        let stranger = user_with_roles(&["pdr"]);
        assert!(matches!(
            set_application_status(&repo, &stranger, 1, accept()),
            Err(ServiceError::Unauthorized)
        ));

        let job_id = set_application_status(&repo, &owner, 1, accept()).expect("updated");
        assert_eq!(job_id.get(), 1);
        assert_eq!(
            repo.applications.borrow()[0].status,
            ApplicationStatus::Accepted
        );
    }

    #[test]
    fn boards_check_roles() {
        let repo = BoardRepo::new(UserId::new(), JobStatus::Open);
        let params = QueryParams::default();

        assert!(load_jobs_page(&repo, &user_with_roles(&["skr"]), JobBoard::Open, &params).is_ok());
        assert!(matches!(
            load_jobs_page(&repo, &user_with_roles(&["skr"]), JobBoard::Admin, &params),
            Err(ServiceError::Unauthorized)
        ));
        let page = load_jobs_page(&repo, &user_with_roles(&["pdr"]), JobBoard::Own, &params)
            .expect("loads");
        assert_eq!(page.return_to, "/pdr/tasks");
        assert_eq!(page.jobs.total_count, 1);
    }

    #[test]
    fn email_of_claims_is_synced() {
        let repo = BoardRepo::new(UserId::new(), JobStatus::Open);
        let seeker = user_with_roles(&["skr"]);
        let synced = sync_user(&repo, &seeker).expect("synced");
        assert_eq!(synced.email, UserEmail::new("user@example.com").expect("valid"));
    }
}
