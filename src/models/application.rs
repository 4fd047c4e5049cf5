use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::application::{
    ApplicationStatus, JobApplication as DomainJobApplication,
    NewJobApplication as DomainNewJobApplication,
};
use crate::domain::types::{ApplicationId, JobId, Proposal, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::job_applications)]
pub struct JobApplication {
    pub id: i32,
    pub job_id: i32,
    pub user_id: String,
    pub proposal: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::job_applications)]
pub struct NewJobApplication<'a> {
    pub job_id: i32,
    pub user_id: String,
    pub proposal: &'a str,
    pub status: &'static str,
    pub created_at: NaiveDateTime,
}

impl TryFrom<JobApplication> for DomainJobApplication {
    type Error = TypeConstraintError;

    fn try_from(application: JobApplication) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ApplicationId::new(application.id)?,
            job_id: JobId::new(application.job_id)?,
            user_id: application.user_id.parse::<UserId>()?,
            proposal: Proposal::new(application.proposal)?,
            status: ApplicationStatus::try_from(application.status.as_str())?,
            created_at: application.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewJobApplication> for NewJobApplication<'a> {
    fn from(application: &'a DomainNewJobApplication) -> Self {
        Self {
            job_id: application.job_id.get(),
            user_id: application.user_id.to_string(),
            proposal: application.proposal.as_str(),
            status: ApplicationStatus::Pending.as_str(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
