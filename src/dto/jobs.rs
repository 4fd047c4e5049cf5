//! DTOs for the job boards and job pages.

use serde::Serialize;

use crate::domain::application::JobApplication;
use crate::domain::job::Job;
use crate::pagination::Paginated;

/// Which slice of the job table a board shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobBoard {
    /// Every job, for administrators.
    Admin,
    /// Open jobs, for seekers.
    Open,
    /// The provider's own postings.
    Own,
}

impl JobBoard {
    pub fn path(&self) -> &'static str {
        match self {
            JobBoard::Admin => "/admin/jobs",
            JobBoard::Open => "/skr/tasks",
            JobBoard::Own => "/pdr/tasks",
        }
    }
}

pub struct JobsPageData {
    pub board: JobBoard,
    pub jobs: Paginated<Job>,
    pub return_to: String,
}

pub struct JobDetailsData {
    pub job: Job,
    pub application: Option<JobApplication>,
    pub is_owner: bool,
    pub can_apply: bool,
}

#[derive(Debug, Serialize)]
pub struct ApplicantRow {
    pub application: JobApplication,
    pub email: String,
}

pub struct ApplicantsPageData {
    pub job: Job,
    pub applicants: Vec<ApplicantRow>,
}
