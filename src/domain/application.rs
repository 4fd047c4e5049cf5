use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ApplicationId, JobId, Proposal, TypeConstraintError, UserId};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Declined,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Declined => "declined",
        }
    }
}

impl Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ApplicationStatus {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "pending" => Ok(ApplicationStatus::Pending),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "declined" => Ok(ApplicationStatus::Declined),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown application status: {other}"
            ))),
        }
    }
}

/// A seeker's request to take a job.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct JobApplication {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub user_id: UserId,
    pub proposal: Proposal,
    pub status: ApplicationStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewJobApplication {
    pub job_id: JobId,
    pub user_id: UserId,
    pub proposal: Proposal,
}

impl NewJobApplication {
    #[must_use]
    pub fn new(job_id: JobId, user_id: UserId, proposal: Proposal) -> Self {
        Self {
            job_id,
            user_id,
            proposal,
        }
    }
}
