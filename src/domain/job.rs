use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    JobDescription, JobId, JobName, JobPrice, SkillId, SkillName, TypeConstraintError, UserId,
};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::Closed => "closed",
        }
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for JobStatus {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "open" => Ok(JobStatus::Open),
            "closed" => Ok(JobStatus::Closed),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown job status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Skill {
    pub id: SkillId,
    pub name: SkillName,
}

/// A posting published by a provider.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub provider_id: UserId,
    pub name: JobName,
    pub description: JobDescription,
    pub price: JobPrice,
    pub status: JobStatus,
    pub created_at: NaiveDateTime,
    pub skills: Vec<Skill>,
}

impl Job {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.provider_id == user_id
    }
}

#[derive(Clone, Debug)]
pub struct NewJob {
    pub provider_id: UserId,
    pub name: JobName,
    pub description: JobDescription,
    pub price: JobPrice,
    pub skills: Vec<SkillName>,
}

impl NewJob {
    /// Builds a posting, dropping duplicate skills while keeping their order.
    #[must_use]
    pub fn new(
        provider_id: UserId,
        name: JobName,
        description: JobDescription,
        price: JobPrice,
        skills: Vec<SkillName>,
    ) -> Self {
        let mut unique: Vec<SkillName> = Vec::with_capacity(skills.len());
        for skill in skills {
            if !unique
                .iter()
                .any(|known| known.as_str().eq_ignore_ascii_case(skill.as_str()))
            {
                unique.push(skill);
            }
        }

        Self {
            provider_id,
            name,
            description,
            price,
            skills: unique,
        }
    }
}
