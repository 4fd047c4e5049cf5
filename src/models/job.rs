//! Diesel models for job postings and their skills.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::job::{Job as DomainJob, JobStatus, Skill as DomainSkill};
use crate::domain::types::{
    JobDescription, JobId, JobName, JobPrice, SkillId, SkillName, TypeConstraintError, UserId,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::jobs)]
/// Diesel model for [`crate::domain::job::Job`] without its skills.
pub struct Job {
    pub id: i32,
    pub provider_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::jobs)]
pub struct NewJob<'a> {
    pub provider_id: String,
    pub name: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub status: &'static str,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::skills)]
pub struct Skill {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::skills)]
pub struct NewSkill<'a> {
    pub name: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::job_skills)]
pub struct NewJobSkill {
    pub job_id: i32,
    pub skill_id: i32,
}

impl TryFrom<Skill> for DomainSkill {
    type Error = TypeConstraintError;

    fn try_from(skill: Skill) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SkillId::new(skill.id)?,
            name: SkillName::new(skill.name)?,
        })
    }
}

impl Job {
    /// Converts into the domain job, attaching already loaded skills.
    pub fn into_domain(self, skills: Vec<DomainSkill>) -> Result<DomainJob, TypeConstraintError> {
        Ok(DomainJob {
            id: JobId::new(self.id)?,
            provider_id: self.provider_id.parse::<UserId>()?,
            name: JobName::new(self.name)?,
            description: JobDescription::new(self.description),
            price: JobPrice::new(self.price)?,
            status: JobStatus::try_from(self.status.as_str())?,
            created_at: self.created_at,
            skills,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_into_domain_keeps_skills() {
        let provider = UserId::new();
        let db = Job {
            id: 3,
            provider_id: provider.to_string(),
            name: "Paint fence".to_string(),
            description: "Two coats".to_string(),
            price: 1500.0,
            status: "open".to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        let skill = DomainSkill::try_from(Skill {
            id: 1,
            name: "Painting".to_string(),
        })
        .expect("valid skill");

        let job = db.into_domain(vec![skill]).expect("valid job");
        assert_eq!(job.id.get(), 3);
        assert!(job.is_owned_by(&provider));
        assert_eq!(job.status, JobStatus::Open);
        assert_eq!(job.skills.len(), 1);
        assert_eq!(job.price.to_string(), "1500.00");
    }

    #[test]
    fn job_with_negative_price_is_rejected() {
        let db = Job {
            id: 3,
            provider_id: UserId::new().to_string(),
            name: "Paint fence".to_string(),
            description: String::new(),
            price: -1.0,
            status: "open".to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        assert_eq!(
            db.into_domain(Vec::new()),
            Err(TypeConstraintError::InvalidPrice)
        );
    }
}
