//! Forms for posting jobs, applying to them and reviewing applicants.

use serde::Deserialize;
use validator::Validate;

use crate::domain::application::ApplicationStatus;
use crate::domain::job::NewJob;
use crate::domain::types::{JobDescription, JobName, JobPrice, Proposal, SkillName, UserId};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct AddJobForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    pub price: String,
    /// Comma-separated skill names.
    #[serde(default)]
    pub skills: String,
}

/// Validated job data, ready to be bound to its provider.
#[derive(Debug)]
pub struct AddJobPayload {
    pub name: JobName,
    pub description: JobDescription,
    pub price: JobPrice,
    pub skills: Vec<SkillName>,
}

impl TryFrom<AddJobForm> for AddJobPayload {
    type Error = FormError;

    fn try_from(form: AddJobForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = JobName::new(ammonia::clean(&form.name)).map_err(|_| FormError::InvalidName)?;
        let price = form
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(|price| JobPrice::new(price).ok())
            .ok_or(FormError::InvalidPrice)?;
        let skills = form
            .skills
            .split(',')
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(|skill| SkillName::new(ammonia::clean(skill)).map_err(|_| FormError::InvalidSkill))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name,
            description: JobDescription::new(form.description),
            price,
            skills,
        })
    }
}

impl AddJobPayload {
    pub fn into_domain(self, provider_id: UserId) -> NewJob {
        NewJob::new(provider_id, self.name, self.description, self.price, self.skills)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApplyJobForm {
    #[validate(length(min = 1, max = 5000))]
    pub proposal: String,
}

impl TryFrom<ApplyJobForm> for Proposal {
    type Error = FormError;

    fn try_from(form: ApplyJobForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Proposal::new(form.proposal).map_err(|_| FormError::InvalidProposal)
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationStatusForm {
    pub status: String,
}

impl TryFrom<ApplicationStatusForm> for ApplicationStatus {
    type Error = FormError;

    /// Only a decision can be posted; `pending` is the initial state.
    fn try_from(form: ApplicationStatusForm) -> Result<Self, Self::Error> {
        match ApplicationStatus::try_from(form.status.as_str()) {
            Ok(status @ (ApplicationStatus::Accepted | ApplicationStatus::Declined)) => Ok(status),
            _ => Err(FormError::InvalidStatus),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_form(price: &str, skills: &str) -> AddJobForm {
        AddJobForm {
            name: "Fix the sink".to_string(),
            description: "Kitchen <script>alert(1)</script>sink".to_string(),
            price: price.to_string(),
            skills: skills.to_string(),
        }
    }

    #[test]
    fn job_form_parses_skills_and_sanitizes() {
        let payload =
            AddJobPayload::try_from(job_form(" 1500.50 ", "Plumbing, , plumbing ,Tiling"))
                .expect("valid form");

        assert_eq!(payload.price.get(), 1500.5);
        assert_eq!(payload.description.as_str(), "Kitchen sink");

        let job = payload.into_domain(UserId::new());
        let skills: Vec<&str> = job.skills.iter().map(|s| s.as_str()).collect();
        assert_eq!(skills, vec!["Plumbing", "Tiling"]);
    }

    #[test]
    fn job_form_rejects_bad_price() {
        assert!(matches!(
            AddJobPayload::try_from(job_form("-5", "")),
            Err(FormError::InvalidPrice)
        ));
        assert!(matches!(
            AddJobPayload::try_from(job_form("cheap", "")),
            Err(FormError::InvalidPrice)
        ));
    }

    #[test]
    fn blank_proposal_is_rejected() {
        let form = ApplyJobForm {
            proposal: "<script>alert(1)</script>".to_string(),
        };
        assert!(Proposal::try_from(form).is_err());
    }

    #[test]
    fn status_form_accepts_only_decisions() {
        let parse = |status: &str| {
            ApplicationStatus::try_from(ApplicationStatusForm {
                status: status.to_string(),
            })
        };
        assert!(matches!(parse("accepted"), Ok(ApplicationStatus::Accepted)));
        assert!(matches!(parse("declined"), Ok(ApplicationStatus::Declined)));
        assert!(matches!(parse("pending"), Err(FormError::InvalidStatus)));
    }
}
