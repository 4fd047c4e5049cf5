use diesel::prelude::*;

use crate::domain::application::{ApplicationStatus, JobApplication, NewJobApplication};
use crate::domain::types::{ApplicationId, JobId, UserId};
use crate::domain::user::User;
use crate::models::application::{
    JobApplication as DbJobApplication, NewJobApplication as DbNewJobApplication,
};
use crate::models::user::User as DbUser;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApplicationReader, ApplicationWriter, DieselRepository};
use crate::schema::{job_applications, users};

impl ApplicationReader for DieselRepository {
    fn get_application_by_id(
        &self,
        id: ApplicationId,
    ) -> RepositoryResult<Option<JobApplication>> {
        let mut conn = self.conn()?;

        let application = job_applications::table
            .find(id.get())
            .first::<DbJobApplication>(&mut conn)
            .optional()?;

        Ok(application.map(JobApplication::try_from).transpose()?)
    }

    fn get_application_for(
        &self,
        job_id: JobId,
        user_id: &UserId,
    ) -> RepositoryResult<Option<JobApplication>> {
        let mut conn = self.conn()?;

        let application = job_applications::table
            .filter(job_applications::job_id.eq(job_id.get()))
            .filter(job_applications::user_id.eq(user_id.to_string()))
            .first::<DbJobApplication>(&mut conn)
            .optional()?;

        Ok(application.map(JobApplication::try_from).transpose()?)
    }

    fn list_job_applications(
        &self,
        job_id: JobId,
    ) -> RepositoryResult<Vec<(JobApplication, User)>> {
        let mut conn = self.conn()?;

        let rows = job_applications::table
            .inner_join(users::table)
            .filter(job_applications::job_id.eq(job_id.get()))
            .order((job_applications::created_at.asc(), job_applications::id.asc()))
            .select((DbJobApplication::as_select(), DbUser::as_select()))
            .load::<(DbJobApplication, DbUser)>(&mut conn)?;

        let applications = rows
            .into_iter()
            .map(|(application, user)| {
                Ok((
                    JobApplication::try_from(application)?,
                    User::try_from(user)?,
                ))
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok(applications)
    }
}

impl ApplicationWriter for DieselRepository {
    fn create_application(
        &self,
        application: &NewJobApplication,
    ) -> RepositoryResult<JobApplication> {
        let mut conn = self.conn()?;

        let created = diesel::insert_into(job_applications::table)
            .values(&DbNewJobApplication::from(application))
            .get_result::<DbJobApplication>(&mut conn)?;

        Ok(JobApplication::try_from(created)?)
    }

    fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> RepositoryResult<JobApplication> {
        let mut conn = self.conn()?;

        let updated = diesel::update(job_applications::table.find(id.get()))
            .set(job_applications::status.eq(status.as_str()))
            .get_result::<DbJobApplication>(&mut conn)?;

        Ok(JobApplication::try_from(updated)?)
    }
}
