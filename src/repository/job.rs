use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::job::{Job, JobStatus, NewJob, Skill};
use crate::domain::types::JobId;
use crate::models::job::{
    Job as DbJob, NewJob as DbNewJob, NewJobSkill, NewSkill, Skill as DbSkill,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, JobListQuery, JobReader, JobWriter, like_pattern, row_count,
};
use crate::schema::{job_applications, job_skills, jobs, skills};

/// Skills of every job in `job_ids`, grouped by job and sorted by name.
fn load_skills(
    conn: &mut SqliteConnection,
    job_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<Skill>>> {
    let rows = job_skills::table
        .inner_join(skills::table)
        .filter(job_skills::job_id.eq_any(job_ids))
        .order(skills::name.asc())
        .select((job_skills::job_id, DbSkill::as_select()))
        .load::<(i32, DbSkill)>(conn)?;

    let mut grouped: HashMap<i32, Vec<Skill>> = HashMap::new();
    for (job_id, skill) in rows {
        grouped
            .entry(job_id)
            .or_default()
            .push(Skill::try_from(skill)?);
    }
    Ok(grouped)
}

fn attach_skills(conn: &mut SqliteConnection, rows: Vec<DbJob>) -> RepositoryResult<Vec<Job>> {
    let ids: Vec<i32> = rows.iter().map(|job| job.id).collect();
    let mut grouped = load_skills(conn, &ids)?;

    rows.into_iter()
        .map(|job| {
            let own_skills = grouped.remove(&job.id).unwrap_or_default();
            Ok(job.into_domain(own_skills)?)
        })
        .collect()
}

impl JobReader for DieselRepository {
    fn get_job_by_id(&self, id: JobId) -> RepositoryResult<Option<Job>> {
        let mut conn = self.conn()?;

        let Some(job) = jobs::table
            .find(id.get())
            .first::<DbJob>(&mut conn)
            .optional()?
        else {
            return Ok(None);
        };

        Ok(attach_skills(&mut conn, vec![job])?.pop())
    }

    fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<Job>)> {
        let mut conn = self.conn()?;

        let query_builder = || -> jobs::BoxedQuery<'static, Sqlite> {
            let mut items = jobs::table.into_boxed();
            if let Some(provider_id) = &query.provider_id {
                items = items.filter(jobs::provider_id.eq(provider_id.to_string()));
            }
            if let Some(status) = query.status {
                items = items.filter(jobs::status.eq(status.as_str()));
            }
            if let Some(term) = &query.search {
                items = items.filter(jobs::name.like(like_pattern(term)).escape('\\'));
            }
            items
        };

        let total = row_count(query_builder().count().get_result::<i64>(&mut conn)?)?;

        let mut items = query_builder().order((jobs::created_at.desc(), jobs::id.desc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset())
                .limit(pagination.limit());
        }

        let rows = items.load::<DbJob>(&mut conn)?;
        let jobs = attach_skills(&mut conn, rows)?;

        Ok((total, jobs))
    }
}

impl JobWriter for DieselRepository {
    fn create_job(&self, new_job: &NewJob) -> RepositoryResult<Job> {
        let mut conn = self.conn()?;

        let job = conn.transaction::<_, RepositoryError, _>(|conn| {
            let job = diesel::insert_into(jobs::table)
                .values(&DbNewJob {
                    provider_id: new_job.provider_id.to_string(),
                    name: new_job.name.as_str(),
                    description: new_job.description.as_str(),
                    price: new_job.price.get(),
                    status: JobStatus::Open.as_str(),
                    created_at: Utc::now().naive_utc(),
                })
                .get_result::<DbJob>(conn)?;

            for name in &new_job.skills {
                // `skills.name` is NOCASE, so this matches regardless of case.
                let existing = skills::table
                    .filter(skills::name.eq(name.as_str()))
                    .select(skills::id)
                    .first::<i32>(conn)
                    .optional()?;
                let skill_id = match existing {
                    Some(id) => id,
                    None => diesel::insert_into(skills::table)
                        .values(&NewSkill {
                            name: name.as_str(),
                        })
                        .returning(skills::id)
                        .get_result::<i32>(conn)?,
                };

                diesel::insert_into(job_skills::table)
                    .values(&NewJobSkill {
                        job_id: job.id,
                        skill_id,
                    })
                    .execute(conn)?;
            }

            Ok(job)
        })?;

        Ok(attach_skills(&mut conn, vec![job])?
            .pop()
            .ok_or(RepositoryError::NotFound)?)
    }

    fn delete_job(&self, id: JobId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(job_applications::table.filter(job_applications::job_id.eq(id.get())))
                .execute(conn)?;
            diesel::delete(job_skills::table.filter(job_skills::job_id.eq(id.get())))
                .execute(conn)?;
            Ok(diesel::delete(jobs::table.find(id.get())).execute(conn)?)
        })?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
