use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::profile::{NewProfile, Profile};
use crate::domain::types::{UserId, Username};
use crate::domain::user::{NewUser, User};
use crate::models::profile::{NewProfile as DbNewProfile, Profile as DbProfile};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, UserListQuery, UserReader, UserWriter, like_pattern, row_count,
};
use crate::schema::{addresses, job_applications, job_skills, jobs, profiles, users};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: &UserId) -> RepositoryResult<Option<User>> {
        let mut conn = self.conn()?;

        let user = users::table
            .find(id.to_string())
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(User::try_from).transpose()?)
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)> {
        let mut conn = self.conn()?;

        let query_builder = || -> users::BoxedQuery<'static, Sqlite> {
            let mut items = users::table.into_boxed();
            if let Some(term) = &query.search {
                items = items.filter(users::email.like(like_pattern(term)).escape('\\'));
            }
            items
        };

        let total = row_count(query_builder().count().get_result::<i64>(&mut conn)?)?;

        let mut items = query_builder().order((users::created_at.desc(), users::id.asc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset())
                .limit(pagination.limit());
        }

        let users = items
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, users))
    }

    fn get_profile_by_user_id(&self, user_id: &UserId) -> RepositoryResult<Option<Profile>> {
        let mut conn = self.conn()?;

        let profile = profiles::table
            .filter(profiles::user_id.eq(user_id.to_string()))
            .first::<DbProfile>(&mut conn)
            .optional()?;

        Ok(profile.map(Profile::try_from).transpose()?)
    }

    fn get_profile_by_username(&self, username: &Username) -> RepositoryResult<Option<Profile>> {
        let mut conn = self.conn()?;

        let profile = profiles::table
            .filter(profiles::username.eq(username.as_str()))
            .first::<DbProfile>(&mut conn)
            .optional()?;

        Ok(profile.map(Profile::try_from).transpose()?)
    }
}

/// Removes one account and everything hanging off it.
fn delete_user_rows(conn: &mut SqliteConnection, id: &str) -> QueryResult<usize> {
    let own_jobs: Vec<i32> = jobs::table
        .filter(jobs::provider_id.eq(id))
        .select(jobs::id)
        .load(conn)?;
    let own_profiles: Vec<i32> = profiles::table
        .filter(profiles::user_id.eq(id))
        .select(profiles::id)
        .load(conn)?;

    diesel::delete(job_applications::table.filter(job_applications::user_id.eq(id)))
        .execute(conn)?;
    diesel::delete(job_applications::table.filter(job_applications::job_id.eq_any(&own_jobs)))
        .execute(conn)?;
    diesel::delete(job_skills::table.filter(job_skills::job_id.eq_any(&own_jobs)))
        .execute(conn)?;
    diesel::delete(jobs::table.filter(jobs::id.eq_any(&own_jobs))).execute(conn)?;
    diesel::delete(addresses::table.filter(addresses::profile_id.eq_any(&own_profiles)))
        .execute(conn)?;
    diesel::delete(profiles::table.filter(profiles::id.eq_any(&own_profiles))).execute(conn)?;
    diesel::delete(users::table.find(id)).execute(conn)
}

impl UserWriter for DieselRepository {
    fn upsert_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        let mut conn = self.conn()?;
        let db_user = DbNewUser::from(new_user);

        let user = conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::insert_into(users::table)
                .values(&db_user)
                .on_conflict(users::id)
                .do_update()
                .set((
                    users::email.eq(&db_user.email),
                    users::role.eq(db_user.role),
                ))
                .execute(conn)?;

            if let Some(confirmed_at) = db_user.email_confirmed_at {
                diesel::update(users::table.find(&db_user.id))
                    .filter(users::email_confirmed_at.is_null())
                    .set(users::email_confirmed_at.eq(confirmed_at))
                    .execute(conn)?;
            }

            Ok(users::table.find(&db_user.id).first::<DbUser>(conn)?)
        })?;

        Ok(User::try_from(user)?)
    }

    fn delete_user(&self, id: &UserId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let id = id.to_string();

        let deleted = conn.transaction(|conn| delete_user_rows(conn, &id))?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn delete_users(&self, ids: &[UserId]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let deleted = conn.transaction::<_, RepositoryError, _>(|conn| {
            let mut deleted = 0;
            for id in ids {
                deleted += delete_user_rows(conn, &id.to_string())?;
            }
            Ok(deleted)
        })?;

        Ok(deleted)
    }

    fn save_profile(&self, profile: &NewProfile) -> RepositoryResult<Profile> {
        let mut conn = self.conn()?;
        let db_profile = DbNewProfile::from(profile);

        diesel::insert_into(profiles::table)
            .values(&db_profile)
            .on_conflict(profiles::user_id)
            .do_update()
            .set(&db_profile)
            .execute(&mut conn)?;

        let saved = profiles::table
            .filter(profiles::user_id.eq(&db_profile.user_id))
            .first::<DbProfile>(&mut conn)?;

        Ok(Profile::try_from(saved)?)
    }
}
