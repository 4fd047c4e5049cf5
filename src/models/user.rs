//! Diesel models for locally mirrored accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, UserEmail, UserId};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser, UserRole};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: String,
    pub email: String,
    pub role: String,
    pub email_confirmed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub role: &'static str,
    pub email_confirmed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id.parse::<UserId>()?,
            email: UserEmail::new(user.email)?,
            role: UserRole::try_from(user.role.as_str())?,
            email_confirmed_at: user.email_confirmed_at,
            created_at: user.created_at,
        })
    }
}

impl From<&DomainNewUser> for NewUser {
    fn from(user: &DomainNewUser) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.code(),
            email_confirmed_at: user.email_confirmed_at,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
