use diesel::prelude::*;

use crate::domain::profile::{NewProfile as DomainNewProfile, Profile as DomainProfile};
use crate::domain::types::{ProfileId, TypeConstraintError, UserId, Username};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::profiles)]
pub struct Profile {
    pub id: i32,
    pub user_id: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(treat_none_as_null = true)]
pub struct NewProfile<'a> {
    pub user_id: String,
    pub username: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}

impl TryFrom<Profile> for DomainProfile {
    type Error = TypeConstraintError;

    fn try_from(profile: Profile) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProfileId::new(profile.id)?,
            user_id: profile.user_id.parse::<UserId>()?,
            username: Username::new(profile.username)?,
            first_name: profile.first_name,
            last_name: profile.last_name,
        })
    }
}

impl<'a> From<&'a DomainNewProfile> for NewProfile<'a> {
    fn from(profile: &'a DomainNewProfile) -> Self {
        Self {
            user_id: profile.user_id.to_string(),
            username: profile.username.as_str(),
            first_name: profile.first_name.as_deref(),
            last_name: profile.last_name.as_deref(),
        }
    }
}
