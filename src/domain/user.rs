use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, UserEmail, UserId};

/// Marketplace persona attached to an account.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UserRole {
    /// Job seeker (SKR).
    Seeker,
    /// Job provider (PDR).
    Provider,
    Admin,
}

impl UserRole {
    /// Short code stored in the database and in token claims.
    pub fn code(&self) -> &'static str {
        match self {
            UserRole::Seeker => "skr",
            UserRole::Provider => "pdr",
            UserRole::Admin => "admin",
        }
    }

    /// Label shown in tables.
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Seeker => "Seeker",
            UserRole::Provider => "Provider",
            UserRole::Admin => "Administrator",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<&str> for UserRole {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "skr" => Ok(UserRole::Seeker),
            "pdr" => Ok(UserRole::Provider),
            "admin" => Ok(UserRole::Admin),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown role: {other}"
            ))),
        }
    }
}

/// Local mirror of an account managed by the auth service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: UserEmail,
    pub role: UserRole,
    pub email_confirmed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl User {
    pub fn is_email_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }
}

/// Account data upserted whenever a signed-in user is seen.
#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub id: UserId,
    pub email: UserEmail,
    pub role: UserRole,
    pub email_confirmed_at: Option<NaiveDateTime>,
}

impl NewUser {
    #[must_use]
    pub fn new(
        id: UserId,
        email: UserEmail,
        role: UserRole,
        email_confirmed_at: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            id,
            email,
            role,
            email_confirmed_at,
        }
    }
}
