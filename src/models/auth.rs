//! Signed-in user extracted from the identity cookie.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, UserEmail, UserId};
use crate::domain::user::{NewUser, UserRole};
use crate::models::config::ServerConfig;

/// Claims carried by the token issued by the auth service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Moves the expiration `days` into the future.
    pub fn set_expiration(&mut self, days: i64) {
        let expiration = Utc::now() + Duration::days(days);
        self.exp = usize::try_from(expiration.timestamp()).unwrap_or_default();
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let validation = Validation::default();
        decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
    }

    pub fn user_id(&self) -> Result<UserId, TypeConstraintError> {
        self.sub.parse()
    }

    /// Marketplace role granted by the token. Admin wins over provider,
    /// provider wins over seeker.
    pub fn role(&self) -> Option<UserRole> {
        [UserRole::Admin, UserRole::Provider, UserRole::Seeker]
            .into_iter()
            .find(|role| self.roles.iter().any(|r| r == role.code()))
    }

    /// Local account record mirroring these claims.
    pub fn to_new_user(&self) -> Result<NewUser, TypeConstraintError> {
        let role = self.role().ok_or_else(|| {
            TypeConstraintError::InvalidValue("token carries no marketplace role".to_string())
        })?;
        let confirmed_at = self.email_verified.then(|| Utc::now().naive_utc());
        Ok(NewUser::new(
            self.user_id()?,
            UserEmail::new(self.email.as_str())?,
            role,
            confirmed_at,
        ))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::error!("ServerConfig is not registered as app data");
            return ready(Err(actix_web::error::ErrorInternalServerError(
                "missing configuration",
            )));
        };

        let Ok(token) = req.get_identity().and_then(|identity| identity.id()) else {
            return ready(Err(actix_web::error::ErrorUnauthorized("not signed in")));
        };

        ready(
            Self::from_jwt(&token, &config.secret).map_err(|err| {
                log::warn!("Rejected identity token: {err}");
                actix_web::error::ErrorUnauthorized("invalid token")
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(roles: &[&str]) -> AuthenticatedUser {
        let mut user = AuthenticatedUser {
            sub: UserId::new().to_string(),
            email: "ann@example.com".to_string(),
            name: "Ann".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            email_verified: true,
            exp: 0,
        };
        user.set_expiration(1);
        user
    }

    #[test]
    fn jwt_round_trip() {
        let user = claims(&["skr"]);
        let token = user.to_jwt("secret").expect("encodes");

        assert_eq!(AuthenticatedUser::from_jwt(&token, "secret").ok(), Some(user));
        assert!(AuthenticatedUser::from_jwt(&token, "other").is_err());
    }

    #[test]
    fn admin_role_takes_precedence() {
        assert_eq!(claims(&["skr", "admin"]).role(), Some(UserRole::Admin));
        assert_eq!(claims(&["skr", "pdr"]).role(), Some(UserRole::Provider));
        assert_eq!(claims(&["crm"]).role(), None);
    }

    #[test]
    fn new_user_mirrors_claims() {
        let user = claims(&["pdr"]);
        let new_user = user.to_new_user().expect("valid claims");

        assert_eq!(new_user.id.to_string(), user.sub);
        assert_eq!(new_user.role, UserRole::Provider);
        assert!(new_user.email_confirmed_at.is_some());
        assert!(claims(&[]).to_new_user().is_err());
    }
}
