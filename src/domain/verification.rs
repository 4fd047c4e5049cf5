//! Account verifications displayed on profile cards.

use serde::Serialize;

use crate::domain::user::User;

/// One verification line: whether it passed and what to show in the tooltip.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Verification {
    pub name: &'static str,
    pub verified: bool,
    pub detail: String,
}

/// Verifications of `user`. A missing user has every check unverified.
pub fn verifications_for(user: Option<&User>) -> Vec<Verification> {
    vec![Verification {
        name: "Email",
        verified: user.is_some_and(User::is_email_confirmed),
        detail: user
            .map(|user| user.email.to_string())
            .unwrap_or_else(|| "Unverified".to_string()),
    }]
}
