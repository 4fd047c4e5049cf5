use serde::{Deserialize, Serialize};

use crate::domain::types::{ProfileId, UserId, Username};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub username: Username,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Profile {
    /// "First Last", or `N/A` when neither part is known.
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            "N/A".to_string()
        } else {
            parts.join(" ")
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewProfile {
    pub user_id: UserId,
    pub username: Username,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewProfile {
    #[must_use]
    pub fn new(
        user_id: UserId,
        username: Username,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        Self {
            user_id,
            username,
            first_name: first_name
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            last_name: last_name
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(first: Option<&str>, last: Option<&str>) -> Profile {
        Profile {
            id: ProfileId::new(1).expect("valid id"),
            user_id: UserId::new(),
            username: Username::new("ann").expect("valid username"),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
        }
    }

    #[test]
    fn full_name_joins_known_parts() {
        assert_eq!(profile(Some("Ann"), Some("Cruz")).full_name(), "Ann Cruz");
        assert_eq!(profile(None, Some("Cruz")).full_name(), "Cruz");
        assert_eq!(profile(None, None).full_name(), "N/A");
    }

    #[test]
    fn new_profile_drops_blank_names() {
        let new = NewProfile::new(
            UserId::new(),
            Username::new("ann").expect("valid username"),
            Some("  ".to_string()),
            Some(" Cruz ".to_string()),
        );
        assert_eq!(new.first_name, None);
        assert_eq!(new.last_name.as_deref(), Some("Cruz"));
    }
}
