//! Profile and address forms.

use serde::Deserialize;
use validator::Validate;

use crate::domain::address::NewAddress;
use crate::domain::profile::NewProfile;
use crate::domain::types::{AddressPart, ProfileId, UserId, Username};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub last_name: String,
}

impl ProfileForm {
    pub fn into_domain(self, user_id: UserId) -> Result<NewProfile, FormError> {
        self.validate()?;
        let username = Username::new(self.username).map_err(|_| FormError::InvalidUsername)?;
        Ok(NewProfile::new(
            user_id,
            username,
            Some(ammonia::clean(&self.first_name)),
            Some(ammonia::clean(&self.last_name)),
        ))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddressForm {
    #[validate(length(min = 1))]
    pub region: String,
    #[validate(length(min = 1))]
    pub province: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub barangay: String,
    #[serde(default)]
    pub street: String,
}

impl AddressForm {
    pub fn into_domain(self, profile_id: ProfileId) -> Result<NewAddress, FormError> {
        self.validate()?;
        let part = |value: String| AddressPart::new(value).map_err(|_| FormError::InvalidAddress);
        let street = self.street.trim();

        Ok(NewAddress {
            profile_id,
            region: part(self.region)?,
            province: part(self.province)?,
            city: part(self.city)?,
            barangay: part(self.barangay)?,
            street: (!street.is_empty()).then(|| street.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_form_normalizes_username() {
        let form = ProfileForm {
            username: " AnnC ".to_string(),
            first_name: "Ann".to_string(),
            last_name: String::new(),
        };
        let profile = form.into_domain(UserId::new()).expect("valid form");

        assert_eq!(profile.username.as_str(), "annc");
        assert_eq!(profile.first_name.as_deref(), Some("Ann"));
        assert_eq!(profile.last_name, None);
    }

    #[test]
    fn profile_form_rejects_spaces_in_username() {
        let form = ProfileForm {
            username: "ann cruz".to_string(),
            first_name: String::new(),
            last_name: String::new(),
        };
        assert!(matches!(
            form.into_domain(UserId::new()),
            Err(FormError::InvalidUsername)
        ));
    }

    #[test]
    fn address_form_requires_every_level() {
        let profile_id = ProfileId::new(1).expect("valid id");
        let form = AddressForm {
            region: "NCR".to_string(),
            province: "Metro Manila".to_string(),
            city: "Quezon City".to_string(),
            barangay: "  ".to_string(),
            street: String::new(),
        };
        assert!(matches!(
            form.into_domain(profile_id),
            Err(FormError::InvalidAddress)
        ));

        let form = AddressForm {
            region: "NCR".to_string(),
            province: "Metro Manila".to_string(),
            city: "Quezon City".to_string(),
            barangay: "Bagumbayan".to_string(),
            street: " 12 Mabini St ".to_string(),
        };
        let address = form.into_domain(profile_id).expect("valid form");
        assert_eq!(address.street.as_deref(), Some("12 Mabini St"));
    }
}
