use crate::domain::address::Address;
use crate::domain::profile::Profile;
use crate::domain::verification::Verification;

pub struct ProfilePageData {
    pub email: String,
    pub profile: Option<Profile>,
    pub full_name: String,
    pub verifications: Vec<Verification>,
}

/// Public contacts card of a seeker.
pub struct SeekerCardData {
    pub profile: Profile,
    pub full_name: String,
    pub verifications: Vec<Verification>,
}

pub struct AddressPageData {
    pub addresses: Vec<Address>,
}
