use serde::{Deserialize, Serialize};

use crate::domain::types::{AddressId, AddressPart, ProfileId};

/// Philippine administrative address (region down to barangay).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub id: AddressId,
    pub profile_id: ProfileId,
    pub region: AddressPart,
    pub province: AddressPart,
    pub city: AddressPart,
    pub barangay: AddressPart,
    pub street: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewAddress {
    pub profile_id: ProfileId,
    pub region: AddressPart,
    pub province: AddressPart,
    pub city: AddressPart,
    pub barangay: AddressPart,
    pub street: Option<String>,
}
