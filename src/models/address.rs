use diesel::prelude::*;

use crate::domain::address::{Address as DomainAddress, NewAddress as DomainNewAddress};
use crate::domain::types::{AddressId, AddressPart, ProfileId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::addresses)]
pub struct Address {
    pub id: i32,
    pub profile_id: i32,
    pub region: String,
    pub province: String,
    pub city: String,
    pub barangay: String,
    pub street: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::addresses)]
pub struct NewAddress<'a> {
    pub profile_id: i32,
    pub region: &'a str,
    pub province: &'a str,
    pub city: &'a str,
    pub barangay: &'a str,
    pub street: Option<&'a str>,
}

impl TryFrom<Address> for DomainAddress {
    type Error = TypeConstraintError;

    fn try_from(address: Address) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AddressId::new(address.id)?,
            profile_id: ProfileId::new(address.profile_id)?,
            region: AddressPart::new(address.region)?,
            province: AddressPart::new(address.province)?,
            city: AddressPart::new(address.city)?,
            barangay: AddressPart::new(address.barangay)?,
            street: address.street,
        })
    }
}

impl<'a> From<&'a DomainNewAddress> for NewAddress<'a> {
    fn from(address: &'a DomainNewAddress) -> Self {
        Self {
            profile_id: address.profile_id.get(),
            region: address.region.as_str(),
            province: address.province.as_str(),
            city: address.city.as_str(),
            barangay: address.barangay.as_str(),
            street: address.street.as_deref(),
        }
    }
}
