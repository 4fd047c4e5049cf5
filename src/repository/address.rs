use diesel::prelude::*;

use crate::domain::address::{Address, NewAddress};
use crate::domain::types::ProfileId;
use crate::models::address::{Address as DbAddress, NewAddress as DbNewAddress};
use crate::repository::errors::RepositoryResult;
use crate::repository::{AddressReader, AddressWriter, DieselRepository};
use crate::schema::addresses;

impl AddressReader for DieselRepository {
    fn list_addresses(&self, profile_id: ProfileId) -> RepositoryResult<Vec<Address>> {
        let mut conn = self.conn()?;

        let rows = addresses::table
            .filter(addresses::profile_id.eq(profile_id.get()))
            .order(addresses::id.asc())
            .load::<DbAddress>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(Address::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }
}

impl AddressWriter for DieselRepository {
    fn create_address(&self, address: &NewAddress) -> RepositoryResult<Address> {
        let mut conn = self.conn()?;

        let created = diesel::insert_into(addresses::table)
            .values(&DbNewAddress::from(address))
            .get_result::<DbAddress>(&mut conn)?;

        Ok(Address::try_from(created)?)
    }
}
