//! Profile, public seeker card and address setup.

use crate::domain::types::Username;
use crate::domain::user::UserRole;
use crate::domain::verification::verifications_for;
use crate::dto::profile::{AddressPageData, ProfilePageData, SeekerCardData};
use crate::forms::profile::{AddressForm, ProfileForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;
use crate::repository::{AddressReader, AddressWriter, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role, sync_user};

/// Where seekers continue after saving their address.
pub const SKILLS_SETUP_PATH: &str = "/skr/setup/skills";

pub fn load_profile<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ProfilePageData>
where
    R: UserReader + UserWriter + ?Sized,
{
    let account = sync_user(repo, user)?;
    let profile = repo.get_profile_by_user_id(&account.id)?;

    Ok(ProfilePageData {
        full_name: profile
            .as_ref()
            .map(|profile| profile.full_name())
            .unwrap_or_else(|| "N/A".to_string()),
        verifications: verifications_for(Some(&account)),
        email: account.email.into_inner(),
        profile,
    })
}

pub fn save_profile<R>(repo: &R, user: &AuthenticatedUser, form: ProfileForm) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    let account = sync_user(repo, user)?;
    let new_profile = form.into_domain(account.id)?;

    match repo.save_profile(&new_profile) {
        Ok(_) => Ok(()),
        Err(RepositoryError::Duplicate(_)) => Err(ServiceError::Form(format!(
            "Username {} is already taken",
            new_profile.username
        ))),
        Err(err) => {
            log::error!("Failed to save profile: {err}");
            Err(err.into())
        }
    }
}

/// Public card of the seeker called `username`.
pub fn load_seeker_card<R>(repo: &R, username: &str) -> ServiceResult<SeekerCardData>
where
    R: UserReader + ?Sized,
{
    let username = Username::new(username).map_err(|_| ServiceError::NotFound)?;
    let profile = repo
        .get_profile_by_username(&username)?
        .ok_or(ServiceError::NotFound)?;
    let account = repo.get_user_by_id(&profile.user_id)?;
    if account.as_ref().is_some_and(|account| account.role != UserRole::Seeker) {
        return Err(ServiceError::NotFound);
    }

    Ok(SeekerCardData {
        full_name: profile.full_name(),
        verifications: verifications_for(account.as_ref()),
        profile,
    })
}

pub fn load_addresses<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<AddressPageData>
where
    R: UserReader + AddressReader + ?Sized,
{
    ensure_role(user, UserRole::Seeker)?;

    let user_id = user.user_id().map_err(|_| ServiceError::Unauthorized)?;
    let addresses = match repo.get_profile_by_user_id(&user_id)? {
        Some(profile) => repo.list_addresses(profile.id)?,
        None => Vec::new(),
    };

    Ok(AddressPageData { addresses })
}

/// Stores a new address for the seeker's profile.
pub fn save_address<R>(repo: &R, user: &AuthenticatedUser, form: AddressForm) -> ServiceResult<()>
where
    R: UserReader + AddressWriter + ?Sized,
{
    ensure_role(user, UserRole::Seeker)?;

    let user_id = user.user_id().map_err(|_| ServiceError::Unauthorized)?;
    let profile = repo.get_profile_by_user_id(&user_id)?.ok_or_else(|| {
        ServiceError::Form("Complete your profile before adding an address".to_string())
    })?;

    let address = form.into_domain(profile.id)?;
    repo.create_address(&address).map_err(|err| {
        log::error!("Failed to save address: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}
