//! Profile page, seeker cards and the seeker setup flow.

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::profile::{AddressForm, ProfileForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::profile::{self as profile_service, SKILLS_SETUP_PATH};

const ADDRESS_SETUP_PATH: &str = "/skr/setup/address";

#[get("/profile")]
pub async fn show_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match profile_service::load_profile(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "profile",
                &server_config.auth_service_url,
            );
            context.insert("email", &data.email);
            context.insert("profile", &data.profile);
            context.insert("full_name", &data.full_name);
            context.insert("verifications", &data.verifications);

            render_template(&tera, "profile/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to render profile: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/profile")]
pub async fn save_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ProfileForm>,
) -> impl Responder {
    match profile_service::save_profile(repo.get_ref(), &user, form) {
        Ok(()) => FlashMessage::success("Profile saved.").send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to save profile: {err}");
            FlashMessage::error("Failed to save the profile.").send();
        }
    }
    redirect("/profile")
}

#[get("/skr/setup/address")]
pub async fn show_address_setup(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match profile_service::load_addresses(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "profile",
                &server_config.auth_service_url,
            );
            context.insert("addresses", &data.addresses);

            render_template(&tera, "profile/address.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to render addresses: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/skr/setup/address")]
pub async fn save_address(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddressForm>,
) -> impl Responder {
    match profile_service::save_address(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Address saved.").send();
            redirect(SKILLS_SETUP_PATH)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(ADDRESS_SETUP_PATH)
        }
        Err(err) => {
            log::error!("Failed to save address: {err}");
            FlashMessage::error("Failed to save the address.").send();
            redirect(ADDRESS_SETUP_PATH)
        }
    }
}

#[get("/skr/setup/skills")]
pub async fn show_skills_setup(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(
        &flash_messages,
        &user,
        "profile",
        &server_config.auth_service_url,
    );

    render_template(&tera, "profile/skills.html", &context)
}

/// Registered after the fixed `/skr/...` routes so they take precedence.
#[get("/skr/{username}")]
pub async fn show_seeker_card(
    username: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match profile_service::load_seeker_card(repo.get_ref(), &username) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "profile",
                &server_config.auth_service_url,
            );
            context.insert("profile", &data.profile);
            context.insert("full_name", &data.full_name);
            context.insert("verifications", &data.verifications);

            render_template(&tera, "profile/card.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render seeker card: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
