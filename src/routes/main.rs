use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::user::UserRole;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template};

/// Sends every role to its landing board.
#[get("/")]
pub async fn show_index(user: AuthenticatedUser) -> impl Responder {
    match user.role() {
        Some(UserRole::Admin) => redirect("/admin/users"),
        Some(UserRole::Provider) => redirect("/pdr/tasks"),
        Some(UserRole::Seeker) => redirect("/skr/tasks"),
        None => redirect("/na"),
    }
}

#[get("/skr")]
pub async fn seeker_home() -> impl Responder {
    redirect("/skr/tasks")
}

#[get("/pdr")]
pub async fn provider_home() -> impl Responder {
    redirect("/pdr/tasks")
}

#[get("/na")]
pub async fn not_assigned(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(
        &flash_messages,
        &user,
        "index",
        &server_config.auth_service_url,
    );

    render_template(&tera, "main/not_assigned.html", &context)
}
