//! Users administration pages.

use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::safe_return_to;
use crate::forms::users::{DeleteUserForm, DeleteUsersForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, query_params, redirect, render_template};
use crate::services::ServiceError;
use crate::services::users::{self as users_service, USERS_PATH};

#[get("/admin/users")]
pub async fn show_users(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = query_params(&req);
    match users_service::load_users_page(repo.get_ref(), &user, &params) {
        Ok(data) => {
            if let Some(last_page) = data.users.stranded_redirect() {
                return redirect(&format!("{USERS_PATH}{last_page}"));
            }

            let mut context = base_context(
                &flash_messages,
                &user,
                "users",
                &server_config.auth_service_url,
            );
            context.insert("users", &data.users);
            context.insert("return_to", &data.return_to);

            render_template(&tera, "users/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to render users: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/admin/users/{user_id}")]
pub async fn show_user(
    user_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match users_service::load_user_details(repo.get_ref(), &user, &user_id) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "users",
                &server_config.auth_service_url,
            );
            context.insert("user", &data.user);
            context.insert("username", &data.username);
            context.insert("full_name", &data.full_name);

            render_template(&tera, "users/show.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("User not found.").send();
            redirect(USERS_PATH)
        }
        Err(err) => {
            log::error!("Failed to render user: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/users/{user_id}/delete")]
pub async fn delete_user(
    user_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteUserForm>,
) -> impl Responder {
    let return_to = safe_return_to(form.return_to.as_deref(), USERS_PATH);
    match users_service::delete_user(repo.get_ref(), &user, &user_id) {
        Ok(()) => {
            FlashMessage::success("User deleted.").send();
            redirect(&return_to)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("User not found.").send();
            redirect(&return_to)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&return_to)
        }
        Err(err) => {
            log::error!("Failed to delete user: {err}");
            FlashMessage::error("Failed to delete the user.").send();
            redirect(&return_to)
        }
    }
}

#[post("/admin/users/delete")]
pub async fn delete_users(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let form = match DeleteUsersForm::from_bytes(body.as_ref()) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(USERS_PATH);
        }
    };
    let return_to = safe_return_to(form.return_to.as_deref(), USERS_PATH);

    match users_service::delete_users(repo.get_ref(), &user, &form) {
        Ok(deleted) => {
            FlashMessage::success(format!("Deleted {deleted} user(s).")).send();
            redirect(&return_to)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&return_to)
        }
        Err(err) => {
            log::error!("Failed to delete users: {err}");
            FlashMessage::error("Failed to delete the selected users.").send();
            redirect(&return_to)
        }
    }
}
