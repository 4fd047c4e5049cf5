//! JSON endpoints feeding client-side list views.

use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::query_params;
use crate::services::{ServiceError, api as api_service};

fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        err => {
            log::error!("API request failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/users")]
pub async fn api_v1_users(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::list_users(repo.get_ref(), &user, &query_params(&req)) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(err) => error_response(err),
    }
}

#[get("/v1/jobs")]
pub async fn api_v1_jobs(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::list_open_jobs(repo.get_ref(), &user, &query_params(&req)) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(err) => error_response(err),
    }
}
