//! Job boards and job pages.

use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::jobs::JobBoard;
use crate::forms::jobs::{AddJobForm, ApplicationStatusForm, ApplyJobForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, query_params, redirect, render_template};
use crate::services::ServiceError;
use crate::services::jobs as jobs_service;

/// Renders one of the job boards.
fn render_board(
    board: JobBoard,
    req: &HttpRequest,
    user: &AuthenticatedUser,
    repo: &DieselRepository,
    flash_messages: &IncomingFlashMessages,
    server_config: &ServerConfig,
    tera: &Tera,
) -> HttpResponse {
    let params = query_params(req);
    match jobs_service::load_jobs_page(repo, user, board, &params) {
        Ok(data) => {
            if let Some(last_page) = data.jobs.stranded_redirect() {
                return redirect(&format!("{}{last_page}", board.path()));
            }

            let mut context =
                base_context(flash_messages, user, "jobs", &server_config.auth_service_url);
            context.insert("board", &data.board);
            context.insert("board_path", board.path());
            context.insert("jobs", &data.jobs);
            context.insert("return_to", &data.return_to);

            render_template(tera, "jobs/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to render jobs: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/admin/jobs")]
pub async fn admin_jobs(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_board(
        JobBoard::Admin,
        &req,
        &user,
        &repo,
        &flash_messages,
        &server_config,
        &tera,
    )
}

#[get("/skr/tasks")]
pub async fn seeker_jobs(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_board(
        JobBoard::Open,
        &req,
        &user,
        &repo,
        &flash_messages,
        &server_config,
        &tera,
    )
}

#[get("/pdr/tasks")]
pub async fn provider_jobs(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_board(
        JobBoard::Own,
        &req,
        &user,
        &repo,
        &flash_messages,
        &server_config,
        &tera,
    )
}

#[post("/pdr/tasks/add")]
pub async fn add_job(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddJobForm>,
) -> impl Responder {
    match jobs_service::create_job(repo.get_ref(), &user, form) {
        Ok(job) => {
            FlashMessage::success(format!("Job \"{}\" posted.", job.name)).send();
            redirect(JobBoard::Own.path())
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(JobBoard::Own.path())
        }
        Err(err) => {
            log::error!("Failed to add job: {err}");
            FlashMessage::error("Failed to post the job.").send();
            redirect(JobBoard::Own.path())
        }
    }
}

#[get("/jobs/{job_id}")]
pub async fn show_job(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match jobs_service::load_job_details(repo.get_ref(), &user, job_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "jobs",
                &server_config.auth_service_url,
            );
            context.insert("job", &data.job);
            context.insert("application", &data.application);
            context.insert("is_owner", &data.is_owner);
            context.insert("can_apply", &data.can_apply);

            render_template(&tera, "jobs/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Job not found.").send();
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to render job: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/jobs/{job_id}/apply")]
pub async fn apply_job(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ApplyJobForm>,
) -> impl Responder {
    let job_id = job_id.into_inner();
    let job_url = format!("/jobs/{job_id}");

    match jobs_service::apply_to_job(repo.get_ref(), &user, job_id, form) {
        Ok(()) => {
            FlashMessage::success("Application sent.").send();
            redirect(&job_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Job not found.").send();
            redirect(JobBoard::Open.path())
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&job_url)
        }
        Err(err) => {
            log::error!("Failed to apply to job: {err}");
            FlashMessage::error("Failed to send the application.").send();
            redirect(&job_url)
        }
    }
}

#[get("/pdr/tasks/{job_id}/applicants")]
pub async fn show_applicants(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match jobs_service::load_applicants(repo.get_ref(), &user, job_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "jobs",
                &server_config.auth_service_url,
            );
            context.insert("job", &data.job);
            context.insert("applicants", &data.applicants);

            render_template(&tera, "jobs/applicants.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Job not found.").send();
            redirect(JobBoard::Own.path())
        }
        Err(err) => {
            log::error!("Failed to render applicants: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/pdr/applications/{application_id}/status")]
pub async fn update_application_status(
    application_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ApplicationStatusForm>,
) -> impl Responder {
    match jobs_service::set_application_status(
        repo.get_ref(),
        &user,
        application_id.into_inner(),
        form,
    ) {
        Ok(job_id) => {
            FlashMessage::success("Application updated.").send();
            redirect(&format!("/pdr/tasks/{job_id}/applicants"))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Application not found.").send();
            redirect(JobBoard::Own.path())
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(JobBoard::Own.path())
        }
        Err(err) => {
            log::error!("Failed to update application: {err}");
            FlashMessage::error("Failed to update the application.").send();
            redirect(JobBoard::Own.path())
        }
    }
}

#[post("/pdr/tasks/{job_id}/delete")]
pub async fn delete_job(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match jobs_service::delete_job(repo.get_ref(), &user, job_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Job deleted.").send();
            redirect(JobBoard::Own.path())
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Job not found.").send();
            redirect(JobBoard::Own.path())
        }
        Err(err) => {
            log::error!("Failed to delete job: {err}");
            FlashMessage::error("Failed to delete the job.").send();
            redirect(JobBoard::Own.path())
        }
    }
}
