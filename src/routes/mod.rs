//! HTTP handlers and the helpers they share.

use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::Context;

use crate::dto::main::nav_routes;
use crate::list_view::QueryParams;
use crate::models::auth::AuthenticatedUser;

pub use pushkind_common::routes::{redirect, render_template};

pub mod api;
pub mod jobs;
pub mod main;
pub mod profile;
pub mod users;

/// Bootstrap alert class for a flash level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context every page template expects.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
    home_url: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context.insert("nav_routes", &nav_routes(user.role()));
    context
}

/// Query parameters of the current request.
pub fn query_params(req: &actix_web::HttpRequest) -> QueryParams {
    QueryParams::parse(req.query_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_keep_raw_order() {
        let req = actix_web::test::TestRequest::get()
            .uri("/pdr/tasks?tab=open&page=2&search=ann")
            .to_http_request();
        assert_eq!(query_params(&req).to_href(), "?tab=open&page=2&search=ann");
    }
}
