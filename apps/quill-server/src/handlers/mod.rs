//! HTTP handlers and route configuration.

mod admin;
mod auth;
mod health;
mod posts;

use actix_web::{HttpRequest, HttpResponse, http::header::ContentType, web};

use crate::middleware::auth::RequireLogin;
use crate::middleware::error::AppError;

/// Configure all application routes.
///
/// Every admin resource is wrapped in [`RequireLogin`], so anonymous requests
/// are redirected before the path or body is looked at.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(|err, req| {
        tracing::debug!(path = %req.path(), error = %err, "Unmatched path parameter");
        AppError::NotFound(format!("No page at {}", req.path())).into()
    }))
    .app_data(web::FormConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid form: {err}")).into()
    }))
    // Public routes
    .route("/", web::get().to(posts::index))
    .route("/health", web::get().to(health::health_check))
    .route("/{post_id}/readmore", web::get().to(posts::readmore))
    .service(
        web::resource("/signup")
            .route(web::get().to(auth::signup_form))
            .route(web::post().to(auth::signup)),
    )
    .service(
        web::resource("/login")
            .route(web::get().to(auth::login_form))
            .route(web::post().to(auth::login)),
    )
    // Admin routes
    .service(
        web::resource("/admin")
            .route(web::get().to(admin::list))
            .wrap(RequireLogin),
    )
    .service(
        web::resource("/create")
            .route(web::get().to(admin::create_form))
            .route(web::post().to(admin::create))
            .wrap(RequireLogin),
    )
    .service(
        web::resource("/{post_id}/update")
            .route(web::get().to(admin::update_form))
            .route(web::post().to(admin::update))
            .wrap(RequireLogin),
    )
    .service(
        web::resource("/{post_id}/delete")
            .route(web::get().to(admin::delete))
            .route(web::post().to(admin::delete))
            .wrap(RequireLogin),
    )
    .service(
        web::resource("/logout")
            .route(web::get().to(auth::logout))
            .wrap(RequireLogin),
    )
    .default_service(web::to(not_found));
}

/// Fallback for unknown paths.
async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound(format!("No page at {}", req.path())))
}

/// 200 response carrying a rendered page.
fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}
