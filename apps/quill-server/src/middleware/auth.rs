//! Login enforcement middleware and the current-user extractor.

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    cookie::{Cookie, SameSite, time},
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
    web,
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;

use quill_core::domain::User;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "quill_session";

/// Path anonymous visitors are sent to.
pub const LOGIN_PATH: &str = "/login";

/// The logged-in user, placed in request extensions by [`RequireLogin`].
///
/// Use this in handlers behind the middleware:
/// ```ignore
/// async fn admin(user: CurrentUser) -> impl Responder {
///     format!("Hello, {}!", user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl std::ops::Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => {
                tracing::error!(path = %req.path(), "CurrentUser requested outside RequireLogin");
                ready(Err(AppError::Internal(
                    "Login middleware not configured".to_string(),
                )))
            }
        }
    }
}

/// Session cookie holding `token`.
pub fn session_cookie(token: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_secs))
        .finish()
}

/// A cookie that deletes the session cookie.
pub fn session_removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// 303 redirect to `location`.
pub fn see_other(location: &str) -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, location));
    builder
}

/// Middleware that lets a request through only with a live session.
///
/// Anonymous requests are redirected to the login page before any handler
/// argument is extracted.
pub struct RequireLogin;

impl<S, B> Transform<S, ServiceRequest> for RequireLogin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireLoginService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireLoginService {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireLoginService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireLoginService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                return Err(AppError::Internal("AppState not configured".to_string()).into());
            };

            let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
            let user = match &token {
                Some(token) => state
                    .sessions
                    .resolve_current_user(token)
                    .await
                    .map_err(AppError::from)?,
                None => None,
            };

            match user {
                Some(user) => {
                    tracing::debug!(user_id = user.id, path = %req.path(), "Session accepted");
                    req.extensions_mut().insert(CurrentUser(user));
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                None => {
                    tracing::debug!(path = %req.path(), "No session, redirecting to login");
                    let mut response = see_other(LOGIN_PATH);
                    if token.is_some() {
                        response.cookie(session_removal_cookie());
                    }
                    let (http_req, _payload) = req.into_parts();
                    let srv_response = ServiceResponse::new(http_req, response.finish());
                    Ok(srv_response.map_into_right_body())
                }
            }
        })
    }
}
