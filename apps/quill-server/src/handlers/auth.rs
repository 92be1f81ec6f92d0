//! Signup, login and logout.

use actix_web::{HttpRequest, HttpResponse, http::header::ContentType, web};

use quill_core::domain::{NewUser, validate_username};
use quill_core::DomainError;
use quill_core::ports::{PasswordService, UserRepository};
use quill_shared::dto::CredentialsForm;

use crate::flash::{self, Flash};
use crate::middleware::auth::{
    CurrentUser, LOGIN_PATH, SESSION_COOKIE, see_other, session_cookie, session_removal_cookie,
};
use crate::middleware::error::AppResult;
use crate::state::AppState;

const SIGNUP_PATH: &str = "/signup";
const ADMIN_PATH: &str = "/admin";

/// Render a form page, consuming any pending flash message.
fn form_page(
    req: &HttpRequest,
    render: impl FnOnce(Option<Flash>) -> AppResult<String>,
) -> AppResult<HttpResponse> {
    let flash = Flash::from_request(req);
    let page = render(flash)?;

    let mut response = HttpResponse::Ok();
    response.content_type(ContentType::html());
    if req.cookie(flash::FLASH_COOKIE).is_some() {
        response.cookie(flash::removal_cookie());
    }
    Ok(response.body(page))
}

/// Redirect to `location` carrying `flash`.
fn redirect_with(location: &str, flash: Flash) -> HttpResponse {
    see_other(location).cookie(flash.cookie()).finish()
}

/// GET /signup
pub async fn signup_form(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    form_page(&req, |flash| state.views.signup(flash))
}

/// POST /signup
pub async fn signup(
    state: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> AppResult<HttpResponse> {
    let CredentialsForm { username, password } = form.into_inner();

    if validate_username(&username).is_err() || password.is_empty() {
        return Ok(redirect_with(SIGNUP_PATH, Flash::InvalidSignup));
    }

    let password_hash = state.passwords.hash(&password)?;

    // The unique index decides; there is no lookup beforehand
    let inserted = state
        .users
        .insert(NewUser::new(username, password_hash))
        .await
        .map_err(DomainError::from);

    match inserted {
        Ok(user) => {
            tracing::info!(user_id = user.id, "User signed up");
            Ok(redirect_with(LOGIN_PATH, Flash::SignedUp))
        }
        Err(DomainError::Duplicate(_)) => {
            tracing::info!("Signup rejected, username taken");
            Ok(redirect_with(SIGNUP_PATH, Flash::UsernameTaken))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /login
pub async fn login_form(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    form_page(&req, |flash| state.views.login(flash))
}

/// POST /login
///
/// An unknown user and a wrong password get the same answer.
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> AppResult<HttpResponse> {
    let CredentialsForm { username, password } = form.into_inner();

    let Some(user) = state.users.find_by_username(&username).await? else {
        tracing::info!("Login failed");
        return Ok(redirect_with(LOGIN_PATH, Flash::InvalidCredentials));
    };

    if !state.passwords.verify(&password, &user.password_hash)? {
        tracing::info!(user_id = user.id, "Login failed");
        return Ok(redirect_with(LOGIN_PATH, Flash::InvalidCredentials));
    }

    let token = state.sessions.start(&user).await?;
    tracing::info!(user_id = user.id, "User logged in");

    let cookie = session_cookie(
        token,
        state.sessions.ttl().num_seconds(),
        state.settings.cookie_secure,
    );
    Ok(see_other(ADMIN_PATH).cookie(cookie).finish())
}

/// GET /logout
pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
    user: CurrentUser,
) -> AppResult<HttpResponse> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        state.sessions.end(cookie.value()).await;
    }

    tracing::info!(user_id = user.id, "User logged out");

    Ok(see_other(LOGIN_PATH)
        .cookie(session_removal_cookie())
        .cookie(Flash::LoggedOut.cookie())
        .finish())
}
