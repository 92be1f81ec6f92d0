//! Post management behind the login.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures::TryStreamExt;

use quill_core::domain::{ImageName, NewPost, PostContent};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};
use quill_shared::dto::PostForm;

use super::html;
use crate::middleware::auth::{CurrentUser, see_other};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::post_view;

const ADMIN_PATH: &str = "/admin";

/// GET /admin - every post in store order with management links.
pub async fn list(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    let offset = state.settings.post_offset;
    let posts: Vec<_> = state
        .posts
        .list_all()
        .await?
        .into_iter()
        .map(|post| post_view(post, offset))
        .collect();

    Ok(html(state.views.admin(&user.username, &posts)?))
}

/// GET /create
pub async fn create_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let extensions: Vec<&str> = state.settings.allowed_extensions.iter().collect();
    Ok(html(state.views.create_form(&extensions)?))
}

/// A file part of the create form.
struct Upload {
    filename: String,
    bytes: Vec<u8>,
}

/// The fields of the multipart create form.
#[derive(Default)]
struct CreateSubmission {
    title: String,
    body: String,
    image: Option<Upload>,
}

/// Read the create form, refusing any part larger than `max_bytes`.
async fn read_submission(
    mut payload: Multipart,
    max_bytes: usize,
) -> AppResult<CreateSubmission> {
    let mut submission = CreateSubmission::default();

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "Field '{name}' exceeds {max_bytes} bytes"
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "title" => submission.title = text(&name, bytes)?,
            "body" => submission.body = text(&name, bytes)?,
            "img" => submission.image = Some(Upload { filename, bytes }),
            _ => tracing::debug!(field = %name, "Ignoring unknown form field"),
        }
    }

    Ok(submission)
}

fn text(name: &str, bytes: Vec<u8>) -> AppResult<String> {
    String::from_utf8(bytes)
        .map_err(|_| AppError::BadRequest(format!("Field '{name}' is not valid UTF-8")))
}

/// POST /create - multipart `title`, `body` and `img`.
pub async fn create(
    state: web::Data<AppState>,
    user: CurrentUser,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let submission = read_submission(payload, state.settings.max_upload_bytes).await?;

    let content = PostContent::new(submission.title, submission.body)?;

    let upload = submission
        .image
        .ok_or_else(|| AppError::BadRequest("An image file is required".to_string()))?;

    // An empty filename (no file chosen) fails here too
    let name = ImageName::parse(&upload.filename, &state.settings.allowed_extensions)
        .inspect_err(|_| {
            tracing::info!(filename = %upload.filename, "Rejected image upload");
        })?;

    if state.images.exists(name.as_str()).await {
        tracing::info!(filename = %name, "Overwriting existing image");
    }
    state.images.save(&name, &upload.bytes).await?;

    let post = state
        .posts
        .insert(NewPost::new(
            content,
            Some(name.into_string()),
            state.settings.post_offset,
        ))
        .await?;

    tracing::info!(post_id = post.id, user_id = user.id, "Post created");

    Ok(see_other(ADMIN_PATH).finish())
}

/// GET /{post_id}/update
pub async fn update_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| post_not_found(post_id))?;

    let view = post_view(post, state.settings.post_offset);
    Ok(html(state.views.update_form(&view)?))
}

/// POST /{post_id}/update - replace title and body only.
pub async fn update(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    if state.posts.find_by_id(post_id).await?.is_none() {
        return Err(post_not_found(post_id));
    }

    let form = form.into_inner();
    let content = PostContent::new(form.title, form.body)?;

    state
        .posts
        .update_content(post_id, content)
        .await
        .map_err(|e| not_found_or(e, post_id))?;

    tracing::info!(post_id, user_id = user.id, "Post updated");

    Ok(see_other(ADMIN_PATH).finish())
}

/// GET or POST /{post_id}/delete
///
/// The image file stays on disk; other posts may use the same name.
pub async fn delete(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    state
        .posts
        .delete(post_id)
        .await
        .map_err(|e| not_found_or(e, post_id))?;

    tracing::info!(post_id, user_id = user.id, "Post deleted");

    Ok(see_other(ADMIN_PATH).finish())
}

fn post_not_found(post_id: i32) -> AppError {
    AppError::NotFound(format!("Post {post_id} not found"))
}

fn not_found_or(err: RepoError, post_id: i32) -> AppError {
    match err {
        RepoError::NotFound => post_not_found(post_id),
        other => other.into(),
    }
}
