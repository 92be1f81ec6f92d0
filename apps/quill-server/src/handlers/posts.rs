//! Public post pages.

use actix_web::{HttpResponse, web};
use quill_core::ports::{BaseRepository, PostRepository};

use super::html;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::post_view;

/// GET / - every post, newest first.
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let offset = state.settings.post_offset;
    let posts: Vec<_> = state
        .posts
        .list_ordered()
        .await?
        .into_iter()
        .map(|post| post_view(post, offset))
        .collect();

    let page = state.views.index(&posts)?;
    Ok(html(page))
}

/// GET /{post_id}/readmore
pub async fn readmore(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

    let page = state
        .views
        .readmore(&post_view(post, state.settings.post_offset))?;
    Ok(html(page))
}
