/// Like, repost, follow and comment endpoints
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::handlers::AppState;
use crate::middleware::UserId;
use crate::response::ApiResponse;
use crate::services::CreateCommentRequest;

const DEFAULT_COMMENT_LIMIT: u32 = 20;
const MAX_COMMENT_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct CommentListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub async fn toggle_like(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let toggle = state
        .interactions
        .toggle_like(path.into_inner(), user_id.0)
        .await?;

    let message = if toggle.liked { "Post liked" } else { "Post unliked" };
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(toggle, message)))
}

pub async fn toggle_repost(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let toggle = state
        .interactions
        .toggle_repost(path.into_inner(), user_id.0)
        .await?;

    let message = if toggle.reposted {
        "Post reposted"
    } else {
        "Repost removed"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(toggle, message)))
}

pub async fn toggle_follow(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let toggle = state
        .interactions
        .toggle_follow(user_id.0, path.into_inner())
        .await?;

    let message = if toggle.following {
        "User followed"
    } else {
        "User unfollowed"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(toggle, message)))
}

pub async fn list_comments(
    state: web::Data<AppState>,
    viewer: Option<UserId>,
    path: web::Path<Uuid>,
    params: web::Query<CommentListParams>,
) -> Result<HttpResponse> {
    let page = params.page.unwrap_or(1);
    let limit = params
        .limit
        .unwrap_or(DEFAULT_COMMENT_LIMIT)
        .clamp(1, MAX_COMMENT_LIMIT);

    let comments = state
        .interactions
        .list_comments(path.into_inner(), viewer.map(|v| v.0), page, limit)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(comments)))
}

pub async fn create_comment(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let comment = state
        .interactions
        .add_comment(path.into_inner(), user_id.0, req.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(comment, "Comment created")))
}
