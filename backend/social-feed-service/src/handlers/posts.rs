/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::Result;
use crate::handlers::AppState;
use crate::middleware::UserId;
use crate::response::ApiResponse;
use crate::services::CreatePostRequest;

/// Create a new post
pub async fn create_post(
    state: web::Data<AppState>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let post = state.posts.create_post(user_id.0, req.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(post, "Post created")))
}

/// Get a post by ID
pub async fn get_post(
    state: web::Data<AppState>,
    viewer: Option<UserId>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let post = state
        .posts
        .get_post(path.into_inner(), viewer.map(|v| v.0))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// Delete a post (author only)
pub async fn delete_post(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    state.posts.delete_post(post_id, user_id.0).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        serde_json::json!({ "id": post_id }),
        "Post deleted",
    )))
}
