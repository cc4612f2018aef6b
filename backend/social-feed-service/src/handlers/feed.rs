/// Feed handler - GET /api/v1/feed
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::feed::FeedSort;
use crate::error::Result;
use crate::handlers::AppState;
use crate::middleware::UserId;
use crate::response::ApiResponse;
use crate::services::FeedQuery;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQueryParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
    #[serde(alias = "user_id")]
    pub user_id: Option<Uuid>,
}

/// Public feed of posts and reposts
pub async fn get_feed(
    state: web::Data<AppState>,
    viewer: Option<UserId>,
    params: web::Query<FeedQueryParams>,
) -> Result<HttpResponse> {
    let params = params.into_inner();
    let sort: FeedSort = params.sort.as_deref().unwrap_or_default().parse()?;

    let query = FeedQuery::new(params.page, params.limit, sort, state.feed.config())
        .with_author(params.user_id);

    let page = state.feed.get_feed(query, viewer.map(|v| v.0)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(page, "Feed retrieved")))
}
