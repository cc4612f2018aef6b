/// HTTP handlers and route table
use actix_web::{error::JsonPayloadError, error::PathError, error::QueryPayloadError, web};
use actix_web::{Error, HttpRequest};
use std::sync::Arc;

use crate::config::FeedConfig;
use crate::error::AppError;
use crate::metrics::serve_metrics;
use crate::repository::SocialRepository;
use crate::services::{FeedService, InteractionService, PostService};

pub mod feed;
pub mod health;
pub mod posts;
pub mod social;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn SocialRepository>,
    pub feed: FeedService,
    pub posts: PostService,
    pub interactions: InteractionService,
}

impl AppState {
    pub fn new(repo: Arc<dyn SocialRepository>, feed_config: FeedConfig) -> Self {
        Self {
            feed: FeedService::new(repo.clone(), feed_config),
            posts: PostService::new(repo.clone()),
            interactions: InteractionService::new(repo.clone()),
            repo,
        }
    }
}

fn query_error(err: QueryPayloadError, _: &HttpRequest) -> Error {
    AppError::Validation(format!("Invalid query parameters: {}", err)).into()
}

fn path_error(err: PathError, _: &HttpRequest) -> Error {
    AppError::Validation(format!("Invalid path parameter: {}", err)).into()
}

fn json_error(err: JsonPayloadError, _: &HttpRequest) -> Error {
    AppError::Validation(format!("Invalid request body: {}", err)).into()
}

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/metrics", web::get().to(serve_metrics))
        .route("/health", web::get().to(health::health_check))
        .route("/health/live", web::get().to(health::liveness_check))
        .service(
            web::scope("/api/v1")
                .route("/feed", web::get().to(feed::get_feed))
                .route("/posts", web::post().to(posts::create_post))
                .route("/posts/{id}", web::get().to(posts::get_post))
                .route("/posts/{id}", web::delete().to(posts::delete_post))
                .route("/posts/{id}/like", web::post().to(social::toggle_like))
                .route("/posts/{id}/repost", web::post().to(social::toggle_repost))
                .route("/posts/{id}/comments", web::get().to(social::list_comments))
                .route("/posts/{id}/comments", web::post().to(social::create_comment))
                .route("/users/{id}/follow", web::post().to(social::toggle_follow)),
        );
}
