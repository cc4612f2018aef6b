//! Social feed service
//!
//! REST backend for a fitness social network: posts, likes, reposts,
//! comments and follows, plus the public feed that merges native posts with
//! repost entries and ranks them by popularity or recency.

pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod repository;
pub mod response;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use handlers::{configure_routes, AppState};
