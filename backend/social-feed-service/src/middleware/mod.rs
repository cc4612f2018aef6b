/// HTTP middleware for social-feed-service
///
/// Provides bearer token authentication and request correlation ids.
pub mod correlation_id;
pub mod jwt_auth;

pub use correlation_id::{CorrelationId, CorrelationIdMiddleware, CORRELATION_ID_HEADER};
pub use jwt_auth::{Claims, JwtAuthMiddleware, TokenValidator, UserId};
