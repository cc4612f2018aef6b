pub mod aggregation;
pub mod feed;
pub mod hashtag_parser;
pub mod interactions;
pub mod mapper;
pub mod posts;
pub mod ranking;
pub mod reposts;

pub use feed::{FeedQuery, FeedService};
pub use hashtag_parser::extract_hashtags;
pub use interactions::{CreateCommentRequest, InteractionService};
pub use posts::{CreatePostRequest, PostService};
