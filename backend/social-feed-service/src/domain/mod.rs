pub mod feed;
pub mod models;
