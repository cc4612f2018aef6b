mod postgres_repository;
mod r#trait;

pub use postgres_repository::PostgresSocialRepository;
pub use r#trait::SocialRepository;

#[cfg(test)]
pub use r#trait::MockSocialRepository;
