use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::SocialRepository;
use crate::domain::models::{
    Comment, CommentRecord, NewPost, Post, PostRecord, Profile, Repost, WorkoutSummary,
};
use crate::error::{AppError, Result};

/// Columns selected for a post with its author and workout joins
const POST_SELECT: &str = r#"
    SELECT p.id, p.user_id, p.content, p.image_urls, p.hashtags, p.workout_id, p.is_public,
           p.likes_count, p.comments_count, p.shares_count, p.reposts_count,
           p.created_at, p.updated_at,
           a.id AS author_id, a.username AS author_username,
           a.full_name AS author_full_name, a.avatar_url AS author_avatar_url,
           w.id AS workout_ref_id, w.name AS workout_name, w.workout_type,
           w.duration_minutes, w.calories_burned
    FROM posts p
    LEFT JOIN profiles a ON a.id = p.user_id
    LEFT JOIN workouts w ON w.id = p.workout_id
"#;

/// Flat row produced by `POST_SELECT`
#[derive(Debug, sqlx::FromRow)]
struct PostJoinRow {
    id: Uuid,
    user_id: Uuid,
    content: String,
    image_urls: Option<Vec<String>>,
    hashtags: Option<Vec<String>>,
    workout_id: Option<Uuid>,
    is_public: Option<bool>,
    likes_count: i32,
    comments_count: i32,
    shares_count: i32,
    reposts_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_id: Option<Uuid>,
    author_username: Option<String>,
    author_full_name: Option<String>,
    author_avatar_url: Option<String>,
    workout_ref_id: Option<Uuid>,
    workout_name: Option<String>,
    workout_type: Option<String>,
    duration_minutes: Option<i32>,
    calories_burned: Option<i32>,
}

impl From<PostJoinRow> for PostRecord {
    fn from(row: PostJoinRow) -> Self {
        let author = match (row.author_id, row.author_username) {
            (Some(id), Some(username)) => Some(Profile {
                id,
                username,
                full_name: row.author_full_name,
                avatar_url: row.author_avatar_url,
            }),
            _ => None,
        };

        let workout = match (row.workout_ref_id, row.workout_name) {
            (Some(id), Some(name)) => Some(WorkoutSummary {
                id,
                name,
                workout_type: row.workout_type,
                duration_minutes: row.duration_minutes,
                calories_burned: row.calories_burned,
            }),
            _ => None,
        };

        PostRecord {
            post: Post {
                id: row.id,
                user_id: row.user_id,
                content: row.content,
                image_urls: row.image_urls,
                hashtags: row.hashtags,
                workout_id: row.workout_id,
                is_public: row.is_public,
                likes_count: row.likes_count,
                comments_count: row.comments_count,
                shares_count: row.shares_count,
                reposts_count: row.reposts_count,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            author,
            workout,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CommentJoinRow {
    id: Uuid,
    post_id: Uuid,
    user_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    author_id: Option<Uuid>,
    author_username: Option<String>,
    author_full_name: Option<String>,
    author_avatar_url: Option<String>,
}

impl From<CommentJoinRow> for CommentRecord {
    fn from(row: CommentJoinRow) -> Self {
        let author = match (row.author_id, row.author_username) {
            (Some(id), Some(username)) => Some(Profile {
                id,
                username,
                full_name: row.author_full_name,
                avatar_url: row.author_avatar_url,
            }),
            _ => None,
        };

        CommentRecord {
            comment: Comment {
                id: row.id,
                post_id: row.post_id,
                user_id: row.user_id,
                content: row.content,
                created_at: row.created_at,
            },
            author,
        }
    }
}

/// PostgreSQL implementation of [`SocialRepository`]
#[derive(Clone)]
pub struct PostgresSocialRepository {
    pool: PgPool,
}

impl PostgresSocialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_where(&self, sql: &str, id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl SocialRepository for PostgresSocialRepository {
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_public_posts(
        &self,
        author_id: Option<Uuid>,
        limit: Option<i64>,
    ) -> Result<Vec<PostRecord>> {
        // LIMIT NULL is LIMIT ALL
        let sql = format!(
            r#"{}
            WHERE p.is_public IS NOT FALSE
              AND ($1::uuid IS NULL OR p.user_id = $1)
            ORDER BY p.created_at DESC
            LIMIT $2
            "#,
            POST_SELECT
        );

        let rows = sqlx::query_as::<_, PostJoinRow>(&sql)
            .bind(author_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), ?author_id, "loaded public posts");
        Ok(rows.into_iter().map(PostRecord::from).collect())
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<PostRecord>> {
        let sql = format!("{} WHERE p.id = $1", POST_SELECT);

        let row = sqlx::query_as::<_, PostJoinRow>(&sql)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PostRecord::from))
    }

    async fn create_post(&self, new_post: NewPost) -> Result<PostRecord> {
        let post_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO posts (user_id, content, image_urls, hashtags, workout_id, is_public)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(new_post.user_id)
        .bind(&new_post.content)
        .bind(&new_post.image_urls)
        .bind(&new_post.hashtags)
        .bind(new_post.workout_id)
        .bind(new_post.is_public)
        .fetch_one(&self.pool)
        .await?;

        debug!(%post_id, user_id = %new_post.user_id, "created post");

        self.find_post(post_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Post {} vanished after insert", post_id)))
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, username, full_name, avatar_url
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn is_following(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM follows
                WHERE follower_id = $1 AND following_id = $2
            )
            "#,
        )
        .bind(follower_id)
        .bind(followee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO follows (follower_id, following_id)
            VALUES ($1, $2)
            ON CONFLICT (follower_id, following_id) DO NOTHING
            "#,
        )
        .bind(follower_id)
        .bind(followee_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
                .bind(follower_id)
                .bind(followee_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_followers(&self, user_id: Uuid) -> Result<i64> {
        self.count_where("SELECT COUNT(*) FROM follows WHERE following_id = $1", user_id)
            .await
    }

    async fn count_likes(&self, post_id: Uuid) -> Result<i64> {
        self.count_where("SELECT COUNT(*) FROM post_likes WHERE post_id = $1", post_id)
            .await
    }

    async fn count_comments(&self, post_id: Uuid) -> Result<i64> {
        self.count_where("SELECT COUNT(*) FROM post_comments WHERE post_id = $1", post_id)
            .await
    }

    async fn count_reposts(&self, post_id: Uuid) -> Result<i64> {
        self.count_where("SELECT COUNT(*) FROM reposts WHERE post_id = $1", post_id)
            .await
    }

    async fn has_liked(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM post_likes
                WHERE post_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO post_likes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        if inserted {
            sqlx::query("UPDATE posts SET likes_count = likes_count + 1 WHERE id = $1")
                .bind(post_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn delete_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if deleted {
            sqlx::query(
                "UPDATE posts SET likes_count = GREATEST(likes_count - 1, 0) WHERE id = $1",
            )
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }

    async fn list_reposts(&self) -> Result<Vec<Repost>> {
        let reposts = sqlx::query_as::<_, Repost>(
            r#"
            SELECT id, post_id, user_id, created_at
            FROM reposts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reposts)
    }

    async fn has_reposted(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reposts
                WHERE post_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create_repost(&self, post_id: Uuid, user_id: Uuid) -> Result<Repost> {
        let mut tx = self.pool.begin().await?;

        let repost = sqlx::query_as::<_, Repost>(
            r#"
            INSERT INTO reposts (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            RETURNING id, post_id, user_id, created_at
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::Conflict("Post already reposted".to_string()))?;

        // Increment in SQL, never read-then-write
        sqlx::query("UPDATE posts SET reposts_count = reposts_count + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(repost)
    }

    async fn delete_repost(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM reposts WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if deleted {
            sqlx::query(
                "UPDATE posts SET reposts_count = GREATEST(reposts_count - 1, 0) WHERE id = $1",
            )
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }

    async fn list_comments(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentRecord>> {
        let rows = sqlx::query_as::<_, CommentJoinRow>(
            r#"
            SELECT c.id, c.post_id, c.user_id, c.content, c.created_at,
                   a.id AS author_id, a.username AS author_username,
                   a.full_name AS author_full_name, a.avatar_url AS author_avatar_url
            FROM post_comments c
            LEFT JOIN profiles a ON a.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(post_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRecord::from).collect())
    }

    async fn create_comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        content: String,
    ) -> Result<CommentRecord> {
        let mut tx = self.pool.begin().await?;

        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO post_comments (post_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, user_id, content, created_at
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(&content)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE posts SET comments_count = comments_count + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let author = self.find_profile(user_id).await?;
        Ok(CommentRecord { comment, author })
    }
}
