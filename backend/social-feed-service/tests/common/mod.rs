//! In-memory `SocialRepository` used by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

use social_feed_service::domain::models::{
    Comment, CommentRecord, NewPost, Post, PostRecord, Profile, Repost, WorkoutSummary,
};
use social_feed_service::error::{AppError, Result};
use social_feed_service::repository::SocialRepository;

/// Fixed origin so ordering assertions do not depend on wall-clock time
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes)
}

#[derive(Default)]
struct State {
    posts: Vec<Post>,
    profiles: HashMap<Uuid, Profile>,
    workouts: HashMap<Uuid, WorkoutSummary>,
    likes: HashSet<(Uuid, Uuid)>,
    comments: Vec<Comment>,
    reposts: Vec<Repost>,
    follows: HashSet<(Uuid, Uuid)>,
}

#[derive(Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
    fail_counts: Mutex<bool>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_profile(&self, username: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().profiles.insert(
            id,
            Profile {
                id,
                username: username.to_string(),
                full_name: None,
                avatar_url: None,
            },
        );
        id
    }

    pub fn add_workout(&self, name: &str, duration_minutes: i32) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().workouts.insert(
            id,
            WorkoutSummary {
                id,
                name: name.to_string(),
                workout_type: Some("strength".to_string()),
                duration_minutes: Some(duration_minutes),
                calories_burned: None,
            },
        );
        id
    }

    pub fn add_post(&self, author: Uuid, content: &str, minutes: i64) -> Uuid {
        self.add_post_with_visibility(author, content, minutes, Some(true))
    }

    pub fn add_post_with_visibility(
        &self,
        author: Uuid,
        content: &str,
        minutes: i64,
        is_public: Option<bool>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().posts.push(Post {
            id,
            user_id: author,
            content: content.to_string(),
            image_urls: None,
            hashtags: None,
            workout_id: None,
            is_public,
            likes_count: 0,
            comments_count: 0,
            shares_count: 0,
            reposts_count: 0,
            created_at: at(minutes),
            updated_at: at(minutes),
        });
        id
    }

    pub fn attach_workout(&self, post_id: Uuid, workout_id: Uuid) {
        let mut state = self.state.lock().unwrap();
        if let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) {
            post.workout_id = Some(workout_id);
        }
    }

    pub fn set_visibility(&self, post_id: Uuid, is_public: Option<bool>) {
        let mut state = self.state.lock().unwrap();
        if let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) {
            post.is_public = is_public;
        }
    }

    /// Adds `n` likes from fresh users
    pub fn add_likes(&self, post_id: Uuid, n: usize) {
        let mut state = self.state.lock().unwrap();
        for _ in 0..n {
            state.likes.insert((post_id, Uuid::new_v4()));
        }
    }

    pub fn add_like(&self, post_id: Uuid, user_id: Uuid) {
        self.state.lock().unwrap().likes.insert((post_id, user_id));
    }

    pub fn add_comments(&self, post_id: Uuid, n: usize) {
        let mut state = self.state.lock().unwrap();
        for i in 0..n {
            state.comments.push(Comment {
                id: Uuid::new_v4(),
                post_id,
                user_id: Uuid::new_v4(),
                content: format!("comment {}", i),
                created_at: at(i as i64),
            });
        }
    }

    pub fn add_repost(&self, post_id: Uuid, user_id: Uuid, minutes: i64) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().reposts.push(Repost {
            id,
            post_id,
            user_id,
            created_at: at(minutes),
        });
        id
    }

    pub fn add_follow(&self, follower_id: Uuid, followee_id: Uuid) {
        self.state
            .lock()
            .unwrap()
            .follows
            .insert((follower_id, followee_id));
    }

    /// Deletes the post row only; repost events keep pointing at it
    pub fn remove_post_row(&self, post_id: Uuid) {
        self.state.lock().unwrap().posts.retain(|p| p.id != post_id);
    }

    /// Overwrites the denormalized counters on the post row without touching
    /// the like, comment or repost rows
    pub fn set_stored_counters(&self, post_id: Uuid, likes: i32, comments: i32, reposts: i32) {
        let mut state = self.state.lock().unwrap();
        if let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) {
            post.likes_count = likes;
            post.comments_count = comments;
            post.reposts_count = reposts;
        }
    }

    /// Denormalized counter as stored on the post row
    pub fn stored_reposts_count(&self, post_id: Uuid) -> Option<i32> {
        self.state
            .lock()
            .unwrap()
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .map(|p| p.reposts_count)
    }

    /// Makes every count query fail with a database error
    pub fn fail_counts(&self) {
        *self.fail_counts.lock().unwrap() = true;
    }

    fn check_counts(&self) -> Result<()> {
        if *self.fail_counts.lock().unwrap() {
            return Err(AppError::Database("connection reset by peer".to_string()));
        }
        Ok(())
    }

    fn record(state: &State, post: &Post) -> PostRecord {
        PostRecord {
            post: post.clone(),
            author: state.profiles.get(&post.user_id).cloned(),
            workout: post.workout_id.and_then(|id| state.workouts.get(&id).cloned()),
        }
    }
}

#[async_trait]
impl SocialRepository for InMemoryRepository {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    async fn list_public_posts(
        &self,
        author_id: Option<Uuid>,
        limit: Option<i64>,
    ) -> Result<Vec<PostRecord>> {
        let state = self.state.lock().unwrap();
        let mut posts: Vec<&Post> = state
            .posts
            .iter()
            .filter(|p| p.is_public != Some(false))
            .filter(|p| author_id.map_or(true, |a| p.user_id == a))
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(posts
            .into_iter()
            .take(limit.map_or(usize::MAX, |l| l.max(0) as usize))
            .map(|p| Self::record(&state, p))
            .collect())
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<PostRecord>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .map(|p| Self::record(&state, p)))
    }

    async fn create_post(&self, new_post: NewPost) -> Result<PostRecord> {
        let mut state = self.state.lock().unwrap();
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            user_id: new_post.user_id,
            content: new_post.content,
            image_urls: Some(new_post.image_urls),
            hashtags: Some(new_post.hashtags),
            workout_id: new_post.workout_id,
            is_public: Some(new_post.is_public),
            likes_count: 0,
            comments_count: 0,
            shares_count: 0,
            reposts_count: 0,
            created_at: now,
            updated_at: now,
        };
        state.posts.push(post.clone());
        Ok(Self::record(&state, &post))
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.posts.len();
        state.posts.retain(|p| p.id != post_id);
        if state.posts.len() == before {
            return Ok(false);
        }
        state.likes.retain(|(p, _)| *p != post_id);
        state.comments.retain(|c| c.post_id != post_id);
        state.reposts.retain(|r| r.post_id != post_id);
        Ok(true)
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        Ok(self.state.lock().unwrap().profiles.get(&user_id).cloned())
    }

    async fn is_following(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .follows
            .contains(&(follower_id, followee_id)))
    }

    async fn create_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .follows
            .insert((follower_id, followee_id)))
    }

    async fn delete_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .follows
            .remove(&(follower_id, followee_id)))
    }

    async fn count_followers(&self, user_id: Uuid) -> Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(state.follows.iter().filter(|(_, f)| *f == user_id).count() as i64)
    }

    async fn count_likes(&self, post_id: Uuid) -> Result<i64> {
        self.check_counts()?;
        let state = self.state.lock().unwrap();
        Ok(state.likes.iter().filter(|(p, _)| *p == post_id).count() as i64)
    }

    async fn count_comments(&self, post_id: Uuid) -> Result<i64> {
        self.check_counts()?;
        let state = self.state.lock().unwrap();
        Ok(state.comments.iter().filter(|c| c.post_id == post_id).count() as i64)
    }

    async fn count_reposts(&self, post_id: Uuid) -> Result<i64> {
        self.check_counts()?;
        let state = self.state.lock().unwrap();
        Ok(state.reposts.iter().filter(|r| r.post_id == post_id).count() as i64)
    }

    async fn has_liked(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self.state.lock().unwrap().likes.contains(&(post_id, user_id)))
    }

    async fn create_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self.state.lock().unwrap().likes.insert((post_id, user_id)))
    }

    async fn delete_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self.state.lock().unwrap().likes.remove(&(post_id, user_id)))
    }

    async fn list_reposts(&self) -> Result<Vec<Repost>> {
        let mut reposts = self.state.lock().unwrap().reposts.clone();
        reposts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reposts)
    }

    async fn has_reposted(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .reposts
            .iter()
            .any(|r| r.post_id == post_id && r.user_id == user_id))
    }

    async fn create_repost(&self, post_id: Uuid, user_id: Uuid) -> Result<Repost> {
        let mut state = self.state.lock().unwrap();
        if state
            .reposts
            .iter()
            .any(|r| r.post_id == post_id && r.user_id == user_id)
        {
            return Err(AppError::Conflict("Post already reposted".to_string()));
        }

        let repost = Repost {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            created_at: Utc::now(),
        };
        state.reposts.push(repost.clone());
        if let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) {
            post.reposts_count += 1;
        }
        Ok(repost)
    }

    async fn delete_repost(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.reposts.len();
        state
            .reposts
            .retain(|r| !(r.post_id == post_id && r.user_id == user_id));
        let removed = state.reposts.len() < before;
        if removed {
            if let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) {
                post.reposts_count = (post.reposts_count - 1).max(0);
            }
        }
        Ok(removed)
    }

    async fn list_comments(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentRecord>> {
        let state = self.state.lock().unwrap();
        let mut comments: Vec<&Comment> = state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(comments
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|c| CommentRecord {
                comment: c.clone(),
                author: state.profiles.get(&c.user_id).cloned(),
            })
            .collect())
    }

    async fn create_comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        content: String,
    ) -> Result<CommentRecord> {
        let mut state = self.state.lock().unwrap();
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            content,
            created_at: Utc::now(),
        };
        state.comments.push(comment.clone());
        if let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) {
            post.comments_count += 1;
        }
        Ok(CommentRecord {
            author: state.profiles.get(&user_id).cloned(),
            comment,
        })
    }
}
