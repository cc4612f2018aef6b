//! Row mapper: persisted records to response views.
//!
//! Optional joins arrive as `Option<_>` and are collapsed here; nothing in
//! this module can fail.

use uuid::Uuid;

use crate::domain::feed::{AuthorView, CommentView, PostView, WorkoutView};
use crate::domain::models::{CommentRecord, PostRecord, Profile, WorkoutSummary};

/// Missing profile → placeholder author with `is_following = false`
pub fn map_author(profile: Option<&Profile>, user_id: Uuid, is_following: bool) -> AuthorView {
    match profile {
        Some(p) => AuthorView {
            id: p.id,
            username: p.username.clone(),
            full_name: p.full_name.clone(),
            avatar: p.avatar_url.clone(),
            is_following,
        },
        None => AuthorView::placeholder(user_id),
    }
}

pub fn map_workout(workout: &WorkoutSummary) -> WorkoutView {
    WorkoutView {
        id: workout.id,
        name: workout.name.clone(),
        workout_type: workout.workout_type.clone(),
        duration_minutes: workout.duration_minutes,
        calories_burned: workout.calories_burned,
    }
}

pub fn map_post(record: &PostRecord, is_following_author: bool) -> PostView {
    let post = &record.post;

    PostView {
        id: post.id,
        content: post.content.clone(),
        image_urls: post.image_urls.clone().unwrap_or_default(),
        hashtags: post.hashtags.clone().unwrap_or_default(),
        workout_id: post.workout_id,
        workout: record.workout.as_ref().map(map_workout),
        is_public: post.is_visible_publicly(),
        created_at: post.created_at,
        updated_at: post.updated_at,
        user_id: post.user_id,
        author: map_author(record.author.as_ref(), post.user_id, is_following_author),
    }
}

pub fn map_comment(record: &CommentRecord) -> CommentView {
    let comment = &record.comment;

    CommentView {
        id: comment.id,
        post_id: comment.post_id,
        content: comment.content.clone(),
        created_at: comment.created_at,
        author: map_author(record.author.as_ref(), comment.user_id, false),
    }
}
