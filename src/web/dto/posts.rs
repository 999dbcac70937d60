use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::entity::{BlogPost, PostComment};

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PostDetailResponse {
    id: Uuid,
    title: String,
    body: String,
    author_id: Uuid,
    likes: i32,
    shares: i32,
    comments: Vec<CommentResponse>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CommentResponse {
    id: Uuid,
    author_id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
}

impl PostDetailResponse {
    pub fn from_entity(post: BlogPost, comments: Vec<PostComment>) -> Self {
        Self {
            id: post.id(),
            title: post.title().to_string(),
            body: post.body().to_string(),
            author_id: post.author_id(),
            likes: post.likes(),
            shares: post.shares(),
            comments: comments.into_iter().map(CommentResponse::from).collect(),
        }
    }
}

impl From<PostComment> for CommentResponse {
    fn from(comment: PostComment) -> Self {
        Self {
            id: comment.id(),
            author_id: comment.author_id(),
            body: comment.body().to_string(),
            created_at: comment.created_at(),
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PostCreateBody {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CommentCreateBody {
    pub body: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LikeResponse {
    pub likes: i32,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ShareResponse {
    pub shares: i32,
}
