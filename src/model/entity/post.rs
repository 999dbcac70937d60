use crate::impl_paginatable_for;
use crate::model::access::HasOwner;
use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::prelude::Row;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct BlogPost {
    id: Uuid,
    title: String,
    body: String,
    author_id: Uuid,
    is_published: bool,
    is_approved: bool,
    likes: i32,
    shares: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ResourceTyped for BlogPost {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Post
    }
}

impl BlogPost {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn author_id(&self) -> Uuid {
        self.author_id
    }

    pub fn is_published(&self) -> bool {
        self.is_published
    }

    pub fn is_approved(&self) -> bool {
        self.is_approved
    }

    pub fn likes(&self) -> i32 {
        self.likes
    }

    pub fn shares(&self) -> i32 {
        self.shares
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct BlogPostCreate {
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    pub is_published: bool,
}

#[async_trait]
impl CrudRepository<BlogPost, BlogPostCreate, uuid::Uuid> for BlogPost {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: BlogPostCreate,
    ) -> DatabaseResult<Self> {
        // new posts wait for admin approval
        let result = sqlx::query(
            "INSERT INTO posts (id, title, body, author_id, is_published, is_approved) \
             VALUES ($1,$2,$3,$4,$5,FALSE) RETURNING id, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.body)
        .bind(data.author_id)
        .bind(data.is_published)
        .fetch_one(mm.executor())
        .await?;

        let id = result.try_get("id")?;
        let created_at = result.try_get("created_at")?;
        let updated_at = result.try_get("updated_at")?;
        Ok(BlogPost {
            id,
            title: data.title,
            body: data.body,
            author_id: data.author_id,
            is_published: data.is_published,
            is_approved: false,
            likes: 0,
            shares: 0,
            created_at,
            updated_at,
        })
    }

    async fn update(
        mut self,
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: BlogPostCreate,
    ) -> DatabaseResult<Self> {
        sqlx::query(
            "UPDATE posts SET title = $1, body = $2, is_published = $3, updated_at = NOW() WHERE id = $4",
        )
        .bind(&data.title)
        .bind(&data.body)
        .bind(data.is_published)
        .bind(self.id)
        .execute(mm.executor())
        .await?;

        self.title = data.title;
        self.body = data.body;
        self.is_published = data.is_published;
        Ok(self)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(self.id)
            .execute(mm.executor())
            .await?;
        Ok(())
    }

    async fn find_by_id(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: uuid::Uuid,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_one(mm.executor())
            .await;
        if let Err(sqlx::Error::RowNotFound) = result {
            return Ok(None);
        }

        Ok(Some(result?))
    }

    async fn list(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        limit: i64,
        offset: i64,
    ) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as(
            "SELECT * FROM posts WHERE is_published = TRUE AND is_approved = TRUE \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM posts WHERE is_published = TRUE AND is_approved = TRUE",
        )
        .fetch_one(mm.executor())
        .await?;

        Ok(result)
    }
}

impl_paginatable_for!(BlogPost, BlogPostCreate, Uuid);

#[async_trait]
impl HasOwner for BlogPost {
    type OwnerId = uuid::Uuid;

    async fn get_owner_id(
        &self,
        _mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<Self::OwnerId> {
        Ok(self.author_id)
    }
}

// Utils

impl BlogPost {
    pub async fn like(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
    ) -> DatabaseResult<i32> {
        let likes: i32 =
            sqlx::query_scalar("UPDATE posts SET likes = likes + 1 WHERE id = $1 RETURNING likes")
                .bind(id)
                .fetch_one(mm.executor())
                .await?;
        Ok(likes)
    }

    pub async fn share(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
    ) -> DatabaseResult<i32> {
        let shares: i32 = sqlx::query_scalar(
            "UPDATE posts SET shares = shares + 1 WHERE id = $1 RETURNING shares",
        )
        .bind(id)
        .fetch_one(mm.executor())
        .await?;
        Ok(shares)
    }

    pub async fn approve(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
    ) -> DatabaseResult<()> {
        sqlx::query("UPDATE posts SET is_approved = TRUE WHERE id = $1")
            .bind(id)
            .execute(mm.executor())
            .await?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct PostComment {
    id: Uuid,
    post_id: Uuid,
    author_id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for PostComment {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Comment
    }
}

impl PostComment {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn post_id(&self) -> Uuid {
        self.post_id
    }

    pub fn author_id(&self) -> Uuid {
        self.author_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PostCommentCreate {
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
}

impl PostComment {
    pub async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: PostCommentCreate,
    ) -> DatabaseResult<Self> {
        let result = sqlx::query(
            "INSERT INTO post_comments (id, post_id, author_id, body) VALUES ($1,$2,$3,$4) \
             RETURNING id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(data.post_id)
        .bind(data.author_id)
        .bind(&data.body)
        .fetch_one(mm.executor())
        .await?;

        let id = result.try_get("id")?;
        let created_at = result.try_get("created_at")?;
        Ok(PostComment {
            id,
            post_id: data.post_id,
            author_id: data.author_id,
            body: data.body,
            created_at,
        })
    }

    pub async fn all_by_post(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        post_id: Uuid,
    ) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as(
            "SELECT * FROM post_comments WHERE post_id = $1 ORDER BY created_at DESC",
        )
        .bind(post_id)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }
}

#[async_trait]
impl HasOwner for PostComment {
    type OwnerId = uuid::Uuid;

    async fn get_owner_id(
        &self,
        _mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<Self::OwnerId> {
        Ok(self.author_id)
    }
}
