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
pub struct Project {
    id: Uuid,
    title: String,
    description: String,
    github_link: String,
    live_demo_link: String,
    is_approved: bool,
    is_featured: bool,
    likes: i32,
    shares: i32,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for Project {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Project
    }
}

impl Project {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_featured(&self) -> bool {
        self.is_featured
    }

    pub fn likes(&self) -> i32 {
        self.likes
    }

    pub fn shares(&self) -> i32 {
        self.shares
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ProjectCreate {
    pub title: String,
    pub description: String,
    pub github_link: String,
    pub live_demo_link: String,
    pub is_featured: Option<bool>,
}

#[async_trait]
impl CrudRepository<Project, ProjectCreate, uuid::Uuid> for Project {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: ProjectCreate,
    ) -> DatabaseResult<Self> {
        let result = sqlx::query(
            "INSERT INTO projects (id, title, description, github_link, live_demo_link, is_featured) \
             VALUES ($1,$2,$3,$4,$5,$6) RETURNING id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.github_link)
        .bind(&data.live_demo_link)
        .bind(data.is_featured.unwrap_or(false))
        .fetch_one(mm.executor())
        .await?;

        let id = result.try_get("id")?;
        let created_at = result.try_get("created_at")?;
        Ok(Project {
            id,
            title: data.title,
            description: data.description,
            github_link: data.github_link,
            live_demo_link: data.live_demo_link,
            is_approved: false,
            is_featured: data.is_featured.unwrap_or(false),
            likes: 0,
            shares: 0,
            created_at,
        })
    }

    async fn update(
        mut self,
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: ProjectCreate,
    ) -> DatabaseResult<Self> {
        sqlx::query(
            "UPDATE projects SET title = $1, description = $2, github_link = $3, live_demo_link = $4, is_featured = $5 WHERE id = $6",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.github_link)
        .bind(&data.live_demo_link)
        .bind(data.is_featured.unwrap_or(false))
        .bind(self.id)
        .execute(mm.executor())
        .await?;

        self.title = data.title;
        self.description = data.description;
        self.github_link = data.github_link;
        self.live_demo_link = data.live_demo_link;
        self.is_featured = data.is_featured.unwrap_or(false);
        Ok(self)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM projects WHERE id = $1")
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
        let result = sqlx::query_as("SELECT * FROM projects WHERE id = $1")
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
            "SELECT * FROM projects WHERE is_approved = TRUE \
             ORDER BY is_featured DESC, created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE is_approved = TRUE")
            .fetch_one(mm.executor())
            .await?;

        Ok(result)
    }
}

impl_paginatable_for!(Project, ProjectCreate, Uuid);

#[async_trait]
impl HasOwner for Project {
    type OwnerId = uuid::Uuid;

    async fn get_owner_id(
        &self,
        _mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<Self::OwnerId> {
        Ok(self.id) // projects are association-owned
    }
}

// Utils

impl Project {
    pub async fn like(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
    ) -> DatabaseResult<i32> {
        let likes: i32 = sqlx::query_scalar(
            "UPDATE projects SET likes = likes + 1 WHERE id = $1 RETURNING likes",
        )
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
            "UPDATE projects SET shares = shares + 1 WHERE id = $1 RETURNING shares",
        )
        .bind(id)
        .fetch_one(mm.executor())
        .await?;
        Ok(shares)
    }
}
