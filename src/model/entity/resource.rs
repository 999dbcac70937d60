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

/// Kinds accepted in `resource_type`: notes, exam_prep, reading, career,
/// internship, professional, newsletter, past_paper, report.
#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Resource {
    id: Uuid,
    title: String,
    description: String,
    resource_type: String,
    external_link: String,
    file_path: String,
    downloads: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for Resource {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Resource
    }
}

impl Resource {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn external_link(&self) -> &str {
        &self.external_link
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn downloads(&self) -> i32 {
        self.downloads
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ResourceCreate {
    pub title: String,
    pub description: String,
    pub resource_type: String,
    pub external_link: String,
    pub file_path: String,
}

#[async_trait]
impl CrudRepository<Resource, ResourceCreate, uuid::Uuid> for Resource {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: ResourceCreate,
    ) -> DatabaseResult<Self> {
        let result = sqlx::query(
            "INSERT INTO resources (id, title, description, resource_type, external_link, file_path) \
             VALUES ($1,$2,$3,$4,$5,$6) RETURNING id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.resource_type)
        .bind(&data.external_link)
        .bind(&data.file_path)
        .fetch_one(mm.executor())
        .await?;

        let id = result.try_get("id")?;
        let created_at = result.try_get("created_at")?;
        Ok(Resource {
            id,
            title: data.title,
            description: data.description,
            resource_type: data.resource_type,
            external_link: data.external_link,
            file_path: data.file_path,
            downloads: 0,
            is_active: true,
            created_at,
        })
    }

    async fn update(
        mut self,
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: ResourceCreate,
    ) -> DatabaseResult<Self> {
        sqlx::query(
            "UPDATE resources SET title = $1, description = $2, resource_type = $3, external_link = $4, file_path = $5 WHERE id = $6",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.resource_type)
        .bind(&data.external_link)
        .bind(&data.file_path)
        .bind(self.id)
        .execute(mm.executor())
        .await?;

        self.title = data.title;
        self.description = data.description;
        self.resource_type = data.resource_type;
        self.external_link = data.external_link;
        self.file_path = data.file_path;
        Ok(self)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM resources WHERE id = $1")
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
        let result = sqlx::query_as("SELECT * FROM resources WHERE id = $1")
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
            "SELECT * FROM resources WHERE is_active = TRUE ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM resources WHERE is_active = TRUE")
                .fetch_one(mm.executor())
                .await?;

        Ok(result)
    }
}

impl_paginatable_for!(Resource, ResourceCreate, Uuid);

#[async_trait]
impl HasOwner for Resource {
    type OwnerId = uuid::Uuid;

    async fn get_owner_id(
        &self,
        _mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<Self::OwnerId> {
        Ok(self.id)
    }
}

// Utils

impl Resource {
    pub async fn all_by_type(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        resource_type: &str,
    ) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as(
            "SELECT * FROM resources WHERE is_active = TRUE AND resource_type = $1 \
             ORDER BY created_at DESC",
        )
        .bind(resource_type)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }

    /// Bumps the download counter and returns the new value.
    pub async fn record_download(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
    ) -> DatabaseResult<i32> {
        let downloads: i32 = sqlx::query_scalar(
            "UPDATE resources SET downloads = downloads + 1 WHERE id = $1 RETURNING downloads",
        )
        .bind(id)
        .fetch_one(mm.executor())
        .await?;
        Ok(downloads)
    }
}
