use crate::model::access::HasOwner;
use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::prelude::Row;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Album {
    id: Uuid,
    title: String,
    description: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for Album {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Album
    }
}

impl Album {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AlbumCreate {
    pub title: String,
    pub description: String,
}

impl Album {
    pub async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: AlbumCreate,
    ) -> DatabaseResult<Self> {
        let result = sqlx::query(
            "INSERT INTO albums (id, title, description) VALUES ($1,$2,$3) RETURNING id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.description)
        .fetch_one(mm.executor())
        .await?;

        let id = result.try_get("id")?;
        let created_at = result.try_get("created_at")?;
        Ok(Album {
            id,
            title: data.title,
            description: data.description,
            is_active: true,
            created_at,
        })
    }

    pub async fn find_by_id(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM albums WHERE id = $1 AND is_active = TRUE")
            .bind(id)
            .fetch_one(mm.executor())
            .await;
        if let Err(sqlx::Error::RowNotFound) = result {
            return Ok(None);
        }

        Ok(Some(result?))
    }

    pub async fn all_active(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<Vec<Self>> {
        let result =
            sqlx::query_as("SELECT * FROM albums WHERE is_active = TRUE ORDER BY created_at DESC")
                .fetch_all(mm.executor())
                .await?;
        Ok(result)
    }
}

#[async_trait]
impl HasOwner for Album {
    type OwnerId = uuid::Uuid;

    async fn get_owner_id(
        &self,
        _mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<Self::OwnerId> {
        Ok(self.id)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Photo {
    id: Uuid,
    album_id: Uuid,
    caption: String,
    image_path: String,
    uploaded_at: DateTime<Utc>,
}

impl ResourceTyped for Photo {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Photo
    }
}

impl Photo {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn album_id(&self) -> Uuid {
        self.album_id
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PhotoCreate {
    pub album_id: Uuid,
    pub caption: String,
    pub image_path: String,
}

impl Photo {
    pub async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: PhotoCreate,
    ) -> DatabaseResult<Self> {
        let result = sqlx::query(
            "INSERT INTO photos (id, album_id, caption, image_path) VALUES ($1,$2,$3,$4) \
             RETURNING id, uploaded_at",
        )
        .bind(Uuid::new_v4())
        .bind(data.album_id)
        .bind(&data.caption)
        .bind(&data.image_path)
        .fetch_one(mm.executor())
        .await?;

        let id = result.try_get("id")?;
        let uploaded_at = result.try_get("uploaded_at")?;
        Ok(Photo {
            id,
            album_id: data.album_id,
            caption: data.caption,
            image_path: data.image_path,
            uploaded_at,
        })
    }

    pub async fn all_by_album(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        album_id: Uuid,
    ) -> DatabaseResult<Vec<Self>> {
        let result =
            sqlx::query_as("SELECT * FROM photos WHERE album_id = $1 ORDER BY uploaded_at")
                .bind(album_id)
                .fetch_all(mm.executor())
                .await?;
        Ok(result)
    }
}

#[async_trait]
impl HasOwner for Photo {
    type OwnerId = uuid::Uuid;

    async fn get_owner_id(
        &self,
        _mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<Self::OwnerId> {
        Ok(self.album_id)
    }
}
