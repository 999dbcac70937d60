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
pub struct Event {
    id: Uuid,
    title: String,
    description: String,
    event_type: String,
    date: DateTime<Utc>,
    location: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for Event {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Event
    }
}

impl Event {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct EventCreate {
    pub title: String,
    pub description: String,
    pub event_type: String,
    pub date: DateTime<Utc>,
    pub location: String,
}

#[async_trait]
impl CrudRepository<Event, EventCreate, uuid::Uuid> for Event {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: EventCreate,
    ) -> DatabaseResult<Self> {
        let result = sqlx::query(
            "INSERT INTO events (id, title, description, event_type, date, location) \
             VALUES ($1,$2,$3,$4,$5,$6) RETURNING id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.event_type)
        .bind(data.date)
        .bind(&data.location)
        .fetch_one(mm.executor())
        .await?;

        let id = result.try_get("id")?;
        let created_at = result.try_get("created_at")?;
        Ok(Event {
            id,
            title: data.title,
            description: data.description,
            event_type: data.event_type,
            date: data.date,
            location: data.location,
            is_active: true,
            created_at,
        })
    }

    async fn update(
        mut self,
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: EventCreate,
    ) -> DatabaseResult<Self> {
        sqlx::query(
            "UPDATE events SET title = $1, description = $2, event_type = $3, date = $4, location = $5 WHERE id = $6",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.event_type)
        .bind(data.date)
        .bind(&data.location)
        .bind(self.id)
        .execute(mm.executor())
        .await?;

        self.title = data.title;
        self.description = data.description;
        self.event_type = data.event_type;
        self.date = data.date;
        self.location = data.location;
        Ok(self)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM events WHERE id = $1")
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
        let result = sqlx::query_as("SELECT * FROM events WHERE id = $1")
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
            "SELECT * FROM events WHERE is_active = TRUE ORDER BY date DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE is_active = TRUE")
            .fetch_one(mm.executor())
            .await?;

        Ok(result)
    }
}

impl_paginatable_for!(Event, EventCreate, Uuid);

#[async_trait]
impl HasOwner for Event {
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

impl Event {
    pub async fn all_active(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<Vec<Self>> {
        let result =
            sqlx::query_as("SELECT * FROM events WHERE is_active = TRUE ORDER BY date DESC")
                .fetch_all(mm.executor())
                .await?;
        Ok(result)
    }

    pub async fn all_by_type(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        event_type: &str,
    ) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as(
            "SELECT * FROM events WHERE is_active = TRUE AND event_type = $1 ORDER BY date DESC",
        )
        .bind(event_type)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }
}
