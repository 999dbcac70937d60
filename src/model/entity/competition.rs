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
pub struct Competition {
    id: Uuid,
    title: String,
    description: String,
    problem_statement: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for Competition {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Competition
    }
}

impl Competition {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn problem_statement(&self) -> &str {
        &self.problem_statement
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CompetitionCreate {
    pub title: String,
    pub description: String,
    pub problem_statement: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[async_trait]
impl CrudRepository<Competition, CompetitionCreate, uuid::Uuid> for Competition {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: CompetitionCreate,
    ) -> DatabaseResult<Self> {
        let result = sqlx::query(
            "INSERT INTO competitions (id, title, description, problem_statement, start_date, end_date) \
             VALUES ($1,$2,$3,$4,$5,$6) RETURNING id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.problem_statement)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(mm.executor())
        .await?;

        let id = result.try_get("id")?;
        let created_at = result.try_get("created_at")?;
        Ok(Competition {
            id,
            title: data.title,
            description: data.description,
            problem_statement: data.problem_statement,
            start_date: data.start_date,
            end_date: data.end_date,
            is_active: true,
            created_at,
        })
    }

    async fn update(
        mut self,
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: CompetitionCreate,
    ) -> DatabaseResult<Self> {
        sqlx::query(
            "UPDATE competitions SET title = $1, description = $2, problem_statement = $3, start_date = $4, end_date = $5 WHERE id = $6",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.problem_statement)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(self.id)
        .execute(mm.executor())
        .await?;

        self.title = data.title;
        self.description = data.description;
        self.problem_statement = data.problem_statement;
        self.start_date = data.start_date;
        self.end_date = data.end_date;
        Ok(self)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM competitions WHERE id = $1")
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
        let result = sqlx::query_as("SELECT * FROM competitions WHERE id = $1")
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
            "SELECT * FROM competitions WHERE is_active = TRUE \
             ORDER BY start_date DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM competitions WHERE is_active = TRUE")
                .fetch_one(mm.executor())
                .await?;

        Ok(result)
    }
}

impl_paginatable_for!(Competition, CompetitionCreate, Uuid);

#[async_trait]
impl HasOwner for Competition {
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

impl Competition {
    /// A new monthly challenge replaces whatever is currently running.
    pub async fn deactivate_all(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<()> {
        sqlx::query("UPDATE competitions SET is_active = FALSE WHERE is_active = TRUE")
            .execute(mm.executor())
            .await?;
        Ok(())
    }

    pub async fn find_by_title(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        title: &str,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM competitions WHERE title = $1")
            .bind(title)
            .fetch_one(mm.executor())
            .await;
        if let Err(sqlx::Error::RowNotFound) = result {
            return Ok(None);
        }
        Ok(Some(result?))
    }
}
