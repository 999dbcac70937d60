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

/// One solution per member per competition. The score is written once, right
/// after the submission is created, by the AI scorer (or its default).
#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Submission {
    id: Uuid,
    competition_id: Uuid,
    participant_id: Uuid,
    solution: String,
    score: Option<i32>,
    submitted_at: DateTime<Utc>,
}

impl ResourceTyped for Submission {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Submission
    }
}

impl Submission {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn competition_id(&self) -> Uuid {
        self.competition_id
    }

    pub fn participant_id(&self) -> Uuid {
        self.participant_id
    }

    pub fn solution(&self) -> &str {
        &self.solution
    }

    pub fn score(&self) -> Option<i32> {
        self.score
    }
}

pub struct SubmissionCreate {
    pub competition_id: Uuid,
    pub participant_id: Uuid,
    pub solution: String,
}

impl SubmissionCreate {
    pub fn new(competition_id: Uuid, participant_id: Uuid, solution: String) -> Self {
        Self {
            competition_id,
            participant_id,
            solution,
        }
    }
}

impl Submission {
    pub async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: SubmissionCreate,
    ) -> DatabaseResult<Self> {
        let result = sqlx::query(
            "INSERT INTO submissions (id, competition_id, participant_id, solution) \
             VALUES ($1,$2,$3,$4) RETURNING id, submitted_at",
        )
        .bind(Uuid::new_v4())
        .bind(data.competition_id)
        .bind(data.participant_id)
        .bind(&data.solution)
        .fetch_one(mm.executor())
        .await?;

        let id = result.try_get("id")?;
        let submitted_at = result.try_get("submitted_at")?;
        Ok(Submission {
            id,
            competition_id: data.competition_id,
            participant_id: data.participant_id,
            solution: data.solution,
            score: None,
            submitted_at,
        })
    }

    pub async fn set_score(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
        score: i32,
    ) -> DatabaseResult<()> {
        sqlx::query("UPDATE submissions SET score = $1 WHERE id = $2")
            .bind(score)
            .bind(id)
            .execute(mm.executor())
            .await?;
        Ok(())
    }

    pub async fn find_by_participant(
        mm: &ModelManager,
        actor: &AuthenticatedUser,
        competition_id: Uuid,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as(
            "SELECT * FROM submissions WHERE competition_id = $1 AND participant_id = $2",
        )
        .bind(competition_id)
        .bind(actor.user_id())
        .fetch_one(mm.executor())
        .await;
        if let Err(sqlx::Error::RowNotFound) = result {
            return Ok(None);
        }
        Ok(Some(result?))
    }

    pub async fn all_by_competition(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        competition_id: Uuid,
    ) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as(
            "SELECT * FROM submissions WHERE competition_id = $1 ORDER BY submitted_at",
        )
        .bind(competition_id)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }

    pub async fn count_for(mm: &ModelManager, actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM submissions WHERE participant_id = $1")
                .bind(actor.user_id())
                .fetch_one(mm.executor())
                .await?;
        Ok(result)
    }
}

#[async_trait]
impl HasOwner for Submission {
    type OwnerId = uuid::Uuid;

    async fn get_owner_id(
        &self,
        _mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<Self::OwnerId> {
        Ok(self.participant_id)
    }
}

// Utils

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct LeaderboardRow {
    pub username: String,
    pub score: i32,
    pub submitted_at: DateTime<Utc>,
}

impl LeaderboardRow {
    /// Top ten scored submissions, best first.
    pub async fn top_ten(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        competition_id: Uuid,
    ) -> DatabaseResult<Vec<Self>> {
        let rows = sqlx::query_as(
            r#"
            SELECT u.username, s.score, s.submitted_at
            FROM submissions s
            JOIN users u ON u.id = s.participant_id
            WHERE s.competition_id = $1 AND s.score IS NOT NULL
            ORDER BY s.score DESC, s.submitted_at ASC
            LIMIT 10
            "#,
        )
        .bind(competition_id)
        .fetch_all(mm.executor())
        .await?;

        Ok(rows)
    }
}
