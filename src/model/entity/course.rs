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

/// A persisted generated course. The list-shaped fields (topics, outcomes,
/// prerequisites, resources, lessons) are stored as JSONB exactly as the
/// generator produced them.
#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Course {
    id: Uuid,
    topic: String,
    level: String,
    duration: String,
    title: String,
    description: String,
    #[schema(value_type = Object)]
    topics: serde_json::Value,
    #[schema(value_type = Object)]
    learning_outcomes: serde_json::Value,
    #[schema(value_type = Object)]
    prerequisites: serde_json::Value,
    #[schema(value_type = Object)]
    resources: serde_json::Value,
    #[schema(value_type = Object)]
    lessons: serde_json::Value,
    detailed_content: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for Course {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Course
    }
}

impl Course {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn lessons(&self) -> &serde_json::Value {
        &self.lessons
    }

    pub fn detailed_content(&self) -> &str {
        &self.detailed_content
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CourseCreate {
    pub topic: String,
    pub level: String,
    pub duration: String,
    pub title: String,
    pub description: String,
    #[schema(value_type = Object)]
    pub topics: serde_json::Value,
    #[schema(value_type = Object)]
    pub learning_outcomes: serde_json::Value,
    #[schema(value_type = Object)]
    pub prerequisites: serde_json::Value,
    #[schema(value_type = Object)]
    pub resources: serde_json::Value,
    #[schema(value_type = Object)]
    pub lessons: serde_json::Value,
    pub detailed_content: String,
}

impl CourseCreate {
    /// Packs a generated outline together with the request parameters into a
    /// persistable record.
    pub fn from_outline(
        topic: &str,
        level: &str,
        duration: &str,
        outline: crate::ai::CourseOutline,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            topic: topic.to_string(),
            level: level.to_string(),
            duration: duration.to_string(),
            title: outline.title,
            description: outline.description,
            topics: serde_json::to_value(outline.topics)?,
            learning_outcomes: serde_json::to_value(outline.learning_outcomes)?,
            prerequisites: serde_json::to_value(outline.prerequisites)?,
            resources: serde_json::to_value(outline.resources)?,
            lessons: serde_json::to_value(outline.lessons)?,
            detailed_content: outline.detailed_content,
        })
    }
}

#[async_trait]
impl CrudRepository<Course, CourseCreate, uuid::Uuid> for Course {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: CourseCreate,
    ) -> DatabaseResult<Self> {
        let result = sqlx::query(
            "INSERT INTO courses (id, topic, level, duration, title, description, topics, learning_outcomes, prerequisites, resources, lessons, detailed_content) \
             VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12) RETURNING id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&data.topic)
        .bind(&data.level)
        .bind(&data.duration)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.topics)
        .bind(&data.learning_outcomes)
        .bind(&data.prerequisites)
        .bind(&data.resources)
        .bind(&data.lessons)
        .bind(&data.detailed_content)
        .fetch_one(mm.executor())
        .await?;

        let id = result.try_get("id")?;
        let created_at = result.try_get("created_at")?;
        Ok(Course {
            id,
            topic: data.topic,
            level: data.level,
            duration: data.duration,
            title: data.title,
            description: data.description,
            topics: data.topics,
            learning_outcomes: data.learning_outcomes,
            prerequisites: data.prerequisites,
            resources: data.resources,
            lessons: data.lessons,
            detailed_content: data.detailed_content,
            is_active: true,
            created_at,
        })
    }

    async fn update(
        mut self,
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: CourseCreate,
    ) -> DatabaseResult<Self> {
        sqlx::query(
            "UPDATE courses SET topic = $1, level = $2, duration = $3, title = $4, description = $5, \
             topics = $6, learning_outcomes = $7, prerequisites = $8, resources = $9, lessons = $10, \
             detailed_content = $11 WHERE id = $12",
        )
        .bind(&data.topic)
        .bind(&data.level)
        .bind(&data.duration)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.topics)
        .bind(&data.learning_outcomes)
        .bind(&data.prerequisites)
        .bind(&data.resources)
        .bind(&data.lessons)
        .bind(&data.detailed_content)
        .bind(self.id)
        .execute(mm.executor())
        .await?;

        self.topic = data.topic;
        self.level = data.level;
        self.duration = data.duration;
        self.title = data.title;
        self.description = data.description;
        self.topics = data.topics;
        self.learning_outcomes = data.learning_outcomes;
        self.prerequisites = data.prerequisites;
        self.resources = data.resources;
        self.lessons = data.lessons;
        self.detailed_content = data.detailed_content;
        Ok(self)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM courses WHERE id = $1")
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
        let result = sqlx::query_as("SELECT * FROM courses WHERE id = $1 AND is_active = TRUE")
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
            "SELECT * FROM courses WHERE is_active = TRUE ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE is_active = TRUE")
            .fetch_one(mm.executor())
            .await?;

        Ok(result)
    }
}

impl_paginatable_for!(Course, CourseCreate, Uuid);

#[async_trait]
impl HasOwner for Course {
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

impl Course {
    /// Records a completion for the acting member. Returns false when the
    /// course was already completed (completions award points only once).
    pub async fn complete_for(
        mm: &ModelManager,
        actor: &AuthenticatedUser,
        course_id: Uuid,
    ) -> DatabaseResult<bool> {
        let inserted = sqlx::query(
            "INSERT INTO course_completions (id, user_id, course_id) VALUES ($1,$2,$3) \
             ON CONFLICT (user_id, course_id) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(actor.user_id())
        .bind(course_id)
        .execute(mm.executor())
        .await?;

        Ok(inserted.rows_affected() > 0)
    }

    pub async fn completed_count(
        mm: &ModelManager,
        actor: &AuthenticatedUser,
    ) -> DatabaseResult<i64> {
        let result: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM course_completions WHERE user_id = $1")
                .bind(actor.user_id())
                .fetch_one(mm.executor())
                .await?;
        Ok(result)
    }

    pub async fn completed_ids(
        mm: &ModelManager,
        actor: &AuthenticatedUser,
    ) -> DatabaseResult<Vec<Uuid>> {
        let result = sqlx::query_scalar(
            "SELECT course_id FROM course_completions WHERE user_id = $1 ORDER BY completed_at",
        )
        .bind(actor.user_id())
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }
}
