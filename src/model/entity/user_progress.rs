use crate::model::access::HasOwner;
use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct UserProgress {
    id: Uuid,
    user_id: Uuid,
    total_points: i32,
}

impl ResourceTyped for UserProgress {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::UserProgress
    }
}

impl UserProgress {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn total_points(&self) -> i32 {
        self.total_points
    }
}

impl UserProgress {
    /// Fetches the member's progress row, creating a zeroed one on first use.
    pub async fn get_or_create(
        mm: &ModelManager,
        actor: &AuthenticatedUser,
    ) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO user_progress (id, user_id, total_points)
            VALUES ($1, $2, 0)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, total_points
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(actor.user_id())
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    /// Adjusts the member's point total; `delta` may be negative (score
    /// recalculation).
    pub async fn add_points(
        mm: &ModelManager,
        actor: &AuthenticatedUser,
        user_id: Uuid,
        delta: i32,
    ) -> DatabaseResult<i32> {
        // make sure the row exists before bumping it
        let _ = Self::get_or_create_for(mm, actor, user_id).await?;

        let total: i32 = sqlx::query_scalar(
            "UPDATE user_progress SET total_points = total_points + $1 WHERE user_id = $2 \
             RETURNING total_points",
        )
        .bind(delta)
        .bind(user_id)
        .fetch_one(mm.executor())
        .await?;
        Ok(total)
    }

    pub async fn get_or_create_for(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        user_id: Uuid,
    ) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO user_progress (id, user_id, total_points)
            VALUES ($1, $2, 0)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, total_points
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }
}

#[async_trait]
impl HasOwner for UserProgress {
    type OwnerId = uuid::Uuid;

    async fn get_owner_id(
        &self,
        _mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<Self::OwnerId> {
        Ok(self.user_id)
    }
}
