use crate::impl_paginatable_for;
use crate::model::access::HasOwner;
use crate::model::repo::ResourceTyped;
use crate::web::AuthenticatedUser;
use crate::web::UserRole;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::prelude::Row;
use uuid::Uuid;

use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Member {
    id: uuid::Uuid,
    username: String,
    email: String,
    #[serde(skip)]
    password_hash: String,
    role: String,
    registration_number: String,
    member_type: String,
    phone_number: String,
    course: String,
    year_of_study: Option<i32>,
    is_verified: bool,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MemberCreateUpdate {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub registration_number: String,
    pub member_type: String,
    pub phone_number: String,
    pub course: String,
    pub year_of_study: Option<i32>,
}

impl ResourceTyped for Member {
    fn get_resource_type() -> crate::model::repo::ResourceType {
        crate::model::repo::ResourceType::User
    }
}

impl Member {
    pub fn id(&self) -> uuid::Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> UserRole {
        UserRole::from(self.role.as_str())
    }

    pub fn registration_number(&self) -> &str {
        &self.registration_number
    }

    pub fn member_type(&self) -> &str {
        &self.member_type
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }
}

#[async_trait::async_trait]
impl CrudRepository<Member, MemberCreateUpdate, uuid::Uuid> for Member {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: MemberCreateUpdate,
    ) -> DatabaseResult<Self> {
        let role = UserRole::Member.to_string();
        let result = sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, role, registration_number, member_type, phone_number, course, year_of_study) \
             VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10) RETURNING id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&role)
        .bind(&data.registration_number)
        .bind(&data.member_type)
        .bind(&data.phone_number)
        .bind(&data.course)
        .bind(data.year_of_study)
        .fetch_one(mm.executor())
        .await?;

        let id = result.try_get("id")?;
        let created_at = result.try_get("created_at")?;
        Ok(Member {
            id,
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            role,
            registration_number: data.registration_number,
            member_type: data.member_type,
            phone_number: data.phone_number,
            course: data.course,
            year_of_study: data.year_of_study,
            is_verified: false,
            created_at,
        })
    }

    async fn update(
        mut self,
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: MemberCreateUpdate,
    ) -> DatabaseResult<Self> {
        sqlx::query(
            "UPDATE users SET username = $1, email = $2, phone_number = $3, course = $4, year_of_study = $5 WHERE id = $6",
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.phone_number)
        .bind(&data.course)
        .bind(data.year_of_study)
        .bind(self.id)
        .execute(mm.executor())
        .await?;

        self.username = data.username;
        self.email = data.email;
        self.phone_number = data.phone_number;
        self.course = data.course;
        self.year_of_study = data.year_of_study;
        Ok(self)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
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
        let result = sqlx::query_as("SELECT * FROM users WHERE id = $1")
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
        let result = sqlx::query_as("SELECT * FROM users ORDER BY created_at LIMIT $1 OFFSET $2")
            .bind(limit)
            .bind(offset)
            .fetch_all(mm.executor())
            .await?;
        Ok(result)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(mm.executor())
            .await?;

        Ok(result)
    }
}

impl_paginatable_for!(Member, MemberCreateUpdate, Uuid);

#[async_trait]
impl HasOwner for Member {
    type OwnerId = uuid::Uuid;

    async fn get_owner_id(
        &self,
        _mm: &ModelManager,
        _actor: &AuthenticatedUser,
    ) -> DatabaseResult<Self::OwnerId> {
        Ok(self.id) // owners of members are themselves
    }
}

impl Member {
    pub async fn find_by_username(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        username: &str,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_one(mm.executor())
            .await;
        if let Err(sqlx::Error::RowNotFound) = result {
            return Ok(None);
        }
        Ok(Some(result?))
    }

    pub async fn find_by_registration_number(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        registration_number: &str,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM users WHERE registration_number = $1")
            .bind(registration_number)
            .fetch_one(mm.executor())
            .await;
        if let Err(sqlx::Error::RowNotFound) = result {
            return Ok(None);
        }
        Ok(Some(result?))
    }

    pub async fn set_role(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
        role: UserRole,
    ) -> DatabaseResult<()> {
        sqlx::query("UPDATE users SET role = $1 WHERE id = $2")
            .bind(role.to_string())
            .bind(id)
            .execute(mm.executor())
            .await?;
        Ok(())
    }

    pub async fn mark_verified(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
    ) -> DatabaseResult<()> {
        sqlx::query("UPDATE users SET is_verified = TRUE WHERE id = $1")
            .bind(id)
            .execute(mm.executor())
            .await?;
        Ok(())
    }
}
