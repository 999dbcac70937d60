use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Duration;
use serde::Deserialize;
use tower_cookies::{Cookie, Cookies, cookie::SameSite};
use uuid::Uuid;

use crate::{
    Config,
    auth::{self, MemberClaims, hash_password, verify_password},
    model::{
        CrudRepository, DatabaseError, PaginatableRepository, ResourceTyped, check_access,
        entity::{Member, MemberCreateUpdate},
    },
    web::{
        AppState, AuthenticatedUser, RequestContext, UserRole, WebError, WebResult,
        error::ErrorResponse,
        middlewares::{self, AUTH_TOKEN},
        routes::PaginationQuery,
    },
};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct MemberSignupBody {
    pub username: String,
    pub email: String,
    pub password: String,
    pub registration_number: String,
    #[serde(default)]
    pub member_type: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub year_of_study: Option<i32>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct MemberSigninBody {
    pub username: String,
    pub password: String,
}

pub fn routes<S>(state: AppState) -> Router<S> {
    let protected = Router::new()
        .route("/page", get(user_list_handler))
        .route("/verify", get(user_verify_handler))
        .route(
            "/{id}",
            put(user_update_handler).delete(user_delete_handler),
        )
        .route("/{id}/verify", post(user_mark_verified_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ));

    Router::new()
        .route("/signup", post(user_signup_handler))
        .route("/signin", post(user_signin_handler))
        .merge(protected)
        .with_state(state)
}

fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_TOKEN, token);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie
}

#[utoipa::path(
    post,
    path = "/api/v1/account/signup",
    request_body = MemberSignupBody,
    description = "Registers a new association member",
    responses(
        (status = 200, description = "Member created successfully", body = Member),
        (status = 409, description = "Username or registration number already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "account"
)]
pub async fn user_signup_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<MemberSignupBody>,
) -> WebResult<impl IntoResponse> {
    let admin = AuthenticatedUser::admin();
    let found = Member::find_by_username(state.pool(), &admin, &payload.username)
        .await
        .map_err(|e| WebError::resource_fetch_error(Member::get_resource_type(), e))?;

    if found.is_some() {
        return Err(WebError::registration_conflict());
    }

    let reg_conflict =
        Member::find_by_registration_number(state.pool(), &admin, &payload.registration_number)
            .await
            .map_err(|e| WebError::resource_fetch_error(Member::get_resource_type(), e))?;

    if reg_conflict.is_some() {
        return Err(WebError::registration_conflict());
    }

    let hash = hash_password(&payload.password).map_err(|e| WebError::server_crypt_error(e))?;
    let payload = MemberCreateUpdate {
        username: payload.username,
        email: payload.email,
        password_hash: hash,
        registration_number: payload.registration_number,
        member_type: payload.member_type.unwrap_or_else(|| "student".to_string()),
        phone_number: payload.phone_number.unwrap_or_default(),
        course: payload.course.unwrap_or_default(),
        year_of_study: payload.year_of_study,
    };

    let created = Member::create(state.pool(), &admin, payload)
        .await
        .map_err(|e| WebError::resource_fetch_error(Member::get_resource_type(), e))?;

    let timestamp = (chrono::Utc::now() + Duration::days(1)).timestamp();
    let jwt_token = Config::get_or_init(false).await.app().jwt();

    let claims = MemberClaims {
        sub: created.id().to_string(),
        exp: timestamp,
    };
    let token = auth::generate_token(claims, jwt_token)
        .map_err(|e| WebError::server_crypt_error(e.into()))?;
    cookies.add(session_cookie(token));

    Ok((StatusCode::OK, Json(created)))
}

#[utoipa::path(
    post,
    path = "/api/v1/account/signin",
    description = "Authorizes a member in the system",
    request_body = MemberSigninBody,
    responses(
        (status = 200, description = "Member signed in", body = Member),
        (status = 401, description = "Credentials invalid", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "account",
)]
pub async fn user_signin_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<MemberSigninBody>,
) -> WebResult<impl IntoResponse> {
    let admin = AuthenticatedUser::admin();
    let found = Member::find_by_username(state.pool(), &admin, &payload.username)
        .await
        .map_err(|e| WebError::resource_fetch_error(Member::get_resource_type(), e))?;

    if found.is_none() {
        return Err(WebError::auth_invalid_credentials());
    }

    let found = found.unwrap();

    let is_verified = verify_password(found.hash(), &payload.password)
        .map_err(|e| WebError::server_crypt_error(e))?;

    if !is_verified {
        return Err(WebError::auth_invalid_credentials());
    }

    let timestamp = (chrono::Utc::now() + Duration::days(1)).timestamp();
    let jwt_token = Config::get_or_init(false).await.app().jwt();
    let claims = MemberClaims {
        sub: found.id().to_string(),
        exp: timestamp,
    };

    let token = auth::generate_token(claims, jwt_token)
        .map_err(|e| WebError::server_crypt_error(e.into()))?;

    cookies.add(session_cookie(token));

    Ok((StatusCode::OK, Json(found)))
}

pub async fn user_verify_handler(ctx: RequestContext) -> WebResult<impl IntoResponse> {
    let user = ctx.maybe_user();

    if user.is_none() {
        return Ok(StatusCode::UNAUTHORIZED);
    }

    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/v1/account/page",
    responses(
        (status = 200, description = "Returns requested page", body = crate::model::Page<Member>),
        (status = 403, description = "You're not an admin to do this", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "account",
    security(
        ("cookie" = [])
    )
)]
pub async fn user_list_handler(
    ctx: RequestContext,
    Query(page): Query<PaginationQuery>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    if user.user_role() != UserRole::Admin {
        return Err(WebError::resource_forbidden(Member::get_resource_type()));
    }

    let members = Member::page(state.pool(), &user, page.limit(), page.offset())
        .await
        .map_err(|e| WebError::resource_fetch_error(Member::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(members)))
}

#[utoipa::path(
    post,
    path = "/api/v1/account/{id}/verify",
    description = "Mark a member's registration as verified (admin only)",
    responses(
        (status = 200, description = "Member verified"),
        (status = 403, description = "You're not an admin to do this", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "account",
    security(
        ("cookie" = [])
    )
)]
pub async fn user_mark_verified_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    if user.user_role() != UserRole::Admin {
        return Err(WebError::resource_forbidden(Member::get_resource_type()));
    }

    let found = Member::find_by_id(state.pool(), &user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Member::get_resource_type(), e))?;

    if found.is_none() {
        return Err(WebError::resource_not_found(Member::get_resource_type()));
    }

    Member::mark_verified(state.pool(), &user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Member::get_resource_type(), e))?;

    Ok(StatusCode::OK)
}

#[utoipa::path(
    put,
    path = "/api/v1/account/{id}",
    request_body = MemberSignupBody,
    responses(
        (status = 200, description = "Member updated successfully", body = Member),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 403, description = "You don't have enough permissions to do this", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "account",
    security(
        ("cookie" = [])
    )
)]
pub async fn user_update_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MemberSignupBody>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;

    let found = Member::find_by_id(state.pool(), &user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Member::get_resource_type(), e))?;

    if found.is_none() {
        return Err(WebError::resource_not_found(Member::get_resource_type()));
    }
    let found = found.unwrap();
    check_access(state.pool(), &user, &found, user.user_id())
        .await
        .map_err(|e| {
            if let DatabaseError::Forbidden = e {
                WebError::resource_forbidden(Member::get_resource_type())
            } else {
                WebError::resource_fetch_error(Member::get_resource_type(), e)
            }
        })?;

    if payload.username != found.username() {
        let conflict_found = Member::find_by_username(state.pool(), &user, &payload.username)
            .await
            .map_err(|e| WebError::resource_fetch_error(Member::get_resource_type(), e))?;

        if conflict_found.is_some() {
            return Err(WebError::registration_conflict());
        }
    }

    let payload = MemberCreateUpdate {
        username: payload.username,
        email: payload.email,
        password_hash: String::new(), // not in use
        registration_number: found.registration_number().to_string(),
        member_type: payload.member_type.unwrap_or_else(|| "student".to_string()),
        phone_number: payload.phone_number.unwrap_or_default(),
        course: payload.course.unwrap_or_default(),
        year_of_study: payload.year_of_study,
    };

    let updated = found
        .update(state.pool(), &user, payload)
        .await
        .map_err(|e| WebError::resource_fetch_error(Member::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/account/{id}",
    description = "Deletes specified member",
    responses(
        (status = 200, description = "Member deleted successfully"),
        (status = 401, description = "You're not authorized", body = ErrorResponse),
        (status = 403, description = "You're not allowed to do this", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "account",
    security(
        ("cookie" = [])
    )
)]
pub async fn user_delete_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;

    let found = Member::find_by_id(state.pool(), &user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Member::get_resource_type(), e))?;

    if found.is_none() {
        return Err(WebError::resource_not_found(Member::get_resource_type()));
    }

    let found = found.unwrap();
    check_access(state.pool(), &user, &found, user.user_id())
        .await
        .map_err(|e| {
            if let DatabaseError::Forbidden = e {
                WebError::resource_forbidden(Member::get_resource_type())
            } else {
                WebError::resource_fetch_error(Member::get_resource_type(), e)
            }
        })?;

    found
        .delete(state.pool(), &user)
        .await
        .map_err(|e| WebError::resource_fetch_error(Member::get_resource_type(), e))?;

    Ok(StatusCode::OK)
}
