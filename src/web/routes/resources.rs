use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    model::{
        CrudRepository, ResourceTyped,
        entity::{Resource, ResourceCreate},
    },
    web::{
        AppState, AuthenticatedUser, RequestContext, UserRole, WebError, WebResult,
        error::ErrorResponse, middlewares,
    },
};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ResourceFilterQuery {
    resource_type: Option<String>,
}

/// What a member gets back when they hit the download endpoint: the link to
/// follow plus the updated counter.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DownloadResponse {
    pub link: String,
    pub downloads: i32,
}

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(resources_list_handler).post(resources_create_handler))
        .route("/{id}", get(resources_get_handler))
        .route("/{id}/download", post(resources_download_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/resources/",
    description = "List active resources, optionally filtered by kind",
    responses(
        (status = 200, description = "Resources collected", body = Vec<Resource>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "resources"
)]
pub async fn resources_list_handler(
    Query(filter): Query<ResourceFilterQuery>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let actor = AuthenticatedUser::admin();
    let resources = match filter.resource_type.as_deref() {
        Some(kind) => Resource::all_by_type(state.pool(), &actor, kind).await,
        None => Resource::list(state.pool(), &actor, 100, 0).await,
    }
    .map_err(|e| WebError::resource_fetch_error(Resource::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(resources)))
}

#[utoipa::path(
    get,
    path = "/api/v1/resources/{id}",
    responses(
        (status = 200, description = "Resource found", body = Resource),
        (status = 404, description = "Resource not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "resources"
)]
pub async fn resources_get_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let actor = AuthenticatedUser::admin();
    let resource = Resource::find_by_id(state.pool(), &actor, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Resource::get_resource_type(), e))?;

    match resource {
        Some(resource) => Ok((StatusCode::OK, Json(resource))),
        None => Err(WebError::resource_not_found(Resource::get_resource_type())),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/resources/{id}/download",
    description = "Record a download and return the link to the material",
    responses(
        (status = 200, description = "Download recorded", body = DownloadResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "resources"
)]
pub async fn resources_download_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let actor = AuthenticatedUser::admin();
    let resource = Resource::find_by_id(state.pool(), &actor, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Resource::get_resource_type(), e))?;

    let Some(resource) = resource else {
        return Err(WebError::resource_not_found(Resource::get_resource_type()));
    };

    let downloads = Resource::record_download(state.pool(), &actor, resource.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(Resource::get_resource_type(), e))?;

    let link = if resource.external_link().is_empty() {
        resource.file_path().to_string()
    } else {
        resource.external_link().to_string()
    };

    Ok((StatusCode::OK, Json(DownloadResponse { link, downloads })))
}

#[utoipa::path(
    post,
    path = "/api/v1/resources/",
    description = "Publish a resource (admin only)",
    request_body = ResourceCreate,
    responses(
        (status = 200, description = "Resource created", body = Resource),
        (status = 403, description = "You're not an admin to do this", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "resources"
)]
pub async fn resources_create_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<ResourceCreate>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    if user.user_role() != UserRole::Admin {
        return Err(WebError::resource_forbidden(Resource::get_resource_type()));
    }

    let created = Resource::create(state.pool(), &user, payload)
        .await
        .map_err(|e| WebError::resource_fetch_error(Resource::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(created)))
}
