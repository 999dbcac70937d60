use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    model::{
        CrudRepository, PaginatableRepository, ResourceTyped,
        entity::{Project, ProjectCreate},
    },
    web::{
        AppState, AuthenticatedUser, RequestContext, UserRole, WebError, WebResult,
        dto::posts::{LikeResponse, ShareResponse},
        error::ErrorResponse,
        middlewares,
        routes::PaginationQuery,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/page", get(projects_list_handler))
        .route("/", post(projects_create_handler))
        .route("/{id}", get(projects_get_handler))
        .route("/{id}/like", post(projects_like_handler))
        .route("/{id}/share", post(projects_share_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/page",
    description = "Page through approved member projects, featured first",
    responses(
        (status = 200, description = "Returns requested page", body = crate::model::Page<Project>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "projects"
)]
pub async fn projects_list_handler(
    Query(page): Query<PaginationQuery>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let actor = AuthenticatedUser::admin();
    let projects = Project::page(state.pool(), &actor, page.limit(), page.offset())
        .await
        .map_err(|e| WebError::resource_fetch_error(Project::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(projects)))
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    responses(
        (status = 200, description = "Project found", body = Project),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "projects"
)]
pub async fn projects_get_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let actor = AuthenticatedUser::admin();
    let project = Project::find_by_id(state.pool(), &actor, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Project::get_resource_type(), e))?;

    match project {
        Some(project) => Ok((StatusCode::OK, Json(project))),
        None => Err(WebError::resource_not_found(Project::get_resource_type())),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/projects/",
    description = "Create a project showcase entry (admin only)",
    request_body = ProjectCreate,
    responses(
        (status = 200, description = "Project created", body = Project),
        (status = 403, description = "You're not an admin to do this", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "projects"
)]
pub async fn projects_create_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<ProjectCreate>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    if user.user_role() != UserRole::Admin {
        return Err(WebError::resource_forbidden(Project::get_resource_type()));
    }

    let created = Project::create(state.pool(), &user, payload)
        .await
        .map_err(|e| WebError::resource_fetch_error(Project::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(created)))
}

#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/like",
    responses(
        (status = 200, description = "Project liked", body = LikeResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "projects"
)]
pub async fn projects_like_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let actor = AuthenticatedUser::admin();
    let exists = Project::find_by_id(state.pool(), &actor, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Project::get_resource_type(), e))?
        .is_some();

    if !exists {
        return Err(WebError::resource_not_found(Project::get_resource_type()));
    }

    let likes = Project::like(state.pool(), &actor, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Project::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(LikeResponse { likes })))
}

#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/share",
    responses(
        (status = 200, description = "Share recorded", body = ShareResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "projects"
)]
pub async fn projects_share_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let actor = AuthenticatedUser::admin();
    let exists = Project::find_by_id(state.pool(), &actor, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Project::get_resource_type(), e))?
        .is_some();

    if !exists {
        return Err(WebError::resource_not_found(Project::get_resource_type()));
    }

    let shares = Project::share(state.pool(), &actor, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Project::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(ShareResponse { shares })))
}
