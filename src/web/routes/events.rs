use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    model::{
        CrudRepository, ResourceTyped,
        entity::{Event, EventCreate},
    },
    web::{
        AppState, AuthenticatedUser, RequestContext, UserRole, WebError, WebResult,
        error::ErrorResponse, middlewares,
    },
};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct EventFilterQuery {
    /// "upcoming" or "past"; omitted means everything active.
    event_type: Option<String>,
}

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(events_list_handler).post(events_create_handler))
        .route("/{id}", get(events_get_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/events/",
    description = "List active events, optionally filtered by type",
    responses(
        (status = 200, description = "Events collected", body = Vec<Event>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "events"
)]
pub async fn events_list_handler(
    Query(filter): Query<EventFilterQuery>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let actor = AuthenticatedUser::admin();
    let events = match filter.event_type.as_deref() {
        Some(event_type) => Event::all_by_type(state.pool(), &actor, event_type).await,
        None => Event::all_active(state.pool(), &actor).await,
    }
    .map_err(|e| WebError::resource_fetch_error(Event::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(events)))
}

#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "events"
)]
pub async fn events_get_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let actor = AuthenticatedUser::admin();
    let event = Event::find_by_id(state.pool(), &actor, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Event::get_resource_type(), e))?;

    match event {
        Some(event) => Ok((StatusCode::OK, Json(event))),
        None => Err(WebError::resource_not_found(Event::get_resource_type())),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/events/",
    description = "Create an event (admin only)",
    request_body = EventCreate,
    responses(
        (status = 200, description = "Event created", body = Event),
        (status = 403, description = "You're not an admin to do this", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "events"
)]
pub async fn events_create_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<EventCreate>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    if user.user_role() != UserRole::Admin {
        return Err(WebError::resource_forbidden(Event::get_resource_type()));
    }

    let created = Event::create(state.pool(), &user, payload)
        .await
        .map_err(|e| WebError::resource_fetch_error(Event::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(created)))
}
