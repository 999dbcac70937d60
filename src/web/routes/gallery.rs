use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    model::{
        ResourceTyped,
        entity::{Album, AlbumCreate, Photo, PhotoCreate},
    },
    web::{
        AppState, AuthenticatedUser, RequestContext, UserRole, WebError, WebResult,
        dto::gallery::AlbumWithPhotos, error::ErrorResponse, middlewares,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(albums_list_handler).post(albums_create_handler))
        .route("/{id}", get(albums_get_handler))
        .route("/{id}/photos", post(photos_add_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/gallery/",
    description = "List active photo albums",
    responses(
        (status = 200, description = "Albums collected", body = Vec<Album>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "gallery"
)]
pub async fn albums_list_handler(State(state): State<AppState>) -> WebResult<impl IntoResponse> {
    let actor = AuthenticatedUser::admin();
    let albums = Album::all_active(state.pool(), &actor)
        .await
        .map_err(|e| WebError::resource_fetch_error(Album::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(albums)))
}

#[utoipa::path(
    get,
    path = "/api/v1/gallery/{id}",
    description = "Fetch an album with its photos",
    responses(
        (status = 200, description = "Album found", body = AlbumWithPhotos),
        (status = 404, description = "Album not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "gallery"
)]
pub async fn albums_get_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let actor = AuthenticatedUser::admin();
    let album = Album::find_by_id(state.pool(), &actor, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Album::get_resource_type(), e))?;

    let Some(album) = album else {
        return Err(WebError::resource_not_found(Album::get_resource_type()));
    };

    let photos = Photo::all_by_album(state.pool(), &actor, album.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(Photo::get_resource_type(), e))?;

    Ok((
        StatusCode::OK,
        Json(AlbumWithPhotos::from_entity(album, photos)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/gallery/",
    description = "Create an album (admin only)",
    request_body = AlbumCreate,
    responses(
        (status = 200, description = "Album created", body = Album),
        (status = 403, description = "You're not an admin to do this", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "gallery"
)]
pub async fn albums_create_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<AlbumCreate>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    if user.user_role() != UserRole::Admin {
        return Err(WebError::resource_forbidden(Album::get_resource_type()));
    }

    let created = Album::create(state.pool(), &user, payload)
        .await
        .map_err(|e| WebError::resource_fetch_error(Album::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(created)))
}

#[derive(Debug, serde::Deserialize, utoipa::ToSchema)]
pub struct PhotoAddBody {
    pub caption: Option<String>,
    pub image_path: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/gallery/{id}/photos",
    description = "Attach a photo to an album (admin only)",
    request_body = PhotoAddBody,
    responses(
        (status = 200, description = "Photo added", body = Photo),
        (status = 403, description = "You're not an admin to do this", body = ErrorResponse),
        (status = 404, description = "Album not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "gallery"
)]
pub async fn photos_add_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ctx: RequestContext,
    Json(payload): Json<PhotoAddBody>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    if user.user_role() != UserRole::Admin {
        return Err(WebError::resource_forbidden(Photo::get_resource_type()));
    }

    let album = Album::find_by_id(state.pool(), &user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Album::get_resource_type(), e))?;

    if album.is_none() {
        return Err(WebError::resource_not_found(Album::get_resource_type()));
    }

    let created = Photo::create(
        state.pool(),
        &user,
        PhotoCreate {
            album_id: id,
            caption: payload.caption.unwrap_or_default(),
            image_path: payload.image_path,
        },
    )
    .await
    .map_err(|e| WebError::resource_fetch_error(Photo::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(created)))
}
