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
        entity::{BlogPost, BlogPostCreate, PostComment, PostCommentCreate},
    },
    web::{
        AppState, RequestContext, UserRole, WebError, WebResult,
        dto::posts::{
            CommentCreateBody, LikeResponse, PostCreateBody, PostDetailResponse, ShareResponse,
        },
        error::ErrorResponse,
        middlewares,
        routes::PaginationQuery,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/page", get(posts_list_handler))
        .route("/", post(posts_create_handler))
        .route("/{id}", get(posts_get_handler))
        .route("/{id}/comments", post(posts_comment_handler))
        .route("/{id}/like", post(posts_like_handler))
        .route("/{id}/share", post(posts_share_handler))
        .route("/{id}/approve", post(posts_approve_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

/// Fetches a post visible to the public, i.e. published and approved.
async fn find_visible_post(state: &AppState, id: Uuid) -> WebResult<BlogPost> {
    let user = crate::web::AuthenticatedUser::admin();
    let post = BlogPost::find_by_id(state.pool(), &user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(BlogPost::get_resource_type(), e))?;

    match post {
        Some(post) if post.is_published() && post.is_approved() => Ok(post),
        _ => Err(WebError::resource_not_found(BlogPost::get_resource_type())),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/page",
    description = "Page through published, approved blog posts, newest first",
    responses(
        (status = 200, description = "Returns requested page", body = crate::model::Page<BlogPost>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "posts"
)]
pub async fn posts_list_handler(
    Query(page): Query<PaginationQuery>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let actor = crate::web::AuthenticatedUser::admin();
    let posts = BlogPost::page(state.pool(), &actor, page.limit(), page.offset())
        .await
        .map_err(|e| WebError::resource_fetch_error(BlogPost::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(posts)))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    description = "Fetch a post with its comments",
    responses(
        (status = 200, description = "Post found", body = PostDetailResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "posts"
)]
pub async fn posts_get_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let post = find_visible_post(&state, id).await?;

    let actor = crate::web::AuthenticatedUser::admin();
    let comments = PostComment::all_by_post(state.pool(), &actor, post.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(PostComment::get_resource_type(), e))?;

    Ok((
        StatusCode::OK,
        Json(PostDetailResponse::from_entity(post, comments)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/posts/",
    description = "Submit a post; it stays hidden until an admin approves it",
    request_body = PostCreateBody,
    responses(
        (status = 200, description = "Post created", body = BlogPost),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "posts"
)]
pub async fn posts_create_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<PostCreateBody>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;

    let created = BlogPost::create(
        state.pool(),
        &user,
        BlogPostCreate {
            title: payload.title,
            body: payload.body,
            author_id: user.user_id(),
            is_published: payload.is_published.unwrap_or(true),
        },
    )
    .await
    .map_err(|e| WebError::resource_fetch_error(BlogPost::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(created)))
}

#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/comments",
    description = "Comment on a post",
    request_body = CommentCreateBody,
    responses(
        (status = 200, description = "Comment created", body = PostComment),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "posts"
)]
pub async fn posts_comment_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ctx: RequestContext,
    Json(payload): Json<CommentCreateBody>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let post = find_visible_post(&state, id).await?;

    let created = PostComment::create(
        state.pool(),
        &user,
        PostCommentCreate {
            post_id: post.id(),
            author_id: user.user_id(),
            body: payload.body,
        },
    )
    .await
    .map_err(|e| WebError::resource_fetch_error(PostComment::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(created)))
}

#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/like",
    description = "Like a post, returns the new counter",
    responses(
        (status = 200, description = "Post liked", body = LikeResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "posts"
)]
pub async fn posts_like_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let post = find_visible_post(&state, id).await?;

    let actor = crate::web::AuthenticatedUser::admin();
    let likes = BlogPost::like(state.pool(), &actor, post.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(BlogPost::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(LikeResponse { likes })))
}

#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/share",
    description = "Record a share of a post, returns the new counter",
    responses(
        (status = 200, description = "Share recorded", body = ShareResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "posts"
)]
pub async fn posts_share_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let post = find_visible_post(&state, id).await?;

    let actor = crate::web::AuthenticatedUser::admin();
    let shares = BlogPost::share(state.pool(), &actor, post.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(BlogPost::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(ShareResponse { shares })))
}

#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/approve",
    description = "Approve a submitted post (admin only)",
    responses(
        (status = 200, description = "Post approved"),
        (status = 403, description = "You're not an admin to do this", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "posts"
)]
pub async fn posts_approve_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    if user.user_role() != UserRole::Admin {
        return Err(WebError::resource_forbidden(BlogPost::get_resource_type()));
    }

    let post = BlogPost::find_by_id(state.pool(), &user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(BlogPost::get_resource_type(), e))?;

    if post.is_none() {
        return Err(WebError::resource_not_found(BlogPost::get_resource_type()));
    }

    BlogPost::approve(state.pool(), &user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(BlogPost::get_resource_type(), e))?;

    Ok(StatusCode::OK)
}
