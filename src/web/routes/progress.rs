use axum::{
    Json, Router, extract::State, http::StatusCode, middleware, response::IntoResponse,
    routing::get,
};

use crate::{
    model::{
        ResourceTyped,
        entity::{Course, Submission, UserProgress},
    },
    web::{
        AppState, RequestContext, WebError, WebResult, dto::progress::ProgressResponse,
        error::ErrorResponse, middlewares,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(progress_get_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/progress/",
    description = "Get current member's dashboard numbers",
    responses(
        (status = 200, description = "Progress found", body = ProgressResponse),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "progress",
    security(
        ("cookie" = [])
    )
)]
pub async fn progress_get_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;

    let (progress, completed_courses, submissions) = tokio::try_join!(
        UserProgress::get_or_create(state.pool(), &user),
        Course::completed_count(state.pool(), &user),
        Submission::count_for(state.pool(), &user),
    )
    .map_err(|e| WebError::resource_fetch_error(UserProgress::get_resource_type(), e))?;

    let res = ProgressResponse::new(progress.total_points(), completed_courses, submissions);

    Ok((StatusCode::OK, Json(res)))
}
