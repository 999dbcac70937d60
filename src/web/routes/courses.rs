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
    ai,
    model::{
        CrudRepository, DatabaseError, ResourceTyped,
        entity::{Course, CourseCreate, UserProgress},
    },
    web::{
        AppState, AuthenticatedUser, RequestContext, UserRole, WebError, WebResult,
        dto::courses::GenerateCourseRequest, error::ErrorResponse, middlewares,
    },
};

/// Points awarded for completing a course.
const COURSE_COMPLETION_POINTS: i32 = 100;

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(courses_list_handler))
        .route("/generate", post(courses_generate_handler))
        .route("/{id}", get(courses_get_handler))
        .route("/{id}/complete", post(courses_complete_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/",
    description = "List active courses on the learning dashboard",
    responses(
        (status = 200, description = "Courses collected", body = Vec<Course>),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "courses"
)]
pub async fn courses_list_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let courses = Course::list(state.pool(), &user, 100, 0)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(courses)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    description = "Fetch a course including its lessons",
    responses(
        (status = 200, description = "Course found", body = Course),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "courses"
)]
pub async fn courses_get_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let course = Course::find_by_id(state.pool(), &user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?;

    match course {
        Some(course) => Ok((StatusCode::OK, Json(course))),
        None => Err(WebError::resource_not_found(Course::get_resource_type())),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/courses/{id}/complete",
    description = "Mark a course as completed; awards points the first time only",
    responses(
        (status = 200, description = "Course marked as completed"),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "courses"
)]
pub async fn courses_complete_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let course = Course::find_by_id(state.pool(), &user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?;

    if course.is_none() {
        return Err(WebError::resource_not_found(Course::get_resource_type()));
    }

    let newly_completed = Course::complete_for(state.pool(), &user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?;

    if newly_completed {
        UserProgress::add_points(state.pool(), &user, user.user_id(), COURSE_COMPLETION_POINTS)
            .await
            .map_err(|e| {
                WebError::resource_fetch_error(UserProgress::get_resource_type(), e)
            })?;
    }

    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/v1/courses/generate",
    description = "Generate and persist a course for a topic (admin only)",
    request_body = GenerateCourseRequest,
    responses(
        (status = 200, description = "Course generated", body = Course),
        (status = 403, description = "You're not an admin to do this", body = ErrorResponse),
        (status = 503, description = "Generation is not configured", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "courses"
)]
pub async fn courses_generate_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<GenerateCourseRequest>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    if user.user_role() != UserRole::Admin {
        return Err(WebError::resource_forbidden(Course::get_resource_type()));
    }

    // no key configured -> 503, never a silently persisted fallback course
    if state.generator().is_none() {
        return Err(WebError::generation_unavailable());
    }

    let outline = ai::generate_course_content(
        state.generator(),
        &payload.topic,
        payload.level(),
        payload.duration(),
    )
    .await;

    let create =
        CourseCreate::from_outline(&payload.topic, payload.level(), payload.duration(), outline)
            .map_err(|e| {
                WebError::resource_fetch_error(
                    Course::get_resource_type(),
                    DatabaseError::SerdeError(e),
                )
            })?;

    let course = Course::create(state.pool(), &AuthenticatedUser::admin(), create)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(course)))
}
