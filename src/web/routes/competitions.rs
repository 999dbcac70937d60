use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    ai,
    model::{
        CrudRepository, ResourceTyped,
        entity::{
            Competition, CompetitionCreate, LeaderboardRow, Submission, SubmissionCreate,
            UserProgress,
        },
    },
    web::{
        AppState, AuthenticatedUser, RequestContext, UserRole, WebError, WebResult,
        dto::competitions::{
            CompetitionDetailResponse, RecalculateResponse, SubmitSolutionRequest,
            SubmitSolutionResponse,
        },
        error::ErrorResponse,
        middlewares,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(competitions_list_handler))
        .route("/generate", post(competitions_generate_handler))
        .route("/{id}", get(competitions_get_handler))
        .route("/{id}/submit", post(competitions_submit_handler))
        .route("/{id}/recalculate", post(competitions_recalculate_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/competitions/",
    description = "List active competitions, newest first",
    responses(
        (status = 200, description = "Competitions collected", body = Vec<Competition>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "competitions"
)]
pub async fn competitions_list_handler(State(state): State<AppState>) -> WebResult<impl IntoResponse> {
    let actor = AuthenticatedUser::admin();
    let competitions = Competition::list(state.pool(), &actor, 100, 0)
        .await
        .map_err(|e| WebError::resource_fetch_error(Competition::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(competitions)))
}

#[utoipa::path(
    get,
    path = "/api/v1/competitions/{id}",
    description = "Competition detail with the caller's submission and the top-10 leaderboard",
    responses(
        (status = 200, description = "Competition found", body = CompetitionDetailResponse),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 404, description = "Competition not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "competitions"
)]
pub async fn competitions_get_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let competition = Competition::find_by_id(state.pool(), &user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Competition::get_resource_type(), e))?;

    let Some(competition) = competition else {
        return Err(WebError::resource_not_found(
            Competition::get_resource_type(),
        ));
    };

    let user_submission = Submission::find_by_participant(state.pool(), &user, competition.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(Submission::get_resource_type(), e))?;

    let leaderboard = LeaderboardRow::top_ten(state.pool(), &user, competition.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(Submission::get_resource_type(), e))?;

    Ok((
        StatusCode::OK,
        Json(CompetitionDetailResponse {
            competition,
            user_submission,
            leaderboard,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/competitions/{id}/submit",
    description = "Submit a solution; it is scored immediately and the score is final",
    request_body = SubmitSolutionRequest,
    responses(
        (status = 200, description = "Solution submitted and scored", body = SubmitSolutionResponse),
        (status = 400, description = "Empty solution", body = ErrorResponse),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 404, description = "Competition not found", body = ErrorResponse),
        (status = 409, description = "Already submitted", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "competitions"
)]
pub async fn competitions_submit_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ctx: RequestContext,
    Json(payload): Json<SubmitSolutionRequest>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;

    if payload.solution.trim().is_empty() {
        return Err(WebError::submission_empty());
    }

    let competition = Competition::find_by_id(state.pool(), &user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Competition::get_resource_type(), e))?;

    let Some(competition) = competition else {
        return Err(WebError::resource_not_found(
            Competition::get_resource_type(),
        ));
    };

    let existing = Submission::find_by_participant(state.pool(), &user, competition.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(Submission::get_resource_type(), e))?;

    if existing.is_some() {
        return Err(WebError::submission_duplicate());
    }

    let submission = Submission::create(
        state.pool(),
        &user,
        SubmissionCreate::new(competition.id(), user.user_id(), payload.solution),
    )
    .await
    .map_err(|e| WebError::resource_fetch_error(Submission::get_resource_type(), e))?;

    // scoring never fails; worst case it falls back to the default score
    let score = ai::evaluate_submission(
        state.generator(),
        competition.problem_statement(),
        submission.solution(),
    )
    .await;

    Submission::set_score(state.pool(), &user, submission.id(), score)
        .await
        .map_err(|e| WebError::resource_fetch_error(Submission::get_resource_type(), e))?;

    let total_points = UserProgress::add_points(state.pool(), &user, user.user_id(), score)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserProgress::get_resource_type(), e))?;

    Ok((
        StatusCode::OK,
        Json(SubmitSolutionResponse {
            score,
            total_points,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/competitions/generate",
    description = "Generate a fresh monthly competition and retire the running ones (admin only)",
    responses(
        (status = 200, description = "Competition created", body = Competition),
        (status = 403, description = "You're not an admin to do this", body = ErrorResponse),
        (status = 503, description = "Generation is not configured", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "competitions"
)]
pub async fn competitions_generate_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    if user.user_role() != UserRole::Admin {
        return Err(WebError::resource_forbidden(
            Competition::get_resource_type(),
        ));
    }

    let Some(generator) = state.generator() else {
        return Err(WebError::generation_unavailable());
    };

    let problem_statement = ai::generate_competition_problem(generator)
        .await
        .map_err(|e| {
            tracing::warn!("competition generation failed: {e}");
            WebError::generation_failed()
        })?;

    Competition::deactivate_all(state.pool(), &user)
        .await
        .map_err(|e| WebError::resource_fetch_error(Competition::get_resource_type(), e))?;

    let now = Utc::now();
    let created = Competition::create(
        state.pool(),
        &user,
        CompetitionCreate {
            title: format!("Actuarial Challenge {}", now.format("%B %Y")),
            description: "Monthly actuarial competition testing your problem-solving skills"
                .to_string(),
            problem_statement,
            start_date: now,
            end_date: now + Duration::days(30),
        },
    )
    .await
    .map_err(|e| WebError::resource_fetch_error(Competition::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(created)))
}

#[utoipa::path(
    post,
    path = "/api/v1/competitions/{id}/recalculate",
    description = "Re-score every submission of a competition and adjust point totals (admin only)",
    responses(
        (status = 200, description = "Submissions re-scored", body = RecalculateResponse),
        (status = 403, description = "You're not an admin to do this", body = ErrorResponse),
        (status = 404, description = "Competition not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "competitions"
)]
pub async fn competitions_recalculate_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    if user.user_role() != UserRole::Admin {
        return Err(WebError::resource_forbidden(
            Competition::get_resource_type(),
        ));
    }

    let competition = Competition::find_by_id(state.pool(), &user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Competition::get_resource_type(), e))?;

    let Some(competition) = competition else {
        return Err(WebError::resource_not_found(
            Competition::get_resource_type(),
        ));
    };

    let submissions = Submission::all_by_competition(state.pool(), &user, competition.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(Submission::get_resource_type(), e))?;

    let mut updated = 0usize;
    for submission in submissions {
        let new_score = ai::evaluate_submission(
            state.generator(),
            competition.problem_statement(),
            submission.solution(),
        )
        .await;

        let old_score = submission.score().unwrap_or(0);
        if new_score == old_score {
            continue;
        }

        Submission::set_score(state.pool(), &user, submission.id(), new_score)
            .await
            .map_err(|e| WebError::resource_fetch_error(Submission::get_resource_type(), e))?;

        UserProgress::add_points(
            state.pool(),
            &user,
            submission.participant_id(),
            new_score - old_score,
        )
        .await
        .map_err(|e| WebError::resource_fetch_error(UserProgress::get_resource_type(), e))?;

        updated += 1;
    }

    Ok((StatusCode::OK, Json(RecalculateResponse { updated })))
}
