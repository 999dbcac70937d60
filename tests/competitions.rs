//! Competition and learning-dashboard flows. The test server runs without a
//! configured text generator, so every submission lands on the default score.

mod common;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::common::{Action, Flow, setup_server, setup_test_db, signup_action};

#[tokio::test]
async fn competition_submit_flow_test() {
    let pool = setup_test_db().await;
    let mut server = setup_server(&pool).await;

    let competition_id = common::seed_competition(&pool, "Actuarial Challenge Test").await;
    let submit_path = format!("/api/v1/competitions/{competition_id}/submit");
    let detail_path = format!("/api/v1/competitions/{competition_id}");

    // anonymous listing works
    let resp = server.get("/api/v1/competitions/").await;
    resp.assert_status(StatusCode::OK);
    assert!(resp.text().contains("Actuarial Challenge Test"));

    // submitting requires an account
    let resp = server
        .post(&submit_path)
        .json(&json!({"solution": "PV = 42"}))
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);

    Flow::new()
        .step(signup_action("SOLVER", "SOLVERPASS"))
        // blank solutions are rejected
        .step(
            Action::new("submit_empty", "POST", "dynamic")
                .with_dyn_path({
                    let path = submit_path.clone();
                    move |_| path.clone()
                })
                .with_body(json!({"solution": "   "}))
                .with_expect(StatusCode::BAD_REQUEST),
        )
        // scored with the default since no generator is configured
        .step(
            Action::new("submit", "POST", "dynamic")
                .with_dyn_path({
                    let path = submit_path.clone();
                    move |_| path.clone()
                })
                .with_body(json!({"solution": "Use a two-state Markov model; PV = 42."}))
                .assert_body(|body| {
                    assert!(body.contains("\"score\":75"));
                    assert!(body.contains("\"total_points\":75"));
                }),
        )
        // one submission per competition
        .step(
            Action::new("submit_again", "POST", "dynamic")
                .with_dyn_path({
                    let path = submit_path.clone();
                    move |_| path.clone()
                })
                .with_body(json!({"solution": "second try"}))
                .with_expect(StatusCode::CONFLICT),
        )
        .run_keep_db(&mut server, &pool)
        .await;

    // detail shows the caller's submission and the leaderboard entry
    let resp = server.get(&detail_path).await;
    resp.assert_status(StatusCode::OK);
    let detail: Value = resp.json();
    assert_eq!(detail["user_submission"]["score"], json!(75));
    assert_eq!(detail["leaderboard"][0]["username"], json!("SOLVER"));
    assert_eq!(detail["leaderboard"][0]["score"], json!(75));

    // progress reflects the scored submission
    let resp = server.get("/api/v1/progress/").await;
    resp.assert_status(StatusCode::OK);
    let progress: Value = resp.json();
    assert_eq!(progress["total_points"], json!(75));
    assert_eq!(progress["submissions"], json!(1));

    // recalculate is admin-gated; after promotion it re-runs the scorer,
    // which still lands on the default, so nothing changes
    let recalc_path = format!("/api/v1/competitions/{competition_id}/recalculate");
    let resp = server.post(&recalc_path).await;
    resp.assert_status(StatusCode::FORBIDDEN);

    common::promote_to_admin(&pool, "SOLVER").await;
    let resp = server.post(&recalc_path).await;
    resp.assert_status(StatusCode::OK);
    assert_eq!(resp.json::<Value>()["updated"], json!(0));
}

#[tokio::test]
async fn course_completion_awards_points_once_test() {
    let pool = setup_test_db().await;
    let mut server = setup_server(&pool).await;

    let course_id = common::seed_course(&pool, "Advanced Credibility Theory").await;
    let complete_path = format!("/api/v1/courses/{course_id}/complete");

    // the dashboard is members-only
    let resp = server.get("/api/v1/courses/").await;
    resp.assert_status(StatusCode::UNAUTHORIZED);

    Flow::new()
        .step(signup_action("LEARNER", "LEARNERPASS"))
        .run_keep_db(&mut server, &pool)
        .await;

    let resp = server.get("/api/v1/courses/").await;
    resp.assert_status(StatusCode::OK);
    assert!(resp.text().contains("Advanced Credibility Theory"));

    let resp = server.post(&complete_path).await;
    resp.assert_status(StatusCode::OK);

    // completing twice must not double the points
    let resp = server.post(&complete_path).await;
    resp.assert_status(StatusCode::OK);

    let resp = server.get("/api/v1/progress/").await;
    let progress: Value = resp.json();
    assert_eq!(progress["total_points"], json!(100));
    assert_eq!(progress["completed_courses"], json!(1));
}

#[tokio::test]
async fn generation_routes_require_admin_and_configuration_test() {
    let pool = setup_test_db().await;
    let mut server = setup_server(&pool).await;

    Flow::new()
        .step(signup_action("CHAIR", "CHAIRPASS"))
        .run_keep_db(&mut server, &pool)
        .await;

    // members cannot trigger generation
    let resp = server
        .post("/api/v1/courses/generate")
        .json(&json!({"topic": "credibility theory"}))
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);

    let resp = server.post("/api/v1/competitions/generate").await;
    resp.assert_status(StatusCode::FORBIDDEN);

    // admins can, but the test server has no generator configured
    common::promote_to_admin(&pool, "CHAIR").await;

    let resp = server
        .post("/api/v1/courses/generate")
        .json(&json!({"topic": "credibility theory"}))
        .await;
    resp.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let resp = server.post("/api/v1/competitions/generate").await;
    resp.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}
