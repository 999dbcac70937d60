mod common;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::common::{Action, Flow, setup_server, setup_test_db, signup_action};

#[tokio::test]
async fn post_approval_gate_and_counters_test() {
    let pool = setup_test_db().await;
    let mut server = setup_server(&pool).await;

    Flow::new()
        // posting requires an account
        .step(
            Action::new("post_unauthenticated", "POST", "/api/v1/posts/")
                .with_body(json!({"title": "nope", "body": "nope"}))
                .with_expect(StatusCode::UNAUTHORIZED),
        )
        .step(signup_action("WRITER", "WRITERPASS"))
        .step(
            Action::new("post_create", "POST", "/api/v1/posts/")
                .with_body(json!({
                    "title": "Mortality tables through the ages",
                    "body": "From Halley to continuous mortality investigation.",
                }))
                .with_save_as("post")
                .assert_body(|body| {
                    // fresh posts wait for approval
                    assert!(body.contains("\"is_approved\":false"));
                }),
        )
        // not approved yet -> hidden from the public page
        .step(
            Action::new("post_page_empty", "GET", "/api/v1/posts/page")
                .with_param("limit", "10")
                .with_param("offset", "0")
                .assert_body(|body| {
                    assert!(body.contains("\"total\":0"));
                }),
        )
        // and its detail page 404s
        .step(
            Action::new("post_hidden_detail", "GET", "dynamic")
                .with_dyn_path(|ctx| {
                    format!("/api/v1/posts/{}", ctx.get("post")["id"].as_str().unwrap())
                })
                .with_expect(StatusCode::NOT_FOUND),
        )
        // a regular member cannot approve
        .step(
            Action::new("post_approve_forbidden", "POST", "dynamic")
                .with_dyn_path(|ctx| {
                    format!(
                        "/api/v1/posts/{}/approve",
                        ctx.get("post")["id"].as_str().unwrap()
                    )
                })
                .with_expect(StatusCode::FORBIDDEN),
        )
        .run_keep_db(&mut server, &pool)
        .await;

    // promote the author; the middleware re-reads the role on every request,
    // so the existing session cookie now carries admin rights
    common::promote_to_admin(&pool, "WRITER").await;

    let post_id: uuid::Uuid = sqlx::query_scalar(
        "SELECT id FROM posts WHERE title = 'Mortality tables through the ages'",
    )
    .fetch_one(&pool.pool)
    .await
    .unwrap();

    let resp = server.post(&format!("/api/v1/posts/{post_id}/approve")).await;
    resp.assert_status(StatusCode::OK);

    let resp = server
        .get("/api/v1/posts/page")
        .add_query_param("limit", "10")
        .add_query_param("offset", "0")
        .await;
    resp.assert_status(StatusCode::OK);
    let page: Value = resp.json();
    assert_eq!(page["total"], json!(1));

    let resp = server.post(&format!("/api/v1/posts/{post_id}/like")).await;
    resp.assert_status(StatusCode::OK);
    assert_eq!(resp.json::<Value>()["likes"], json!(1));

    let resp = server.post(&format!("/api/v1/posts/{post_id}/like")).await;
    assert_eq!(resp.json::<Value>()["likes"], json!(2));

    let resp = server.post(&format!("/api/v1/posts/{post_id}/share")).await;
    assert_eq!(resp.json::<Value>()["shares"], json!(1));

    let resp = server
        .post(&format!("/api/v1/posts/{post_id}/comments"))
        .json(&json!({"body": "Great overview!"}))
        .await;
    resp.assert_status(StatusCode::OK);

    let resp = server.get(&format!("/api/v1/posts/{post_id}")).await;
    resp.assert_status(StatusCode::OK);
    let detail: Value = resp.json();
    assert_eq!(detail["likes"], json!(2));
    assert_eq!(detail["shares"], json!(1));
    assert_eq!(detail["comments"][0]["body"], json!("Great overview!"));
}
