mod common;
use acsa::model::entity::Member;
use acsa::web::middlewares::AUTH_TOKEN;
use axum::http::StatusCode;
use serde_json::json;
use tower_cookies::cookie::SameSite;

use crate::common::{Action, Flow, setup_server, setup_test_db, signin_action, signup_action};

#[tokio::test]
async fn route_signup_test() {
    let pool = setup_test_db().await;
    let mut server = setup_server(&pool).await;

    Flow::new()
        .step(
            signup_action("foobar", "foobaz")
                .assert_cookie(AUTH_TOKEN, |cookie| {
                    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
                    assert_eq!(cookie.path(), Some("/"));
                    assert_eq!(cookie.http_only(), Some(true));
                })
                .assert_body(|body| {
                    let ent: Member = serde_json::from_str(body).expect("Invalid body format");
                    assert_eq!(ent.username(), "foobar");
                    assert_eq!(ent.registration_number(), "REG-foobar");
                })
                .with_expect(StatusCode::OK),
        )
        // try to signup twice
        .step(signup_action("foobar", "foobaz").with_expect(StatusCode::CONFLICT))
        // same registration number under a different username
        .step(
            Action::new("signup_reg_conflict", "POST", "/api/v1/account/signup")
                .with_body(json!({
                    "username": "someone_else",
                    "email": "someone@students.example.ac.ke",
                    "password": "foobaz",
                    "registration_number": "REG-foobar",
                }))
                .with_expect(StatusCode::CONFLICT),
        )
        .run(&mut server, pool)
        .await;
}

#[tokio::test]
async fn route_signin_test() {
    let pool = setup_test_db().await;
    let mut server = setup_server(&pool).await;

    Flow::new()
        .step(signup_action("SIGNINTEST", "SIGNINTEST").with_save_cookies(false))
        .step(
            signin_action("SIGNINTEST", "SIGNINTEST")
                .assert_cookie(AUTH_TOKEN, |cookie| {
                    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
                    assert_eq!(cookie.path(), Some("/"));
                    assert_eq!(cookie.http_only(), Some(true));
                })
                .assert_body(|body| {
                    let ent: Member = serde_json::from_str(body).expect("Invalid JSON format");
                    assert_eq!(ent.username(), "SIGNINTEST");
                })
                .with_expect(StatusCode::OK)
                .with_clear_cookies(true),
        )
        // wrong credentials
        .step(
            signin_action("SIGNINTEST", "WRONGPASSWORD")
                .with_save_cookies(false)
                .with_clear_cookies(true)
                .assert_body(|body| {
                    assert!(body.contains("Authentication error"));
                })
                .with_expect(StatusCode::UNAUTHORIZED),
        )
        // non-existing account
        .step(
            signin_action("nonexisting", "nvm")
                .with_expect(StatusCode::UNAUTHORIZED)
                .assert_body(|body| assert!(body.contains("Authentication error"))),
        )
        .run(&mut server, pool)
        .await;
}

#[tokio::test]
async fn route_user_list_test() {
    let pool = setup_test_db().await;
    let mut server = setup_server(&pool).await;

    Flow::new()
        .step(signup_action("FOOBAR", "FOOBAZ").with_save_cookies(true))
        // try to request without admin perms
        .step(
            Action::new("user_list", "GET", "/api/v1/account/page")
                .assert_body(|body| {
                    assert!(body.contains("error"));
                })
                .with_param("limit", "5")
                .with_param("offset", "0")
                .with_expect(StatusCode::FORBIDDEN)
                .with_save_cookies(true),
        )
        .run_keep_db(&mut server, &pool)
        .await;

    // promote and retry with admin perms
    common::promote_to_admin(&pool, "FOOBAR").await;

    Flow::new()
        .step(
            Action::new("user_list", "GET", "/api/v1/account/page")
                .with_param("limit", "5")
                .with_param("offset", "0")
                .assert_body(|body| {
                    assert!(body.contains("total"));
                    assert!(body.contains("items"));
                })
                .with_expect(StatusCode::OK),
        )
        .run(&mut server, pool)
        .await;
}

#[tokio::test]
async fn route_user_update_test() {
    let pool = setup_test_db().await;
    let mut server = setup_server(&pool).await;

    Flow::new()
        // create a pair of members and save their data to `foobar_user` and `foobar2_user`
        .step(
            signup_action("FOOBAR", "FOOBAZ")
                .with_save_cookies(false)
                .with_save_as("foobar_user"),
        )
        .step(
            signup_action("FOOBAR2", "FOOBAZ2")
                .with_save_cookies(true)
                .with_save_as("foobar2_user"),
        )
        // try to update `foobar_user` without permissions
        .step(
            Action::new("user_update", "PUT", "dynamic")
                .with_dyn_path(|ctx| {
                    let user: Member = ctx.get_json("foobar_user");
                    format!("/api/v1/account/{}", user.id())
                })
                .with_body(json!({
                    "username": "should fail",
                    "email": "should fail",
                    "password": "should fail",
                    "registration_number": "should fail",
                }))
                .with_expect(StatusCode::FORBIDDEN)
                .assert_body(|body| {
                    assert!(body.contains("error"));
                }),
        )
        // try to update self, this one should work
        .step(
            Action::new("user_update", "PUT", "dynamic")
                .with_dyn_path(|ctx| {
                    let user: Member = ctx.get_json("foobar2_user");
                    format!("/api/v1/account/{}", user.id())
                })
                .with_expect(StatusCode::OK)
                .with_body(json!({
                    "username": "FOOBAR3",
                    "email": "foobar3@students.example.ac.ke",
                    "password": "doesn't make any sense",
                    "registration_number": "ignored",
                }))
                .assert_body(|body| {
                    assert!(body.contains("FOOBAR3"));
                }),
        )
        // try to update self to the name of the existing member. This one should fail.
        .step(
            Action::new("user_update", "PUT", "dynamic")
                .with_dyn_path(|ctx| {
                    let user: Member = ctx.get_json("foobar2_user");
                    format!("/api/v1/account/{}", user.id())
                })
                .with_body(json!({
                    "username": "FOOBAR",
                    "email": "foobar@students.example.ac.ke",
                    "password": "doesn't make any sense",
                    "registration_number": "ignored",
                }))
                .with_expect(StatusCode::CONFLICT)
                .assert_body(|body| {
                    assert!(body.contains("error"));
                }),
        )
        .run(&mut server, pool)
        .await;
}

#[tokio::test]
async fn route_user_delete_test() {
    let pool = setup_test_db().await;
    let mut server = setup_server(&pool).await;

    Flow::new()
        .step(
            signup_action("FOOBAR", "FOOBAZ")
                .with_save_cookies(false)
                .with_save_as("foobar"),
        )
        .step(
            signup_action("FOOBAZ", "FOOBAR")
                .with_save_cookies(true)
                .with_save_as("foobaz"),
        )
        // we can't allow everybody to delete anybody ;D
        .step(
            Action::new("user_delete", "DELETE", "dynamic")
                .with_dyn_path(|ctx| {
                    let foobar: Member = ctx.get_json("foobar");
                    format!("/api/v1/account/{}", foobar.id())
                })
                .with_expect(StatusCode::FORBIDDEN)
                .assert_body(|body| {
                    assert!(body.contains("error"));
                }),
        )
        // self deletion is allowed
        .step(
            Action::new("user_delete", "DELETE", "dynamic")
                .with_dyn_path(|ctx| {
                    let foobaz: Member = ctx.get_json("foobaz");
                    format!("/api/v1/account/{}", foobaz.id())
                })
                .with_expect(StatusCode::OK),
        )
        .run(&mut server, pool)
        .await;
}
