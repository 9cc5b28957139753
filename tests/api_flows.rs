mod common;

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use common::*;
use serde_json::Value;

use registrar::api::{auth, handlers, AppState};
use registrar::error::AppError;
use registrar::models::*;
use registrar::storage::{MemoryStore, Storage};

fn state() -> AppState {
    AppState::new(Arc::new(MemoryStore::new()))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        format!("Bearer {}", token).parse().unwrap(),
    );
    headers
}

#[tokio::test]
async fn login_me_logout_round_trip() {
    let state = state();
    state
        .storage
        .create_user(NewUser {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            email: "admin@example.edu".to_string(),
            role: UserRole::Admin,
            name: "Admin".to_string(),
            profile_image: None,
        })
        .await
        .unwrap();

    let response = auth::login(
        State(state.clone()),
        Json(auth::LoginRequest {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("registrar_session="));

    let body = json_body(response).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["username"], "admin");
    // The plaintext password never leaves the store.
    assert!(body["user"].get("password").is_none());

    let me = auth::me(State(state.clone()), bearer(&token)).await.unwrap();
    assert_eq!(me.0.username, "admin");

    // The cookie works as well as the bearer header.
    let mut cookie_headers = HeaderMap::new();
    cookie_headers.insert(
        header::COOKIE,
        format!("registrar_session={}", token).parse().unwrap(),
    );
    let me = auth::me(State(state.clone()), cookie_headers).await.unwrap();
    assert_eq!(me.0.username, "admin");

    auth::logout(State(state.clone()), bearer(&token))
        .await
        .unwrap();
    let err = auth::me(State(state), bearer(&token)).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let state = state();
    state
        .storage
        .create_user(new_user("admin", UserRole::Admin))
        .await
        .unwrap();

    let err = auth::login(
        State(state),
        Json(auth::LoginRequest {
            username: "admin".to_string(),
            password: "wrong".to_string(),
        }),
    )
    .await
    .err()
    .expect("login with wrong password should be an error");
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn a_user_gets_at_most_one_student_profile() {
    let state = state();
    let user = state
        .storage
        .create_user(new_user("jpark", UserRole::Student))
        .await
        .unwrap();

    let new_profile = |code: &str| NewStudent {
        user_id: user.id,
        student_code: code.to_string(),
        program: "CS".to_string(),
        year_level: 1,
        status: ProfileStatus::Active,
        enrollment_date: date(2024, 9, 2),
    };

    let (status, _) = handlers::create_student(State(state.clone()), Json(new_profile("S-001")))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    // Distinct code, same user: the profile invariant trips first.
    let err = handlers::create_student(State(state), Json(new_profile("S-002")))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn user_creation_validates_shape_before_the_store() {
    let state = state();

    let mut bad_email = new_user("jpark", UserRole::Student);
    bad_email.email = "not-an-email".to_string();
    let err = handlers::create_user(State(state.clone()), Json(bad_email))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let bad_username = new_user("x", UserRole::Student);
    let err = handlers::create_user(State(state.clone()), Json(bad_username))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Nothing was inserted by the rejected requests.
    assert!(state.storage.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_rows_map_to_not_found() {
    let state = state();

    let err = handlers::get_user(State(state.clone()), Path(1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = handlers::student_details(State(state.clone()), Path(1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = handlers::delete_course(State(state), Path(1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
