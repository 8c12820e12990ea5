#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test,
};
use serde_json::json;
use std::path::PathBuf;

use taskboard::{db, AppState};

pub const JWT_SECRET: &str = "integration-test-secret";

/// Fresh in-memory database and services for one test.
pub async fn test_state() -> AppState {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to create in-memory test DB");
    AppState::from_parts(pool, JWT_SECRET, PathBuf::from("frontend"))
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Registers a user through the API, logs in, and returns the bearer token.
pub async fn register_and_login<S, B>(app: &S, name: &str, email: &str, password: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "name": name, "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "Failed to register {}", email);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "Failed to log in {}", email);

    let body: serde_json::Value = test::read_body_json(resp).await;
    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}
