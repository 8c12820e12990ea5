use actix_web::{get, http::Method, web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{messages, AppError};

/// Location of the browser client's `index.html`.
#[derive(Debug, Clone)]
pub struct AppShell {
    index: PathBuf,
}

impl AppShell {
    pub fn new(frontend_dir: impl Into<PathBuf>) -> Self {
        Self {
            index: frontend_dir.into().join("index.html"),
        }
    }
}

/// Health check endpoint
///
/// Returns the current status of the API and timestamp.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    }))
}

/// Fallback for every unmatched route.
///
/// `GET`/`HEAD` requests receive the client application shell so the browser app can
/// take over; anything else is a JSON 404.
pub async fn app_shell(
    req: HttpRequest,
    shell: web::Data<AppShell>,
) -> Result<HttpResponse, AppError> {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return Err(AppError::NotFound(messages::ROUTE_NOT_FOUND.into()));
    }

    match tokio::fs::read(&shell.index).await {
        Ok(html) => Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("application shell missing at {}", shell.index.display());
            Ok(HttpResponse::NotFound()
                .content_type("text/plain; charset=utf-8")
                .body(format!(
                    "Arquivo não encontrado: {}. Verifique se a estrutura de pastas está correta.",
                    shell.index.display()
                )))
        }
        Err(e) => Err(AppError::InternalServerError(format!(
            "failed to read {}: {}",
            shell.index.display(),
            e
        ))),
    }
}
