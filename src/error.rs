//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every variant maps onto one HTTP status and is rendered as a JSON body of the form
//! `{"error": "<message>"}` so the browser client can show it as a notification.
//!
//! Persistence and hashing failures are logged with their full detail but reach the
//! client only as a generic message.

use actix_web::{
    error::{JsonPayloadError, PathError, ResponseError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Client-facing messages.
pub mod messages {
    pub const ALL_FIELDS_REQUIRED: &str = "Todos os campos são obrigatórios";
    pub const CREDENTIALS_REQUIRED: &str = "Email e senha são obrigatórios";
    pub const TITLE_AND_CATEGORY_REQUIRED: &str = "Título e categoria são obrigatórios";
    pub const EMAIL_IN_USE: &str = "Email já está em uso";
    pub const INVALID_CREDENTIALS: &str = "Credenciais inválidas";
    pub const UNAUTHORIZED: &str = "Não autorizado";
    pub const INVALID_TOKEN: &str = "Token inválido ou expirado";
    pub const TASK_NOT_FOUND: &str = "Tarefa não encontrada";
    pub const INVALID_DUE_DATE: &str = "Data de vencimento inválida";
    pub const INVALID_BODY: &str = "Corpo da requisição inválido";
    pub const INVALID_TASK_ID: &str = "Identificador de tarefa inválido";
    pub const SERVER_ERROR: &str = "Erro interno do servidor";
    pub const USER_CREATED: &str = "Usuário criado com sucesso";
    pub const TASK_DELETED: &str = "Tarefa excluída com sucesso";
    pub const ROUTE_NOT_FOUND: &str = "Rota não encontrada";
}

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed input (HTTP 400).
    ValidationError(String),
    /// The email is already registered (HTTP 400).
    Conflict(String),
    /// No credentials were presented, or login credentials were rejected (HTTP 401).
    Unauthorized(String),
    /// A bearer token was presented but failed verification (HTTP 403).
    Forbidden(String),
    /// The resource does not exist or is not owned by the caller (HTTP 404).
    NotFound(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Failure reported by the database driver (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// The message placed in the `error` field of the response body.
    pub fn client_message(&self) -> &str {
        match self {
            AppError::ValidationError(msg)
            | AppError::Conflict(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg) => msg,
            // Internal detail stays in the logs.
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                messages::SERVER_ERROR
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.client_message()
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound`; anything else is logged and becomes `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound(messages::TASK_NOT_FOUND.into()),
            _ => {
                log::error!("database error: {}", error);
                AppError::DatabaseError(error.to_string())
            }
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// Validated request structs carry the client message on each field rule, so the
/// first message found is used verbatim.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let message = errors
            .field_errors()
            .into_values()
            .flatten()
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        AppError::ValidationError(message)
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Forbidden`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        log::debug!("token rejected: {}", error);
        AppError::Forbidden(messages::INVALID_TOKEN.into())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        log::error!("password hashing error: {}", error);
        AppError::InternalServerError(error.to_string())
    }
}

/// Renders JSON body extraction failures (malformed JSON, wrong types) as a 400.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("rejected request body: {}", err);
    AppError::ValidationError(messages::INVALID_BODY.into()).into()
}

/// Renders path extraction failures (e.g. a non-numeric task id) as a 400.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("rejected path parameter: {}", err);
    AppError::ValidationError(messages::INVALID_TASK_ID.into()).into()
}
