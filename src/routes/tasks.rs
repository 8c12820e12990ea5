use crate::{
    auth::{AuthenticatedUser, MessageResponse},
    error::{messages, AppError},
    models::TaskInput,
    services::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

/// Retrieves the authenticated user's tasks.
///
/// Tasks are ordered by due date, earliest first; tasks without a due date come last.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects.
/// - `401` / `403`: missing or invalid bearer token (from `AuthMiddleware`).
/// - `500 Internal Server Error`: database failure.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let list = tasks.list(user.id()).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`, `category`: required, non-empty.
/// - `description` (optional).
/// - `dueDate` (optional): `YYYY-MM-DD`, ISO date-time, or `null`.
///
/// ## Responses:
/// - `201 Created`: the persisted `Task`, including its id and `created_at`.
/// - `400 Bad Request`: missing title/category or malformed due date.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = tasks.create(user.id(), task_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves one task.
///
/// ## Responses:
/// - `200 OK`: the `Task`.
/// - `404 Not Found`: absent, or owned by someone else.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task = tasks.get(user.id(), task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Updates a task.
///
/// Title, description, category and due date are replaced by the body as sent; an
/// omitted `completed` keeps its current value.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `400 Bad Request`: missing title/category or malformed due date.
/// - `404 Not Found`: absent, or owned by someone else.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
    task_id: web::Path<i64>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = tasks
        .update(user.id(), task_id.into_inner(), task_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task permanently.
///
/// ## Responses:
/// - `200 OK`: `{"message": ...}`.
/// - `404 Not Found`: absent, or owned by someone else.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    tasks.delete(user.id(), task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: messages::TASK_DELETED.to_string(),
    }))
}
