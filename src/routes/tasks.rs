use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{CreateTaskRequest, Task, TaskStatus, UpdateTaskRequest},
    motivation::MotivationService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

const TASK_COLUMNS: &str = "id, title, description, status, created_at, due_date, username";

/// Retrieves the authenticated user's tasks, newest-created first.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects owned by the caller.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `500 Internal Server Error`: For database errors.
#[get("")]
pub async fn get_tasks(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE username = $1 ORDER BY created_at DESC"
    ))
    .bind(user.username())
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Retrieves a single task by id.
///
/// Tasks owned by other users answer 404, exactly like missing ones, so the
/// response never reveals whether a foreign id exists.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i64>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();

    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND username = $2"
    ))
    .bind(task_id)
    .bind(user.username())
    .fetch_optional(&**pool)
    .await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound(format!(
            "Task with id {} not found",
            task_id
        ))),
    }
}

/// Creates a new task for the authenticated user.
///
/// The status is forced to `pending` and the creation timestamp is assigned
/// server-side in UTC; neither is taken from the client. The owner is the
/// authenticated caller, never a client-supplied field.
///
/// ## Request Body:
/// - `title`: required, non-empty, at most 150 characters.
/// - `description` (optional)
/// - `dueDate` (optional)
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `400 Bad Request`: If input validation fails (e.g. empty title).
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `500 Internal Server Error`: For database errors.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<CreateTaskRequest>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let input = task_data.into_inner();

    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (title, description, status, created_at, due_date, username)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(input.title)
    .bind(input.description)
    .bind(TaskStatus::Pending)
    .bind(Utc::now())
    .bind(input.due_date)
    .bind(user.username())
    .fetch_one(&**pool)
    .await?;

    log::info!("task created id={} user={}", task.id, user.username());

    Ok(HttpResponse::Created().json(task))
}

/// Updates an existing task (full replace of title, description, status and
/// due date).
///
/// When the update transitions the task into `completed` from any other
/// status, the response is `200 OK` with the updated task and a motivational
/// message; every other successful update answers `204 No Content`.
///
/// A lost-update conflict at save time is retried exactly once by re-checking
/// existence: if the row vanished the client gets 404, otherwise the conflict
/// surfaces as a server error rather than being silently resolved.
///
/// ## Responses:
/// - `204 No Content`: Updated without completing the task.
/// - `200 OK`: `{"task": ..., "motivationalMessage": ...}` on completion.
/// - `400 Bad Request`: If input validation fails.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `404 Not Found`: If the task does not exist or is owned by someone else.
/// - `500 Internal Server Error`: For database errors or a surviving conflict.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i64>,
    task_data: web::Json<UpdateTaskRequest>,
    user: AuthenticatedUser,
    motivation: web::Data<MotivationService>,
) -> Result<HttpResponse, AppError> {
    task_data.validate()?;
    let task_id = task_id.into_inner();
    let input = task_data.into_inner();

    let existing = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND username = $2"
    ))
    .bind(task_id)
    .bind(user.username())
    .fetch_optional(&**pool)
    .await?;

    let existing = match existing {
        Some(task) => task,
        None => {
            return Err(AppError::NotFound(format!(
                "Task with id {} not found",
                task_id
            )))
        }
    };

    let completing =
        existing.status != TaskStatus::Completed && input.status == TaskStatus::Completed;

    let updated = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks
         SET title = $1, description = $2, status = $3, due_date = $4
         WHERE id = $5 AND username = $6
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.status)
    .bind(input.due_date)
    .bind(task_id)
    .bind(user.username())
    .fetch_optional(&**pool)
    .await?;

    let updated = match updated {
        Some(task) => task,
        None => {
            // The row matched the first read but not the save: re-check
            // existence once before deciding between 404 and a hard error.
            log::warn!("update conflict on task id={} user={}", task_id, user.username());
            let exists: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = $1 AND username = $2)",
            )
            .bind(task_id)
            .bind(user.username())
            .fetch_one(&**pool)
            .await?;

            if !exists {
                return Err(AppError::NotFound(format!(
                    "Task with id {} not found",
                    task_id
                )));
            }
            return Err(AppError::InternalServerError(
                "Concurrent update conflict".into(),
            ));
        }
    };

    log::info!("task updated id={} user={}", task_id, user.username());

    if completing {
        let message = motivation.random_message();
        Ok(HttpResponse::Ok().json(json!({
            "task": updated,
            "motivationalMessage": message
        })))
    } else {
        Ok(HttpResponse::NoContent().finish())
    }
}

/// Deletes a task by id. Missing and foreign tasks both answer 404.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i64>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();

    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND username = $2")
        .bind(task_id)
        .bind(user.username())
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Task with id {} not found",
            task_id
        )));
    }

    log::info!("task deleted id={} user={}", task_id, user.username());

    Ok(HttpResponse::NoContent().finish())
}
