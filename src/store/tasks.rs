use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{Task, TaskFields};

const TASK_COLUMNS: &str =
    "id, user_id, title, description, category, due_date, completed, created_at";

/// Task store over the `tasks` table.
///
/// Every owner-scoped statement filters on `user_id` in SQL.
#[derive(Debug, Clone)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Tasks owned by `user_id`, earliest due date first.
    ///
    /// Tasks without a due date come after every dated task; ties keep creation order.
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Task>, sqlx::Error> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ? \
             ORDER BY due_date IS NULL, due_date ASC, id ASC"
        );
        sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Insert a new, not yet completed task and return its id.
    pub async fn insert(&self, user_id: i64, fields: &TaskFields) -> Result<i64, sqlx::Error> {
        let done = sqlx::query(
            "INSERT INTO tasks (user_id, title, description, category, due_date, completed, created_at) \
             VALUES (?, ?, ?, ?, ?, 0, ?)",
        )
        .bind(user_id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.category)
        .bind(fields.due_date)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(done.last_insert_rowid())
    }

    pub async fn find_by_id_and_user(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Task>, sqlx::Error> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ? AND user_id = ?");
        sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Overwrite the editable columns. Returns the number of rows touched.
    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        fields: &TaskFields,
        completed: bool,
    ) -> Result<u64, sqlx::Error> {
        let done = sqlx::query(
            "UPDATE tasks SET title = ?, description = ?, category = ?, due_date = ?, completed = ? \
             WHERE id = ? AND user_id = ?",
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.category)
        .bind(fields.due_date)
        .bind(completed)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(done.rows_affected())
    }

    /// Permanently remove a task. Returns the number of rows removed.
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<u64, sqlx::Error> {
        let done = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }
}
