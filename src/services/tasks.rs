use crate::error::{messages, AppError};
use crate::models::{Task, TaskInput};
use crate::store::TaskStore;

/// Owner-scoped task CRUD. Every operation takes the authenticated user's id.
#[derive(Debug, Clone)]
pub struct TaskService {
    tasks: TaskStore,
}

fn not_found() -> AppError {
    AppError::NotFound(messages::TASK_NOT_FOUND.into())
}

impl TaskService {
    pub fn new(tasks: TaskStore) -> Self {
        Self { tasks }
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.list_by_user(user_id).await?)
    }

    /// Creates a task for `user_id`. New tasks always start uncompleted.
    pub async fn create(&self, user_id: i64, input: TaskInput) -> Result<Task, AppError> {
        let fields = input.into_fields()?;
        let id = self.tasks.insert(user_id, &fields).await?;
        log::debug!("user {} created task {}", user_id, id);
        self.get(user_id, id).await
    }

    pub async fn get(&self, user_id: i64, task_id: i64) -> Result<Task, AppError> {
        self.tasks
            .find_by_id_and_user(task_id, user_id)
            .await?
            .ok_or_else(not_found)
    }

    /// Replaces title, description, category and due date.
    ///
    /// `completed` keeps its stored value when the input omits it.
    pub async fn update(
        &self,
        user_id: i64,
        task_id: i64,
        input: TaskInput,
    ) -> Result<Task, AppError> {
        let fields = input.into_fields()?;
        let existing = self.get(user_id, task_id).await?;
        let completed = fields.completed.unwrap_or(existing.completed);

        // The row may have been deleted since the read above.
        if self.tasks.update(task_id, user_id, &fields, completed).await? == 0 {
            return Err(not_found());
        }
        self.get(user_id, task_id).await
    }

    pub async fn delete(&self, user_id: i64, task_id: i64) -> Result<(), AppError> {
        if self.tasks.delete(task_id, user_id).await? == 0 {
            return Err(not_found());
        }
        log::debug!("user {} deleted task {}", user_id, task_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::store::UserStore;
    use pretty_assertions::assert_eq;

    async fn setup() -> (TaskService, i64, i64) {
        let pool = db::connect_in_memory().await.unwrap();
        let users = UserStore::new(pool.clone());
        let a = users.insert("A", "a@example.com", "h").await.unwrap();
        let b = users.insert("B", "b@example.com", "h").await.unwrap();
        (TaskService::new(TaskStore::new(pool)), a, b)
    }

    fn input(title: &str, category: &str, due: Option<&str>) -> TaskInput {
        TaskInput {
            title: Some(title.into()),
            category: Some(category.into()),
            due_date: due.map(str::to_string),
            ..Default::default()
        }
    }

    #[actix_rt::test]
    async fn test_create_then_get() {
        let (service, a, _) = setup().await;
        let created = service.create(a, input("Buy milk", "errand", None)).await.unwrap();

        let fetched = service.get(a, created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Buy milk");
        assert_eq!(fetched.category, "errand");
        assert_eq!(fetched.due_date, None);
        assert!(!fetched.completed);
        assert_eq!(fetched.user_id, a);
    }

    #[actix_rt::test]
    async fn test_create_ignores_completed_flag() {
        let (service, a, _) = setup().await;
        let mut body = input("t", "c", None);
        body.completed = Some(true);

        assert!(!service.create(a, body).await.unwrap().completed);
    }

    #[actix_rt::test]
    async fn test_toggle_completed_keeps_other_fields() {
        let (service, a, _) = setup().await;
        let mut body = input("Pay rent", "bills", Some("2024-03-01"));
        body.description = Some("landlord".into());
        let created = service.create(a, body).await.unwrap();

        let toggled = service
            .update(
                a,
                created.id,
                TaskInput {
                    title: Some(created.title.clone()),
                    description: created.description.clone(),
                    category: Some(created.category.clone()),
                    due_date: created.due_date.map(|d| d.to_string()),
                    completed: Some(true),
                },
            )
            .await
            .unwrap();

        assert!(toggled.completed);
        assert_eq!(
            Task {
                completed: false,
                ..toggled
            },
            created
        );
    }

    #[actix_rt::test]
    async fn test_update_without_completed_keeps_stored_value() {
        let (service, a, _) = setup().await;
        let created = service.create(a, input("t", "c", None)).await.unwrap();
        let mut done = input("t", "c", None);
        done.completed = Some(true);
        service.update(a, created.id, done).await.unwrap();

        let renamed = service
            .update(a, created.id, input("renamed", "c", None))
            .await
            .unwrap();
        assert!(renamed.completed);
        assert_eq!(renamed.title, "renamed");
    }

    #[actix_rt::test]
    async fn test_update_replaces_omitted_fields() {
        let (service, a, _) = setup().await;
        let mut body = input("t", "c", Some("2024-01-01"));
        body.description = Some("details".into());
        let created = service.create(a, body).await.unwrap();

        let updated = service
            .update(a, created.id, input("t", "c", None))
            .await
            .unwrap();
        assert_eq!(updated.description, None);
        assert_eq!(updated.due_date, None);
    }

    #[actix_rt::test]
    async fn test_validation_precedes_lookup() {
        let (service, a, _) = setup().await;
        let err = service.update(a, 9999, input("", "c", None)).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = service.update(a, 9999, input("t", "c", None)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[actix_rt::test]
    async fn test_other_users_cannot_touch_task() {
        let (service, a, b) = setup().await;
        let created = service.create(a, input("secret", "c", None)).await.unwrap();

        assert!(matches!(service.get(b, created.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            service.update(b, created.id, input("x", "y", None)).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.delete(b, created.id).await, Err(AppError::NotFound(_))));
        assert!(service.list(b).await.unwrap().is_empty());

        assert_eq!(service.get(a, created.id).await.unwrap().title, "secret");
    }

    #[actix_rt::test]
    async fn test_delete_twice() {
        let (service, a, _) = setup().await;
        let created = service.create(a, input("t", "c", None)).await.unwrap();

        service.delete(a, created.id).await.unwrap();
        assert!(service.list(a).await.unwrap().is_empty());
        assert!(matches!(service.delete(a, created.id).await, Err(AppError::NotFound(_))));
    }
}
