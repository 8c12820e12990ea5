use actix_web::web;
use sqlx::SqlitePool;
use std::path::PathBuf;

use crate::auth::TokenKeys;
use crate::config::Config;
use crate::db;
use crate::error::{json_error_handler, path_error_handler};
use crate::routes::{self, system};
use crate::services::{AuthService, TaskService};
use crate::store::{TaskStore, UserStore};

/// The services shared by every worker, wired once at startup.
#[derive(Clone)]
pub struct AppState {
    pub auth: web::Data<AuthService>,
    pub tasks: web::Data<TaskService>,
    pub shell: web::Data<system::AppShell>,
}

impl AppState {
    /// Opens the database named in `config` and builds the services on top of it.
    pub async fn init(config: &Config) -> Result<Self, sqlx::Error> {
        let pool = db::connect(&config.database_url).await?;
        Ok(Self::from_parts(pool, &config.jwt_secret, config.frontend_dir.clone()))
    }

    pub fn from_parts(pool: SqlitePool, jwt_secret: &str, frontend_dir: PathBuf) -> Self {
        let auth = AuthService::new(UserStore::new(pool.clone()), TokenKeys::new(jwt_secret));
        let tasks = TaskService::new(TaskStore::new(pool));
        Self {
            auth: web::Data::new(auth),
            tasks: web::Data::new(tasks),
            shell: web::Data::new(system::AppShell::new(frontend_dir)),
        }
    }

    /// Registers shared state, extractor error handlers and every route, including
    /// the application-shell fallback.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.tasks.clone())
            .app_data(self.shell.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .service(system::health)
            .service(web::scope("/api").configure(routes::config))
            .default_service(web::to(system::app_shell));
    }
}
