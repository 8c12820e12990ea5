pub mod auth;
pub mod system;
pub mod tasks;

use actix_web::web;

use crate::auth::AuthMiddleware;

/// Mounts the `/auth` and `/tasks` scopes. Intended to be configured under `/api`.
///
/// Every `/tasks` route sits behind `AuthMiddleware`; of the `/auth` routes only
/// `/validate` does.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login)
            .service(auth::validate),
    )
    .service(
        web::scope("/tasks")
            .wrap(AuthMiddleware)
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}
