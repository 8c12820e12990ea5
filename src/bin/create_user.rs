//! Seeds an account directly into the database, e.g. the initial admin user.
//!
//! ```text
//! create_user --name Admin --email admin@exemplo.com --password admin123
//! ```

use clap::Parser;
use std::process::ExitCode;

use taskboard::auth::hash_password;
use taskboard::db;
use taskboard::models::User;
use taskboard::store::UserStore;
use taskboard::AppError;

#[derive(Parser, Debug)]
#[command(name = "create_user")]
#[command(about = "Create a TaskBoard user directly in the database")]
struct Args {
    /// Display name
    #[arg(long, default_value = "Admin")]
    name: String,

    /// Login email (must be unique)
    #[arg(long, default_value = "admin@exemplo.com")]
    email: String,

    /// Plain-text password; only its bcrypt hash is stored
    #[arg(long, default_value = "admin123")]
    password: String,

    /// SQLite database location
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://database.sqlite")]
    database_url: String,
}

#[derive(Debug)]
enum Outcome {
    Created(User),
    AlreadyExists(User),
}

async fn create_user(users: &UserStore, args: &Args) -> Result<Outcome, AppError> {
    if args.name.is_empty() || args.email.is_empty() || args.password.is_empty() {
        return Err(AppError::ValidationError(
            taskboard::error::messages::ALL_FIELDS_REQUIRED.into(),
        ));
    }
    if let Some(existing) = users.find_by_email(&args.email).await? {
        return Ok(Outcome::AlreadyExists(existing));
    }
    let password_hash = hash_password(&args.password)?;
    let id = users.insert(&args.name, &args.email, &password_hash).await?;
    let user = users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::InternalServerError(format!("user {} missing after insert", id)))?;
    Ok(Outcome::Created(user))
}

#[actix_web::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let pool = match db::connect(&args.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("failed to open database {}: {}", args.database_url, e);
            return ExitCode::FAILURE;
        }
    };
    let users = UserStore::new(pool.clone());

    let outcome = create_user(&users, &args).await;
    pool.close().await;

    match outcome {
        Ok(Outcome::Created(user)) => {
            log::info!("user created: id={} name={} email={}", user.id, user.name, user.email);
            ExitCode::SUCCESS
        }
        Ok(Outcome::AlreadyExists(user)) => {
            log::info!("user already exists: id={} email={}", user.id, user.email);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("failed to create user: {}", e);
            ExitCode::FAILURE
        }
    }
}
