use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use std::process::ExitCode;

use taskboard::{AppState, Config};

#[actix_web::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::init(&config).await {
        Ok(state) => state,
        Err(e) => {
            log::error!("failed to open database {}: {}", config.database_url, e);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Starting TaskBoard server at {}", config.server_url());
    let server = HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(|cfg| state.configure(cfg))
    })
    .bind((config.server_host.as_str(), config.server_port));

    let server = match server {
        Ok(server) => server,
        Err(e) => {
            log::error!("failed to bind {}: {}", config.server_url(), e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run().await {
        log::error!("server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
