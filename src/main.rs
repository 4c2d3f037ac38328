// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config and storage, then start the HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

#[cfg(test)]
mod fixtures;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::{Config, DbSettings, StorageType};
use db::{EntityStore, MemoryStore, PgStore};
use dotenv::dotenv;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting hbnb-places API...");
    log::info!("Environment: {}", config.environment);
    log::info!("Server Address: {}:{}", config.api_host, config.api_port);

    // 4. Open the configured store
    match config.storage_type() {
        Ok(StorageType::Db) => {
            let pool = match config::init_db_pool(&DbSettings::from_config(&config)).await {
                Ok(pool) => pool,
                Err(e) => {
                    log::error!("Failed to connect to database: {}", e);
                    std::process::exit(1);
                }
            };

            let store = PgStore::new(pool);
            if let Err(e) = store.init_schema().await {
                log::error!("Failed to prepare database schema: {}", e);
                std::process::exit(1);
            }

            serve(store, &config).await
        }
        Ok(StorageType::File) => {
            let store = if config.storage_file.is_empty() {
                MemoryStore::new()
            } else {
                match MemoryStore::open(&config.storage_file).await {
                    Ok(store) => store,
                    Err(e) => {
                        log::error!("Failed to load {}: {}", config.storage_file, e);
                        std::process::exit(1);
                    }
                }
            };

            match store.path() {
                Some(path) => log::info!("Persisting objects to {}", path.display()),
                None => log::warn!("File storage without a path, objects live in memory only"),
            }

            serve(store, &config).await
        }
        Err(e) => {
            log::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Start the HTTP server over the chosen store
async fn serve<S: EntityStore>(store: S, config: &Config) -> io::Result<()> {
    let store = web::Data::new(store);
    let server_addr = format!("{}:{}", config.api_host, config.api_port);

    HttpServer::new(move || {
        App::new()
            // Application state (shared store)
            .app_data(store.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::config::<S>)
            .default_service(web::to(handlers::not_found))
    })
    .bind(&server_addr)?
    .run()
    .await
}
