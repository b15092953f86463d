use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::io;
use std::sync::Arc;

use wallet_desk::constants::config;
use wallet_desk::errors::AppError;
use wallet_desk::routes;
use wallet_desk::services::image_host::{CloudinaryImageHost, ImageHost};
use wallet_desk::services::submission_guard::SubmissionGuard;

fn cors_config(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
    }
    cors
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let database_url = config::get_database_url()
        .map_err(|_| io::Error::other("DATABASE_URL environment variable is required"))?;

    let cloudinary = config::get_cloudinary_config().map_err(|e| {
        let err = AppError::Configuration(e);
        err.log();
        io::Error::other(err.to_string())
    })?;

    let db: DatabaseConnection = Database::connect(&database_url).await.map_err(|e| {
        log::error!("Failed to connect to database: {}", e);
        io::Error::other(e.to_string())
    })?;

    Migrator::up(&db, None).await.map_err(|e| {
        log::error!("Failed to run migrations: {}", e);
        io::Error::other(e.to_string())
    })?;

    log::info!(
        "Signing Cloudinary requests for {} with {}",
        cloudinary.cloud_name,
        cloudinary.signature_algorithm
    );
    let image_host: Arc<dyn ImageHost> = Arc::new(CloudinaryImageHost::new(cloudinary));
    let image_host = web::Data::from(image_host);
    let guard = web::Data::new(SubmissionGuard::new());

    let cors_origins = config::get_cors_origins();
    let server_address = config::get_server_address();
    log::info!("Starting wallet desk API on http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors_config(&cors_origins))
            .app_data(web::Data::new(db.clone()))
            .app_data(image_host.clone())
            .app_data(guard.clone())
            .service(routes::api::configure_routes())
    })
    .bind(&server_address)?
    .run()
    .await
}
