mod context;
pub mod core;
mod error;
mod handlers;
pub mod impls;
pub mod response;

use actix_web::web::{get, post, put, scope, Data};
use actix_web::HttpServer;
use impls::memory::MemoryRepository;

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "actix_web=info,civicnow=info");
    }
    env_logger::init();
    let addr = dotenv::var("CIVICNOW_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let repo = match dotenv::var("CIVICNOW_SEED").as_deref() {
        Ok("0") => MemoryRepository::new(),
        _ => MemoryRepository::seeded(),
    };
    log::info!("civicnow listening on {}", addr);
    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(Data::new(repo.clone()))
            .service(
                scope("polls")
                    .route("", post().to(handlers::poll::create))
                    .route("", get().to(handlers::poll::list))
                    .service(
                        scope("{poll_id}")
                            .route("", get().to(handlers::poll::detail))
                            .route("status", put().to(handlers::poll::update_status))
                            .route("results", get().to(handlers::poll::results))
                            .route("voters", get().to(handlers::poll::voters))
                            .route("ballots", post().to(handlers::ballot::cast)),
                    ),
            )
    })
    .bind(addr)?
    .run()
    .await
}
