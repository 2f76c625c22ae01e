//! Bootstraps the actix-web app: CORS, request logging, and the two
//! routes in §6 (`/ws/{roomId}`, `/generate`).

use crate::casino::Casino;
use crate::handlers;
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use tabula_deck::DeckCatalog;

pub struct Server;

impl Server {
    /// Runs until the process is signaled to stop. `catalog` is the seam
    /// to whatever out-of-scope asset system supplies decks (SPEC_FULL
    /// §1.1); production deployments swap in their own [`DeckCatalog`].
    pub async fn run(catalog: std::sync::Arc<dyn DeckCatalog>) -> std::io::Result<()> {
        let casino = web::Data::new(Casino::new(catalog));
        let bind_addr = crate::config::bind_addr();
        log::info!("starting tabula hosting server on {bind_addr}");
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(casino.clone())
                .route("/healthz", web::get().to(handlers::health))
                .route("/ws/{roomId}", web::get().to(handlers::ws_connect))
                .route("/generate", web::post().to(handlers::generate))
        })
        .bind(bind_addr)?
        .run()
        .await
    }
}
