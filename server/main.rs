mod config;
mod handlers;

use actix_web::{middleware, web, App, HttpServer};
use config::ServerConfig;
use metro_graph::SubwayNetwork;
use std::io;

fn load_network(config: &ServerConfig) -> io::Result<SubwayNetwork> {
    let Some(path) = &config.seed_csv else {
        return Ok(SubwayNetwork::new());
    };

    log::info!("Seeding network from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    metro_graph::import::import_network(&content).map_err(|e| io::Error::other(e.to_string()))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();
    let network = web::Data::new(load_network(&config)?);

    log::info!("Starting server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(network.clone())
            .configure(handlers::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
