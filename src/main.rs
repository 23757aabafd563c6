// src/main.rs
mod beacon;
mod config;
mod handlers;
mod models;
mod poller;
mod storage;
mod utils;

use std::sync::Arc;
use actix_web::{ web, App, HttpServer };
use env_logger::Env;
use log::info;
use crate::beacon::udp::UdpBeacon;
use crate::config::Config;
use crate::handlers::ClientRateLimiter;
use crate::poller::aggregator::Aggregator;
use crate::poller::discovery::HttpListing;
use crate::poller::fetcher::StatusFetcher;
use crate::poller::scheduler::Scheduler;
use crate::storage::memory::ServerStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // .env may carry RUST_LOG as well as the config variables
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env();

    let store = Arc::new(ServerStore::new(config.merge_policy));

    let listing = HttpListing::new(config.listing_url.clone(), config.listing_timeout())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let fetcher = StatusFetcher::new(
        Arc::new(UdpBeacon::new()),
        config.report_timeout(),
        config.report_port_offset,
    );
    let scheduler = Scheduler::new(
        Arc::new(listing),
        Aggregator::new(fetcher, Arc::clone(&store)),
        Arc::clone(&store),
        config.poll_interval(),
    );

    info!(
        "Polling {} every {:?} (merge policy {:?})",
        config.listing_url,
        config.poll_interval(),
        store.policy()
    );
    tokio::spawn(scheduler.run());

    let bind = config.bind();
    let storage = web::Data::from(store);
    let server_list_rate_limiter = web::Data::new(ClientRateLimiter::keyed(config.server_list_quota()));
    let config = web::Data::new(config);

    info!("Starting server on {}", bind);
    HttpServer::new(move || {
        App::new()
            .app_data(storage.clone())
            .app_data(server_list_rate_limiter.clone())
            .app_data(config.clone())
            .route("/servers", web::get().to(handlers::servers::get_servers))
            .route("/", web::get().to(handlers::assets::index))
            .route("/index.html", web::get().to(handlers::assets::index))
            .route("/style.css", web::get().to(handlers::assets::style))
            .route("/stats.js", web::get().to(handlers::assets::script))
    })
        .bind(&bind)?
        .run().await
}
