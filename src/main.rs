use crate::config::Config;
use crate::services::{LastFmClient, LibraryBrowser};
use actix_rt::signal::unix;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use futures_lite::FutureExt;
use search_providers::YtMusicClient;
use std::sync::Arc;
use tracing::{error, info};

mod config;
mod http;
mod impls;
mod services;

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let mut terminate = unix::signal(unix::SignalKind::terminate())?;
    let mut interrupt = unix::signal(unix::SignalKind::interrupt())?;

    dotenv::dotenv().ok();
    env_logger::init();

    let config = Arc::from(Config::from_env());

    info!("Starting application...");

    let lastfm_client = match LastFmClient::create(
        &config.lastfm.username,
        &config.lastfm.password,
        &config.lastfm.api_key,
        &config.lastfm.api_secret,
        config.proxy.as_deref(),
        USER_AGENT,
    )
    .await
    {
        Ok(client) => {
            info!("Connected to Last.fm");
            client
        }
        Err(error) => {
            // Without a Last.fm session there is nothing to browse.
            error!(?error, "Error during Last.fm setup");
            std::process::exit(1);
        }
    };

    let ytmusic_client = match YtMusicClient::create(config.proxy.as_deref(), USER_AGENT) {
        Ok(client) => client,
        Err(error) => {
            error!(?error, "Unable to initialize YouTube Music client");
            std::process::exit(1);
        }
    };

    let library_browser = Arc::new(LibraryBrowser::new(
        Arc::new(lastfm_client),
        Arc::new(ytmusic_client),
        config.lastfm.username.clone(),
        config.scrobbler_users.clone(),
    ));

    let shutdown_timeout = config.shutdown_timeout;
    let bind_address = config.bind_address.clone();

    let server = HttpServer::new({
        move || {
            App::new()
                .app_data(Data::new(Arc::clone(&library_browser)))
                .service(web::resource("/browse").route(web::get().to(http::browse_library)))
                .service(web::resource("/health").route(web::get().to(http::readiness_check)))
        }
    })
    .shutdown_timeout(shutdown_timeout)
    .bind(bind_address)?
    .run();

    let server_handle = server.handle();

    actix_rt::spawn({
        async move {
            if let Err(error) = server.await {
                error!(?error, "Error on http server");
            }
        }
    });

    info!("Application started");

    interrupt.recv().or(terminate.recv()).await;

    info!("Received shutdown signal. Shutting down gracefully...");

    server_handle.stop(true).await;

    Ok(())
}
