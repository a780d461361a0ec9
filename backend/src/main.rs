//! Registrar entry-point: loads settings, wires the record store and serves
//! the REST API.

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use registrar::inbound::http::health::HealthState;
use registrar::outbound::persistence::{DbPool, PoolConfig};
use registrar::server::{BuildMode, ServerConfig, ServerSettings, create_server, load_session_key};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("load server settings")?;
    let key = load_session_key(
        settings.session_key_file(),
        BuildMode::from_debug_assertions(),
        settings.session_allow_ephemeral,
    )?;

    let mut config = ServerConfig::new(key, settings.cookie_secure(), settings.bind_addr());
    if let Some(url) = settings.database_url() {
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
            .await
            .wrap_err("connect to the record store")?;
        config = config.with_db_pool(pool);
    }

    info!(
        bind_addr = %config.bind_addr(),
        database = config.uses_database(),
        "starting registrar"
    );
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("start HTTP server")?;
    server.await.wrap_err("HTTP server terminated")
}
