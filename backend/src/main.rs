//! Noticeboard server entry point.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use noticeboard::inbound::http::health::HealthState;
use noticeboard::inbound::http::session_config::{BuildMode, session_settings_from_env};
use noticeboard::outbound::accounts::AccountsLoginService;
use noticeboard::outbound::news_seed::load_news_file;
use noticeboard::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use noticeboard::settings::ServerSettings;
use ortho_config::OrthoConfig;

use server::ServerConfig;

fn other(err: impl ToString) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(other)?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(other)?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr().map_err(other)?,
    );

    if let Some(path) = &settings.accounts_file {
        config = config.with_accounts(AccountsLoginService::from_json_file(path).map_err(other)?);
    } else {
        warn!("no accounts file configured; every login will fail");
    }

    if let Some(path) = &settings.news_file {
        config = config.with_news_seed(load_news_file(path).map_err(other)?);
    }

    if let Some(url) = settings.database_url() {
        if settings.migrate() {
            run_migrations(url).await.map_err(other)?;
        }
        let pool = DbPool::new(PoolConfig::new(url)).await.map_err(other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %config.bind_addr(), "starting noticeboard server");
    let server = server::create_server(health_state, config).await?;
    server.await
}
