use std::{sync::Arc, time::Duration};

use anyhow::Result;
use talent_board::{
    application::usecases::UseCases,
    background_worker::rollover::run_rollover_loop,
    config::config_loader,
    infrastructure::{Repositories, axum_http::http_serve, postgres::postgres_connection},
};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("talent-board exited with error: {:?}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    talent_board::observability::init_observability("api")?;

    let dotenvy_env = Arc::new(config_loader::load()?);
    info!("ENV has been loaded");

    let repositories = match &dotenvy_env.database {
        Some(database) => {
            let postgres_pool = postgres_connection::establish_connection(&database.url)?;
            info!("Postgres connection has been established");
            Repositories::postgres(Arc::new(postgres_pool))
        }
        None => {
            warn!("DATABASE_URL not set; serving seeded in-memory data");
            Repositories::in_memory_seeded().await?
        }
    };

    let usecases = UseCases::new(&repositories);

    let rollover_loop = tokio::spawn(run_rollover_loop(
        Arc::clone(&usecases.subscriptions),
        Duration::from_secs(dotenvy_env.rollover.interval_secs),
    ));

    let server_config = Arc::clone(&dotenvy_env);
    let server = tokio::spawn(async move { http_serve::start(server_config, usecases).await });

    tokio::select! {
        result = server => result??,
        result = rollover_loop => result??,
    };

    Ok(())
}
