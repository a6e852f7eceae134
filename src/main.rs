//! dark-grid-core entry point: load configuration, initialize logging,
//! connect to Postgres, run migrations, serve the HTTP/WebSocket gateway.

use dark_grid_core::config::Settings;
use dark_grid_core::db::Database;
use dark_grid_core::gateway;
use dark_grid_core::logging;
use dark_grid_core::rules;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    logging::init_tracing(&settings);

    tracing::info!(env = %settings.env, ruleset = %settings.ruleset, "starting dark-grid-core");

    rules::install_default_ruleset();

    let db = Database::connect(&settings.database_url).await?;
    db.migrate().await?;

    gateway::run_server(settings, db).await
}
