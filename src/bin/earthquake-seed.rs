use anyhow::Context;
use earthquakes::domain::reference_records;
use earthquakes::{config::Config, db::init_db, QueryGateway, Repository};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;
    let pool = init_db(&config.database_path, config.schema, 1)
        .await
        .context("initializing database")?;

    let gateway = QueryGateway::new(Arc::new(Repository::new(pool.clone(), config.schema)));
    let inserted = gateway
        .seed(&reference_records(config.schema))
        .await
        .context("seeding earthquake table")?;

    tracing::info!(inserted, schema = %config.schema, "Seeded earthquake table");
    pool.close().await;
    Ok(())
}
