use earthquakes::cli::{self, Invocation};
use earthquakes::{config::Config, db::init_db, QueryGateway, Repository};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Arguments are checked before any database work.
    let cli = match cli::parse_args(std::env::args_os()) {
        Invocation::Run(cli) => cli,
        Invocation::Info(text) => {
            print!("{}", text);
            return;
        }
        Invocation::Usage => {
            eprintln!("{}", cli::USAGE);
            std::process::exit(1);
        }
    };

    // Logs go to stderr; stdout carries only results.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match init_db(&config.database_path, config.schema, 1).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let gateway = QueryGateway::new(Arc::new(Repository::new(pool.clone(), config.schema)));
    let threshold = cli.min_magnitude.to_string();

    let records = match gateway.list_by_min_magnitude(&threshold).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "Query failed");
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    println!("{}\n", cli::header(cli.min_magnitude));
    for record in &records {
        println!("{}", cli::format_record(record));
    }

    pool.close().await;
}
