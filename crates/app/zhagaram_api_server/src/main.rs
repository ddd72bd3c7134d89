//! Zhagaram catalog API server binary.

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "zhagaram_api_server", about = "Zhagaram catalog API server")]
struct Args {
    /// Address to bind the HTTP listener.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    bind_addr: String,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/zhagaram"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,zhagaram_api=debug,zhagaram_core=debug".parse().unwrap()
            }),
        )
        .init();

    let args = Args::parse();

    info!(bind_addr = %args.bind_addr, "starting zhagaram_api_server");

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&args.database_url)
        .await?;

    info!("running database migrations");
    zhagaram_api::migrate(&pool).await?;

    let mut config = zhagaram_api::config::ApiConfig::from_env();
    config.bind_addr = args.bind_addr;
    config.pg_connection_url = args.database_url;

    if config.admin_username.is_empty() {
        info!("ADMIN_USERNAME not set, bootstrap admin login is disabled");
    }

    let state = zhagaram_api::AppState {
        pool,
        config: config.clone(),
    };
    let app = zhagaram_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
