// cw_seeder/src/main.rs
// This file will contain the main entry point for the cw_seeder CLI application.

use clap::Parser;
use cw_seeder::cli::{Cli, resolve_connection_uri};
use cw_seeder::error::Result;
use cw_seeder::fetch::Fetcher;
use cw_seeder::loader::{ReloadOptions, run_full_reload};
use cw_seeder::mongo::{GatewayConfig, MongoGateway};
use cw_seeder::records::ValidationMode;
use tracing::{error, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(),> {
    // Initialize tracing
    let file_appender = tracing_appender::rolling::never(".", "seeder.log",);
    let (non_blocking, _guard,) = tracing_appender::non_blocking(file_appender,);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),),)
        .with(fmt::layer().with_writer(std::io::stderr,),)
        .with(fmt::layer().with_writer(non_blocking,).with_ansi(false,),)
        .init();

    let cli = Cli::parse();

    let uri = resolve_connection_uri(
        &cli.uri,
        cli.db_user.as_deref(),
        cli.db_password.as_deref(),
    )?;
    let config = GatewayConfig {
        uri,
        database_name: cli.database.clone(),
    };

    let gateway = MongoGateway::connect(&config,).await?;
    let fetcher = Fetcher::new();
    let options = ReloadOptions {
        products_url:  cli.products_url.clone(),
        customers_url: cli.customers_url.clone(),
        mode:          if cli.skip_invalid {
            ValidationMode::Collect
        } else {
            ValidationMode::FailFast
        },
    };

    let result = run_full_reload(&gateway, &fetcher, &options,).await;
    gateway.close().await;

    match result {
        Ok(summary,) => {
            info!(
                "Seeded database '{}': {} products, {} customers, {} sales orders",
                cli.database, summary.products, summary.customers, summary.sales_orders
            );
            Ok((),)
        },
        Err(e,) => {
            error!("Full reload aborted: {}", e);
            Err(e,)
        },
    }
}
