//! CLI entry point for the NeoWs gateway.
//!
//! `serve` runs the HTTP gateway; `neows` runs the aggregation pipeline once
//! for a date range and prints the histograms.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use chrono::Local;
use clap::{Parser, Subcommand};
use neows_gateway::{
    config::GatewayConfig,
    http::{AppState, RouterOptions, create_router},
    neows::{Upstream, aggregate_range},
    output::{log_pretty, render_json, render_table},
};
use std::ffi::OsStr;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "neows_gateway")]
#[command(about = "HTTP gateway aggregating NASA near-earth-object data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP gateway
    Serve {
        #[command(flatten)]
        config: GatewayConfig,

        /// Address to listen on
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
        bind: SocketAddr,

        /// Browser origin allowed by CORS (empty disables CORS headers)
        #[arg(long, env = "CORS_ORIGIN", default_value = "http://localhost:3000")]
        cors_origin: String,

        /// Optional directory served under /static
        #[arg(long, env = "STATIC_DIR")]
        static_dir: Option<PathBuf>,
    },
    /// Aggregate near-earth objects for a date range and print the histograms
    Neows {
        #[command(flatten)]
        config: GatewayConfig,

        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        start_date: String,

        /// Last day of the range (YYYY-MM-DD)
        #[arg(long)]
        end_date: String,

        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/neows_gateway.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("neows_gateway.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", LevelFilter::INFO));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            bind,
            cors_origin,
            static_dir,
        } => {
            let cors_origin = if cors_origin.is_empty() {
                None
            } else {
                Some(
                    HeaderValue::from_str(&cors_origin)
                        .with_context(|| format!("invalid CORS origin '{cors_origin}'"))?,
                )
            };
            serve(
                config,
                bind,
                RouterOptions {
                    cors_origin,
                    static_dir,
                },
            )
            .await?;
        }
        Commands::Neows {
            config,
            start_date,
            end_date,
            json,
        } => {
            let client = config.http_client()?;
            let upstream = Upstream {
                client: &client,
                base_url: &config.nasa_base_url,
                api_key: &config.api_key,
                deadline: config.upstream_timeout(),
            };
            let today = Local::now().date_naive();

            let result = aggregate_range(&upstream, &start_date, &end_date, today).await?;

            log_pretty(&result);
            if json {
                println!("{}", render_json(&result)?);
            } else {
                print!("{}", render_table(&result));
            }
        }
    }

    Ok(())
}

fn env_filter(var: &str, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(var)
        .from_env_lossy()
}

/// Binds the listener and serves until Ctrl+C.
#[tracing::instrument(skip(config, options))]
async fn serve(config: GatewayConfig, bind: SocketAddr, options: RouterOptions) -> Result<()> {
    info!(?config, "Starting NeoWs gateway");

    let client = Arc::new(config.http_client()?);
    let state = AppState::new(client, config);
    let app = create_router(state, options);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!("Server listening on http://{}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
