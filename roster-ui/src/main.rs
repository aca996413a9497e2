//! Roster UI server - JSON API over one recipient table for a browser front end.

mod routes;
mod sse;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::Router;
use axum::routing::get;
use clap::Parser;
use roster::io::config::{CONFIG_FILE, load_config};
use roster::io::source::JsonFileSource;
use roster::table::RecipientTable;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "roster-ui")]
#[command(about = "Serve the recipient tables over HTTP for the reminder UI")]
struct Args {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on
    #[arg(long, default_value = "3001")]
    port: u16,

    /// Directory holding source responses as JSON files
    #[arg(long, default_value = ".")]
    data: PathBuf,

    /// Config file (TOML); defaults apply when missing
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("roster_ui=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let cfg = load_config(&args.config)?;
    let data_dir = args.data.canonicalize().unwrap_or(args.data);
    info!(
        data_dir = %data_dir.display(),
        locale = %cfg.locale,
        load_mode = ?cfg.load_mode,
        "starting roster-ui"
    );

    let table = RecipientTable::from_config(&cfg).context("build recipient table")?;
    let state = AppState::new(table, JsonFileSource::new(data_dir), cfg.fetch_path.clone());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", routes::api_router())
        .route("/events", get(sse::events_handler))
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
