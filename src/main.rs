use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scoreboard::api::{build_router, state::AppState};
use scoreboard::config::AppConfig;
use scoreboard::dashboard::{self, Board};
use scoreboard::storage::{StorageConfig, TournamentStore};

#[derive(Parser)]
#[command(name = "scoreboard")]
#[command(about = "Football tournament scoreboard: standings, fixtures and leaderboards")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print group tables
    Standings {
        /// Only print this group
        #[arg(long)]
        group: Option<String>,
    },

    /// Print the top scorers
    Scorers {
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

fn load_config(path: &Path) -> Result<(AppConfig, bool)> {
    if !path.exists() {
        return Ok((AppConfig::default(), false));
    }
    let config = AppConfig::from_file(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    Ok((config, true))
}

fn init_tracing(level: &str, json_logs: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, from_file) = load_config(&cli.config)?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let level = cli.log_level.unwrap_or_else(|| config.log_level.clone());
    init_tracing(&level, cli.json_logs);

    tracing::info!("Starting scoreboard v{}", env!("CARGO_PKG_VERSION"));
    if !from_file {
        tracing::info!(
            "No config file at {}, using defaults",
            cli.config.display()
        );
    }

    let store = TournamentStore::new(
        StorageConfig::new(config.data_dir.clone()),
        config.tournament.default_name.clone(),
    )
    .with_default_points(config.tournament.point_system());

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            tracing::info!("Data directory: {}", config.data_dir.display());
            let app = build_router(AppState::new(store), &config.server.cors_origin);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Scoreboard: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Standings { group } => {
            let Some(tournament) = store.tournament()? else {
                bail!("No tournament configured");
            };
            let mut tables = dashboard::standings(&store, &tournament)?;
            if let Some(name) = group {
                let name = name.trim();
                tables.retain(|t| t.group.name.eq_ignore_ascii_case(name));
                if tables.is_empty() {
                    bail!("No group named {:?}", name);
                }
            }

            println!("{}", tournament.name);
            for table in &tables {
                println!();
                print!("{}", dashboard::render_standings(table));
            }
        }
        Commands::Scorers { limit } => {
            let Some(tournament) = store.tournament()? else {
                bail!("No tournament configured");
            };
            let entries = dashboard::leaderboard(&store, &tournament, Board::Scorers, limit)?;
            if entries.is_empty() {
                println!("No goals recorded yet");
            } else {
                print!("{}", dashboard::render_leaderboard(&entries));
            }
        }
    }

    Ok(())
}
