use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tower_http::trace::TraceLayer;
use url::Url;
use user_management::config::UserManagementConfig;
use user_management::{StoreBackend, UserManagement};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const MODULE_NAME: &str = "user_management";

/// User Management Server - user lifecycle over HTTP
#[derive(Parser)]
#[command(name = "user-management-server")]
#[command(about = "User Management Server - create, update, delete and query users")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use the in-process user store instead of the configured database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::init_logging_from_config(&logging_config, Path::new("."));
    tracing::info!("User Management Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config, args),
    }
}

/// Only SQLite URLs are backed by the bundled SeaORM driver.
fn ensure_supported_dsn(cfg: &DatabaseConfig) -> Result<()> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;

    match url.scheme() {
        "sqlite" => Ok(()),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

fn store_backend(config: &AppConfig, args: &CliArgs) -> Result<StoreBackend> {
    match (&config.database, args.mock) {
        (_, true) => {
            tracing::info!("--mock set, using in-process user store");
            Ok(StoreBackend::InMemory)
        }
        (None, false) => {
            tracing::warn!("No database configuration found, using in-process user store");
            Ok(StoreBackend::InMemory)
        }
        (Some(db), false) => {
            ensure_supported_dsn(db)?;
            Ok(StoreBackend::Database {
                url: db.url.trim().to_string(),
                max_conns: db.max_conns,
            })
        }
    }
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Initializing modules...");

    let module_cfg: UserManagementConfig = config.module_config(MODULE_NAME)?;
    let store = store_backend(&config, &args)?;
    let module = UserManagement::init(&module_cfg, store).await?;

    let app = module.router().layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on address {}", addr))?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = runtime::wait_for_shutdown().await {
                tracing::error!("Signal handler failed: {}", e);
            }
        })
        .await
        .context("HTTP server failed")?;

    tracing::info!("Draining pending user events");
    let service = module.service();
    let drained = match config.server.shutdown_timeout_sec {
        0 => service.shutdown().await,
        secs => tokio::time::timeout(Duration::from_secs(secs), service.shutdown())
            .await
            .map_err(|_| anyhow!("Shutdown did not finish within {}s", secs))?,
    };
    drained.map_err(|e| anyhow!("Shutdown failed: {}", e))?;

    tracing::info!("User Management Server stopped");
    Ok(())
}

fn check_config(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    let module_cfg: UserManagementConfig = config.module_config(MODULE_NAME)?;
    module_cfg
        .validate()
        .with_context(|| format!("Invalid {} config", MODULE_NAME))?;
    if let Some(base) = &module_cfg.notifications.base_url {
        Url::parse(base).with_context(|| format!("Invalid notifications.base_url '{}'", base))?;
    }
    store_backend(&config, &args)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);

    Ok(())
}
