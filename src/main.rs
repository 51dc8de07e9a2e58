use anyhow::{Context, Result};
use clap::Parser;
use coolify_nocodb_mcp::{api, config};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "coolify-nocodb-mcp")]
#[command(about = "MCP server for Coolify and NocoDB", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file (optional, environment variables override it)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Override log format (pretty, json)
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = config::load_config(&cli.config).with_context(|| {
        format!(
            "Failed to load configuration from: {}",
            cli.config.display()
        )
    })?;

    if let Some(log_level) = cli.log_level {
        config.logging.level = log_level;
    }
    if let Some(log_format) = cli.log_format {
        config.logging.format = log_format;
    }

    init_logging(&config.logging)?;

    print_banner(&config);

    info!("Starting MCP server...");
    api::start_server(config).await?;

    Ok(())
}

fn init_logging(config: &config::LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .try_init()?;
        }
    }

    Ok(())
}

fn print_banner(config: &config::AppConfig) {
    let version = env!("CARGO_PKG_VERSION");
    let width = 59usize;
    let border = "═".repeat(width + 2);
    let line = |content: &str| {
        info!("║ {:width$} ║", content, width = width);
    };
    let platform = |name: &str, platform: &config::PlatformConfig| {
        let state = match (platform.enabled, platform.credential().is_some()) {
            (false, _) => "disabled",
            (true, false) => "no token",
            (true, true) => "enabled",
        };
        info!("  → {}: {} ({})", name, platform.api_url, state);
    };

    info!("╔{}╗", border);
    line("COOLIFY-NOCODB-MCP");
    line(&format!("MCP Server v{}", version));
    info!("╚{}╝", border);
    info!("");
    info!("Server Configuration:");
    info!("  → Address: {}:{}", config.http.host, config.http.port);
    info!("  → Log Level: {}", config.logging.level);
    info!("  → Log Format: {}", config.logging.format);
    info!("  → Upstream Timeout: {}s", config.mcp.request_timeout_secs);
    info!("Platforms:");
    platform("Coolify", &config.coolify);
    platform("NocoDB", &config.nocodb);
    info!("");
}
