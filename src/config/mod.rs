pub mod types;

use anyhow::{Context, Result};
use config::{Config, File};
use std::path::Path;
pub use types::*;

/// Environment variables read at startup and the config keys they override
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("PORT", "http.port"),
    ("MCP_SECRET", "mcp.secret"),
    ("COOLIFY_API_URL", "coolify.api_url"),
    ("COOLIFY_TOKEN", "coolify.token"),
    ("NOCODB_API_URL", "nocodb.api_url"),
    ("NOCODB_TOKEN", "nocodb.token"),
];

/// Load configuration from an optional TOML file overlaid with the process environment
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] but with an explicit environment lookup
pub fn load_config_with_env<P, F>(path: P, env: F) -> Result<AppConfig>
where
    P: AsRef<Path>,
    F: Fn(&str) -> Option<String>,
{
    let path = path.as_ref();
    let http = HttpConfig::default();
    let logging = LoggingConfig::default();
    let coolify = PlatformConfig::coolify();
    let nocodb = PlatformConfig::nocodb();

    let mut builder = Config::builder()
        .set_default("http.host", http.host)?
        .set_default("http.port", i64::from(http.port))?
        .set_default("logging.level", logging.level)?
        .set_default("logging.format", logging.format)?
        .set_default("coolify.api_url", coolify.api_url)?
        .set_default("coolify.auth_header", coolify.auth_header)?
        .set_default("nocodb.api_url", nocodb.api_url)?
        .set_default("nocodb.auth_header", nocodb.auth_header)?
        .add_source(File::from(path).required(false));

    for &(var, key) in ENV_OVERRIDES {
        builder = builder.set_override_option(key, env(var))?;
    }

    let config = builder
        .build()
        .with_context(|| format!("Failed to load config from: {}", path.display()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate the loaded configuration
fn validate_config(config: &AppConfig) -> Result<()> {
    if config.mcp.secret.trim().is_empty() {
        anyhow::bail!("Session secret is empty. Set MCP_SECRET or mcp.secret");
    }

    for (name, platform) in [("coolify", &config.coolify), ("nocodb", &config.nocodb)] {
        if !platform.enabled {
            continue;
        }
        reqwest::Url::parse(&platform.api_url)
            .with_context(|| format!("Invalid {} api_url '{}'", name, platform.api_url))?;
        if platform.auth_header.trim().is_empty() {
            anyhow::bail!("Empty auth_header for platform '{}'", name);
        }
    }

    if config.mcp.request_timeout_secs == 0 {
        anyhow::bail!("mcp.request_timeout_secs must be greater than zero");
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        anyhow::bail!(
            "Invalid log level '{}'. Valid levels: {}",
            config.logging.level,
            valid_levels.join(", ")
        );
    }

    let valid_formats = ["pretty", "json"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        anyhow::bail!(
            "Invalid log format '{}'. Valid formats: {}",
            config.logging.format,
            valid_formats.join(", ")
        );
    }

    Ok(())
}
