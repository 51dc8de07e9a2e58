pub mod coolify;
pub mod nocodb;

use crate::catalog::{ToolEntry, ToolRegistry};
use crate::config::{AppConfig, PlatformConfig};
use crate::error::{GatewayError, Result};
use crate::upstream::UpstreamTarget;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Tool set contributed by one platform for a given target
pub type PlatformTools = fn(Arc<UpstreamTarget>) -> Vec<ToolEntry>;

/// Build the catalog from every enabled platform that has a credential
pub fn build_registry(config: &AppConfig) -> Result<ToolRegistry> {
    let platforms: [(&str, &PlatformConfig, PlatformTools); 2] = [
        (coolify::NAME, &config.coolify, coolify::tools),
        (nocodb::NAME, &config.nocodb, nocodb::tools),
    ];

    let mut registry = ToolRegistry::new();
    for (name, platform, tools) in platforms {
        register_platform(&mut registry, name, platform, tools)?;
    }

    if registry.is_empty() {
        warn!("No platform credentials configured; the tool catalog is empty");
    }

    Ok(registry)
}

fn register_platform(
    registry: &mut ToolRegistry,
    name: &str,
    config: &PlatformConfig,
    tools: PlatformTools,
) -> Result<()> {
    if !config.enabled {
        debug!("Platform {} is disabled", name);
        return Ok(());
    }

    let target = UpstreamTarget::from_config(name, config)
        .map_err(|e| GatewayError::Config(format!("platform {}: {}", name, e)))?;
    let Some(target) = target else {
        warn!("Platform {} has no token configured, its tools are not registered", name);
        return Ok(());
    };

    let entries: Vec<ToolEntry> = tools(Arc::new(target))
        .into_iter()
        .filter(|entry| {
            config
                .tools
                .as_ref()
                .is_none_or(|filter| filter.allows(&entry.descriptor.name))
        })
        .collect();

    info!(
        "Registered platform {} at {} ({} tools)",
        name,
        config.api_url,
        entries.len()
    );
    registry.register_all(entries)
}
