use serde::{Deserialize, Serialize};

pub const DEFAULT_COOLIFY_API_URL: &str = "http://coolify:3000/api/v1";
pub const DEFAULT_NOCODB_API_URL: &str = "http://nocodb:8080";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub mcp: McpConfig,
    #[serde(default = "PlatformConfig::coolify")]
    pub coolify: PlatformConfig,
    #[serde(default = "PlatformConfig::nocodb")]
    pub nocodb: PlatformConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Session and transport settings
#[derive(Debug, Clone, Deserialize)]
pub struct McpConfig {
    /// Shared secret expected as `Authorization: Bearer <secret>` on session requests
    #[serde(default)]
    pub secret: String,
    /// Timeout applied to every outbound upstream request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_sse_keep_alive_secs")]
    pub sse_keep_alive_secs: u64,
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
            sse_keep_alive_secs: default_sse_keep_alive_secs(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_sse_keep_alive_secs() -> u64 {
    15
}

/// One upstream platform (Coolify or NocoDB)
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub api_url: String,
    #[serde(default)]
    pub token: Option<String>,
    /// Header carrying the token; `Authorization` uses the Bearer scheme
    pub auth_header: String,
    #[serde(default)]
    pub tools: Option<ToolFilter>,
}

impl PlatformConfig {
    pub fn coolify() -> Self {
        Self {
            enabled: true,
            api_url: DEFAULT_COOLIFY_API_URL.to_string(),
            token: None,
            auth_header: "Authorization".to_string(),
            tools: None,
        }
    }

    pub fn nocodb() -> Self {
        Self {
            enabled: true,
            api_url: DEFAULT_NOCODB_API_URL.to_string(),
            token: None,
            auth_header: "xc-token".to_string(),
            tools: None,
        }
    }

    /// Token, if one is configured and non-blank
    pub fn credential(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolFilter {
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
}

impl ToolFilter {
    /// Check if a tool should be registered based on include/exclude filters
    /// Include list takes precedence - if present, tool must be in it
    /// Exclude list is then checked - if present, tool must not be in it
    pub fn allows(&self, tool_name: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.iter().any(|t| t == tool_name) {
                return false;
            }
        }

        if let Some(exclude) = &self.exclude {
            if exclude.iter().any(|t| t == tool_name) {
                return false;
            }
        }

        true
    }
}
