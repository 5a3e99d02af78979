use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_JWT_SECRET: &str = "change-me";
/// One year.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// When false, entity routes are served without a bearer token.
    pub enabled: bool,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SecurityConfig {
    pub enable_hsts: Option<bool>,
    pub hsts_max_age: Option<u64>,
    pub hsts_include_subdomains: Option<bool>,
    pub csp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub security: Option<SecurityConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        let defaults: &str = include_str!("../config/default.toml");
        match ::config::Config::builder()
            .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml))
            .build()
        {
            Ok(cfg) => match cfg.try_deserialize() {
                Ok(app_cfg) => app_cfg,
                Err(e) => panic!("Failed to deserialize default config: {}", e),
            },
            Err(e) => panic!("Failed to parse default config: {}", e),
        }
    }
}

pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let defaults: &str = include_str!("../config/default.toml");
    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml))
        // Optional local file: microblog.toml (in CWD)
        .add_source(::config::File::with_name("microblog").required(false));

    if let Ok(custom_path) = std::env::var("MICROBLOG_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("MICROBLOG").separator("__"));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    #[cfg(unix)]
    if cfg.server.port < 1024 {
        tracing::warn!("Using privileged port {} - may require elevated permissions", cfg.server.port);
    }

    if cfg.database.url.trim().is_empty() {
        return Err(anyhow::anyhow!("database.url must not be empty"));
    }
    if cfg.database.max_connections == 0 {
        return Err(anyhow::anyhow!("database.max_connections must be > 0"));
    }
    if cfg.database.acquire_timeout_secs == 0 {
        return Err(anyhow::anyhow!("database.acquire_timeout_secs must be > 0"));
    }

    if cfg.auth.enabled {
        if cfg.auth.jwt_secret.trim().is_empty() {
            return Err(anyhow::anyhow!("auth.jwt_secret must be set when auth is enabled"));
        }
        if cfg.auth.jwt_secret == DEFAULT_JWT_SECRET {
            tracing::warn!("auth.jwt_secret is the built-in default; set MICROBLOG__AUTH__JWT_SECRET");
        }
    }
    if cfg.auth.token_ttl_hours <= 0 || cfg.auth.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
        return Err(anyhow::anyhow!(
            "auth.token_ttl_hours must be between 1 and {}, got {}",
            MAX_TOKEN_TTL_HOURS,
            cfg.auth.token_ttl_hours
        ));
    }

    Ok(())
}

pub fn ensure_sqlite_parent_dir(url: &str) -> anyhow::Result<()> {
    if let Some(path) = url.strip_prefix("sqlite://") {
        // sqlite:///C:/... on Windows: drop the leading '/' before a drive letter
        #[cfg(windows)]
        let path = {
            let bytes = path.as_bytes();
            if bytes.len() >= 3 && bytes[0] == b'/' && bytes[2] == b':' && bytes[1].is_ascii_alphabetic() {
                &path[1..]
            } else {
                path
            }
        };
        // Strip query options such as ?mode=rwc
        let path = path.split('?').next().unwrap_or(path);
        let p = Path::new(path);
        if let Some(parent) = p.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }
    Ok(())
}
