use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Origin allowed by the CORS layer (the storefront frontend)
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for access tokens; empty means "generate per process"
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_hours")]
    pub access_token_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    /// Base URL prefixed onto stored image references
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_file_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "json" or "text"
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    5000
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_database_url() -> String {
    "sqlite://etalase.db?mode=rwc".to_string()
}

fn default_token_hours() -> u64 {
    24
}

fn default_upload_dir() -> String {
    "public/images".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_max_upload_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_hours: default_token_hours(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            public_base_url: default_public_base_url(),
            max_file_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from TOML file with environment variable fallback
    pub fn load() -> Self {
        let mut config = Self::load_from_file();
        config.override_with_env();
        config
    }

    fn load_from_file() -> Self {
        let config_paths = ["config.toml", "etalase.toml", "/etc/etalase/config.toml"];

        for path in &config_paths {
            if Path::new(path).exists() {
                debug!("Loading config from: {}", path);
                match fs::read_to_string(path) {
                    Ok(content) => match toml::from_str::<Config>(&content) {
                        Ok(config) => return config,
                        Err(e) => warn!("Failed to parse config file {}: {}", path, e),
                    },
                    Err(e) => warn!("Failed to read config file {}: {}", path, e),
                }
            }
        }

        debug!("No config file found, using defaults");
        Self::default()
    }

    fn override_with_env(&mut self) {
        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
        }
        if let Ok(origin) = env::var("CORS_ORIGIN") {
            self.server.cors_origin = origin;
        }
        if let Ok(url) = env::var("DATABASE_URL") {
            self.storage.database_url = url;
        }
        if let Ok(secret) = env::var("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(hours) = env::var("ACCESS_TOKEN_HOURS")
            && let Ok(hours) = hours.parse()
        {
            self.auth.access_token_hours = hours;
        }
        if let Ok(dir) = env::var("UPLOAD_DIR") {
            self.uploads.dir = dir;
        }
        if let Ok(base) = env::var("PUBLIC_BASE_URL") {
            self.uploads.public_base_url = base;
        }
        if let Ok(level) = env::var("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = env::var("LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(file) = env::var("LOG_FILE") {
            self.logging.file = Some(file);
        }
    }
}
