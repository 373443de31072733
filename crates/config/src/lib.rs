use dotenv::{dotenv, from_path};
use std::env;
use std::error::Error;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub api_host: String,
    pub api_port: u16,
    /// Mounts the collection write endpoints. There is no authentication behind
    /// this switch; enable it only where the network itself is trusted.
    pub admin_enabled: bool,
    pub environment: String,
}

impl Config {
    /// Load configuration from a specified `.env` file path or default to the root `.env` file,
    /// then from the process environment.
    pub fn from_env(env_path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        if let Some(path) = env_path {
            from_path(path).map_err(|e| format!("Failed to load .env file from {}: {}", path, e))?;
        } else if let Err(e) = dotenv() {
            warn!("Could not load .env file: {}", e);
        }

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unset keys fall back to defaults,
    /// set-but-invalid keys are errors.
    pub fn from_vars<F>(lookup: F) -> Result<Self, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            data_dir: lookup("DATA_DIR")
                .unwrap_or_else(|| "data".to_string())
                .into(),

            api_host: lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            api_port: lookup("API_PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .map_err(|e| format!("Invalid API_PORT: {}", e))?,

            admin_enabled: match lookup("ADMIN_ENABLED") {
                Some(value) => parse_flag(&value)
                    .ok_or_else(|| format!("Invalid ADMIN_ENABLED: {}", value))?,
                None => false,
            },

            environment: lookup("ENV").unwrap_or_else(|| "development".to_string()),
        };

        Ok(config)
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    pub fn log_config(&self) {
        info!("📋 Configuration loaded:");
        info!("  📁 Data directory: {}", self.data_dir.display());
        info!("  🌐 API Server: {}", self.api_address());
        info!("  🏷️  Environment: {}", self.environment);

        if self.admin_enabled {
            warn!("  ✏️  Admin write endpoints: enabled (unauthenticated)");
        } else {
            info!("  ✏️  Admin write endpoints: disabled");
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
