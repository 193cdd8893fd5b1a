use crate::utils::errors::{Result, ViewerError};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub stream: StreamConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the session backend
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StreamConfig {
    /// How long to wait for the first media stream before giving up, seconds
    pub connect_timeout: u64,
    /// Delay before the viewer exits after a stream disconnect, seconds
    pub close_delay: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            request_timeout: 30,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            connect_timeout: 15,
            close_delay: 3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            stream: StreamConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        // 首先尝试从 TOML 配置文件加载
        let config_path = std::env::var("CONFIG_PATH")
            .unwrap_or_else(|_| "/etc/session-viewer/config.toml".to_string());

        let mut config = if std::path::Path::new(&config_path).exists() {
            let config_str = std::fs::read_to_string(&config_path).map_err(|e| {
                ViewerError::Configuration(format!(
                    "Failed to read config file {}: {}",
                    config_path, e
                ))
            })?;

            toml::from_str::<AppConfig>(&config_str).map_err(|e| {
                ViewerError::Configuration(format!("Failed to parse config file: {}", e))
            })?
        } else {
            // 如果配置文件不存在，使用默认配置
            AppConfig::default()
        };

        // 环境变量覆盖配置文件设置
        if let Ok(url) = std::env::var("BACKEND_URL") {
            config.backend.base_url = url;
        }
        if let Ok(timeout) = std::env::var("BACKEND_REQUEST_TIMEOUT") {
            config.backend.request_timeout = timeout.parse().map_err(|e| {
                ViewerError::Configuration(format!("Invalid BACKEND_REQUEST_TIMEOUT: {}", e))
            })?;
        }
        if let Ok(timeout) = std::env::var("STREAM_CONNECT_TIMEOUT") {
            config.stream.connect_timeout = timeout.parse().map_err(|e| {
                ViewerError::Configuration(format!("Invalid STREAM_CONNECT_TIMEOUT: {}", e))
            })?;
        }
        if let Ok(delay) = std::env::var("STREAM_CLOSE_DELAY") {
            config.stream.close_delay = delay.parse().map_err(|e| {
                ViewerError::Configuration(format!("Invalid STREAM_CLOSE_DELAY: {}", e))
            })?;
        }

        Ok(config)
    }
}
