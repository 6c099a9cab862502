use serde::Deserialize;
use std::{
    env, fs,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("output must be stdout or file")]
    InvalidLogOutput,
    #[error("log.file_path is required when log.output is \"file\"")]
    MissingLogFile,
}

/// Configuration for the blendcube server binary
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub log: LogConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default: all interfaces)
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request generation timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Seconds between metrics log lines (0 disables the reporter)
    #[serde(default = "default_metrics_interval")]
    pub metrics_interval: u64,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_timeout() -> u64 {
    30
}

fn default_metrics_interval() -> u64 {
    300
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout: default_timeout(),
            metrics_interval: default_metrics_interval(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogOutput {
    #[default]
    Stdout,
    File,
}

impl LogOutput {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "stdout" => Ok(LogOutput::Stdout),
            "file" => Ok(LogOutput::File),
            _ => Err(ConfigError::InvalidLogOutput),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LogConfig {
    #[serde(default, deserialize_with = "deserialize_log_output")]
    pub output: LogOutput,
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

fn deserialize_log_output<'de, D>(deserializer: D) -> Result<LogOutput, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    LogOutput::parse(&value).map_err(serde::de::Error::custom)
}

/// Template documents, one per output variant
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelConfig {
    /// Template used for `.gltf` output
    pub file_path: PathBuf,
    /// Template used for `.glb` output
    pub binary_file_path: PathBuf,
}

impl Config {
    /// Reads the TOML file, then applies `BLENDCUBE_*` environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;
        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Override fields from variables returned by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("BLENDCUBE_SERVER_HOST") {
            self.server.host = parse_env("BLENDCUBE_SERVER_HOST", value)?;
        }
        if let Some(value) = lookup("BLENDCUBE_SERVER_PORT") {
            self.server.port = parse_env("BLENDCUBE_SERVER_PORT", value)?;
        }
        if let Some(value) = lookup("BLENDCUBE_SERVER_TIMEOUT") {
            self.server.timeout = parse_env("BLENDCUBE_SERVER_TIMEOUT", value)?;
        }
        if let Some(value) = lookup("BLENDCUBE_LOG_OUTPUT") {
            self.log.output = LogOutput::parse(&value)?;
        }
        if let Some(value) = lookup("BLENDCUBE_LOG_FILE_PATH") {
            self.log.file_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("BLENDCUBE_MODEL_FILE_PATH") {
            self.model.file_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("BLENDCUBE_MODEL_BINARY_FILE_PATH") {
            self.model.binary_file_path = PathBuf::from(value);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log.output == LogOutput::File && self.log.file_path.is_none() {
            return Err(ConfigError::MissingLogFile);
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { key, value })
}
