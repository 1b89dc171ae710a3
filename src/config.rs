//! Runtime configuration for the dashboard server

use std::path::PathBuf;

/// Dataset file read at startup when `--data` is not given
pub const DEFAULT_DATA_PATH: &str = "spacex_launch_dash.csv";

/// Address the server binds when `--bind` is not given
pub const DEFAULT_BIND: &str = "127.0.0.1:8050";

/// Configuration for the dashboard server
///
/// # Example
/// ```
/// use launchdash::config::DashboardConfig;
///
/// let config = DashboardConfig::default();
/// assert_eq!(config.bind, "127.0.0.1:8050");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// CSV file with the launch records
    pub data_path: PathBuf,
    /// Socket address to listen on (host:port)
    pub bind: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Override the dataset path
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Override the bind address
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.data_path, PathBuf::from("spacex_launch_dash.csv"));
        assert_eq!(config.bind, DEFAULT_BIND);
    }

    #[test]
    fn test_builder_overrides() {
        let config = DashboardConfig::default()
            .with_data_path("/data/launches.csv")
            .with_bind("0.0.0.0:9000");
        assert_eq!(config.data_path, PathBuf::from("/data/launches.csv"));
        assert_eq!(config.bind, "0.0.0.0:9000");
    }
}
