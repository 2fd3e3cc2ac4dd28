use crate::application::refresher::{UpdatePolicy, DEFAULT_REFRESH_INTERVAL};
use anyhow::{bail, Context};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub backend: BackendSettings,
    pub refresh: RefreshSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendSettings {
    pub base_url: String,
    pub request_timeout_ms: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_ms: 15_000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RefreshSettings {
    pub interval_ms: u64,
    pub update_policy: UpdatePolicy,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_REFRESH_INTERVAL.as_millis() as u64,
            update_policy: UpdatePolicy::AllOrNothing,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub listen: String,
    /// Meta refresh period of the served page; 0 disables it
    pub page_refresh_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
            page_refresh_secs: 30,
        }
    }
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh.interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.backend.request_timeout_ms)
    }

    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        self.server
            .listen
            .parse()
            .with_context(|| format!("Invalid listen address: {}", self.server.listen))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.refresh.interval_ms == 0 {
            bail!("refresh.interval_ms must be greater than zero");
        }
        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            bail!("backend.base_url must be an http(s) URL: {}", self.backend.base_url);
        }
        self.listen_addr()?;
        Ok(())
    }
}

/// Load `config/dashboard.*` (optional) overlaid by `DASHBOARD_*` variables,
/// e.g. `DASHBOARD_BACKEND__BASE_URL`.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let dashboard_config: DashboardConfig = settings.try_deserialize()?;
    dashboard_config.validate()?;
    Ok(dashboard_config)
}

/// Join the backend base URL and a resource path
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> DashboardConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("http://localhost:8000/", "/api/metrics/tokens"),
            "http://localhost:8000/api/metrics/tokens"
        );
        assert_eq!(
            endpoint_url("http://backend", "api/overview"),
            "http://backend/api/overview"
        );
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = parse("");
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));
        assert_eq!(config.refresh.update_policy, UpdatePolicy::AllOrNothing);
        assert_eq!(config.server.page_refresh_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_overrides() {
        let config = parse(
            r#"
            [backend]
            base_url = "https://claw.internal"

            [refresh]
            interval_ms = 5000
            update_policy = "per_slot"
            "#,
        );
        assert_eq!(config.backend.base_url, "https://claw.internal");
        assert_eq!(config.backend.request_timeout_ms, 15_000);
        assert_eq!(config.refresh_interval(), Duration::from_secs(5));
        assert_eq!(config.refresh.update_policy, UpdatePolicy::PerSlot);
        assert_eq!(config.server.listen, "0.0.0.0:8080");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = DashboardConfig::default();
        config.refresh.interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.backend.base_url = "localhost:8000".to_string();
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.server.listen = "nowhere".to_string();
        assert!(config.validate().is_err());
    }
}
