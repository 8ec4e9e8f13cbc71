use std::env;

use tracing::warn;

/// Runtime configuration, read once at startup.
///
/// Every value has a default matching the reference deployment, so the binary
/// runs with no environment at all; any key can be overridden via `.env` or
/// the process environment.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// STH-Comet host
    pub sth_host: String,
    /// STH-Comet port
    pub sth_port: u16,
    /// NGSI entity type of the monitored device
    pub device_type: String,
    /// NGSI entity id of the monitored device
    pub device_id: String,
    /// `fiware-service` header value
    pub fiware_service: String,
    /// `fiware-servicepath` header value
    pub fiware_service_path: String,
    /// Maximum number of retained samples per signal
    pub last_n: u32,
    /// Seconds between fetch cycles
    pub poll_interval_secs: u64,
    /// Bind host for the dashboard web server
    pub dash_host: String,
    /// Bind port for the dashboard web server
    pub dash_port: u16,
}

impl DashboardConfig {
    /// Build the configuration from the environment, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            sth_host: string_var("STH_HOST", defaults.sth_host),
            sth_port: parsed_var("STH_PORT", defaults.sth_port),
            device_type: string_var("DEVICE_TYPE", defaults.device_type),
            device_id: string_var("DEVICE_ID", defaults.device_id),
            fiware_service: string_var("FIWARE_SERVICE", defaults.fiware_service),
            fiware_service_path: string_var("FIWARE_SERVICE_PATH", defaults.fiware_service_path),
            last_n: parsed_var("LAST_N", defaults.last_n),
            poll_interval_secs: parsed_var("POLL_INTERVAL_SECS", defaults.poll_interval_secs),
            dash_host: string_var("DASH_HOST", defaults.dash_host),
            dash_port: parsed_var("DASH_PORT", defaults.dash_port),
        }
    }

    /// Address the dashboard web server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.dash_host, self.dash_port)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sth_host: "20.206.204.120".to_string(),
            sth_port: 8666,
            device_type: "Lamp".to_string(),
            device_id: "urn:ngsi-ld:Lamp:06x".to_string(),
            fiware_service: "smart".to_string(),
            fiware_service_path: "/".to_string(),
            last_n: 30,
            poll_interval_secs: 10,
            dash_host: "0.0.0.0".to_string(),
            dash_port: 8050,
        }
    }
}

fn string_var(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn parsed_var<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring unparseable {}={:?}, using {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_deployment() {
        let config = DashboardConfig::default();
        assert_eq!(config.sth_port, 8666);
        assert_eq!(config.device_id, "urn:ngsi-ld:Lamp:06x");
        assert_eq!(config.fiware_service, "smart");
        assert_eq!(config.last_n, 30);
        assert_eq!(config.poll_interval_secs, 10);
        assert_eq!(config.bind_addr(), "0.0.0.0:8050");
    }
}
