use crate::domain::value_objects::{Provider, ServiceOptions};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Provider selection
    pub provider: Provider,
    pub api_key: Option<String>,
    pub base_url: Option<String>,

    // Lookup settings
    pub target_ips: Vec<String>,
    pub locale: String,
    pub hostname_lookup: bool,
    pub timeout_secs: u64,

    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: Provider::IpApi,
            api_key: None,
            base_url: None,
            target_ips: Vec::new(),
            locale: "en".to_string(),
            hostname_lookup: false,
            timeout_secs: 5,
            debug: false,
        }
    }
}

impl Config {
    /// Settings handed to the provider client.
    pub fn service_options(&self) -> ServiceOptions {
        let mut options = ServiceOptions::new()
            .target_ips(self.target_ips.clone())
            .locale(self.locale.as_str())
            .hostname_lookup(self.hostname_lookup)
            .timeout(Duration::from_secs(self.timeout_secs));
        if let Some(key) = &self.api_key {
            options = options.api_key(key.as_str());
        }
        if let Some(url) = &self.base_url {
            options = options.base_url(url.as_str());
        }
        options
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    let provider_name =
        std::env::var("IPLOCATE_PROVIDER").unwrap_or_else(|_| "ipapi".to_string());
    let provider = Provider::parse(&provider_name)
        .ok_or_else(|| anyhow::anyhow!("unknown provider '{}'", provider_name))?;

    let api_key = std::env::var("IPLOCATE_API_KEY")
        .ok()
        .filter(|v| !v.is_empty());

    let base_url = std::env::var("IPLOCATE_BASE_URL").ok();

    let target_ips = std::env::var("IPLOCATE_TARGET_IPS")
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let locale = std::env::var("IPLOCATE_LOCALE").unwrap_or_else(|_| "en".to_string());

    let hostname_lookup = std::env::var("IPLOCATE_HOSTNAME_LOOKUP")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);

    let timeout_secs = std::env::var("IPLOCATE_TIMEOUT_SECS")
        .unwrap_or_else(|_| "5".to_string())
        .parse()
        .unwrap_or(5);

    let debug = std::env::var("DEBUG").is_ok();

    Ok(Config {
        provider,
        api_key,
        base_url,
        target_ips,
        locale,
        hostname_lookup,
        timeout_secs,
        debug,
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-wide.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "IPLOCATE_PROVIDER",
        "IPLOCATE_API_KEY",
        "IPLOCATE_BASE_URL",
        "IPLOCATE_TARGET_IPS",
        "IPLOCATE_LOCALE",
        "IPLOCATE_HOSTNAME_LOOKUP",
        "IPLOCATE_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.provider, Provider::IpApi);
        assert_eq!(cfg.locale, "en");
        assert_eq!(cfg.timeout_secs, 5);
        assert!(cfg.target_ips.is_empty());
        assert!(!cfg.hostname_lookup);
    }

    #[test]
    fn test_load_config_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let cfg = load_config().unwrap();
        assert_eq!(cfg.provider, Provider::IpApi);
        assert!(cfg.api_key.is_none());
        assert!(cfg.target_ips.is_empty());
        assert_eq!(cfg.timeout_secs, 5);
    }

    #[test]
    fn test_load_config_custom() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("IPLOCATE_PROVIDER", "ipgeolocation");
        std::env::set_var("IPLOCATE_API_KEY", "abc");
        std::env::set_var("IPLOCATE_TARGET_IPS", "8.8.8.8, 1.1.1.1,");
        std::env::set_var("IPLOCATE_LOCALE", "de");
        std::env::set_var("IPLOCATE_HOSTNAME_LOOKUP", "TRUE");
        std::env::set_var("IPLOCATE_TIMEOUT_SECS", "12");

        let cfg = load_config().unwrap();
        assert_eq!(cfg.provider, Provider::IpGeolocation);
        assert_eq!(cfg.api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.target_ips, vec!["8.8.8.8", "1.1.1.1"]);
        assert_eq!(cfg.locale, "de");
        assert!(cfg.hostname_lookup);
        assert_eq!(cfg.timeout_secs, 12);

        clear_env();
    }

    #[test]
    fn test_load_config_unknown_provider() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("IPLOCATE_PROVIDER", "maxmind");

        let err = load_config().unwrap_err();
        assert!(err.to_string().contains("maxmind"));

        clear_env();
    }

    #[test]
    fn test_load_config_parse_error_uses_default() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("IPLOCATE_TIMEOUT_SECS", "not_a_number");

        let cfg = load_config().unwrap();
        assert_eq!(cfg.timeout_secs, 5);

        clear_env();
    }

    #[test]
    fn test_empty_api_key_is_none() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("IPLOCATE_API_KEY", "");

        let cfg = load_config().unwrap();
        assert!(cfg.api_key.is_none());

        clear_env();
    }

    #[test]
    fn test_service_options_projection() {
        let cfg = Config {
            provider: Provider::IpInfo,
            api_key: Some("tok".to_string()),
            base_url: Some("http://localhost:9000".to_string()),
            target_ips: vec!["8.8.8.8".to_string()],
            locale: "FR".to_string(),
            hostname_lookup: true,
            timeout_secs: 3,
            debug: false,
        };

        let options = cfg.service_options();
        assert_eq!(options.target_ips, vec!["8.8.8.8"]);
        assert_eq!(options.api_key.as_deref(), Some("tok"));
        assert_eq!(options.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(options.locale, "fr");
        assert!(options.hostname_lookup);
        assert_eq!(options.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_config_debug() {
        let cfg = Config::default();
        let debug_str = format!("{:?}", cfg);
        assert!(debug_str.contains("provider"));
        assert!(debug_str.contains("IpApi"));
    }
}
