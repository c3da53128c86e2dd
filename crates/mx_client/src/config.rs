use std::time::Duration;

use mx_core::Result;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:6051";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            api_url: normalize_base(Url::parse(api_url)?),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: normalize_base(Url::parse(DEFAULT_API_URL).expect("default API URL is valid")),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// Relative joins replace the last path segment unless the base ends in '/'.
fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url.as_str(), "http://localhost:6051/");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_base_path_gets_trailing_slash() {
        let config = ClientConfig::new("https://example.com/api").unwrap();
        assert_eq!(config.api_url.as_str(), "https://example.com/api/");

        let config = ClientConfig::new("https://example.com/api/")
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.api_url.as_str(), "https://example.com/api/");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_url() {
        assert!(ClientConfig::new("localhost without scheme").is_err());
    }
}
