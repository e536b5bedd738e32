use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

pub const API_KEY_ENV: &str = "TRUE_PATH_API_KEY";
pub const API_KEY_FILE_ENV: &str = "TRUE_PATH_API_KEY_FILE";
pub const SEARCH_URL_ENV: &str = "TRUE_PATH_SEARCH_URL";
pub const SAFE_BROWSING_URL_ENV: &str = "TRUE_PATH_SAFE_BROWSING_URL";

pub const DEFAULT_SAFE_BROWSING_API: &str = "https://safebrowsing.googleapis.com/v4/";
pub const DEFAULT_SEARCH_URL: &str = "http://www.bing.com/search";
pub const CLIENT_ID: &str = "truepathpt";
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything the checks need from the outside world besides the address itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Safe Browsing credential. `None` makes the blocklist check fail closed.
    pub api_key: Option<String>,
    pub safe_browsing_api: String,
    pub search_url: String,
    pub client_id: String,
    pub client_version: String,
    pub timeout: Option<Duration>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            safe_browsing_api: DEFAULT_SAFE_BROWSING_API.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            client_id: CLIENT_ID.to_string(),
            client_version: CLIENT_VERSION.to_string(),
            timeout: None,
        }
    }
}

impl ProbeConfig {
    /// Defaults with endpoint overrides taken from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = non_empty_env(SEARCH_URL_ENV) {
            config.search_url = url;
        }
        if let Some(url) = non_empty_env(SAFE_BROWSING_URL_ENV) {
            config.safe_browsing_api = url;
        }
        config
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join an endpoint name onto the Safe Browsing base, tolerating a missing trailing slash.
    pub fn safe_browsing_endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.safe_browsing_api.trim_end_matches('/'), name)
    }
}

/// Read an opaque API token from `path`. A missing file means "no credential".
pub fn read_api_key_file(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let key = content.trim();
            if key.is_empty() {
                Ok(None)
            } else {
                Ok(Some(key.to_string()))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_endpoints() {
        let config = ProbeConfig::default();
        assert_eq!(config.api_key, None);
        assert_eq!(config.search_url, "http://www.bing.com/search");
        assert_eq!(config.client_id, "truepathpt");
        assert_eq!(config.client_version, "0.1.0");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn endpoint_join_handles_trailing_slash() {
        let config = ProbeConfig::default();
        assert_eq!(
            config.safe_browsing_endpoint("threatLists"),
            "https://safebrowsing.googleapis.com/v4/threatLists"
        );

        let config = ProbeConfig {
            safe_browsing_api: "http://127.0.0.1:9/v4".to_string(),
            ..ProbeConfig::default()
        };
        assert_eq!(
            config.safe_browsing_endpoint("threatMatches:find"),
            "http://127.0.0.1:9/v4/threatMatches:find"
        );
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = ProbeConfig::default().with_api_key(Some("  \n".to_string()));
        assert_eq!(config.api_key, None);

        let config = ProbeConfig::default().with_api_key(Some("abc123\n".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn key_file_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_key");
        fs::write(&path, "secret-token\n").unwrap();

        assert_eq!(read_api_key_file(&path).unwrap(), Some("secret-token".to_string()));
    }

    #[test]
    fn missing_key_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");

        assert_eq!(read_api_key_file(&path).unwrap(), None);
    }

    #[test]
    fn empty_key_file_is_no_credential() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_key");
        fs::write(&path, "").unwrap();

        assert_eq!(read_api_key_file(&path).unwrap(), None);
    }

    #[test]
    fn directory_as_key_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(read_api_key_file(dir.path()).is_err());
    }
}
