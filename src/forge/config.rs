//! Configuration for the remote forge connection.
use secrecy::SecretString;

/// Default page size for paginated listing queries.
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// Page size for the commit compare endpoint (GitHub caps it at 250).
pub const COMPARE_PAGE_SIZE: u16 = 250;

/// Remote repository connection configuration for authenticating and
/// interacting with the forge.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote forge host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Full "owner/repo" path.
    pub path: String,
    /// Access token for authentication.
    pub token: SecretString,
}

impl RemoteConfig {
    /// Base URL of the REST API.
    pub fn api_base_url(&self) -> String {
        format!("{}://api.{}", self.scheme, self.host)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "".to_string(),
            scheme: "".to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            path: "".to_string(),
            token: SecretString::from("".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_api_base_url() {
        let config = RemoteConfig {
            host: "github.com".to_string(),
            scheme: "https".to_string(),
            ..RemoteConfig::default()
        };

        assert_eq!(config.api_base_url(), "https://api.github.com");
    }
}
