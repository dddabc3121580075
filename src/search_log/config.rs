//! Search-log configuration

use secrecy::SecretString;

use crate::error::EndpointError;

const ENV_PREFIX: &str = "ELASTICSEARCH_LOG_";

/// Connection settings for the Elasticsearch log.
///
/// Loaded from `ELASTICSEARCH_LOG_{ENABLED,SCHEME,HOST,PORT,USERNAME,PASSWORD,INDEX}`.
#[derive(Debug, Clone)]
pub struct SearchLogConfig {
    pub enabled: bool,
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub index: String,
}

impl Default for SearchLogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            scheme: "http".to_string(),
            host: String::new(),
            port: 9200,
            username: None,
            password: None,
            index: String::new(),
        }
    }
}

impl SearchLogConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, EndpointError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which receives full variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EndpointError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(format!("{ENV_PREFIX}{name}").as_str())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        let enabled = get("ENABLED")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);
        let port = match get("PORT") {
            Some(port) => port.parse::<u16>().map_err(|e| {
                EndpointError::ConfigurationError(format!(
                    "{ENV_PREFIX}PORT must be a port number: {e}"
                ))
            })?,
            None => defaults.port,
        };

        Ok(Self {
            enabled,
            scheme: get("SCHEME").unwrap_or(defaults.scheme),
            host: get("HOST").unwrap_or_default(),
            port,
            username: get("USERNAME"),
            password: get("PASSWORD").map(SecretString::from),
            index: get("INDEX").unwrap_or_default(),
        })
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// `{scheme}://{host}:{port}`
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), EndpointError> {
        if self.host.is_empty() {
            return Err(EndpointError::ConfigurationError(format!(
                "{ENV_PREFIX}HOST is required when search logging is enabled"
            )));
        }
        if self.index.is_empty() {
            return Err(EndpointError::ConfigurationError(format!(
                "{ENV_PREFIX}INDEX is required when search logging is enabled"
            )));
        }
        if !matches!(self.scheme.as_str(), "http" | "https") {
            return Err(EndpointError::ConfigurationError(format!(
                "{ENV_PREFIX}SCHEME must be http or https, got {:?}",
                self.scheme
            )));
        }
        Ok(())
    }
}
