use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_cors: bool,
    pub enable_request_tracing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    Dynamo,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// DynamoDB endpoint override. Set means local/static credentials;
    /// unset means the default AWS credential chain.
    pub endpoint: Option<String>,
    pub region: String,
    /// Prefix applied to every collection ("table") name, e.g. "staging_".
    pub table_prefix: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Environment defaults first, then specific env var overrides
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env::var("API_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_ENABLE_CORS") {
            self.api.enable_cors = v.parse().unwrap_or(self.api.enable_cors);
        }

        if let Ok(v) = env::var("STORE_BACKEND") {
            self.store.backend = match v.as_str() {
                "memory" => StoreBackend::Memory,
                _ => StoreBackend::Dynamo,
            };
        }
        if let Ok(v) = env::var("DYNAMODB_ENDPOINT") {
            self.store.endpoint = Some(v);
        }
        if let Ok(v) = env::var("AWS_REGION") {
            self.store.region = v;
        }
        if let Ok(v) = env::var("DYNAMODB_TABLE_PREFIX") {
            self.store.table_prefix = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                port: 8080,
                enable_cors: true,
                enable_request_tracing: true,
            },
            store: StoreConfig {
                backend: StoreBackend::Dynamo,
                // DynamoDB Local
                endpoint: Some("http://localhost:8000".to_string()),
                region: "us-west-2".to_string(),
                table_prefix: String::new(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                port: 8080,
                enable_cors: true,
                enable_request_tracing: true,
            },
            store: StoreConfig {
                backend: StoreBackend::Dynamo,
                endpoint: None,
                region: "us-west-2".to_string(),
                table_prefix: "staging_".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                port: 8080,
                enable_cors: false,
                enable_request_tracing: false,
            },
            store: StoreConfig {
                backend: StoreBackend::Dynamo,
                endpoint: None,
                region: "us-west-2".to_string(),
                table_prefix: String::new(),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.port, 8080);
        assert_eq!(
            config.store.endpoint.as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(config.store.backend, StoreBackend::Dynamo);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.store.endpoint.is_none());
        assert!(!config.api.enable_cors);
    }
}
