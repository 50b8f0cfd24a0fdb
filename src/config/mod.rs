use once_cell::sync::Lazy;
use serde::Serialize;
use std::env;

#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub billing: BillingConfig,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Serialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityConfig {
    /// HS256 secret shared with the identity provider. Never serialized.
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    /// Empty list means permissive CORS (development).
    pub cors_origins: Vec<String>,
    pub admin_email: Option<String>,
    #[serde(skip_serializing)]
    pub admin_password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BillingConfig {
    #[serde(skip_serializing)]
    pub webhook_secret: String,
    pub timestamp_tolerance_secs: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AiConfig {
    #[serde(skip_serializing)]
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            self.database.acquire_timeout_secs =
                v.parse().unwrap_or(self.database.acquire_timeout_secs);
        }

        // API overrides
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("ADMIN_SETUP_EMAIL") {
            self.security.admin_email = Some(v);
        }
        if let Ok(v) = env::var("ADMIN_SETUP_PASSWORD") {
            self.security.admin_password = Some(v);
        }

        // Billing overrides
        if let Ok(v) = env::var("BILLING_WEBHOOK_SECRET") {
            self.billing.webhook_secret = v;
        }
        if let Ok(v) = env::var("BILLING_TIMESTAMP_TOLERANCE_SECS") {
            self.billing.timestamp_tolerance_secs =
                v.parse().unwrap_or(self.billing.timestamp_tolerance_secs);
        }

        // AI overrides
        if let Ok(v) = env::var("OPENAI_API_KEY") {
            self.ai.api_key = v;
        }
        if let Ok(v) = env::var("OPENAI_BASE_URL") {
            self.ai.base_url = v;
        }
        if let Ok(v) = env::var("OPENAI_MODEL") {
            self.ai.model = v;
        }
        if let Ok(v) = env::var("AI_REQUEST_TIMEOUT_SECS") {
            self.ai.request_timeout_secs = v.parse().unwrap_or(self.ai.request_timeout_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 10,
                acquire_timeout_secs: 30,
            },
            api: ApiConfig {
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                jwt_secret: "sentinel-dev-secret".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                cors_origins: vec![],
                admin_email: None,
                admin_password: None,
            },
            billing: BillingConfig {
                webhook_secret: String::new(),
                timestamp_tolerance_secs: 300,
            },
            ai: AiConfig {
                api_key: String::new(),
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
                request_timeout_secs: 20,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                acquire_timeout_secs: 10,
            },
            api: ApiConfig {
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                cors_origins: vec!["https://staging.sentinel.example".to_string()],
                admin_email: None,
                admin_password: None,
            },
            billing: BillingConfig {
                webhook_secret: String::new(),
                timestamp_tolerance_secs: 300,
            },
            ai: AiConfig {
                api_key: String::new(),
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
                request_timeout_secs: 15,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                acquire_timeout_secs: 5,
            },
            api: ApiConfig {
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
                cors_origins: vec!["https://app.sentinel.example".to_string()],
                admin_email: None,
                admin_password: None,
            },
            billing: BillingConfig {
                webhook_secret: String::new(),
                timestamp_tolerance_secs: 300,
            },
            ai: AiConfig {
                api_key: String::new(),
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
                request_timeout_secs: 15,
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
