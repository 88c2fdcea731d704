use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub mail: MailConfig,
    pub locator: LocatorConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
    /// Upsert the bundled hospital dataset into the database on startup
    pub seed_on_startup: bool,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Signing configuration for admin session tokens (HS256)
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    /// Mark the `adminToken` cookie as `Secure`
    pub cookie_secure: bool,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Outbound e-mail (Resend HTTP API)
#[derive(Clone)]
pub struct MailConfig {
    /// Mail dispatch is disabled when no API key is configured
    pub api_key: Option<String>,
    pub api_url: String,
    pub from_address: String,
    pub admin_address: String,
    pub site_url: String,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("from_address", &self.from_address)
            .field("admin_address", &self.admin_address)
            .field("site_url", &self.site_url)
            .finish()
    }
}

/// Hospital locator pipeline settings
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// Optional override for the bundled static dataset
    pub dataset_path: Option<String>,
    pub poll_interval: Duration,
    pub location_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            mail: MailConfig::from_env()?,
            locator: LocatorConfig::from_env()?,
        })
    }
}

fn parse_bool(name: &str, default: bool) -> Result<bool, String> {
    match env::var(name) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" | "" => Ok(false),
            other => Err(format!("{} must be a boolean, got '{}'", name, other)),
        },
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 2 * 1024 * 1024; // 2MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        let seed_on_startup = parse_bool("SEED_ON_STARTUP", false)?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
            seed_on_startup,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl AuthConfig {
    const DEFAULT_JWT_TTL_SECS: u64 = 24 * 60 * 60; // 24 hours
    const MIN_SECRET_LEN: usize = 16;

    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET environment variable is required".to_string())?;

        if jwt_secret.len() < Self::MIN_SECRET_LEN {
            return Err(format!(
                "JWT_SECRET must be at least {} characters",
                Self::MIN_SECRET_LEN
            ));
        }

        let ttl_secs = env::var("JWT_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_JWT_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_TTL_SECS must be a valid number".to_string())?;

        let cookie_secure = parse_bool("AUTH_COOKIE_SECURE", false)?;

        Ok(Self {
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_secs),
            cookie_secure,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "WebGIS RS Surabaya API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for WebGIS Rumah Sakit Surabaya".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl MailConfig {
    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("RESEND_API_KEY").ok().filter(|s| !s.is_empty());

        let api_url =
            env::var("RESEND_API_URL").unwrap_or_else(|_| "https://api.resend.com".to_string());

        let from_address =
            env::var("MAIL_FROM").unwrap_or_else(|_| "noreply@rs-gis.web.id".to_string());

        let admin_address =
            env::var("MAIL_ADMIN_ADDRESS").unwrap_or_else(|_| "admin@rs-gis.web.id".to_string());

        let site_url = env::var("SITE_URL").unwrap_or_else(|_| "https://rs-gis.web.id".to_string());

        Ok(Self {
            api_key,
            api_url,
            from_address,
            admin_address,
            site_url,
        })
    }
}

impl LocatorConfig {
    const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
    const DEFAULT_LOCATION_TIMEOUT_MS: u64 = 10_000;

    pub fn from_env() -> Result<Self, String> {
        let dataset_path = env::var("HOSPITAL_DATASET_PATH")
            .ok()
            .filter(|s| !s.is_empty());

        let poll_interval_secs = env::var("LOCATOR_POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_POLL_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "LOCATOR_POLL_INTERVAL_SECS must be a valid number".to_string())?;

        if poll_interval_secs == 0 {
            return Err("LOCATOR_POLL_INTERVAL_SECS must be greater than zero".to_string());
        }

        let location_timeout_ms = env::var("LOCATOR_LOCATION_TIMEOUT_MS")
            .unwrap_or_else(|_| Self::DEFAULT_LOCATION_TIMEOUT_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "LOCATOR_LOCATION_TIMEOUT_MS must be a valid number".to_string())?;

        Ok(Self {
            dataset_path,
            poll_interval: Duration::from_secs(poll_interval_secs),
            location_timeout: Duration::from_millis(location_timeout_ms),
        })
    }
}
