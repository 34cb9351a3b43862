/*
 * Responsibility
 * - 環境変数や設定の読み込み (DB 接続、JWT secret、create route の認証方式など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Which `CommentRepo` backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

const REDACTED: &str = "<redacted>";

/// Interceptor guarding `POST /api/comment`.
#[derive(Clone, PartialEq, Eq)]
pub enum CreateAuth {
    Bearer,
    Basic { username: String, password: String },
}

impl fmt::Debug for CreateAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateAuth::Bearer => f.write_str("Bearer"),
            CreateAuth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &REDACTED)
                .finish(),
        }
    }
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: PgSslMode,
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());

        let port = match std::env::var("DB_PORT") {
            Ok(v) => v.parse().map_err(|_| ConfigError::Invalid("DB_PORT"))?,
            Err(_) => 5432,
        };

        let ssl_mode = match std::env::var("DB_SSL_MODE") {
            Ok(v) => PgSslMode::from_str(&v).map_err(|_| ConfigError::Invalid("DB_SSL_MODE"))?,
            Err(_) => PgSslMode::Prefer,
        };

        Ok(Self {
            url,
            host: std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port,
            username: std::env::var("DB_USERNAME").unwrap_or_else(|_| "postgres".to_string()),
            password: std::env::var("DB_PASSWORD").unwrap_or_default(),
            name: std::env::var("DB_TABLE").unwrap_or_else(|_| "postgres".to_string()),
            ssl_mode,
        })
    }

    /// `DATABASE_URL` wins over the individual `DB_*` variables.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url).map_err(|_| ConfigError::Invalid("DATABASE_URL"));
        }

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(self.ssl_mode))
    }
}

// a URL may carry credentials, so only its presence is shown
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| REDACTED))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("name", &self.name)
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub store: StoreKind,
    pub database: DatabaseConfig,

    // shared HMAC secret for bearer tokens
    pub jwt_secret: String,
    pub create_auth: CreateAuth,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let store = match std::env::var("COMMENT_STORE")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" => StoreKind::Postgres,
            "memory" => StoreKind::Memory,
            _ => return Err(ConfigError::Invalid("COMMENT_STORE")),
        };

        let database = DatabaseConfig::from_env()?;

        let jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let create_auth = match std::env::var("CREATE_COMMENT_AUTH")
            .unwrap_or_else(|_| "bearer".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "bearer" => CreateAuth::Bearer,
            "basic" => CreateAuth::Basic {
                username: std::env::var("BASIC_AUTH_USERNAME")
                    .map_err(|_| ConfigError::Missing("BASIC_AUTH_USERNAME"))?,
                password: std::env::var("BASIC_AUTH_PASSWORD")
                    .map_err(|_| ConfigError::Missing("BASIC_AUTH_PASSWORD"))?,
            },
            _ => return Err(ConfigError::Invalid("CREATE_COMMENT_AUTH")),
        };

        Ok(Self {
            addr,
            app_env,
            store,
            database,
            jwt_secret,
            create_auth,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("store", &self.store)
            .field("database", &self.database)
            .field("jwt_secret", &REDACTED)
            .field("create_auth", &self.create_auth)
            .finish()
    }
}
