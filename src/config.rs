use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub app: AppConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Cookie carrying the session token issued by the sign-in flow.
    pub session_cookie_name: String,
    pub sign_in_url: String,
    /// Where signed-out visitors of the edit page are sent.
    pub register_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub name: String,
    pub environment: Environment,
    pub static_dir: String,
    pub locales_dir: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Server configuration
        let host = env::var("SERVER_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse::<IpAddr>()
            .context("Failed to parse SERVER_HOST")?;

        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .context("Failed to parse SERVER_PORT")?;

        // Database configuration
        let db_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let db_max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(val) => Some(val.parse().context("Failed to parse DATABASE_MAX_CONNECTIONS")?),
            Err(_) => Some(10),
        };
        let db_min_connections = match env::var("DATABASE_MIN_CONNECTIONS") {
            Ok(val) => Some(val.parse().context("Failed to parse DATABASE_MIN_CONNECTIONS")?),
            Err(_) => Some(1),
        };

        // Session configuration
        let session_cookie_name = env::var("SESSION_COOKIE_NAME")
            .unwrap_or_else(|_| "next-auth.session-token".to_string());
        let sign_in_url =
            env::var("SIGN_IN_URL").unwrap_or_else(|_| "/api/auth/signin/google".to_string());
        let register_url =
            env::var("REGISTER_URL").unwrap_or_else(|_| "/register/update-profile".to_string());

        // App configuration
        let environment: Environment = env::var("APP_ENVIRONMENT")
            .map(|val| val.parse::<Environment>().unwrap_or_default())
            .unwrap_or_default();
        let log_format = match env::var("LOG_FORMAT") {
            Ok(val) => val.parse::<LogFormat>().map_err(anyhow::Error::msg)?,
            Err(_) => LogFormat::default(),
        };

        let app_name = env::var("APP_NAME").unwrap_or_else(|_| "Call Scheduler".to_string());
        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());
        let locales_dir = env::var("LOCALES_DIR").unwrap_or_else(|_| "locales".to_string());

        Ok(Config {
            server: ServerConfig { host, port },
            database: DatabaseConfig {
                url: db_url,
                max_connections: db_max_connections,
                min_connections: db_min_connections,
            },
            auth: AuthConfig {
                session_cookie_name,
                sign_in_url,
                register_url,
            },
            app: AppConfig {
                name: app_name,
                environment,
                static_dir,
                locales_dir,
                log_format,
            },
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == Environment::Production
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            "development" => Ok(Environment::Development),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

static CONFIG: OnceCell<Config> = OnceCell::new();

pub fn init() -> Result<&'static Config> {
    CONFIG.get_or_try_init(Config::from_env)
}

pub fn get() -> &'static Config {
    CONFIG.get().expect("Config is not initialized")
}

#[cfg(test)]
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgres://localhost/call_scheduler_test".to_string(),
            max_connections: Some(1),
            min_connections: Some(1),
        },
        auth: AuthConfig {
            session_cookie_name: "next-auth.session-token".to_string(),
            sign_in_url: "/api/auth/signin/google".to_string(),
            register_url: "/register/update-profile".to_string(),
        },
        app: AppConfig {
            name: "Call Scheduler".to_string(),
            environment: Environment::Development,
            static_dir: "static".to_string(),
            locales_dir: "locales".to_string(),
            log_format: LogFormat::Text,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_environment_names() {
        assert_eq!("Production".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("staging".parse::<Environment>(), Ok(Environment::Staging));
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn parses_log_formats() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
