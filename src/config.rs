use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    /// JSON in production, pretty output elsewhere.
    pub fn for_env(env: &Environment) -> Self {
        if env.is_prod() {
            Self::Json
        } else {
            Self::Pretty
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,
    pub log_format: LogFormat,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Directory
    pub seed_demo_data: bool,

    // Onboarding sessions
    pub wizard_session_ttl: Duration,
    pub max_wizard_sessions: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: Environment::Dev,
            server_addr: "0.0.0.0:8080".to_string(),
            log_format: LogFormat::Pretty,
            cors_allow_origins: vec!["http://localhost:3000".to_string()],
            seed_demo_data: true,
            wizard_session_ttl: Duration::from_secs(3600),
            max_wizard_sessions: 1000,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or(defaults.server_addr);
        let log_format = match env::var("LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).context("LOG_FORMAT must be pretty, compact or json")?,
            Err(_) => LogFormat::for_env(&env),
        };

        // CORS
        let cors_allow_origins = match env::var("CORS_ALLOW_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => defaults.cors_allow_origins,
        };

        // Directory
        let seed_demo_data = match env::var("SEED_DEMO_DATA") {
            Ok(raw) => parse_bool(&raw).context("SEED_DEMO_DATA must be true or false")?,
            Err(_) => defaults.seed_demo_data,
        };

        // Onboarding sessions
        let wizard_session_ttl = match env::var("WIZARD_SESSION_TTL_SECONDS") {
            Ok(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .context("WIZARD_SESSION_TTL_SECONDS must be a whole number of seconds")?,
            ),
            Err(_) => defaults.wizard_session_ttl,
        };
        let max_wizard_sessions = match env::var("MAX_WIZARD_SESSIONS") {
            Ok(raw) => parse_session_limit(&raw)?,
            Err(_) => defaults.max_wizard_sessions,
        };

        Ok(Settings {
            env,
            server_addr,
            log_format,
            cors_allow_origins,
            seed_demo_data,
            wizard_session_ttl,
            max_wizard_sessions,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_session_limit(raw: &str) -> Result<usize> {
    let limit: usize = raw
        .trim()
        .parse()
        .context("MAX_WIZARD_SESSIONS must be a whole number")?;
    if limit == 0 {
        bail!("MAX_WIZARD_SESSIONS must be at least 1");
    }
    Ok(limit)
}
