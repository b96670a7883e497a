use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::env;

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
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS (empty = any origin)
    pub cors_allow_origins: Vec<String>,

    // Generative text service
    pub ai_enabled: bool,
    pub ollama_api_url: String,
    pub ollama_model: String,
    pub ai_blueprint_timeout_seconds: u64,
    pub ai_analysis_timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: Environment::Dev,
            server_addr: "127.0.0.1:5000".to_string(),
            cors_allow_origins: Vec::new(),
            ai_enabled: true,
            ollama_api_url: "http://localhost:11434/api/generate".to_string(),
            ollama_model: "granite3.3:2b".to_string(),
            ai_blueprint_timeout_seconds: 2,
            ai_analysis_timeout_seconds: 30,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build settings from any variable source; `from_env` reads the process.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Settings::default();

        let env = Environment::from_str(&var("ENV").unwrap_or_else(|| "dev".to_string()));
        let server_addr = var("SERVER_ADDR").unwrap_or(defaults.server_addr);

        // CORS
        let cors_allow_origins = parse_origins(&var("CORS_ALLOW_ORIGINS").unwrap_or_default())?;

        // Generative text service
        let ai_enabled = match var("AI_ENABLED") {
            Some(v) => parse_bool(&v).with_context(|| format!("AI_ENABLED is not a boolean: {v}"))?,
            None => defaults.ai_enabled,
        };
        let ollama_api_url = var("OLLAMA_API_URL").unwrap_or(defaults.ollama_api_url);
        let ollama_model = var("OLLAMA_MODEL").unwrap_or(defaults.ollama_model);
        let ai_blueprint_timeout_seconds = seconds_var(
            "AI_BLUEPRINT_TIMEOUT_SECONDS",
            var("AI_BLUEPRINT_TIMEOUT_SECONDS"),
            defaults.ai_blueprint_timeout_seconds,
        )?;
        let ai_analysis_timeout_seconds = seconds_var(
            "AI_ANALYSIS_TIMEOUT_SECONDS",
            var("AI_ANALYSIS_TIMEOUT_SECONDS"),
            defaults.ai_analysis_timeout_seconds,
        )?;

        Ok(Settings {
            env,
            server_addr,
            cors_allow_origins,
            ai_enabled,
            ollama_api_url,
            ollama_model,
            ai_blueprint_timeout_seconds,
            ai_analysis_timeout_seconds,
        })
    }
}

/// Comma separated origins. Empty or `*` means any origin.
fn parse_origins(raw: &str) -> Result<Vec<String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "*")
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map(|_| origin.to_string())
                .with_context(|| format!("CORS_ALLOW_ORIGINS has an invalid origin: {origin:?}"))
        })
        .collect()
}

fn seconds_var(name: &str, value: Option<String>, default: u64) -> Result<u64> {
    match value {
        Some(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a whole number of seconds, got {v:?}")),
        None => Ok(default),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
