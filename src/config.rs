use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    /// Base URL of the candidate-facing frontend; used to build share links.
    pub app_url: String,
    pub mail_api_url: String,
    pub mail_api_key: String,
    pub mail_from: String,
    pub admin_rps: u32,
    pub public_rps: u32,
    pub uploads_dir: String,
    /// Single-tenant organization every interview is created under.
    pub organization_id: Uuid,
    /// Interview the reserved demo tokens resolve against.
    pub demo_interview_id: Uuid,
    /// Tokens that auto-create a session when no session exists for them.
    pub demo_access_tokens: Vec<String>,
    pub admin_bootstrap_email: String,
    pub admin_bootstrap_password: Option<String>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            app_url: get_env_or("APP_URL", "http://localhost:3000"),
            mail_api_url: get_env_or("MAIL_API_URL", "https://api.resend.com/emails"),
            mail_api_key: get_env("MAIL_API_KEY")?,
            mail_from: get_env_or("MAIL_FROM", "Interviews <no-reply@example.com>"),
            admin_rps: get_env_parse("ADMIN_RPS")?,
            public_rps: get_env_parse("PUBLIC_RPS")?,
            uploads_dir: get_env_or("UPLOADS_DIR", "uploads"),
            organization_id: get_env_parse_or(
                "ORGANIZATION_ID",
                "550e8400-e29b-41d4-a716-446655440000",
            )?,
            demo_interview_id: get_env_parse_or(
                "DEMO_INTERVIEW_ID",
                "550e8400-e29b-41d4-a716-446655440002",
            )?,
            demo_access_tokens: get_env_or("DEMO_ACCESS_TOKENS", "DEMO123,TEST456")
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            admin_bootstrap_email: get_env_or("ADMIN_BOOTSTRAP_EMAIL", "admin@example.com"),
            admin_bootstrap_password: env::var("ADMIN_BOOTSTRAP_PASSWORD").ok(),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn get_env_parse_or<T>(name: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env_or(name, default);
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
