use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use postly_store::PasswordAlgorithm;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub password_algorithm: PasswordAlgorithm,
    pub snapshot_path: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = lookup("POSTLY_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("POSTLY_JWT_SECRET is unset or still a placeholder");
        }

        let host = lookup("POSTLY_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("POSTLY_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("POSTLY_PORT must be a port number")?;
        let token_ttl_hours: i64 = lookup("POSTLY_TOKEN_TTL_HOURS")
            .unwrap_or_else(|| "720".into())
            .parse()
            .context("POSTLY_TOKEN_TTL_HOURS must be a whole number of hours")?;
        if token_ttl_hours <= 0 {
            bail!("POSTLY_TOKEN_TTL_HOURS must be positive");
        }
        let password_algorithm = match lookup("POSTLY_PASSWORD_HASH") {
            Some(v) => v.parse().map_err(anyhow::Error::msg)?,
            None => PasswordAlgorithm::default(),
        };
        let snapshot_path = lookup("POSTLY_SNAPSHOT_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            jwt_secret,
            token_ttl_hours,
            password_algorithm,
            snapshot_path,
        })
    }
}
