use std::path::{Path, PathBuf};

use anyhow::Context;

const DEFAULT_PASSWORD_FILE: &str = "/run/secrets/db_password";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_username: String,
    pub db_name: String,
    pub db_password_file: PathBuf,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable lookup.
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            db_host: var("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            db_port: var("DB_PORT")
                .unwrap_or_else(|| "5432".to_string())
                .parse()
                .context("DB_PORT must be a valid number")?,
            db_username: var("DB_USERNAME").context("DB_USERNAME must be set")?,
            db_name: var("DB_NAME").context("DB_NAME must be set")?,
            db_password_file: var("DB_PASSWORD_FILE")
                .unwrap_or_else(|| DEFAULT_PASSWORD_FILE.to_string())
                .into(),
            db_max_connections: var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("DB_MAX_CONNECTIONS must be a valid number")?,
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
        })
    }

    /// Full connection URL, with the password taken from the secret file.
    pub fn database_url(&self) -> anyhow::Result<String> {
        let password = read_secret(&self.db_password_file)?;
        Ok(self.url_with_password(&password))
    }

    /// Connection URL safe to log.
    pub fn redacted_database_url(&self) -> String {
        self.url_with_password("****")
    }

    fn url_with_password(&self, password: &str) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db_username, password, self.db_host, self.db_port, self.db_name
        )
    }
}

fn read_secret(path: &Path) -> anyhow::Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read secret file {}", path.display()))?;
    Ok(raw.trim().to_string())
}
