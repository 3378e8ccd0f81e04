use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    /// Directory for the JSON-file persisted state. `None` keeps it in memory.
    pub data_dir: Option<PathBuf>,
    pub company_name: String,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .context("JWT_EXPIRY_HOURS must be a number")?,
            data_dir: env::var("DATA_DIR").ok().map(PathBuf::from),
            company_name: env::var("COMPANY_NAME")
                .unwrap_or_else(|_| "Tyre Centre Management".to_string()),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("SEED_DEMO_DATA must be true or false")?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            jwt_secret: "test-secret".to_string(),
            jwt_expiry_hours: 1,
            data_dir: None,
            company_name: "Tyre Centre Management".to_string(),
            seed_demo_data: true,
        }
    }
}
