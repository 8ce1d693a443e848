use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/sales.csv";
pub const DEFAULT_TITLE: &str = "E-Commerce Dashboard";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub title: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: resolve_port(),
            data_path: resolve_data_path(),
            title: env::var("DASHBOARD_TITLE").unwrap_or_else(|_| DEFAULT_TITLE.to_string()),
        }
    }
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_DATA_PATH)
}

fn resolve_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}
