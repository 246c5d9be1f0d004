use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::export::ExportOptions;

pub const DEFAULT_BASE_URL: &str = "http://atlas.media.mit.edu/";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub api: Api,
    pub export: ExportOptions,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Api {
    pub base_url: String,
    pub user_agent: String,
    // upper bound on requests in flight for bulk calls
    pub concurrency: usize,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("oec-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            concurrency: 4,
        }
    }
}

impl Config {
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Config> {
        let mut file = File::open(path)?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Config::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Config> {
        Ok(toml::from_str(contents)?)
    }
}
