use std::env;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::card::emoji::DEFAULT_EMOJI_BASE_URL;
use crate::card::renderer::Viewport;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_env")]
    pub env: String, // file / server
    pub host: String,
    pub port: u16,
    pub prefix: Option<String>,
    #[serde(default = "default_asset_dir")]
    pub asset_dir: String,
    #[serde(default = "default_emoji_base_url")]
    pub emoji_base_url: String,
    #[serde(default)]
    pub html_debug: bool,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
}

impl Config {
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.viewport_width,
            height: self.viewport_height,
        }
    }
}

fn default_env() -> String {
    "file".to_string()
}

fn default_asset_dir() -> String {
    "./assets/fonts".to_string()
}

fn default_emoji_base_url() -> String {
    DEFAULT_EMOJI_BASE_URL.to_string()
}

fn default_viewport_width() -> u32 {
    Viewport::default().width
}

fn default_viewport_height() -> u32 {
    Viewport::default().height
}

pub fn get_config() -> Result<Config> {
    let env_var = env::var("env").unwrap_or("file".to_string());
    if env_var == "file" {
        info!("using .env file as environtment variable");
        let _ = dotenvy::dotenv();
    } else {
        info!("using server environtment as environtment variable");
    }
    envy::from_env::<Config>().context("invalid configuration in environment")
}
