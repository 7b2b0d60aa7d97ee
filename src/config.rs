// TODO (future features):
// - Let config override the sample team roster

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"
[general]
sample_tasks = 15
status_style = "unicode"

[assistant]
reply_delay_ms = 1000
create_delay_ms = 1000
"#;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub general: General,
	#[serde(default)]
	pub assistant: Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct General {
	#[serde(default = "default_sample_tasks")]
	pub sample_tasks: usize,
	#[serde(default = "default_status_style")]
	pub status_style: String, // "unicode", "emoji", "text"
}

impl Default for General {
	fn default() -> Self {
		Self {
			sample_tasks: default_sample_tasks(),
			status_style: default_status_style(),
		}
	}
}

fn default_sample_tasks() -> usize {
	15
}

fn default_status_style() -> String {
	"unicode".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assistant {
	#[serde(default = "default_reply_delay_ms")]
	pub reply_delay_ms: u64,
	#[serde(default = "default_create_delay_ms")]
	pub create_delay_ms: u64,
}

impl Default for Assistant {
	fn default() -> Self {
		Self {
			reply_delay_ms: default_reply_delay_ms(),
			create_delay_ms: default_create_delay_ms(),
		}
	}
}

fn default_reply_delay_ms() -> u64 {
	1000
}

fn default_create_delay_ms() -> u64 {
	1000
}

pub fn load_or_init() -> Result<Config> {
	load_from(&base_dir()?)
}

pub fn load_from(dir: &Path) -> Result<Config> {
	if !dir.exists() {
		fs::create_dir_all(dir)?;
	}

	let config_path = dir.join("config.toml");
	if !config_path.exists() {
		fs::write(&config_path, DEFAULT_CONFIG.trim_start())?;
	}
	let content = fs::read_to_string(&config_path)?;
	let cfg: Config = toml::from_str(&content)?;
	Ok(cfg)
}

pub fn base_dir() -> Result<PathBuf> {
	dirs::home_dir()
		.map(|p| p.join(".zenith"))
		.ok_or_else(|| anyhow::anyhow!("Failed to resolve home directory"))
}
