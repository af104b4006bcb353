use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use toml_edit::{DocumentMut, value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Fetch remote avatars; when false every avatar stays a placeholder.
    pub fetch_avatars: bool,
    /// Milliseconds between event polls in the TUI loop.
    pub tick_ms: u64,
    pub theme: Option<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            fetch_avatars: true,
            tick_ms: 100,
            theme: Some("dark".to_string()),
        }
    }
}

impl GlobalConfig {
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = fs::read_to_string(&path) {
                match toml::from_str::<GlobalConfig>(&contents) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("[config] Failed to parse {}: {e}", path.display());
                    }
                }
            }
        }
        GlobalConfig::default()
    }
}

pub fn set_config_key(key: &str, value_str: &str) {
    let path = config_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let mut doc = if path.exists() {
        fs::read_to_string(&path)
            .ok()
            .and_then(|s| s.parse::<DocumentMut>().ok())
            .unwrap_or_default()
    } else {
        DocumentMut::new()
    };
    doc[key] = value(value_str);
    let _ = fs::write(&path, doc.to_string());
}

pub fn get_config_key(key: &str) -> Option<String> {
    let path = config_path();
    if path.exists() {
        if let Some(Ok(doc)) = fs::read_to_string(&path)
            .ok()
            .map(|s| s.parse::<DocumentMut>())
        {
            if let Some(val) = doc.get(key) {
                return Some(val.to_string());
            }
        }
    }
    None
}

pub fn reset_config() -> anyhow::Result<()> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, toml::to_string(&GlobalConfig::default())?)?;
    Ok(())
}

pub fn show_config() {
    let path = config_path();
    if path.exists() {
        if let Ok(contents) = fs::read_to_string(&path) {
            println!("{}", contents);
            return;
        }
    }
    println!("No config file found at {}", path.display());
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("roster/roster.toml")
}

// Config precedence: CLI flag > ~/.config/roster/roster.toml > default
