use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "qwen2.5:3b";
pub const DEFAULT_SERVER_BASE_URL: &str = "http://127.0.0.1:11434";
pub const DEFAULT_ENTRY_POINT: &str = "main.py";
pub const DEFAULT_POLL_ATTEMPTS: u32 = 10;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Ollama model identifier the translator expects.
    pub model: String,
    /// Base URL of the local Ollama server.
    pub server_base_url: String,
    /// Application entry point, relative to the application root.
    pub entry_point: String,
    /// Explicit interpreter path or command; falls back to the platform default.
    pub python: Option<String>,
    /// Readiness poll after a detached server spawn: attempts x interval.
    pub poll_attempts: u32,
    pub poll_interval_ms: u64,
    /// Keep the console open after an abnormal application exit.
    pub hold_on_failure: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            server_base_url: DEFAULT_SERVER_BASE_URL.to_string(),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            python: None,
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            hold_on_failure: true,
        }
    }
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("launcher.json")
}

fn load_file(data_dir: &Path) -> Result<LauncherConfig> {
    let p = config_path(data_dir);
    if !p.exists() {
        return Ok(LauncherConfig::default());
    }
    let s = fs::read_to_string(&p).context("read launcher.json failed")?;
    let v: LauncherConfig = serde_json::from_str(&s).context("parse launcher.json failed")?;
    Ok(v)
}

fn env_string(key: &str) -> Option<String> {
    let v = std::env::var(key).ok()?;
    let t = v.trim();
    if t.is_empty() {
        return None;
    }
    Some(t.to_string())
}

fn env_u32(key: &str) -> Option<u32> {
    env_string(key)?.parse::<u32>().ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_string(key)?.parse::<u64>().ok()
}

fn env_bool(key: &str) -> Option<bool> {
    let t = env_string(key)?.to_ascii_lowercase();
    Some(!(t == "0" || t == "false" || t == "no" || t == "off"))
}

fn normalize_base_url(s: &str) -> String {
    let t = s.trim().trim_end_matches('/');
    if t.is_empty() {
        return DEFAULT_SERVER_BASE_URL.to_string();
    }
    t.to_string()
}

/// File config first, then env overrides. A broken config file is reported
/// and replaced by defaults rather than aborting the launch.
pub fn load_config(data_dir: &Path) -> LauncherConfig {
    let mut cfg = match load_file(data_dir) {
        Ok(c) => c,
        Err(e) => {
            crate::safe_eprintln!("config: {e}; using defaults");
            LauncherConfig::default()
        }
    };

    if let Some(v) = env_string("AUDIOTRANS_MODEL") {
        cfg.model = v;
    }
    if let Some(v) = env_string("AUDIOTRANS_SERVER_URL") {
        cfg.server_base_url = v;
    }
    if let Some(v) = env_string("AUDIOTRANS_ENTRY") {
        cfg.entry_point = v;
    }
    if let Some(v) = env_string("AUDIOTRANS_PYTHON") {
        cfg.python = Some(v);
    }
    if let Some(v) = env_u32("AUDIOTRANS_POLL_ATTEMPTS") {
        cfg.poll_attempts = v;
    }
    if let Some(v) = env_u64("AUDIOTRANS_POLL_INTERVAL_MS") {
        cfg.poll_interval_ms = v;
    }
    if let Some(v) = env_bool("AUDIOTRANS_HOLD") {
        cfg.hold_on_failure = v;
    }

    cfg.server_base_url = normalize_base_url(&cfg.server_base_url);
    cfg
}
