use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::{config::LauncherConfig, host::Host};

/// One mandatory external program. Presence is probed with a version flag;
/// the rest feeds the remediation panel when the probe fails.
#[derive(Debug, Clone)]
pub struct DependencySpec {
    pub name: &'static str,
    pub program: &'static str,
    pub probe_args: &'static [&'static str],
    pub purpose: &'static str,
    pub download_url: &'static str,
    pub install_note: &'static str,
}

pub const PYTHON: DependencySpec = DependencySpec {
    name: "Python",
    program: if cfg!(windows) { "python" } else { "python3" },
    probe_args: &["--version"],
    purpose: "runs the Audio Translator application",
    download_url: "https://www.python.org/downloads/",
    install_note: "check \"Add Python to PATH\" in the installer",
};

pub const FFMPEG: DependencySpec = DependencySpec {
    name: "FFmpeg",
    program: "ffmpeg",
    probe_args: &["-version"],
    purpose: "converts audio files before transcription",
    download_url: "https://ffmpeg.org/download.html",
    install_note: "add the directory containing the ffmpeg binary to PATH",
};

pub const OLLAMA: DependencySpec = DependencySpec {
    name: "Ollama",
    program: "ollama",
    probe_args: &["--version"],
    purpose: "serves the local translation model",
    download_url: "https://ollama.com/download",
    install_note: "restart the terminal (or Windows) after installing so PATH updates apply",
};

#[derive(Debug, Clone, Serialize)]
pub struct DepStatus {
    pub name: String,
    pub program: String,
    pub present: bool,
}

/// Interpreter command for this machine: the configured override when set,
/// else the platform default probed in step 1.
pub fn resolve_python(cfg: &LauncherConfig) -> String {
    match &cfg.python {
        Some(p) if !p.trim().is_empty() => p.trim().to_string(),
        _ => PYTHON.program.to_string(),
    }
}

pub fn check(host: &dyn Host, spec: &DependencySpec, program: &str) -> Result<DepStatus> {
    if host.run_quiet(program, spec.probe_args) {
        return Ok(DepStatus {
            name: spec.name.to_string(),
            program: program.to_string(),
            present: true,
        });
    }
    Err(anyhow!(
        "E_DEP_MISSING: {} is not available (probe `{} {}` did not succeed)",
        spec.name,
        program,
        spec.probe_args.join(" ")
    ))
}
