use std::{
    path::Path,
    process::{Command, Stdio},
    time::Duration,
};

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub success: bool,
    pub stdout: String,
}

/// The launcher's only seam to the operating system. Everything the
/// sequencer touches outside its own process goes through this trait so the
/// whole sequence can run against a fake with configurable presence/absence.
pub trait Host {
    /// Run a program with all output discarded. True when it spawned and
    /// exited zero; a program missing from PATH reads as false.
    fn run_quiet(&self, program: &str, args: &[&str]) -> bool;

    /// Run a program and capture its stdout.
    fn run_capture(&self, program: &str, args: &[&str]) -> Result<CmdOutput>;

    /// Run a program with inherited stdio, blocking until it exits. True on
    /// exit zero. Used where progress output should reach the user.
    fn run_streamed(&self, program: &str, args: &[&str]) -> Result<bool>;

    /// Fire-and-forget spawn with output discarded. The child is never
    /// waited on and outlives the launcher.
    fn spawn_detached(&self, program: &str, args: &[&str]) -> Result<()>;

    /// Whether a process with the given image name appears in the OS
    /// process list.
    fn process_running(&self, image: &str) -> bool;

    /// Whether an HTTP endpoint answers with a success status within the
    /// timeout.
    fn endpoint_ready(&self, url: &str, timeout: Duration) -> bool;

    /// Run the application child from a working directory with inherited
    /// stdio, wait for it, and return its exit code.
    fn run_app(&self, program: &str, args: &[&str], cwd: &Path) -> Result<i32>;

    fn sleep(&self, d: Duration);
}

pub struct SystemHost;

impl Host for SystemHost {
    fn run_quiet(&self, program: &str, args: &[&str]) -> bool {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn run_capture(&self, program: &str, args: &[&str]) -> Result<CmdOutput> {
        let out = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("run {program} failed"))?;
        Ok(CmdOutput {
            success: out.status.success(),
            stdout: String::from_utf8_lossy(&out.stdout).to_string(),
        })
    }

    fn run_streamed(&self, program: &str, args: &[&str]) -> Result<bool> {
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("run {program} failed to start"))?;
        Ok(status.success())
    }

    fn spawn_detached(&self, program: &str, args: &[&str]) -> Result<()> {
        // Dropping the Child detaches it; std never kills on drop.
        let _child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("spawn {program} failed"))?;
        Ok(())
    }

    fn process_running(&self, image: &str) -> bool {
        process_running_impl(image)
    }

    fn endpoint_ready(&self, url: &str, timeout: Duration) -> bool {
        let client = match reqwest::blocking::Client::builder().timeout(timeout).build() {
            Ok(c) => c,
            Err(_) => return false,
        };
        match client.get(url).send() {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn run_app(&self, program: &str, args: &[&str], cwd: &Path) -> Result<i32> {
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .with_context(|| format!("launch {program} failed"))?;
        // Signal-terminated children report no code; fold that into failure.
        Ok(status.code().unwrap_or(1))
    }

    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}

#[cfg(windows)]
fn process_running_impl(image: &str) -> bool {
    let filter = format!("IMAGENAME eq {image}");
    let out = Command::new("tasklist")
        .args(["/NH", "/FI", &filter])
        .stdin(Stdio::null())
        .output();
    match out {
        Ok(o) if o.status.success() => {
            let text = String::from_utf8_lossy(&o.stdout).to_ascii_lowercase();
            text.contains(&image.to_ascii_lowercase())
        }
        _ => false,
    }
}

#[cfg(not(windows))]
fn process_running_impl(image: &str) -> bool {
    Command::new("pgrep")
        .args(["-x", image])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
