use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::host::Host;

/// Directory containing `main.py`. Env override first, else the directory
/// the launcher binary sits in (the launcher ships next to the application).
pub fn app_root() -> Result<PathBuf> {
    if let Ok(p) = std::env::var("AUDIOTRANS_APP_DIR") {
        let t = p.trim();
        if !t.is_empty() {
            return Ok(PathBuf::from(t));
        }
    }
    let exe = std::env::current_exe().context("locate launcher executable failed")?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow!("launcher executable has no parent directory"))?;
    Ok(dir.to_path_buf())
}

/// Blocking handoff: run the application from its root and forward its exit
/// code. The launcher's own lifetime ends when this child's does.
pub fn run_app(host: &dyn Host, python: &str, entry_point: &str, root: &Path) -> Result<i32> {
    host.run_app(python, &[entry_point], root)
        .context("E_APP_LAUNCH: failed to start the application")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;
    use std::sync::{Mutex, OnceLock};

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn app_root_prefers_env_override() {
        let _g = env_lock().lock().unwrap();
        std::env::set_var("AUDIOTRANS_APP_DIR", "/srv/audiotrans");
        let root = app_root().expect("root");
        assert_eq!(root, PathBuf::from("/srv/audiotrans"));
        std::env::remove_var("AUDIOTRANS_APP_DIR");
    }

    #[test]
    fn app_root_falls_back_to_exe_dir() {
        let _g = env_lock().lock().unwrap();
        std::env::remove_var("AUDIOTRANS_APP_DIR");
        let root = app_root().expect("root");
        // Test binaries live in target/, which always has a parent.
        assert!(root.is_absolute());
    }

    #[test]
    fn run_app_uses_entry_point_from_root() {
        let mut host = FakeHost::with_programs(&["python3"]);
        host.app_exit = 3;
        let code = run_app(&host, "python3", "main.py", Path::new("/srv/audiotrans")).expect("run");
        assert_eq!(code, 3);
        assert_eq!(
            host.calls(),
            vec!["run_app:python3 main.py cwd=/srv/audiotrans".to_string()]
        );
    }
}
