use std::path::{Path, PathBuf};

pub fn data_dir(app_root: &Path) -> PathBuf {
    if let Ok(p) = std::env::var("AUDIOTRANS_DATA_DIR") {
        let t = p.trim();
        if !t.is_empty() {
            return PathBuf::from(t);
        }
    }
    app_root.join("tmp").join("launcher-data")
}

#[cfg(test)]
mod tests {
    use super::data_dir;
    use std::{
        path::Path,
        sync::{Mutex, OnceLock},
    };

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn data_dir_defaults_under_app_root() {
        let _g = env_lock().lock().unwrap();
        std::env::remove_var("AUDIOTRANS_DATA_DIR");
        let d = data_dir(Path::new("/opt/audiotrans"));
        assert_eq!(d, Path::new("/opt/audiotrans/tmp/launcher-data"));
    }

    #[test]
    fn data_dir_prefers_env_override() {
        let _g = env_lock().lock().unwrap();
        std::env::set_var("AUDIOTRANS_DATA_DIR", "/var/tmp/at-data");
        let d = data_dir(Path::new("/opt/audiotrans"));
        assert_eq!(d, Path::new("/var/tmp/at-data"));
        std::env::remove_var("AUDIOTRANS_DATA_DIR");
    }
}
