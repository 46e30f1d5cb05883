use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

// Install a panic hook that logs to the data dir instead of relying on stderr.
//
// When the launcher is started by double-click the console may disappear with
// the process, so the default hook's stderr output is lost. We append panics
// to a file best-effort and never panic from the hook itself.
pub fn install_best_effort(data_dir: &Path) {
    let dir: PathBuf = data_dir.to_path_buf();
    std::panic::set_hook(Box::new(move |info| {
        let ts_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);

        let bt = std::backtrace::Backtrace::force_capture();

        let msg = format!(
            "ts_ms={ts_ms}\npanic={info}\nbacktrace={bt}\n---\n",
            info = info,
            bt = bt
        );

        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("panic.log");
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&path) {
            let _ = f.write_all(msg.as_bytes());
        }
    }));
}
