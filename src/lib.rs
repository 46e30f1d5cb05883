mod config;
mod console;
mod data_dir;
mod deps;
mod host;
mod launch;
mod model;
mod packages;
mod panic_log;
mod safe_print;
mod sequencer;
mod service;
mod trace;

use host::SystemHost;
use sequencer::Sequencer;

/// Run the preflight sequence and the blocking handoff to the application.
/// Returns the process exit code: the application's own code after a
/// completed handoff, non-zero when a mandatory dependency was missing.
pub fn run() -> i32 {
    let app_root = match launch::app_root() {
        Ok(r) => r,
        Err(e) => {
            crate::safe_eprintln!("launcher: {e}");
            return 1;
        }
    };
    let dir = data_dir::data_dir(&app_root);
    panic_log::install_best_effort(&dir);
    let cfg = config::load_config(&dir);

    console::banner("Audio Translator");
    let host = SystemHost;
    let seq = Sequencer::new(&host, cfg.clone(), dir);
    let report = seq.run(&app_root);

    if report.hold && cfg.hold_on_failure {
        console::hold_open();
    }
    report.exit_code
}
