use std::path::{Path, PathBuf};

use serde_json::json;
use uuid::Uuid;

use crate::{
    config::LauncherConfig,
    console::{self, ErrorPanel},
    deps::{self, DependencySpec},
    host::Host,
    launch,
    model::{self, ModelOutcome},
    packages,
    service::{self, ServerOutcome},
    trace::{self, Span},
};

#[derive(Debug, Clone)]
pub struct RunReport {
    pub exit_code: i32,
    /// Whether the console should be held open for the user to read output.
    pub hold: bool,
}

/// Runs the seven bootstrap steps in strict order: three fatal presence
/// checks, three best-effort setup steps, then the blocking handoff to the
/// application. One trace span per step; one console line per outcome.
pub struct Sequencer<'a> {
    host: &'a dyn Host,
    cfg: LauncherConfig,
    data_dir: PathBuf,
    run_id: String,
}

impl<'a> Sequencer<'a> {
    pub fn new(host: &'a dyn Host, cfg: LauncherConfig, data_dir: PathBuf) -> Self {
        Self {
            host,
            cfg,
            data_dir,
            run_id: Uuid::new_v4().to_string(),
        }
    }

    fn span(&self, stage: &str, step_id: &str) -> Span {
        Span::start(&self.data_dir, Some(&self.run_id), stage, step_id, None)
    }

    fn fatal_check(&self, n: usize, spec: &DependencySpec, program: &str) -> bool {
        console::step(n, &format!("Checking {}", spec.name));
        let span = self.span("Deps", &format!("DEP.{}", spec.name.to_ascii_lowercase()));
        match deps::check(self.host, spec, program) {
            Ok(_) => {
                console::ok(&format!("{} is available", spec.name));
                span.ok(Some(json!({ "program": program })));
                true
            }
            Err(e) => {
                span.err_anyhow("E_DEP_MISSING", &e, Some(json!({ "program": program })));
                console::error_panel(&ErrorPanel {
                    title: &format!("{} not found", spec.name),
                    cause: &format!("{} {}.", spec.name, spec.purpose),
                    link: Some(spec.download_url),
                    note: Some(spec.install_note),
                });
                false
            }
        }
    }

    pub fn run(&self, app_root: &Path) -> RunReport {
        trace::event(
            &self.data_dir,
            Some(&self.run_id),
            "Run",
            "RUN.begin",
            "ok",
            Some(json!({
                "model": self.cfg.model,
                "server": self.cfg.server_base_url,
                "app_root": app_root.display().to_string(),
            })),
        );
        let python = deps::resolve_python(&self.cfg);

        let checks: [(usize, &DependencySpec, &str); 3] = [
            (1, &deps::PYTHON, python.as_str()),
            (2, &deps::FFMPEG, deps::FFMPEG.program),
            (3, &deps::OLLAMA, deps::OLLAMA.program),
        ];
        for (n, spec, program) in checks {
            if !self.fatal_check(n, spec, program) {
                return RunReport {
                    exit_code: 1,
                    hold: false,
                };
            }
        }

        console::step(4, "Installing Python packages");
        {
            let span = self.span("Packages", "PKG.pip_install");
            if packages::install_best_effort(self.host, &python) {
                console::ok("packages are up to date");
                span.ok(None);
            } else {
                console::warn("package install failed; continuing anyway");
                span.err("E_PKG_INSTALL", "pip install exited non-zero", None);
            }
        }

        console::step(5, &format!("Checking model {}", self.cfg.model));
        {
            let span = self.span("Model", "MODEL.ensure");
            match model::ensure_model(self.host, &self.cfg.model) {
                ModelOutcome::AlreadyPresent => {
                    console::ok("model already downloaded");
                    span.skipped("already_present", None);
                }
                ModelOutcome::Pulled => {
                    console::ok("model downloaded");
                    span.ok(None);
                }
                ModelOutcome::PullFailed(msg) => {
                    console::warn(&format!("model download failed: {msg}; continuing anyway"));
                    span.err("E_MODEL_PULL", &msg, None);
                }
            }
        }

        console::step(6, "Starting translation service");
        {
            let span = self.span("Service", "SRV.ensure");
            match service::ensure_server(self.host, &self.cfg) {
                ServerOutcome::AlreadyRunning => {
                    console::ok("service already running");
                    span.skipped("already_running", None);
                }
                ServerOutcome::Started { ready: true, waited_ms } => {
                    console::ok("service started");
                    span.ok(Some(json!({ "waited_ms": waited_ms })));
                }
                ServerOutcome::Started { ready: false, waited_ms } => {
                    console::warn("service did not confirm readiness; continuing anyway");
                    span.ok(Some(json!({ "ready": false, "waited_ms": waited_ms })));
                }
                ServerOutcome::SpawnFailed(msg) => {
                    console::warn(&format!("service start failed: {msg}; continuing anyway"));
                    span.err("E_SRV_SPAWN", &msg, None);
                }
            }
        }

        console::step(7, "Launching Audio Translator");
        let span = self.span("App", "APP.run");
        match launch::run_app(self.host, &python, &self.cfg.entry_point, app_root) {
            Ok(0) => {
                span.ok(Some(json!({ "exit_code": 0 })));
                RunReport {
                    exit_code: 0,
                    hold: false,
                }
            }
            Ok(code) => {
                span.err("E_APP_EXIT", &format!("application exited with code {code}"), None);
                console::error_panel(&ErrorPanel {
                    title: "Application exited abnormally",
                    cause: "See the output above for details.",
                    link: None,
                    note: None,
                });
                RunReport {
                    exit_code: code,
                    hold: true,
                }
            }
            Err(e) => {
                span.err_anyhow("E_APP_LAUNCH", &e, None);
                console::error_panel(&ErrorPanel {
                    title: "Failed to launch the application",
                    cause: &e.to_string(),
                    link: None,
                    note: None,
                });
                RunReport {
                    exit_code: 1,
                    hold: true,
                }
            }
        }
    }
}
