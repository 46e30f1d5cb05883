use std::time::{Duration, Instant};

use crate::{config::LauncherConfig, host::Host};

pub const SERVER_IMAGE: &str = if cfg!(windows) { "ollama.exe" } else { "ollama" };

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerOutcome {
    AlreadyRunning,
    Started { ready: bool, waited_ms: u128 },
    SpawnFailed(String),
}

pub fn version_url(base_url: &str) -> String {
    format!("{}/api/version", base_url.trim_end_matches('/'))
}

/// Idempotent server readiness: skip when the image is already in the OS
/// process list, otherwise spawn `ollama serve` detached with discarded
/// output and poll the version endpoint until it answers or the poll budget
/// runs out. The server is not supervised after this returns.
pub fn ensure_server(host: &dyn Host, cfg: &LauncherConfig) -> ServerOutcome {
    if host.process_running(SERVER_IMAGE) {
        return ServerOutcome::AlreadyRunning;
    }

    if let Err(e) = host.spawn_detached("ollama", &["serve"]) {
        return ServerOutcome::SpawnFailed(e.to_string());
    }

    let url = version_url(&cfg.server_base_url);
    let interval = Duration::from_millis(cfg.poll_interval_ms);
    let t0 = Instant::now();
    for _ in 0..cfg.poll_attempts {
        if host.endpoint_ready(&url, interval) {
            return ServerOutcome::Started {
                ready: true,
                waited_ms: t0.elapsed().as_millis(),
            };
        }
        host.sleep(interval);
    }
    ServerOutcome::Started {
        ready: false,
        waited_ms: t0.elapsed().as_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;

    #[test]
    fn running_server_is_left_alone() {
        let mut host = FakeHost::with_programs(&["ollama"]);
        host.running_images.insert(SERVER_IMAGE.to_string());
        assert_eq!(ensure_server(&host, &LauncherConfig::default()), ServerOutcome::AlreadyRunning);
        assert!(!host.calls().iter().any(|c| c.starts_with("spawn:")));
    }

    #[test]
    fn absent_server_is_spawned_detached_and_polled() {
        let mut host = FakeHost::with_programs(&["ollama"]);
        host.ready_default = true;
        host.ready_responses.lock().unwrap().extend([false, false]);

        match ensure_server(&host, &LauncherConfig::default()) {
            ServerOutcome::Started { ready, .. } => assert!(ready),
            other => panic!("expected Started, got {other:?}"),
        }
        let calls = host.calls();
        assert!(calls.contains(&"spawn:ollama serve".to_string()));
        assert!(calls
            .iter()
            .any(|c| c.starts_with("endpoint_ready:http://127.0.0.1:11434/api/version")));
        // Two not-ready answers mean two waits before the third probe hit.
        assert_eq!(host.slept.lock().unwrap().len(), 2);
    }

    #[test]
    fn poll_budget_exhaustion_is_reported_not_fatal() {
        let mut host = FakeHost::with_programs(&["ollama"]);
        host.ready_default = false;
        let cfg = LauncherConfig {
            poll_attempts: 4,
            ..LauncherConfig::default()
        };
        match ensure_server(&host, &cfg) {
            ServerOutcome::Started { ready, .. } => assert!(!ready),
            other => panic!("expected Started, got {other:?}"),
        }
        assert_eq!(host.slept.lock().unwrap().len(), 4);
    }

    #[test]
    fn spawn_failure_is_reported_not_fatal() {
        let mut host = FakeHost::with_programs(&["ollama"]);
        host.spawn_fails = true;
        match ensure_server(&host, &LauncherConfig::default()) {
            ServerOutcome::SpawnFailed(msg) => assert!(msg.contains("refused")),
            other => panic!("expected SpawnFailed, got {other:?}"),
        }
    }

    #[test]
    fn version_url_tolerates_trailing_slash() {
        assert_eq!(
            version_url("http://127.0.0.1:11434/"),
            "http://127.0.0.1:11434/api/version"
        );
    }
}
