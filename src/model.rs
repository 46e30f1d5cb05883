use crate::host::Host;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelOutcome {
    AlreadyPresent,
    Pulled,
    PullFailed(String),
}

/// Textual check against `ollama list`. The listing is matched as a
/// substring, not parsed; a failed listing reads as "not listed".
pub fn model_listed(host: &dyn Host, model: &str) -> bool {
    match host.run_capture("ollama", &["list"]) {
        Ok(out) if out.success => out.stdout.contains(model),
        _ => false,
    }
}

/// Idempotent provisioning: skip when listed, otherwise pull the exact
/// identifier and block until the pull exits. Pull output is streamed so the
/// user sees download progress. A failed pull is reported, not fatal; the
/// translator surfaces the missing model on first use.
pub fn ensure_model(host: &dyn Host, model: &str) -> ModelOutcome {
    if model_listed(host, model) {
        return ModelOutcome::AlreadyPresent;
    }
    match host.run_streamed("ollama", &["pull", model]) {
        Ok(true) => ModelOutcome::Pulled,
        Ok(false) => ModelOutcome::PullFailed(format!("ollama pull {model} exited non-zero")),
        Err(e) => ModelOutcome::PullFailed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{fake::FakeHost, CmdOutput};

    fn listing(stdout: &str) -> FakeHost {
        let mut host = FakeHost::with_programs(&["ollama"]);
        host.capture.insert(
            "ollama list".to_string(),
            CmdOutput {
                success: true,
                stdout: stdout.to_string(),
            },
        );
        host
    }

    #[test]
    fn listed_model_is_not_pulled() {
        let host = listing("NAME            ID      SIZE\nqwen2.5:3b      abc123  1.9 GB\n");
        assert_eq!(ensure_model(&host, "qwen2.5:3b"), ModelOutcome::AlreadyPresent);
        assert!(!host.calls().iter().any(|c| c.contains("pull")));
    }

    #[test]
    fn absent_model_is_pulled_with_exact_identifier() {
        let host = listing("NAME            ID      SIZE\nllama3:8b       def456  4.7 GB\n");
        assert_eq!(ensure_model(&host, "qwen2.5:3b"), ModelOutcome::Pulled);
        assert!(host
            .calls()
            .contains(&"streamed:ollama pull qwen2.5:3b".to_string()));
    }

    #[test]
    fn failed_listing_reads_as_absent() {
        // No configured capture: the fake errors the listing query.
        let host = FakeHost::with_programs(&["ollama"]);
        assert!(!model_listed(&host, "qwen2.5:3b"));
        assert_eq!(ensure_model(&host, "qwen2.5:3b"), ModelOutcome::Pulled);
    }

    #[test]
    fn failed_pull_is_reported_not_fatal() {
        let mut host = listing("NAME\n");
        host.streamed_ok = false;
        match ensure_model(&host, "qwen2.5:3b") {
            ModelOutcome::PullFailed(msg) => assert!(msg.contains("qwen2.5:3b")),
            other => panic!("expected PullFailed, got {other:?}"),
        }
    }
}
