use crate::host::Host;

/// Python packages the application imports beyond the standard library.
pub const REQUIRED_PACKAGES: [&str; 2] = ["PyQt6", "openai-whisper"];

/// Ensure the packages via pip, quietly. False means the install reported
/// failure; the caller warns and continues, a missing package surfaces (or
/// not) when the application starts.
pub fn install_best_effort(host: &dyn Host, python: &str) -> bool {
    let mut args = vec![
        "-m",
        "pip",
        "install",
        "--quiet",
        "--disable-pip-version-check",
    ];
    args.extend(REQUIRED_PACKAGES);
    host.run_quiet(python, &args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;

    #[test]
    fn install_invokes_pip_with_both_packages() {
        let host = FakeHost::with_programs(&["python3"]);
        assert!(install_best_effort(&host, "python3"));
        let calls = host.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("quiet:python3 -m pip install"));
        assert!(calls[0].contains("PyQt6"));
        assert!(calls[0].contains("openai-whisper"));
        assert!(calls[0].contains("--quiet"));
    }

    #[test]
    fn install_failure_is_reported_not_raised() {
        let mut host = FakeHost::with_programs(&["python3"]);
        host.fail_commands.push("pip install".to_string());
        assert!(!install_best_effort(&host, "python3"));
    }
}
