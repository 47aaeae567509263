use crate::cmd;
use crate::orchestrate::Orchestrator;

/// Readiness signals for the launched subsystems. Split from the
/// launcher so the polling loop can be exercised against a fake.
pub trait ReadinessProbe {
    /// Plain reachability: does the URL answer with a 2xx/3xx?
    fn http_ok(&self, url: &str) -> bool;

    /// Does the database container accept connections?
    fn postgres_ready(&self, orchestrator: &dyn Orchestrator) -> bool;
}

/// Probes with the external CLIs: `curl` for HTTP endpoints and
/// `pg_isready` inside the db container.
pub struct CliProbe;

impl CliProbe {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CliProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessProbe for CliProbe {
    fn http_ok(&self, url: &str) -> bool {
        cmd::run_quiet(
            "curl",
            &[
                "--fail",
                "--silent",
                "--output",
                "/dev/null",
                "--max-time",
                "5",
                url,
            ],
        )
        .unwrap_or(false)
    }

    fn postgres_ready(&self, orchestrator: &dyn Orchestrator) -> bool {
        orchestrator
            .exec("db", &["pg_isready", "-U", "postgres"])
            .is_ok()
    }
}
