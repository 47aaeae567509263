use std::thread;
use std::time::Duration;

use crate::config::InstallConfig;
use crate::error::{InstallError, InstallResult};
use crate::orchestrate::Orchestrator;
use crate::probe::ReadinessProbe;

const MAX_ATTEMPTS: u32 = 12;
const INITIAL_INTERVAL: Duration = Duration::from_secs(1);
const MAX_INTERVAL: Duration = Duration::from_secs(15);

/// Pull images, start the stack detached, and wait for every
/// subsystem to come up. Each subsystem is polled with backoff
/// until ready or a bounded number of attempts is exhausted; a
/// stack that never becomes ready is a fatal error, not a
/// declared success.
pub fn launch(
    config: &InstallConfig,
    orchestrator: &dyn Orchestrator,
    probe: &dyn ReadinessProbe,
) -> InstallResult<()> {
    eprintln!("Pulling images...");
    orchestrator.pull()?;

    eprintln!("Starting stack...");
    orchestrator.up()?;

    wait_ready(
        "database",
        || probe.postgres_ready(orchestrator),
        thread::sleep,
    )?;

    let api_url = format!("http://localhost:{}/", config.gateway_port);
    wait_ready("API gateway", || probe.http_ok(&api_url), thread::sleep)?;

    let dashboard_url = format!("http://localhost:{}/", config.dashboard_port);
    wait_ready("dashboard", || probe.http_ok(&dashboard_url), thread::sleep)?;

    orchestrator.ps()?;
    Ok(())
}

/// Poll `ready` with exponential backoff until it reports true.
/// The sleep is injected so exhaustion is testable without
/// waiting out the schedule.
fn wait_ready(
    subsystem: &str,
    mut ready: impl FnMut() -> bool,
    mut sleep: impl FnMut(Duration),
) -> InstallResult<()> {
    let mut interval = INITIAL_INTERVAL;

    eprintln!("Waiting for {subsystem}...");
    for attempt in 1..=MAX_ATTEMPTS {
        if ready() {
            eprintln!("  {subsystem} ready ({attempt}/{MAX_ATTEMPTS})");
            return Ok(());
        }
        eprintln!("  {subsystem} not ready ({attempt}/{MAX_ATTEMPTS}), retrying...");
        if attempt < MAX_ATTEMPTS {
            sleep(interval);
            interval = (interval * 2).min(MAX_INTERVAL);
        }
    }

    Err(InstallError::ReadinessTimeout(
        subsystem.to_string(),
        MAX_ATTEMPTS,
    ))
}
