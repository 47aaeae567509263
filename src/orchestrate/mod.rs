pub mod docker_compose;

use crate::error::InstallResult;

/// Drives the container stack through the external orchestration
/// tool. One method per lifecycle verb so the workflow can be
/// exercised against a fake in tests.
pub trait Orchestrator {
    /// Pull every image the layered definition references.
    fn pull(&self) -> InstallResult<()>;

    /// Start the stack detached.
    fn up(&self) -> InstallResult<()>;

    /// Stop and remove the stack's containers.
    fn down(&self) -> InstallResult<()>;

    /// Print current container status.
    fn ps(&self) -> InstallResult<()>;

    /// Run a command inside a running service container and
    /// capture its output.
    fn exec(&self, service: &str, command: &[&str]) -> InstallResult<String>;
}
