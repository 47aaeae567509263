use std::path::Path;

use crate::cmd;
use crate::config::InstallConfig;
use crate::error::{InstallError, InstallResult};

/// External binaries the installer shells out to. The emitted
/// operational scripts reuse the same set.
pub const REQUIRED_COMMANDS: [&str; 6] = ["git", "docker", "curl", "jwt", "systemctl", "tar"];

/// Verify every precondition before anything is written. Each
/// failure is a distinct error and aborts the whole run.
pub fn check(config: &InstallConfig) -> InstallResult<()> {
    check_root()?;
    check_install_root(&config.install_root)?;
    check_commands(&REQUIRED_COMMANDS)?;
    Ok(())
}

#[cfg(unix)]
pub fn check_root() -> InstallResult<()> {
    if nix::unistd::geteuid().is_root() {
        Ok(())
    } else {
        Err(InstallError::NotRoot)
    }
}

#[cfg(not(unix))]
pub fn check_root() -> InstallResult<()> {
    Err(InstallError::Other(
        "unsupported platform: unix host required".into(),
    ))
}

/// The install root is provisioned by an external storage step;
/// it is never created here.
pub fn check_install_root(path: &Path) -> InstallResult<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(InstallError::InstallRootMissing(
            path.display().to_string(),
        ))
    }
}

pub fn check_commands(commands: &[&str]) -> InstallResult<()> {
    for command in commands {
        if !cmd::command_exists(command) {
            return Err(InstallError::CommandNotFound((*command).to_string()));
        }
    }
    Ok(())
}
