use crate::cmd;
use crate::config::InstallConfig;
use crate::error::InstallResult;

/// Registers the unit with the host's service supervisor so the
/// stack starts on boot. Re-registration overwrites.
pub trait ServiceManager {
    fn register(&self, config: &InstallConfig) -> InstallResult<()>;
}

/// systemd implementation: write the unit file, reload the
/// daemon, enable the unit.
pub struct Systemd;

impl Systemd {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for Systemd {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceManager for Systemd {
    fn register(&self, config: &InstallConfig) -> InstallResult<()> {
        eprintln!(
            "Registering service unit {}...",
            config.unit_path().display()
        );

        write(config)?;
        cmd::run("systemctl", &["daemon-reload"])?;
        cmd::run("systemctl", &["enable", &config.service_name])?;

        Ok(())
    }
}

/// Overwrite the unit file at `config.unit_path()`.
pub fn write(config: &InstallConfig) -> InstallResult<()> {
    std::fs::write(config.unit_path(), render(config))?;
    Ok(())
}

/// Render the systemd unit that brings the stack up at boot and
/// tears it down on stop.
#[must_use]
pub fn render(config: &InstallConfig) -> String {
    let compose_dir = config.compose_dir().display().to_string();
    let base = config.base_compose_path().display().to_string();
    let override_file = config.override_path().display().to_string();
    let env_file = config.env_file_path().display().to_string();

    let compose = format!(
        "/usr/bin/docker compose -f {base} -f {override_file} --env-file {env_file}"
    );

    format!(
        "[Unit]\n\
         Description=basestack self-hosted backend stack\n\
         Requires=docker.service\n\
         After=docker.service network-online.target\n\
         \n\
         [Service]\n\
         Type=oneshot\n\
         RemainAfterExit=yes\n\
         WorkingDirectory={compose_dir}\n\
         ExecStart={compose} up -d\n\
         ExecStop={compose} down\n\
         TimeoutStartSec=300\n\
         Restart=no\n\
         \n\
         [Install]\n\
         WantedBy=multi-user.target\n"
    )
}
