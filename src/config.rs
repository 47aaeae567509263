use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::InstallResult;

/// Everything the installer needs to know about the target host,
/// resolved once at startup from defaults, an optional config
/// file, and CLI flags, in that order.
///
/// # Example
///
/// ```
/// use basestack::InstallConfig;
///
/// let config = InstallConfig::new("/mnt/data/basestack")
///     .dashboard_port(3100)
///     .site_host("baas.internal");
///
/// assert_eq!(config.dashboard_port, 3100);
/// assert_eq!(config.gateway_port, 8000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallConfig {
    /// Persistent storage root. Must already exist; the installer
    /// never creates it.
    pub install_root: PathBuf,
    /// Upstream source tree holding the base compose definition.
    pub upstream_url: String,
    /// Pinned ref checked out in the working copy.
    pub upstream_ref: String,
    /// Where the upstream tree is cloned or updated.
    pub workdir: PathBuf,
    /// Subdirectory of the working copy containing the base
    /// `docker-compose.yml`.
    pub compose_subdir: String,
    pub service_name: String,
    /// Directory the service unit file is written into.
    pub unit_dir: PathBuf,
    pub site_host: String,
    pub dashboard_port: u16,
    pub gateway_port: u16,
    pub database_port: u16,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            install_root: PathBuf::from("/mnt/data/basestack"),
            upstream_url: "https://github.com/supabase/supabase.git".to_string(),
            upstream_ref: "master".to_string(),
            workdir: PathBuf::from("/opt/basestack/upstream"),
            compose_subdir: "docker".to_string(),
            service_name: "basestack".to_string(),
            unit_dir: PathBuf::from("/etc/systemd/system"),
            site_host: "localhost".to_string(),
            dashboard_port: 3000,
            gateway_port: 8000,
            database_port: 5432,
        }
    }
}

impl InstallConfig {
    #[must_use]
    pub fn new(install_root: impl Into<PathBuf>) -> Self {
        Self {
            install_root: install_root.into(),
            ..Self::default()
        }
    }

    /// Load overrides from a YAML config file. Absent keys keep
    /// their defaults; unknown keys are an error.
    pub fn from_file(path: &Path) -> InstallResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    #[must_use]
    pub fn upstream(mut self, url: &str, git_ref: &str) -> Self {
        self.upstream_url = url.to_string();
        self.upstream_ref = git_ref.to_string();
        self
    }

    #[must_use]
    pub fn workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = dir.into();
        self
    }

    #[must_use]
    pub fn service_name(mut self, name: &str) -> Self {
        self.service_name = name.to_string();
        self
    }

    #[must_use]
    pub fn unit_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.unit_dir = dir.into();
        self
    }

    #[must_use]
    pub fn site_host(mut self, host: &str) -> Self {
        self.site_host = host.to_string();
        self
    }

    #[must_use]
    pub const fn dashboard_port(mut self, port: u16) -> Self {
        self.dashboard_port = port;
        self
    }

    #[must_use]
    pub const fn gateway_port(mut self, port: u16) -> Self {
        self.gateway_port = port;
        self
    }

    #[must_use]
    pub const fn database_port(mut self, port: u16) -> Self {
        self.database_port = port;
        self
    }

    /// Directory holding the base `docker-compose.yml`; also the
    /// working directory for every compose invocation.
    #[must_use]
    pub fn compose_dir(&self) -> PathBuf {
        self.workdir.join(&self.compose_subdir)
    }

    #[must_use]
    pub fn base_compose_path(&self) -> PathBuf {
        self.compose_dir().join("docker-compose.yml")
    }

    #[must_use]
    pub fn override_path(&self) -> PathBuf {
        self.compose_dir().join("docker-compose.override.yml")
    }

    #[must_use]
    pub fn env_file_path(&self) -> PathBuf {
        self.compose_dir().join(".env")
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.install_root.join("data")
    }

    #[must_use]
    pub fn storage_dir(&self) -> PathBuf {
        self.install_root.join("storage")
    }

    #[must_use]
    pub fn backup_dir(&self) -> PathBuf {
        self.install_root.join("backups")
    }

    #[must_use]
    pub fn scripts_dir(&self) -> PathBuf {
        self.install_root.join("bin")
    }

    #[must_use]
    pub fn unit_path(&self) -> PathBuf {
        self.unit_dir.join(format!("{}.service", self.service_name))
    }

    /// The three host ports the stack binds, in report order.
    #[must_use]
    pub const fn host_ports(&self) -> [(&'static str, u16); 3] {
        [
            ("dashboard", self.dashboard_port),
            ("api gateway", self.gateway_port),
            ("database", self.database_port),
        ]
    }
}
