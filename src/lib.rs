//! Installer for a self-hosted backend-as-a-service stack.
//!
//! Basestack automates standing up the upstream containerized
//! platform (database, auth, API gateway, storage, realtime,
//! dashboard) on a single host: it generates credentials, renders
//! the env file and compose override, audits port conflicts,
//! launches the stack, registers a systemd unit, and emits
//! standalone backup/health-check/restart scripts.
//!
//! Every substantive service is an external pre-built image; this
//! crate only templates configuration and drives the external
//! tools (`git`, `docker compose`, `systemctl`, `curl`, `jwt`).
//!
//! # Overview
//!
//! An installation is an [`Installer`] built from an
//! [`InstallConfig`]:
//!
//! ```rust,no_run
//! use basestack::{InstallConfig, Installer};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = InstallConfig::new("/mnt/data/basestack")
//!         .site_host("baas.example.com")
//!         .dashboard_port(3000)
//!         .gateway_port(8000);
//!
//!     Installer::new(config).run()?;
//!     Ok(())
//! }
//! ```
//!
//! ```sh
//! # Full installation
//! basestack install
//!
//! # Preview generated files without touching the host
//! basestack install --dry-run
//!
//! # Container status of the installed stack
//! basestack status
//! ```
//!
//! # Architecture
//!
//! The workflow runs strictly top to bottom, each step fatal on
//! failure:
//!
//! 1. **Preflight** - root, storage root, required binaries
//! 2. **Fetch** - clone or update the pinned upstream tree
//! 3. **Secrets** - mint a fresh [`SecretBundle`]
//! 4. **Materialize** - render env file and compose override,
//!    validated against the base definition
//! 5. **Audit** - port conflicts need explicit confirmation
//! 6. **Launch** - pull, start, poll each subsystem until ready
//! 7. **Register** - overwrite and enable the systemd unit
//! 8. **Emit** - standalone operational scripts
//! 9. **Report** - credentials, URLs, next steps
//!
//! The external-tool seams are traits
//! ([`RepoSource`](fetch::RepoSource),
//! [`Orchestrator`](orchestrate::Orchestrator),
//! [`KeyIssuer`](secrets::KeyIssuer),
//! [`ReadinessProbe`](probe::ReadinessProbe),
//! [`ServiceManager`](service_unit::ServiceManager)) so the
//! workflow is testable against fakes.

// Allow noisy pedantic lints that don't add value for a
// deployment tool crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cmd;
pub mod compose;
pub mod config;
pub mod envfile;
pub mod error;
pub mod fetch;
pub mod installer;
pub mod orchestrate;
pub mod ports;
pub mod preflight;
pub mod probe;
pub mod scripts;
pub mod secrets;
pub mod service_unit;
pub mod stack;

pub use config::InstallConfig;
pub use error::{InstallError, InstallResult};
pub use fetch::git::Git;
pub use installer::Installer;
pub use orchestrate::docker_compose::DockerCompose;
pub use probe::CliProbe;
pub use secrets::{JwtCli, SecretBundle};
pub use service_unit::Systemd;
