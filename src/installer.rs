use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::compose;
use crate::config::InstallConfig;
use crate::envfile;
use crate::error::InstallResult;
use crate::fetch::RepoSource;
use crate::fetch::git::Git;
use crate::orchestrate::Orchestrator;
use crate::orchestrate::docker_compose::DockerCompose;
use crate::ports;
use crate::preflight;
use crate::probe::{CliProbe, ReadinessProbe};
use crate::scripts;
use crate::secrets::{JwtCli, KeyIssuer, SecretBundle};
use crate::service_unit::{self, ServiceManager, Systemd};
use crate::stack;

/// The full install workflow: preflight, fetch, secrets, config
/// materialization, port audit, launch, service registration,
/// operational scripts, summary. Strictly top to bottom, every
/// failure fatal.
pub struct Installer {
    config: InstallConfig,
    repo_source: Option<Box<dyn RepoSource>>,
    orchestrator: Option<Box<dyn Orchestrator>>,
    key_issuer: Option<Box<dyn KeyIssuer>>,
    readiness_probe: Option<Box<dyn ReadinessProbe>>,
    service_manager: Option<Box<dyn ServiceManager>>,
}

impl Installer {
    #[must_use]
    pub fn new(config: InstallConfig) -> Self {
        Self {
            config,
            repo_source: None,
            orchestrator: None,
            key_issuer: None,
            readiness_probe: None,
            service_manager: None,
        }
    }

    #[must_use]
    pub fn repo_source(mut self, source: impl RepoSource + 'static) -> Self {
        self.repo_source = Some(Box::new(source));
        self
    }

    #[must_use]
    pub fn orchestrator(mut self, orchestrator: impl Orchestrator + 'static) -> Self {
        self.orchestrator = Some(Box::new(orchestrator));
        self
    }

    #[must_use]
    pub fn key_issuer(mut self, issuer: impl KeyIssuer + 'static) -> Self {
        self.key_issuer = Some(Box::new(issuer));
        self
    }

    #[must_use]
    pub fn readiness_probe(mut self, probe: impl ReadinessProbe + 'static) -> Self {
        self.readiness_probe = Some(Box::new(probe));
        self
    }

    #[must_use]
    pub fn service_manager(mut self, manager: impl ServiceManager + 'static) -> Self {
        self.service_manager = Some(Box::new(manager));
        self
    }

    /// Parse CLI arguments, fold overrides into the config, and
    /// dispatch the appropriate command.
    ///
    /// # Errors
    ///
    /// Returns an error if the dispatched command fails.
    pub fn run(mut self) -> InstallResult<()> {
        let cli = Cli::parse();

        match cli.command {
            Command::Install {
                dry_run,
                yes,
                config_file,
                install_root,
                site_host,
                dashboard_port,
                gateway_port,
                database_port,
            } => {
                // Resolution order: defaults, file, flags.
                if let Some(path) = config_file {
                    self.config = InstallConfig::from_file(&path)?;
                }
                if let Some(root) = install_root {
                    self.config.install_root = root;
                }
                if let Some(host) = site_host {
                    self.config.site_host = host;
                }
                if let Some(port) = dashboard_port {
                    self.config.dashboard_port = port;
                }
                if let Some(port) = gateway_port {
                    self.config.gateway_port = port;
                }
                if let Some(port) = database_port {
                    self.config.database_port = port;
                }

                if dry_run {
                    self.dry_run()
                } else {
                    self.install(yes)
                }
            }
            Command::Status => self.status(),
            Command::Restart => self.restart(),
        }
    }

    /// Execute the full workflow against the host.
    pub fn install(&self, assume_yes: bool) -> InstallResult<()> {
        preflight::check(&self.config)?;
        self.install_unchecked(assume_yes)
    }

    /// The workflow after preflight. Public so an embedding caller
    /// can run its own host checks first.
    pub fn install_unchecked(&self, assume_yes: bool) -> InstallResult<()> {
        let default_repo = Git::new();
        let repo = self.repo_source.as_deref().unwrap_or(&default_repo);
        repo.sync(&self.config)?;

        let default_issuer = JwtCli::new(&self.config.service_name);
        let issuer = self.key_issuer.as_deref().unwrap_or(&default_issuer);
        eprintln!("Generating secrets...");
        let secrets = SecretBundle::generate(issuer)?;

        self.materialize(&secrets)?;

        ports::audit(&self.config, assume_yes)?;

        let default_orchestrator = DockerCompose::new(&self.config);
        let orchestrator = self
            .orchestrator
            .as_deref()
            .unwrap_or(&default_orchestrator);

        let default_probe = CliProbe::new();
        let probe = self.readiness_probe.as_deref().unwrap_or(&default_probe);
        stack::launch(&self.config, orchestrator, probe)?;

        let default_manager = Systemd::new();
        let manager = self.service_manager.as_deref().unwrap_or(&default_manager);
        manager.register(&self.config)?;

        scripts::emit(&self.config)?;

        self.print_summary(&secrets);
        Ok(())
    }

    /// Write the env file and compose override, validating the
    /// override's service names against the fetched base
    /// definition first. Both files are overwritten whole.
    fn materialize(&self, secrets: &SecretBundle) -> InstallResult<()> {
        let base = std::fs::read_to_string(self.config.base_compose_path())?;
        compose::validate(&base)?;

        eprintln!("Writing configuration...");
        let env_path = self.config.env_file_path();
        std::fs::write(&env_path, envfile::render(&self.config, secrets))?;

        // The env file holds every credential.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&env_path, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::write(self.config.override_path(), compose::render(&self.config))?;
        Ok(())
    }

    /// Preview the rendered artifacts and planned actions without
    /// touching the host. Secrets are stand-ins; real credentials
    /// are only minted during an actual install.
    #[allow(clippy::unnecessary_wraps)]
    pub fn dry_run(&self) -> InstallResult<()> {
        let secrets = SecretBundle::placeholder();

        eprintln!("=== Dry run: no changes will be made ===");
        eprintln!();

        eprintln!("--- {} ---", self.config.env_file_path().display());
        println!("{}", envfile::render(&self.config, &secrets));

        eprintln!("--- {} ---", self.config.override_path().display());
        println!("{}", compose::render(&self.config));

        eprintln!("--- {} ---", self.config.unit_path().display());
        println!("{}", service_unit::render(&self.config));

        eprintln!("--- Actions that would be performed ---");
        eprintln!(
            "1. Sync {} into {}",
            self.config.upstream_url,
            self.config.workdir.display()
        );
        eprintln!("2. Generate a fresh secret bundle");
        eprintln!("3. Write env file and compose override");
        eprintln!("4. Audit ports {:?}", self.config.host_ports());
        eprintln!("5. Pull images and start the stack");
        eprintln!("6. Register and enable the systemd unit");
        eprintln!(
            "7. Emit backup/health-check/restart scripts to {}",
            self.config.scripts_dir().display()
        );

        Ok(())
    }

    /// Print current container status.
    pub fn status(&self) -> InstallResult<()> {
        let default_orchestrator = DockerCompose::new(&self.config);
        let orchestrator = self
            .orchestrator
            .as_deref()
            .unwrap_or(&default_orchestrator);
        orchestrator.ps()
    }

    /// Stop and start the stack with a settle delay, same as the
    /// emitted restart script.
    pub fn restart(&self) -> InstallResult<()> {
        let default_orchestrator = DockerCompose::new(&self.config);
        let orchestrator = self
            .orchestrator
            .as_deref()
            .unwrap_or(&default_orchestrator);

        eprintln!("Stopping stack...");
        orchestrator.down()?;
        std::thread::sleep(std::time::Duration::from_secs(5));
        eprintln!("Starting stack...");
        orchestrator.up()?;
        orchestrator.ps()
    }

    fn print_summary(&self, secrets: &SecretBundle) {
        let host = &self.config.site_host;

        println!();
        println!("Installation complete.");
        println!();
        println!("Dashboard:   http://{host}:{}", self.config.dashboard_port);
        println!("API gateway: http://{host}:{}", self.config.gateway_port);
        println!(
            "Database:    postgres://postgres:{}@{host}:{}/postgres",
            secrets.postgres_password, self.config.database_port
        );
        println!();
        println!("Credentials (store these now, they are only shown once):");
        println!("  Postgres password: {}", secrets.postgres_password);
        println!("  anon key:          {}", secrets.anon_key);
        println!("  service role key:  {}", secrets.service_key);
        println!();
        println!(
            "NOTE: every install run mints a fresh secret bundle; \
             API keys from previous runs are now invalid."
        );
        println!();
        println!("Next steps:");
        println!("  systemctl start {}", self.config.service_name);
        println!(
            "  {}/health-check.sh",
            self.config.scripts_dir().display()
        );
        println!("  {}/backup.sh", self.config.scripts_dir().display());
    }
}

#[derive(Parser)]
#[command(name = "basestack")]
#[command(about = "Install a self-hosted backend-as-a-service stack")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full installation workflow
    Install {
        /// Preview generated files without executing
        #[arg(long)]
        dry_run: bool,

        /// Proceed past port conflicts without prompting
        #[arg(long)]
        yes: bool,

        /// YAML config file overriding the built-in defaults
        #[arg(long)]
        config_file: Option<PathBuf>,

        /// Persistent storage root (must already exist)
        #[arg(long)]
        install_root: Option<PathBuf>,

        /// Hostname used in generated URLs
        #[arg(long)]
        site_host: Option<String>,

        /// Host port for the dashboard
        #[arg(long)]
        dashboard_port: Option<u16>,

        /// Host port for the API gateway
        #[arg(long)]
        gateway_port: Option<u16>,

        /// Host port for the database
        #[arg(long)]
        database_port: Option<u16>,
    },

    /// Show container status for the installed stack
    Status,

    /// Stop and start the installed stack
    Restart,
}
