use std::path::PathBuf;

use crate::cmd;
use crate::config::InstallConfig;
use crate::error::InstallResult;
use crate::orchestrate::Orchestrator;

/// `docker compose` implementation, layering the upstream base
/// definition with the rendered override and env file.
pub struct DockerCompose {
    project_dir: PathBuf,
    base_file: PathBuf,
    override_file: PathBuf,
    env_file: PathBuf,
}

impl DockerCompose {
    #[must_use]
    pub fn new(config: &InstallConfig) -> Self {
        Self {
            project_dir: config.compose_dir(),
            base_file: config.base_compose_path(),
            override_file: config.override_path(),
            env_file: config.env_file_path(),
        }
    }

    fn base_args(&self) -> Vec<String> {
        vec![
            "compose".to_string(),
            "--project-directory".to_string(),
            self.project_dir.display().to_string(),
            "-f".to_string(),
            self.base_file.display().to_string(),
            "-f".to_string(),
            self.override_file.display().to_string(),
            "--env-file".to_string(),
            self.env_file.display().to_string(),
        ]
    }

    fn run_interactive(&self, verb_args: &[&str]) -> InstallResult<()> {
        let mut args = self.base_args();
        args.extend(verb_args.iter().map(|a| (*a).to_string()));
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        cmd::run_interactive("docker", &refs)
    }

    fn run_captured(&self, verb_args: &[&str]) -> InstallResult<String> {
        let mut args = self.base_args();
        args.extend(verb_args.iter().map(|a| (*a).to_string()));
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        cmd::run("docker", &refs)
    }
}

impl Orchestrator for DockerCompose {
    fn pull(&self) -> InstallResult<()> {
        self.run_interactive(&["pull"])
    }

    fn up(&self) -> InstallResult<()> {
        self.run_interactive(&["up", "-d"])
    }

    fn down(&self) -> InstallResult<()> {
        self.run_interactive(&["down"])
    }

    fn ps(&self) -> InstallResult<()> {
        self.run_interactive(&["ps"])
    }

    fn exec(&self, service: &str, command: &[&str]) -> InstallResult<String> {
        let mut args = vec!["exec", "-T", service];
        args.extend_from_slice(command);
        self.run_captured(&args)
    }
}
