use crate::cmd;
use crate::config::InstallConfig;
use crate::error::InstallResult;
use crate::fetch::RepoSource;

/// Fetches the upstream tree with the `git` CLI.
pub struct Git;

impl Git {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for Git {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoSource for Git {
    fn sync(&self, config: &InstallConfig) -> InstallResult<()> {
        let workdir = config.workdir.display().to_string();

        if config.workdir.join(".git").is_dir() {
            eprintln!("Updating upstream in {workdir}...");
            // Shallow clones only know the refs they were created
            // with, so the pinned ref is fetched by name and checked
            // out from FETCH_HEAD.
            cmd::run(
                "git",
                &[
                    "-C",
                    &workdir,
                    "fetch",
                    "--depth",
                    "1",
                    "origin",
                    &config.upstream_ref,
                ],
            )?;
            cmd::run("git", &["-C", &workdir, "checkout", "FETCH_HEAD"])?;
        } else {
            eprintln!(
                "Cloning {} ({}) into {workdir}...",
                config.upstream_url, config.upstream_ref
            );
            cmd::run(
                "git",
                &[
                    "clone",
                    "--depth",
                    "1",
                    "--branch",
                    &config.upstream_ref,
                    &config.upstream_url,
                    &workdir,
                ],
            )?;
        }
        Ok(())
    }
}
