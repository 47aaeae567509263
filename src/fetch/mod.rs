pub mod git;

use crate::config::InstallConfig;
use crate::error::InstallResult;

/// Obtains and updates the upstream source tree holding the base
/// compose definition.
pub trait RepoSource {
    /// Bring the working copy at `config.workdir` up to date with
    /// the pinned ref, cloning it first if absent. Idempotent.
    fn sync(&self, config: &InstallConfig) -> InstallResult<()>;
}
