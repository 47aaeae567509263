use std::process::ExitStatus;

pub type InstallResult<T> = Result<T, InstallError>;

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("this installer must run as root")]
    NotRoot,

    #[error(
        "install root does not exist: {0} \
         (provision storage first)"
    )]
    InstallRootMissing(String),

    #[error("command failed: {command}")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("port conflict not confirmed, aborting")]
    PortDeclined,

    #[error("API key generation failed: {0}")]
    KeygenFailed(String),

    #[error(
        "override references service '{0}' which is not in the \
         base compose definition"
    )]
    UnknownService(String),

    #[error("{0} not ready after {1} attempts")]
    ReadinessTimeout(String, u32),

    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
