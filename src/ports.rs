use std::io::BufRead;
use std::net::TcpListener;

use crate::config::InstallConfig;
use crate::error::{InstallError, InstallResult};

/// Inspect the three configured host ports and, if any is already
/// bound, require an explicit confirmation before proceeding.
/// One declined conflict aborts the whole run before anything is
/// launched.
pub fn audit(config: &InstallConfig, assume_yes: bool) -> InstallResult<()> {
    let conflicts = find_conflicts(config);
    if conflicts.is_empty() {
        return Ok(());
    }

    eprintln!("The following configured ports are already in use:");
    for (name, port) in &conflicts {
        eprintln!("  {port} ({name})");
    }

    if assume_yes {
        eprintln!("Continuing anyway (--yes).");
        return Ok(());
    }

    eprint!("Continue anyway? Type 'yes' to confirm: ");
    confirm(&mut std::io::stdin().lock())
}

/// Ports from the config that something on the host is already
/// listening on.
#[must_use]
pub fn find_conflicts(config: &InstallConfig) -> Vec<(&'static str, u16)> {
    config
        .host_ports()
        .into_iter()
        .filter(|&(_, port)| port_in_use(port))
        .collect()
}

fn port_in_use(port: u16) -> bool {
    // A successful wildcard bind proves the port is free on every
    // interface; the listener is dropped immediately after.
    match TcpListener::bind(("0.0.0.0", port)) {
        Ok(_) => false,
        Err(e) => e.kind() == std::io::ErrorKind::AddrInUse,
    }
}

fn confirm(input: &mut impl BufRead) -> InstallResult<()> {
    let mut line = String::new();
    input.read_line(&mut line)?;

    if line.trim() == "yes" {
        Ok(())
    } else {
        Err(InstallError::PortDeclined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_bound_port() {
        let listener = TcpListener::bind("0.0.0.0:0").expect("bind ephemeral");
        let port = listener.local_addr().expect("local addr").port();

        assert!(port_in_use(port));
    }

    #[test]
    fn detects_loopback_only_listener() {
        // A service bound only to 127.0.0.1 still blocks the port
        // for a container publishing on all interfaces.
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral");
        let port = listener.local_addr().expect("local addr").port();

        assert!(port_in_use(port));
    }

    #[test]
    fn free_port_is_not_a_conflict() {
        let listener = TcpListener::bind("0.0.0.0:0").expect("bind ephemeral");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);

        assert!(!port_in_use(port));
    }

    #[test]
    fn confirm_accepts_yes() {
        let mut input = b"yes\n".as_slice();
        assert!(confirm(&mut input).is_ok());
    }

    #[test]
    fn confirm_rejects_anything_else() {
        let mut input = b"no\n".as_slice();
        assert!(matches!(
            confirm(&mut input),
            Err(InstallError::PortDeclined)
        ));
    }

    #[test]
    fn confirm_rejects_empty_input() {
        let mut input = b"".as_slice();
        assert!(matches!(
            confirm(&mut input),
            Err(InstallError::PortDeclined)
        ));
    }
}
