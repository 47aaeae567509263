use docker_compose_types::{Compose, Ports, Service, Services, Volumes};
use indexmap::IndexMap;

use crate::config::InstallConfig;
use crate::error::{InstallError, InstallResult};

/// Service names the override layers settings onto. These must
/// all exist in the upstream base definition; [`validate`]
/// enforces that before launch.
pub const OVERRIDE_SERVICES: [&str; 4] = ["db", "kong", "storage", "studio"];

/// Render the compose override layered on the upstream base
/// definition: persistent volumes under the install root and the
/// configured host port bindings. Deterministic for a given
/// config.
#[must_use]
pub fn render(config: &InstallConfig) -> String {
    let mut services = IndexMap::new();

    services.insert(
        "db".to_string(),
        Some(Service {
            ports: Ports::Short(vec![format!("{}:5432", config.database_port)]),
            volumes: vec![Volumes::Simple(format!(
                "{}:/var/lib/postgresql/data",
                config.data_dir().display()
            ))],
            ..Default::default()
        }),
    );

    services.insert(
        "kong".to_string(),
        Some(Service {
            ports: Ports::Short(vec![format!("{}:8000", config.gateway_port)]),
            ..Default::default()
        }),
    );

    services.insert(
        "storage".to_string(),
        Some(Service {
            volumes: vec![Volumes::Simple(format!(
                "{}:/var/lib/storage",
                config.storage_dir().display()
            ))],
            ..Default::default()
        }),
    );

    services.insert(
        "studio".to_string(),
        Some(Service {
            ports: Ports::Short(vec![format!("{}:3000", config.dashboard_port)]),
            ..Default::default()
        }),
    );

    let compose = Compose {
        services: Services(services),
        ..Default::default()
    };

    serde_yaml::to_string(&compose).expect("failed to serialize compose override")
}

/// Check that every service the override references exists in the
/// base definition. The orchestrator would silently ignore an
/// override entry for an unknown service, so a renamed upstream
/// service has to be caught here.
pub fn validate(base_yaml: &str) -> InstallResult<()> {
    let base: Compose = serde_yaml::from_str(base_yaml)?;

    for name in OVERRIDE_SERVICES {
        if !base.services.0.contains_key(name) {
            return Err(InstallError::UnknownService(name.to_string()));
        }
    }
    Ok(())
}
