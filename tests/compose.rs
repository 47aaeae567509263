use basestack::compose;
use basestack::{InstallConfig, InstallError};
use docker_compose_types::Compose;

fn config() -> InstallConfig {
    InstallConfig::new("/srv/baas").workdir("/opt/up")
}

#[test]
fn override_covers_fixed_services() {
    let yaml = compose::render(&config());

    for name in compose::OVERRIDE_SERVICES {
        assert!(yaml.contains(&format!("{name}:")), "missing service {name}");
    }
}

#[test]
fn override_binds_volumes_under_install_root() {
    let yaml = compose::render(&config());

    assert!(yaml.contains("/srv/baas/data:/var/lib/postgresql/data"));
    assert!(yaml.contains("/srv/baas/storage:/var/lib/storage"));
}

#[test]
fn override_binds_configured_ports() {
    let custom = config()
        .dashboard_port(3100)
        .gateway_port(8800)
        .database_port(15432);
    let yaml = compose::render(&custom);

    assert!(yaml.contains("15432:5432"));
    assert!(yaml.contains("8800:8000"));
    assert!(yaml.contains("3100:3000"));
}

#[test]
fn override_round_trips_through_parser() {
    let yaml = compose::render(&config());
    let parsed: Compose = serde_yaml::from_str(&yaml).expect("parse override");

    assert_eq!(parsed.services.0.len(), compose::OVERRIDE_SERVICES.len());
}

#[test]
fn deterministic_for_same_config() {
    let config = config();
    assert_eq!(compose::render(&config), compose::render(&config));
}

#[test]
fn validate_accepts_matching_base() {
    let base = "
services:
  db:
    image: postgres:15
  kong:
    image: kong:2.8
  storage:
    image: storage-api:latest
  studio:
    image: studio:latest
  auth:
    image: gotrue:latest
";

    assert!(compose::validate(base).is_ok());
}

#[test]
fn validate_rejects_renamed_service() {
    let base = "
services:
  database:
    image: postgres:15
  kong:
    image: kong:2.8
  storage:
    image: storage-api:latest
  studio:
    image: studio:latest
";

    let err = compose::validate(base).unwrap_err();
    assert!(matches!(err, InstallError::UnknownService(name) if name == "db"));
}

#[test]
fn validate_rejects_unparseable_base() {
    assert!(matches!(
        compose::validate("not-a-mapping"),
        Err(InstallError::Yaml(_))
    ));
}
