use basestack::InstallConfig;
use basestack::scripts;

fn config(root: &std::path::Path) -> InstallConfig {
    InstallConfig::new(root).workdir("/opt/up")
}

#[test]
fn emits_all_three_scripts() {
    let root = tempfile::tempdir().expect("tempdir");
    let config = config(root.path());

    scripts::emit(&config).expect("emit");

    for name in ["backup.sh", "health-check.sh", "restart.sh"] {
        let path = config.scripts_dir().join(name);
        assert!(path.is_file(), "missing script: {name}");
    }
}

#[cfg(unix)]
#[test]
fn scripts_are_executable() {
    use std::os::unix::fs::PermissionsExt;

    let root = tempfile::tempdir().expect("tempdir");
    let config = config(root.path());

    scripts::emit(&config).expect("emit");

    for name in ["backup.sh", "health-check.sh", "restart.sh"] {
        let path = config.scripts_dir().join(name);
        let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o755, "wrong mode on {name}");
    }
}

#[test]
fn backup_bakes_in_paths() {
    let config = config(std::path::Path::new("/srv/baas"));
    let script = scripts::render_backup(&config);

    assert!(script.starts_with("#!/bin/sh\n"));
    assert!(script.contains("/srv/baas/backups"));
    assert!(script.contains("pg_dump -U postgres postgres"));
    assert!(script.contains("tar czf"));
    assert!(script.contains("-C \"/srv/baas\" storage"));
    assert!(script.contains("cp \"/opt/up/docker/.env\""));
}

#[test]
fn backup_prunes_old_files() {
    let config = config(std::path::Path::new("/srv/baas"));
    let script = scripts::render_backup(&config);

    assert!(script.contains("find \"/srv/baas/backups\" -type f -mtime +14 -delete"));
}

#[test]
fn health_check_probes_every_subsystem() {
    let config = config(std::path::Path::new("/srv/baas"))
        .dashboard_port(3100)
        .gateway_port(8800);
    let script = scripts::render_health_check(&config);

    assert!(script.contains("pg_isready -U postgres"));
    assert!(script.contains("http://localhost:8800/"));
    assert!(script.contains("http://localhost:3100/"));
    assert!(script.contains("df -h \"/srv/baas\""));
    assert!(script.contains("logs --tail 20"));
}

#[test]
fn restart_settles_between_down_and_up() {
    let config = config(std::path::Path::new("/srv/baas"));
    let script = scripts::render_restart(&config);

    let down = script.find("$COMPOSE down").expect("down");
    let sleep = script.find("sleep 5").expect("sleep");
    let up = script.find("$COMPOSE up -d").expect("up");
    assert!(down < sleep && sleep < up);
}

#[test]
fn scripts_reference_no_process_state() {
    let config = config(std::path::Path::new("/srv/baas"));

    // The layered compose invocation is baked in whole; nothing
    // is inherited from the installer's environment.
    for script in [
        scripts::render_backup(&config),
        scripts::render_health_check(&config),
        scripts::render_restart(&config),
    ] {
        assert!(script.contains(
            "docker compose --project-directory /opt/up/docker \
             -f /opt/up/docker/docker-compose.yml \
             -f /opt/up/docker/docker-compose.override.yml \
             --env-file /opt/up/docker/.env"
        ));
    }
}
