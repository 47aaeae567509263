use std::path::Path;

use crate::config::InstallConfig;
use crate::error::InstallResult;

/// Emit the three standalone operational scripts under
/// `<install root>/bin`. Each script bakes in the paths it needs
/// at emission time and depends only on the running stack, never
/// on this process.
pub fn emit(config: &InstallConfig) -> InstallResult<()> {
    let dir = config.scripts_dir();
    std::fs::create_dir_all(&dir)?;

    write_executable(&dir.join("backup.sh"), &render_backup(config))?;
    write_executable(&dir.join("health-check.sh"), &render_health_check(config))?;
    write_executable(&dir.join("restart.sh"), &render_restart(config))?;

    eprintln!("Operational scripts written to {}", dir.display());
    Ok(())
}

fn write_executable(path: &Path, content: &str) -> InstallResult<()> {
    std::fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    }

    Ok(())
}

/// The compose invocation shared by all three scripts, layering
/// base + override + env file exactly as the installer does.
fn compose_command(config: &InstallConfig) -> String {
    format!(
        "docker compose --project-directory {} -f {} -f {} --env-file {}",
        config.compose_dir().display(),
        config.base_compose_path().display(),
        config.override_path().display(),
        config.env_file_path().display()
    )
}

/// Days of backups kept before pruning.
const BACKUP_RETENTION_DAYS: u32 = 14;

#[must_use]
pub fn render_backup(config: &InstallConfig) -> String {
    let compose = compose_command(config);
    let backup_root = config.backup_dir().display().to_string();
    let install_root = config.install_root.display().to_string();
    let env_file = config.env_file_path().display().to_string();

    format!(
        "#!/bin/sh\n\
         # Dump the database, archive the storage volume, and back\n\
         # up the env file, each timestamped under {backup_root}.\n\
         set -eu\n\
         \n\
         COMPOSE=\"{compose}\"\n\
         STAMP=$(date +%Y%m%d-%H%M%S)\n\
         BACKUP_ROOT=\"{backup_root}\"\n\
         \n\
         mkdir -p \"$BACKUP_ROOT\"\n\
         \n\
         echo \"Dumping database...\"\n\
         $COMPOSE exec -T db pg_dump -U postgres postgres \\\n\
    \x20    > \"$BACKUP_ROOT/db-$STAMP.sql\"\n\
         \n\
         echo \"Archiving storage volume...\"\n\
         tar czf \"$BACKUP_ROOT/storage-$STAMP.tar.gz\" \\\n\
    \x20    -C \"{install_root}\" storage\n\
         \n\
         echo \"Backing up environment file...\"\n\
         cp \"{env_file}\" \"$BACKUP_ROOT/env-$STAMP.bak\"\n\
         \n\
         echo \"Pruning backups older than {BACKUP_RETENTION_DAYS} days...\"\n\
         find \"$BACKUP_ROOT\" -type f -mtime +{BACKUP_RETENTION_DAYS} -delete\n\
         \n\
         echo \"Backup complete: $BACKUP_ROOT\"\n"
    )
}

#[must_use]
pub fn render_health_check(config: &InstallConfig) -> String {
    let compose = compose_command(config);
    let install_root = config.install_root.display().to_string();
    let api_url = format!("http://localhost:{}/", config.gateway_port);
    let dashboard_url = format!("http://localhost:{}/", config.dashboard_port);

    format!(
        "#!/bin/sh\n\
         # Report stack status: containers, database readiness,\n\
         # endpoint reachability, disk usage, and recent logs.\n\
         \n\
         COMPOSE=\"{compose}\"\n\
         \n\
         echo \"=== Containers ===\"\n\
         $COMPOSE ps\n\
         \n\
         echo \"=== Database ===\"\n\
         if $COMPOSE exec -T db pg_isready -U postgres; then\n\
    \x20    echo \"database: ready\"\n\
         else\n\
    \x20    echo \"database: NOT ready\"\n\
         fi\n\
         \n\
         echo \"=== Endpoints ===\"\n\
         if curl --fail --silent --output /dev/null --max-time 5 \"{api_url}\"; then\n\
    \x20    echo \"API gateway: reachable\"\n\
         else\n\
    \x20    echo \"API gateway: UNREACHABLE\"\n\
         fi\n\
         if curl --fail --silent --output /dev/null --max-time 5 \"{dashboard_url}\"; then\n\
    \x20    echo \"dashboard: reachable\"\n\
         else\n\
    \x20    echo \"dashboard: UNREACHABLE\"\n\
         fi\n\
         \n\
         echo \"=== Disk usage ===\"\n\
         df -h \"{install_root}\"\n\
         \n\
         echo \"=== Recent logs ===\"\n\
         $COMPOSE logs --tail 20\n"
    )
}

/// Seconds the restart script waits between down and up.
const RESTART_SETTLE_SECS: u32 = 5;

#[must_use]
pub fn render_restart(config: &InstallConfig) -> String {
    let compose = compose_command(config);

    format!(
        "#!/bin/sh\n\
         # Stop and start the full stack with a settle delay.\n\
         set -eu\n\
         \n\
         COMPOSE=\"{compose}\"\n\
         \n\
         echo \"Stopping stack...\"\n\
         $COMPOSE down\n\
         sleep {RESTART_SETTLE_SECS}\n\
         echo \"Starting stack...\"\n\
         $COMPOSE up -d\n\
         $COMPOSE ps\n"
    )
}
