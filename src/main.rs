use basestack::{InstallConfig, Installer};

fn main() -> anyhow::Result<()> {
    let config = InstallConfig::new("/mnt/data/basestack");
    Installer::new(config).run()?;
    Ok(())
}
