use std::path::Path;
use std::process::Command;

use basestack::{Git, InstallConfig};
use basestack::fetch::RepoSource;

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args([
            "-c",
            "user.email=ci@example.com",
            "-c",
            "user.name=ci",
        ])
        .args(args)
        .output()
        .expect("run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Build an upstream repo with two tagged commits and return the
/// commit id of each tag.
fn seed_upstream(dir: &Path) -> (String, String) {
    git(dir, &["init", "--initial-branch", "main", "."]);
    std::fs::write(dir.join("README"), "one\n").expect("write");
    git(dir, &["add", "."]);
    git(dir, &["commit", "-m", "one"]);
    git(dir, &["tag", "v1"]);
    let first = git(dir, &["rev-parse", "v1"]);

    std::fs::write(dir.join("README"), "two\n").expect("write");
    git(dir, &["add", "."]);
    git(dir, &["commit", "-m", "two"]);
    git(dir, &["tag", "v2"]);
    let second = git(dir, &["rev-parse", "v2"]);

    (first, second)
}

#[test]
fn sync_clones_the_pinned_ref() {
    let root = tempfile::tempdir().expect("tempdir");
    let upstream = root.path().join("upstream");
    std::fs::create_dir(&upstream).expect("mkdir");
    let (first, _) = seed_upstream(&upstream);

    let config = InstallConfig::new("/srv/baas")
        .upstream(&format!("file://{}", upstream.display()), "v1")
        .workdir(root.path().join("workdir"));

    Git::new().sync(&config).expect("sync");

    assert_eq!(git(&config.workdir, &["rev-parse", "HEAD"]), first);
    assert_eq!(
        std::fs::read_to_string(config.workdir.join("README")).expect("read"),
        "one\n"
    );
}

#[test]
fn sync_moves_an_existing_shallow_clone_to_a_new_ref() {
    let root = tempfile::tempdir().expect("tempdir");
    let upstream = root.path().join("upstream");
    std::fs::create_dir(&upstream).expect("mkdir");
    let (_, second) = seed_upstream(&upstream);

    let url = format!("file://{}", upstream.display());
    let workdir = root.path().join("workdir");

    // First sync pins v1; the shallow clone knows nothing about v2.
    let config = InstallConfig::new("/srv/baas")
        .upstream(&url, "v1")
        .workdir(&workdir);
    Git::new().sync(&config).expect("initial sync");

    let config = InstallConfig::new("/srv/baas")
        .upstream(&url, "v2")
        .workdir(&workdir);
    Git::new().sync(&config).expect("re-sync");

    assert_eq!(git(&workdir, &["rev-parse", "HEAD"]), second);
    assert_eq!(
        std::fs::read_to_string(workdir.join("README")).expect("read"),
        "two\n"
    );
}
