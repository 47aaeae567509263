use basestack::InstallError;
use basestack::preflight;

#[test]
fn missing_install_root_is_distinct() {
    let root = tempfile::tempdir().expect("tempdir");
    let gone = root.path().join("does-not-exist");

    let err = preflight::check_install_root(&gone).unwrap_err();
    assert!(matches!(err, InstallError::InstallRootMissing(_)));
    assert!(err.to_string().contains("does-not-exist"));
}

#[test]
fn existing_install_root_passes() {
    let root = tempfile::tempdir().expect("tempdir");

    assert!(preflight::check_install_root(root.path()).is_ok());
}

#[test]
fn file_is_not_an_install_root() {
    let root = tempfile::tempdir().expect("tempdir");
    let file = root.path().join("plain-file");
    std::fs::write(&file, "x").expect("write");

    assert!(matches!(
        preflight::check_install_root(&file),
        Err(InstallError::InstallRootMissing(_))
    ));
}

#[test]
fn missing_command_is_distinct() {
    let err = preflight::check_commands(&["definitely-not-a-real-binary-9731"]).unwrap_err();

    assert!(matches!(err, InstallError::CommandNotFound(name)
        if name == "definitely-not-a-real-binary-9731"));
}

#[test]
fn present_command_passes() {
    // `sh` exists on any host these tests run on.
    assert!(preflight::check_commands(&["sh"]).is_ok());
}

#[test]
fn required_command_set_is_fixed() {
    assert_eq!(
        preflight::REQUIRED_COMMANDS,
        ["git", "docker", "curl", "jwt", "systemctl", "tar"]
    );
}
