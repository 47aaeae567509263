use basestack::secrets::{KeyIssuer, SecretBundle, random_token};
use basestack::{InstallError, InstallResult};

struct FakeIssuer;

impl KeyIssuer for FakeIssuer {
    fn issue(&self, jwt_secret: &str, role: &str) -> InstallResult<String> {
        Ok(format!("signed-{role}-with-{jwt_secret}"))
    }
}

struct BrokenIssuer;

impl KeyIssuer for BrokenIssuer {
    fn issue(&self, _jwt_secret: &str, _role: &str) -> InstallResult<String> {
        Err(InstallError::KeygenFailed("tool absent".into()))
    }
}

#[test]
fn generated_values_are_nonempty_and_safe() {
    let bundle = SecretBundle::generate(&FakeIssuer).expect("generate");

    assert!(!bundle.postgres_password.is_empty());
    assert!(!bundle.jwt_secret.is_empty());
    assert!(
        bundle
            .postgres_password
            .chars()
            .all(|c| c.is_ascii_alphanumeric())
    );
    assert!(bundle.jwt_secret.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn api_keys_are_signed_with_the_fresh_secret() {
    let bundle = SecretBundle::generate(&FakeIssuer).expect("generate");

    assert_eq!(
        bundle.anon_key,
        format!("signed-anon-with-{}", bundle.jwt_secret)
    );
    assert_eq!(
        bundle.service_key,
        format!("signed-service_role-with-{}", bundle.jwt_secret)
    );
}

#[test]
fn two_generations_differ() {
    let first = SecretBundle::generate(&FakeIssuer).expect("generate");
    let second = SecretBundle::generate(&FakeIssuer).expect("generate");

    assert_ne!(first.postgres_password, second.postgres_password);
    assert_ne!(first.jwt_secret, second.jwt_secret);
}

#[test]
fn issuer_failure_is_fatal() {
    let result = SecretBundle::generate(&BrokenIssuer);

    assert!(matches!(result, Err(InstallError::KeygenFailed(_))));
}

#[test]
fn random_token_has_requested_length() {
    assert_eq!(random_token(32).len(), 32);
    assert_eq!(random_token(48).len(), 48);
}
