use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;

use crate::cmd;
use crate::error::{InstallError, InstallResult};

const PASSWORD_LEN: usize = 32;
const JWT_SECRET_LEN: usize = 48;

/// Credentials minted once per install run. Never reused across
/// runs: re-running the installer invalidates previously
/// distributed API keys.
#[derive(Debug, Clone)]
pub struct SecretBundle {
    pub postgres_password: String,
    pub jwt_secret: String,
    /// Public (anonymous-role) API key, a JWT signed with
    /// `jwt_secret`.
    pub anon_key: String,
    /// Privileged (service-role) API key. Must never be exposed
    /// to browsers.
    pub service_key: String,
}

impl SecretBundle {
    /// Generate a fresh bundle using the OS CSPRNG and the given
    /// key issuer for the two API JWTs.
    ///
    /// Issuer failure is fatal; there is no fallback key pair.
    pub fn generate(issuer: &dyn KeyIssuer) -> InstallResult<Self> {
        let postgres_password = random_token(PASSWORD_LEN);
        let jwt_secret = random_token(JWT_SECRET_LEN);

        let anon_key = issuer.issue(&jwt_secret, "anon")?;
        let service_key = issuer.issue(&jwt_secret, "service_role")?;

        let bundle = Self {
            postgres_password,
            jwt_secret,
            anon_key,
            service_key,
        };
        bundle.validate()?;
        Ok(bundle)
    }

    /// Stand-in values for dry runs. Never written to disk.
    #[must_use]
    pub fn placeholder() -> Self {
        let stand_in = || "generated-at-install".to_string();
        Self {
            postgres_password: stand_in(),
            jwt_secret: stand_in(),
            anon_key: stand_in(),
            service_key: stand_in(),
        }
    }

    fn validate(&self) -> InstallResult<()> {
        for (name, value) in [
            ("postgres password", &self.postgres_password),
            ("JWT secret", &self.jwt_secret),
            ("anon key", &self.anon_key),
            ("service role key", &self.service_key),
        ] {
            if value.is_empty() {
                return Err(InstallError::KeygenFailed(format!("empty {name}")));
            }
        }
        Ok(())
    }
}

/// Random alphanumeric token. The character set is safe to embed
/// in an env file unquoted and in connection URLs unescaped.
#[must_use]
pub fn random_token(len: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Mints the signed API keys (anon and service role) from the
/// token-signing secret.
pub trait KeyIssuer {
    fn issue(&self, jwt_secret: &str, role: &str) -> InstallResult<String>;
}

/// Issues API keys by shelling out to the `jwt` CLI.
pub struct JwtCli {
    issuer_claim: String,
}

impl JwtCli {
    #[must_use]
    pub fn new(issuer_claim: &str) -> Self {
        Self {
            issuer_claim: issuer_claim.to_string(),
        }
    }
}

impl KeyIssuer for JwtCli {
    fn issue(&self, jwt_secret: &str, role: &str) -> InstallResult<String> {
        let role_claim = format!("role={role}");
        let iss_claim = format!("iss={}", self.issuer_claim);
        let token = cmd::run(
            "jwt",
            &[
                "encode",
                "--secret",
                jwt_secret,
                "--payload",
                &role_claim,
                "--payload",
                &iss_claim,
            ],
        )
        .map_err(|e| InstallError::KeygenFailed(e.to_string()))?;

        if token.is_empty() {
            return Err(InstallError::KeygenFailed(format!(
                "jwt CLI produced no output for role {role}"
            )));
        }
        Ok(token)
    }
}
