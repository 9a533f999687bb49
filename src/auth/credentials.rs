//! Credential management for Soundslice API authentication.

use secrecy::{ExposeSecret, SecretString};

/// Environment variable holding the application id.
pub const APP_ID_VAR: &str = "SOUNDSLICE_APP_ID";
/// Environment variable holding the application password.
pub const PASSWORD_VAR: &str = "SOUNDSLICE_PASSWORD";

/// API credentials: the application id and its shared secret.
///
/// Sent as HTTP basic auth (id as username, secret as password) on every call.
#[derive(Clone)]
pub struct Credentials {
    /// The application id (public identifier)
    pub app_id: String,
    /// The application password
    password: SecretString,
}

impl Credentials {
    /// Create new credentials from an application id and password.
    pub fn new(app_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Get the password for basic auth.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.password.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(app_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(app_id, password),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads from `SOUNDSLICE_APP_ID` and `SOUNDSLICE_PASSWORD`.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Try to create credentials from the default environment variables.
    ///
    /// Returns `None` if either variable is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars(APP_ID_VAR, PASSWORD_VAR)
    }

    /// Try to create credentials from custom environment variable names.
    ///
    /// Returns `None` if either variable is not set.
    pub fn try_from_env_vars(app_id_var: &str, password_var: &str) -> Option<Self> {
        let app_id = std::env::var(app_id_var).ok()?;
        let password = std::env::var(password_var).ok()?;

        Some(Self {
            credentials: Credentials::new(app_id, password),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
