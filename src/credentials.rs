//! API credential loading.
//!
//! Credentials are loaded once, explicitly, and handed to whatever needs
//! them. Nothing here writes to the process environment: a `.env` file is
//! read as a list of entries and consulted only when the variable is not
//! already set.
//!
//! Lookup order for [`Credentials::from_env`]:
//!
//! 1. `OPENAI_API_KEY` in the process environment
//! 2. `OPENAI_API_KEY` in the first `.env` file found in the current
//!    directory or one of its parents
//!
//! A blank value counts as missing.

use std::env::VarError;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Credentials for the downstream model API.
///
/// The key is never printed by `Debug`.
///
/// ```rust
/// use chunkwise::Credentials;
///
/// let creds = Credentials::from_lookup(|_| Some("sk-test".to_string())).unwrap();
/// assert_eq!(creds.api_key(), "sk-test");
/// assert!(!format!("{creds:?}").contains("sk-test"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    /// Load from the process environment, falling back to a `.env` file.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCredential`] if the variable is set but not UTF-8.
    /// - [`Error::EnvFile`] if a `.env` file exists but cannot be parsed.
    /// - [`Error::MissingCredential`] if the key is set in neither place.
    pub fn from_env() -> Result<Self> {
        if let Some(key) = env_value(API_KEY_VAR, std::env::var(API_KEY_VAR))? {
            debug!(source = "environment", "loaded API credential");
            return Ok(Self { api_key: key });
        }

        let entries = match dotenvy::dotenv_iter() {
            Ok(iter) => iter,
            Err(e) if e.not_found() => {
                return Err(Error::MissingCredential { var: API_KEY_VAR });
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_entries(entries, ".env")
    }

    /// Load from a specific `.env`-format file, ignoring the process
    /// environment.
    ///
    /// # Errors
    ///
    /// - [`Error::EnvFile`] if the file is missing or malformed.
    /// - [`Error::MissingCredential`] if the file does not set the key.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let entries = dotenvy::from_path_iter(path)?;
        Self::from_entries(entries, &path.display().to_string())
    }

    /// Load through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] if `lookup` yields nothing (or
    /// only whitespace) for [`API_KEY_VAR`].
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        non_blank(lookup(API_KEY_VAR))
            .map(|api_key| Self { api_key })
            .ok_or(Error::MissingCredential { var: API_KEY_VAR })
    }

    /// The API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    fn from_entries<I>(entries: I, source: &str) -> Result<Self>
    where
        I: IntoIterator<Item = dotenvy::Result<(String, String)>>,
    {
        for entry in entries {
            let (name, value) = entry?;
            if name == API_KEY_VAR {
                if let Some(key) = non_blank(Some(value)) {
                    debug!(source, "loaded API credential");
                    return Ok(Self { api_key: key });
                }
            }
        }
        Err(Error::MissingCredential { var: API_KEY_VAR })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// A set-but-unreadable variable is an error, not a reason to fall back.
fn env_value(
    var: &'static str,
    value: std::result::Result<String, VarError>,
) -> Result<Option<String>> {
    match value {
        Ok(v) => Ok(non_blank(Some(v))),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(Error::InvalidCredential { var }),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
