//! Local credential store
//!
//! Credentials either arrive from the caller and stay read-only, or live
//! in a small JSON file under the user's home directory with load-on-start
//! and save-on-demand semantics. Which of the two applies is the caller's
//! explicit choice; the library never reaches for ambient state on its own.

use crate::error::StoreError;
use crate::types::Credentials;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const STORE_DIR: &str = ".stockscan";
const STORE_FILE: &str = "credentials.json";

/// One provider's saved credentials and endpoint preference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub key: String,
    pub secret: String,
    /// Endpoint the user last scanned, restored as the default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Store file contents: entries keyed by provider name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreFile {
    #[serde(flatten)]
    pub providers: BTreeMap<String, StoredEntry>,
}

/// JSON-file-backed credential persistence.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location, `~/.stockscan/credentials.json`.
    pub fn at_default_path() -> Result<Self, StoreError> {
        let home = home_dir().ok_or(StoreError::NoHome)?;
        Ok(Self::new(home.join(STORE_DIR).join(STORE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole store. A missing file is an empty store, not an
    /// error; a present but unparseable file is.
    pub fn load(&self) -> Result<StoreFile, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
                path: self.path.display().to_string(),
                source: e,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreFile::default()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Saved entry for one provider.
    pub fn entry(&self, provider: &str) -> Result<StoredEntry, StoreError> {
        self.load()?
            .providers
            .remove(provider)
            .ok_or_else(|| StoreError::NoEntry {
                provider: provider.to_string(),
            })
    }

    /// Write or replace one provider's entry, creating the store
    /// directory on first use.
    pub fn save_entry(&self, provider: &str, entry: StoredEntry) -> Result<(), StoreError> {
        let mut file = self.load()?;
        file.providers.insert(provider.to_string(), entry);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let contents = serde_json::to_string_pretty(&file).map_err(|e| StoreError::Parse {
            path: self.path.display().to_string(),
            source: e,
        })?;
        fs::write(&self.path, contents).map_err(|e| self.io_error(e))
    }

    /// Drop one provider's entry. Removing what is not there is fine.
    pub fn forget(&self, provider: &str) -> Result<(), StoreError> {
        let mut file = self.load()?;
        if file.providers.remove(provider).is_none() {
            return Ok(());
        }
        let contents = serde_json::to_string_pretty(&file).map_err(|e| StoreError::Parse {
            path: self.path.display().to_string(),
            source: e,
        })?;
        fs::write(&self.path, contents).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

/// Where credentials come from.
///
/// Supplied credentials model flags, environment variables, or an outer
/// secret manager; they are never written anywhere. Stored credentials
/// live in the local file and can be re-saved.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Externally supplied, read-only
    Supplied(Credentials),
    /// Backed by the local store
    Stored(CredentialStore),
}

impl CredentialSource {
    /// Credentials for a provider.
    pub fn resolve(&self, provider: &str) -> Result<Credentials, StoreError> {
        match self {
            CredentialSource::Supplied(credentials) => Ok(credentials.clone()),
            CredentialSource::Stored(store) => {
                let entry = store.entry(provider)?;
                Ok(Credentials::new(entry.key, entry.secret))
            }
        }
    }

    /// Persist credentials for a provider. Supplied sources refuse.
    pub fn persist(
        &self,
        provider: &str,
        credentials: &Credentials,
        endpoint: Option<&str>,
    ) -> Result<(), StoreError> {
        match self {
            CredentialSource::Supplied(_) => Err(StoreError::ReadOnlySource),
            CredentialSource::Stored(store) => store.save_entry(
                provider,
                StoredEntry {
                    key: credentials.key.clone(),
                    secret: credentials.secret.clone(),
                    endpoint: endpoint.map(str::to_string),
                },
            ),
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}
