//! Cart Storage
//!
//! Durable client-side storage for the cart snapshot. Every backend stores
//! the same JSON document, so a snapshot written by one can be read by another.

use std::{
    fmt::Debug,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::cart::Cart;

/// Errors raised while reading or writing a cart snapshot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be accessed.
    #[error("cart storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The snapshot could not be encoded or decoded.
    #[error("cart snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persists the cart snapshot between page loads.
pub trait CartStorage: Debug {
    /// Read the last saved snapshot, or `None` when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read or decoded.
    fn load(&self) -> Result<Option<Cart>, StorageError>;

    /// Replace the saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be encoded or written.
    fn save(&mut self, cart: &Cart) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for Box<S> {
    fn load(&self) -> Result<Option<Cart>, StorageError> {
        (**self).load()
    }

    fn save(&mut self, cart: &Cart) -> Result<(), StorageError> {
        (**self).save(cart)
    }
}

/// In-memory storage holding the encoded snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    snapshot: Option<String>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-seeded with a raw snapshot document.
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: Some(snapshot.into()),
        }
    }

    /// The raw document last written.
    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Cart>, StorageError> {
        self.snapshot
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(StorageError::from)
    }

    fn save(&mut self, cart: &Cart) -> Result<(), StorageError> {
        self.snapshot = Some(serde_json::to_string(cart)?);

        Ok(())
    }
}

/// File-backed storage, the terminal counterpart of the `cart` cookie.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Store the snapshot at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");

        self.path.with_file_name(name)
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Cart>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&mut self, cart: &Cart) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();

        fs::write(&temp, serde_json::to_vec_pretty(cart)?)?;
        fs::rename(&temp, &self.path)?;

        Ok(())
    }
}
