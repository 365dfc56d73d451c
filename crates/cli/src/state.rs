//! Local state
//!
//! The cart snapshot and the signed-in session are kept side by side in the
//! state directory between runs.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use storefront::session::Session;
use thiserror::Error;
use tracing::warn;

const CART_FILE: &str = "cart.json";
const SESSION_FILE: &str = "session.json";

/// Errors raised while reading or writing local state.
#[derive(Debug, Error)]
pub enum StateError {
    /// The state directory or a state file could not be accessed.
    #[error("failed to access local state: {0}")]
    Io(#[from] io::Error),

    /// The session could not be serialized.
    #[error("failed to encode session: {0}")]
    Json(#[from] serde_json::Error),
}

/// Directory holding the storefront's local state.
#[derive(Debug, Clone)]
pub struct StateDir {
    root: PathBuf,
}

impl StateDir {
    /// State rooted at `root`; nothing is created until something is saved.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where the cart snapshot lives.
    pub fn cart_path(&self) -> PathBuf {
        self.root.join(CART_FILE)
    }

    /// Where the session lives.
    pub fn session_path(&self) -> PathBuf {
        self.root.join(SESSION_FILE)
    }

    /// Restore the saved session.
    ///
    /// A missing or unreadable session file means signed out.
    pub fn load_session(&self) -> Option<Session> {
        let path = self.session_path();

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return None,
            Err(error) => {
                warn!(path = %path.display(), "ignoring unreadable session: {error}");

                return None;
            }
        };

        serde_json::from_str(&contents)
            .inspect_err(|error| warn!(path = %path.display(), "ignoring invalid session: {error}"))
            .ok()
    }

    /// Save the session, or remove the file when signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or removed.
    pub fn save_session(&self, session: Option<&Session>) -> Result<(), StateError> {
        let path = self.session_path();

        let Some(session) = session else {
            return remove_if_present(&path);
        };

        fs::create_dir_all(&self.root)?;
        fs::write(&path, serde_json::to_vec_pretty(session)?)?;

        Ok(())
    }
}

fn remove_if_present(path: &Path) -> Result<(), StateError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(error.into()),
    }
}
