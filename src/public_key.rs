use std::path::{Path, PathBuf};

use tracing::debug;

use crate::env::{EnvLookup, HOME};
use crate::error::{Result, TfvarsError};

/// Where CI pipelines drop the deploy key.
pub const DEFAULT_KEY_FILE: &str = ".ssh/id_rsa_corax.pub";

/// `$HOME/.ssh/id_rsa_corax.pub`, or `None` when HOME is unset.
pub fn default_key_path(env: &dyn EnvLookup) -> Option<PathBuf> {
    env.var(HOME)
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(DEFAULT_KEY_FILE))
}

/// Read the key file when it exists, otherwise fall back to the
/// USER_PUBLIC_KEY value. An existing file always wins, even if empty.
pub fn resolve_public_key(path: Option<&Path>, fallback: &str) -> Result<String> {
    if let Some(path) = path {
        if path.exists() {
            debug!(path = %path.display(), "reading public key file");
            let contents =
                std::fs::read_to_string(path).map_err(|e| TfvarsError::io(path, e))?;
            return Ok(contents.trim().to_string());
        }
    }

    if fallback.is_empty() {
        return Err(TfvarsError::MissingPublicKey {
            path: path.map(Path::to_path_buf),
        });
    }

    debug!("public key file absent, using USER_PUBLIC_KEY");
    Ok(fallback.to_string())
}
