use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::ScriptError;

/// Ask-before-overwrite capability, supplied by the caller. The CLI backs
/// this with a stdin prompt; tests and `--yes` use [`FixedAnswer`].
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// A [`Confirm`] that always gives the same answer.
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

/// Persist the final byte buffer to disk as a single whole-buffer write and
/// return the written size. If the output path already exists the confirm
/// capability is consulted first; declining aborts the run and leaves the
/// existing file untouched.
pub fn write_script(
    path: &Path,
    data: &[u8],
    confirm: &dyn Confirm,
) -> Result<u64, ScriptError> {
    if path.exists() {
        let message = format!("Output file '{}' exists, overwrite?", path.display());
        if !confirm.confirm(&message) {
            return Err(ScriptError::OverwriteDeclined(path.to_path_buf()));
        }
    }

    fs::write(path, data).map_err(|source| ScriptError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = data.len(), "wrote script file");
    Ok(data.len() as u64)
}
