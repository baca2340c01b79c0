use std::path::Path;

use crate::{
    encoder::encode_script,
    error::ScriptError,
    parser::read_rows,
    types::{CompilerConfig, RawRow, ScriptCommand},
    validator::validate_rows,
};

/// Compile raw rows into `(Vec<ScriptCommand>, Vec<u8>)`.
/// Returns `Err(ScriptError)` if validation or encoding fails; on any error
/// no output is produced at all.
pub fn compile_rows(
    rows: &[RawRow],
    config: &CompilerConfig,
) -> Result<(Vec<ScriptCommand>, Vec<u8>), ScriptError> {
    let commands = validate_rows(rows)?;
    let bin = encode_script(&commands, config)?;
    Ok((commands, bin))
}

/// Compile a source file (`.csv` or `.json`) into `(Vec<ScriptCommand>, Vec<u8>)`.
pub fn compile_file(
    path: &Path,
    config: &CompilerConfig,
) -> Result<(Vec<ScriptCommand>, Vec<u8>), ScriptError> {
    let rows = read_rows(path)?;
    compile_rows(&rows, config)
}
