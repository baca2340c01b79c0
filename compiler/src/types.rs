use serde::Serialize;

use sdf_format::FORMAT_VERSION;

/// Columns a source row must have: the timer plus the five text fields.
pub const FIELDS_PER_ROW: usize = 6;

/// Names of the five text fields, in record order. Used for error messages.
pub const TEXT_FIELD_NAMES: [&str; 5] = ["system", "to", "from", "command", "argument"];

/// A raw source row as produced by the row parser: an ordered list of field
/// values, not yet checked for shape.
pub type RawRow = Vec<String>;

/// One compiled event record. Instances exist only between validation and
/// encoding; nothing mutates them after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptCommand {
    pub timer:    i64,
    pub system:   String,
    pub to:       String,
    pub from:     String,
    pub command:  String,
    pub argument: String,
}

/// Compiler settings, constructed once at process start and passed into the
/// compile functions. There is no ambient configuration state.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// ASCII version stamp written into the file header.
    pub version: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            version: FORMAT_VERSION.to_string(),
        }
    }
}
