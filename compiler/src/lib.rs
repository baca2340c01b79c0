//! sdf-compiler
//!
//! This crate implements:
//!  1) A row parser for `.csv` / `.json` event tables,
//!  2) A command validator (row shape, timer coercion, field content),
//!  3) `encode_script` (header + ordered command records),
//!  4) A guarded file writer with an injected overwrite-confirmation
//!     capability, and
//!  5) Error types (`ScriptError`).
//!
//! The pipeline is strictly sequential: parse, validate, encode, write.
//! Every stage is all-or-nothing; a script file is only ever written in full.

pub mod compiler;
pub mod encoder;
pub mod error;
pub mod parser;
pub mod types;
pub mod utils;
pub mod validator;
pub mod writer;

pub use compiler::compile_file;
pub use compiler::compile_rows;
pub use encoder::encode_script;
pub use error::ScriptError;
pub use parser::read_rows;
pub use types::{CompilerConfig, RawRow, ScriptCommand};
pub use validator::validate_rows;
pub use writer::{write_script, Confirm, FixedAnswer};
