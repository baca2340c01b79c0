//! This is a Rust library with the on-disk layout constants and byte buffer
//! primitives for the SDF script format, the compact binary artifact consumed
//! by the runtime message dispatcher.
//!
//! A script file is laid out as: a 4-byte magic, the ASCII version stamp, a
//! little-endian `u32` command count, then one record per command. A record
//! is an 8-byte little-endian `i64` timer followed by five null-terminated
//! UTF-8 text fields.
//!
//! ```
//! use sdf_format::*;
//!
//! let mut bb = ScriptBufferMut::new();
//! bb.write_bytes(&MAGIC);
//! bb.write_bytes(FORMAT_VERSION.as_bytes());
//! bb.write_u32(1);
//! bb.write_i64(0);
//! bb.write_string("sys");
//! let data = bb.data();
//! assert_eq!(&data[..4], &MAGIC);
//! ```

pub mod buffer;

pub use buffer::*;

/// Fixed byte sequence at the start of every script file.
pub const MAGIC: [u8; 4] = *b"SDF\0";

/// Version stamp written directly after the magic, not null-terminated and
/// not length-prefixed. Version "1" files carry a count field populated only
/// in its low byte; version "2" writes the full little-endian 32-bit count.
pub const FORMAT_VERSION: &str = "2";

/// Number of null-terminated text fields in one record, after the timer.
pub const TEXT_FIELDS_PER_RECORD: usize = 5;

/// Size in bytes of the record timer.
pub const TIMER_SIZE: usize = 8;
