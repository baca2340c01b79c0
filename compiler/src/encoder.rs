use sdf_format::{ScriptBufferMut, MAGIC};

use crate::{
    error::ScriptError,
    types::{CompilerConfig, ScriptCommand},
};

/// Serialize the header and the ordered command sequence into the output
/// byte buffer. Performs no I/O; the only failures are internal invariant
/// violations, which cannot occur when the validator contract is honored.
///
/// The count is written as a full little-endian `u32`. Version 1 of the
/// format populated only the low byte of the 4-byte field, wrapping any
/// script above 255 commands; the version stamp was bumped when that changed.
pub fn encode_script(
    commands: &[ScriptCommand],
    config: &CompilerConfig,
) -> Result<Vec<u8>, ScriptError> {
    if !config.version.is_ascii() {
        return Err(ScriptError::Encode(format!(
            "version stamp {:?} is not ASCII",
            config.version
        )));
    }
    let count = u32::try_from(commands.len()).map_err(|_| {
        ScriptError::Encode(format!(
            "command count {} exceeds the 32-bit count field",
            commands.len()
        ))
    })?;

    let mut buffer = ScriptBufferMut::new();
    buffer.write_bytes(&MAGIC);
    buffer.write_bytes(config.version.as_bytes());
    buffer.write_u32(count);

    for command in commands {
        buffer.write_i64(command.timer);
        buffer.write_string(&command.system);
        buffer.write_string(&command.to);
        buffer.write_string(&command.from);
        buffer.write_string(&command.command);
        buffer.write_string(&command.argument);
    }

    Ok(buffer.data())
}
