use std::borrow::Cow;
use std::fs;

use sdf_compiler::{
    compile_file, compile_rows, write_script, CompilerConfig, FixedAnswer, RawRow, ScriptCommand,
    ScriptError,
};
use sdf_format::{ScriptBuffer, FORMAT_VERSION, MAGIC};

fn row(fields: &[&str]) -> RawRow {
    fields.iter().map(|f| f.to_string()).collect()
}

fn read_field(bb: &mut ScriptBuffer) -> String {
    match bb.read_string().expect("missing field terminator") {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

/// Re-split an encoded script by scanning the timer width and five null
/// terminators per record. This is the read path implied by the format; it
/// exists here only to check the round-trip property.
fn decode_script(data: &[u8]) -> (u32, Vec<ScriptCommand>) {
    let mut bb = ScriptBuffer::new(data);
    assert_eq!(bb.read_bytes(4).unwrap(), MAGIC);
    assert_eq!(
        bb.read_bytes(FORMAT_VERSION.len()).unwrap(),
        FORMAT_VERSION.as_bytes()
    );
    let count = bb.read_u32().unwrap();

    let mut commands = Vec::new();
    while !bb.is_at_end() {
        let timer = bb.read_i64().expect("truncated timer");
        commands.push(ScriptCommand {
            timer,
            system:   read_field(&mut bb),
            to:       read_field(&mut bb),
            from:     read_field(&mut bb),
            command:  read_field(&mut bb),
            argument: read_field(&mut bb),
        });
    }
    (count, commands)
}

#[test]
fn test_compile_concrete_csv_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("events.csv");
    fs::write(&source, "0,sys,a,b,cmd,arg1\n").unwrap();

    let (commands, bin) = compile_file(&source, &CompilerConfig::default()).unwrap();
    assert_eq!(commands.len(), 1);

    let mut expected = Vec::new();
    expected.extend_from_slice(&MAGIC);
    expected.extend_from_slice(FORMAT_VERSION.as_bytes());
    expected.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
    expected.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0]);
    expected.extend_from_slice(b"sys\0a\0b\0cmd\0arg1\0");
    assert_eq!(bin, expected);
}

#[test]
fn test_round_trip_preserves_rows_and_order() {
    let mut rows = Vec::new();
    for i in 0..20i64 {
        rows.push(vec![
            format!("{}", i * 17 - 100),
            format!("system_{}", i),
            "player".to_string(),
            "world".to_string(),
            "spawn".to_string(),
            format!("arg {} 🍕", i),
        ]);
    }

    let (commands, bin) = compile_rows(&rows, &CompilerConfig::default()).unwrap();
    let (count, decoded) = decode_script(&bin);

    assert_eq!(count as usize, rows.len());
    assert_eq!(decoded, commands);
    for (i, command) in decoded.iter().enumerate() {
        assert_eq!(command.timer, i as i64 * 17 - 100);
        assert_eq!(command.system, format!("system_{}", i));
        assert_eq!(command.argument, format!("arg {} 🍕", i));
    }
}

#[test]
fn test_256_rows_use_the_full_count_field() {
    let rows: Vec<RawRow> = (0..256)
        .map(|i| {
            let mut fields = vec![i.to_string()];
            fields.extend(row(&["sys", "a", "b", "cmd", "arg"]));
            fields
        })
        .collect();

    let (_, bin) = compile_rows(&rows, &CompilerConfig::default()).unwrap();

    // Count field sits right after the magic and version stamp. 256 encodes
    // little-endian as 00 01 00 00: a reader trusting only the low byte
    // would under-read, which is why the full 32-bit value matters.
    let offset = MAGIC.len() + FORMAT_VERSION.len();
    assert_eq!(&bin[offset..offset + 4], &[0x00, 0x01, 0x00, 0x00]);

    let (count, decoded) = decode_script(&bin);
    assert_eq!(count, 256);
    assert_eq!(decoded.len(), 256);
}

#[test]
fn test_bad_row_shape_aborts_the_compile() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("events.csv");
    fs::write(&source, "0,sys,a,b,cmd,arg\n1,sys,a,b,cmd\n").unwrap();

    let err = compile_file(&source, &CompilerConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        ScriptError::RowShape { row: 2, expected: 6, actual: 5 }
    ));

    let seven = dir.path().join("seven.csv");
    fs::write(&seven, "0,sys,a,b,cmd,arg,extra\n").unwrap();
    let err = compile_file(&seven, &CompilerConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        ScriptError::RowShape { row: 1, expected: 6, actual: 7 }
    ));
}

#[test]
fn test_empty_source_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("empty.csv");
    fs::write(&source, "\n\n").unwrap();

    let err = compile_file(&source, &CompilerConfig::default()).unwrap_err();
    assert!(matches!(err, ScriptError::EmptyScript));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("events.txt");
    fs::write(&source, "0,sys,a,b,cmd,arg\n").unwrap();

    let err = compile_file(&source, &CompilerConfig::default()).unwrap_err();
    assert!(matches!(err, ScriptError::UnsupportedFormat(ref ext) if ext == "txt"));
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("nope.csv");

    let err = compile_file(&source, &CompilerConfig::default()).unwrap_err();
    assert!(matches!(err, ScriptError::ReadFailure { .. }));
}

#[test]
fn test_timer_wrap_through_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("events.csv");
    // 2^64 + 1 wraps to 1, 2^63 wraps to i64::MIN
    fs::write(
        &source,
        "18446744073709551617,sys,a,b,cmd,arg\n9223372036854775808,sys,a,b,cmd,arg\n",
    )
    .unwrap();

    let (_, bin) = compile_file(&source, &CompilerConfig::default()).unwrap();
    let (_, decoded) = decode_script(&bin);
    assert_eq!(decoded[0].timer, 1);
    assert_eq!(decoded[1].timer, i64::MIN);
}

#[test]
fn test_json_object_source_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("events.json");
    fs::write(
        &source,
        r#"{
            "boot":  [0, "core", "main", "init", "start", ""],
            "intro": ["150", "audio", "bgm", "main", "play", "intro.ogg"]
        }"#,
    )
    .unwrap();

    let (commands, bin) = compile_file(&source, &CompilerConfig::default()).unwrap();
    let (count, decoded) = decode_script(&bin);

    assert_eq!(count, 2);
    assert_eq!(decoded, commands);
    assert_eq!(decoded[0].system, "core");
    assert_eq!(decoded[1].timer, 150);
    assert_eq!(decoded[1].argument, "intro.ogg");
}

#[test]
fn test_declined_rerun_leaves_output_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("events.csv");
    let out = dir.path().join("events.sdf");
    fs::write(&source, "0,sys,a,b,cmd,arg1\n").unwrap();

    let (_, bin) = compile_file(&source, &CompilerConfig::default()).unwrap();
    write_script(&out, &bin, &FixedAnswer(true)).unwrap();
    let first = fs::read(&out).unwrap();

    let (_, again) = compile_file(&source, &CompilerConfig::default()).unwrap();
    let err = write_script(&out, &again, &FixedAnswer(false)).unwrap_err();
    assert!(matches!(err, ScriptError::OverwriteDeclined(_)));
    assert_eq!(fs::read(&out).unwrap(), first);
}
