use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::ScriptError,
    types::{RawRow, ScriptCommand, FIELDS_PER_ROW, TEXT_FIELD_NAMES},
    utils::quote,
};

lazy_static! {
    static ref INTEGER: Regex = Regex::new(r"^-?\d+$").unwrap();
}

/// Convert raw rows into typed commands, preserving order. The fold
/// short-circuits on the first bad row; rows are 1-indexed in messages.
/// Producing zero commands is itself an error, so an empty script file is
/// never written.
pub fn validate_rows(rows: &[RawRow]) -> Result<Vec<ScriptCommand>, ScriptError> {
    let mut commands = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        commands.push(validate_row(i + 1, row)?);
    }
    if commands.is_empty() {
        return Err(ScriptError::EmptyScript);
    }
    Ok(commands)
}

fn validate_row(row_index: usize, row: &RawRow) -> Result<ScriptCommand, ScriptError> {
    if row.len() != FIELDS_PER_ROW {
        return Err(ScriptError::RowShape {
            row:      row_index,
            expected: FIELDS_PER_ROW,
            actual:   row.len(),
        });
    }

    let timer = parse_timer(row_index, &row[0])?;

    for (name, value) in TEXT_FIELD_NAMES.into_iter().zip(&row[1..]) {
        if value.contains('\0') {
            return Err(ScriptError::InvalidFieldContent {
                row:   row_index,
                field: name,
            });
        }
    }

    Ok(ScriptCommand {
        timer,
        system:   row[1].clone(),
        to:       row[2].clone(),
        from:     row[3].clone(),
        command:  row[4].clone(),
        argument: row[5].clone(),
    })
}

/// Interpret the timer field as a signed 64-bit integer. Literals beyond the
/// `i64` range are not rejected: the decimal value is reduced modulo 2^64 and
/// reinterpreted as signed, a plain two's-complement wrap.
fn parse_timer(row_index: usize, text: &str) -> Result<i64, ScriptError> {
    let trimmed = text.trim();
    if !INTEGER.is_match(trimmed) {
        return Err(ScriptError::ParseFailure(format!(
            "row {}: invalid timer value {}",
            row_index,
            quote(trimmed)
        )));
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let mut value: u64 = 0;
    for digit in digits.bytes() {
        value = value
            .wrapping_mul(10)
            .wrapping_add(u64::from(digit - b'0'));
    }

    Ok(if negative {
        (value as i64).wrapping_neg()
    } else {
        value as i64
    })
}
