//! COPY text format encoder.
//!
//! Encodes [`Value`] rows directly to PostgreSQL COPY text format bytes
//! without intermediate String allocations.

use bytes::BytesMut;
use chrono::SecondsFormat;

use crate::value::Value;

/// Encode a Value directly into COPY text format (no SQL quoting).
/// COPY text format rules:
/// - NULL: `\N`
/// - Boolean: `t` or `f`
/// - Numeric: raw digits (no quotes)
/// - Text/JSON: escape special chars (\\, \t, \n, \r)
/// - Bytea: `\x` hex
/// - UUID: hyphenated lowercase
#[inline]
pub fn encode_value(buf: &mut BytesMut, value: &Value) {
    match value {
        Value::Null => buf.extend_from_slice(b"\\N"),

        Value::Bool(b) => buf.extend_from_slice(if *b { b"t" } else { b"f" }),

        Value::Int(n) => {
            // Zero-alloc integer formatting
            let mut tmp = itoa::Buffer::new();
            buf.extend_from_slice(tmp.format(*n).as_bytes());
        }

        Value::Float(n) => {
            // Zero-alloc float formatting
            let mut tmp = ryu::Buffer::new();
            buf.extend_from_slice(tmp.format(*n).as_bytes());
        }

        Value::Text(s) => escape_text(buf, s.as_bytes()),

        Value::Bytes(bytes) => {
            // PostgreSQL bytea hex format: \x followed by hex digits
            buf.extend_from_slice(b"\\\\x");
            for byte in bytes {
                let hi = byte >> 4;
                let lo = byte & 0x0f;
                buf.extend_from_slice(&[
                    if hi < 10 { b'0' + hi } else { b'a' + hi - 10 },
                    if lo < 10 { b'0' + lo } else { b'a' + lo - 10 },
                ]);
            }
        }

        Value::Uuid(u) => {
            // UUID: 36-char hyphenated lowercase
            let mut uuid_buf = [0u8; 36];
            u.hyphenated().encode_lower(&mut uuid_buf);
            buf.extend_from_slice(&uuid_buf);
        }

        Value::Timestamp(ts) => {
            let formatted = ts.to_rfc3339_opts(SecondsFormat::Micros, true);
            buf.extend_from_slice(formatted.as_bytes());
        }

        Value::Json(json) => {
            // JSON/JSONB as compact text, with COPY escaping applied
            let serialized = json.to_string();
            escape_text(buf, serialized.as_bytes());
        }
    }
}

/// COPY text format: escape backslashes, tabs, newlines.
fn escape_text(buf: &mut BytesMut, bytes: &[u8]) {
    for c in bytes {
        match c {
            b'\\' => buf.extend_from_slice(b"\\\\"),
            b'\t' => buf.extend_from_slice(b"\\t"),
            b'\n' => buf.extend_from_slice(b"\\n"),
            b'\r' => buf.extend_from_slice(b"\\r"),
            _ => buf.extend_from_slice(&[*c]),
        }
    }
}

/// Encode one row as tab-separated fields terminated by a newline.
#[inline]
pub fn encode_row(buf: &mut BytesMut, row: &[Value]) {
    for (i, val) in row.iter().enumerate() {
        if i > 0 {
            buf.extend_from_slice(b"\t");
        }
        encode_value(buf, val);
    }
    buf.extend_from_slice(b"\n");
}

/// Encode a batch of rows into a single COPY data buffer,
/// ready to be sent as one CopyData message.
#[inline]
pub fn encode_batch(rows: &[Vec<Value>]) -> BytesMut {
    // Pre-allocate: estimate ~50 bytes per column, 7 columns avg
    let estimated_size = rows.len() * 7 * 50;
    let mut buf = BytesMut::with_capacity(estimated_size);

    for row in rows {
        encode_row(&mut buf, row);
    }

    buf
}

/// Build the COPY command for a table and column list.
///
/// Identifiers are double-quoted, so mixed-case and reserved names are safe.
pub fn copy_statement(table: &str, columns: &[&str]) -> String {
    let cols = columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    format!("COPY {} ({}) FROM STDIN", quote_ident(table), cols)
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
