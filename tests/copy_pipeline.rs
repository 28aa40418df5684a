//! End-to-end tests for the record-to-COPY pipeline, up to the bytes that
//! would be handed to the server.

use chrono::{TimeZone, Utc};
use pgferry::chunk::chunked;
use pgferry::copy::{copy_statement, encode_batch};
use pgferry::cursor::RecordCursor;
use pgferry::{Record, Value};
use pretty_assertions::assert_eq;
use uuid::Uuid;

struct Measurement {
    id: Uuid,
    sensor: String,
    reading: Option<f64>,
    taken_at: chrono::DateTime<Utc>,
}

impl Record for Measurement {
    fn columns() -> &'static [&'static str] {
        &["id", "sensor", "reading", "taken_at"]
    }

    fn value(&self, field: usize) -> Value {
        match field {
            0 => self.id.into(),
            1 => self.sensor.as_str().into(),
            2 => self.reading.into(),
            3 => self.taken_at.into(),
            _ => Value::Null,
        }
    }
}

fn sample() -> Vec<Measurement> {
    vec![
        Measurement {
            id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap(),
            sensor: "roof\teast".to_string(),
            reading: Some(21.5),
            taken_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        },
        Measurement {
            id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap(),
            sensor: "basement".to_string(),
            reading: None,
            taken_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 6).unwrap(),
        },
    ]
}

#[test]
fn copy_statement_uses_record_schema() {
    assert_eq!(
        copy_statement("measurements", Measurement::columns()),
        r#"COPY "measurements" ("id", "sensor", "reading", "taken_at") FROM STDIN"#
    );
}

#[test]
fn cursor_feeds_encoder_with_escaped_text_and_nulls() -> anyhow::Result<()> {
    let rows: Vec<Vec<Value>> = RecordCursor::new(sample()).collect();
    let buf = encode_batch(&rows);
    let text = std::str::from_utf8(&buf)?;

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "550e8400-e29b-41d4-a716-446655440000\troof\\teast\t21.5\t2024-01-02T03:04:05.000000Z"
    );
    assert_eq!(
        lines[1],
        "550e8400-e29b-41d4-a716-446655440001\tbasement\t\\N\t2024-01-02T03:04:06.000000Z"
    );
    Ok(())
}

#[test]
fn batching_preserves_row_order_and_counts() {
    let big: Vec<Measurement> = (0..5)
        .map(|i| Measurement {
            id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap(),
            sensor: format!("s{i}"),
            reading: Some(i as f64),
            taken_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        })
        .collect();

    let cursor = RecordCursor::new(big);
    let batches: Vec<Vec<Vec<Value>>> = chunked(cursor, 2).collect();

    assert_eq!(batches.len(), 3);
    assert_eq!(batches[0].len(), 2);
    assert_eq!(batches[2].len(), 1);
    assert_eq!(batches[0][0][1], Value::Text("s0".to_string()));
    assert_eq!(batches[2][0][1], Value::Text("s4".to_string()));
}

#[test]
fn empty_sequence_produces_no_copy_data() {
    let cursor = RecordCursor::new(Vec::<Measurement>::new());
    let rows: Vec<Vec<Value>> = cursor.collect();
    assert!(rows.is_empty());
    assert!(encode_batch(&rows).is_empty());
}
