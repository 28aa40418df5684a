//! Record-to-cursor adapter.
//!
//! Presents an in-memory sequence of [`Record`]s as a read-only, forward-only
//! tabular cursor so the bulk driver can drain it row by row without
//! materializing an intermediate table.

use crate::error::{FerryError, FerryResult};
use crate::record::Record;
use crate::value::Value;

/// A forward-only cursor over a sequence of records.
///
/// The schema is discovered from the record type; each call to [`advance`]
/// moves to the next element of the underlying sequence.
///
/// [`advance`]: RecordCursor::advance
pub struct RecordCursor<T, I> {
    iter: I,
    current: Option<T>,
    position: usize,
    started: bool,
}

impl<T, I> RecordCursor<T, I>
where
    T: Record,
    I: Iterator<Item = T>,
{
    /// Wrap a sequence of records in a cursor.
    pub fn new(records: impl IntoIterator<Item = T, IntoIter = I>) -> Self {
        Self {
            iter: records.into_iter(),
            current: None,
            position: 0,
            started: false,
        }
    }

    /// Column names of the cursor's fixed schema.
    pub fn columns(&self) -> &'static [&'static str] {
        T::columns()
    }

    /// Number of fields per row.
    pub fn field_count(&self) -> usize {
        T::columns().len()
    }

    /// Move to the next row. Returns false once the sequence is exhausted.
    pub fn advance(&mut self) -> bool {
        if self.started && self.current.is_some() {
            self.position += 1;
        }
        self.started = true;
        self.current = self.iter.next();
        self.current.is_some()
    }

    /// Zero-based index of the current row.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Value of one field of the current row.
    ///
    /// Errors if the cursor has no current row (before the first `advance`
    /// or after the end) or if the field index is out of range.
    pub fn value(&self, field: usize) -> FerryResult<Value> {
        let record = self.current.as_ref().ok_or(FerryError::NoCurrentRow)?;
        let count = self.field_count();
        if field >= count {
            return Err(FerryError::FieldOutOfRange {
                index: field,
                count,
            });
        }
        Ok(record.value(field))
    }

    /// All field values of the current row, in column order.
    pub fn row(&self) -> FerryResult<Vec<Value>> {
        let record = self.current.as_ref().ok_or(FerryError::NoCurrentRow)?;
        Ok(record.values())
    }
}

impl<T, I> Iterator for RecordCursor<T, I>
where
    T: Record,
    I: Iterator<Item = T>,
{
    type Item = Vec<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            self.current.as_ref().map(Record::values)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Event {
        id: i64,
        kind: &'static str,
    }

    impl Record for Event {
        fn columns() -> &'static [&'static str] {
            &["id", "kind"]
        }

        fn value(&self, field: usize) -> Value {
            match field {
                0 => self.id.into(),
                1 => self.kind.into(),
                _ => Value::Null,
            }
        }
    }

    fn events() -> Vec<Event> {
        vec![
            Event { id: 1, kind: "open" },
            Event { id: 2, kind: "close" },
        ]
    }

    #[test]
    fn test_schema_from_record_type() {
        let cursor = RecordCursor::new(events());
        assert_eq!(cursor.columns(), &["id", "kind"]);
        assert_eq!(cursor.field_count(), 2);
    }

    #[test]
    fn test_value_before_advance_is_error() {
        let cursor = RecordCursor::new(events());
        assert!(matches!(cursor.value(0), Err(FerryError::NoCurrentRow)));
    }

    #[test]
    fn test_walk_rows() {
        let mut cursor = RecordCursor::new(events());

        assert!(cursor.advance());
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.value(0).unwrap(), Value::Int(1));
        assert_eq!(cursor.value(1).unwrap(), Value::Text("open".to_string()));

        assert!(cursor.advance());
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.value(0).unwrap(), Value::Int(2));

        assert!(!cursor.advance());
        assert!(matches!(cursor.value(0), Err(FerryError::NoCurrentRow)));
    }

    #[test]
    fn test_field_out_of_range() {
        let mut cursor = RecordCursor::new(events());
        cursor.advance();
        assert!(matches!(
            cursor.value(5),
            Err(FerryError::FieldOutOfRange { index: 5, count: 2 })
        ));
    }

    #[test]
    fn test_empty_sequence() {
        let mut cursor = RecordCursor::new(Vec::<Event>::new());
        assert!(!cursor.advance());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_iterator_drains_all_rows() {
        let rows: Vec<Vec<Value>> = RecordCursor::new(events()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Value::Int(1));
        assert_eq!(rows[1][1], Value::Text("close".to_string()));
    }
}
