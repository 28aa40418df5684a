//! Safe row reader.
//!
//! Maps column names to ordinal positions once per result set, then serves
//! typed and nullable-typed getters without per-call name scans and without
//! panicking on NULL or unknown columns.

use std::collections::HashMap;

use sqlx::postgres::PgRow;
use sqlx::{Column, Row, TypeInfo};

use crate::error::{FerryError, FerryResult};

/// Name-to-ordinal index over one result set's columns.
///
/// Build it from the first row; every identically-shaped row of the result
/// set can then be read through it.
pub struct RowReader {
    ordinals: HashMap<String, usize>,
    names: Vec<String>,
}

impl RowReader {
    /// Build the reader from a row's column metadata.
    pub fn new(row: &PgRow) -> Self {
        let names: Vec<String> = row.columns().iter().map(|c| c.name().to_string()).collect();
        let ordinals = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { ordinals, names }
    }

    /// Column names in result-set order.
    pub fn columns(&self) -> &[String] {
        &self.names
    }

    /// Ordinal position of a column, or an error naming what is available.
    pub fn ordinal(&self, name: &str) -> FerryResult<usize> {
        self.ordinals
            .get(name)
            .copied()
            .ok_or_else(|| FerryError::unknown_column(name, self.names.clone()))
    }

    /// Typed getter. Decoding NULL into a non-optional type is an error,
    /// not a panic.
    pub fn get<'r, T>(&self, row: &'r PgRow, name: &str) -> FerryResult<T>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
    {
        let idx = self.ordinal(name)?;
        row.try_get::<T, _>(idx)
            .map_err(|e| FerryError::decode(name, e))
    }

    /// Nullable-typed getter: NULL comes back as `None`.
    pub fn get_opt<'r, T>(&self, row: &'r PgRow, name: &str) -> FerryResult<Option<T>>
    where
        Option<T>: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
    {
        let idx = self.ordinal(name)?;
        row.try_get::<Option<T>, _>(idx)
            .map_err(|e| FerryError::decode(name, e))
    }
}

/// Convert a whole row to a name-keyed map for dynamic consumers.
pub fn row_to_map(row: &PgRow) -> HashMap<String, serde_json::Value> {
    let mut map = HashMap::new();

    for (i, column) in row.columns().iter().enumerate() {
        let name = column.name().to_string();
        let type_name = column.type_info().name();

        let value: serde_json::Value = match type_name {
            "BOOL" => row
                .try_get::<bool, _>(i)
                .map(serde_json::Value::Bool)
                .unwrap_or(serde_json::Value::Null),
            "INT2" => row
                .try_get::<i16, _>(i)
                .map(|v| serde_json::Value::Number(v.into()))
                .unwrap_or(serde_json::Value::Null),
            "INT4" => row
                .try_get::<i32, _>(i)
                .map(|v| serde_json::Value::Number(v.into()))
                .unwrap_or(serde_json::Value::Null),
            "INT8" => row
                .try_get::<i64, _>(i)
                .map(|v| serde_json::Value::Number(v.into()))
                .unwrap_or(serde_json::Value::Null),
            "FLOAT4" => row
                .try_get::<f32, _>(i)
                .ok()
                .and_then(|v| serde_json::Number::from_f64(v as f64))
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            "FLOAT8" => row
                .try_get::<f64, _>(i)
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            "UUID" => row
                .try_get::<uuid::Uuid, _>(i)
                .map(|v| serde_json::Value::String(v.to_string()))
                .unwrap_or(serde_json::Value::Null),
            "JSON" | "JSONB" => row
                .try_get::<serde_json::Value, _>(i)
                .unwrap_or(serde_json::Value::Null),
            _ => row
                .try_get::<String, _>(i)
                .map(serde_json::Value::String)
                .unwrap_or(serde_json::Value::Null),
        };

        map.insert(name, value);
    }

    map
}
