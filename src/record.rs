//! The bulk-loadable record trait.

use crate::value::Value;

/// Trait for types whose fields can be streamed into a bulk COPY load.
///
/// Implement this trait on your structs to describe which fields are
/// bulk-loadable and how each one maps to a [`Value`]:
/// ```ignore
/// impl Record for User {
///     fn columns() -> &'static [&'static str] {
///         &["id", "name", "email"]
///     }
///
///     fn value(&self, field: usize) -> Value {
///         match field {
///             0 => self.id.into(),
///             1 => self.name.as_str().into(),
///             2 => self.email.clone().into(),
///             _ => Value::Null,
///         }
///     }
/// }
///
/// // Then use:
/// let copied = db.copy_records("users", users).await?;
/// ```
pub trait Record {
    /// Return the column names this record maps to, in field order.
    /// The list is fixed per type: every instance exposes the same schema.
    fn columns() -> &'static [&'static str];

    /// Return the value of one field. Indices match the order returned
    /// by `columns()`.
    fn value(&self, field: usize) -> Value;

    /// Return all field values in column order.
    fn values(&self) -> Vec<Value> {
        (0..Self::columns().len()).map(|i| self.value(i)).collect()
    }
}
