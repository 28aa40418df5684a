//! # pgferry — typed reads and streaming COPY loads for PostgreSQL
//!
//! A convenience layer over [sqlx]: read query results through a safe row
//! reader instead of repetitive null checks, and stream in-memory records
//! into `COPY ... FROM STDIN` by presenting them as a tabular cursor.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use pgferry::prelude::*;
//!
//! struct User {
//!     id: i64,
//!     email: String,
//! }
//!
//! impl Record for User {
//!     fn columns() -> &'static [&'static str] {
//!         &["id", "email"]
//!     }
//!
//!     fn value(&self, field: usize) -> Value {
//!         match field {
//!             0 => self.id.into(),
//!             1 => self.email.as_str().into(),
//!             _ => Value::Null,
//!         }
//!     }
//! }
//!
//! let db = Db::connect("postgres://localhost/mydb").await?;
//! let copied = db.copy_records("users", users).await?;
//!
//! let rows = db.fetch_all("SELECT id, email FROM users").await?;
//! let reader = RowReader::new(&rows[0]);
//! for row in &rows {
//!     let id: i64 = reader.get(row, "id")?;
//!     let email: Option<String> = reader.get_opt(row, "email")?;
//! }
//! ```
//!
//! [sqlx]: https://docs.rs/sqlx

pub mod chunk;
pub mod copy;
pub mod cursor;
pub mod db;
pub mod error;
pub mod reader;
pub mod record;
pub mod value;

pub mod prelude {
    pub use crate::chunk::chunked;
    pub use crate::cursor::RecordCursor;
    pub use crate::db::{execute_once, CopyOptions, Db};
    pub use crate::error::{FerryError, FerryResult};
    pub use crate::reader::{row_to_map, RowReader};
    pub use crate::record::Record;
    pub use crate::value::Value;
}

pub use db::Db;
pub use error::{FerryError, FerryResult};
pub use record::Record;
pub use value::Value;
