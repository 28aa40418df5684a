//! Connection helper and bulk-insert driver.
//!
//! [`Db`] wraps a sqlx `PgPool` with command execution, query helpers, and
//! `copy_records`, which streams a sequence of [`Record`]s into the server's
//! COPY protocol without materializing an intermediate table.

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgPool, PgPoolCopyExt, PgPoolOptions, PgRow};
use tracing::{debug, info};

use crate::chunk::chunked;
use crate::copy;
use crate::cursor::RecordCursor;
use crate::error::{FerryError, FerryResult};
use crate::record::Record;

fn default_batch_size() -> usize {
    1000
}

/// Tuning knobs for bulk loads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CopyOptions {
    /// Rows per CopyData message sent to the server.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

/// A database handle for executing commands and bulk loads.
#[derive(Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    /// Connect to a PostgreSQL database using a connection URL.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let db = Db::connect("postgres://localhost/mydb").await?;
    /// ```
    pub async fn connect(url: &str) -> FerryResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| FerryError::Connection(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Execute a command (INSERT, UPDATE, DELETE, DDL).
    /// Returns the number of affected rows.
    pub async fn execute(&self, sql: &str) -> FerryResult<u64> {
        let result = sqlx::query(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| FerryError::Execution(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// Fetch all rows of a query.
    pub async fn fetch_all(&self, sql: &str) -> FerryResult<Vec<PgRow>> {
        sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| FerryError::Execution(e.to_string()))
    }

    /// Fetch a single row of a query.
    pub async fn fetch_one(&self, sql: &str) -> FerryResult<PgRow> {
        sqlx::query(sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| FerryError::Execution(e.to_string()))
    }

    /// Close the underlying pool and wait for connections to shut down.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Bulk-load a sequence of records into a table with default options.
    ///
    /// Returns the number of rows the server reports as copied.
    pub async fn copy_records<T, I>(&self, table: &str, records: I) -> FerryResult<u64>
    where
        T: Record,
        I: IntoIterator<Item = T>,
    {
        self.copy_records_with(table, records, CopyOptions::default())
            .await
    }

    /// Bulk-load a sequence of records into a table.
    ///
    /// The record type's column list determines the COPY target columns.
    /// Rows are encoded in COPY text format and sent in batches of
    /// `options.batch_size`. On any send failure the COPY is aborted and the
    /// server discards the in-flight data.
    pub async fn copy_records_with<T, I>(
        &self,
        table: &str,
        records: I,
        options: CopyOptions,
    ) -> FerryResult<u64>
    where
        T: Record,
        I: IntoIterator<Item = T>,
    {
        let statement = copy::copy_statement(table, T::columns());
        let cursor = RecordCursor::new(records);

        let mut copy_in = self
            .pool
            .copy_in_raw(&statement)
            .await
            .map_err(|e| FerryError::Copy(e.to_string()))?;

        let mut sent: u64 = 0;
        for batch in chunked(cursor, options.batch_size) {
            let buf = copy::encode_batch(&batch);
            if let Err(e) = copy_in.send(&buf[..]).await {
                let _ = copy_in.abort("batch send failed").await;
                return Err(FerryError::Copy(e.to_string()));
            }
            sent += batch.len() as u64;
            debug!(table, rows = sent, "copy batch sent");
        }

        let copied = copy_in
            .finish()
            .await
            .map_err(|e| FerryError::Copy(e.to_string()))?;
        info!(table, rows = copied, "bulk copy complete");

        Ok(copied)
    }
}

/// Open a connection, execute one command, and close the connection no
/// matter how execution went.
pub async fn execute_once(url: &str, sql: &str) -> FerryResult<u64> {
    let db = Db::connect(url).await?;
    let result = db.execute(sql).await;
    db.close().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_options_default() {
        assert_eq!(CopyOptions::default().batch_size, 1000);
    }

    #[test]
    fn test_copy_options_deserialize_empty() {
        let opts: CopyOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.batch_size, 1000);
    }
}
