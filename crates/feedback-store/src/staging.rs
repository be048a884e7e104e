//! SQLite staging tables, one per source.
//!
//! Tables are append-only: the store offers inserts and reads, nothing
//! that updates or deletes a staged row. `reset_schema` is the only way to
//! clear them and must run before the first insert of a pipeline run.

use std::path::Path;

use feedback_model::{NormalizedRecord, Source, StagedRecord};
use rusqlite::{Connection, params};
use tracing::debug;

use crate::error::{Result, StoreError};

/// Name of the view that concatenates all staging tables.
pub const UNION_VIEW: &str = "staging_union";

pub struct StagingStore {
    conn: Connection,
}

impl StagingStore {
    /// Open (or create) a staging database file.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened staging database");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Drop and recreate the three staging tables and the union view.
    pub fn reset_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(&schema_sql())?;
        debug!("staging schema reset");
        Ok(())
    }

    /// Append one record to `source`'s table, returning its surrogate key.
    pub fn insert(&mut self, source: Source, record: &NormalizedRecord) -> Result<i64> {
        self.conn.execute(&insert_sql(source), params![
            record.customer_id,
            record.rating,
            record.comments,
            record.review_date,
        ])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Append records in one transaction. Returns the number inserted.
    pub fn insert_batch(&mut self, source: Source, records: &[NormalizedRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&insert_sql(source))?;
            for record in records {
                stmt.execute(params![
                    record.customer_id,
                    record.rating,
                    record.comments,
                    record.review_date,
                ])?;
            }
        }
        tx.commit()?;
        debug!(source = %source, rows = records.len(), "staged batch");
        Ok(records.len())
    }

    /// Number of rows staged for `source`.
    pub fn count(&self, source: Source) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", source.table_name());
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// All staged records: tabular first, then structured, then markup,
    /// each in insertion order.
    pub fn unioned_view(&self) -> Result<Vec<StagedRecord>> {
        let sql = format!(
            "SELECT source_rank, id, customer_id, rating, comments, review_date
             FROM {UNION_VIEW} ORDER BY source_rank, id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                NormalizedRecord {
                    customer_id: row.get(2)?,
                    rating: row.get(3)?,
                    comments: row.get(4)?,
                    review_date: row.get(5)?,
                },
            ))
        })?;
        let mut staged = Vec::new();
        for row in rows {
            let (rank, sequence_id, record) = row?;
            let source = Source::from_rank(rank).ok_or(StoreError::UnknownSourceRank(rank))?;
            staged.push(StagedRecord {
                source,
                sequence_id,
                record,
            });
        }
        Ok(staged)
    }

    /// Read-only access for report queries against [`UNION_VIEW`].
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn insert_sql(source: Source) -> String {
    format!(
        "INSERT INTO {} (customer_id, rating, comments, review_date) VALUES (?1, ?2, ?3, ?4)",
        source.table_name()
    )
}

fn schema_sql() -> String {
    let mut sql = format!("DROP VIEW IF EXISTS {UNION_VIEW};\n");
    for source in Source::ALL {
        sql.push_str(&format!("DROP TABLE IF EXISTS {};\n", source.table_name()));
    }
    for source in Source::ALL {
        sql.push_str(&format!(
            "CREATE TABLE {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                customer_id TEXT NOT NULL CHECK (length(trim(customer_id)) > 0),
                rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
                comments TEXT NOT NULL,
                review_date TEXT NOT NULL
            );\n",
            source.table_name()
        ));
    }
    let selects: Vec<String> = Source::ALL
        .iter()
        .map(|source| {
            format!(
                "SELECT {} AS source_rank, id, customer_id, rating, comments, review_date FROM {}",
                source.rank(),
                source.table_name()
            )
        })
        .collect();
    sql.push_str(&format!(
        "CREATE VIEW {UNION_VIEW} AS\n{};\n",
        selects.join("\nUNION ALL\n")
    ));
    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_names_every_table() {
        let sql = schema_sql();
        for source in Source::ALL {
            assert!(sql.contains(&format!("CREATE TABLE {}", source.table_name())));
        }
        assert_eq!(sql.matches("UNION ALL").count(), 2);
    }
}
