//! PostgreSQL implementation of the index store.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use tracing::trace;

use taxon_core::{Error, IndexEntry, IndexStore, Result, SortKey, TermCount};

/// PostgreSQL implementation of IndexStore, backed by `taxonomy_entry`.
#[derive(Clone)]
pub struct PgIndexStore {
    pool: Pool<Postgres>,
}

impl PgIndexStore {
    /// Create a new PgIndexStore with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn entry_from_row(row: &PgRow) -> IndexEntry {
    IndexEntry {
        index: row.get("index_name"),
        term: row.get("term"),
        location: row.get("location"),
        sort_key: SortKey::from_stored(row.get::<String, _>("sort_key")),
    }
}

#[async_trait]
impl IndexStore for PgIndexStore {
    async fn save(
        &self,
        index: &str,
        location: &str,
        term: &str,
        sort_key: &SortKey,
    ) -> Result<()> {
        // The WHERE clause keeps an unchanged row untouched, including its
        // updated_at_utc.
        sqlx::query(
            r#"
            INSERT INTO taxonomy_entry (index_name, term, location, sort_key, updated_at_utc)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (index_name, term, location) DO UPDATE
                SET sort_key = EXCLUDED.sort_key,
                    updated_at_utc = EXCLUDED.updated_at_utc
                WHERE taxonomy_entry.sort_key IS DISTINCT FROM EXCLUDED.sort_key
            "#,
        )
        .bind(index)
        .bind(term)
        .bind(location)
        .bind(sort_key.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        trace!(
            subsystem = "db",
            component = "entries",
            op = "save",
            taxonomy = index,
            term,
            location,
            "Saved index entry"
        );
        Ok(())
    }

    async fn delete(&self, entry: &IndexEntry) -> Result<()> {
        sqlx::query(
            "DELETE FROM taxonomy_entry WHERE index_name = $1 AND term = $2 AND location = $3",
        )
        .bind(&entry.index)
        .bind(&entry.term)
        .bind(&entry.location)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }

    async fn entries_for_location(&self, index: &str, location: &str) -> Result<Vec<IndexEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT index_name, term, location, sort_key
            FROM taxonomy_entry
            WHERE index_name = $1 AND location = $2
            ORDER BY sort_key DESC, term COLLATE "C" ASC
            "#,
        )
        .bind(index)
        .bind(location)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(entry_from_row).collect())
    }

    async fn entries_for_term(&self, index: &str, term: &str) -> Result<Vec<IndexEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT index_name, term, location, sort_key
            FROM taxonomy_entry
            WHERE index_name = $1 AND term = $2
            ORDER BY sort_key DESC, location COLLATE "C" ASC
            "#,
        )
        .bind(index)
        .bind(term)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(entry_from_row).collect())
    }

    async fn list_distinct_values(&self, index: &str) -> Result<Vec<TermCount>> {
        let rows = sqlx::query(
            r#"
            SELECT term, COUNT(*) AS entry_count, MAX(sort_key) AS newest
            FROM taxonomy_entry
            WHERE index_name = $1
            GROUP BY term
            ORDER BY newest DESC, term COLLATE "C" ASC
            "#,
        )
        .bind(index)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|row| TermCount {
                term: row.get("term"),
                count: row.get::<i64, _>("entry_count").max(0) as usize,
            })
            .collect())
    }

    async fn delete_location(&self, index: &str, location: &str) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM taxonomy_entry WHERE index_name = $1 AND location = $2")
                .bind(index)
                .bind(location)
                .execute(&self.pool)
                .await
                .map_err(Error::Database)?;
        Ok(result.rows_affected())
    }
}
