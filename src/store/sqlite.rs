use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use rusqlite_migration::{Migrations, M};

use crate::app::{OolongError, Result};
use crate::domain::Article;
use crate::store::ArticleStore;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.lock()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|_| OolongError::Database(rusqlite::Error::InvalidQuery))?;

        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            OolongError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| s.parse::<DateTime<Utc>>().ok())
    }
}

impl ArticleStore for SqliteStore {
    fn count(&self) -> Result<i64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
        Ok(count)
    }

    fn list_recent(&self, limit: i64) -> Result<Vec<Article>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT id, url, title, summary, source, ingested_at
             FROM articles ORDER BY ingested_at DESC, id DESC LIMIT ?1",
        )?;

        let articles = stmt
            .query_map(params![limit], |row| {
                Ok(Article {
                    id: row.get(0)?,
                    url: row.get(1)?,
                    title: row.get(2)?,
                    summary: row.get(3)?,
                    source: row.get(4)?,
                    ingested_at: row
                        .get::<_, String>(5)
                        .ok()
                        .and_then(|s| Self::parse_datetime(&s))
                        .unwrap_or_else(Utc::now),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(articles)
    }

    fn all_urls(&self) -> Result<HashSet<String>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare("SELECT url FROM articles")?;
        let urls = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<HashSet<_>, _>>()?;

        Ok(urls)
    }

    fn insert_many(&self, articles: &[Article]) -> Result<usize> {
        let mut conn = self.lock()?;

        let tx = conn.transaction()?;
        let mut count = 0;

        for article in articles {
            let inserted = tx.execute(
                "INSERT OR IGNORE INTO articles (url, title, summary, source, ingested_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    article.url,
                    article.title,
                    article.summary,
                    article.source,
                    article.ingested_at.to_rfc3339()
                ],
            )?;
            count += inserted;
        }

        tx.commit()?;
        Ok(count)
    }

    fn delete_oldest(&self, count: i64) -> Result<()> {
        // SQLite reads LIMIT -1 as "no limit", which would turn a negative
        // count into a full-table delete.
        if count < 0 {
            return Err(OolongError::Invariant(format!(
                "delete_oldest({}) is not a valid row count",
                count
            )));
        }
        if count == 0 {
            return Ok(());
        }

        let mut conn = self.lock()?;

        let tx = conn.transaction()?;

        // Defensive check: the engine never asks for more than exist, but a
        // bug upstream must not drain the table.
        let total: i64 = tx.query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
        if count > total {
            return Err(OolongError::Invariant(format!(
                "delete_oldest({}) exceeds current total {}",
                count, total
            )));
        }

        tx.execute(
            "DELETE FROM articles WHERE id IN
             (SELECT id FROM articles ORDER BY ingested_at ASC, id ASC LIMIT ?1)",
            params![count],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM articles", [])?;
        Ok(())
    }
}
