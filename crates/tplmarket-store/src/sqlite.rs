use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use tplmarket_types::{SavedSet, Template};

use crate::Result;
use crate::remote::{RemoteStore, UserRecord};

/// SQLite-backed relational store.
///
/// Timestamps are stored as RFC 3339 text, the saved-template array as a
/// JSON-encoded text column. The connection sits behind a mutex because the
/// sync worker shares the store across threads.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    pub fn init_schema(&self) -> Result<()> {
        let conn = self.lock();
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS templates (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                canva_url TEXT NOT NULL,
                category TEXT NOT NULL,
                format TEXT NOT NULL,
                image_url TEXT,
                language TEXT NOT NULL,
                popularity INTEGER NOT NULL DEFAULT 0,
                saved_count INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                saved_templates TEXT NOT NULL DEFAULT '[]'
            );

            CREATE INDEX IF NOT EXISTS idx_templates_created ON templates(created_at DESC);
            "#,
        )?;

        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        // A poisoned lock means another store call panicked mid-statement;
        // the connection itself is still usable.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn template_from_row(row: &Row<'_>) -> rusqlite::Result<Template> {
    let format_raw: String = row.get(4)?;
    let format = format_raw.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let created_raw: String = row.get(9)?;
    let created_at = DateTime::parse_from_rfc3339(&created_raw)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
        })?
        .with_timezone(&Utc);

    Ok(Template {
        id: row.get(0)?,
        title: row.get(1)?,
        canva_url: row.get(2)?,
        category: row.get(3)?,
        format,
        image_url: row.get(5)?,
        language: row.get(6)?,
        popularity: row.get::<_, i64>(7)? as u32,
        saved_count: row.get::<_, i64>(8)? as u32,
        created_at,
    })
}

const TEMPLATE_COLUMNS: &str =
    "id, title, canva_url, category, format, image_url, language, popularity, saved_count, created_at";

impl RemoteStore for SqliteStore {
    fn list_templates(&self) -> Result<Vec<Template>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM templates ORDER BY created_at DESC, id",
            TEMPLATE_COLUMNS
        ))?;

        let rows = stmt.query_map([], template_from_row)?;

        let mut templates = Vec::new();
        for row in rows {
            templates.push(row?);
        }
        Ok(templates)
    }

    fn get_template(&self, id: &str) -> Result<Option<Template>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM templates WHERE id = ?1",
            TEMPLATE_COLUMNS
        ))?;

        let found = stmt.query_row([id], template_from_row).optional()?;
        Ok(found)
    }

    fn insert_templates(&self, templates: &[Template]) -> Result<usize> {
        let conn = self.lock();
        let mut inserted = 0;
        for template in templates {
            conn.execute(
                r#"
                INSERT INTO templates
                    (id, title, canva_url, category, format, image_url, language,
                     popularity, saved_count, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                ON CONFLICT(id) DO UPDATE SET
                    title = ?2,
                    canva_url = ?3,
                    category = ?4,
                    format = ?5,
                    image_url = ?6,
                    language = ?7,
                    popularity = ?8,
                    saved_count = ?9,
                    created_at = ?10
                "#,
                params![
                    &template.id,
                    &template.title,
                    &template.canva_url,
                    &template.category,
                    template.format.to_string(),
                    &template.image_url,
                    &template.language,
                    template.popularity as i64,
                    template.saved_count as i64,
                    template.created_at.to_rfc3339(),
                ],
            )?;
            inserted += 1;
        }
        Ok(inserted)
    }

    fn delete_all_templates(&self) -> Result<usize> {
        let conn = self.lock();
        let deleted = conn.execute("DELETE FROM templates", [])?;
        Ok(deleted)
    }

    fn set_template_saved_count(&self, id: &str, saved_count: u32) -> Result<()> {
        let conn = self.lock();
        conn.execute(
            "UPDATE templates SET saved_count = ?2 WHERE id = ?1",
            params![id, saved_count as i64],
        )?;
        Ok(())
    }

    fn get_user(&self, id: &str) -> Result<Option<UserRecord>> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT id, saved_templates FROM users WHERE id = ?1")?;

        let found = stmt
            .query_row([id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .optional()?;

        match found {
            Some((id, raw)) => {
                let saved_templates: SavedSet = serde_json::from_str(&raw)?;
                Ok(Some(UserRecord {
                    id,
                    saved_templates,
                }))
            }
            None => Ok(None),
        }
    }

    fn upsert_user(&self, user: &UserRecord) -> Result<()> {
        let raw = serde_json::to_string(&user.saved_templates)?;
        let conn = self.lock();
        conn.execute(
            r#"
            INSERT INTO users (id, saved_templates)
            VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                saved_templates = ?2
            "#,
            params![&user.id, raw],
        )?;
        Ok(())
    }
}
