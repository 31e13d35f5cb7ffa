//! SQLite-backed response cache

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::key::QueryKey;
use crate::error::CacheError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 1;

const DB_FILE: &str = "cache.db";

type Result<T> = std::result::Result<T, CacheError>;

/// Cached GET responses keyed by [`cache_key`](super::cache_key)
pub struct CacheStorage {
    conn: Connection,
}

impl CacheStorage {
    /// Open or create cache storage at the default XDG cache location
    pub fn open() -> Result<Self> {
        let cache_dir = Self::cache_dir()?;
        Self::open_at(&cache_dir)
    }

    /// Default cache directory (~/.cache/aerocast on Linux)
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join("aerocast"))
    }

    pub fn open_at(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let db_path = cache_dir.join(DB_FILE);
        let conn = Connection::open(&db_path)?;

        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Cache schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            std::fs::remove_file(&db_path)
                .map_err(|e| CacheError::Io(format!("Failed to remove cache DB: {}", e)))?;
            return Self::open_at(cache_dir);
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cache_entries (
                cache_key TEXT PRIMARY KEY NOT NULL,
                user_id TEXT,
                scope TEXT NOT NULL,
                query TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                expires_at INTEGER NOT NULL,
                size_bytes INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_expires_at ON cache_entries(expires_at);
            CREATE INDEX IF NOT EXISTS idx_scope ON cache_entries(scope);
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self { conn })
    }

    /// Cached body if still fresh
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = Utc::now().timestamp();

        let data: Option<String> = self
            .conn
            .query_row(
                "SELECT data FROM cache_entries
                 WHERE cache_key = ?1 AND expires_at > ?2",
                params![key, now],
                |row| row.get(0),
            )
            .optional()?;

        Ok(data.map(String::into_bytes))
    }

    /// Store a response body for `ttl`
    pub fn put(
        &self,
        key: &str,
        data: &[u8],
        query: &QueryKey,
        user_id: Option<&str>,
        ttl: Duration,
    ) -> Result<()> {
        let now = Utc::now().timestamp();
        let expires = now + ttl.as_secs() as i64;

        self.conn.execute(
            "INSERT OR REPLACE INTO cache_entries
             (cache_key, user_id, scope, query, data, created_at, expires_at, size_bytes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                key,
                user_id,
                query.scope(),
                query.to_string(),
                String::from_utf8_lossy(data).to_string(),
                now,
                expires,
                data.len()
            ],
        )?;
        Ok(())
    }

    /// Drop every entry of an endpoint family (`bagages`, `meteo`, ...)
    pub fn delete_by_scope(&self, scope: &str) -> Result<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM cache_entries WHERE scope = ?1", params![scope])?;
        Ok(deleted)
    }

    pub fn clear_all(&self) -> Result<ClearStats> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cache_entries", [], |r| r.get(0))?;

        self.conn.execute("DELETE FROM cache_entries", [])?;

        Ok(ClearStats {
            entries_removed: count as usize,
        })
    }

    pub fn stats(&self) -> Result<CacheStats> {
        let now = Utc::now().timestamp();

        let total_entries: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM cache_entries", [], |r| r.get(0))?;

        let valid_entries: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM cache_entries WHERE expires_at > ?1",
            [now],
            |r| r.get(0),
        )?;

        let total_size: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(size_bytes), 0) FROM cache_entries",
            [],
            |r| r.get(0),
        )?;

        let oldest: Option<i64> = self
            .conn
            .query_row(
                "SELECT MIN(created_at) FROM cache_entries WHERE expires_at > ?1",
                [now],
                |r| r.get(0),
            )
            .optional()?
            .flatten();

        let newest: Option<i64> = self
            .conn
            .query_row(
                "SELECT MAX(created_at) FROM cache_entries WHERE expires_at > ?1",
                [now],
                |r| r.get(0),
            )
            .optional()?
            .flatten();

        Ok(CacheStats {
            total_entries: total_entries as usize,
            valid_entries: valid_entries as usize,
            expired_entries: (total_entries - valid_entries) as usize,
            total_size_bytes: total_size as usize,
            oldest_entry: oldest,
            newest_entry: newest,
        })
    }
}

/// Result of a full clear
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

#[derive(Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub total_size_bytes: usize,
    pub oldest_entry: Option<i64>,
    pub newest_entry: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_storage() -> (CacheStorage, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = CacheStorage::open_at(dir.path()).unwrap();
        (storage, dir)
    }

    fn query(scope: &'static str) -> QueryKey {
        QueryKey::new(scope, "list")
    }

    #[test]
    fn test_put_get() {
        let (storage, _dir) = test_storage();
        let data = br#"[{"code":"CDG"}]"#;

        storage
            .put("key1", data, &query("aeroports"), None, Duration::from_secs(60))
            .unwrap();

        assert_eq!(storage.get("key1").unwrap(), Some(data.to_vec()));
        assert_eq!(storage.get("missing").unwrap(), None);
    }

    #[test]
    fn test_expiration() {
        let (storage, _dir) = test_storage();

        storage
            .put("key3", b"data", &query("meteo"), None, Duration::from_secs(0))
            .unwrap();

        assert_eq!(storage.get("key3").unwrap(), None);
        assert_eq!(storage.stats().unwrap().expired_entries, 1);
    }

    #[test]
    fn test_delete_by_scope() {
        let (storage, _dir) = test_storage();
        let ttl = Duration::from_secs(60);

        storage.put("b1", b"1", &query("bagages"), Some("1"), ttl).unwrap();
        storage.put("b2", b"2", &query("bagages"), Some("1"), ttl).unwrap();
        storage.put("m1", b"3", &query("meteo"), Some("1"), ttl).unwrap();

        assert_eq!(storage.delete_by_scope("bagages").unwrap(), 2);
        assert!(storage.get("b1").unwrap().is_none());
        assert!(storage.get("m1").unwrap().is_some());
    }

    #[test]
    fn test_clear_all() {
        let (storage, _dir) = test_storage();
        let ttl = Duration::from_secs(60);

        storage.put("k1", b"d1", &query("qr"), None, ttl).unwrap();
        storage.put("k2", b"d2", &query("qr"), None, ttl).unwrap();

        let stats = storage.clear_all().unwrap();
        assert_eq!(stats.entries_removed, 2);
        assert!(storage.get("k1").unwrap().is_none());
    }

    #[test]
    fn test_stats() {
        let (storage, _dir) = test_storage();
        let ttl = Duration::from_secs(60);

        storage.put("k1", b"data1", &query("admin"), None, ttl).unwrap();
        storage.put("k2", b"data2", &query("admin"), None, ttl).unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.valid_entries, 2);
        assert_eq!(stats.total_size_bytes, 10);
        assert!(stats.oldest_entry.is_some());
    }

    #[test]
    fn test_reopen_keeps_entries() {
        let dir = TempDir::new().unwrap();
        {
            let storage = CacheStorage::open_at(dir.path()).unwrap();
            storage
                .put("k", b"v", &query("auth"), None, Duration::from_secs(60))
                .unwrap();
        }
        let storage = CacheStorage::open_at(dir.path()).unwrap();
        assert_eq!(storage.get("k").unwrap(), Some(b"v".to_vec()));
    }
}
