//! Bucket and entry operations on the SQLite store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite::{self, OptionalExtension};

use super::connection::CacheDb;
use super::key::{RequestKey, is_valid_hash};
use super::store::{CacheStore, CachedResponse};
use crate::Error;

/// Entry counts for one bucket.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct BucketSummary {
    pub name: String,
    pub entries: u64,
    /// Sum of stored body sizes.
    pub bytes: u64,
    pub created_at: String,
}

/// Metadata of a stored entry, without its body.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct EntryInfo {
    pub bucket: String,
    pub hash: String,
    pub method: String,
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body_len: u64,
    pub stored_at: String,
}

impl CacheDb {
    /// List every bucket with its entry count and stored size.
    pub async fn list_buckets(&self) -> Result<Vec<BucketSummary>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<BucketSummary>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT b.name, b.created_at, COUNT(e.hash), COALESCE(SUM(LENGTH(e.body)), 0)
                     FROM buckets b LEFT JOIN entries e ON e.bucket = b.name
                     GROUP BY b.name
                     ORDER BY b.created_at, b.name",
                )?;
                let rows = stmt.query_map([], |row| {
                    Ok(BucketSummary {
                        name: row.get(0)?,
                        created_at: row.get(1)?,
                        entries: row.get::<_, i64>(2)? as u64,
                        bytes: row.get::<_, i64>(3)? as u64,
                    })
                })?;
                Ok(rows.collect::<Result<Vec<_>, rusqlite::Error>>()?)
            })
            .await
            .map_err(Error::from)
    }

    /// Find every entry stored under `hash`, across buckets.
    pub async fn entries_by_hash(&self, hash: &str) -> Result<Vec<EntryInfo>, Error> {
        if !is_valid_hash(hash) {
            return Err(Error::InvalidHash);
        }
        let hash = hash.to_ascii_lowercase();
        self.conn
            .call(move |conn| -> Result<Vec<EntryInfo>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT bucket, hash, method, url, status, headers_json, LENGTH(body), stored_at
                     FROM entries WHERE hash = ?1 ORDER BY bucket",
                )?;
                let rows = stmt.query_map(params![hash], |row| {
                    Ok((
                        EntryInfo {
                            bucket: row.get(0)?,
                            hash: row.get(1)?,
                            method: row.get(2)?,
                            url: row.get(3)?,
                            status: row.get(4)?,
                            content_type: None,
                            body_len: row.get::<_, i64>(6)? as u64,
                            stored_at: row.get(7)?,
                        },
                        row.get::<_, String>(5)?,
                    ))
                })?;

                let mut entries = Vec::new();
                for row in rows {
                    let (mut info, headers_json) = row?;
                    let headers: Vec<(String, String)> = serde_json::from_str(&headers_json)?;
                    info.content_type = headers
                        .into_iter()
                        .find(|(n, _)| n.eq_ignore_ascii_case("content-type"))
                        .map(|(_, v)| v);
                    entries.push(info);
                }
                Ok(entries)
            })
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl CacheStore for CacheDb {
    async fn lookup(&self, bucket: &str, key: &RequestKey) -> Result<Option<CachedResponse>, Error> {
        let bucket = bucket.to_string();
        let hash = key.hash.clone();
        self.conn
            .call(move |conn| -> Result<Option<CachedResponse>, Error> {
                let row = conn
                    .query_row(
                        "SELECT response_url, status, headers_json, body, stored_at
                         FROM entries WHERE bucket = ?1 AND hash = ?2",
                        params![bucket, hash],
                        |row| {
                            Ok((
                                row.get::<_, String>(0)?,
                                row.get::<_, u16>(1)?,
                                row.get::<_, String>(2)?,
                                row.get::<_, Vec<u8>>(3)?,
                                row.get::<_, String>(4)?,
                            ))
                        },
                    )
                    .optional()?;

                match row {
                    Some((url, status, headers_json, body, stored_at)) => {
                        let headers = serde_json::from_str(&headers_json)?;
                        Ok(Some(CachedResponse { url, status, headers, body, stored_at }))
                    }
                    None => Ok(None),
                }
            })
            .await
            .map_err(Error::from)
    }

    async fn store(&self, bucket: &str, key: &RequestKey, response: &CachedResponse) -> Result<(), Error> {
        let bucket = bucket.to_string();
        let key = key.clone();
        let response = response.clone();
        let headers_json = serde_json::to_string(&response.headers)?;
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.transaction()?;
                tx.execute(
                    "INSERT OR IGNORE INTO buckets (name, created_at) VALUES (?1, ?2)",
                    params![&bucket, chrono::Utc::now().to_rfc3339()],
                )?;
                tx.execute(
                    "INSERT INTO entries (
                        bucket, hash, method, url, vary, status, headers_json, body, response_url, stored_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                    ON CONFLICT(bucket, hash) DO UPDATE SET
                        method = excluded.method,
                        url = excluded.url,
                        vary = excluded.vary,
                        status = excluded.status,
                        headers_json = excluded.headers_json,
                        body = excluded.body,
                        response_url = excluded.response_url,
                        stored_at = excluded.stored_at",
                    params![
                        &bucket,
                        &key.hash,
                        &key.method,
                        &key.url,
                        &key.vary,
                        response.status,
                        &headers_json,
                        &response.body,
                        &response.url,
                        &response.stored_at,
                    ],
                )?;
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    async fn bucket_names(&self) -> Result<Vec<String>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<String>, Error> {
                let mut stmt = conn.prepare("SELECT name FROM buckets ORDER BY created_at, name")?;
                let names = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<String>, rusqlite::Error>>()?;
                Ok(names)
            })
            .await
            .map_err(Error::from)
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<bool, Error> {
        let bucket = bucket.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                // entries go with the bucket through ON DELETE CASCADE
                let deleted = conn.execute("DELETE FROM buckets WHERE name = ?1", params![bucket])?;
                Ok(deleted > 0)
            })
            .await
            .map_err(Error::from)
    }
}
