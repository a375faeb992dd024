//! On-disk cache of fetched pages, one file per URL.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// File-backed page cache with optional time-to-live expiration.
///
/// Entries are raw response bodies. Expired entries are lazily removed on
/// the next `get` call for that key. Without a TTL entries never expire.
pub struct DiskCache {
    dir: PathBuf,
    ttl: Option<Duration>,
}

impl DiskCache {
    /// Creates a cache rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>, ttl: Option<Duration>) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the cached body for `key`, or `None` if missing, expired or unreadable.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        if self.is_expired(&path) {
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!("Failed to evict {}: {}", path.display(), e);
            }
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(body) => Some(body),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Inserts or overwrites a cache entry.
    ///
    /// The body is written to a hidden sibling file and renamed into place,
    /// so an interrupted write never leaves a truncated entry behind.
    pub fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.entry_path(key);
        let tmp = temp_path(&path);
        let result = write_synced(&tmp, value.as_bytes()).and_then(|()| fs::rename(&tmp, &path));
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    /// Removes all entries from the cache.
    pub fn clear(&self) -> io::Result<()> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "html") {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    fn is_expired(&self, path: &Path) -> bool {
        let Some(ttl) = self.ttl else {
            return false;
        };
        let modified = match fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => return false,
        };
        SystemTime::now()
            .duration_since(modified)
            .map(|age| age > ttl)
            .unwrap_or(false)
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.html", file_stem(key)))
    }
}

fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Maps a URL onto a readable file name: scheme dropped, every character
/// outside `[A-Za-z0-9.-]` replaced by `_`.
fn file_stem(key: &str) -> String {
    let without_scheme = key.split_once("://").map(|(_, rest)| rest).unwrap_or(key);
    without_scheme
        .trim_end_matches('/')
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
