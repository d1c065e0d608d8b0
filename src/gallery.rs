//! File-system gallery of saved icons.
//!
//! A gallery directory holds one pretty-printed document per icon plus a
//! `manifest.json` array describing them in save order.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PixiconError, Result};
use crate::models::Document;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Name used when a save does not provide one.
pub const DEFAULT_ENTRY_NAME: &str = "Untitled";

/// One manifest record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntry {
    pub id: String,
    pub name: String,
    pub file: String,
    pub created_at: DateTime<Utc>,
}

/// A gallery rooted at a directory. Nothing touches the disk until the first
/// read or write.
#[derive(Debug, Clone)]
pub struct Gallery {
    dir: PathBuf,
}

impl Gallery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }

    /// Current entries. A missing or unreadable manifest is an empty gallery.
    pub fn list(&self) -> Vec<GalleryEntry> {
        self.read_manifest().unwrap_or_else(|e| {
            tracing::warn!(path = %self.manifest_path().display(), error = %e, "ignoring unreadable gallery manifest");
            Vec::new()
        })
    }

    /// The manifest as stored. Only a missing file counts as empty.
    fn read_manifest(&self) -> Result<Vec<GalleryEntry>> {
        let path = self.manifest_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(e, &path)),
        };
        serde_json::from_str(&raw).map_err(|e| PixiconError::malformed(path.display().to_string(), e))
    }

    /// Store `document` under a fresh id and record it in the manifest.
    pub fn save(&self, document: &Document, name: Option<&str>) -> Result<GalleryEntry> {
        let name = name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_ENTRY_NAME);
        let created_at = Utc::now();
        let id = generate_id(created_at);
        let file = format!("{id}.json");
        let mut manifest = self.read_manifest()?;

        fs::create_dir_all(&self.dir).map_err(|e| io_error(e, &self.dir))?;
        write_json(&self.dir.join(&file), document)?;

        let entry = GalleryEntry { id, name: name.to_string(), file, created_at };
        manifest.push(entry.clone());
        write_json(&self.manifest_path(), &manifest)?;

        tracing::debug!(id = %entry.id, name = %entry.name, "saved gallery entry");
        Ok(entry)
    }

    /// Read a saved document back.
    pub fn load(&self, id: &str) -> Result<Document> {
        let entry = self.find(id)?;
        let path = self.dir.join(&entry.file);
        let raw = fs::read_to_string(&path).map_err(|e| io_error(e, &path))?;
        Document::from_json(&raw)
    }

    /// Drop an entry from the manifest and delete its file if still present.
    pub fn remove(&self, id: &str) -> Result<GalleryEntry> {
        let manifest = self.read_manifest()?;
        let entry = manifest.iter().find(|e| e.id == id).cloned().ok_or_else(|| PixiconError::NotFound(id.to_string()))?;
        let path = self.dir.join(&entry.file);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| io_error(e, &path))?;
        }

        let manifest: Vec<GalleryEntry> = manifest.into_iter().filter(|e| e.id != id).collect();
        write_json(&self.manifest_path(), &manifest)?;

        tracing::debug!(id, "removed gallery entry");
        Ok(entry)
    }

    fn find(&self, id: &str) -> Result<GalleryEntry> {
        self.read_manifest()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| PixiconError::NotFound(id.to_string()))
    }
}

/// Base-36 milliseconds followed by four random base-36 digits.
pub fn generate_id(at: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let millis = u64::try_from(at.timestamp_millis()).unwrap_or(0);
    let mut id = to_base36(millis);
    for _ in 0..4 {
        let digit = rng.gen_range(0..36u32);
        id.push(char::from_digit(digit, 36).unwrap_or('0'));
    }
    id
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(char::from_digit((n % 36) as u32, 36).unwrap_or('0'));
        n /= 36;
    }
    digits.iter().rev().collect()
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value).map_err(|e| PixiconError::malformed(path.display().to_string(), e))?;
    text.push('\n');
    fs::write(path, text).map_err(|e| io_error(e, path))
}

fn io_error(e: std::io::Error, path: &Path) -> PixiconError {
    PixiconError::Io { message: e.to_string(), path: path.display().to_string() }
}
