//! Rendered-preview cache
//!
//! One JSON artifact per document id, holding the SVG and the layer
//! list together so a cache hit returns exactly what the original
//! render returned.

use crate::error::{PreviewError, Result};
use crate::render::{LayerInfo, RenderedDrawing};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

/// Default janitor retention, in days
pub const DEFAULT_MAX_AGE_DAYS: u64 = 7;

/// Cache artifact payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedRender {
    /// Rendered SVG markup
    pub svg: String,
    /// Layer list as returned by the renderer
    pub layers: Vec<LayerInfo>,
    /// `true` when the artifact holds the placeholder preview, so a
    /// cache hit reports the flag the same way the original render did
    #[serde(default)]
    pub placeholder: bool,
}

impl From<RenderedDrawing> for CachedRender {
    fn from(rendered: RenderedDrawing) -> Self {
        CachedRender {
            svg: rendered.svg,
            layers: rendered.layers,
            placeholder: false,
        }
    }
}

/// File-backed cache of rendered previews, keyed by document id
#[derive(Debug, Clone)]
pub struct RenderCache {
    root: PathBuf,
}

impl RenderCache {
    /// Create a cache rooted at the given directory. The directory is
    /// created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        RenderCache { root: root.into() }
    }

    /// Cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the artifact for a document id
    pub fn artifact_path(&self, document_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(document_id)))
    }

    /// Load a cached render, if present and readable. Unreadable or
    /// unparsable artifacts count as misses.
    pub fn load(&self, document_id: &str) -> Option<CachedRender> {
        let path = self.artifact_path(document_id);
        let bytes = fs::read(&path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(cached) => {
                debug!(id = document_id, "cache hit");
                Some(cached)
            }
            Err(e) => {
                warn!(id = document_id, error = %e, "discarding unreadable cache artifact");
                let _ = fs::remove_file(&path);
                None
            }
        }
    }

    /// Persist a render. Failures are reported as
    /// [`PreviewError::CacheWrite`] so callers can downgrade them.
    pub fn store(&self, document_id: &str, render: &CachedRender) -> Result<()> {
        fs::create_dir_all(&self.root)
            .map_err(|e| PreviewError::CacheWrite(format!("create {}: {}", self.root.display(), e)))?;
        let path = self.artifact_path(document_id);
        let json = serde_json::to_vec(render)
            .map_err(|e| PreviewError::CacheWrite(format!("serialize {}: {}", document_id, e)))?;
        fs::write(&path, json)
            .map_err(|e| PreviewError::CacheWrite(format!("write {}: {}", path.display(), e)))?;
        debug!(id = document_id, path = %path.display(), "cached render");
        Ok(())
    }

    /// Remove artifacts older than `max_age`. Returns the number of
    /// files removed. A missing cache root is an empty cache.
    pub fn cleanup(&self, max_age: Duration) -> Result<usize> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let now = SystemTime::now();
        let mut removed = 0;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let modified = match entry.metadata().and_then(|m| m.modified()) {
                Ok(t) => t,
                Err(_) => continue,
            };
            let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
            if age > max_age {
                match fs::remove_file(&path) {
                    Ok(()) => removed += 1,
                    Err(e) => warn!(path = %path.display(), error = %e, "failed to evict cache artifact"),
                }
            }
        }

        if removed > 0 {
            debug!(removed, "cache janitor evicted artifacts");
        }
        Ok(removed)
    }

    /// [`RenderCache::cleanup`] with the default retention
    pub fn cleanup_default(&self) -> Result<usize> {
        self.cleanup(Duration::from_secs(DEFAULT_MAX_AGE_DAYS * 24 * 60 * 60))
    }
}

/// Reduce a document id to a safe file name: anything outside
/// `[A-Za-z0-9._-]` becomes `_`. The replacement is lossy, so whenever
/// it fires a hash of the raw id is appended; distinct ids that
/// sanitize to the same text keep distinct artifacts.
fn sanitize_key(id: &str) -> String {
    let mut changed = false;
    let mut key: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                changed = true;
                '_'
            }
        })
        .collect();

    if changed {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        key.push_str(&format!("-{:016x}", hasher.finish()));
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_key_passthrough() {
        assert_eq!(sanitize_key("doc-123.dwg"), "doc-123.dwg");
    }

    #[test]
    fn test_sanitize_key_disambiguates() {
        let key = sanitize_key("a/b\\c:d");
        assert!(key.starts_with("a_b_c_d-"));
        // A replaced id never collides with the literal sanitized text.
        assert_ne!(key, sanitize_key("a_b_c_d"));
        // Ids that replace to the same text stay distinct.
        assert_ne!(sanitize_key("план.dwg"), sanitize_key("стол.dwg"));
    }

    #[test]
    fn test_artifact_path() {
        let cache = RenderCache::new("/tmp/previews");
        assert_eq!(
            cache.artifact_path("doc-17"),
            PathBuf::from("/tmp/previews/doc-17.json")
        );
    }
}
