//! Conversion orchestration
//!
//! Turns a source drawing file into a cached SVG preview:
//! cache lookup, then format branch (DXF parsed directly, DWG through
//! the external converter chain), then a placeholder when no converter
//! can handle the file.

pub mod cache;
pub mod external;

pub use cache::{CachedRender, RenderCache, DEFAULT_MAX_AGE_DAYS};
pub use external::ExternalConverter;

use crate::error::{PreviewError, Result};
use crate::io::dxf::DxfReader;
use crate::render::{LayerInfo, RenderedDrawing, SvgRenderer};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Placeholder shown when a DWG cannot be converted by any installed
/// tool. Still a successful conversion from the caller's point of view.
const PLACEHOLDER_SVG: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1000 1000" width="1000" height="1000">"#,
    r##"<rect x="0" y="0" width="1000" height="1000" fill="#F5F5F5"/>"##,
    r##"<text x="500" y="500" text-anchor="middle" font-size="40" fill="#808080">Preview unavailable</text>"##,
    "</svg>"
);

/// Orchestrator configuration. All roots are explicit; nothing is read
/// from ambient process state.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Directory holding cached render artifacts
    pub cache_root: PathBuf,
    /// Directory for external converter staging jobs
    pub staging_root: PathBuf,
    /// Deadline for a single external converter run
    pub tool_timeout: Duration,
    /// Explicit primary converter path; probes well-known locations
    /// when unset
    pub tool_path: Option<PathBuf>,
}

impl ConvertConfig {
    /// Create a configuration with the default 30 second tool deadline
    pub fn new(cache_root: impl Into<PathBuf>, staging_root: impl Into<PathBuf>) -> Self {
        ConvertConfig {
            cache_root: cache_root.into(),
            staging_root: staging_root.into(),
            tool_timeout: Duration::from_secs(30),
            tool_path: None,
        }
    }

    /// Set the external tool deadline
    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    /// Set an explicit primary converter path
    pub fn with_tool_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tool_path = Some(path.into());
        self
    }
}

/// Result of a conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutcome {
    /// Rendered SVG markup
    pub svg: String,
    /// Layer list
    pub layers: Vec<LayerInfo>,
    /// `true` when served from the cache without re-rendering
    pub from_cache: bool,
    /// `true` when the SVG is the placeholder
    pub placeholder: bool,
}

/// Drives the conversion pipeline for one configured environment
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConvertConfig,
    cache: RenderCache,
    external: ExternalConverter,
}

impl Converter {
    /// Create a converter
    pub fn new(config: ConvertConfig) -> Self {
        let cache = RenderCache::new(&config.cache_root);
        let external = ExternalConverter::with_tool_path(config.tool_path.clone());
        Converter {
            config,
            cache,
            external,
        }
    }

    /// The underlying cache, for direct janitor access
    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Convert a source drawing into an SVG preview.
    ///
    /// The cache is consulted before the source file is touched, so a
    /// hit is served even when the source has since been removed. On a
    /// miss the file is rendered by extension (`.dxf` parsed directly,
    /// `.dwg` through the external tool chain with a placeholder
    /// fallback) and the result is cached best-effort.
    pub fn convert(&self, source: &Path, document_id: &str) -> Result<ConversionOutcome> {
        if let Some(cached) = self.cache.load(document_id) {
            return Ok(ConversionOutcome {
                svg: cached.svg,
                layers: cached.layers,
                from_cache: true,
                placeholder: cached.placeholder,
            });
        }

        if !source.is_file() {
            return Err(PreviewError::SourceNotFound(source.to_path_buf()));
        }

        let extension = source
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let (rendered, placeholder) = match extension.as_str() {
            "dxf" => (self.render_dxf(source)?, false),
            "dwg" => self.convert_dwg(source)?,
            other => return Err(PreviewError::UnsupportedFormat(other.to_string())),
        };

        // A cache write failure never fails the conversion.
        let cached = CachedRender {
            svg: rendered.svg.clone(),
            layers: rendered.layers.clone(),
            placeholder,
        };
        if let Err(e) = self.cache.store(document_id, &cached) {
            warn!(id = document_id, error = %e, "cache write failed");
        }

        Ok(ConversionOutcome {
            svg: rendered.svg,
            layers: rendered.layers,
            from_cache: false,
            placeholder,
        })
    }

    /// Evict cache artifacts older than the given number of days
    pub fn cleanup_cache(&self, max_age_days: u64) -> Result<usize> {
        self.cache
            .cleanup(Duration::from_secs(max_age_days * 24 * 60 * 60))
    }

    fn render_dxf(&self, path: &Path) -> Result<RenderedDrawing> {
        let document = DxfReader::from_file(path)?.read()?;
        Ok(SvgRenderer::new().render(&document))
    }

    /// DWG branch: external tool chain, placeholder when everything
    /// recoverable has been tried.
    fn convert_dwg(&self, source: &Path) -> Result<(RenderedDrawing, bool)> {
        match self
            .external
            .convert(source, &self.config.staging_root, self.config.tool_timeout)
        {
            Ok(dxf_path) => {
                let result = self.render_dxf(&dxf_path);
                let _ = fs::remove_file(&dxf_path);
                match result {
                    Ok(rendered) => Ok((rendered, false)),
                    Err(e) => {
                        warn!(source = %source.display(), error = %e, "converted DXF unreadable, using placeholder");
                        Ok((placeholder_render(), true))
                    }
                }
            }
            Err(e) if e.is_recoverable() => {
                debug!(source = %source.display(), error = %e, "no converter produced output, using placeholder");
                Ok((placeholder_render(), true))
            }
            Err(e) => Err(e),
        }
    }
}

/// The placeholder preview with its single default layer
fn placeholder_render() -> RenderedDrawing {
    RenderedDrawing {
        svg: PLACEHOLDER_SVG.to_string(),
        layers: vec![LayerInfo {
            name: "0".to_string(),
            color: "#000000".to_string(),
            visible: true,
            line_type: "Continuous".to_string(),
        }],
    }
}
