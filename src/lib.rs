//! # cadpreview
//!
//! A pure Rust library for rendering CAD drawings as layered SVG
//! previews.
//!
//! DXF files are parsed directly; binary DWG files are handed to an
//! installed external converter (ODA File Converter, or LibreDWG's
//! `dwg2dxf`) and the resulting DXF is rendered. Rendered previews are
//! cached on disk by document id.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cadpreview::convert::{ConvertConfig, Converter};
//! use std::path::Path;
//!
//! let converter = Converter::new(ConvertConfig::new("/var/cache/previews", "/tmp/staging"));
//! let outcome = converter.convert(Path::new("plan.dxf"), "plan-17")?;
//! println!("{} layers, cached: {}", outcome.layers.len(), outcome.from_cache);
//! # Ok::<(), cadpreview::error::PreviewError>(())
//! ```
//!
//! ## Architecture
//!
//! - `io::dxf` - group-code level DXF text parsing into a
//!   [`document::DrawingDocument`]
//! - `render` - SVG generation with layer metadata
//! - `convert` - cache, external tool chain, and orchestration
//! - `tables` / `entities` / `types` - the drawing data model

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod convert;
pub mod document;
pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod render;
pub mod tables;
pub mod types;

// Re-export commonly used types
pub use error::{PreviewError, Result};
pub use types::{BoundingBox2D, BoundsTracker, Color, Transform2, Vector2};

// Re-export entity types
pub use entities::{Entity, EntityKind};

// Re-export table types
pub use tables::{Block, Layer, Table, TableEntry};

// Re-export document and pipeline surfaces
pub use convert::{ConversionOutcome, ConvertConfig, Converter};
pub use document::DrawingDocument;
pub use io::dxf::DxfReader;
pub use render::{LayerInfo, RenderedDrawing, SvgRenderer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_document_creation() {
        let doc = DrawingDocument::new();
        assert!(doc.layers.contains("0"));
        assert!(doc.entities.is_empty());
    }
}
