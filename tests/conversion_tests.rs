//! Integration tests for the conversion pipeline and cache

use cadpreview::convert::{CachedRender, ConvertConfig, Converter, RenderCache};
use cadpreview::PreviewError;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

const SIMPLE_DXF: &str = concat!(
    "0\nSECTION\n2\nTABLES\n",
    "0\nTABLE\n2\nLAYER\n",
    "0\nLAYER\n2\nWalls\n62\n1\n",
    "0\nENDTAB\n0\nENDSEC\n",
    "0\nSECTION\n2\nENTITIES\n",
    "0\nLINE\n8\nWalls\n10\n0\n20\n0\n11\n10\n21\n10\n",
    "0\nCIRCLE\n10\n5\n20\n5\n40\n2\n",
    "0\nENDSEC\n0\nEOF\n"
);

fn test_converter(root: &TempDir) -> Converter {
    let cache_root = root.path().join("cache");
    let staging_root = root.path().join("staging");
    Converter::new(ConvertConfig::new(cache_root, staging_root))
}

#[test]
fn test_dxf_conversion_and_cache_round_trip() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("plan.dxf");
    fs::write(&source, SIMPLE_DXF).unwrap();

    let converter = test_converter(&root);

    let first = converter.convert(&source, "plan-1").unwrap();
    assert!(!first.from_cache);
    assert!(!first.placeholder);
    assert!(first.svg.contains("<line"));
    assert!(first.layers.iter().any(|l| l.name == "Walls"));

    // Second call is served from the cache, byte for byte.
    let second = converter.convert(&source, "plan-1").unwrap();
    assert!(second.from_cache);
    assert_eq!(second.svg, first.svg);
    assert_eq!(second.layers, first.layers);
}

#[test]
fn test_missing_source_without_cached_artifact() {
    let root = TempDir::new().unwrap();
    let converter = test_converter(&root);

    let missing = root.path().join("gone.dxf");
    let err = converter.convert(&missing, "gone-1").unwrap_err();
    assert!(matches!(err, PreviewError::SourceNotFound(_)));
}

#[test]
fn test_cache_hit_served_after_source_removed() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("plan.dxf");
    fs::write(&source, SIMPLE_DXF).unwrap();

    let converter = test_converter(&root);
    let first = converter.convert(&source, "plan-3").unwrap();

    // The cache is consulted before the source is touched.
    fs::remove_file(&source).unwrap();
    let second = converter.convert(&source, "plan-3").unwrap();
    assert!(second.from_cache);
    assert_eq!(second.svg, first.svg);
}

#[test]
fn test_unsupported_extension() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("model.step");
    fs::write(&source, "not a drawing").unwrap();

    let converter = test_converter(&root);
    let err = converter.convert(&source, "step-1").unwrap_err();
    assert!(matches!(err, PreviewError::UnsupportedFormat(ref ext) if ext == "step"));
}

#[test]
fn test_unconvertible_dwg_yields_placeholder() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("broken.dwg");
    fs::write(&source, b"\x00\x01 not really a dwg").unwrap();

    // Point the primary tool at a path that cannot exist so the chain
    // exhausts quickly regardless of what is installed.
    let config = ConvertConfig::new(root.path().join("cache"), root.path().join("staging"))
        .with_tool_path(root.path().join("no-such-tool"))
        .with_tool_timeout(Duration::from_secs(5));
    let converter = Converter::new(config);

    let outcome = converter.convert(&source, "broken-1").unwrap();
    assert!(outcome.placeholder);
    assert!(outcome.svg.contains("Preview unavailable"));
    assert_eq!(outcome.layers.len(), 1);
    assert_eq!(outcome.layers[0].name, "0");

    // The flag survives the cache boundary.
    let cached = converter.convert(&source, "broken-1").unwrap();
    assert!(cached.from_cache);
    assert!(cached.placeholder);
}

#[test]
fn test_corrupted_cache_artifact_is_a_miss() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("plan.dxf");
    fs::write(&source, SIMPLE_DXF).unwrap();

    let converter = test_converter(&root);
    converter.convert(&source, "plan-2").unwrap();

    // Clobber the stored artifact with invalid JSON.
    let artifact = converter.cache().artifact_path("plan-2");
    fs::write(&artifact, "{ not json").unwrap();

    let outcome = converter.convert(&source, "plan-2").unwrap();
    assert!(!outcome.from_cache);
    assert!(outcome.svg.contains("<line"));
}

#[test]
fn test_cache_key_sanitization() {
    let root = TempDir::new().unwrap();
    let cache = RenderCache::new(root.path());

    let rendered = CachedRender {
        svg: "<svg/>".to_string(),
        layers: Vec::new(),
        placeholder: false,
    };
    cache.store("../escape/../../attempt", &rendered).unwrap();

    // Artifact lands inside the cache root under a sanitized name.
    let artifact = cache.artifact_path("../escape/../../attempt");
    assert!(artifact.starts_with(root.path()));
    assert!(artifact.is_file());
    assert!(cache.load("../escape/../../attempt").is_some());
}

#[test]
fn test_cleanup_evicts_old_artifacts() {
    let root = TempDir::new().unwrap();
    let cache = RenderCache::new(root.path());

    let rendered = CachedRender {
        svg: "<svg/>".to_string(),
        layers: Vec::new(),
        placeholder: false,
    };
    cache.store("old-doc", &rendered).unwrap();
    std::thread::sleep(Duration::from_millis(20));

    // Zero max age makes everything written before this instant stale.
    let removed = cache.cleanup(Duration::ZERO).unwrap();
    assert_eq!(removed, 1);
    assert!(cache.load("old-doc").is_none());

    // Second sweep finds nothing.
    assert_eq!(cache.cleanup(Duration::ZERO).unwrap(), 0);
}

#[test]
fn test_cleanup_with_missing_root_is_a_no_op() {
    let root = TempDir::new().unwrap();
    let cache = RenderCache::new(root.path().join("never-created"));
    assert_eq!(cache.cleanup(Duration::from_secs(60)).unwrap(), 0);
}

#[test]
fn test_fresh_artifacts_survive_cleanup() {
    let root = TempDir::new().unwrap();
    let cache = RenderCache::new(root.path());

    let rendered = CachedRender {
        svg: "<svg/>".to_string(),
        layers: Vec::new(),
        placeholder: false,
    };
    cache.store("fresh-doc", &rendered).unwrap();

    let removed = cache.cleanup(Duration::from_secs(3600)).unwrap();
    assert_eq!(removed, 0);
    assert!(cache.load("fresh-doc").is_some());
}
