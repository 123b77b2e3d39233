//! Diagnostic tool: convert a drawing file and print the SVG to stdout.
//!
//! Usage:
//!   cargo run --bin render_preview -- <file.dxf|file.dwg> [cache_dir]

use anyhow::{bail, Context};
use cadpreview::convert::{ConvertConfig, Converter};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: render_preview <file.dxf|file.dwg> [cache_dir]");
        std::process::exit(2);
    }

    let source = PathBuf::from(&args[1]);
    let cache_root = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);
    let staging_root = std::env::temp_dir();

    let document_id = match source.file_stem() {
        Some(stem) => stem.to_string_lossy().to_string(),
        None => bail!("source path has no file name: {}", source.display()),
    };

    let converter = Converter::new(ConvertConfig::new(cache_root, staging_root));
    let outcome = converter
        .convert(&source, &document_id)
        .with_context(|| format!("converting {}", source.display()))?;

    eprintln!(
        "layers: {}, from_cache: {}, placeholder: {}",
        outcome.layers.len(),
        outcome.from_cache,
        outcome.placeholder
    );
    for layer in &outcome.layers {
        eprintln!("  {} {} visible={}", layer.name, layer.color, layer.visible);
    }

    println!("{}", outcome.svg);
    Ok(())
}
