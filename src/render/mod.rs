//! SVG preview rendering

mod svg;

pub use svg::{LayerInfo, RenderedDrawing, SvgRenderer};
