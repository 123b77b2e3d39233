//! DXF text format reading

mod entity_reader;
pub mod pair;
mod reader;

pub use pair::{CodePair, PairReader};
pub use reader::{parse_str, DxfReader};
