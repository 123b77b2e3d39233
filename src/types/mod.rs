//! Core geometric and color types

pub mod bounds;
pub mod color;
pub mod transform;
pub mod vector;

pub use bounds::{BoundingBox2D, BoundsTracker};
pub use color::{aci_to_hex, Color, DEFAULT_ACI, DEFAULT_HEX};
pub use transform::Transform2;
pub use vector::Vector2;
