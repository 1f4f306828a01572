//! Parallax terrain layers: fixed-topology point grids displaced per frame
//! by noise height and audio-band energy.

mod layer;

// Re-export public types
pub use layer::{PointVertex, TerrainLayer};
