//! Parameter definitions with physical units and documented semantics.
//!
//! All tuned constants live here with:
//! - Physical units (meters, seconds, Hz, etc.)
//! - Documented ranges and meanings
//! - Type safety where possible

mod audio;
mod director;
mod render;
mod terrain;

// Re-export all types
pub use audio::{audio_constants, FftConfig, SPECTRUM_BINS};
pub use director::DirectorParams;
pub use render::{RecordingConfig, RenderConfig};
pub use terrain::{layer_presets, GridTopology, LayerParams, TerrainParams};
