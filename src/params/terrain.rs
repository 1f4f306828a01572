//! Terrain layer identity, grid topology, and displacement tuning.

use super::audio::SPECTRUM_BINS;

/// Fixed planar grid topology for a terrain layer (constant for the layer's
/// lifetime)
#[derive(Debug, Clone)]
pub struct GridTopology {
    /// Grid width in world units (meters, along X)
    pub width_m: f32,

    /// Grid depth in world units (meters, along Z)
    pub depth_m: f32,

    /// Subdivisions along X (points per row = segments + 1)
    pub width_segments: usize,

    /// Subdivisions along Z (rows = segments + 1)
    pub depth_segments: usize,
}

impl Default for GridTopology {
    fn default() -> Self {
        Self {
            width_m: 280.0, // Wide world for broad camera movement range
            depth_m: 120.0,
            width_segments: 300, // Dense enough for fine particle packing
            depth_segments: 100,
        }
    }
}

impl GridTopology {
    /// Total number of grid points
    pub fn point_count(&self) -> usize {
        (self.width_segments + 1) * (self.depth_segments + 1)
    }
}

/// Static identity of one terrain layer, fixed at scene setup
#[derive(Debug, Clone)]
pub struct LayerParams {
    /// Depth placement of the layer in the scene (meters, negative = far)
    pub z_offset_m: f32,

    /// Point color (linear RGB)
    pub color: [f32; 3],

    /// Scroll-speed multiplier; larger scrolls faster, reading as closer
    pub speed_multiplier: f32,

    /// Half-open frequency-bin sub-range `[lo, hi)` this layer reacts to
    pub freq_range: (usize, usize),

    /// Point opacity in (0, 1]
    pub opacity: f32,

    /// Grid topology (shared default across the preset stack)
    pub grid: GridTopology,
}

/// Displacement and masking tuning shared by all layers
#[derive(Debug, Clone)]
pub struct TerrainParams {
    /// Audio displacement height scale (meters per unit magnitude)
    /// Formula: displacement = bin_value * this_scale * band_intensity
    pub audio_height_scale_m: f32,

    /// Half-width of the flattened center corridor (meters)
    pub valley_half_width_m: f32,

    /// Height multiplier applied inside the corridor
    pub valley_flatten: f32,

    /// Vertical drop of every layer below the world origin (meters)
    pub base_y_m: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            audio_height_scale_m: 12.0,
            valley_half_width_m: 8.0,
            valley_flatten: 0.3,
            base_y_m: -10.0,
        }
    }
}

fn rgb(r: u8, g: u8, b: u8) -> [f32; 3] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

/// The six-layer parallax stack, ordered far background to foreground.
///
/// Far layers react to low bins and scroll slowly; near layers cover wider,
/// higher bin ranges and scroll fast. Draw order follows this ordering.
pub fn layer_presets() -> Vec<LayerParams> {
    let grid = GridTopology::default();

    vec![
        // Distant background: deep ink
        LayerParams {
            z_offset_m: -70.0,
            color: rgb(0x08, 0x18, 0x20),
            speed_multiplier: 0.1,
            freq_range: (0, 5),
            opacity: 0.4,
            grid: grid.clone(),
        },
        // Mid background: dark teal
        LayerParams {
            z_offset_m: -45.0,
            color: rgb(0x0f, 0x2c, 0x36),
            speed_multiplier: 0.2,
            freq_range: (0, 10),
            opacity: 0.5,
            grid: grid.clone(),
        },
        // Mid ground
        LayerParams {
            z_offset_m: -25.0,
            color: rgb(0x1a, 0x53, 0x5c),
            speed_multiplier: 0.3,
            freq_range: (5, 15),
            opacity: 0.6,
            grid: grid.clone(),
        },
        // Focus layer: vibrant teal
        LayerParams {
            z_offset_m: -10.0,
            color: rgb(0x2c, 0x7a, 0x7b),
            speed_multiplier: 0.4,
            freq_range: (10, 30),
            opacity: 0.8,
            grid: grid.clone(),
        },
        // Foreground: bright cyan
        LayerParams {
            z_offset_m: 10.0,
            color: rgb(0x38, 0xb2, 0xac),
            speed_multiplier: 0.5,
            freq_range: (20, 60),
            opacity: 0.7,
            grid: grid.clone(),
        },
        // Close details: gold highlights
        LayerParams {
            z_offset_m: 25.0,
            color: rgb(0xd6, 0x9e, 0x2e),
            speed_multiplier: 0.7,
            freq_range: (40, 120),
            opacity: 0.9,
            grid,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_point_count() {
        let grid = GridTopology::default();
        assert_eq!(grid.point_count(), 301 * 101);
    }

    #[test]
    fn test_layer_presets_are_valid() {
        let presets = layer_presets();
        assert_eq!(presets.len(), 6);

        for layer in &presets {
            let (lo, hi) = layer.freq_range;
            assert!(lo < hi, "empty frequency range");
            assert!(hi <= SPECTRUM_BINS, "range exceeds spectrum");
            assert!(layer.opacity > 0.0 && layer.opacity <= 1.0);
            assert!(layer.speed_multiplier > 0.0);
        }
    }

    #[test]
    fn test_layer_presets_ordered_back_to_front() {
        let presets = layer_presets();

        for pair in presets.windows(2) {
            assert!(pair[0].z_offset_m < pair[1].z_offset_m);
            assert!(pair[0].speed_multiplier <= pair[1].speed_multiplier);
        }
    }
}
