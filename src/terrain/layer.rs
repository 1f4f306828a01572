//! One terrain layer: immutable base grid plus a per-frame displaced point
//! buffer.

use bytemuck::{Pod, Zeroable};

use crate::audio::AudioFeatureSnapshot;
use crate::noise::NoiseField;
use crate::params::{LayerParams, TerrainParams};

/// Vertex data for a layer point cloud
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
}

/// One procedurally displaced planar point grid at a fixed depth offset.
///
/// The base x/z grid is computed once at creation and never changes; only
/// the y coordinate of each point is rewritten per frame. Every layer reads
/// the same scroll offset within a frame, scaled by its own multiplier, so
/// layers with larger multipliers scroll faster and read as closer.
pub struct TerrainLayer {
    pub params: LayerParams,
    base_xz: Vec<[f32; 2]>,
    vertices: Vec<PointVertex>,
}

impl TerrainLayer {
    /// Create a layer from its static parameters
    pub fn new(params: LayerParams) -> Self {
        let grid = &params.grid;
        let mut base_xz = Vec::with_capacity(grid.point_count());
        let mut vertices = Vec::with_capacity(grid.point_count());

        // Flat XZ plane grid centered on the origin
        for z_idx in 0..=grid.depth_segments {
            for x_idx in 0..=grid.width_segments {
                let x = x_idx as f32 / grid.width_segments as f32 * grid.width_m
                    - grid.width_m / 2.0;
                let z = z_idx as f32 / grid.depth_segments as f32 * grid.depth_m
                    - grid.depth_m / 2.0;

                base_xz.push([x, z]);
                vertices.push(PointVertex {
                    position: [x, 0.0, z],
                });
            }
        }

        Self {
            params,
            base_xz,
            vertices,
        }
    }

    /// Recompute every point's height for the current frame.
    ///
    /// Per point: scroll the base z through noise space by this layer's
    /// speed multiplier, take the composed terrain height, add the
    /// audio displacement for the bin this x maps to, then flatten the
    /// center corridor.
    pub fn update(
        &mut self,
        scroll_offset: f32,
        snapshot: &AudioFeatureSnapshot,
        noise: &NoiseField,
        terrain: &TerrainParams,
    ) {
        let (lo, hi) = self.params.freq_range;
        let intensity = band_intensity(&snapshot.spectrum, self.params.freq_range);
        let width = self.params.grid.width_m;
        let scrolled = scroll_offset * self.params.speed_multiplier;

        for (base, vertex) in self.base_xz.iter().zip(self.vertices.iter_mut()) {
            let [x, z] = *base;

            let noise_z = z + scrolled;
            let height = noise.terrain_height(x, noise_z);

            // Map x across the grid onto this layer's bin sub-range
            let bin = bin_for_x(x, width, lo, hi);
            let audio_value = snapshot.spectrum.get(bin).copied().unwrap_or(0.0);
            let displacement = audio_value * terrain.audio_height_scale_m * intensity;

            let mask = valley_mask(x, terrain);
            vertex.position[1] = (height + displacement) * mask;
        }
    }

    /// Current point buffer (post-update heights)
    pub fn vertices(&self) -> &[PointVertex] {
        &self.vertices
    }

    /// Number of points in the layer
    pub fn point_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Normalized average magnitude over a half-open bin sub-range.
///
/// Bins past the end of the spectrum read as zero; an empty range reads as
/// zero intensity.
fn band_intensity(spectrum: &[f32], (lo, hi): (usize, usize)) -> f32 {
    if hi <= lo {
        return 0.0;
    }
    let end = hi.min(spectrum.len());
    let start = lo.min(end);
    let sum: f32 = spectrum[start..end].iter().sum();
    sum / (hi - lo) as f32
}

/// Map a point's x position linearly across [-width/2, +width/2] onto a bin
/// index within [lo, hi)
fn bin_for_x(x: f32, width: f32, lo: usize, hi: usize) -> usize {
    let t = (x + width / 2.0) / width;
    lo + (t * (hi - lo) as f32).floor().max(0.0) as usize
}

/// Center-corridor flattening: full height outside, scaled down inside
fn valley_mask(x: f32, terrain: &TerrainParams) -> f32 {
    if x.abs() < terrain.valley_half_width_m {
        terrain.valley_flatten
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::layer_presets;

    fn test_layer(speed_multiplier: f32) -> TerrainLayer {
        let mut params = layer_presets().remove(3);
        params.speed_multiplier = speed_multiplier;
        TerrainLayer::new(params)
    }

    #[test]
    fn test_layer_point_count_matches_topology() {
        let layer = test_layer(0.4);
        assert_eq!(layer.point_count(), layer.params.grid.point_count());
    }

    #[test]
    fn test_silence_leaves_only_masked_base_height() {
        let noise = NoiseField::new(42);
        let terrain = TerrainParams::default();
        let mut layer = test_layer(0.4);

        layer.update(12.5, &AudioFeatureSnapshot::silent(), &noise, &terrain);

        for (base, vertex) in layer.base_xz.iter().zip(layer.vertices.iter()) {
            let [x, z] = *base;
            let noise_z = z + 12.5 * 0.4;
            let expected = noise.terrain_height(x, noise_z) * valley_mask(x, &terrain);
            assert!((vertex.position[1] - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_parallax_layers_diverge_by_multiplier() {
        let noise = NoiseField::new(42);
        let terrain = TerrainParams::default();
        let silent = AudioFeatureSnapshot::silent();

        let mut slow = test_layer(0.2);
        let mut fast = test_layer(0.4);
        slow.update(50.0, &silent, &noise, &terrain);
        fast.update(50.0, &silent, &noise, &terrain);

        // Same base grid, but the fast layer samples noise twice as far
        // along z for the same shared scroll value
        let i = 200; // a point outside the valley corridor
        let [x, z] = slow.base_xz[i];
        assert!(x.abs() >= terrain.valley_half_width_m);

        let expected_slow = noise.terrain_height(x, z + 50.0 * 0.2);
        let expected_fast = noise.terrain_height(x, z + 50.0 * 0.4);
        assert!((slow.vertices[i].position[1] - expected_slow).abs() < 1e-5);
        assert!((fast.vertices[i].position[1] - expected_fast).abs() < 1e-5);
    }

    #[test]
    fn test_valley_mask_boundary() {
        let terrain = TerrainParams::default();

        assert_eq!(valley_mask(7.99, &terrain), 0.3);
        assert_eq!(valley_mask(-7.99, &terrain), 0.3);
        assert_eq!(valley_mask(8.01, &terrain), 1.0);
        assert_eq!(valley_mask(-8.01, &terrain), 1.0);
    }

    #[test]
    fn test_band_intensity_empty_range_is_zero() {
        let spectrum = vec![1.0; 256];
        assert_eq!(band_intensity(&spectrum, (10, 10)), 0.0);
    }

    #[test]
    fn test_band_intensity_missing_bins_read_as_zero() {
        let spectrum = vec![1.0; 8];

        // Half the range lies past the data, so the average halves
        assert!((band_intensity(&spectrum, (0, 16)) - 0.5).abs() < 1e-6);
        assert_eq!(band_intensity(&spectrum, (100, 120)), 0.0);
    }

    #[test]
    fn test_bin_for_x_spans_range() {
        let width = 280.0;

        assert_eq!(bin_for_x(-140.0, width, 20, 60), 20);
        assert_eq!(bin_for_x(0.0, width, 20, 60), 40);
        // Right edge maps one past the range; the lookup reads it as zero
        assert_eq!(bin_for_x(140.0, width, 20, 60), 60);
    }

    #[test]
    fn test_audio_displacement_raises_unmasked_points() {
        let noise = NoiseField::new(42);
        let terrain = TerrainParams::default();
        let mut layer = test_layer(0.4);

        let mut snapshot = AudioFeatureSnapshot::silent();
        for bin in snapshot.spectrum.iter_mut() {
            *bin = 1.0;
        }
        layer.update(0.0, &snapshot, &noise, &terrain);

        let i = 200;
        let [x, z] = layer.base_xz[i];
        assert!(x.abs() >= terrain.valley_half_width_m);

        // Full-scale spectrum: intensity 1, bin value 1
        let expected = noise.terrain_height(x, z) + terrain.audio_height_scale_m;
        assert!((layer.vertices[i].position[1] - expected).abs() < 1e-4);
    }

    #[test]
    fn test_short_spectrum_does_not_panic() {
        let noise = NoiseField::new(42);
        let terrain = TerrainParams::default();
        let mut layer = test_layer(0.7);

        let mut snapshot = AudioFeatureSnapshot::silent();
        snapshot.spectrum.truncate(16);
        layer.update(3.0, &snapshot, &noise, &terrain);
    }
}
