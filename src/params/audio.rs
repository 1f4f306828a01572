//! Audio analysis configuration and constants.

use std::ops::Range;

/// Number of magnitude bins published per snapshot (fft_size / 2)
pub const SPECTRUM_BINS: usize = 256;

/// FFT analysis configuration with frequency band mappings
#[derive(Debug, Clone)]
pub struct FftConfig {
    /// Audio sample rate (Hz)
    pub sample_rate_hz: usize,

    /// FFT window size (must be power of 2); 512 gives 256 usable bins
    pub fft_size: usize,

    /// Analysis pass interval (milliseconds); 50 = 20 Hz update rate
    pub update_interval_ms: u64,

    /// Bass bin sub-range, half-open (~0-250 Hz at 44.1 kHz / 512)
    pub bass_bins: (usize, usize),

    /// Mid bin sub-range (~250-2000 Hz)
    pub mid_bins: (usize, usize),

    /// High bin sub-range (~2-8.6 kHz, the audible treble body)
    pub high_bins: (usize, usize),

    /// Scale applied to raw FFT magnitudes before clamping each bin into
    /// [0, 1]; downstream motion formulas assume normalized magnitudes
    pub magnitude_gain: f32,
}

impl Default for FftConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            fft_size: 512,
            update_interval_ms: 50,
            bass_bins: (0, 4),
            mid_bins: (4, 24),
            high_bins: (24, 100),
            magnitude_gain: 8.0,
        }
    }
}

impl FftConfig {
    /// Number of usable magnitude bins (half the FFT window)
    pub fn spectrum_bins(&self) -> usize {
        self.fft_size / 2
    }

    /// Bass bins as a range
    pub fn bass_range(&self) -> Range<usize> {
        self.bass_bins.0..self.bass_bins.1
    }

    /// Mid bins as a range
    pub fn mid_range(&self) -> Range<usize> {
        self.mid_bins.0..self.mid_bins.1
    }

    /// High bins as a range
    pub fn high_range(&self) -> Range<usize> {
        self.high_bins.0..self.high_bins.1
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), String> {
        if !self.fft_size.is_power_of_two() {
            return Err(format!(
                "FFT size must be power of 2, got {}",
                self.fft_size
            ));
        }
        if self.sample_rate_hz == 0 {
            return Err("Sample rate must be > 0".to_string());
        }
        for (name, (lo, hi)) in [
            ("bass", self.bass_bins),
            ("mid", self.mid_bins),
            ("high", self.high_bins),
        ] {
            if lo >= hi {
                return Err(format!("{} bin range is empty", name));
            }
            if hi > self.spectrum_bins() {
                return Err(format!(
                    "{} bin range ends at {} but spectrum has {} bins",
                    name,
                    hi,
                    self.spectrum_bins()
                ));
            }
        }
        Ok(())
    }
}

/// Audio constants (compile-time, match Glicol engine setup)
pub mod audio_constants {
    /// Audio block size (samples per buffer)
    pub const BLOCK_SIZE: usize = 128;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(FftConfig::default().validate().is_ok());
    }

    #[test]
    fn test_spectrum_bins_matches_constant() {
        let config = FftConfig::default();
        assert_eq!(config.spectrum_bins(), SPECTRUM_BINS);
    }

    #[test]
    fn test_band_ranges_are_disjoint_and_ascending() {
        let config = FftConfig::default();

        assert!(config.bass_range().end <= config.mid_range().start);
        assert!(config.mid_range().end <= config.high_range().start);
        assert!(config.high_range().end <= config.spectrum_bins());
    }

    #[test]
    fn test_validate_rejects_non_power_of_two() {
        let mut config = FftConfig::default();
        config.fft_size = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_band() {
        let mut config = FftConfig::default();
        config.high_bins = (24, 300);
        assert!(config.validate().is_err());
    }
}
