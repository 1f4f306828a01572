//! FFT analysis thread: Hann window, forward FFT, normalized spectrum and
//! band feature extraction.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;
use std::ops::Range;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::AudioFeatureSnapshot;
use crate::params::FftConfig;

/// Spawn FFT analysis thread
pub fn spawn_fft_thread(
    config: FftConfig,
    sample_buffer: Arc<Mutex<Vec<f32>>>,
    snapshot: Arc<Mutex<AudioFeatureSnapshot>>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.fft_size);
        let mut fft_input = vec![Complex::new(0.0, 0.0); config.fft_size];
        let mut fft_output = vec![Complex::new(0.0, 0.0); config.fft_size];
        let mut spectrum = vec![0.0f32; config.spectrum_bins()];

        loop {
            thread::sleep(Duration::from_millis(config.update_interval_ms));

            let mut samples = sample_buffer.lock().unwrap();

            if samples.len() >= config.fft_size {
                // Apply Hann window
                for i in 0..config.fft_size {
                    let window = hann_window(i, config.fft_size);
                    fft_input[i] = Complex::new(samples[i] * window, 0.0);
                }

                // Perform FFT
                fft_output.copy_from_slice(&fft_input);
                fft.process(&mut fft_output);

                // Normalize bin magnitudes into [0, 1]
                for (i, bin) in spectrum.iter_mut().enumerate() {
                    *bin = normalize_magnitude(
                        fft_output[i].norm(),
                        config.fft_size,
                        config.magnitude_gain,
                    );
                }

                // Extract band features from the normalized spectrum
                let bass = band_average(&spectrum, config.bass_range());
                let mid = band_average(&spectrum, config.mid_range());
                let high = band_average(&spectrum, config.high_range());
                let volume = band_average(&spectrum, 0..spectrum.len());

                // Publish
                *snapshot.lock().unwrap() = AudioFeatureSnapshot {
                    bass,
                    mid,
                    high,
                    volume,
                    spectrum: spectrum.clone(),
                };

                // 50% overlap (drain half the buffer)
                samples.drain(0..config.fft_size / 2);
            }
        }
    })
}

/// Hann window function for FFT analysis
fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}

/// Map a raw FFT magnitude into [0, 1]
fn normalize_magnitude(magnitude: f32, fft_size: usize, gain: f32) -> f32 {
    (magnitude * gain / fft_size as f32).clamp(0.0, 1.0)
}

/// Mean of a bin sub-range; an empty range reads as zero
fn band_average(spectrum: &[f32], bins: Range<usize>) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let end = bins.end.min(spectrum.len());
    let start = bins.start.min(end);
    let sum: f32 = spectrum[start..end].iter().sum();
    sum / bins.len() as f32
}
