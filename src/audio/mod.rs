//! Audio synthesis and FFT analysis.
//!
//! Combines Glicol procedural synthesis with real-time FFT analysis to
//! extract the normalized spectrum and band features driving the visuals.

mod fft;
mod synthesis;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use glicol::Engine;
use std::sync::{Arc, Mutex};
use std::thread;

use crate::params::{audio_constants::BLOCK_SIZE, FftConfig, RecordingConfig, SPECTRUM_BINS};
use fft::spawn_fft_thread;
use synthesis::GLICOL_COMPOSITION;

/// Instantaneous audio features published by the analysis thread.
///
/// Aggregate features and spectrum bins are all normalized to [0, 1].
/// A fresh value is produced every analysis pass; consumers copy it once
/// per frame and never retain it across frames.
#[derive(Debug, Clone)]
pub struct AudioFeatureSnapshot {
    /// Bass band average
    pub bass: f32,
    /// Mid band average
    pub mid: f32,
    /// High band average
    pub high: f32,
    /// Mean magnitude across the whole spectrum
    pub volume: f32,
    /// Normalized magnitude per bin
    pub spectrum: Vec<f32>,
}

impl AudioFeatureSnapshot {
    /// All-zero snapshot (no audio analyzed yet)
    pub fn silent() -> Self {
        Self {
            bass: 0.0,
            mid: 0.0,
            high: 0.0,
            volume: 0.0,
            spectrum: vec![0.0; SPECTRUM_BINS],
        }
    }
}

impl Default for AudioFeatureSnapshot {
    fn default() -> Self {
        Self::silent()
    }
}

/// Audio system managing synthesis and FFT analysis
pub struct AudioSystem {
    /// Shared feature snapshot (thread-safe)
    snapshot: Arc<Mutex<AudioFeatureSnapshot>>,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,

    /// FFT analysis thread handle (optional, for cleanup)
    _fft_thread: Option<thread::JoinHandle<()>>,
}

impl AudioSystem {
    /// Create and start audio system with specified configuration
    pub fn new(
        fft_config: FftConfig,
        recording_config: Option<RecordingConfig>,
    ) -> Result<Self, String> {
        // Validate FFT configuration
        fft_config
            .validate()
            .map_err(|e| format!("Invalid FFT config: {}", e))?;

        // Create WAV writer if recording
        let wav_writer: Option<Arc<Mutex<hound::WavWriter<std::io::BufWriter<std::fs::File>>>>> =
            recording_config.as_ref().map(|config| {
                let spec = hound::WavSpec {
                    channels: 2,
                    sample_rate: fft_config.sample_rate_hz as u32,
                    bits_per_sample: 32,
                    sample_format: hound::SampleFormat::Float,
                };
                let writer = hound::WavWriter::create(&config.audio_path(), spec)
                    .expect("Failed to create WAV writer");
                Arc::new(Mutex::new(writer))
            });

        let wav_writer_clone = wav_writer.clone();

        // Create Glicol engine
        let mut engine = Engine::<BLOCK_SIZE>::new();
        engine.set_sr(fft_config.sample_rate_hz);
        engine.update_with_code(GLICOL_COMPOSITION);
        engine
            .update()
            .map_err(|e| format!("Glicol engine init failed: {:?}", e))?;

        // Shared state between audio callback and FFT thread
        let engine = Arc::new(Mutex::new(engine));
        let engine_clone = Arc::clone(&engine);

        let sample_buffer = Arc::new(Mutex::new(Vec::<f32>::new()));
        let sample_buffer_clone = Arc::clone(&sample_buffer);

        let snapshot = Arc::new(Mutex::new(AudioFeatureSnapshot::silent()));
        let snapshot_fft = Arc::clone(&snapshot);

        // Setup audio output device
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("No audio output device found")?;

        let config = device
            .default_output_config()
            .map_err(|e| format!("Failed to get audio config: {}", e))?;

        println!(
            "Audio: {} @ {}Hz",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            config.sample_rate().0
        );

        // Build audio output stream
        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut engine = engine_clone.lock().unwrap();
                    let mut samples = sample_buffer_clone.lock().unwrap();

                    let frames_needed = data.len() / 2; // Stereo frames
                    let mut frame_idx = 0;

                    // Generate multiple blocks if needed to fill the entire buffer
                    while frame_idx < frames_needed {
                        let (buffers, _) = engine.next_block(vec![]);

                        let samples_to_copy = (frames_needed - frame_idx).min(BLOCK_SIZE);

                        for i in 0..samples_to_copy {
                            // Safety limiter: hard clip to ±0.5 to prevent ear damage
                            let left = buffers[0][i].clamp(-0.5, 0.5);
                            let right = buffers[1][i].clamp(-0.5, 0.5);

                            let out_idx = (frame_idx + i) * 2;
                            data[out_idx] = left;
                            data[out_idx + 1] = right;

                            samples.push(left); // Accumulate for FFT analysis

                            // Record to WAV if recording
                            if let Some(ref writer) = wav_writer_clone {
                                if let Ok(mut w) = writer.lock() {
                                    let _ = w.write_sample(left);
                                    let _ = w.write_sample(right);
                                }
                            }
                        }

                        frame_idx += samples_to_copy;
                    }
                },
                |err| eprintln!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| format!("Failed to build audio stream: {}", e))?;

        stream
            .play()
            .map_err(|e| format!("Failed to start audio stream: {}", e))?;

        // Start FFT analysis thread
        let fft_thread = spawn_fft_thread(fft_config, sample_buffer, snapshot_fft);

        Ok(Self {
            snapshot,
            _stream: stream,
            _fft_thread: Some(fft_thread),
        })
    }

    /// Copy out the current feature snapshot (thread-safe)
    pub fn snapshot(&self) -> AudioFeatureSnapshot {
        self.snapshot.lock().unwrap().clone()
    }
}
