//! Command-line argument parsing.

use clap::Parser;

use crate::director::CameraMode;
use crate::params::RecordingConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Ridgeline")]
#[command(about = "Audio-reactive parallax landscape visualizer", long_about = None)]
pub struct Args {
    /// Record a session to PNG frames + WAV (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// Camera mode at startup: auto (director) or manual (free look)
    #[arg(long, value_name = "MODE", default_value = "auto")]
    pub camera_mode: String,

    /// Noise field seed (terrain shape and director signal)
    #[arg(long, value_name = "SEED", default_value = "42")]
    pub seed: u32,
}

impl Args {
    /// Parse camera mode from command-line arguments
    pub fn parse_camera_mode(&self) -> CameraMode {
        match self.camera_mode.to_lowercase().as_str() {
            "auto" => CameraMode::Auto,
            "manual" => {
                println!("Camera: Manual (free look)");
                CameraMode::Manual
            }
            other => {
                eprintln!("Warning: Unknown camera mode '{}', using auto", other);
                CameraMode::Auto
            }
        }
    }

    /// Create recording configuration if recording mode is enabled
    pub fn create_recording_config(&self) -> Option<RecordingConfig> {
        self.record.map(|duration| {
            let config = RecordingConfig::new(duration);

            // Create output directories
            std::fs::create_dir_all(config.frames_dir())
                .expect("Failed to create frames directory");
            std::fs::create_dir_all(&config.output_dir).expect("Failed to create output directory");

            config
        })
    }
}
