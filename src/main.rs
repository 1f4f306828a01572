//! Ridgeline - an audio-reactive parallax landscape
//!
//! Six point-cloud terrain layers scroll beneath a semi-autonomous director
//! camera: bass drives forward travel, treble spins the orbit, and a slow
//! noise signal cuts between close and wide framing.

mod audio;
mod cli;
mod director;
mod noise;
mod params;
mod rendering;
mod scroll;
mod terrain;

use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use clap::Parser;
use glam::{Mat4, Vec3};

use audio::AudioSystem;
use cli::Args;
use director::{CameraDirector, CameraMode, CameraPose};
use noise::NoiseField;
use params::*;
use rendering::{LayerUniforms, RenderSystem, SkyboxUniforms};
use scroll::ScrollState;
use terrain::TerrainLayer;

/// Free-look orbit rig owning the camera pose in MANUAL mode
struct FreeLook {
    yaw: f32,
    pitch: f32,
    radius: f32,
    target: Vec3,
}

impl FreeLook {
    /// Seed the rig from the pose the director last held, so entering
    /// MANUAL never jumps the view
    fn from_pose(pose: &CameraPose) -> Self {
        let offset = pose.position - pose.look_at;
        let radius = offset.length().max(1.0);
        Self {
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / radius).clamp(-1.0, 1.0).asin(),
            radius,
            target: pose.look_at,
        }
    }

    fn pose(&self) -> CameraPose {
        let position = self.target
            + Vec3::new(
                self.yaw.sin() * self.pitch.cos(),
                self.pitch.sin(),
                self.yaw.cos() * self.pitch.cos(),
            ) * self.radius;
        CameraPose {
            position,
            look_at: self.target,
        }
    }

    fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-1.4, 1.4);
    }

    fn zoom(&mut self, factor: f32) {
        self.radius = (self.radius * factor).clamp(10.0, 200.0);
    }
}

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation systems
    noise: NoiseField,
    layers: Vec<TerrainLayer>,
    terrain_params: TerrainParams,
    director: CameraDirector,
    scroll: ScrollState,
    free_look: FreeLook,
    audio: Option<AudioSystem>,

    // Configuration
    render_config: RenderConfig,
    recording_config: Option<RecordingConfig>,

    // Time tracking
    start_time: Instant,
    last_frame: Instant,
    frame_num: usize,
}

impl App {
    fn new(args: &Args) -> Self {
        let noise = NoiseField::new(args.seed);
        let layers: Vec<TerrainLayer> = layer_presets().into_iter().map(TerrainLayer::new).collect();

        let mut director = CameraDirector::new(DirectorParams::default());
        director.set_mode(args.parse_camera_mode());
        let free_look = FreeLook::from_pose(&director.pose());

        Self {
            window: None,
            render_system: None,
            noise,
            layers,
            terrain_params: TerrainParams::default(),
            director,
            scroll: ScrollState::new(),
            free_look,
            audio: None,
            render_config: RenderConfig::default(),
            recording_config: args.create_recording_config(),
            start_time: Instant::now(),
            last_frame: Instant::now(),
            frame_num: 0,
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Ridgeline - Audio-Reactive Landscape")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        // Initialize rendering system
        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.layers,
            self.recording_config.clone(),
        ))
        .unwrap();

        // Initialize audio system
        let fft_config = FftConfig::default();
        let audio = AudioSystem::new(fft_config, self.recording_config.clone()).unwrap();

        println!("\nRidgeline is running!");
        println!("Tab toggles the director; arrows orbit in manual mode");
        println!("Press ESC to quit\n");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.audio = Some(audio);
        self.last_frame = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        ..
                    },
                ..
            } => self.handle_key(event_loop, code),
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

impl App {
    /// Handle a key press. Mode switches land between frames, so the
    /// director observes them atomically at the next update.
    fn handle_key(&mut self, event_loop: &winit::event_loop::ActiveEventLoop, code: KeyCode) {
        match code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::Tab => match self.director.mode() {
                CameraMode::Auto => {
                    // Hand the pose over without a jump
                    self.free_look = FreeLook::from_pose(&self.director.pose());
                    self.director.set_mode(CameraMode::Manual);
                    println!("Camera: manual free look");
                }
                CameraMode::Manual => {
                    self.director.set_mode(CameraMode::Auto);
                    println!("Camera: director");
                }
            },
            _ if self.director.mode() == CameraMode::Manual => match code {
                KeyCode::ArrowLeft => self.free_look.orbit(-0.08, 0.0),
                KeyCode::ArrowRight => self.free_look.orbit(0.08, 0.0),
                KeyCode::ArrowUp => self.free_look.orbit(0.0, 0.05),
                KeyCode::ArrowDown => self.free_look.orbit(0.0, -0.05),
                KeyCode::PageUp => self.free_look.zoom(0.92),
                KeyCode::PageDown => self.free_look.zoom(1.08),
                _ => {}
            },
            _ => {}
        }
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        let Some(ref render_system) = self.render_system else {
            return;
        };

        // Frame clock
        let now = Instant::now();
        let dt_s = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        let time_s = self.start_time.elapsed().as_secs_f32();

        // Latest audio features (silent until the first analysis pass)
        let snapshot = self
            .audio
            .as_ref()
            .map(|a| a.snapshot())
            .unwrap_or_default();

        // Director first: every layer must observe this frame's scroll value
        let pose = match self.director.mode() {
            CameraMode::Auto => {
                self.director
                    .update(time_s, dt_s, &snapshot, &mut self.scroll, &self.noise)
            }
            CameraMode::Manual => self.free_look.pose(),
        };

        let view_proj = pose.view_proj(&self.render_config);

        // Update terrain layers and their GPU state
        for (i, layer) in self.layers.iter_mut().enumerate() {
            layer.update(
                self.scroll.offset(),
                &snapshot,
                &self.noise,
                &self.terrain_params,
            );
            render_system.update_layer_vertices(i, layer.vertices());

            let model = Mat4::from_translation(Vec3::new(
                0.0,
                self.terrain_params.base_y_m,
                layer.params.z_offset_m,
            ));
            render_system.update_layer_uniforms(
                i,
                &LayerUniforms {
                    mvp: (view_proj * model).to_cols_array_2d(),
                    color: layer.params.color,
                    opacity: layer.params.opacity,
                },
            );
        }

        // Update skybox uniforms
        let inv_view_proj = view_proj.inverse();
        render_system.update_skybox_uniforms(&SkyboxUniforms {
            inv_view_proj: inv_view_proj.to_cols_array_2d(),
            time: time_s,
            _padding: [0.0; 3],
        });

        // Render
        if let Err(e) = render_system.render(self.frame_num) {
            eprintln!("Render error: {:?}", e);
        }
        self.frame_num += 1;

        // Recording mode ends itself after the configured frame count
        if let Some(ref config) = self.recording_config {
            if self.frame_num >= config.total_frames() {
                println!(
                    "Recording complete: {} frames in {}",
                    self.frame_num,
                    config.frames_dir()
                );
                event_loop.exit();
            }
        }
    }
}

fn main() {
    println!("Ridgeline - audio-reactive parallax landscape");
    println!("Initializing systems...\n");

    let args = Args::parse();
    let mut app = App::new(&args);

    let event_loop = EventLoop::new().unwrap();
    let _ = event_loop.run_app(&mut app);
}
