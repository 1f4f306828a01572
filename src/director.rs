//! Semi-autonomous camera director.
//!
//! A continuous-time AUTO/MANUAL state machine that derives camera position
//! and look-at target each frame from smoothed audio features and a slow
//! noise-driven zoom-bias signal. All motion is critically damped; nothing
//! ever snaps.

use glam::{Mat4, Vec3};

use crate::audio::AudioFeatureSnapshot;
use crate::noise::NoiseField;
use crate::params::{DirectorParams, RenderConfig};
use crate::scroll::ScrollState;

/// Camera operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// Director owns the pose and advances the scroll
    Auto,
    /// An external free-look rig owns the pose; the director is inert
    Manual,
}

/// Camera position and look-at target for one frame
#[derive(Debug, Clone, Copy)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    /// View matrix looking at the target (camera never rolls)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    /// View-projection matrix for rendering
    pub fn view_proj(&self, render_config: &RenderConfig) -> Mat4 {
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane_m,
            render_config.far_plane_m,
        );
        proj * self.view_matrix()
    }
}

/// Camera director state machine
pub struct CameraDirector {
    params: DirectorParams,
    mode: CameraMode,

    // Exponentially smoothed audio features, each in [0, 1]
    smoothed_bass: f32,
    smoothed_volume: f32,
    smoothed_high: f32,

    /// Monotonic orbit accumulator (radians); wraps implicitly via trig
    orbit_angle: f32,

    // Critically damped pose state
    position: Vec3,
    look_at: Vec3,
}

impl CameraDirector {
    /// Create director in AUTO mode with the initial pose
    pub fn new(params: DirectorParams) -> Self {
        let position = Vec3::from_array(params.initial_position);
        let look_at = Vec3::from_array(params.initial_look_at);
        Self {
            params,
            mode: CameraMode::Auto,
            smoothed_bass: 0.0,
            smoothed_volume: 0.0,
            smoothed_high: 0.0,
            orbit_angle: 0.0,
            position,
            look_at,
        }
    }

    /// Current operating mode
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Switch mode. Instantaneous and side-effect free: no internal state
    /// is reset, AUTO computation simply ceases or resumes.
    pub fn set_mode(&mut self, mode: CameraMode) {
        self.mode = mode;
    }

    /// Pose as of the last AUTO update
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            look_at: self.look_at,
        }
    }

    /// Advance one frame.
    ///
    /// In AUTO: smooth the raw features, advance the shared scroll, derive
    /// the zoom regime from the director noise slice, and damp the pose
    /// toward the computed orbit point. In MANUAL: strict no-op; the pose
    /// is owned elsewhere and must not be overwritten.
    ///
    /// `dt_s` is clamped before use so an abnormal frame delta (pause,
    /// suspend) cannot make any smoothing step overshoot.
    pub fn update(
        &mut self,
        time_s: f32,
        dt_s: f32,
        snapshot: &AudioFeatureSnapshot,
        scroll: &mut ScrollState,
        noise: &NoiseField,
    ) -> CameraPose {
        if self.mode == CameraMode::Manual {
            return self.pose();
        }

        let p = self.params.clone();
        let dt = dt_s.clamp(0.0, p.max_frame_dt_s);

        // 1. Smooth raw features; bass tracks fastest
        self.smoothed_bass += (snapshot.bass - self.smoothed_bass) * step(p.bass_smoothing, dt);
        self.smoothed_volume +=
            (snapshot.volume - self.smoothed_volume) * step(p.volume_smoothing, dt);
        self.smoothed_high += (snapshot.high - self.smoothed_high) * step(p.high_smoothing, dt);

        // 2. Bass drives forward travel; the beat is what moves us
        let speed = p.base_scroll_speed_m_per_s + self.smoothed_bass * p.bass_scroll_boost_m_per_s;
        scroll.advance(speed, dt);

        // 3. Zoom regime from the slow director noise slice
        let raw = noise.sample(time_s * p.zoom_noise_freq_hz, p.zoom_noise_slice_y, 0.0);
        let zoom = zoom_bias(raw + p.zoom_bias_offset, p.zoom_map_half_range);

        // 4. Interpolate the orbit parameterization between regimes
        let min_r = lerp(p.close_radius_m.0, p.wide_radius_m.0, zoom);
        let max_r = lerp(p.close_radius_m.1, p.wide_radius_m.1, zoom);
        let radius = min_r + self.smoothed_volume * (max_r - min_r);

        let speed_factor = lerp(p.close_rotation_factor, 1.0, zoom);
        self.orbit_angle +=
            (p.base_rotation_rad_per_s * speed_factor + self.smoothed_high * p.high_rotation_boost)
                * dt;

        let center_z = lerp(0.0, p.wide_center_z_m, zoom);

        let look_up = lerp(p.close_look_up_m, 0.0, zoom);
        let look_target = Vec3::new(0.0, p.look_at_base_height_m + look_up, center_z);
        self.look_at = self
            .look_at
            .lerp(look_target, (p.look_at_lerp_rate * dt).min(1.0));

        let base_h = lerp(p.close_hover_m, p.wide_hover_m, zoom);
        let bounce = lerp(p.close_bounce_m, p.wide_bounce_m, zoom);
        let hover = base_h + self.smoothed_bass * bounce;
        let breathing = (time_s * p.breathing_freq_hz).sin()
            * (zoom * p.breathing_zoom_amp_m + p.breathing_base_amp_m);

        // 5. Damp the position toward the orbit point
        let target = Vec3::new(
            self.orbit_angle.sin() * radius,
            hover + breathing,
            center_z + self.orbit_angle.cos() * radius,
        );
        self.position = self
            .position
            .lerp(target, (p.position_lerp_rate * dt).min(1.0));

        self.pose()
    }
}

/// Per-frame exponential smoothing step, capped at 1 so a large delta can
/// never overshoot the raw value
fn step(rate: f32, dt: f32) -> f32 {
    (rate * dt).min(1.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Map the biased director-noise value from [-half_range, half_range] onto
/// [0, 1], clamped at both ends
fn zoom_bias(biased: f32, half_range: f32) -> f32 {
    ((biased + half_range) / (2.0 * half_range)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn snapshot_with(bass: f32, volume: f32, high: f32) -> AudioFeatureSnapshot {
        AudioFeatureSnapshot {
            bass,
            mid: 0.0,
            high,
            volume,
            ..AudioFeatureSnapshot::silent()
        }
    }

    fn run_frames(
        director: &mut CameraDirector,
        scroll: &mut ScrollState,
        noise: &NoiseField,
        snapshot: &AudioFeatureSnapshot,
        frames: usize,
        start_time: f32,
    ) -> f32 {
        let mut t = start_time;
        for _ in 0..frames {
            director.update(t, DT, snapshot, scroll, noise);
            t += DT;
        }
        t
    }

    #[test]
    fn test_silence_scrolls_at_base_speed() {
        let noise = NoiseField::new(42);
        let mut director = CameraDirector::new(DirectorParams::default());
        let mut scroll = ScrollState::new();

        run_frames(
            &mut director,
            &mut scroll,
            &noise,
            &AudioFeatureSnapshot::silent(),
            60,
            0.0,
        );

        // 6 m/s for one second, exact modulo float accumulation
        assert!((scroll.offset() - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_scroll_monotonic_under_varying_audio() {
        let noise = NoiseField::new(42);
        let mut director = CameraDirector::new(DirectorParams::default());
        let mut scroll = ScrollState::new();

        let mut last = 0.0;
        for i in 0..300 {
            let bass = ((i % 10) as f32) / 10.0;
            director.update(
                i as f32 * DT,
                DT,
                &snapshot_with(bass, 0.5, 0.2),
                &mut scroll,
                &noise,
            );
            assert!(scroll.offset() > last);
            last = scroll.offset();
        }
    }

    #[test]
    fn test_bass_spike_smoothing_response() {
        let noise = NoiseField::new(42);
        let mut director = CameraDirector::new(DirectorParams::default());
        let mut scroll = ScrollState::new();

        // Bass jumps to 1 and holds for 0.2s (one time constant at rate 5)
        run_frames(
            &mut director,
            &mut scroll,
            &noise,
            &snapshot_with(1.0, 0.0, 0.0),
            12,
            0.0,
        );

        // Exponential response shape: past 1 - 1/e of the jump
        assert!(director.smoothed_bass > 0.63);
        assert!(director.smoothed_bass < 1.0);
    }

    #[test]
    fn test_smoothing_converges_without_overshoot() {
        let noise = NoiseField::new(42);
        let mut director = CameraDirector::new(DirectorParams::default());
        let mut scroll = ScrollState::new();
        let snapshot = snapshot_with(0.8, 0.8, 0.8);

        for i in 0..600 {
            director.update(i as f32 * DT, DT, &snapshot, &mut scroll, &noise);
            assert!(director.smoothed_bass <= 0.8 + 1e-6);
            assert!(director.smoothed_volume <= 0.8 + 1e-6);
            assert!(director.smoothed_high <= 0.8 + 1e-6);
        }

        // Held input for 10s: all smoothed values have converged
        assert!((director.smoothed_bass - 0.8).abs() < 1e-3);
        assert!((director.smoothed_volume - 0.8).abs() < 1e-3);
        assert!((director.smoothed_high - 0.8).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_bias_clamped_over_full_noise_range() {
        let p = DirectorParams::default();

        let mut raw = -1.0f32;
        while raw <= 1.0 {
            let bias = zoom_bias(raw + p.zoom_bias_offset, p.zoom_map_half_range);
            assert!((0.0..=1.0).contains(&bias), "bias {} for raw {}", bias, raw);
            raw += 0.01;
        }

        // Extremes hit the clamps
        assert_eq!(zoom_bias(-1.0 + p.zoom_bias_offset, p.zoom_map_half_range), 0.0);
        assert_eq!(zoom_bias(1.0 + p.zoom_bias_offset, p.zoom_map_half_range), 1.0);
    }

    #[test]
    fn test_manual_mode_freezes_scroll_and_pose() {
        let noise = NoiseField::new(42);
        let mut director = CameraDirector::new(DirectorParams::default());
        let mut scroll = ScrollState::new();
        let snapshot = snapshot_with(1.0, 1.0, 1.0);

        let t = run_frames(&mut director, &mut scroll, &noise, &snapshot, 30, 0.0);

        let scroll_before = scroll.offset();
        let pose_before = director.pose();

        director.set_mode(CameraMode::Manual);
        run_frames(&mut director, &mut scroll, &noise, &snapshot, 30, t);

        assert_eq!(scroll.offset(), scroll_before);
        assert_eq!(director.pose().position, pose_before.position);
        assert_eq!(director.pose().look_at, pose_before.look_at);
    }

    #[test]
    fn test_mode_switch_preserves_smoothed_state() {
        let noise = NoiseField::new(42);
        let mut director = CameraDirector::new(DirectorParams::default());
        let mut scroll = ScrollState::new();
        let snapshot = snapshot_with(1.0, 0.0, 0.0);

        // Build up smoothed bass, detour through MANUAL, come back
        let t = run_frames(&mut director, &mut scroll, &noise, &snapshot, 12, 0.0);
        let bass_at_switch = director.smoothed_bass;

        director.set_mode(CameraMode::Manual);
        let t = run_frames(&mut director, &mut scroll, &noise, &snapshot, 30, t);
        assert_eq!(director.smoothed_bass, bass_at_switch);

        director.set_mode(CameraMode::Auto);
        let before = scroll.offset();
        director.update(t, DT, &snapshot, &mut scroll, &noise);

        // First frame back moves at the speed the pre-switch bass implies,
        // not at a from-zero restart
        let frame_travel = scroll.offset() - before;
        assert!(frame_travel > (6.0 + bass_at_switch * 20.0) * DT * 0.95);
    }

    #[test]
    fn test_abnormal_dt_is_clamped() {
        let noise = NoiseField::new(42);
        let mut director = CameraDirector::new(DirectorParams::default());
        let mut scroll = ScrollState::new();
        let snapshot = snapshot_with(1.0, 1.0, 1.0);

        // A 100s frame delta (suspend/resume) must not blow anything up
        director.update(0.0, 100.0, &snapshot, &mut scroll, &noise);

        assert!(director.smoothed_bass <= 1.0);
        assert!(director.smoothed_volume <= 1.0);
        assert!(director.smoothed_high <= 1.0);
        assert!(director.pose().position.is_finite());
        assert!(director.pose().look_at.is_finite());

        // Scroll advanced by at most max_frame_dt worth of travel
        let p = DirectorParams::default();
        assert!(scroll.offset() <= (6.0 + 20.0) * p.max_frame_dt_s + 1e-4);

        // Negative deltas are inert
        let before = scroll.offset();
        director.update(1.0, -5.0, &snapshot, &mut scroll, &noise);
        assert_eq!(scroll.offset(), before);
    }

    #[test]
    fn test_pose_is_damped_not_snapped() {
        let noise = NoiseField::new(42);
        let mut director = CameraDirector::new(DirectorParams::default());
        let mut scroll = ScrollState::new();
        let snapshot = snapshot_with(0.0, 1.0, 0.0);

        let start = director.pose().position;
        director.update(0.0, DT, &snapshot, &mut scroll, &noise);
        let after_one = director.pose().position;

        // One 60fps frame moves the camera only a small fraction of the way
        let step_len = (after_one - start).length();
        assert!(step_len > 0.0);
        assert!(step_len < start.distance(Vec3::ZERO));
    }

    #[test]
    fn test_view_proj_is_finite_and_nontrivial() {
        let director = CameraDirector::new(DirectorParams::default());
        let config = RenderConfig::default();

        let vp = director.pose().view_proj(&config);
        assert_ne!(vp, Mat4::IDENTITY);
        assert_ne!(vp, Mat4::ZERO);
        assert!(director.pose().position.is_finite());
    }
}
