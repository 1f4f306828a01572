//! Camera director tuning.
//!
//! Every value here encodes the tuned cinematic look of the piece. They are
//! named and documented rather than user-configurable.

/// Camera director motion-model parameters
#[derive(Debug, Clone)]
pub struct DirectorParams {
    // === Feature smoothing ===
    /// Exponential smoothing rate for bass (1/s); bass reacts fastest
    pub bass_smoothing: f32,

    /// Exponential smoothing rate for overall volume (1/s)
    pub volume_smoothing: f32,

    /// Exponential smoothing rate for highs (1/s)
    pub high_smoothing: f32,

    // === Scroll ===
    /// Forward travel speed with silent audio (m/s)
    pub base_scroll_speed_m_per_s: f32,

    /// Extra travel speed at full smoothed bass (m/s)
    pub bass_scroll_boost_m_per_s: f32,

    // === Zoom director signal ===
    /// Time scale of the slow director noise (Hz); low = occasional cuts
    pub zoom_noise_freq_hz: f32,

    /// Y coordinate slice reserved for the director signal, keeping it
    /// uncorrelated with terrain samples
    pub zoom_noise_slice_y: f32,

    /// Bias added to raw director noise; +0.3 skews ~70% toward wide shots
    pub zoom_bias_offset: f32,

    /// Half-width of the noise range mapped onto [0, 1]
    pub zoom_map_half_range: f32,

    // === Orbit radius (meters): close regime vs wide regime bounds ===
    /// Radius bounds when fully zoomed in (min at silence, max at volume 1)
    pub close_radius_m: (f32, f32),

    /// Radius bounds when fully wide
    pub wide_radius_m: (f32, f32),

    // === Orbit rotation ===
    /// Base rotation speed (rad/s) before regime and treble scaling
    pub base_rotation_rad_per_s: f32,

    /// Rotation speed factor when fully zoomed in (slower to reduce
    /// disorientation); wide regime uses factor 1.0
    pub close_rotation_factor: f32,

    /// Extra rotation speed at full smoothed highs (rad/s)
    pub high_rotation_boost: f32,

    // === Orbit center ===
    /// Orbit pivot depth when fully wide (meters); close regime pivots at 0
    pub wide_center_z_m: f32,

    // === Look-at target ===
    /// Upward look offset when fully zoomed in (meters); wide looks level
    pub close_look_up_m: f32,

    /// Base look-at height (meters)
    pub look_at_base_height_m: f32,

    /// Look-at smoothing rate (1/s); the target only asymptotically tracks,
    /// never snaps
    pub look_at_lerp_rate: f32,

    // === Hover height ===
    /// Hover height when fully zoomed in (meters)
    pub close_hover_m: f32,

    /// Hover height when fully wide (meters)
    pub wide_hover_m: f32,

    /// Bass bounce amplitude when fully zoomed in (meters)
    pub close_bounce_m: f32,

    /// Bass bounce amplitude when fully wide (meters)
    pub wide_bounce_m: f32,

    // === Idle breathing ===
    /// Vertical breathing oscillation rate (Hz)
    pub breathing_freq_hz: f32,

    /// Breathing amplitude gained across the zoom range (meters)
    pub breathing_zoom_amp_m: f32,

    /// Breathing amplitude floor (meters)
    pub breathing_base_amp_m: f32,

    // === Pose smoothing ===
    /// Camera position smoothing rate (1/s); critically damped, never snaps
    pub position_lerp_rate: f32,

    // === Defensive bounds ===
    /// Maximum frame delta fed into any smoothing formula (seconds);
    /// guards against overshoot after pause/suspend
    pub max_frame_dt_s: f32,

    // === Initial pose ===
    /// Camera position before the first update (meters)
    pub initial_position: [f32; 3],

    /// Look-at target before the first update (meters)
    pub initial_look_at: [f32; 3],
}

impl Default for DirectorParams {
    fn default() -> Self {
        Self {
            bass_smoothing: 5.0,
            volume_smoothing: 3.0,
            high_smoothing: 3.0,

            base_scroll_speed_m_per_s: 6.0,
            bass_scroll_boost_m_per_s: 20.0,

            zoom_noise_freq_hz: 0.08,
            zoom_noise_slice_y: 200.0,
            zoom_bias_offset: 0.3,
            zoom_map_half_range: 0.4,

            close_radius_m: (25.0, 45.0),
            wide_radius_m: (90.0, 180.0),

            base_rotation_rad_per_s: 0.08,
            close_rotation_factor: 0.5,
            high_rotation_boost: 0.2,

            wide_center_z_m: -40.0,

            close_look_up_m: 5.0,
            look_at_base_height_m: 10.0,
            look_at_lerp_rate: 1.0,

            close_hover_m: 12.0,
            wide_hover_m: 45.0,
            close_bounce_m: 5.0,
            wide_bounce_m: 30.0,

            breathing_freq_hz: 0.2,
            breathing_zoom_amp_m: 5.0,
            breathing_base_amp_m: 2.0,

            position_lerp_rate: 0.8,

            max_frame_dt_s: 0.1,

            initial_position: [0.0, 40.0, 80.0],
            initial_look_at: [0.0, 0.0, -20.0],
        }
    }
}
