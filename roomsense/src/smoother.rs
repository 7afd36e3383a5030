//! Exponential smoothing of the values pushed to the effect graph.
//!
//! Targets jump whenever a sweep is re-estimated. Applying them directly would pop,
//! so every tick each live value moves a fraction `min(1, dt * rate)` of the way
//! toward its target.

use crate::estimator::{AcousticTargets, FULLY_OPEN_CUTOFF_HZ};

/// Cutoff, wetness and room size move this many times faster than volume and pitch
pub const ACOUSTIC_SPEED_MULTIPLIER: f32 = 5.0;

/// Lowest pitch scale ever applied
pub const MIN_PITCH_SCALE: f32 = 0.01;

/// Volume the emitter starts from before ramping to its authored volume (dB)
pub const SILENT_VOLUME_DB: f32 = -80.0;

/// Lowest time scale used when dividing the pitch smoothing rate
const MIN_TIME_SCALE: f32 = 1.0e-3;

/// Values currently applied to the emitter and its effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveParameters {
    /// Emitter volume (dB)
    pub volume_db: f32,
    /// Emitter pitch scale (ratio)
    pub pitch_scale: f32,
    /// Low-pass filter cutoff (Hz)
    pub cutoff_hz: f32,
    /// Reverb wet level, already scaled by `max_reverb_wetness` (0.0 - 1.0)
    pub wetness: f32,
    /// Reverb room size (0.0 - 1.0)
    pub room_size: f32,
}

impl LiveParameters {
    /// Silent, dry and unfiltered, at the given pitch
    pub fn silent(pitch_scale: f32) -> Self {
        Self {
            volume_db: SILENT_VOLUME_DB,
            pitch_scale: pitch_scale.max(MIN_PITCH_SCALE),
            cutoff_hz: FULLY_OPEN_CUTOFF_HZ,
            wetness: 0.0,
            room_size: 0.0,
        }
    }
}

/// Moves [`LiveParameters`] toward [`AcousticTargets`] every tick.
#[derive(Debug, Clone)]
pub struct ParameterSmoother {
    live: LiveParameters,
    lerp_speed: f32,
    max_wetness: f32,
}

impl ParameterSmoother {
    pub fn new(initial: LiveParameters, lerp_speed: f32, max_wetness: f32) -> Self {
        Self {
            live: initial,
            lerp_speed,
            max_wetness,
        }
    }

    /// Advances every live value by one tick of `dt` seconds.
    ///
    /// `time_scale` is the host's global time scale. The pitch target is multiplied
    /// by it and the pitch rate divided by it, so pitch tracks slow motion without
    /// its glide speed changing. A `dt` of zero (or less) leaves every value as is.
    pub fn advance(
        &mut self,
        dt: f32,
        targets: &AcousticTargets,
        time_scale: f32,
    ) -> &LiveParameters {
        if dt <= 0.0 || !dt.is_finite() {
            return &self.live;
        }

        let time_scale = if time_scale.is_finite() {
            time_scale.max(0.0)
        } else {
            1.0
        };
        let base_weight = dt * self.lerp_speed;
        let acoustic_weight = base_weight * ACOUSTIC_SPEED_MULTIPLIER;
        let pitch_weight = base_weight / time_scale.max(MIN_TIME_SCALE);

        let live = &mut self.live;
        live.volume_db = approach(live.volume_db, targets.volume_db, base_weight);
        live.pitch_scale = approach(
            live.pitch_scale,
            targets.pitch_scale * time_scale,
            pitch_weight,
        )
        .max(MIN_PITCH_SCALE);
        live.cutoff_hz = approach(live.cutoff_hz, targets.lowpass_cutoff_hz, acoustic_weight);
        live.wetness = approach(
            live.wetness,
            targets.reverb_wetness * self.max_wetness,
            acoustic_weight,
        );
        live.room_size = approach(live.room_size, targets.room_size, acoustic_weight);

        &self.live
    }

    pub fn live(&self) -> &LiveParameters {
        &self.live
    }
}

/// `current + (target - current) * min(1, weight)`
fn approach(current: f32, target: f32, weight: f32) -> f32 {
    current + (target - current) * weight.min(1.0)
}
