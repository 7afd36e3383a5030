//! Derivation of acoustic targets from a completed sweep.
//!
//! Three estimates are produced from the sample slots and one line-of-sight ray:
//!
//! - **Room size**: mean hit distance relative to the cast distance
//! - **Reverb wetness**: starts fully wet, reduced by open directions and by the
//!   absorption of every resolved material
//! - **Low-pass cutoff**: muffling when an obstruction sits between emitter and listener

use crate::config::AcousticsDesc;
use crate::math::Vec3;
use crate::sampler::SampleSlot;
use crate::scene::{CollisionMask, MaterialTable, RayTracer};

/// Cutoff meaning "no audible low-pass" (Hz)
pub const FULLY_OPEN_CUTOFF_HZ: f32 = 20_000.0;

/// Floor for the emitter-listener distance when computing the occlusion ratio
pub const LISTENER_DISTANCE_EPSILON: f32 = 1.0e-3;

/// Desired effect parameters, recomputed as a whole after each sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcousticTargets {
    /// Wetness before the `max_reverb_wetness` scale (0.0 - 1.0)
    pub reverb_wetness: f32,
    /// Reverb room size (0.0 - 1.0)
    pub room_size: f32,
    /// Low-pass cutoff frequency (Hz)
    pub lowpass_cutoff_hz: f32,
    /// Authored volume (dB)
    pub volume_db: f32,
    /// Authored pitch scale
    pub pitch_scale: f32,
}

impl AcousticTargets {
    /// Targets before any sweep has completed: dry, small room, unfiltered
    pub fn initial(volume_db: f32, pitch_scale: f32) -> Self {
        Self {
            reverb_wetness: 0.0,
            room_size: 0.0,
            lowpass_cutoff_hz: FULLY_OPEN_CUTOFF_HZ,
            volume_db,
            pitch_scale,
        }
    }
}

/// Turns sample slots into [`AcousticTargets`].
#[derive(Debug, Clone)]
pub struct AcousticEstimator {
    max_distance: f32,
    wall_cutoff_hz: f32,
    mask: CollisionMask,
    volume_db: f32,
    pitch_scale: f32,
}

impl AcousticEstimator {
    pub fn new(desc: &AcousticsDesc) -> Self {
        Self {
            max_distance: desc.max_raycast_distance,
            wall_cutoff_hz: desc.wall_lowpass_cutoff_hz,
            mask: desc.collision_mask,
            volume_db: desc.volume_db,
            pitch_scale: desc.pitch_scale,
        }
    }

    /// Recomputes every target from a completed sweep.
    ///
    /// Casts one extra ray from `emitter` toward `listener` for the cutoff.
    pub fn recompute<T: RayTracer + ?Sized>(
        &self,
        slots: &[SampleSlot],
        materials: &MaterialTable,
        tracer: &T,
        emitter: Vec3,
        listener: Vec3,
    ) -> AcousticTargets {
        let targets = AcousticTargets {
            reverb_wetness: self.wetness(slots, materials),
            room_size: self.room_size(slots),
            lowpass_cutoff_hz: self.lowpass_cutoff(tracer, emitter, listener),
            volume_db: self.volume_db,
            pitch_scale: self.pitch_scale,
        };

        log::debug!(
            "Recomputed acoustic targets: wetness = {:.3}, room_size = {:.3}, cutoff = {:.1} Hz",
            targets.reverb_wetness,
            targets.room_size,
            targets.lowpass_cutoff_hz
        );

        targets
    }

    /// Mean hit distance over the cast distance, counting misses as zero.
    ///
    /// The running sum is clamped to 1.0 after every addition.
    pub fn room_size(&self, slots: &[SampleSlot]) -> f32 {
        let count = slot_count(slots);
        slots
            .iter()
            .filter_map(|slot| slot.distance)
            .fold(0.0f32, |sum, distance| {
                (sum + distance / self.max_distance / count).min(1.0)
            })
    }

    /// Wetness after both the open-direction and the absorption reductions
    pub fn wetness(&self, slots: &[SampleSlot], materials: &MaterialTable) -> f32 {
        absorb(open_space_wetness(slots), slots, materials)
    }

    /// Low-pass cutoff from the line-of-sight ray toward the listener.
    ///
    /// Returns [`FULLY_OPEN_CUTOFF_HZ`] unless something is hit strictly closer than
    /// the listener and within the cast distance.
    pub fn lowpass_cutoff<T: RayTracer + ?Sized>(
        &self,
        tracer: &T,
        emitter: Vec3,
        listener: Vec3,
    ) -> f32 {
        let to_listener = listener - emitter;
        let listener_distance = to_listener.length();
        let target =
            emitter + to_listener.normalize_or_zero() * listener_distance.min(self.max_distance);

        let Some(hit) = tracer.cast_ray(emitter, target, self.mask) else {
            return FULLY_OPEN_CUTOFF_HZ;
        };

        let hit_distance = emitter.distance(hit.point);
        if hit_distance < listener_distance && hit_distance < self.max_distance {
            self.wall_cutoff_hz * (hit_distance / listener_distance.max(LISTENER_DISTANCE_EPSILON))
        } else {
            FULLY_OPEN_CUTOFF_HZ
        }
    }
}

fn slot_count(slots: &[SampleSlot]) -> f32 {
    slots.len().max(1) as f32
}

/// Wetness after subtracting `1 / count` per direction that hit nothing.
pub fn open_space_wetness(slots: &[SampleSlot]) -> f32 {
    let count = slot_count(slots);
    slots
        .iter()
        .filter(|slot| !slot.is_hit())
        .fold(1.0f32, |wetness, _| (wetness - 1.0 / count).max(0.0))
}

/// Subtracts `absorption / count` for the material of every slot, clamped at zero.
pub fn absorb(wetness: f32, slots: &[SampleSlot], materials: &MaterialTable) -> f32 {
    let count = slot_count(slots);
    slots.iter().fold(wetness.clamp(0.0, 1.0), |wetness, slot| {
        let absorption = materials.get_or_default(slot.material).absorption();
        (wetness - absorption / count).max(0.0)
    })
}
