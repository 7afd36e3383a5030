use crate::error::{Result, RoomSenseError};
use crate::math::Vec3;
use crate::sampler::reference_directions;
use crate::scene::{CollisionMask, MaterialTable};

/// Configuration descriptor for an acoustic emitter
///
/// Validated once when the emitter is created and immutable afterwards.
#[derive(Debug, Clone)]
pub struct AcousticsDesc {
    /// Length of every sample ray and of the listener line-of-sight ray (meters)
    pub max_raycast_distance: f32,
    /// Seconds between two re-estimations of the acoustic targets
    pub update_frequency_seconds: f32,
    /// Scale applied to the estimated wetness before it reaches the reverb (0.0 - 1.0)
    pub max_reverb_wetness: f32,
    /// Low-pass cutoff when an obstruction sits right next to the listener (Hz).
    /// Obstructions closer to the emitter muffle proportionally more.
    pub wall_lowpass_cutoff_hz: f32,
    /// Base smoothing rate for volume and pitch; acoustic parameters move faster
    pub lerp_speed: f32,
    /// Collision layers hit by sample rays
    pub collision_mask: CollisionMask,
    /// Surface materials; entry 0 is the fallback
    pub materials: MaterialTable,
    /// Sample directions in the emitter's local frame
    pub directions: Vec<Vec3>,
    /// Authored volume the emitter ramps up to (dB)
    pub volume_db: f32,
    /// Authored pitch scale
    pub pitch_scale: f32,
}

impl Default for AcousticsDesc {
    fn default() -> Self {
        Self {
            max_raycast_distance: 30.0,
            update_frequency_seconds: 0.5,
            max_reverb_wetness: 0.5,
            wall_lowpass_cutoff_hz: 600.0,
            lerp_speed: 1.0,
            collision_mask: CollisionMask::default(),
            materials: MaterialTable::with_presets(),
            directions: reference_directions(),
            volume_db: 0.0,
            pitch_scale: 1.0,
        }
    }
}

impl AcousticsDesc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_raycast_distance(mut self, distance: f32) -> Self {
        self.max_raycast_distance = distance;
        self
    }

    pub fn update_frequency_seconds(mut self, seconds: f32) -> Self {
        self.update_frequency_seconds = seconds;
        self
    }

    pub fn max_reverb_wetness(mut self, wetness: f32) -> Self {
        self.max_reverb_wetness = wetness;
        self
    }

    pub fn wall_lowpass_cutoff_hz(mut self, cutoff_hz: f32) -> Self {
        self.wall_lowpass_cutoff_hz = cutoff_hz;
        self
    }

    pub fn lerp_speed(mut self, speed: f32) -> Self {
        self.lerp_speed = speed;
        self
    }

    pub fn collision_mask(mut self, mask: CollisionMask) -> Self {
        self.collision_mask = mask;
        self
    }

    pub fn materials(mut self, materials: MaterialTable) -> Self {
        self.materials = materials;
        self
    }

    pub fn directions(mut self, directions: Vec<Vec3>) -> Self {
        self.directions = directions;
        self
    }

    pub fn volume_db(mut self, volume_db: f32) -> Self {
        self.volume_db = volume_db;
        self
    }

    pub fn pitch_scale(mut self, pitch_scale: f32) -> Self {
        self.pitch_scale = pitch_scale;
        self
    }

    /// Checks every field, reporting the first invalid one
    pub fn validate(&self) -> Result<()> {
        require_positive("max_raycast_distance", self.max_raycast_distance)?;
        require_positive("update_frequency_seconds", self.update_frequency_seconds)?;
        require_positive("wall_lowpass_cutoff_hz", self.wall_lowpass_cutoff_hz)?;
        require_positive("lerp_speed", self.lerp_speed)?;
        require_positive("pitch_scale", self.pitch_scale)?;

        if !(0.0..=1.0).contains(&self.max_reverb_wetness) {
            return Err(RoomSenseError::Configuration(format!(
                "max_reverb_wetness must be between 0.0 and 1.0, got {}",
                self.max_reverb_wetness
            )));
        }

        if !self.volume_db.is_finite() {
            return Err(RoomSenseError::Configuration(
                "volume_db must be finite".to_string(),
            ));
        }

        if self.collision_mask.is_empty() {
            return Err(RoomSenseError::Configuration(
                "collision_mask must contain at least one layer".to_string(),
            ));
        }

        self.materials
            .validate()
            .map_err(RoomSenseError::Configuration)?;

        if self.directions.is_empty() {
            return Err(RoomSenseError::Configuration(
                "at least one sample direction is required".to_string(),
            ));
        }

        for (index, direction) in self.directions.iter().enumerate() {
            if !direction.is_finite() || direction.length_squared() == 0.0 {
                return Err(RoomSenseError::Configuration(format!(
                    "sample direction {} must be finite and non-zero, got {:?}",
                    index, direction
                )));
            }
        }

        Ok(())
    }
}

fn require_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RoomSenseError::Configuration(format!(
            "{} must be a finite value > 0.0, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{AcousticMaterial, MaterialTable};

    #[test]
    fn test_default_is_valid() {
        let desc = AcousticsDesc::default();
        assert!(desc.validate().is_ok());
        assert_eq!(desc.directions.len(), 10);
    }

    #[test]
    fn test_builder_sets_fields() {
        let desc = AcousticsDesc::new()
            .max_raycast_distance(12.0)
            .update_frequency_seconds(1.5)
            .max_reverb_wetness(0.8)
            .wall_lowpass_cutoff_hz(900.0)
            .lerp_speed(2.0)
            .volume_db(-6.0)
            .pitch_scale(1.2);

        assert_eq!(desc.max_raycast_distance, 12.0);
        assert_eq!(desc.update_frequency_seconds, 1.5);
        assert_eq!(desc.max_reverb_wetness, 0.8);
        assert_eq!(desc.wall_lowpass_cutoff_hz, 900.0);
        assert_eq!(desc.lerp_speed, 2.0);
        assert_eq!(desc.volume_db, -6.0);
        assert_eq!(desc.pitch_scale, 1.2);
        assert!(desc.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_values() {
        assert!(AcousticsDesc::new().max_raycast_distance(0.0).validate().is_err());
        assert!(AcousticsDesc::new().max_raycast_distance(-1.0).validate().is_err());
        assert!(AcousticsDesc::new().update_frequency_seconds(0.0).validate().is_err());
        assert!(AcousticsDesc::new().wall_lowpass_cutoff_hz(0.0).validate().is_err());
        assert!(AcousticsDesc::new().lerp_speed(f32::NAN).validate().is_err());
    }

    #[test]
    fn test_rejects_wetness_out_of_range() {
        assert!(AcousticsDesc::new().max_reverb_wetness(1.5).validate().is_err());
        assert!(AcousticsDesc::new().max_reverb_wetness(-0.1).validate().is_err());
        assert!(AcousticsDesc::new().max_reverb_wetness(0.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_mask_and_directions() {
        assert!(
            AcousticsDesc::new()
                .collision_mask(CollisionMask::NONE)
                .validate()
                .is_err()
        );
        assert!(AcousticsDesc::new().directions(Vec::new()).validate().is_err());
        assert!(
            AcousticsDesc::new()
                .directions(vec![Vec3::ZERO])
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_rejects_invalid_material() {
        let mut materials = MaterialTable::new(AcousticMaterial::new("generic", 0.1));
        materials.add(AcousticMaterial::new("broken", -1.0));
        let err = AcousticsDesc::new().materials(materials).validate();
        assert!(matches!(err, Err(RoomSenseError::Configuration(_))));
    }
}
