//! Amortized directional sampling of the geometry around an emitter.
//!
//! The sampler owns a fixed set of directions and one [`SampleSlot`] per direction.
//! Each call to [`DirectionalSampler::sample_next`] casts a single ray and
//! overwrites a single slot, cycling through the directions in order. A full
//! pass over every direction is a *sweep*.

use crate::math::{Pose, Vec3};
use crate::scene::{CollisionMask, MaterialTable, RayTracer};

/// Reference sample directions in the emitter's local frame.
///
/// Ten unit vectors: down, left, right, forward, back, the four horizontal
/// diagonals and up. Forward is -Z.
pub fn reference_directions() -> Vec<Vec3> {
    let d = std::f32::consts::FRAC_1_SQRT_2;
    vec![
        Vec3::NEG_Y,
        Vec3::NEG_X,
        Vec3::X,
        Vec3::NEG_Z,
        Vec3::Z,
        Vec3::new(-d, 0.0, -d),
        Vec3::new(d, 0.0, -d),
        Vec3::new(-d, 0.0, d),
        Vec3::new(d, 0.0, d),
        Vec3::Y,
    ]
}

/// Latest result for one sample direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSlot {
    /// Distance from the emitter to the hit point, `None` if nothing was in range
    pub distance: Option<f32>,
    /// Index of the resolved material in the `MaterialTable`
    pub material: usize,
}

impl SampleSlot {
    pub fn hit(distance: f32, material: usize) -> Self {
        Self {
            distance: Some(distance),
            material,
        }
    }

    pub fn miss() -> Self {
        Self {
            distance: None,
            material: MaterialTable::DEFAULT_INDEX,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.distance.is_some()
    }
}

impl Default for SampleSlot {
    fn default() -> Self {
        Self::miss()
    }
}

/// Round-robin ray caster over a fixed direction set.
#[derive(Debug, Clone)]
pub struct DirectionalSampler {
    directions: Vec<Vec3>,
    slots: Vec<SampleSlot>,
    cursor: usize,
    max_distance: f32,
    mask: CollisionMask,
}

impl DirectionalSampler {
    /// Creates a sampler with one empty slot per direction.
    ///
    /// Directions are normalized; they are scaled by `max_distance` when cast.
    pub fn new(directions: &[Vec3], max_distance: f32, mask: CollisionMask) -> Self {
        let directions: Vec<Vec3> = directions.iter().map(|d| d.normalize_or_zero()).collect();
        let slots = vec![SampleSlot::default(); directions.len()];
        Self {
            directions,
            slots,
            cursor: 0,
            max_distance,
            mask,
        }
    }

    /// Casts the ray for the current direction and advances the cursor.
    ///
    /// On a hit, the slot records the distance to the hit point and the material
    /// resolved from the surface tags. On a miss, the slot is reset to no distance
    /// and the default material.
    ///
    /// Returns true when this call wrote the last slot of a sweep.
    pub fn sample_next<T: RayTracer + ?Sized>(
        &mut self,
        tracer: &T,
        emitter: &Pose,
        materials: &MaterialTable,
    ) -> bool {
        if self.directions.is_empty() {
            return false;
        }

        let index = self.cursor;
        let origin = emitter.position;
        let target = emitter.transform_offset(self.directions[index] * self.max_distance);

        self.slots[index] = match tracer.cast_ray(origin, target, self.mask) {
            Some(hit) => SampleSlot::hit(origin.distance(hit.point), materials.resolve(&hit.tags)),
            None => SampleSlot::miss(),
        };

        self.cursor = (index + 1) % self.directions.len();
        self.cursor == 0
    }

    pub fn slots(&self) -> &[SampleSlot] {
        &self.slots
    }

    pub fn directions(&self) -> &[Vec3] {
        &self.directions
    }

    /// Index of the direction cast by the next `sample_next` call
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
