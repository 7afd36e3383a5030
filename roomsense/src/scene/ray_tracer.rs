//! Ray query trait used to probe the scene around an emitter.
//!
//! RoomSense never intersects geometry itself. The host physics engine implements
//! [`RayTracer`] and answers one segment query at a time.

use crate::math::Vec3;

/// Set of collision layers a ray query is allowed to hit.
///
/// Layers are numbered 1 to 32, matching bit `layer - 1` of the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionMask(pub u32);

impl CollisionMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    /// Builds a mask from 1-based layer numbers. Layers outside 1..=32 are ignored.
    pub fn from_layers(layers: &[u8]) -> Self {
        let bits = layers
            .iter()
            .filter(|&&layer| (1..=32).contains(&layer))
            .fold(0u32, |bits, &layer| bits | (1 << (layer - 1)));
        Self(bits)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the two masks share at least one layer
    pub fn intersects(&self, other: CollisionMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for CollisionMask {
    fn default() -> Self {
        Self::from_layers(&[1])
    }
}

/// Closest intersection reported by a [`RayTracer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RayHit {
    /// World-space hit point
    pub point: Vec3,

    /// Material tags of the surface that was hit
    ///
    /// Resolved against the emitter's `MaterialTable`; an empty list resolves to
    /// the default material.
    pub tags: Vec<String>,
}

impl RayHit {
    pub fn new(point: Vec3, tags: Vec<String>) -> Self {
        Self { point, tags }
    }

    /// Creates a hit on a surface without any material tags
    pub fn untagged(point: Vec3) -> Self {
        Self {
            point,
            tags: Vec::new(),
        }
    }
}

/// Trait for providing segment queries to the acoustics estimator.
///
/// Implement this trait on top of your physics engine. The estimator casts at most
/// two segments per tick, so implementations need not batch queries.
///
/// # Example
///
/// ```
/// use roomsense::math::Vec3;
/// use roomsense::scene::{CollisionMask, RayHit, RayTracer};
///
/// /// Infinite floor at y = 0
/// struct Floor;
///
/// impl RayTracer for Floor {
///     fn cast_ray(&self, origin: Vec3, target: Vec3, _mask: CollisionMask) -> Option<RayHit> {
///         if origin.y > 0.0 && target.y <= 0.0 {
///             let t = origin.y / (origin.y - target.y);
///             let point = origin + (target - origin) * t;
///             Some(RayHit::new(point, vec!["stone".to_string()]))
///         } else {
///             None
///         }
///     }
/// }
/// ```
pub trait RayTracer {
    /// Finds the closest surface on the segment from `origin` to `target`.
    ///
    /// # Parameters
    ///
    /// * `origin` - Segment start in world space (meters)
    /// * `target` - Segment end in world space (meters)
    /// * `mask` - Collision layers the query may hit
    ///
    /// # Returns
    ///
    /// The closest hit, or `None` if the segment is clear
    fn cast_ray(&self, origin: Vec3, target: Vec3, mask: CollisionMask) -> Option<RayHit>;
}
