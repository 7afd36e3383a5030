//! Minimal [`RayTracer`] over axis-aligned boxes.
//!
//! Useful for prototyping and tests when no physics engine is at hand. Each box
//! carries its own material tags and collision layer.

use crate::math::Vec3;
use crate::scene::ray_tracer::{CollisionMask, RayHit, RayTracer};

/// Axis-aligned solid box with material tags.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedBox {
    pub min: Vec3,
    pub max: Vec3,
    pub tags: Vec<String>,
    pub layers: CollisionMask,
}

impl TaggedBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            tags: Vec::new(),
            layers: CollisionMask::default(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_layers(mut self, layers: CollisionMask) -> Self {
        self.layers = layers;
        self
    }

    /// Slab test against the segment `origin + t * delta`, t in [0, 1].
    ///
    /// Returns the entry parameter `t`. Segments starting inside the box hit at t = 0.
    fn intersect_segment(&self, origin: Vec3, delta: Vec3) -> Option<f32> {
        let mut t_min = 0.0f32;
        let mut t_max = 1.0f32;

        for axis in 0..3 {
            let o = origin[axis];
            let d = delta[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

/// Collection of [`TaggedBox`] solids answering segment queries.
///
/// # Example
///
/// ```
/// use roomsense::math::Vec3;
/// use roomsense::scene::{BoxScene, CollisionMask, RayTracer, TaggedBox};
///
/// let mut scene = BoxScene::new();
/// scene.add(
///     TaggedBox::new(Vec3::new(-10.0, -1.0, -10.0), Vec3::new(10.0, 0.0, 10.0)).with_tag("stone"),
/// );
///
/// let hit = scene
///     .cast_ray(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -5.0, 0.0), CollisionMask::ALL)
///     .expect("the floor is below the origin");
/// assert!(hit.point.y.abs() < 1e-5);
/// assert_eq!(hit.tags, vec!["stone".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoxScene {
    boxes: Vec<TaggedBox>,
}

impl BoxScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, solid: TaggedBox) -> &mut Self {
        self.boxes.push(solid);
        self
    }

    /// Adds the six walls of a hollow room spanning `min..max`
    ///
    /// Every wall is `thickness` thick and placed outside the interior volume.
    pub fn add_room(&mut self, min: Vec3, max: Vec3, thickness: f32, tag: &str) -> &mut Self {
        let t = Vec3::splat(thickness);
        let (lo, hi) = (min - t, max + t);
        let walls = [
            // floor, ceiling
            (lo, Vec3::new(hi.x, min.y, hi.z)),
            (Vec3::new(lo.x, max.y, lo.z), hi),
            // -x, +x
            (lo, Vec3::new(min.x, hi.y, hi.z)),
            (Vec3::new(max.x, lo.y, lo.z), hi),
            // -z, +z
            (lo, Vec3::new(hi.x, hi.y, min.z)),
            (Vec3::new(lo.x, lo.y, max.z), hi),
        ];

        for (wall_min, wall_max) in walls {
            self.add(TaggedBox::new(wall_min, wall_max).with_tag(tag));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

impl RayTracer for BoxScene {
    fn cast_ray(&self, origin: Vec3, target: Vec3, mask: CollisionMask) -> Option<RayHit> {
        let delta = target - origin;

        self.boxes
            .iter()
            .filter(|solid| solid.layers.intersects(mask))
            .filter_map(|solid| solid.intersect_segment(origin, delta).map(|t| (t, solid)))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(t, solid)| RayHit::new(origin + delta * t, solid.tags.clone()))
    }
}
