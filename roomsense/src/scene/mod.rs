//! Scene queries and surface materials.
//!
//! The estimator talks to the host scene through two pieces:
//!
//! 1. **RayTracer** - Trait answering segment queries with an optional hit
//! 2. **MaterialTable** - Maps the material tags of hit surfaces to absorption
//!
//! [`BoxScene`] is a small axis-aligned implementation of `RayTracer` for
//! prototyping and tests.
//!
//! # Example
//!
//! ```
//! use roomsense::math::Vec3;
//! use roomsense::scene::{AcousticMaterial, BoxScene, MaterialTable};
//!
//! let mut materials = MaterialTable::new(AcousticMaterial::new("generic", 0.1));
//! materials.add(AcousticMaterial::new("carpet", 0.8));
//!
//! let mut scene = BoxScene::new();
//! scene.add_room(Vec3::splat(-4.0), Vec3::splat(4.0), 0.5, "carpet");
//! ```

pub mod box_scene;
pub mod material;
pub mod ray_tracer;

pub use box_scene::{BoxScene, TaggedBox};
pub use material::{AcousticMaterial, MaterialTable};
pub use ray_tracer::{CollisionMask, RayHit, RayTracer};
