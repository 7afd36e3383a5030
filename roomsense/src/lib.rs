//! # RoomSense
//!
//! Procedural acoustics for game audio emitters. RoomSense probes the geometry around
//! an emitter with a handful of amortized raycasts and turns the results into smooth
//! effect parameters: reverb wetness and room size, a low-pass cutoff for occlusion,
//! and the emitter's own volume and pitch.
//!
//! ## Quick Start
//!
//! ```
//! use roomsense::math::{Pose, Vec3};
//! use roomsense::scene::BoxScene;
//! use roomsense::*;
//!
//! // Any physics engine can answer the ray queries; BoxScene is a small built-in one
//! let mut scene = BoxScene::new();
//! scene.add_room(Vec3::splat(-4.0), Vec3::splat(4.0), 0.5, "stone");
//!
//! // Forward the smoothed parameters to the mixer thread
//! let (sink, mixer) = ChannelSink::unbounded();
//! let mut emitter = AcousticEmitter::with_sink(AcousticsDesc::default(), sink)?;
//!
//! // Call once per physics step
//! let inputs = TickInputs::new(Pose::identity()).listener(Vec3::new(1.0, 0.0, 0.0));
//! for _ in 0..60 {
//!     emitter.tick(1.0 / 60.0, &scene, &inputs);
//! }
//!
//! for event in emitter.poll_events() {
//!     if let Some(targets) = event.targets() {
//!         println!("New room size: {}", targets.room_size);
//!     }
//! }
//!
//! let latest = mixer.try_iter().last();
//! assert!(latest.is_some());
//! # Ok::<(), RoomSenseError>(())
//! ```
//!
//! ## Key Components
//!
//! - **[`MaterialTable`](scene::MaterialTable)**: surface tags to absorption coefficients
//! - **[`DirectionalSampler`]**: one ray per tick, round-robin over fixed directions
//! - **[`AcousticEstimator`]**: room size, wetness and cutoff from a completed sweep
//! - **[`ParameterSmoother`]**: exponential glide from live values to targets
//! - **[`UpdateScheduler`]**: interleaves sweeps and re-estimations
//! - **[`AcousticEmitter`]**: drives all of the above from a single `tick`
//!
//! ## Threading
//!
//! Everything runs on the caller's thread, one fixed step at a time. Use
//! [`ChannelSink`] to hand live parameters to an audio thread.

pub mod config;
pub mod emitter;
pub mod error;
pub mod estimator;
pub mod events;
pub mod math;
pub mod sampler;
pub mod scene;
pub mod scheduler;
pub mod sink;
pub mod smoother;

pub use config::AcousticsDesc;
pub use emitter::{AcousticEmitter, TickInputs};
pub use error::RoomSenseError;
pub use estimator::{AcousticEstimator, AcousticTargets, FULLY_OPEN_CUTOFF_HZ};
pub use events::AcousticsEvent;
pub use sampler::{DirectionalSampler, SampleSlot};
pub use scheduler::UpdateScheduler;
pub use sink::{ChannelSink, EffectSink};
pub use smoother::{LiveParameters, ParameterSmoother};
