use crate::config::AcousticsDesc;
use crate::error::Result;
use crate::estimator::{AcousticEstimator, AcousticTargets};
use crate::events::AcousticsEvent;
use crate::math::{Pose, Vec3};
use crate::sampler::{DirectionalSampler, SampleSlot};
use crate::scene::{MaterialTable, RayTracer};
use crate::scheduler::UpdateScheduler;
use crate::sink::EffectSink;
use crate::smoother::{LiveParameters, ParameterSmoother};
use crossbeam_channel::{Receiver, Sender};

/// Pending events kept before newer ones are dropped
const EVENT_QUEUE_CAPACITY: usize = 64;

/// Per-tick state supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInputs {
    /// Emitter position and orientation
    pub emitter: Pose,
    /// Listener position, `None` if there is no listener this tick
    pub listener: Option<Vec3>,
    /// Global time scale of the host (1.0 = real time)
    pub time_scale: f32,
}

impl TickInputs {
    pub fn new(emitter: Pose) -> Self {
        Self {
            emitter,
            listener: None,
            time_scale: 1.0,
        }
    }

    pub fn listener(mut self, position: Vec3) -> Self {
        self.listener = Some(position);
        self
    }

    pub fn time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}

/// Procedural acoustics for one sound emitter.
///
/// `AcousticEmitter` ties the pieces together and is driven by calling
/// [`tick`](Self::tick) once per fixed physics step:
///
/// 1. While a sweep is in progress, one sample ray is cast
/// 2. When the update countdown has expired and the sweep is complete, the
///    acoustic targets are recomputed (skipped if there is no listener)
/// 3. Live parameters are smoothed toward the targets and handed to the sink
///
/// At most two rays are cast per tick, whatever the number of directions.
///
/// # Example
///
/// ```
/// use roomsense::math::{Pose, Vec3};
/// use roomsense::scene::BoxScene;
/// use roomsense::{AcousticEmitter, AcousticsDesc, TickInputs};
///
/// let mut scene = BoxScene::new();
/// scene.add_room(Vec3::splat(-5.0), Vec3::splat(5.0), 0.5, "stone");
///
/// let mut emitter = AcousticEmitter::new(AcousticsDesc::default())?;
/// let inputs = TickInputs::new(Pose::identity()).listener(Vec3::new(2.0, 0.0, 0.0));
///
/// for _ in 0..120 {
///     let live = emitter.tick(1.0 / 60.0, &scene, &inputs);
///     assert!(live.wetness >= 0.0);
/// }
/// # Ok::<(), roomsense::RoomSenseError>(())
/// ```
pub struct AcousticEmitter<S: EffectSink = ()> {
    materials: MaterialTable,
    sampler: DirectionalSampler,
    estimator: AcousticEstimator,
    smoother: ParameterSmoother,
    scheduler: UpdateScheduler,
    targets: AcousticTargets,
    sink: S,
    sink_failed: bool,
    event_sender: Sender<AcousticsEvent>,
    event_receiver: Receiver<AcousticsEvent>,
}

impl AcousticEmitter<()> {
    /// Creates an emitter without an effect sink; read [`live`](Self::live) instead
    pub fn new(desc: AcousticsDesc) -> Result<Self> {
        Self::with_sink(desc, ())
    }
}

impl<S: EffectSink> AcousticEmitter<S> {
    /// Validates `desc` and creates an emitter that pushes live parameters to `sink`.
    ///
    /// # Errors
    ///
    /// Returns `RoomSenseError::Configuration` if any field of `desc` is invalid.
    pub fn with_sink(desc: AcousticsDesc, sink: S) -> Result<Self> {
        desc.validate()?;

        log::info!(
            "Creating acoustic emitter (directions: {}, max distance: {} m, update every {} s)",
            desc.directions.len(),
            desc.max_raycast_distance,
            desc.update_frequency_seconds
        );

        let sampler = DirectionalSampler::new(
            &desc.directions,
            desc.max_raycast_distance,
            desc.collision_mask,
        );
        let estimator = AcousticEstimator::new(&desc);
        let smoother = ParameterSmoother::new(
            LiveParameters::silent(desc.pitch_scale),
            desc.lerp_speed,
            desc.max_reverb_wetness,
        );
        let scheduler = UpdateScheduler::new(desc.update_frequency_seconds);
        let targets = AcousticTargets::initial(desc.volume_db, desc.pitch_scale);
        let (event_sender, event_receiver) = crossbeam_channel::bounded(EVENT_QUEUE_CAPACITY);

        Ok(Self {
            materials: desc.materials,
            sampler,
            estimator,
            smoother,
            scheduler,
            targets,
            sink,
            sink_failed: false,
            event_sender,
            event_receiver,
        })
    }

    /// Advances the emitter by one fixed step of `dt` seconds.
    ///
    /// Returns the live parameters after smoothing; the same values are passed to
    /// the effect sink.
    pub fn tick<T: RayTracer + ?Sized>(
        &mut self,
        dt: f32,
        tracer: &T,
        inputs: &TickInputs,
    ) -> &LiveParameters {
        if self.scheduler.is_sampling()
            && self
                .sampler
                .sample_next(tracer, &inputs.emitter, &self.materials)
        {
            self.scheduler.complete_sweep();

            let hits = self.sampler.slots().iter().filter(|s| s.is_hit()).count();
            let misses = self.sampler.len() - hits;
            log::debug!("Sweep completed: {} hits, {} misses", hits, misses);
            self.emit(AcousticsEvent::SweepCompleted { hits, misses });
        }

        if self.scheduler.advance(dt) {
            self.estimate(tracer, inputs);
            self.scheduler.finish_estimation();
        }

        let live = *self.smoother.advance(dt, &self.targets, inputs.time_scale);
        self.push(&live);
        self.smoother.live()
    }

    fn estimate<T: RayTracer + ?Sized>(&mut self, tracer: &T, inputs: &TickInputs) {
        let Some(listener) = inputs.listener else {
            log::debug!("No listener available, keeping previous acoustic targets");
            self.emit(AcousticsEvent::ListenerUnavailable);
            return;
        };

        self.targets = self.estimator.recompute(
            self.sampler.slots(),
            &self.materials,
            tracer,
            inputs.emitter.position,
            listener,
        );
        self.emit(AcousticsEvent::TargetsUpdated {
            targets: self.targets,
        });
    }

    fn push(&mut self, live: &LiveParameters) {
        match self.sink.apply(live) {
            Ok(()) => self.sink_failed = false,
            Err(e) => {
                if !self.sink_failed {
                    log::warn!("Effect sink rejected live parameters: {}", e);
                }
                self.sink_failed = true;
            }
        }
    }

    fn emit(&self, event: AcousticsEvent) {
        // full queue: nobody is polling
        let _ = self.event_sender.try_send(event);
    }

    /// Drains all events emitted since the last call
    pub fn poll_events(&self) -> Vec<AcousticsEvent> {
        self.event_receiver.try_iter().collect()
    }

    /// Targets the live parameters are currently moving toward
    pub fn targets(&self) -> &AcousticTargets {
        &self.targets
    }

    pub fn live(&self) -> &LiveParameters {
        self.smoother.live()
    }

    /// Latest per-direction samples, index-aligned with the direction set
    pub fn slots(&self) -> &[SampleSlot] {
        self.sampler.slots()
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    pub fn scheduler(&self) -> &UpdateScheduler {
        &self.scheduler
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RoomSenseError;
    use crate::estimator::FULLY_OPEN_CUTOFF_HZ;
    use crate::scene::{AcousticMaterial, BoxScene, CollisionMask, TaggedBox};
    use crate::sink::ChannelSink;
    use crate::smoother::SILENT_VOLUME_DB;

    const DT: f32 = 1.0 / 60.0;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn materials() -> MaterialTable {
        let mut table = MaterialTable::new(AcousticMaterial::new("generic", 0.0));
        table.add(AcousticMaterial::new("stone", 0.02));
        table.add(AcousticMaterial::new("WOOD", 1.0));
        table
    }

    fn desc() -> AcousticsDesc {
        AcousticsDesc::new()
            .max_raycast_distance(30.0)
            .update_frequency_seconds(0.5)
            .max_reverb_wetness(1.0)
            .wall_lowpass_cutoff_hz(600.0)
            .materials(materials())
    }

    fn stone_room() -> BoxScene {
        let mut scene = BoxScene::new();
        scene.add_room(Vec3::splat(-3.0), Vec3::splat(3.0), 0.5, "stone");
        scene
    }

    fn run<S: EffectSink, T: RayTracer>(
        emitter: &mut AcousticEmitter<S>,
        scene: &T,
        inputs: &TickInputs,
        ticks: usize,
    ) -> Vec<AcousticsEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            emitter.tick(DT, scene, inputs);
            events.extend(emitter.poll_events());
        }
        events
    }

    #[test]
    fn test_rejects_invalid_configuration() {
        let result = AcousticEmitter::new(desc().max_raycast_distance(0.0));
        assert!(matches!(result, Err(RoomSenseError::Configuration(_))));

        let result = AcousticEmitter::new(desc().collision_mask(CollisionMask::NONE));
        assert!(matches!(result, Err(RoomSenseError::Configuration(_))));
    }

    #[test]
    fn test_enclosed_room_is_wet() {
        init_logger();
        let scene = stone_room();
        let mut emitter = AcousticEmitter::new(desc()).expect("valid configuration");
        let inputs = TickInputs::new(Pose::identity()).listener(Vec3::new(1.0, 0.0, 0.0));

        let events = run(&mut emitter, &scene, &inputs, 40);
        let targets = events
            .iter()
            .find_map(|e| e.targets())
            .copied()
            .expect("one estimation within 40 ticks");

        // Ten stone hits at 0.02 absorption each
        assert!((targets.reverb_wetness - 0.98).abs() < 1e-5);
        let expected_room = (6.0 * 3.0 + 4.0 * 3.0 * std::f32::consts::SQRT_2) / 30.0 / 10.0;
        assert!((targets.room_size - expected_room).abs() < 1e-4);
        assert_eq!(targets.lowpass_cutoff_hz, FULLY_OPEN_CUTOFF_HZ);
        assert!(emitter.slots().iter().all(|s| s.is_hit() && s.material == 1));
    }

    #[test]
    fn test_open_field_is_dry() {
        let scene = BoxScene::new();
        let mut emitter = AcousticEmitter::new(desc()).expect("valid configuration");
        let inputs = TickInputs::new(Pose::identity()).listener(Vec3::new(1.0, 0.0, 0.0));

        let events = run(&mut emitter, &scene, &inputs, 40);
        assert!(events.iter().any(|e| e.targets().is_some()));
        assert_eq!(emitter.targets().reverb_wetness, 0.0);
        assert_eq!(emitter.targets().room_size, 0.0);
        assert!(emitter.slots().iter().all(|s| !s.is_hit()));
    }

    #[test]
    fn test_single_wood_surface_scenario() {
        // Only the downward ray hits: a wooden floor 15 m below
        let mut scene = BoxScene::new();
        scene.add(
            TaggedBox::new(Vec3::new(-1.0, -16.0, -1.0), Vec3::new(1.0, -15.0, 1.0))
                .with_tag("WOOD"),
        );
        let mut emitter = AcousticEmitter::new(desc()).expect("valid configuration");
        let inputs = TickInputs::new(Pose::identity()).listener(Vec3::new(1.0, 0.0, 0.0));

        run(&mut emitter, &scene, &inputs, 40);
        let targets = emitter.targets();
        assert!((targets.room_size - 0.05).abs() < 1e-6);
        assert!(targets.reverb_wetness.abs() < 1e-6);
    }

    #[test]
    fn test_estimation_waits_for_full_sweep() {
        let scene = stone_room();
        let mut emitter = AcousticEmitter::new(desc().update_frequency_seconds(0.01))
            .expect("valid configuration");
        let inputs = TickInputs::new(Pose::identity()).listener(Vec3::new(1.0, 0.0, 0.0));

        let events = run(&mut emitter, &scene, &inputs, 9);
        assert!(events.is_empty());
        assert!(emitter.scheduler().is_sampling());

        let events = run(&mut emitter, &scene, &inputs, 1);
        assert!(matches!(events[0], AcousticsEvent::SweepCompleted { hits: 10, misses: 0 }));
        assert!(events[1].targets().is_some());
        assert!(emitter.scheduler().is_sampling());
    }

    #[test]
    fn test_sampling_pauses_between_sweeps() {
        let scene = stone_room();
        let mut emitter = AcousticEmitter::new(desc().update_frequency_seconds(1.0))
            .expect("valid configuration");
        let inputs = TickInputs::new(Pose::identity()).listener(Vec3::new(1.0, 0.0, 0.0));

        let events = run(&mut emitter, &scene, &inputs, 30);
        let sweeps = events
            .iter()
            .filter(|e| matches!(e, AcousticsEvent::SweepCompleted { .. }))
            .count();
        assert_eq!(sweeps, 1);
        assert!(!emitter.scheduler().is_sampling());
        assert!(!events.iter().any(|e| e.is_estimation()));
    }

    #[test]
    fn test_missing_listener_holds_targets() {
        let scene = stone_room();
        let mut emitter = AcousticEmitter::new(desc()).expect("valid configuration");
        let initial = *emitter.targets();

        let inputs = TickInputs::new(Pose::identity());
        let events = run(&mut emitter, &scene, &inputs, 35);

        assert!(events.contains(&AcousticsEvent::ListenerUnavailable));
        assert!(!events.iter().any(|e| e.targets().is_some()));
        assert_eq!(*emitter.targets(), initial);
        // The countdown restarted and a new sweep is under way
        assert!(emitter.scheduler().countdown() > 0.0);
        assert!(emitter.scheduler().is_sampling());
    }

    #[test]
    fn test_obstructed_listener_is_muffled() {
        let mut scene = BoxScene::new();
        scene.add(TaggedBox::new(Vec3::new(4.0, -5.0, -5.0), Vec3::new(5.0, 5.0, 5.0)));
        let mut emitter = AcousticEmitter::new(desc()).expect("valid configuration");
        let inputs = TickInputs::new(Pose::identity()).listener(Vec3::new(10.0, 0.0, 0.0));

        run(&mut emitter, &scene, &inputs, 40);
        assert!((emitter.targets().lowpass_cutoff_hz - 240.0).abs() < 1e-2);

        run(&mut emitter, &scene, &inputs, 600);
        assert!((emitter.live().cutoff_hz - 240.0).abs() < 1.0);
    }

    #[test]
    fn test_volume_ramps_up_from_silence() {
        let scene = BoxScene::new();
        let mut emitter =
            AcousticEmitter::new(desc().volume_db(-6.0)).expect("valid configuration");
        assert_eq!(emitter.live().volume_db, SILENT_VOLUME_DB);

        let inputs = TickInputs::new(Pose::identity());
        let first = emitter.tick(DT, &scene, &inputs).volume_db;
        assert!(first > SILENT_VOLUME_DB && first < -6.0);

        run(&mut emitter, &scene, &inputs, 1200);
        assert!((emitter.live().volume_db + 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_channel_sink_receives_every_tick() {
        let scene = stone_room();
        let (sink, receiver) = ChannelSink::unbounded();
        let mut emitter = AcousticEmitter::with_sink(desc(), sink).expect("valid configuration");
        let inputs = TickInputs::new(Pose::identity()).listener(Vec3::new(1.0, 0.0, 0.0));

        run(&mut emitter, &scene, &inputs, 25);
        let received: Vec<LiveParameters> = receiver.try_iter().collect();
        assert_eq!(received.len(), 25);
        assert_eq!(received.last(), Some(emitter.live()));

        // A closed channel is logged, not fatal
        drop(receiver);
        emitter.tick(DT, &scene, &inputs);
    }
}
