use anyhow::Result;
use clap::Parser;
use roomsense::math::{Pose, Vec3};
use roomsense::scene::MaterialTable;
use roomsense::{AcousticEmitter, AcousticsDesc, ChannelSink, LiveParameters, TickInputs};
use std::thread;

use crate::scene;

/// Walk a sound emitter out of a stone hall and log how its acoustics change
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Physics ticks per second
    #[arg(long, default_value_t = 60)]
    pub tick_rate: u32,

    /// Length of the walk in seconds
    #[arg(long, default_value_t = 12.0)]
    pub duration: f32,

    /// Seconds between acoustic re-estimations
    #[arg(long, default_value_t = 0.5)]
    pub update_frequency: f32,

    /// Global time scale (e.g. 0.5 for slow motion)
    #[arg(long, default_value_t = 1.0)]
    pub time_scale: f32,

    /// Drop the listener for the middle third of the walk
    #[arg(long)]
    pub lose_listener: bool,

    /// Log every sweep and estimation
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run_walkthrough(args: &Args) -> Result<()> {
    let tick_rate = args.tick_rate.max(1);
    let dt = 1.0 / tick_rate as f32;
    let ticks = (args.duration.max(0.0) * tick_rate as f32).round() as usize;

    let desc = AcousticsDesc::new()
        .max_raycast_distance(30.0)
        .update_frequency_seconds(args.update_frequency)
        .max_reverb_wetness(0.6)
        .wall_lowpass_cutoff_hz(600.0)
        .materials(MaterialTable::with_presets());

    let (sink, receiver) = ChannelSink::unbounded();
    let mut emitter = AcousticEmitter::with_sink(desc, sink)?;
    let world = scene::hall_with_courtyard();
    let listener = Vec3::new(-4.0, 1.7, 2.0);

    log::info!(
        "Walking emitter for {:.1} s at {} ticks/s (listener at {:?})",
        args.duration,
        tick_rate,
        listener
    );

    // Stand-in for the audio thread that owns the bus effects
    let report_every = tick_rate as usize / 2;
    let mixer = thread::spawn(move || {
        let mut applied = 0usize;
        let mut last: Option<LiveParameters> = None;
        for params in receiver.iter() {
            if applied % report_every.max(1) == 0 {
                log::info!(
                    "mixer: volume {:>6.1} dB | pitch {:.2} | cutoff {:>7.0} Hz | wet {:.2} | room {:.2}",
                    params.volume_db,
                    params.pitch_scale,
                    params.cutoff_hz,
                    params.wetness,
                    params.room_size
                );
            }
            applied += 1;
            last = Some(params);
        }
        (applied, last)
    });

    for tick in 0..ticks {
        let progress = tick as f32 / ticks.max(1) as f32;
        let emitter_pose = Pose::from_position(scene::walk_path(progress));
        let mut inputs = TickInputs::new(emitter_pose).time_scale(args.time_scale);
        if !(args.lose_listener && (1.0f32 / 3.0..2.0 / 3.0).contains(&progress)) {
            inputs = inputs.listener(listener);
        }

        emitter.tick(dt, &world, &inputs);

        for event in emitter.poll_events() {
            if let Some(targets) = event.targets() {
                log::info!(
                    "targets at x = {:>5.1}: wet {:.2} | room {:.2} | cutoff {:.0} Hz",
                    inputs.emitter.position.x,
                    targets.reverb_wetness,
                    targets.room_size,
                    targets.lowpass_cutoff_hz
                );
            } else {
                log::debug!("{:?}", event);
            }
        }
    }

    // Closing the channel ends the mixer loop
    drop(emitter);
    let (applied, last) = mixer
        .join()
        .map_err(|_| anyhow::anyhow!("mixer thread panicked"))?;

    log::info!("Mixer applied {} parameter updates", applied);
    if let Some(last) = last {
        log::info!("Final parameters: {:?}", last);
    }

    Ok(())
}
