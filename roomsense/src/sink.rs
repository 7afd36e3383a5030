//! Output of live parameters to the host's mixing graph.

use crate::error::{Result, RoomSenseError};
use crate::smoother::LiveParameters;
use crossbeam_channel::{Receiver, Sender};

/// Receives the smoothed parameters once per tick.
///
/// Implement this on the object that owns the emitter's bus effects (low-pass,
/// reverb) and its player (volume, pitch).
pub trait EffectSink {
    fn apply(&mut self, params: &LiveParameters) -> Result<()>;
}

/// Discards every update. Used when the caller reads `AcousticEmitter::live` itself.
impl EffectSink for () {
    fn apply(&mut self, _params: &LiveParameters) -> Result<()> {
        Ok(())
    }
}

/// Forwards live parameters to another thread, e.g. an audio render thread.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<LiveParameters>,
}

impl ChannelSink {
    pub fn new(sender: Sender<LiveParameters>) -> Self {
        Self { sender }
    }

    /// Creates a sink together with the receiving end of an unbounded channel
    pub fn unbounded() -> (Self, Receiver<LiveParameters>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self::new(sender), receiver)
    }
}

impl EffectSink for ChannelSink {
    fn apply(&mut self, params: &LiveParameters) -> Result<()> {
        self.sender.send(*params).map_err(|e| {
            RoomSenseError::Sink(format!("Failed to send live parameters: {}", e))
        })
    }
}
