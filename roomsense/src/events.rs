//! Event types for RoomSense

use crate::estimator::AcousticTargets;

#[derive(Debug, Clone, PartialEq)]
pub enum AcousticsEvent {
    SweepCompleted { hits: usize, misses: usize },
    TargetsUpdated { targets: AcousticTargets },
    ListenerUnavailable,
}

impl AcousticsEvent {
    /// True for the outcome of an estimation attempt, successful or not
    pub fn is_estimation(&self) -> bool {
        matches!(
            self,
            Self::TargetsUpdated { .. } | Self::ListenerUnavailable
        )
    }

    pub fn targets(&self) -> Option<&AcousticTargets> {
        match self {
            Self::TargetsUpdated { targets } => Some(targets),
            _ => None,
        }
    }
}
