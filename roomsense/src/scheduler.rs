//! Tick cadence for sampling and re-estimation.
//!
//! Two phases interleave:
//!
//! - **Sampling**: active while a sweep is in progress, one ray per tick
//! - **Estimation**: a countdown of `update_frequency_seconds`; once it has expired
//!   *and* the current sweep is complete, the targets are recomputed, the countdown
//!   restarts and a new sweep begins
//!
//! Smoothing is not scheduled here; it runs every tick.

/// Phase state machine driving an emitter's sampler and estimator.
#[derive(Debug, Clone)]
pub struct UpdateScheduler {
    interval: f32,
    countdown: f32,
    sweeping: bool,
    sweep_ready: bool,
}

impl UpdateScheduler {
    /// Starts with a sweep in progress and a full countdown
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            countdown: interval,
            sweeping: true,
            sweep_ready: false,
        }
    }

    /// True while the sampler should cast one ray per tick
    pub fn is_sampling(&self) -> bool {
        self.sweeping
    }

    /// Marks the current sweep as complete and stops sampling
    pub fn complete_sweep(&mut self) {
        self.sweeping = false;
        self.sweep_ready = true;
    }

    /// Runs the countdown for one tick.
    ///
    /// Returns true when the estimator should run this tick. An expired countdown
    /// keeps reporting false until the sweep completes.
    pub fn advance(&mut self, dt: f32) -> bool {
        if dt > 0.0 {
            self.countdown = (self.countdown - dt).max(0.0);
        }
        self.estimation_due()
    }

    /// True if the countdown has expired and a full sweep is available
    pub fn estimation_due(&self) -> bool {
        self.countdown <= 0.0 && self.sweep_ready
    }

    /// Restarts the countdown and the next sweep.
    ///
    /// Called after every estimation attempt, including skipped ones.
    pub fn finish_estimation(&mut self) {
        self.countdown = self.interval;
        self.sweep_ready = false;
        self.sweeping = true;
    }

    /// Seconds left before the next estimation may run
    pub fn countdown(&self) -> f32 {
        self.countdown
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_sampling() {
        let scheduler = UpdateScheduler::new(0.5);
        assert!(scheduler.is_sampling());
        assert!(!scheduler.estimation_due());
        assert_eq!(scheduler.countdown(), 0.5);
    }

    #[test]
    fn test_waits_for_sweep_after_countdown() {
        let mut scheduler = UpdateScheduler::new(0.1);
        assert!(!scheduler.advance(0.25));
        assert_eq!(scheduler.countdown(), 0.0);
        assert!(scheduler.is_sampling());

        scheduler.complete_sweep();
        assert!(!scheduler.is_sampling());
        assert!(scheduler.advance(0.01));
    }

    #[test]
    fn test_waits_for_countdown_after_sweep() {
        let mut scheduler = UpdateScheduler::new(1.0);
        scheduler.complete_sweep();
        assert!(!scheduler.advance(0.5));
        assert!(!scheduler.is_sampling());
        assert!(scheduler.advance(0.5));
    }

    #[test]
    fn test_finish_restarts_cycle() {
        let mut scheduler = UpdateScheduler::new(1.0);
        scheduler.complete_sweep();
        assert!(scheduler.advance(2.0));

        scheduler.finish_estimation();
        assert!(scheduler.is_sampling());
        assert!(!scheduler.estimation_due());
        assert_eq!(scheduler.countdown(), scheduler.interval());
    }

    #[test]
    fn test_zero_dt_does_not_count_down() {
        let mut scheduler = UpdateScheduler::new(1.0);
        scheduler.complete_sweep();
        assert!(!scheduler.advance(0.0));
        assert_eq!(scheduler.countdown(), 1.0);
    }
}
