//! Frame loop on a simulated clock, for headless runs and tests.

use tracing::debug;
use wheel_types::SpinOutcome;

use crate::random::UniformSource;
use crate::scheduler::FrameQueue;
use crate::spin::{SpinEngine, TickResult};

/// Clock that advances by a fixed frame interval per delivered tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualClock {
    origin: f64,
    now: f64,
    step: f64,
}

impl VirtualClock {
    pub fn new(origin: f64, step: f64) -> Self {
        Self { origin, now: origin, step }
    }

    pub fn from_frame_rate(frame_rate: u32) -> Self {
        Self::new(0.0, 1000.0 / f64::from(frame_rate.max(1)))
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn elapsed(&self) -> f64 {
        self.now - self.origin
    }

    pub fn advance(&mut self) {
        self.now += self.step;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Ticks the engine actually processed.
    pub ticks: usize,
    pub outcome: Option<SpinOutcome>,
}

/// Deliver queued ticks until the queue drains or the clock passes `stop_after_ms`.
///
/// Stopping early leaves the engine mid-spin with its registration still
/// outstanding; callers that discard the engine afterwards get it cancelled on drop.
pub fn run_virtual<R, F>(
    engine: &mut SpinEngine<FrameQueue, R>,
    queue: &FrameQueue,
    clock: &mut VirtualClock,
    stop_after_ms: Option<f64>,
    mut on_tick: F,
) -> RunSummary
where
    R: UniformSource,
    F: FnMut(&TickResult),
{
    let mut summary = RunSummary::default();

    loop {
        if stop_after_ms.is_some_and(|limit| clock.elapsed() > limit) {
            debug!("Stopping frame loop at {:.1}ms", clock.elapsed());
            break;
        }
        let Some(handle) = queue.take_pending() else {
            break;
        };

        let result = engine.on_tick(handle, clock.now());
        on_tick(&result);
        match result {
            TickResult::Ignored => {}
            TickResult::Advanced(_) => summary.ticks += 1,
            TickResult::Settled(outcome) => {
                summary.ticks += 1;
                summary.outcome = Some(outcome);
            }
        }
        clock.advance();
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::random::SequenceSource;
    use wheel_types::SpinPhase;

    #[test]
    fn test_clock_advances_by_step() {
        let mut clock = VirtualClock::new(100.0, 20.0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.now(), 140.0);
        assert_eq!(clock.elapsed(), 40.0);
    }

    #[test]
    fn test_frame_rate_step() {
        let mut clock = VirtualClock::from_frame_rate(50);
        clock.advance();
        assert_eq!(clock.now(), 20.0);
    }

    #[test]
    fn test_run_to_completion() {
        let queue = FrameQueue::new();
        let mut engine =
            SpinEngine::new(&Config::default(), queue.clone(), SequenceSource::for_index(22, 37));
        engine.spin();

        let mut clock = VirtualClock::new(0.0, 50.0);
        let mut seen = 0;
        let summary = run_virtual(&mut engine, &queue, &mut clock, None, |_| seen += 1);

        // 0, 50, ..., 5000 ms
        assert_eq!(summary.ticks, 101);
        assert_eq!(seen, 101);
        assert_eq!(summary.outcome.map(|o| o.index), Some(22));
        assert_eq!(engine.phase(), SpinPhase::Idle);
    }

    #[test]
    fn test_stop_early_leaves_spin_running() {
        let queue = FrameQueue::new();
        let mut engine =
            SpinEngine::new(&Config::default(), queue.clone(), SequenceSource::for_index(3, 37));
        engine.spin();

        let mut clock = VirtualClock::new(0.0, 100.0);
        let summary = run_virtual(&mut engine, &queue, &mut clock, Some(1000.0), |_| {});

        assert_eq!(summary.ticks, 11);
        assert!(summary.outcome.is_none());
        assert_eq!(engine.phase(), SpinPhase::Spinning);
        assert!(queue.has_pending());

        drop(engine);
        assert!(!queue.has_pending());
    }

    #[test]
    fn test_idle_engine_runs_nothing() {
        let queue = FrameQueue::new();
        let mut engine =
            SpinEngine::new(&Config::default(), queue.clone(), SequenceSource::new(vec![0.5]));

        let mut clock = VirtualClock::new(0.0, 16.0);
        let summary = run_virtual(&mut engine, &queue, &mut clock, None, |_| {});
        assert_eq!(summary, RunSummary::default());
    }
}
