use tokio::time::{interval, Duration, Instant, MissedTickBehavior};
use tracing::debug;

use wheel_engine::host::RunSummary;
use wheel_engine::{FrameQueue, SpinEngine, TickResult, UniformSource};

/// Deliver queued ticks on a wall-clock interval at `frame_rate` frames per second.
///
/// Late frames are skipped rather than bursted, so the engine sees the same
/// timestamps a display would hand it.
pub async fn run_realtime<R, F>(
    engine: &mut SpinEngine<FrameQueue, R>,
    queue: &FrameQueue,
    frame_rate: u32,
    mut on_tick: F,
) -> RunSummary
where
    R: UniformSource,
    F: FnMut(&TickResult),
{
    let period = Duration::from_secs_f64(1.0 / f64::from(frame_rate.max(1)));
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let origin = Instant::now();
    let mut summary = RunSummary::default();

    while queue.has_pending() {
        let now = ticker.tick().await;
        let Some(handle) = queue.take_pending() else {
            break;
        };
        let timestamp = now.saturating_duration_since(origin).as_secs_f64() * 1000.0;

        let result = engine.on_tick(handle, timestamp);
        on_tick(&result);
        match result {
            TickResult::Ignored => {}
            TickResult::Advanced(_) => summary.ticks += 1,
            TickResult::Settled(outcome) => {
                summary.ticks += 1;
                summary.outcome = Some(outcome);
            }
        }
    }

    debug!("Real-time loop finished after {} ticks", summary.ticks);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheel_engine::config::Config;
    use wheel_engine::{SequenceSource, SpinPhase};

    fn short_spin_config() -> Config {
        let mut config = Config::default();
        config.spin.duration_ms = 1000;
        config
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_spin_settles() {
        let queue = FrameQueue::new();
        let mut engine =
            SpinEngine::new(&short_spin_config(), queue.clone(), SequenceSource::for_index(5, 37));
        let outcomes = engine.subscribe();
        engine.spin();

        let summary = run_realtime(&mut engine, &queue, 10, |_| {}).await;

        // 0, 100, ..., 1000 ms
        assert_eq!(summary.ticks, 11);
        assert_eq!(summary.outcome.map(|o| o.index), Some(5));
        assert_eq!(outcomes.try_recv().ok(), summary.outcome);
        assert_eq!(engine.phase(), SpinPhase::Idle);
        assert!(!queue.has_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_one_tick_per_frame() {
        let queue = FrameQueue::new();
        let mut engine =
            SpinEngine::new(&short_spin_config(), queue.clone(), SequenceSource::for_index(0, 37));
        engine.spin();

        let mut angles = Vec::new();
        let summary = run_realtime(&mut engine, &queue, 20, |result| {
            if let TickResult::Advanced(frame) = result {
                angles.push(frame.angle);
            }
        })
        .await;

        // 0, 50, ..., 1000 ms with the last tick settling
        assert_eq!(summary.ticks, 21);
        assert_eq!(angles.len(), 20);
        assert!(angles.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_idle_engine_returns_immediately() {
        let queue = FrameQueue::new();
        let mut engine =
            SpinEngine::new(&Config::default(), queue.clone(), SequenceSource::new(vec![0.5]));

        let summary = run_realtime(&mut engine, &queue, 60, |_| {}).await;
        assert_eq!(summary, RunSummary::default());
    }
}
