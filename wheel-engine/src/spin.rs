//! Spin state machine.
//!
//! `Idle --spin()--> Spinning --duration elapsed--> Idle`. While spinning the
//! engine holds exactly one tick registration with the host scheduler and
//! renews it from inside each tick until the spin settles. Teardown (or
//! dropping the engine) revokes whatever registration is outstanding.

use crossbeam_channel::{unbounded, Receiver, Sender, TrySendError};
use glam::DVec2;
use tracing::{debug, info, trace, warn};
use wheel_types::{SpinOutcome, SpinPhase};

use crate::config::Config;
use crate::geometry::segment_center_angle;
use crate::layout::{generate_layout, WheelLayout};
use crate::motion::{BallFrame, MotionProfile};
use crate::random::{unit_to_index, UniformSource};
use crate::scheduler::FrameScheduler;

/// Angle the element comes to rest at for a winning segment.
pub fn resting_angle(index: usize) -> f64 {
    segment_center_angle(index)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinState {
    pub phase: SpinPhase,
    /// Winning segment of the current spin, kept after it settles.
    pub outcome_index: Option<usize>,
    pub frame: BallFrame,
    /// Host clock reading of the first tick of the current spin.
    pub start_timestamp: Option<f64>,
}

/// What a delivered tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickResult {
    /// Not the registration the engine is waiting on.
    Ignored,
    Advanced(BallFrame),
    Settled(SpinOutcome),
}

pub struct SpinEngine<S: FrameScheduler, R: UniformSource> {
    layout: &'static WheelLayout,
    profile: MotionProfile,
    duration_ms: f64,
    scheduler: S,
    source: R,
    state: SpinState,
    pending: Option<S::Handle>,
    subscribers: Vec<Sender<SpinOutcome>>,
    last_outcome: Option<SpinOutcome>,
}

impl<S: FrameScheduler, R: UniformSource> SpinEngine<S, R> {
    pub fn new(config: &Config, scheduler: S, source: R) -> Self {
        Self::with_profile(
            MotionProfile::new(&config.spin, &config.wheel),
            config.spin.duration_ms(),
            scheduler,
            source,
        )
    }

    pub fn with_profile(profile: MotionProfile, duration_ms: f64, scheduler: S, source: R) -> Self {
        Self {
            layout: generate_layout(),
            profile,
            duration_ms: duration_ms.max(1.0),
            scheduler,
            source,
            state: SpinState {
                phase: SpinPhase::Idle,
                outcome_index: None,
                frame: profile.home(),
                start_timestamp: None,
            },
            pending: None,
            subscribers: Vec::new(),
            last_outcome: None,
        }
    }

    /// Start a spin. Returns `false` without touching any state if one is already running.
    pub fn spin(&mut self) -> bool {
        if self.state.phase == SpinPhase::Spinning {
            debug!("Spin requested while spinning, ignoring");
            return false;
        }

        let index = unit_to_index(self.source.next_unit(), self.layout.len());

        self.state = SpinState {
            phase: SpinPhase::Spinning,
            outcome_index: Some(index),
            frame: self.profile.home(),
            start_timestamp: None,
        };
        self.pending = Some(self.scheduler.request_tick());

        info!("Spin started, {}ms to settle", self.duration_ms);
        debug!("Committed outcome index {}", index);
        true
    }

    /// Deliver a tick registered by this engine.
    pub fn on_tick(&mut self, handle: S::Handle, timestamp: f64) -> TickResult {
        if self.pending != Some(handle) {
            trace!("Ignoring tick {:?}, waiting on {:?}", handle, self.pending);
            return TickResult::Ignored;
        }
        self.pending = None;

        let Some(index) = self.state.outcome_index else {
            warn!("Tick delivered without a committed outcome");
            self.state.phase = SpinPhase::Idle;
            return TickResult::Ignored;
        };

        let start = *self.state.start_timestamp.get_or_insert(timestamp);
        let elapsed = (timestamp - start).max(0.0);
        let progress = (elapsed / self.duration_ms).min(1.0);
        let target = resting_angle(index);

        if progress < 1.0 {
            self.state.frame = self.profile.sample(progress, target);
            self.pending = Some(self.scheduler.request_tick());
            trace!(
                "Tick at {:.1}ms: progress {:.3}, angle {:.3}, radius {:.1}",
                elapsed,
                progress,
                self.state.frame.angle,
                self.state.frame.radius
            );
            TickResult::Advanced(self.state.frame)
        } else {
            TickResult::Settled(self.settle(index, target))
        }
    }

    fn settle(&mut self, index: usize, target: f64) -> SpinOutcome {
        self.state.frame = self.profile.resting(target);
        self.state.phase = SpinPhase::Idle;
        self.state.start_timestamp = None;

        let outcome = SpinOutcome::new(index, self.layout.segments()[index]);
        self.last_outcome = Some(outcome);
        info!("Ball landed on: {} ({})", outcome.number, outcome.color);

        self.subscribers.retain(|tx| match tx.try_send(outcome) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("Outcome subscriber is full, dropping notification");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });

        outcome
    }

    /// Revoke the outstanding tick and return to idle. Safe to call in any state.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.pending.take() {
            debug!("Cancelling pending tick {:?}", handle);
            self.scheduler.cancel_tick(handle);
        }
        if self.state.phase == SpinPhase::Spinning {
            debug!("Spin aborted before settling");
            self.state.phase = SpinPhase::Idle;
            self.state.outcome_index = None;
            self.state.start_timestamp = None;
        }
    }

    /// Channel receiving one [`SpinOutcome`] per completed spin.
    pub fn subscribe(&mut self) -> Receiver<SpinOutcome> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn phase(&self) -> SpinPhase {
        self.state.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.state.phase == SpinPhase::Spinning
    }

    pub fn outcome_index(&self) -> Option<usize> {
        self.state.outcome_index
    }

    pub fn frame(&self) -> BallFrame {
        self.state.frame
    }

    pub fn position(&self) -> DVec2 {
        self.state.frame.position
    }

    pub fn start_timestamp(&self) -> Option<f64> {
        self.state.start_timestamp
    }

    pub fn pending_tick(&self) -> Option<S::Handle> {
        self.pending
    }

    pub fn last_outcome(&self) -> Option<SpinOutcome> {
        self.last_outcome
    }

    pub fn profile(&self) -> &MotionProfile {
        &self.profile
    }
}

impl<S: FrameScheduler, R: UniformSource> Drop for SpinEngine<S, R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
