// SPDX-License-Identifier: MIT OR Apache-2.0
//! The procedure sequencer.
//!
//! One sequencer instance drives one experiment: it owns the part registry
//! and the procedure, advances on user trigger, and runs each step's
//! segment chain to completion before accepting the next trigger. A trigger
//! that arrives while a routine is in flight is dropped, not queued.

use crate::chain::{ChainRunner, ChainStatus};
use crate::part::PartRegistry;
use crate::procedure::Procedure;
use crate::segment::{Effect, Motion, Segment, TweenOp};
use crate::transform::Channel;

/// Duration of the cycle-reset routine in seconds
pub const DEFAULT_RESET_DURATION: f32 = 1.0;

/// Events raised by the sequencer, drained by the hosting surface
#[derive(Debug, Clone, PartialEq)]
pub enum SequencerEvent {
    /// A step began; the caption is published before its routine runs
    StepStarted {
        /// Step index
        step: usize,
        /// Caption for the tablet surface
        caption: String,
    },
    /// A step's routine ran to completion
    StepFinished {
        /// Step index
        step: usize,
    },
    /// The terminal step was reached; the completion overlay may show
    ProcedureCompleted,
    /// The reset routine finished and initial state is restored
    ResetApplied,
    /// A notice raised by a segment effect
    Notice {
        /// Notice text
        text: String,
    },
}

/// Drives a user through a fixed list of steps, one routine per step,
/// looping back to the initial presentation after the terminal step
#[derive(Debug)]
pub struct Sequencer {
    procedure: Procedure,
    registry: PartRegistry,
    current: Option<usize>,
    chain: Option<ChainRunner>,
    reset_duration: f32,
    pending_events: Vec<SequencerEvent>,
}

impl Sequencer {
    /// Create a sequencer over a procedure and a resolved part registry
    pub fn new(procedure: Procedure, registry: PartRegistry) -> Self {
        Self {
            procedure,
            registry,
            current: None,
            chain: None,
            reset_duration: DEFAULT_RESET_DURATION,
            pending_events: Vec::new(),
        }
    }

    /// Override the reset routine duration
    pub fn with_reset_duration(mut self, seconds: f32) -> Self {
        self.reset_duration = seconds;
        self
    }

    /// Index of the current step; `None` before the first trigger
    pub fn current_step(&self) -> Option<usize> {
        self.current
    }

    /// Whether a routine is currently executing
    pub fn is_in_flight(&self) -> bool {
        self.chain.is_some()
    }

    /// The procedure being sequenced
    pub fn procedure(&self) -> &Procedure {
        &self.procedure
    }

    /// The part registry
    pub fn registry(&self) -> &PartRegistry {
        &self.registry
    }

    /// Mutable access to the part registry
    pub fn registry_mut(&mut self) -> &mut PartRegistry {
        &mut self.registry
    }

    /// Caption of the current step, if any
    pub fn caption(&self) -> Option<&str> {
        self.current
            .and_then(|i| self.procedure.step(i))
            .map(|s| s.caption.as_str())
    }

    /// Advance to the next step.
    ///
    /// Returns `false` without touching any state when a routine is in
    /// flight or the procedure is empty. Otherwise increments the index
    /// modulo the step count, publishes the new caption, and dispatches
    /// the step's routine — the terminal sentinel dispatches the reset
    /// routine, wrapping the cycle back to the initial presentation.
    pub fn advance(&mut self) -> bool {
        if self.chain.is_some() {
            tracing::debug!("advance dropped: routine in flight");
            return false;
        }
        if self.procedure.is_empty() {
            return false;
        }

        let next = match self.current {
            None => 0,
            Some(i) => (i + 1) % self.procedure.len(),
        };
        let Some(step) = self.procedure.step(next) else {
            return false;
        };

        self.current = Some(next);
        self.pending_events.push(SequencerEvent::StepStarted {
            step: next,
            caption: step.caption.clone(),
        });
        tracing::debug!(step = next, caption = %step.caption, "step started");

        let chain = if step.terminal {
            self.pending_events.push(SequencerEvent::ProcedureCompleted);
            ChainRunner::new(reset_routine(&self.registry, self.reset_duration))
        } else {
            ChainRunner::new(step.segments.clone())
        };
        self.chain = Some(chain);
        true
    }

    /// Advance the in-flight routine by `dt` seconds of frame time
    pub fn tick(&mut self, dt: f32) {
        let Some(chain) = self.chain.as_mut() else {
            return;
        };
        let status = chain.tick(dt, &mut self.registry);
        let notices = chain.drain_notices();

        for text in notices {
            self.pending_events.push(SequencerEvent::Notice { text });
        }
        if status == ChainStatus::Finished {
            if let Some(step) = self.current {
                self.pending_events.push(SequencerEvent::StepFinished { step });
                if self.procedure.step(step).is_some_and(|s| s.terminal) {
                    self.pending_events.push(SequencerEvent::ResetApplied);
                }
            }
            self.chain = None;
        }
    }

    /// Drain buffered events
    pub fn take_events(&mut self) -> Vec<SequencerEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

/// Build the reset routine: every registered part interpolates back to its
/// recorded initial transform over one segment, then visibility flags are
/// restored
fn reset_routine(registry: &PartRegistry, duration: f32) -> Vec<Segment> {
    let mut ops = Vec::new();
    for part in registry.parts() {
        for channel in [Channel::Position, Channel::Rotation, Channel::Scale] {
            ops.push(TweenOp::new(part.id, channel, Motion::ToInitial));
        }
    }
    vec![Segment::new(duration)
        .with_ops(ops)
        .with_effect(Effect::RestoreVisibility)]
}
