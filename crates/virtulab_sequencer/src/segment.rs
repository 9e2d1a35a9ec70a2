// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tween segment descriptors.
//!
//! A routine is an ordered list of [`Segment`]s. Each segment interpolates
//! one or more part channels over a shared duration, applies its discrete
//! effects on completion, then waits out an optional pacing delay before the
//! next segment starts. Start values are captured from live part state when
//! the segment begins, so descriptors stay valid wherever the previous
//! segment left the scene.

use crate::interp::Interpolation;
use crate::part::PartId;
use crate::transform::Channel;
use serde::{Deserialize, Serialize};

/// How a tween op moves from its captured start value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Linear interpolation to a fixed target
    To {
        /// End value
        target: [f32; 3],
    },
    /// Piecewise rate: start to `via` over the first half of the segment,
    /// `via` to `target` over the second half
    TwoPhase {
        /// Waypoint reached at the segment's half-way fraction
        via: [f32; 3],
        /// End value
        target: [f32; 3],
    },
    /// Sinusoidal oscillation around the captured start. The field keeps
    /// its last oscillation value when the segment ends; there is no
    /// terminal settle unless a later segment resets it.
    Oscillate {
        /// Per-component oscillation amplitude
        amplitude: [f32; 3],
        /// Number of half-cycles over the segment duration
        cycles: f32,
    },
    /// Linear interpolation back to the part's recorded initial value
    ToInitial,
}

impl Motion {
    /// Sample the motion at fraction `t` in `[0, 1]`.
    ///
    /// `start` is the value captured when the segment began; `initial` is
    /// the part's registered initial value for the channel.
    pub fn sample(&self, start: [f32; 3], initial: [f32; 3], t: f32) -> [f32; 3] {
        let t = Interpolation::clamp01(t);
        match self {
            Motion::To { target } => Interpolation::lerp_vec3(start, *target, t),
            Motion::TwoPhase { via, target } => {
                if t <= 0.5 {
                    Interpolation::lerp_vec3(start, *via, t * 2.0)
                } else {
                    Interpolation::lerp_vec3(*via, *target, (t - 0.5) * 2.0)
                }
            }
            Motion::Oscillate { amplitude, cycles } => [
                Interpolation::oscillate(start[0], amplitude[0], *cycles, t),
                Interpolation::oscillate(start[1], amplitude[1], *cycles, t),
                Interpolation::oscillate(start[2], amplitude[2], *cycles, t),
            ],
            Motion::ToInitial => Interpolation::lerp_vec3(start, initial, t),
        }
    }
}

/// One interpolated channel within a segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweenOp {
    /// Target part
    pub part: PartId,
    /// Channel being written
    pub channel: Channel,
    /// Motion applied to the channel
    pub motion: Motion,
}

impl TweenOp {
    /// Create an op
    pub fn new(part: PartId, channel: Channel, motion: Motion) -> Self {
        Self { part, channel, motion }
    }

    /// Move a part's position to a target
    pub fn position(part: PartId, target: [f32; 3]) -> Self {
        Self::new(part, Channel::Position, Motion::To { target })
    }

    /// Rotate a part to a target Euler rotation
    pub fn rotation(part: PartId, target: [f32; 3]) -> Self {
        Self::new(part, Channel::Rotation, Motion::To { target })
    }

    /// Scale a part to a target
    pub fn scale(part: PartId, target: [f32; 3]) -> Self {
        Self::new(part, Channel::Scale, Motion::To { target })
    }

    /// Shake a part's rotation around its current orientation
    pub fn shake(part: PartId, amplitude: [f32; 3], cycles: f32) -> Self {
        Self::new(part, Channel::Rotation, Motion::Oscillate { amplitude, cycles })
    }

    /// Return a channel to the part's registered initial value
    pub fn home(part: PartId, channel: Channel) -> Self {
        Self::new(part, channel, Motion::ToInitial)
    }
}

/// Discrete state change applied when a segment completes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Show or hide a single part
    SetVisible {
        /// Target part
        part: PartId,
        /// New visibility
        visible: bool,
    },
    /// Show or hide every part carrying a group tag
    SetGroupVisible {
        /// Group tag
        group: String,
        /// New visibility
        visible: bool,
    },
    /// Instantly set a part's scale, outside any tween
    SetScale {
        /// Target part
        part: PartId,
        /// New scale
        scale: [f32; 3],
    },
    /// Restore every part's registered visibility flag
    RestoreVisibility,
    /// Surface a notice string to the hosting overlay
    Notice {
        /// Notice text
        text: String,
    },
}

/// A time-bounded interpolation of one or more part channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Ops sharing this segment's elapsed-time clock
    pub ops: Vec<TweenOp>,
    /// Segment duration in seconds
    pub duration: f32,
    /// Pacing delay after completion, before the next segment starts
    pub delay_after: f32,
    /// Effects applied at completion, before the pacing delay
    pub effects: Vec<Effect>,
}

impl Segment {
    /// Create an empty segment of the given duration
    pub fn new(duration: f32) -> Self {
        Self {
            ops: Vec::new(),
            duration,
            delay_after: 0.0,
            effects: Vec::new(),
        }
    }

    /// Add an op, builder style
    pub fn with_op(mut self, op: TweenOp) -> Self {
        self.ops.push(op);
        self
    }

    /// Add several ops sharing this segment's clock
    pub fn with_ops(mut self, ops: impl IntoIterator<Item = TweenOp>) -> Self {
        self.ops.extend(ops);
        self
    }

    /// Set the pacing delay after completion
    pub fn with_delay_after(mut self, delay: f32) -> Self {
        self.delay_after = delay;
        self
    }

    /// Add a completion effect
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}
