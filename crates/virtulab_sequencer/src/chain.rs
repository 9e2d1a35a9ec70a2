// SPDX-License-Identifier: MIT OR Apache-2.0
//! Generic driver for ordered segment chains.
//!
//! One runner consumes an explicit list of [`Segment`] descriptors in order.
//! Segment `k + 1` starts only after segment `k` has written its final
//! values, applied its effects and waited out its pacing delay, so
//! sub-animations within a step are strictly sequential. Ops inside one
//! segment share the segment clock and may overlap freely.

use crate::interp::Interpolation;
use crate::part::PartRegistry;
use crate::segment::{Effect, Segment};
use crate::transform::Channel;

/// Progress report from [`ChainRunner::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStatus {
    /// At least one segment or delay is still pending
    Running,
    /// Every segment has completed
    Finished,
}

/// Start value captured when a segment begins
#[derive(Debug, Clone, Copy)]
struct Captured {
    start: [f32; 3],
    initial: [f32; 3],
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    /// Next segment needs its start values captured
    Entering,
    /// Segment clock running
    Tweening { elapsed: f32 },
    /// Segment done, pacing delay counting down
    Delaying { remaining: f32 },
    /// Chain exhausted
    Finished,
}

/// Drives one routine: an ordered chain of tween segments
#[derive(Debug)]
pub struct ChainRunner {
    segments: Vec<Segment>,
    index: usize,
    phase: Phase,
    captured: Vec<Option<Captured>>,
    notices: Vec<String>,
}

impl ChainRunner {
    /// Create a runner over an ordered segment list
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            index: 0,
            phase: Phase::Entering,
            captured: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Whether the chain has run to completion
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// Index of the segment currently executing, if any
    pub fn current_segment(&self) -> Option<usize> {
        match self.phase {
            Phase::Tweening { .. } | Phase::Delaying { .. } => Some(self.index),
            Phase::Entering if self.index < self.segments.len() => Some(self.index),
            _ => None,
        }
    }

    /// Drain notices raised by completed segments
    pub fn drain_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Advance the chain by `dt` seconds of frame time.
    ///
    /// A single large `dt` may cross segment boundaries; capture and
    /// completion ordering is preserved because each segment's final values
    /// are written before the next segment records its starts.
    pub fn tick(&mut self, dt: f32, registry: &mut PartRegistry) -> ChainStatus {
        let mut budget = dt;
        loop {
            match self.phase {
                Phase::Finished => return ChainStatus::Finished,
                Phase::Entering => {
                    if self.index >= self.segments.len() {
                        self.phase = Phase::Finished;
                        return ChainStatus::Finished;
                    }
                    self.capture(registry);
                    self.phase = Phase::Tweening { elapsed: 0.0 };
                }
                Phase::Tweening { elapsed } => {
                    let elapsed = elapsed + budget;
                    budget = 0.0;
                    let duration = self.segments[self.index].duration;
                    let t = if duration > 0.0 {
                        Interpolation::clamp01(elapsed / duration)
                    } else {
                        1.0
                    };
                    self.apply(t, registry);
                    if t >= 1.0 {
                        self.apply_effects(registry);
                        budget = (elapsed - duration).max(0.0);
                        self.phase = Phase::Delaying {
                            remaining: self.segments[self.index].delay_after,
                        };
                    } else {
                        self.phase = Phase::Tweening { elapsed };
                        return ChainStatus::Running;
                    }
                }
                Phase::Delaying { remaining } => {
                    if budget >= remaining {
                        budget -= remaining;
                        self.index += 1;
                        self.phase = Phase::Entering;
                    } else {
                        self.phase = Phase::Delaying {
                            remaining: remaining - budget,
                        };
                        return ChainStatus::Running;
                    }
                }
            }
        }
    }

    /// Record start values for the segment about to run. Ops whose part is
    /// missing are skipped for the whole segment rather than erroring into
    /// the frame loop.
    fn capture(&mut self, registry: &PartRegistry) {
        let segment = &self.segments[self.index];
        self.captured.clear();
        for op in &segment.ops {
            match registry.part(op.part) {
                Some(part) => self.captured.push(Some(Captured {
                    start: part.transform.channel(op.channel),
                    initial: part.initial_transform().channel(op.channel),
                })),
                None => {
                    tracing::warn!(part = ?op.part, channel = ?op.channel, "tween op references unresolved part, skipping");
                    self.captured.push(None);
                }
            }
        }
    }

    fn apply(&self, t: f32, registry: &mut PartRegistry) {
        let segment = &self.segments[self.index];
        for (op, captured) in segment.ops.iter().zip(&self.captured) {
            let Some(captured) = captured else { continue };
            if let Some(part) = registry.part_mut(op.part) {
                let value = op.motion.sample(captured.start, captured.initial, t);
                part.transform.set_channel(op.channel, value);
            }
        }
    }

    fn apply_effects(&mut self, registry: &mut PartRegistry) {
        let segment = &self.segments[self.index];
        for effect in &segment.effects {
            match effect {
                Effect::SetVisible { part, visible } => registry.set_visible(*part, *visible),
                Effect::SetGroupVisible { group, visible } => {
                    registry.set_group_visible(group, *visible);
                }
                Effect::SetScale { part, scale } => {
                    if let Some(part) = registry.part_mut(*part) {
                        part.transform.set_channel(Channel::Scale, *scale);
                    }
                }
                Effect::RestoreVisibility => registry.restore_initial_visibility(),
                Effect::Notice { text } => self.notices.push(text.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::{PartId, PartSpec};
    use crate::segment::TweenOp;

    fn registry_with(names: &[&str]) -> PartRegistry {
        let mut registry = PartRegistry::new();
        for name in names {
            registry.register(PartSpec::new(*name)).unwrap();
        }
        registry
    }

    fn position(registry: &PartRegistry, name: &str) -> [f32; 3] {
        registry.part_named(name).unwrap().transform.position
    }

    #[test]
    fn test_midpoint_and_exact_end() {
        let mut registry = registry_with(&["X"]);
        let x = registry.resolve("X").unwrap();
        let mut chain = ChainRunner::new(vec![
            Segment::new(500.0).with_op(TweenOp::position(x, [10.0, 0.0, 0.0])),
        ]);

        assert_eq!(chain.tick(250.0, &mut registry), ChainStatus::Running);
        assert_eq!(position(&registry, "X"), [5.0, 0.0, 0.0]);

        // Past the end: clamped to exactly the target, chain finished
        assert_eq!(chain.tick(350.0, &mut registry), ChainStatus::Finished);
        assert_eq!(position(&registry, "X"), [10.0, 0.0, 0.0]);
        assert!(chain.is_finished());
    }

    #[test]
    fn test_zero_elapsed_yields_start() {
        let mut registry = registry_with(&["X"]);
        let x = registry.resolve("X").unwrap();
        registry.part_mut(x).unwrap().transform.position = [3.0, 0.0, 0.0];
        let mut chain = ChainRunner::new(vec![
            Segment::new(1.0).with_op(TweenOp::position(x, [10.0, 0.0, 0.0])),
        ]);
        chain.tick(0.0, &mut registry);
        assert_eq!(position(&registry, "X"), [3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_segments_run_strictly_in_order() {
        let mut registry = registry_with(&["X"]);
        let x = registry.resolve("X").unwrap();
        let mut chain = ChainRunner::new(vec![
            Segment::new(1.0).with_op(TweenOp::position(x, [10.0, 0.0, 0.0])),
            Segment::new(1.0).with_op(TweenOp::position(x, [10.0, 5.0, 0.0])),
        ]);

        // Mid segment A: B has not touched y
        chain.tick(0.5, &mut registry);
        assert_eq!(position(&registry, "X"), [5.0, 0.0, 0.0]);

        // A completes; B captures A's end as its start
        chain.tick(0.5, &mut registry);
        assert_eq!(position(&registry, "X"), [10.0, 0.0, 0.0]);

        chain.tick(0.5, &mut registry);
        assert_eq!(position(&registry, "X"), [10.0, 2.5, 0.0]);

        assert_eq!(chain.tick(0.5, &mut registry), ChainStatus::Finished);
        assert_eq!(position(&registry, "X"), [10.0, 5.0, 0.0]);
    }

    #[test]
    fn test_delay_gates_next_segment() {
        let mut registry = registry_with(&["X"]);
        let x = registry.resolve("X").unwrap();
        let mut chain = ChainRunner::new(vec![
            Segment::new(1.0)
                .with_op(TweenOp::position(x, [10.0, 0.0, 0.0]))
                .with_delay_after(0.5),
            Segment::new(1.0).with_op(TweenOp::position(x, [10.0, 1.0, 0.0])),
        ]);

        // 1.2s: segment done, 0.3s of delay left, B untouched
        assert_eq!(chain.tick(1.2, &mut registry), ChainStatus::Running);
        assert_eq!(position(&registry, "X"), [10.0, 0.0, 0.0]);

        // Still inside the delay
        chain.tick(0.2, &mut registry);
        assert_eq!(position(&registry, "X"), [10.0, 0.0, 0.0]);

        // Delay expires mid-tick; leftover time flows into B
        chain.tick(0.2, &mut registry);
        let pos = position(&registry, "X");
        assert!((pos[1] - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_effects_applied_on_completion_not_before() {
        let mut registry = registry_with(&["X"]);
        let x = registry.resolve("X").unwrap();
        let mut chain = ChainRunner::new(vec![
            Segment::new(1.0)
                .with_op(TweenOp::position(x, [1.0, 0.0, 0.0]))
                .with_effect(Effect::SetVisible { part: x, visible: false }),
        ]);

        chain.tick(0.5, &mut registry);
        assert!(registry.part_named("X").unwrap().visible);

        chain.tick(0.6, &mut registry);
        assert!(!registry.part_named("X").unwrap().visible);
    }

    #[test]
    fn test_missing_part_op_is_skipped() {
        let mut registry = registry_with(&["X"]);
        let x = registry.resolve("X").unwrap();
        let ghost = PartId::new();
        let mut chain = ChainRunner::new(vec![
            Segment::new(1.0)
                .with_op(TweenOp::position(ghost, [9.0, 9.0, 9.0]))
                .with_op(TweenOp::position(x, [2.0, 0.0, 0.0])),
        ]);

        assert_eq!(chain.tick(1.0, &mut registry), ChainStatus::Finished);
        assert_eq!(position(&registry, "X"), [2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_chain_finishes_immediately() {
        let mut registry = registry_with(&[]);
        let mut chain = ChainRunner::new(Vec::new());
        assert_eq!(chain.tick(0.0, &mut registry), ChainStatus::Finished);
    }

    #[test]
    fn test_simultaneous_ops_share_one_clock() {
        let mut registry = registry_with(&["A", "B"]);
        let a = registry.resolve("A").unwrap();
        let b = registry.resolve("B").unwrap();
        let mut chain = ChainRunner::new(vec![
            Segment::new(2.0)
                .with_op(TweenOp::position(a, [4.0, 0.0, 0.0]))
                .with_op(TweenOp::scale(b, [3.0, 3.0, 3.0])),
        ]);

        chain.tick(1.0, &mut registry);
        assert_eq!(position(&registry, "A"), [2.0, 0.0, 0.0]);
        assert_eq!(registry.part_named("B").unwrap().transform.scale, [2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_notice_effect_surfaces() {
        let mut registry = registry_with(&["X"]);
        let mut chain = ChainRunner::new(vec![
            Segment::new(0.2).with_effect(Effect::Notice {
                text: "ratio of yeast to brown sugar is 1:1".to_string(),
            }),
        ]);
        chain.tick(0.5, &mut registry);
        assert_eq!(
            chain.drain_notices(),
            vec!["ratio of yeast to brown sugar is 1:1".to_string()]
        );
        assert!(chain.drain_notices().is_empty());
    }

    #[test]
    fn test_one_tick_can_cross_many_segments() {
        let mut registry = registry_with(&["X"]);
        let x = registry.resolve("X").unwrap();
        let mut chain = ChainRunner::new(vec![
            Segment::new(1.0).with_op(TweenOp::position(x, [1.0, 0.0, 0.0])).with_delay_after(0.2),
            Segment::new(1.0).with_op(TweenOp::position(x, [2.0, 0.0, 0.0])).with_delay_after(0.2),
            Segment::new(1.0).with_op(TweenOp::position(x, [3.0, 0.0, 0.0])),
        ]);
        assert_eq!(chain.tick(10.0, &mut registry), ChainStatus::Finished);
        assert_eq!(position(&registry, "X"), [3.0, 0.0, 0.0]);
    }
}
