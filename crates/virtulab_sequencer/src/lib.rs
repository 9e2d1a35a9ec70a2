// SPDX-License-Identifier: MIT OR Apache-2.0
//! Procedure sequencer for `VirtuLab` science-experiment simulations.
//!
//! This crate provides the interaction core shared by every experiment:
//! - Named part registry with recorded initial transforms
//! - Timed tween segments (linear, two-phase, oscillating)
//! - A generic chain driver for strictly ordered segment routines
//! - The step sequencer with trigger gating and cycle reset
//! - Load progress tracking
//!
//! ## Architecture
//!
//! The sequencer is built on:
//! - Descriptor types for steps, segments and effects (all serializable)
//! - A `PartRegistry` resolved eagerly at load completion
//! - Frame-driven playback: all progress comes from `tick(dt)`
//! - Buffered events drained by the hosting surface

pub mod interp;
pub mod transform;
pub mod part;
pub mod segment;
pub mod chain;
pub mod procedure;
pub mod sequencer;
pub mod loading;
pub mod error;

pub use interp::Interpolation;
pub use transform::{Transform, Channel};
pub use part::{Part, PartId, PartRegistry, PartSpec, SceneSpec};
pub use segment::{Segment, TweenOp, Motion, Effect};
pub use chain::{ChainRunner, ChainStatus};
pub use procedure::{Procedure, Step};
pub use sequencer::{Sequencer, SequencerEvent};
pub use loading::LoadTracker;
pub use error::RegistryError;
