// SPDX-License-Identifier: MIT OR Apache-2.0
//! Procedures: ordered steps with captions and animation routines.

use crate::segment::Segment;
use serde::{Deserialize, Serialize};

/// Caption shown on the sentinel end step unless overridden
pub const END_CAPTION: &str = "END OF EXPERIMENT";

/// One discrete procedure stage: a caption plus its animation routine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Caption shown on the tablet when the step starts
    pub caption: String,
    /// Ordered segment chain executed by this step
    pub segments: Vec<Segment>,
    /// Sentinel flag: a terminal step runs the reset routine instead of
    /// its own segments
    pub terminal: bool,
}

impl Step {
    /// Create an ordinary step
    pub fn new(caption: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            caption: caption.into(),
            segments,
            terminal: false,
        }
    }

    /// Create the sentinel end step
    pub fn end(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            segments: Vec::new(),
            terminal: true,
        }
    }
}

/// A fixed, linear list of steps for one experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    /// Procedure name
    pub name: String,
    steps: Vec<Step>,
}

impl Procedure {
    /// Create an empty procedure
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step, builder style
    pub fn with_step(mut self, caption: impl Into<String>, segments: Vec<Segment>) -> Self {
        self.steps.push(Step::new(caption, segments));
        self
    }

    /// Append the sentinel end step with the default caption
    pub fn finish(self) -> Self {
        self.finish_with(END_CAPTION)
    }

    /// Append the sentinel end step with a custom caption
    pub fn finish_with(mut self, caption: impl Into<String>) -> Self {
        self.steps.push(Step::end(caption));
        self
    }

    /// Number of steps, sentinel included
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the procedure has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Get a step by index
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// All steps in order
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// Serialize to RON for on-disk experiment definitions
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Load a procedure from its RON form
    pub fn from_ron_str(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}
