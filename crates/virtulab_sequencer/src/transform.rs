// SPDX-License-Identifier: MIT OR Apache-2.0
//! Transform state for animated parts.

use serde::{Deserialize, Serialize};

/// A transform channel addressed by tween operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// World position
    Position,
    /// Euler rotation in radians, interpolated component-wise
    Rotation,
    /// Per-axis scale
    Scale,
}

/// Position, rotation and scale of a part, each an independent 3-vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World position
    pub position: [f32; 3],
    /// Euler rotation in radians
    pub rotation: [f32; 3],
    /// Per-axis scale
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl Transform {
    /// The identity transform (origin, no rotation, unit scale)
    pub fn identity() -> Self {
        Self::default()
    }

    /// Identity transform placed at a position
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Set the position, builder style
    pub fn with_position(mut self, position: [f32; 3]) -> Self {
        self.position = position;
        self
    }

    /// Set the rotation, builder style
    pub fn with_rotation(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the scale, builder style
    pub fn with_scale(mut self, scale: [f32; 3]) -> Self {
        self.scale = scale;
        self
    }

    /// Uniform scale on all three axes
    pub fn with_uniform_scale(self, s: f32) -> Self {
        self.with_scale([s, s, s])
    }

    /// Read a channel's value
    pub fn channel(&self, channel: Channel) -> [f32; 3] {
        match channel {
            Channel::Position => self.position,
            Channel::Rotation => self.rotation,
            Channel::Scale => self.scale,
        }
    }

    /// Write a channel's value
    pub fn set_channel(&mut self, channel: Channel, value: [f32; 3]) {
        match channel {
            Channel::Position => self.position = value,
            Channel::Rotation => self.rotation = value,
            Channel::Scale => self.scale = value,
        }
    }
}
