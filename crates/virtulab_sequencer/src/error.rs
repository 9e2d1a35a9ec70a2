// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for scene resolution.

use thiserror::Error;

/// Errors raised while resolving parts against a loaded scene
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A part name expected by a procedure is absent from the scene
    #[error("part not found in scene: {name}")]
    PartNotFound {
        /// The symbolic part name that failed to resolve
        name: String,
    },
    /// Two parts were registered under the same name
    #[error("duplicate part registered: {name}")]
    DuplicatePart {
        /// The colliding part name
        name: String,
    },
}
