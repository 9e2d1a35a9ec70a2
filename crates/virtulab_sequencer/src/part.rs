// SPDX-License-Identifier: MIT OR Apache-2.0
//! Named animated parts and the registry that resolves them.
//!
//! Parts replace ad-hoc lookup-by-name at animation time: every part a
//! procedure touches is resolved once, when the scene finishes loading,
//! and referenced by id afterwards. Each part records the transform and
//! visibility it was registered with so the reset routine can restore them.

use crate::error::RegistryError;
use crate::transform::Transform;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a registered part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartId(pub Uuid);

impl PartId {
    /// Create a new random part ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PartId {
    fn default() -> Self {
        Self::new()
    }
}

/// Description of one part in a scene, before registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartSpec {
    /// Symbolic name used by procedures
    pub name: String,
    /// Initial transform
    pub transform: Transform,
    /// Initial visibility
    pub visible: bool,
    /// Optional group tag, e.g. an apparatus or result grouping
    pub group: Option<String>,
}

impl PartSpec {
    /// Create a visible part at the identity transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            visible: true,
            group: None,
        }
    }

    /// Set the initial transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the initial position
    pub fn at(mut self, position: [f32; 3]) -> Self {
        self.transform.position = position;
        self
    }

    /// Start hidden
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Assign a group tag
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// A named scene: the parts an experiment animates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSpec {
    /// Scene name
    pub name: String,
    /// Parts in registration order
    pub parts: Vec<PartSpec>,
}

impl SceneSpec {
    /// Create an empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
        }
    }

    /// Add a part, builder style
    pub fn with_part(mut self, part: PartSpec) -> Self {
        self.parts.push(part);
        self
    }
}

/// A registered part: live transform plus the recorded initial state
#[derive(Debug, Clone)]
pub struct Part {
    /// Unique part ID
    pub id: PartId,
    /// Symbolic name
    pub name: String,
    /// Live transform, mutated by tween segments
    pub transform: Transform,
    /// Live visibility flag
    pub visible: bool,
    /// Optional group tag
    pub group: Option<String>,
    initial_transform: Transform,
    initial_visible: bool,
}

impl Part {
    /// The transform recorded at registration
    pub fn initial_transform(&self) -> Transform {
        self.initial_transform
    }

    /// The visibility recorded at registration
    pub fn initial_visible(&self) -> bool {
        self.initial_visible
    }

    /// Whether the live state matches the recorded initial state
    pub fn is_at_initial(&self) -> bool {
        self.transform == self.initial_transform && self.visible == self.initial_visible
    }
}

/// Registry of all animatable parts in one experiment instance
#[derive(Debug, Clone, Default)]
pub struct PartRegistry {
    parts: IndexMap<PartId, Part>,
}

impl PartRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a scene description
    pub fn from_scene(scene: &SceneSpec) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for part in &scene.parts {
            registry.register(part.clone())?;
        }
        Ok(registry)
    }

    /// Register a part, recording its initial transform and visibility
    pub fn register(&mut self, spec: PartSpec) -> Result<PartId, RegistryError> {
        if self.lookup(&spec.name).is_some() {
            return Err(RegistryError::DuplicatePart { name: spec.name });
        }
        let id = PartId::new();
        self.parts.insert(
            id,
            Part {
                id,
                name: spec.name,
                transform: spec.transform,
                visible: spec.visible,
                group: spec.group,
                initial_transform: spec.transform,
                initial_visible: spec.visible,
            },
        );
        Ok(id)
    }

    /// Resolve a name to an id, failing explicitly if it is missing
    pub fn resolve(&self, name: &str) -> Result<PartId, RegistryError> {
        self.lookup(name).ok_or_else(|| RegistryError::PartNotFound {
            name: name.to_string(),
        })
    }

    /// Look up a name without failing
    pub fn lookup(&self, name: &str) -> Option<PartId> {
        self.parts.values().find(|p| p.name == name).map(|p| p.id)
    }

    /// Validate that every expected name is present, before any animation runs
    pub fn expect_parts(&self, names: &[&str]) -> Result<(), RegistryError> {
        for name in names {
            self.resolve(name)?;
        }
        Ok(())
    }

    /// Get a part
    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.get(&id)
    }

    /// Get a mutable part
    pub fn part_mut(&mut self, id: PartId) -> Option<&mut Part> {
        self.parts.get_mut(&id)
    }

    /// Get a part by name
    pub fn part_named(&self, name: &str) -> Option<&Part> {
        self.parts.values().find(|p| p.name == name)
    }

    /// All parts in registration order
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }

    /// Number of registered parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Set a part's visibility; missing ids are ignored
    pub fn set_visible(&mut self, id: PartId, visible: bool) {
        if let Some(part) = self.parts.get_mut(&id) {
            part.visible = visible;
        }
    }

    /// Set visibility for every part carrying a group tag
    pub fn set_group_visible(&mut self, group: &str, visible: bool) {
        for part in self.parts.values_mut() {
            if part.group.as_deref() == Some(group) {
                part.visible = visible;
            }
        }
    }

    /// Restore every part's registered visibility flag
    pub fn restore_initial_visibility(&mut self) {
        for part in self.parts.values_mut() {
            part.visible = part.initial_visible;
        }
    }

    /// Whether every part is back at its registered transform and visibility
    pub fn all_at_initial(&self) -> bool {
        self.parts.values().all(Part::is_at_initial)
    }
}
