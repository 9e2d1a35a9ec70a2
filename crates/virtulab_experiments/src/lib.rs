// SPDX-License-Identifier: MIT OR Apache-2.0
//! Experiment definitions for `VirtuLab`.
//!
//! Each module defines one experiment: the scene parts it animates and the
//! fixed procedure a user steps through. All motion paths and numeric
//! targets are hard-coded per experiment; the sequencer crate supplies the
//! playback machinery.

pub mod elodea;
pub mod fermentation;
pub mod fingerprint;
pub mod agar;
pub mod browning;

use virtulab_sequencer::{PartRegistry, Procedure, RegistryError, SceneSpec, Sequencer};

/// Degrees to radians, matching the hand-authored rotation targets
pub(crate) fn deg(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// One entry in the experiment catalog
#[derive(Clone, Copy)]
pub struct Experiment {
    /// Stable identifier used on the command line
    pub slug: &'static str,
    /// Human-readable title
    pub title: &'static str,
    scene: fn() -> SceneSpec,
    procedure: fn(&PartRegistry) -> Result<Procedure, RegistryError>,
}

impl Experiment {
    /// The experiment's scene description
    pub fn scene(&self) -> SceneSpec {
        (self.scene)()
    }

    /// Build a ready-to-run sequencer: register the scene, resolve every
    /// part the procedure references, and wire them together
    pub fn build(&self) -> Result<Sequencer, RegistryError> {
        let scene = (self.scene)();
        let registry = PartRegistry::from_scene(&scene)?;
        let procedure = (self.procedure)(&registry)?;
        Ok(Sequencer::new(procedure, registry))
    }
}

/// All experiments, in curriculum order
pub const EXPERIMENTS: &[Experiment] = &[
    Experiment {
        slug: "elodea",
        title: "Observing Elodea sp. cells under a microscope",
        scene: elodea::scene,
        procedure: elodea::procedure,
    },
    Experiment {
        slug: "fermentation",
        title: "Yeast fermentation with brown sugar",
        scene: fermentation::scene,
        procedure: fermentation::procedure,
    },
    Experiment {
        slug: "fingerprint",
        title: "Developing fingerprints with fluorescent powder",
        scene: fingerprint::scene,
        procedure: fingerprint::procedure,
    },
    Experiment {
        slug: "agar",
        title: "Culturing bacteria on agar plates",
        scene: agar::scene,
        procedure: agar::procedure,
    },
    Experiment {
        slug: "browning",
        title: "Enzymatic browning of apple slices",
        scene: browning::scene,
        procedure: browning::procedure,
    },
];

/// Find an experiment by slug
pub fn find(slug: &str) -> Option<&'static Experiment> {
    EXPERIMENTS.iter().find(|e| e.slug == slug)
}
