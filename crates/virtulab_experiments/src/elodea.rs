// SPDX-License-Identifier: MIT OR Apache-2.0
//! Experiment 1: observing Elodea sp. cells under a compound microscope.

use crate::deg;
use virtulab_sequencer::{
    PartRegistry, PartSpec, Procedure, RegistryError, SceneSpec, Segment, Transform, TweenOp,
};

/// Scene parts animated by this experiment
pub fn scene() -> SceneSpec {
    SceneSpec::new("elodea")
        .with_part(PartSpec::new("LEAF"))
        .with_part(PartSpec::new("SLIDE"))
        .with_part(PartSpec::new("DROPPER"))
        .with_part(PartSpec::new("COVERSLIP"))
        .with_part(PartSpec::new("MICROSCOPE").hidden())
        .with_part(
            PartSpec::new("IMAGECIRCLE")
                .with_transform(Transform::at([1.65, 3.0, 3.5]).with_uniform_scale(0.2)),
        )
}

/// The four-step microscopy procedure plus the end sentinel
pub fn procedure(registry: &PartRegistry) -> Result<Procedure, RegistryError> {
    let leaf = registry.resolve("LEAF")?;
    let slide = registry.resolve("SLIDE")?;
    let dropper = registry.resolve("DROPPER")?;
    let cover_slip = registry.resolve("COVERSLIP")?;
    let image_circle = registry.resolve("IMAGECIRCLE")?;

    Ok(Procedure::new("elodea")
        .with_step(
            "Step 1:\nObtain Elodea sp. leaf and place on clean slide.",
            vec![Segment::new(1.0)
                .with_op(TweenOp::position(leaf, [1.75, 0.1, -0.6]))
                .with_op(TweenOp::position(slide, [0.0, 0.0, -0.6]))],
        )
        .with_step(
            "Step 2:\nDrop fresh water onto leaf and place cover slip on top.",
            vec![
                // Dropper descends over the leaf and tilts to dispense
                Segment::new(1.0)
                    .with_op(TweenOp::position(dropper, [-1.6, 4.5, -19.2]))
                    .with_op(TweenOp::rotation(dropper, [deg(90.0), 0.0, 0.0]))
                    .with_delay_after(0.5),
                Segment::new(1.0)
                    .with_op(TweenOp::position(dropper, [0.0, 0.0, 0.0]))
                    .with_op(TweenOp::rotation(dropper, [0.0, 0.0, 0.0])),
                Segment::new(1.0).with_op(TweenOp::position(cover_slip, [-2.65, 0.15, -0.7])),
            ],
        )
        .with_step(
            "Step 3:\nPlace slide under microscope and observe.",
            vec![Segment::new(1.0)
                .with_op(TweenOp::position(leaf, [11.5, 1.3, -1.31]))
                .with_op(TweenOp::rotation(leaf, [0.0, 0.0, deg(35.0)]))
                .with_op(TweenOp::position(slide, [10.4, 0.4, -1.31]))
                .with_op(TweenOp::rotation(slide, [0.0, 0.0, deg(37.0)]))
                .with_op(TweenOp::position(cover_slip, [8.3, -1.15, -1.41]))
                .with_op(TweenOp::rotation(cover_slip, [0.0, 0.0, deg(37.0)]))],
        )
        .with_step(
            "Step 4:\nObserve results by adjusting to low and medium power.",
            vec![Segment::new(1.0)
                .with_op(TweenOp::position(image_circle, [2.1, 4.0, 4.0]))
                .with_op(TweenOp::scale(image_circle, [1.0, 1.0, 1.0]))],
        )
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use virtulab_sequencer::Sequencer;

    #[test]
    fn test_procedure_resolves_against_scene() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        let procedure = procedure(&registry).unwrap();
        assert_eq!(procedure.len(), 5);
    }

    #[test]
    fn test_missing_part_fails_eagerly() {
        let mut incomplete = scene();
        incomplete.parts.retain(|p| p.name != "DROPPER");
        let registry = PartRegistry::from_scene(&incomplete).unwrap();
        let err = procedure(&registry).unwrap_err();
        assert_eq!(
            err,
            RegistryError::PartNotFound {
                name: "DROPPER".to_string()
            }
        );
    }

    #[test]
    fn test_result_image_scales_up_on_observation() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        let proc = procedure(&registry).unwrap();
        let mut seq = Sequencer::new(proc, registry);
        // Steps 1-3 position the apparatus
        for _ in 0..4 {
            seq.advance();
            while seq.is_in_flight() {
                seq.tick(0.25);
            }
        }
        let image = seq.registry().part_named("IMAGECIRCLE").unwrap();
        assert_eq!(image.transform.scale, [1.0, 1.0, 1.0]);
        assert_eq!(image.transform.position, [2.1, 4.0, 4.0]);
    }

    #[test]
    fn test_microscope_stays_hidden() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        assert!(!registry.part_named("MICROSCOPE").unwrap().visible);
    }
}
