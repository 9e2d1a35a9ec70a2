// SPDX-License-Identifier: MIT OR Apache-2.0
//! Experiment 3: developing latent fingerprints with fluorescent powder.

use crate::deg;
use virtulab_sequencer::{
    Effect, PartRegistry, PartSpec, Procedure, RegistryError, SceneSpec, Segment, Transform,
    TweenOp,
};

/// Scene parts animated by this experiment
pub fn scene() -> SceneSpec {
    SceneSpec::new("fingerprint")
        .with_part(PartSpec::new("POINTINGFINGER1"))
        .with_part(PartSpec::new("GLOVES"))
        .with_part(PartSpec::new("BLACKPAPER"))
        .with_part(PartSpec::new("BLACKPAPER_POWDER").hidden())
        .with_part(PartSpec::new("BRUSH"))
        .with_part(PartSpec::new("POWDER"))
        .with_part(PartSpec::new("UVLIGHT"))
        .with_part(
            PartSpec::new("IMAGECIRCLE")
                .hidden()
                .with_transform(Transform::at([-0.4, 2.5, 4.0]).with_uniform_scale(0.2)),
        )
}

/// The three-step dusting procedure plus the end sentinel
pub fn procedure(registry: &PartRegistry) -> Result<Procedure, RegistryError> {
    let finger = registry.resolve("POINTINGFINGER1")?;
    let gloves = registry.resolve("GLOVES")?;
    let black_paper = registry.resolve("BLACKPAPER")?;
    let paper_powder = registry.resolve("BLACKPAPER_POWDER")?;
    let brush = registry.resolve("BRUSH")?;
    let powder = registry.resolve("POWDER")?;
    let uv_light = registry.resolve("UVLIGHT")?;
    let image_circle = registry.resolve("IMAGECIRCLE")?;

    let step_one = vec![
        Segment::new(1.0)
            .with_op(TweenOp::position(finger, [5.0, 0.0, 20.0]))
            .with_delay_after(0.5),
        // Press down onto the paper, tilting forward
        Segment::new(0.5)
            .with_op(TweenOp::position(finger, [5.0, -3.0, 20.0]))
            .with_op(TweenOp::rotation(finger, [deg(-25.0), 0.0, 0.0]))
            .with_delay_after(0.5),
        // Roll nail-to-nail: right, left, back to center
        Segment::new(0.5)
            .with_op(TweenOp::rotation(finger, [deg(-25.0), 0.0, deg(-25.0)]))
            .with_delay_after(0.3),
        Segment::new(0.5)
            .with_op(TweenOp::rotation(finger, [deg(-25.0), 0.0, deg(25.0)]))
            .with_delay_after(0.3),
        Segment::new(0.5).with_op(TweenOp::rotation(finger, [deg(-25.0), 0.0, 0.0])),
        Segment::new(1.0)
            .with_op(TweenOp::position(finger, [5.0, 0.0, 20.0]))
            .with_op(TweenOp::rotation(finger, [0.0, 0.0, 0.0])),
        Segment::new(1.0).with_op(TweenOp::position(finger, [0.0, 0.0, 0.0])),
    ];

    let step_two = vec![
        Segment::new(0.5)
            .with_op(TweenOp::position(gloves, [0.0, 10.0, 0.0]))
            .with_delay_after(0.5),
        Segment::new(1.5)
            .with_op(TweenOp::position(gloves, [0.0, 10.0, 250.0]))
            .with_delay_after(0.5)
            .with_effect(Effect::SetVisible {
                part: gloves,
                visible: false,
            }),
        // Snap the hidden glove home before the powder comes out
        Segment::new(0.0).with_op(TweenOp::position(gloves, [0.0, 0.0, 0.0])),
        Segment::new(1.0)
            .with_op(TweenOp::position(powder, [0.0, 15.0, 0.0]))
            .with_op(TweenOp::rotation(powder, [deg(70.0), deg(-30.0), 0.0]))
            .with_delay_after(0.5)
            .with_effect(Effect::SetVisible {
                part: paper_powder,
                visible: true,
            }),
        Segment::new(1.0)
            .with_op(TweenOp::position(powder, [0.0, 0.0, 0.0]))
            .with_op(TweenOp::rotation(powder, [0.0, 0.0, 0.0]))
            .with_delay_after(0.5)
            .with_effect(Effect::SetVisible {
                part: black_paper,
                visible: false,
            }),
        Segment::new(1.0)
            .with_op(TweenOp::position(brush, [-30.0, 2.0, 10.0]))
            .with_op(TweenOp::rotation(brush, [deg(-70.0), deg(-30.0), 0.0])),
        // Three dusting passes across the print
        Segment::new(0.5).with_op(TweenOp::position(brush, [-38.0, 2.0, 10.0])),
        Segment::new(0.5).with_op(TweenOp::position(brush, [-28.0, 2.0, 10.0])),
        Segment::new(0.5).with_op(TweenOp::position(brush, [-38.0, 2.0, 10.0])),
        Segment::new(0.5).with_op(TweenOp::position(brush, [-28.0, 2.0, 10.0])),
        Segment::new(0.5).with_op(TweenOp::position(brush, [-38.0, 2.0, 10.0])),
        Segment::new(0.5)
            .with_op(TweenOp::position(brush, [-28.0, 2.0, 10.0]))
            .with_delay_after(0.5),
        Segment::new(0.5)
            .with_op(TweenOp::position(brush, [0.0, 0.0, 0.0]))
            .with_op(TweenOp::rotation(brush, [0.0, 0.0, 0.0])),
    ];

    let step_three = vec![
        Segment::new(1.0)
            .with_op(TweenOp::position(uv_light, [-45.0, 50.0, 50.0]))
            .with_op(TweenOp::rotation(uv_light, [deg(-50.0), deg(30.0), 0.0]))
            .with_delay_after(0.5)
            .with_effect(Effect::SetVisible {
                part: image_circle,
                visible: true,
            }),
        Segment::new(1.0)
            .with_op(TweenOp::position(image_circle, [-0.5, 3.3, 5.0]))
            .with_op(TweenOp::scale(image_circle, [1.0, 1.0, 1.0])),
    ];

    Ok(Procedure::new("fingerprint")
        .with_step(
            "Step 1:\nRoll finger onto black paper from one side of the fingernail to the other.",
            step_one,
        )
        .with_step(
            "Step 2:\nWear gloves. Dust a little bit of fluorescent powder on the fingerprint.",
            step_two,
        )
        .with_step(
            "Step 3:\nUse the UV light to observe. You can see the clear fingerprint on the paper.",
            step_three,
        )
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use virtulab_sequencer::Sequencer;

    fn run_step(seq: &mut Sequencer) {
        assert!(seq.advance());
        while seq.is_in_flight() {
            seq.tick(0.1);
        }
    }

    #[test]
    fn test_procedure_resolves_against_scene() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        let proc = procedure(&registry).unwrap();
        assert_eq!(proc.len(), 4);
    }

    #[test]
    fn test_dusting_swaps_paper_for_powdered_paper() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        let proc = procedure(&registry).unwrap();
        let mut seq = Sequencer::new(proc, registry);
        run_step(&mut seq);
        run_step(&mut seq);
        let registry = seq.registry();
        assert!(!registry.part_named("BLACKPAPER").unwrap().visible);
        assert!(registry.part_named("BLACKPAPER_POWDER").unwrap().visible);
        assert!(!registry.part_named("GLOVES").unwrap().visible);
        // Brush and powder bag are back where they started
        assert_eq!(
            registry.part_named("BRUSH").unwrap().transform.position,
            [0.0, 0.0, 0.0]
        );
        assert_eq!(
            registry.part_named("POWDER").unwrap().transform.position,
            [0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_uv_reveals_print_image() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        let proc = procedure(&registry).unwrap();
        let mut seq = Sequencer::new(proc, registry);
        for _ in 0..3 {
            run_step(&mut seq);
        }
        let image = seq.registry().part_named("IMAGECIRCLE").unwrap();
        assert!(image.visible);
        assert_eq!(image.transform.scale, [1.0, 1.0, 1.0]);
        assert_eq!(image.transform.position, [-0.5, 3.3, 5.0]);
    }
}
