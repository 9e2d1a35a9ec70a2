// SPDX-License-Identifier: MIT OR Apache-2.0
//! Experiment 2: yeast fermentation with brown sugar and warm water.
//!
//! The spatula scoop loop runs twice per ingredient, with the dish contents
//! shrinking on the first scoop and disappearing on the second, while the
//! matching fill level appears inside the boiling tube.

use crate::deg;
use virtulab_sequencer::{
    Effect, PartId, PartRegistry, PartSpec, Procedure, RegistryError, SceneSpec, Segment, TweenOp,
};

const SPATULA_TUBE: [f32; 3] = [53.0, 32.0, -1.0];

/// Scene parts animated by this experiment
pub fn scene() -> SceneSpec {
    SceneSpec::new("fermentation")
        .with_part(PartSpec::new("SPATULA"))
        .with_part(PartSpec::new("BROWNSUGAR1"))
        .with_part(PartSpec::new("BROWNSUGARTUBE").hidden())
        .with_part(PartSpec::new("YEAST"))
        .with_part(PartSpec::new("YEAST_TUBE").hidden())
        .with_part(PartSpec::new("WARMWATER"))
        .with_part(PartSpec::new("WATER_TUBE").hidden())
        .with_part(PartSpec::new("WATER_BUBBLE1").hidden())
        .with_part(PartSpec::new("BOILINGTUBE"))
        .with_part(PartSpec::new("RUBBERSTOPPER"))
        .with_part(PartSpec::new("RUBBERSTOPPER_TUBE").hidden())
        .with_part(PartSpec::new("BALLOON"))
        .with_part(PartSpec::new("FILLEDBALLOON").hidden())
        .with_part(PartSpec::new("BALLOONTUBE").hidden())
        .with_part(PartSpec::new("FOAM").hidden())
        .with_part(PartSpec::new("PROCEDURE").hidden())
        .with_part(PartSpec::new("AFTERRESULT").hidden())
}

/// Two scoops from a dish into the boiling tube, then return the spatula
fn scoop_routine(
    spatula: PartId,
    dish: PartId,
    tube_fill: PartId,
    above: [f32; 3],
    scoop: [f32; 3],
    first_fill_scale: [f32; 3],
) -> Vec<Segment> {
    vec![
        Segment::new(0.5)
            .with_op(TweenOp::position(spatula, above))
            .with_op(TweenOp::rotation(spatula, [deg(50.0), 0.0, 0.0]))
            .with_delay_after(0.5),
        Segment::new(0.5)
            .with_op(TweenOp::position(spatula, scoop))
            .with_delay_after(0.2)
            .with_effect(Effect::SetScale {
                part: dish,
                scale: [1.0, 0.7, 1.0],
            }),
        Segment::new(1.0)
            .with_op(TweenOp::position(spatula, SPATULA_TUBE))
            .with_delay_after(0.2)
            .with_effect(Effect::SetVisible {
                part: tube_fill,
                visible: true,
            })
            .with_effect(Effect::SetScale {
                part: tube_fill,
                scale: first_fill_scale,
            }),
        Segment::new(1.0).with_op(TweenOp::position(spatula, above)),
        Segment::new(0.5)
            .with_op(TweenOp::position(spatula, scoop))
            .with_delay_after(0.2)
            .with_effect(Effect::SetVisible {
                part: dish,
                visible: false,
            }),
        Segment::new(1.0)
            .with_op(TweenOp::position(spatula, SPATULA_TUBE))
            .with_delay_after(0.2)
            .with_effect(Effect::SetScale {
                part: tube_fill,
                scale: [1.0, 1.0, 1.0],
            }),
        Segment::new(1.0)
            .with_op(TweenOp::position(spatula, [0.0, 0.0, 0.0]))
            .with_op(TweenOp::rotation(spatula, [0.0, 0.0, 0.0])),
    ]
}

/// The five-step fermentation procedure plus the end sentinel
pub fn procedure(registry: &PartRegistry) -> Result<Procedure, RegistryError> {
    let spatula = registry.resolve("SPATULA")?;
    let brown_sugar = registry.resolve("BROWNSUGAR1")?;
    let sugar_tube = registry.resolve("BROWNSUGARTUBE")?;
    let yeast = registry.resolve("YEAST")?;
    let yeast_tube = registry.resolve("YEAST_TUBE")?;
    let warm_water = registry.resolve("WARMWATER")?;
    let water_tube = registry.resolve("WATER_TUBE")?;
    let water_bubble = registry.resolve("WATER_BUBBLE1")?;
    let boiling_tube = registry.resolve("BOILINGTUBE")?;
    let rubber_stopper = registry.resolve("RUBBERSTOPPER")?;
    let rubber_tube = registry.resolve("RUBBERSTOPPER_TUBE")?;
    let balloon = registry.resolve("BALLOON")?;
    let filled_balloon = registry.resolve("FILLEDBALLOON")?;
    let balloon_tube = registry.resolve("BALLOONTUBE")?;
    let foam = registry.resolve("FOAM")?;
    let procedure_group = registry.resolve("PROCEDURE")?;
    let after_result = registry.resolve("AFTERRESULT")?;

    let mut step_one = vec![Segment::new(0.0)
        .with_effect(Effect::SetVisible {
            part: procedure_group,
            visible: true,
        })
        .with_effect(Effect::Notice {
            text: "NOTE: If using other containers, ratio of yeast to brown sugar is in 1:1"
                .to_string(),
        })];
    step_one.extend(scoop_routine(
        spatula,
        brown_sugar,
        sugar_tube,
        [11.6, 13.0, -2.0],
        [11.6, 5.0, -2.0],
        [1.0, 0.5, 1.0],
    ));

    let step_two = scoop_routine(
        spatula,
        yeast,
        yeast_tube,
        [23.0, 13.0, -2.0],
        [23.0, 5.0, -2.0],
        [1.0, 0.8, 1.0],
    );

    let step_three = vec![
        Segment::new(0.0)
            .with_op(TweenOp::scale(water_tube, [1.0, 0.0, 1.0]))
            .with_effect(Effect::SetVisible {
                part: procedure_group,
                visible: true,
            })
            .with_effect(Effect::SetVisible {
                part: water_tube,
                visible: true,
            }),
        // Pour: the beaker rises and tips while the tube's water level rises
        Segment::new(0.5)
            .with_op(TweenOp::position(warm_water, [5.0, 35.0, 0.0]))
            .with_op(TweenOp::rotation(warm_water, [0.0, 0.0, -deg(37.0)]))
            .with_op(TweenOp::scale(water_tube, [1.0, 1.0, 1.0]))
            .with_delay_after(0.5),
        Segment::new(0.5)
            .with_op(TweenOp::position(warm_water, [0.0, 0.0, 0.0]))
            .with_op(TweenOp::rotation(warm_water, [0.0, 0.0, 0.0]))
            .with_effect(Effect::Notice {
                text: "NOTE: If using bottles, you may use the bottle cap".to_string(),
            }),
        Segment::new(0.5)
            .with_op(TweenOp::position(rubber_stopper, [5.6, 23.0, -11.7]))
            .with_effect(Effect::SetVisible {
                part: rubber_tube,
                visible: true,
            })
            .with_effect(Effect::SetVisible {
                part: rubber_stopper,
                visible: false,
            }),
        Segment::new(0.0)
            .with_effect(Effect::SetVisible {
                part: after_result,
                visible: true,
            })
            .with_effect(Effect::SetVisible {
                part: water_bubble,
                visible: true,
            }),
        // Shake well; the tube contents never settle back on their own
        Segment::new(1.0)
            .with_op(TweenOp::shake(boiling_tube, [0.2, 0.2, 0.0], 10.0))
            .with_op(TweenOp::shake(procedure_group, [0.2, 0.2, 0.0], 10.0))
            .with_op(TweenOp::shake(water_bubble, [0.2, 0.2, 0.0], 10.0))
            .with_effect(Effect::SetVisible {
                part: water_tube,
                visible: false,
            })
            .with_effect(Effect::SetVisible {
                part: yeast_tube,
                visible: false,
            })
            .with_effect(Effect::SetVisible {
                part: sugar_tube,
                visible: false,
            }),
    ];

    let step_four = vec![
        Segment::new(0.0)
            .with_effect(Effect::SetVisible {
                part: rubber_stopper,
                visible: true,
            })
            .with_effect(Effect::SetVisible {
                part: rubber_tube,
                visible: false,
            }),
        Segment::new(1.0)
            .with_op(TweenOp::position(rubber_stopper, [0.0, 0.0, 0.0]))
            .with_op(TweenOp::position(balloon, [-10.0, 25.0, -5.0]))
            .with_effect(Effect::SetVisible {
                part: procedure_group,
                visible: true,
            })
            .with_effect(Effect::SetVisible {
                part: balloon_tube,
                visible: true,
            })
            .with_effect(Effect::SetVisible {
                part: balloon,
                visible: false,
            }),
    ];

    let step_five = vec![
        Segment::new(0.0)
            .with_op(TweenOp::position(filled_balloon, [18.0, 12.5, 0.0]))
            .with_op(TweenOp::scale(filled_balloon, [0.5, 0.5, 0.5]))
            .with_op(TweenOp::scale(foam, [1.0, 0.0, 1.0]))
            .with_effect(Effect::SetVisible {
                part: filled_balloon,
                visible: true,
            })
            .with_effect(Effect::SetVisible {
                part: after_result,
                visible: true,
            })
            .with_effect(Effect::SetVisible {
                part: foam,
                visible: true,
            })
            .with_effect(Effect::SetVisible {
                part: balloon_tube,
                visible: false,
            }),
        // The empty balloon secretly returns home while out of sight
        Segment::new(1.0)
            .with_op(TweenOp::position(balloon, [0.0, 0.0, 0.0]))
            .with_op(TweenOp::position(filled_balloon, [0.0, 0.0, 0.0]))
            .with_op(TweenOp::scale(filled_balloon, [1.0, 1.0, 1.0]))
            .with_op(TweenOp::scale(foam, [1.0, 1.0, 1.0])),
    ];

    Ok(Procedure::new("fermentation")
        .with_step(
            "Step 1:\nAdd 2 teaspoons of brown sugar into the boiling tube.",
            step_one,
        )
        .with_step(
            "Step 2:\nAdd 2 teaspoons of yeast into the same boiling tube.",
            step_two,
        )
        .with_step(
            "Step 3:\nPour warm water and plug the boiling tube with rubber stopper. Shake well.",
            step_three,
        )
        .with_step(
            "Step 4:\nStretch your balloon over top of the boiling tube. Leave it for 20-30 minutes.",
            step_four,
        )
        .with_step(
            "Step 5:\nObserve the reaction and how the air released will fill up the balloon.",
            step_five,
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
        assert_eq!(proc.len(), 6);
    }

    #[test]
    fn test_second_scoop_empties_the_dish() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        let proc = procedure(&registry).unwrap();
        let mut seq = Sequencer::new(proc, registry);
        run_step(&mut seq);
        let registry = seq.registry();
        assert!(!registry.part_named("BROWNSUGAR1").unwrap().visible);
        let tube = registry.part_named("BROWNSUGARTUBE").unwrap();
        assert!(tube.visible);
        assert_eq!(tube.transform.scale, [1.0, 1.0, 1.0]);
        // Spatula is back home
        assert_eq!(
            registry.part_named("SPATULA").unwrap().transform.position,
            [0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_shake_completes_and_reveals_result() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        let proc = procedure(&registry).unwrap();
        let mut seq = Sequencer::new(proc, registry);
        for _ in 0..3 {
            run_step(&mut seq);
        }
        // 10 half-cycles land back on the start rotation at t = 1
        let tube = seq.registry().part_named("BOILINGTUBE").unwrap();
        assert!(tube.transform.rotation[0].abs() < 1e-4);
        // The fills are swapped out for the mixed result
        assert!(!seq.registry().part_named("WATER_TUBE").unwrap().visible);
        assert!(seq.registry().part_named("AFTERRESULT").unwrap().visible);
    }

    #[test]
    fn test_balloon_fills_at_the_end() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        let proc = procedure(&registry).unwrap();
        let mut seq = Sequencer::new(proc, registry);
        for _ in 0..5 {
            run_step(&mut seq);
        }
        let registry = seq.registry();
        assert!(registry.part_named("FILLEDBALLOON").unwrap().visible);
        assert_eq!(
            registry.part_named("FILLEDBALLOON").unwrap().transform.scale,
            [1.0, 1.0, 1.0]
        );
        assert!(!registry.part_named("BALLOON").unwrap().visible);
        assert!(registry.part_named("FOAM").unwrap().visible);
    }

    #[test]
    fn test_notices_surface_during_step_one() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        let proc = procedure(&registry).unwrap();
        let mut seq = Sequencer::new(proc, registry);
        run_step(&mut seq);
        let notices: Vec<_> = seq
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, virtulab_sequencer::SequencerEvent::Notice { .. }))
            .collect();
        assert_eq!(notices.len(), 1);
    }
}
