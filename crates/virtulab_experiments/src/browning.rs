// SPDX-License-Identifier: MIT OR Apache-2.0
//! Experiment 5: enzymatic browning of apple slices in different solutions.

use crate::deg;
use virtulab_sequencer::{
    Channel, Effect, PartId, PartRegistry, PartSpec, Procedure, RegistryError, SceneSpec, Segment,
    TweenOp,
};

const SLICES_GROUP: &str = "slices";
const PLATES_GROUP: &str = "plates";

/// Scene parts animated by this experiment
pub fn scene() -> SceneSpec {
    SceneSpec::new("browning")
        .with_part(PartSpec::new("KNIFE"))
        .with_part(PartSpec::new("APPLEWHOLE"))
        .with_part(PartSpec::new("APPLESLICES").hidden().in_group(SLICES_GROUP))
        .with_part(PartSpec::new("SLICEDAPPLE1").hidden().in_group(SLICES_GROUP))
        .with_part(PartSpec::new("SLICEDAPPLE2").hidden().in_group(SLICES_GROUP))
        .with_part(PartSpec::new("SLICEDAPPLE3").hidden().in_group(SLICES_GROUP))
        .with_part(PartSpec::new("SLICEDAPPLE4").hidden().in_group(SLICES_GROUP))
        .with_part(PartSpec::new("DUNK1").hidden())
        .with_part(PartSpec::new("DUNK2").hidden())
        .with_part(PartSpec::new("DUNK3").hidden())
        .with_part(PartSpec::new("APPLEPLATE").hidden().in_group(PLATES_GROUP))
        .with_part(PartSpec::new("PLATE_SALT").hidden().in_group(PLATES_GROUP))
        .with_part(PartSpec::new("PLATE_SUGAR").hidden().in_group(PLATES_GROUP))
        .with_part(PartSpec::new("PLATE_VINEGAR").hidden().in_group(PLATES_GROUP))
        .with_part(PartSpec::new("PLATE_NONE").hidden().in_group(PLATES_GROUP))
        .with_part(PartSpec::new("APPLEBROWNED").hidden())
}

/// Move a slice above its target, then lower it in; swap visibility on
/// completion
fn dunk(
    slice: PartId,
    above: [f32; 3],
    into: [f32; 3],
    rotation: [f32; 3],
    hide: PartId,
    show: PartId,
) -> Vec<Segment> {
    vec![
        Segment::new(1.0)
            .with_op(TweenOp::position(slice, above))
            .with_op(TweenOp::rotation(slice, rotation))
            .with_delay_after(0.2),
        Segment::new(1.0)
            .with_op(TweenOp::position(slice, into))
            .with_effect(Effect::SetVisible {
                part: hide,
                visible: false,
            })
            .with_effect(Effect::SetVisible {
                part: show,
                visible: true,
            }),
    ]
}

/// The four-step browning procedure plus the end sentinel
pub fn procedure(registry: &PartRegistry) -> Result<Procedure, RegistryError> {
    let knife = registry.resolve("KNIFE")?;
    let whole_apple = registry.resolve("APPLEWHOLE")?;
    let slice1 = registry.resolve("SLICEDAPPLE1")?;
    let slice2 = registry.resolve("SLICEDAPPLE2")?;
    let slice3 = registry.resolve("SLICEDAPPLE3")?;
    let slice4 = registry.resolve("SLICEDAPPLE4")?;
    let dunk1 = registry.resolve("DUNK1")?;
    let dunk2 = registry.resolve("DUNK2")?;
    let dunk3 = registry.resolve("DUNK3")?;
    let plate_salt = registry.resolve("PLATE_SALT")?;
    let plate_sugar = registry.resolve("PLATE_SUGAR")?;
    let plate_vinegar = registry.resolve("PLATE_VINEGAR")?;
    let plate_none = registry.resolve("PLATE_NONE")?;
    let browned = registry.resolve("APPLEBROWNED")?;

    let knife_above = [-52.0, 10.0, 48.0];
    let knife_down = [-52.0, 10.0, 60.0];

    let mut step_one = vec![
        Segment::new(0.0)
            .with_effect(Effect::SetVisible {
                part: whole_apple,
                visible: true,
            })
            .with_effect(Effect::SetGroupVisible {
                group: SLICES_GROUP.to_string(),
                visible: false,
            }),
        Segment::new(1.0)
            .with_op(TweenOp::position(knife, knife_above))
            .with_op(TweenOp::rotation(knife, [0.0, deg(-90.0), 0.0])),
    ];
    // Four cuts: down, pause, back up
    for cut in 0..4 {
        step_one.push(
            Segment::new(0.5)
                .with_op(TweenOp::position(knife, knife_down))
                .with_delay_after(0.2),
        );
        let mut up = Segment::new(0.5)
            .with_op(TweenOp::position(knife, knife_above))
            .with_delay_after(0.1);
        if cut == 3 {
            up = up
                .with_effect(Effect::SetVisible {
                    part: whole_apple,
                    visible: false,
                })
                .with_effect(Effect::SetGroupVisible {
                    group: SLICES_GROUP.to_string(),
                    visible: true,
                });
        }
        step_one.push(up);
    }
    step_one.push(
        Segment::new(0.5)
            .with_op(TweenOp::home(knife, Channel::Position))
            .with_op(TweenOp::home(knife, Channel::Rotation)),
    );

    let tip = [deg(90.0), 0.0, 0.0];
    let mut step_two = vec![Segment::new(0.0)
        .with_effect(Effect::Notice {
            text: "NOTE: Solutions are prepared by mixing 1 tsp of each agent with \u{bd} cup of water"
                .to_string(),
        })
        .with_effect(Effect::SetVisible {
            part: whole_apple,
            visible: false,
        })
        .with_effect(Effect::SetGroupVisible {
            group: SLICES_GROUP.to_string(),
            visible: true,
        })];
    // Salt, sugar, vinegar, then the exposed control slice
    step_two.extend(dunk(slice2, [23.5, -4.0, -10.0], [23.5, -4.0, 6.0], tip, slice2, dunk3));
    step_two.extend(dunk(slice3, [46.0, -4.0, -10.0], [46.0, -4.0, 5.5], tip, slice3, dunk2));
    step_two.extend(dunk(slice1, [48.3, -3.9, -20.0], [48.3, -3.9, -6.0], tip, slice1, dunk1));
    step_two.extend(dunk(
        slice4,
        [90.0, 23.0, -10.0],
        [90.0, 23.0, 0.0],
        [0.0, 0.0, deg(40.0)],
        slice4,
        plate_none,
    ));

    let lift = [0.0, 0.0, deg(40.0)];
    let mut step_three = vec![Segment::new(0.0)
        .with_effect(Effect::SetVisible { part: dunk1, visible: false })
        .with_effect(Effect::SetVisible { part: dunk2, visible: false })
        .with_effect(Effect::SetVisible { part: dunk3, visible: false })
        .with_effect(Effect::SetVisible { part: slice1, visible: true })
        .with_effect(Effect::SetVisible { part: slice2, visible: true })
        .with_effect(Effect::SetVisible { part: slice3, visible: true })];
    step_three.extend(dunk(slice2, [4.5, 41.0, -15.0], [80.0, 50.0, 0.0], lift, slice2, plate_salt));
    step_three.extend(dunk(slice3, [25.0, 44.0, -15.0], [66.5, 52.0, 0.0], lift, slice3, plate_sugar));
    step_three.extend(dunk(
        slice1,
        [38.0, 28.0, -15.0],
        [65.0, 19.0, 0.0],
        lift,
        slice1,
        plate_vinegar,
    ));

    let step_four = vec![
        Segment::new(0.0)
            .with_effect(Effect::Notice {
                text: "RESULTS: \n1. No liquid (exposed to air) - turns brown the fastest \
                       \n2. Salt - browning was delayed compared to control. Light discolouration \
                       appeared after a longer period \n3. Sugar - browning was also delayed but \
                       not as effectively as salt. The sugar-coated apple retained some freshness \
                       but showed slight browning after some time \n4. Vinegar - minimal to no \
                       browning. The apple stayed fresh for a much longer period"
                    .to_string(),
            })
            .with_effect(Effect::SetGroupVisible {
                group: PLATES_GROUP.to_string(),
                visible: true,
            })
            .with_effect(Effect::SetVisible {
                part: browned,
                visible: true,
            }),
        // Fresh plates fade away, leaving the browned comparison set
        Segment::new(1.0).with_effect(Effect::SetGroupVisible {
            group: PLATES_GROUP.to_string(),
            visible: false,
        }),
    ];

    Ok(Procedure::new("browning")
        .with_step("Step 1:\nCut the apple into 5 slices.", step_one)
        .with_step(
            "Step 2:\nOne slice acts as control. Each other slice is immersed into different prepared solutions for a few minutes.",
            step_two,
        )
        .with_step(
            "Step 3:\nTake out the apple slices and observe the colour changes.",
            step_three,
        )
        .with_step(
            "Which slice browned the fastest? Slowest? Did any of them turn brown really fast but then stayed the same colour by the end of 2 hours?",
            step_four,
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
        assert_eq!(proc.len(), 5);
    }

    #[test]
    fn test_cutting_swaps_whole_apple_for_slices() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        let proc = procedure(&registry).unwrap();
        let mut seq = Sequencer::new(proc, registry);
        run_step(&mut seq);
        let registry = seq.registry();
        assert!(!registry.part_named("APPLEWHOLE").unwrap().visible);
        assert!(registry.part_named("SLICEDAPPLE1").unwrap().visible);
        assert!(registry.part_named("APPLESLICES").unwrap().visible);
        assert_eq!(
            registry.part_named("KNIFE").unwrap().transform.position,
            [0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_dunking_moves_each_slice_into_solution() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        let proc = procedure(&registry).unwrap();
        let mut seq = Sequencer::new(proc, registry);
        run_step(&mut seq);
        run_step(&mut seq);
        let registry = seq.registry();
        for slice in ["SLICEDAPPLE1", "SLICEDAPPLE2", "SLICEDAPPLE3", "SLICEDAPPLE4"] {
            assert!(!registry.part_named(slice).unwrap().visible, "{slice} still showing");
        }
        for dunked in ["DUNK1", "DUNK2", "DUNK3", "PLATE_NONE"] {
            assert!(registry.part_named(dunked).unwrap().visible, "{dunked} not showing");
        }
        assert_eq!(
            registry.part_named("SLICEDAPPLE2").unwrap().transform.position,
            [23.5, -4.0, 6.0]
        );
    }

    #[test]
    fn test_results_leave_only_browned_set() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        let proc = procedure(&registry).unwrap();
        let mut seq = Sequencer::new(proc, registry);
        for _ in 0..4 {
            run_step(&mut seq);
        }
        let registry = seq.registry();
        assert!(registry.part_named("APPLEBROWNED").unwrap().visible);
        assert!(!registry.part_named("PLATE_SALT").unwrap().visible);
        assert!(!registry.part_named("APPLEPLATE").unwrap().visible);
    }
}
