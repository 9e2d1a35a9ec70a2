// SPDX-License-Identifier: MIT OR Apache-2.0
//! Experiment 4: culturing bacteria collected from household surfaces.

use crate::deg;
use virtulab_sequencer::{
    Channel, Effect, Motion, PartRegistry, PartSpec, Procedure, RegistryError, SceneSpec, Segment,
    TweenOp,
};

/// Sample-site agar plates shown before incubation
const BEFORE_GROUP: &str = "agar-before";

/// Scene parts animated by this experiment
pub fn scene() -> SceneSpec {
    SceneSpec::new("agar")
        .with_part(PartSpec::new("COTTONBUD"))
        .with_part(PartSpec::new("PETRIDISHES"))
        .with_part(PartSpec::new("LABTABLE_DISH"))
        .with_part(PartSpec::new("LABTABLE_COVER"))
        .with_part(PartSpec::new("LABEL_LABTABLE"))
        .with_part(PartSpec::new("LABEL_CONTROL"))
        .with_part(PartSpec::new("LABEL_BATHROOMSINK"))
        .with_part(PartSpec::new("LABEL_SWITCH"))
        .with_part(PartSpec::new("LABEL_HANDPHONE"))
        .with_part(PartSpec::new("LABEL_TAPWATER"))
        .with_part(PartSpec::new("AGAR_TAPWATER").in_group(BEFORE_GROUP))
        .with_part(PartSpec::new("AGAR_HANDPHONE").in_group(BEFORE_GROUP))
        .with_part(PartSpec::new("AGAR_LIGHTSWITCH").in_group(BEFORE_GROUP))
        .with_part(PartSpec::new("AGAR_BATHROOMSINK").in_group(BEFORE_GROUP))
        .with_part(PartSpec::new("AGAR_CONTROL").in_group(BEFORE_GROUP))
        .with_part(PartSpec::new("AGAR_LABTABLE").in_group(BEFORE_GROUP))
        .with_part(PartSpec::new("RESULTSAGAR").hidden())
}

/// Pulse one sample label: up to 1.5x, back down to normal
fn pulse(registry: &PartRegistry, label: &str) -> Result<Segment, RegistryError> {
    let id = registry.resolve(label)?;
    Ok(Segment::new(1.5).with_op(TweenOp::new(
        id,
        Channel::Scale,
        Motion::TwoPhase {
            via: [1.5, 1.5, 1.5],
            target: [1.0, 1.0, 1.0],
        },
    )))
}

/// The five-step sampling procedure plus the end sentinel
pub fn procedure(registry: &PartRegistry) -> Result<Procedure, RegistryError> {
    let bud = registry.resolve("COTTONBUD")?;
    let dishes = registry.resolve("PETRIDISHES")?;
    let table_dish = registry.resolve("LABTABLE_DISH")?;
    let table_cover = registry.resolve("LABTABLE_COVER")?;
    let table_label = registry.resolve("LABEL_LABTABLE")?;
    let results = registry.resolve("RESULTSAGAR")?;

    let step_one = vec![
        pulse(registry, "LABEL_LABTABLE")?,
        pulse(registry, "LABEL_CONTROL")?,
        pulse(registry, "LABEL_BATHROOMSINK")?,
        pulse(registry, "LABEL_SWITCH")?,
        pulse(registry, "LABEL_HANDPHONE")?,
        pulse(registry, "LABEL_TAPWATER")?,
    ];

    let step_two = vec![
        Segment::new(0.5)
            .with_op(TweenOp::position(bud, [0.0, 10.0, -17.0]))
            .with_op(TweenOp::rotation(bud, [deg(50.0), 0.0, 0.0]))
            .with_delay_after(0.5),
        // Down to the surface, swipe across, lift back up
        Segment::new(0.5).with_op(TweenOp::position(bud, [0.0, 2.0, -17.0])),
        Segment::new(0.5).with_op(TweenOp::position(bud, [-1.0, 2.0, -17.0])),
        Segment::new(0.5).with_op(TweenOp::position(bud, [1.0, 2.0, -17.0])),
        Segment::new(0.5).with_op(TweenOp::position(bud, [-1.0, 2.0, -17.0])),
        Segment::new(0.5).with_op(TweenOp::position(bud, [0.0, 10.0, -17.0])),
    ];

    let step_three = vec![
        Segment::new(0.5).with_op(TweenOp::position(table_dish, [0.0, 5.0, 2.0])),
        Segment::new(0.5)
            .with_op(TweenOp::position(table_cover, [0.0, -1.0, 12.0]))
            .with_op(TweenOp::position(table_label, [0.0, -1.0, 12.0])),
        Segment::new(0.5).with_op(TweenOp::position(bud, [20.0, 8.0, 1.0])),
        // Streak the swab across the agar surface
        Segment::new(0.3).with_op(TweenOp::position(bud, [25.0, 8.0, 1.5])),
        Segment::new(0.3).with_op(TweenOp::position(bud, [20.0, 8.0, 2.5])),
        Segment::new(0.3).with_op(TweenOp::position(bud, [25.0, 8.0, 3.0])),
        Segment::new(0.3).with_op(TweenOp::position(bud, [20.0, 8.0, 4.0])),
        Segment::new(0.3).with_op(TweenOp::position(bud, [25.0, 8.0, 5.5])),
        Segment::new(0.3).with_op(TweenOp::position(bud, [20.0, 8.0, 6.5])),
        Segment::new(1.0)
            .with_op(TweenOp::position(bud, [-80.0, 8.0, -3.5]))
            .with_op(TweenOp::position(table_cover, [0.0, 0.0, 0.0]))
            .with_op(TweenOp::position(table_label, [0.0, 0.0, 0.0]))
            .with_effect(Effect::SetVisible {
                part: bud,
                visible: false,
            }),
        // Discarded bud snaps home while hidden
        Segment::new(0.0)
            .with_op(TweenOp::home(bud, Channel::Position))
            .with_op(TweenOp::home(bud, Channel::Rotation))
            .with_delay_after(0.5),
        Segment::new(0.5).with_op(TweenOp::position(table_dish, [0.0, 0.0, 0.0])),
    ];

    let step_four = vec![
        // Lift, then carry the dishes off to the dark cupboard
        Segment::new(2.0)
            .with_op(TweenOp::new(
                dishes,
                Channel::Position,
                Motion::TwoPhase {
                    via: [-10.0, 5.0, 0.0],
                    target: [-10.0, 5.0, 60.0],
                },
            ))
            .with_effect(Effect::SetVisible {
                part: dishes,
                visible: false,
            }),
        Segment::new(0.0).with_op(TweenOp::home(dishes, Channel::Position)),
    ];

    let step_five = vec![
        Segment::new(0.0)
            .with_op(TweenOp::position(dishes, [-10.0, 5.0, 60.0]))
            .with_op(TweenOp::position(results, [0.0, 6.0, 65.0]))
            .with_effect(Effect::SetGroupVisible {
                group: BEFORE_GROUP.to_string(),
                visible: false,
            })
            .with_effect(Effect::SetVisible {
                part: dishes,
                visible: true,
            })
            .with_effect(Effect::SetVisible {
                part: results,
                visible: true,
            }),
        Segment::new(2.0)
            .with_op(TweenOp::home(dishes, Channel::Position))
            .with_op(TweenOp::home(results, Channel::Position)),
    ];

    Ok(Procedure::new("agar")
        .with_step("Step 1:\nLabel the Petri dishes with sample sources.", step_one)
        .with_step(
            "Step 2:\nUse sterile cotton swabs to collect samples from the designated areas.",
            step_two,
        )
        .with_step(
            "Step 3:\nGently swipe the swab onto the surface of the agar in the respective Petri dish.",
            step_three,
        )
        .with_step("Step 4:\nPlace the Petri dishes in dark place.", step_four)
        .with_step("Step 5:\nAfter 24-48 hours, observe bacterial growth.", step_five)
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
    fn test_label_pulse_returns_to_normal_scale() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        let proc = procedure(&registry).unwrap();
        let mut seq = Sequencer::new(proc, registry);
        run_step(&mut seq);
        for label in ["LABEL_LABTABLE", "LABEL_TAPWATER"] {
            assert_eq!(
                seq.registry().part_named(label).unwrap().transform.scale,
                [1.0, 1.0, 1.0]
            );
        }
    }

    #[test]
    fn test_growth_replaces_fresh_plates() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        let proc = procedure(&registry).unwrap();
        let mut seq = Sequencer::new(proc, registry);
        for _ in 0..5 {
            run_step(&mut seq);
        }
        let registry = seq.registry();
        assert!(registry.part_named("RESULTSAGAR").unwrap().visible);
        assert!(!registry.part_named("AGAR_CONTROL").unwrap().visible);
        assert!(!registry.part_named("AGAR_TAPWATER").unwrap().visible);
        // Dishes carried back into view
        assert_eq!(
            registry.part_named("PETRIDISHES").unwrap().transform.position,
            [0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_dishes_leave_through_the_waypoint() {
        let registry = PartRegistry::from_scene(&scene()).unwrap();
        let proc = procedure(&registry).unwrap();
        let mut seq = Sequencer::new(proc, registry);
        for _ in 0..3 {
            run_step(&mut seq);
        }
        seq.advance();
        // Half-way through the two-phase carry: exactly at the lift waypoint
        seq.tick(1.0);
        assert_eq!(
            seq.registry().part_named("PETRIDISHES").unwrap().transform.position,
            [-10.0, 5.0, 0.0]
        );
        while seq.is_in_flight() {
            seq.tick(0.1);
        }
        assert!(!seq.registry().part_named("PETRIDISHES").unwrap().visible);
    }
}
