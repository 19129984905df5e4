use std::sync::Arc;

use corsa_core::behavior::primitives::{
    MacroPhase, Primitive, PrimitiveConstantVelocity, PrimitiveContinuousAction,
    PrimitiveMacroAction,
};
use corsa_core::persist::{
    behavior_from_envelope, behavior_to_envelope, goal_definition_from_envelope,
    goal_definition_to_envelope, label_from_envelope, label_to_envelope, primitive_from_envelope,
    primitive_to_envelope, EnvelopeError, TAG_PRIMITIVE_MACRO_ACTION,
};
use corsa_core::{
    BehaviorConstantVelocity, BehaviorIdmClassic, BehaviorModel, BehaviorMotionPrimitives,
    FixedWorld, GoalDefinitionPosition, GoalDefinitionStateLimits, NearPositionLabel, SetterParams,
    SingleTrackModel, SpeedAboveLabel,
};
use corsa_protocol::{wire, Envelope, Input, State};

#[test]
fn behavior_models_roundtrip_with_concrete_type() {
    let mut params = SetterParams::new();
    params.set_real("planning_time_delta", 0.1);
    params.set_real("idm_desired_velocity", 20.0);

    let cv = BehaviorConstantVelocity::new(&params);
    let envelope = behavior_to_envelope(&cv).expect("to envelope");
    assert_eq!(envelope.tag, "BehaviorConstantVelocity");
    let back = behavior_from_envelope(&envelope).expect("from envelope");
    assert_eq!(
        back.as_any().downcast_ref::<BehaviorConstantVelocity>(),
        Some(&cv)
    );

    let idm = BehaviorIdmClassic::new(&params);
    let envelope = behavior_to_envelope(&idm).expect("to envelope");
    assert_eq!(envelope.tag, "BehaviorIdmClassic");
    let back = behavior_from_envelope(&envelope).expect("from envelope");
    assert_eq!(
        back.as_any().downcast_ref::<BehaviorIdmClassic>(),
        Some(&idm)
    );
}

#[test]
fn reconstructed_behavior_plans_identically() {
    let params = SetterParams::new();
    let mut original = BehaviorIdmClassic::new(&params);

    let envelope = behavior_to_envelope(&original).expect("to envelope");
    let mut restored = behavior_from_envelope(&envelope).expect("from envelope");

    let world = FixedWorld::new(State::new(vec![0.0, 0.0, 0.0, 0.0, 5.0]), 0.0);
    let a = original.plan(2.0, &world).expect("original plan");
    let b = restored.plan(2.0, &world).expect("restored plan");
    assert_eq!(a, b);
}

#[test]
fn primitives_roundtrip_with_concrete_type() {
    let primitives: Vec<Box<dyn Primitive>> = vec![
        Box::new(PrimitiveConstantVelocity::new()),
        Box::new(PrimitiveContinuousAction::new(Input::new(vec![1.5, -0.2]))),
        Box::new(PrimitiveMacroAction::new(vec![
            MacroPhase::AccelerateTo {
                target_speed: 8.0,
                acceleration: 1.0,
            },
            MacroPhase::Hold { duration: 2.0 },
        ])),
    ];

    for primitive in &primitives {
        let envelope = primitive_to_envelope(primitive.as_ref()).expect("to envelope");
        let back = primitive_from_envelope(&envelope).expect("from envelope");
        assert_eq!(back.as_any().type_id(), primitive.as_any().type_id());
    }
}

#[test]
fn macro_action_roundtrip_preserves_phase_progress() {
    let mut primitive = PrimitiveMacroAction::new(vec![
        MacroPhase::AccelerateTo {
            target_speed: 5.0,
            acceleration: 2.0,
        },
        MacroPhase::Hold { duration: 1.0 },
    ]);

    // Progress into the hold phase, then checkpoint.
    let world = FixedWorld::new(State::new(vec![2.5, 0.0, 0.0, 0.0, 5.0]), 2.5);
    primitive.get_input(&world);
    assert_eq!(
        primitive.current_phase(),
        Some(&MacroPhase::Hold { duration: 1.0 })
    );

    let envelope = primitive_to_envelope(&primitive).expect("to envelope");
    assert_eq!(envelope.tag, TAG_PRIMITIVE_MACRO_ACTION);
    let restored = primitive_from_envelope(&envelope).expect("from envelope");
    let restored = restored
        .as_any()
        .downcast_ref::<PrimitiveMacroAction>()
        .expect("concrete macro action");
    assert_eq!(restored, &primitive);
}

#[test]
fn goal_definitions_roundtrip_with_concrete_type() {
    let limits = GoalDefinitionStateLimits {
        x_min: 0.0,
        x_max: 10.0,
        y_min: -2.0,
        y_max: 2.0,
        theta_min: -0.5,
        theta_max: 0.5,
    };
    let envelope = goal_definition_to_envelope(&limits).expect("to envelope");
    let back = goal_definition_from_envelope(&envelope).expect("from envelope");
    assert_eq!(
        back.as_any().downcast_ref::<GoalDefinitionStateLimits>(),
        Some(&limits)
    );

    let position = GoalDefinitionPosition {
        x: 3.0,
        y: 4.0,
        radius: 1.5,
    };
    let envelope = goal_definition_to_envelope(&position).expect("to envelope");
    let back = goal_definition_from_envelope(&envelope).expect("from envelope");
    assert_eq!(
        back.as_any().downcast_ref::<GoalDefinitionPosition>(),
        Some(&position)
    );
}

#[test]
fn labels_roundtrip_with_concrete_type() {
    let speed = SpeedAboveLabel { threshold: 10.0 };
    let envelope = label_to_envelope(&speed).expect("to envelope");
    let back = label_from_envelope(&envelope).expect("from envelope");
    assert_eq!(back.as_any().downcast_ref::<SpeedAboveLabel>(), Some(&speed));

    let near = NearPositionLabel {
        x: 1.0,
        y: 2.0,
        radius: 3.0,
    };
    let envelope = label_to_envelope(&near).expect("to envelope");
    let back = label_from_envelope(&envelope).expect("from envelope");
    assert_eq!(back.as_any().downcast_ref::<NearPositionLabel>(), Some(&near));
}

#[test]
fn unregistered_behavior_subtype_is_rejected() {
    let params = SetterParams::new();
    let dynamics = Arc::new(SingleTrackModel::new(&params));
    let behavior = BehaviorMotionPrimitives::new(dynamics, &params);

    assert!(matches!(
        behavior_to_envelope(&behavior),
        Err(EnvelopeError::UnknownSubtype { .. })
    ));
}

#[test]
fn unknown_tags_are_rejected_per_hierarchy() {
    let envelope = Envelope::new("BehaviorTeleport", vec![]);
    assert!(matches!(
        behavior_from_envelope(&envelope),
        Err(EnvelopeError::UnknownTag { .. })
    ));
    assert!(matches!(
        primitive_from_envelope(&envelope),
        Err(EnvelopeError::UnknownTag { .. })
    ));
    assert!(matches!(
        goal_definition_from_envelope(&envelope),
        Err(EnvelopeError::UnknownTag { .. })
    ));
    assert!(matches!(
        label_from_envelope(&envelope),
        Err(EnvelopeError::UnknownTag { .. })
    ));
}

#[test]
fn tags_are_not_shared_across_hierarchies() {
    let primitive = PrimitiveConstantVelocity::new();
    let envelope = primitive_to_envelope(&primitive).expect("to envelope");

    // A primitive tag means nothing to the behavior-model registry.
    assert!(matches!(
        behavior_from_envelope(&envelope),
        Err(EnvelopeError::UnknownTag { .. })
    ));
}

#[test]
fn envelopes_survive_the_wire_format() {
    let primitive = PrimitiveContinuousAction::new(Input::new(vec![2.0, 0.0]));
    let envelope = primitive_to_envelope(&primitive).expect("to envelope");

    let bytes = wire::serialize_envelope(&envelope).expect("serialize");
    let decoded = wire::deserialize_envelope(&bytes).expect("deserialize");
    let back = primitive_from_envelope(&decoded).expect("from envelope");
    assert_eq!(
        back.as_any().downcast_ref::<PrimitiveContinuousAction>(),
        Some(&primitive)
    );
}
