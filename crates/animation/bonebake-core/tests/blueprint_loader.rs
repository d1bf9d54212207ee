use bonebake_core::{
    data::ONE, export_baked_json, parse_model_blueprint_json, AnimationModifier, BakeConfig,
    LoopMode, ModelBlueprint, Vec3,
};

fn approx3(a: Vec3, b: Vec3, eps: f32) {
    for i in 0..3 {
        assert!((a[i] - b[i]).abs() <= eps, "left={a:?} right={b:?} eps={eps}");
    }
}

fn load(name: &str) -> ModelBlueprint {
    let json = bonebake_test_fixtures::models::json(name).expect("load model fixture");
    parse_model_blueprint_json(&json).expect("parse model fixture")
}

#[test]
fn every_fixture_parses_and_bakes() {
    for key in bonebake_test_fixtures::models::keys() {
        let model = load(&key);
        let baked = model
            .bake_all(&BakeConfig::default())
            .unwrap_or_else(|e| panic!("bake {key}: {e}"));
        assert_eq!(baked.len(), model.animations.len());
    }
}

#[test]
fn humanoid_wave_metadata_survives_baking() {
    let model = load("humanoid-wave");
    assert_eq!(model.animations.len(), 2);
    let baked = model.bake_all(&BakeConfig::default()).unwrap();
    let wave = &baked[0];
    assert_eq!(wave.name, "wave");
    assert_eq!(wave.loop_mode, LoopMode::Loop);
    assert_eq!(wave.length, 2.0);
    assert!(!wave.override_flag);
    assert_eq!(
        wave.animators.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["body", "right_arm", "right_hand", "head"]
    );

    let blink = &baked[1];
    assert_eq!(blink.loop_mode, LoopMode::HoldOn);
    assert!(blink.override_flag);
}

#[test]
fn script_contract_follows_modifier() {
    let model = load("humanoid-wave");
    let baked = model.bake_all(&BakeConfig::default()).unwrap();
    let wave = &baked[0];
    let script = wave
        .script(&AnimationModifier::default())
        .expect("wave script");
    assert_eq!(script.data["sound"], "wave_whoosh");
    assert!(wave
        .script(&AnimationModifier::default().with_player("steve"))
        .is_none());
    assert!(wave
        .script(&AnimationModifier::default().with_override(true))
        .is_none());

    // blink has no script and overrides by default.
    let blink = &baked[1];
    assert!(blink.script(&AnimationModifier::default()).is_none());
}

#[test]
fn head_step_is_preserved_in_wave() {
    let model = load("humanoid-wave");
    let cfg = BakeConfig::default();
    let wave = model.animation("wave").unwrap().bake(&model.skeleton, &cfg).unwrap();
    let head = wave.animator("head").unwrap();
    let held = head.movement_at(0.95, cfg.frame_epsilon).expect("held sample");
    approx3(held.position, [0.0, 0.0, 0.0], 1e-6);
    let jumped = head.movement_at(1.0, cfg.frame_epsilon).unwrap();
    approx3(jumped.position, [0.0, 0.5, 0.0], 1e-6);
}

#[test]
fn blink_step_holds_on_both_sides() {
    let model = load("humanoid-wave");
    let cfg = BakeConfig::default();
    let blink = model.animation("blink").unwrap().bake(&model.skeleton, &cfg).unwrap();
    let head = blink.animator("head").unwrap();
    let at = |t: f32| head.movement_at(t, cfg.frame_epsilon).unwrap().scale;
    approx3(at(0.35), ONE, 1e-6);
    approx3(at(0.4), [1.0, 0.1, 1.0], 1e-6);
    approx3(at(0.55), [1.0, 0.1, 1.0], 1e-6);
    approx3(at(0.6), ONE, 1e-6);
}

#[test]
fn empty_rest_fixture_yields_neutral_frames() {
    let model = load("empty-rest");
    let baked = model.bake_all(&BakeConfig::default()).unwrap();
    let rest = &baked[0];
    assert!(rest.animators.is_empty());
    assert_eq!(rest.timeline().collect::<Vec<_>>(), vec![0.0, 3.0]);
}

#[test]
fn export_json_roundtrips_through_serde() {
    let model = load("spinner");
    let baked = model.bake_all(&BakeConfig::default()).unwrap();
    let json = export_baked_json(&baked[0]).expect("export");
    assert_eq!(json["name"], "spin");
    assert_eq!(json["loop_mode"], "loop");
    let back: bonebake_core::Animation = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, baked[0]);
}
