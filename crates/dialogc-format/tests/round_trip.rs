//! Writing a compiled model and parsing it back recovers exactly the
//! builders' nonzero entries.

use dialogc_core::tolerance::ROW_SUM_TOLERANCE;
use dialogc_format::{Labels, PomdpDocument, PomdpWriter};
use dialogc_model::CompiledModel;
use dialogc_spec::{compose_all, ConfusionSource, IdentityConfusion, RandomConfusion, SpecLoader};
use dialogc_test_utils::fixtures;
use proptest::prelude::*;

fn compile(doc: &str, confusion: &dyn ConfusionSource) -> CompiledModel {
    let (spec, m) = SpecLoader::new().load_str(doc, confusion).unwrap();
    let tables = compose_all(&spec, &m, 1).unwrap();
    CompiledModel::build(spec, tables, ROW_SUM_TOLERANCE).unwrap()
}

fn round_trip(model: &CompiledModel) -> PomdpDocument {
    let mut buf = Vec::new();
    PomdpWriter::new(&mut buf).write_model(model).unwrap();
    PomdpDocument::read(buf.as_slice()).unwrap()
}

fn assert_recovers(model: &CompiledModel, doc: &PomdpDocument) {
    let labels = Labels::new(model);
    assert_eq!(doc.discount(), model.discount());
    assert_eq!(doc.values(), "reward");
    assert!(doc.states().eq(labels.states().iter().map(String::as_str)));
    assert!(doc.actions().eq(labels.actions().iter().map(String::as_str)));
    assert!(doc
        .observations()
        .eq(labels.observations().iter().map(String::as_str)));
    assert_eq!(doc.start(), model.initial_belief().as_slice());

    let transitions: Vec<_> = model.transitions().iter().collect();
    assert_eq!(doc.transitions(), transitions.as_slice());
    let observations: Vec<_> = model.observations().iter().collect();
    assert_eq!(doc.observation_probs(), observations.as_slice());
    let rewards: Vec<_> = model.rewards().iter().collect();
    assert_eq!(doc.rewards(), rewards.as_slice());
}

#[test]
fn reference_model_round_trips() {
    let model = compile(fixtures::YES_NO_SPEC, &IdentityConfusion);
    assert_recovers(&model, &round_trip(&model));
}

#[test]
fn partial_effect_table_round_trips() {
    let model = compile(fixtures::HANDS_SPEC, &RandomConfusion::new(11));
    assert_recovers(&model, &round_trip(&model));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn synthetic_models_round_trip(
        seed in any::<u64>(),
        classes in 1usize..5,
        observations in 1usize..5,
        questions in 0usize..4,
    ) {
        let doc = fixtures::synthetic_spec_json(classes, observations, questions, seed);
        let model = compile(&doc, &RandomConfusion::new(seed.wrapping_add(1)));
        assert_recovers(&model, &round_trip(&model));
    }
}
