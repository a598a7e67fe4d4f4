//! Tests for the session reducer

use super::*;
use crate::artifacts::{Artifacts, LinearClassifier, MultiLabelEncoder, StandardScaler};
use crate::models::{FormInput, ERROR_LABEL, UNKNOWN_LABEL};
use crate::predictor::TypePredictor;
use std::sync::Arc;

fn working_predictor() -> TypePredictor {
    let schema: Vec<String> = ["sc_hp", "abi_static", "color_Yellow", "gen_1"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let classifier = LinearClassifier::new(
        vec!["Electric".to_string(), "Normal".to_string()],
        schema,
        vec![vec![0.0, 2.0, 0.0, 0.0], vec![0.0, 0.0, 0.0, 0.0]],
        vec![0.0, 0.5],
    )
    .unwrap();
    let artifacts = Artifacts::from_parts(
        Some(Arc::new(classifier)),
        Some(StandardScaler::identity()),
        Some(MultiLabelEncoder::new(vec!["blaze".to_string(), "static".to_string()]).unwrap()),
    );
    TypePredictor::new(Arc::new(artifacts))
}

fn degraded_predictor() -> TypePredictor {
    TypePredictor::new(Arc::new(Artifacts::empty()))
}

fn edited_state(predictor: &TypePredictor) -> SessionState {
    reduce_all(
        SessionState::default(),
        [
            Action::OpenModal,
            Action::SetName("Charmander".to_string()),
            Action::SetHp(39),
            Action::SetAbility("Blaze".to_string()),
            Action::SetColor("Red".to_string()),
            Action::SetGeneration(1),
            Action::Predict,
        ],
        predictor,
    )
}

#[test]
fn test_initial_state() {
    let state = SessionState::default();
    assert_eq!(state.input, FormInput::default());
    assert!(!state.show_modal);
    assert!(state.prediction_result.is_none());
}

#[test]
fn test_open_close_leaves_input_unchanged() {
    let predictor = working_predictor();
    let before = edited_state(&predictor);
    let after = reduce_all(
        before.clone(),
        [Action::OpenModal, Action::CloseModal],
        &predictor,
    );
    assert_eq!(after.input, before.input);
    assert_eq!(after.prediction_result, before.prediction_result);
    assert!(!after.show_modal);
}

#[test]
fn test_reset_restores_defaults_from_any_state() {
    let predictor = working_predictor();
    let edited = edited_state(&predictor);
    assert!(edited.prediction_result.is_some());
    assert!(edited.show_modal);

    let reset = reduce(edited, Action::Reset, &predictor);
    assert_eq!(reset, SessionState::default());

    let reset_twice = reduce(reset.clone(), Action::Reset, &predictor);
    assert_eq!(reset_twice, reset);
}

#[test]
fn test_predict_stores_result() {
    let predictor = working_predictor();
    let state = reduce(SessionState::default(), Action::Predict, &predictor);
    let result = state.prediction_result.unwrap();
    assert_eq!(result.label, "Electric");
    assert_eq!(result.message, "Prediction successful.");

    let state = reduce_all(
        SessionState::default(),
        [Action::SetAbility("blaze".to_string()), Action::Predict],
        &predictor,
    );
    assert_eq!(state.prediction_result.unwrap().label, "Normal");
}

#[test]
fn test_result_persists_across_modal_toggle() {
    let predictor = working_predictor();
    let state = reduce(SessionState::default(), Action::Predict, &predictor);
    let result = state.prediction_result.clone();
    let state = reduce_all(state, [Action::OpenModal, Action::CloseModal], &predictor);
    assert_eq!(state.prediction_result, result);
}

#[test]
fn test_predict_with_missing_artifacts_is_error() {
    let state = reduce(SessionState::default(), Action::Predict, &degraded_predictor());
    let result = state.prediction_result.unwrap();
    assert_eq!(result.label, ERROR_LABEL);
    assert!(result.is_error());
}

#[test]
fn test_numeric_setters_clamp() {
    let predictor = degraded_predictor();
    let state = reduce_all(
        SessionState::default(),
        [
            Action::SetHp(0),
            Action::SetAtk(300),
            Action::SetDef(-20),
            Action::SetSpa(255),
            Action::SetSpd(1),
            Action::SetSpeed(1000),
            Action::SetHeight(0.0),
            Action::SetWeight(5000.0),
            Action::SetGeneration(12),
        ],
        &predictor,
    );
    let input = state.input;
    assert_eq!(input.hp, 1);
    assert_eq!(input.atk, 255);
    assert_eq!(input.def, 1);
    assert_eq!(input.spa, 255);
    assert_eq!(input.spd, 1);
    assert_eq!(input.speed, 255);
    assert_eq!(input.height, 0.1);
    assert_eq!(input.weight, 1000.0);
    assert_eq!(input.generation, 9);
}

#[test]
fn test_non_finite_measurements_ignored() {
    let predictor = degraded_predictor();
    let state = reduce_all(
        SessionState::default(),
        [Action::SetHeight(f64::NAN), Action::SetWeight(f64::INFINITY)],
        &predictor,
    );
    assert_eq!(state.input.height, 1.0);
    assert_eq!(state.input.weight, 50.0);
}

#[test]
fn test_ability_is_normalized() {
    let state = reduce(
        SessionState::default(),
        Action::SetAbility(" Lightning-Rod ".to_string()),
        &degraded_predictor(),
    );
    assert_eq!(state.input.ability, "lightning-rod");
}

#[test]
fn test_unknown_color_ignored() {
    let predictor = degraded_predictor();
    let state = reduce(
        SessionState::default(),
        Action::SetColor("Purple".to_string()),
        &predictor,
    );
    assert_eq!(state.input.color, "Yellow");

    let state = reduce(state, Action::SetColor("Blue".to_string()), &predictor);
    assert_eq!(state.input.color, "Blue");
}

#[test]
fn test_unknown_ability_predicts_without_error() {
    let predictor = working_predictor();
    let state = reduce_all(
        SessionState::default(),
        [Action::SetAbility("pressure".to_string()), Action::Predict],
        &predictor,
    );
    let result = state.prediction_result.unwrap();
    assert!(!result.is_error());
    assert_ne!(result.label, UNKNOWN_LABEL);
}

#[test]
fn test_action_json_format() {
    let action: Action = serde_json::from_str(r#"{"action": "set_hp", "value": 80}"#).unwrap();
    assert_eq!(action, Action::SetHp(80));
    let action: Action = serde_json::from_str(r#"{"action": "predict"}"#).unwrap();
    assert_eq!(action, Action::Predict);
    assert_eq!(action.name(), "predict");
}

#[test]
fn test_summary_echoes_all_fields() {
    let rows = summary(&FormInput::default());
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0], ("Name", "Pikachu".to_string()));
    assert!(rows.contains(&("Height (m)", "1.0".to_string())));
    assert!(rows.contains(&("Ability", "static".to_string())));
}
