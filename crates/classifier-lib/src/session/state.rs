//! Form session state and its reducer

use crate::models::{
    FormInput, PredictionResult, GENERATION_RANGE, HEIGHT_RANGE, STAT_RANGE, WEIGHT_RANGE,
};
use crate::predictor::TypePredictor;
use crate::vocab::{is_color_option, normalize_ability};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything the page shows for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub input: FormInput,
    pub show_modal: bool,
    pub prediction_result: Option<PredictionResult>,
}

/// User actions. Field setters clamp to the widget ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum Action {
    OpenModal,
    CloseModal,
    Predict,
    Reset,
    SetName(String),
    SetHp(i64),
    SetAtk(i64),
    SetDef(i64),
    SetSpa(i64),
    SetSpd(i64),
    SetSpeed(i64),
    SetHeight(f64),
    SetWeight(f64),
    SetAbility(String),
    SetColor(String),
    SetGeneration(i64),
}

impl Action {
    /// Stable name used for metrics and logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::OpenModal => "open_modal",
            Action::CloseModal => "close_modal",
            Action::Predict => "predict",
            Action::Reset => "reset",
            Action::SetName(_) => "set_name",
            Action::SetHp(_) => "set_hp",
            Action::SetAtk(_) => "set_atk",
            Action::SetDef(_) => "set_def",
            Action::SetSpa(_) => "set_spa",
            Action::SetSpd(_) => "set_spd",
            Action::SetSpeed(_) => "set_speed",
            Action::SetHeight(_) => "set_height",
            Action::SetWeight(_) => "set_weight",
            Action::SetAbility(_) => "set_ability",
            Action::SetColor(_) => "set_color",
            Action::SetGeneration(_) => "set_generation",
        }
    }
}

fn clamp_int(value: i64, (min, max): (u32, u32)) -> u32 {
    value.clamp(min as i64, max as i64) as u32
}

/// Apply `action` to `state`, returning the next state
pub fn reduce(state: SessionState, action: Action, predictor: &TypePredictor) -> SessionState {
    let mut next = state;

    match action {
        Action::OpenModal => next.show_modal = true,
        Action::CloseModal => next.show_modal = false,
        Action::Predict => {
            next.prediction_result = Some(predictor.classify(&next.input));
        }
        Action::Reset => {
            next = SessionState::default();
        }
        Action::SetName(name) => next.input.name = name,
        Action::SetHp(v) => next.input.hp = clamp_int(v, STAT_RANGE),
        Action::SetAtk(v) => next.input.atk = clamp_int(v, STAT_RANGE),
        Action::SetDef(v) => next.input.def = clamp_int(v, STAT_RANGE),
        Action::SetSpa(v) => next.input.spa = clamp_int(v, STAT_RANGE),
        Action::SetSpd(v) => next.input.spd = clamp_int(v, STAT_RANGE),
        Action::SetSpeed(v) => next.input.speed = clamp_int(v, STAT_RANGE),
        Action::SetGeneration(v) => next.input.generation = clamp_int(v, GENERATION_RANGE),
        Action::SetHeight(v) if v.is_finite() => {
            next.input.height = v.clamp(HEIGHT_RANGE.0, HEIGHT_RANGE.1)
        }
        Action::SetWeight(v) if v.is_finite() => {
            next.input.weight = v.clamp(WEIGHT_RANGE.0, WEIGHT_RANGE.1)
        }
        Action::SetHeight(_) | Action::SetWeight(_) => {
            debug!("Ignoring non-finite measurement");
        }
        Action::SetAbility(ability) => next.input.ability = normalize_ability(&ability),
        Action::SetColor(color) => {
            if is_color_option(&color) {
                next.input.color = color;
            } else {
                debug!(color = %color, "Ignoring color outside the form options");
            }
        }
    }

    next
}

/// Apply several actions in order
pub fn reduce_all(
    state: SessionState,
    actions: impl IntoIterator<Item = Action>,
    predictor: &TypePredictor,
) -> SessionState {
    actions
        .into_iter()
        .fold(state, |state, action| reduce(state, action, predictor))
}

/// Label/value pairs echoed by the summary panel
pub fn summary(input: &FormInput) -> Vec<(&'static str, String)> {
    vec![
        ("Name", input.name.clone()),
        ("HP", input.hp.to_string()),
        ("Attack", input.atk.to_string()),
        ("Defense", input.def.to_string()),
        ("Sp. Attack", input.spa.to_string()),
        ("Sp. Defense", input.spd.to_string()),
        ("Speed", input.speed.to_string()),
        ("Generation", input.generation.to_string()),
        ("Height (m)", format!("{:?}", input.height)),
        ("Weight (kg)", format!("{:?}", input.weight)),
        ("Ability", input.ability.clone()),
        ("Color", input.color.clone()),
    ]
}
