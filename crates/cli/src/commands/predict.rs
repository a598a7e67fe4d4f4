//! Single prediction from command-line attributes

use anyhow::Result;
use classifier_lib::{
    session::{reduce_all, summary, Action},
    PredictionResult, SessionState, TypePredictor,
};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tabled::Tabled;

use super::load_artifacts;
use crate::output::{
    color_confidence, print_error, print_success, print_table, type_badge, OutputFormat,
};
use crate::PredictArgs;

#[derive(Tabled, Serialize)]
struct AttributeRow {
    #[tabled(rename = "Attribute")]
    attribute: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Serialize)]
struct PredictOutput<'a> {
    input: &'a classifier_lib::FormInput,
    result: &'a PredictionResult,
}

/// Setter actions followed by a prediction, in form order
pub(crate) fn actions(args: PredictArgs) -> Vec<Action> {
    vec![
        Action::SetName(args.name),
        Action::SetHp(args.hp),
        Action::SetAtk(args.atk),
        Action::SetDef(args.def),
        Action::SetSpa(args.spa),
        Action::SetSpd(args.spd),
        Action::SetSpeed(args.speed),
        Action::SetHeight(args.height),
        Action::SetWeight(args.weight),
        Action::SetAbility(args.ability),
        Action::SetColor(args.color),
        Action::SetGeneration(args.generation),
        Action::Predict,
    ]
}

/// Run a prediction through the same reducer the server uses
pub fn run(artifact_dir: &Path, args: PredictArgs, format: OutputFormat) -> Result<()> {
    let predictor = TypePredictor::new(Arc::new(load_artifacts(artifact_dir)));
    let state = reduce_all(SessionState::default(), actions(args), &predictor);
    let result = state
        .prediction_result
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no prediction was produced"))?;

    match format {
        OutputFormat::Json => crate::output::print_json(&PredictOutput {
            input: &state.input,
            result,
        })?,
        OutputFormat::Table => {
            println!("{}", "Entered Attributes".bold());
            let rows: Vec<AttributeRow> = summary(&state.input)
                .into_iter()
                .map(|(attribute, value)| AttributeRow { attribute, value })
                .collect();
            print_table(&rows, format)?;
            println!();

            if result.is_error() {
                print_error(&result.message);
            } else {
                print_success(&result.message);
                println!("Predicted primary type: {}", type_badge(&result.label));
                if let Some(confidence) = result.confidence {
                    println!("Confidence:             {}", color_confidence(confidence));
                }
            }
        }
    }

    Ok(())
}
