//! Core data models for the type classifier

use serde::{Deserialize, Serialize};

/// Base stats accept values in this range
pub const STAT_RANGE: (u32, u32) = (1, 255);
/// Height in meters
pub const HEIGHT_RANGE: (f64, f64) = (0.1, 20.0);
/// Weight in kilograms
pub const WEIGHT_RANGE: (f64, f64) = (0.1, 1000.0);
pub const GENERATION_RANGE: (u32, u32) = (1, 9);

/// Names of the eight numeric attributes, in scaler order
pub const NUMERIC_COLUMNS: [&str; 8] = [
    "hp", "atk", "def", "spa", "spd", "speed", "height", "weight",
];

/// Column prefixes used when assembling a feature row
pub const SCALED_PREFIX: &str = "sc_";
pub const ABILITY_PREFIX: &str = "abi_";
pub const COLOR_PREFIX: &str = "color_";
pub const GENERATION_PREFIX: &str = "gen_";

/// Label used when no prediction could be produced
pub const UNKNOWN_LABEL: &str = "Unknown";
/// Label used when the pipeline is not usable at all
pub const ERROR_LABEL: &str = "Error";

/// The twelve attributes collected by the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    pub name: String,
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spa: u32,
    pub spd: u32,
    pub speed: u32,
    pub height: f64,
    pub weight: f64,
    pub ability: String,
    pub color: String,
    pub generation: u32,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            name: "Pikachu".to_string(),
            hp: 50,
            atk: 50,
            def: 50,
            spa: 50,
            spd: 50,
            speed: 50,
            height: 1.0,
            weight: 50.0,
            ability: "static".to_string(),
            color: "Yellow".to_string(),
            generation: 1,
        }
    }
}

impl FormInput {
    /// Numeric attributes in the order the scaler was fitted on
    pub fn numeric_values(&self) -> [f64; 8] {
        [
            self.hp as f64,
            self.atk as f64,
            self.def as f64,
            self.spa as f64,
            self.spd as f64,
            self.speed as f64,
            self.height,
            self.weight,
        ]
    }
}

/// One row of named numeric columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    columns: Vec<(String, f64)>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    /// Append a column. A column that already exists keeps its first value.
    pub fn push(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        if self.get(&name).is_none() {
            self.columns.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.columns.iter().map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Reindex to exactly `expected`, in that order.
    ///
    /// Expected columns absent from the row are filled with 0, columns not in
    /// `expected` are dropped.
    pub fn reindex(&self, expected: &[String]) -> FeatureRow {
        let columns = expected
            .iter()
            .map(|name| (name.clone(), self.get(name).unwrap_or(0.0)))
            .collect();
        FeatureRow { columns }
    }
}

/// Outcome of a predict action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub predicted_at: i64,
}

impl PredictionResult {
    pub fn success(label: impl Into<String>, confidence: Option<f64>) -> Self {
        Self {
            label: label.into(),
            message: "Prediction successful.".to_string(),
            confidence,
            predicted_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            label: ERROR_LABEL.to_string(),
            message: message.into(),
            confidence: None,
            predicted_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.label == ERROR_LABEL
    }
}
