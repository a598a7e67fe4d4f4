//! Feature row assembly for the type classifier
//!
//! Builds the scaled numeric columns, the ability indicators, the color and
//! generation one-hot columns, then aligns the result with the classifier's
//! feature schema.

use crate::artifacts::{MultiLabelEncoder, StandardScaler};
use crate::models::{
    FeatureRow, FormInput, ABILITY_PREFIX, COLOR_PREFIX, GENERATION_PREFIX, NUMERIC_COLUMNS,
    SCALED_PREFIX,
};
use tracing::warn;

/// Aligned row plus the categorical values that had no column in the schema
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltFeatures {
    pub row: FeatureRow,
    pub unplaced: Vec<String>,
}

/// Assembles feature rows with a fitted scaler and ability encoder
pub struct FeatureBuilder<'a> {
    scaler: &'a StandardScaler,
    encoder: &'a MultiLabelEncoder,
}

impl<'a> FeatureBuilder<'a> {
    pub fn new(scaler: &'a StandardScaler, encoder: &'a MultiLabelEncoder) -> Self {
        Self { scaler, encoder }
    }

    /// Build an aligned row, or `None` if either fitted transformer is absent
    pub fn build(
        input: &FormInput,
        scaler: Option<&StandardScaler>,
        encoder: Option<&MultiLabelEncoder>,
        expected_columns: &[String],
    ) -> Option<FeatureRow> {
        let builder = FeatureBuilder::new(scaler?, encoder?);
        Some(builder.build_aligned(input, expected_columns).row)
    }

    /// Unaligned row: scaled numerics, abilities, color, generation
    pub fn assemble(&self, input: &FormInput) -> FeatureRow {
        let classes = self.encoder.classes();
        let mut row = FeatureRow::with_capacity(NUMERIC_COLUMNS.len() + classes.len() + 2);

        let scaled = self.scaler.transform(&input.numeric_values());
        for (column, value) in NUMERIC_COLUMNS.iter().zip(scaled) {
            row.push(format!("{}{}", SCALED_PREFIX, column), value);
        }

        let abilities = self.encoder.transform(&[input.ability.as_str()]);
        for (class, value) in classes.iter().zip(abilities) {
            row.push(format!("{}{}", ABILITY_PREFIX, class), value);
        }

        row.push(color_column(&input.color), 1.0);
        row.push(generation_column(input.generation), 1.0);
        row
    }

    /// Assemble and reindex against `expected_columns`
    pub fn build_aligned(&self, input: &FormInput, expected_columns: &[String]) -> BuiltFeatures {
        let assembled = self.assemble(input);
        let row = assembled.reindex(expected_columns);

        let mut unplaced = Vec::new();
        if !self.encoder.knows(&input.ability) {
            unplaced.push(format!("{}{}", ABILITY_PREFIX, input.ability));
        }
        for column in [color_column(&input.color), generation_column(input.generation)] {
            if !row.contains(&column) {
                unplaced.push(column);
            }
        }

        if !unplaced.is_empty() {
            warn!(
                columns = ?unplaced,
                "Categorical values outside the model schema were zero-filled"
            );
        }

        BuiltFeatures { row, unplaced }
    }
}

fn color_column(color: &str) -> String {
    format!("{}{}", COLOR_PREFIX, color)
}

fn generation_column(generation: u32) -> String {
    format!("{}{}", GENERATION_PREFIX, generation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> MultiLabelEncoder {
        MultiLabelEncoder::new(
            ["blaze", "levitate", "overgrow", "static", "torrent"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .unwrap()
    }

    fn scaler() -> StandardScaler {
        StandardScaler::new(
            Some(vec![70.0, 80.0, 75.0, 70.0, 70.0, 65.0, 1.2, 60.0]),
            Some(vec![25.0, 30.0, 30.0, 30.0, 25.0, 28.0, 1.1, 100.0]),
        )
        .unwrap()
    }

    fn schema() -> Vec<String> {
        let mut cols: Vec<String> = NUMERIC_COLUMNS
            .iter()
            .map(|c| format!("sc_{}", c))
            .collect();
        for a in ["blaze", "levitate", "overgrow", "static", "torrent"] {
            cols.push(format!("abi_{}", a));
        }
        for c in ["Black", "Blue", "Green", "Red", "White", "Yellow"] {
            cols.push(format!("color_{}", c));
        }
        for g in 1..=9 {
            cols.push(format!("gen_{}", g));
        }
        cols
    }

    fn count_set(row: &FeatureRow, prefix: &str) -> usize {
        row.iter()
            .filter(|(name, value)| name.starts_with(prefix) && *value == 1.0)
            .count()
    }

    #[test]
    fn test_default_input_row() {
        let (scaler, encoder) = (scaler(), encoder());
        let expected = schema();
        let row = FeatureBuilder::build(
            &FormInput::default(),
            Some(&scaler),
            Some(&encoder),
            &expected,
        )
        .unwrap();

        let names: Vec<&str> = row.names().collect();
        assert_eq!(names, expected.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(count_set(&row, "abi_"), 1);
        assert_eq!(row.get("abi_static"), Some(1.0));
        assert_eq!(count_set(&row, "color_"), 1);
        assert_eq!(row.get("color_Yellow"), Some(1.0));
        assert_eq!(count_set(&row, "gen_"), 1);
        assert_eq!(row.get("gen_1"), Some(1.0));

        let scaled: Vec<f64> = row
            .iter()
            .filter(|(name, _)| name.starts_with("sc_"))
            .map(|(_, v)| v)
            .collect();
        assert_eq!(scaled.len(), 8);
        assert!((scaled[0] - (50.0 - 70.0) / 25.0).abs() < 1e-12);
        assert!(scaled.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_columns_match_schema_across_inputs() {
        let (scaler, encoder) = (scaler(), encoder());
        let builder = FeatureBuilder::new(&scaler, &encoder);
        let expected = schema();

        for generation in 1..=9 {
            for color in ["Yellow", "Blue", "Red", "Green", "White", "Black"] {
                let input = FormInput {
                    hp: 255,
                    speed: 1,
                    height: 20.0,
                    weight: 0.1,
                    ability: "torrent".to_string(),
                    color: color.to_string(),
                    generation,
                    ..FormInput::default()
                };
                let built = builder.build_aligned(&input, &expected);
                assert!(built.row.names().eq(expected.iter().map(String::as_str)));
                assert!(built.unplaced.is_empty());
            }
        }
    }

    #[test]
    fn test_unknown_ability_zero_fills() {
        let (scaler, encoder) = (scaler(), encoder());
        let input = FormInput {
            ability: "pressure".to_string(),
            ..FormInput::default()
        };
        let built = FeatureBuilder::new(&scaler, &encoder).build_aligned(&input, &schema());

        assert_eq!(count_set(&built.row, "abi_"), 0);
        assert_eq!(built.unplaced, vec!["abi_pressure".to_string()]);
        assert_eq!(built.row.len(), schema().len());
    }

    #[test]
    fn test_unknown_color_zero_fills() {
        let (scaler, encoder) = (scaler(), encoder());
        let input = FormInput {
            color: "Purple".to_string(),
            ..FormInput::default()
        };
        let built = FeatureBuilder::new(&scaler, &encoder).build_aligned(&input, &schema());

        assert_eq!(count_set(&built.row, "color_"), 0);
        assert!(!built.row.contains("color_Purple"));
        assert_eq!(built.unplaced, vec!["color_Purple".to_string()]);
    }

    #[test]
    fn test_extra_columns_dropped() {
        let (scaler, encoder) = (scaler(), encoder());
        let expected = vec!["sc_hp".to_string(), "gen_1".to_string(), "missing".to_string()];
        let row = FeatureBuilder::build(
            &FormInput::default(),
            Some(&scaler),
            Some(&encoder),
            &expected,
        )
        .unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row.get("gen_1"), Some(1.0));
        assert_eq!(row.get("missing"), Some(0.0));
        assert!(!row.contains("abi_static"));
    }

    #[test]
    fn test_missing_transformers_give_none() {
        let (scaler, encoder) = (scaler(), encoder());
        let expected = schema();
        let input = FormInput::default();
        assert!(FeatureBuilder::build(&input, None, Some(&encoder), &expected).is_none());
        assert!(FeatureBuilder::build(&input, Some(&scaler), None, &expected).is_none());
    }

    #[test]
    fn test_assemble_order() {
        let (scaler, encoder) = (scaler(), encoder());
        let row = FeatureBuilder::new(&scaler, &encoder).assemble(&FormInput::default());
        let names: Vec<&str> = row.names().collect();
        assert_eq!(names[0], "sc_hp");
        assert_eq!(names[7], "sc_weight");
        assert_eq!(names[8], "abi_blaze");
        assert_eq!(names[names.len() - 2], "color_Yellow");
        assert_eq!(names[names.len() - 1], "gen_1");
    }
}
