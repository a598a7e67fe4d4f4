//! Fixed vocabularies: type palette, color options, ability display

use crate::models::UNKNOWN_LABEL;

/// Display color for every known primary type
pub const TYPE_COLORS: [(&str, &str); 18] = [
    ("Normal", "#A8A878"),
    ("Fire", "#F08030"),
    ("Water", "#6890F0"),
    ("Grass", "#78C850"),
    ("Electric", "#F8D030"),
    ("Ice", "#98D8D8"),
    ("Fighting", "#C03028"),
    ("Poison", "#A040A0"),
    ("Ground", "#E0C068"),
    ("Flying", "#A890F0"),
    ("Psychic", "#F85888"),
    ("Bug", "#A8B820"),
    ("Rock", "#B8A038"),
    ("Ghost", "#705898"),
    ("Dragon", "#7038F8"),
    ("Steel", "#B8B8D0"),
    ("Dark", "#705848"),
    ("Fairy", "#EE99AC"),
];

/// Fallback color for labels outside the palette
pub const UNKNOWN_COLOR: &str = "#68A090";

/// Colors offered by the form
pub const COLOR_OPTIONS: [&str; 6] = ["Yellow", "Blue", "Red", "Green", "White", "Black"];

/// Shown when the ability encoder could not be loaded
pub const NO_ABILITIES: &str = "None";

/// Badge color for a predicted label
pub fn type_color(label: &str) -> &'static str {
    TYPE_COLORS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, color)| *color)
        .unwrap_or(UNKNOWN_COLOR)
}

/// A palette type or the "Unknown" fallback
pub fn is_known_type(label: &str) -> bool {
    label == UNKNOWN_LABEL || TYPE_COLORS.iter().any(|(name, _)| *name == label)
}

pub fn is_color_option(color: &str) -> bool {
    COLOR_OPTIONS.contains(&color)
}

/// Capitalize an encoder class for display ("static" -> "Static")
pub fn display_ability(ability: &str) -> String {
    let lower = ability.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Form representation of an ability: trimmed and lowercased like the encoder classes
pub fn normalize_ability(ability: &str) -> String {
    ability.trim().to_lowercase()
}

/// Parse a `#RRGGBB` color into its components
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_color_lookup() {
        assert_eq!(type_color("Fire"), "#F08030");
        assert_eq!(type_color("Electric"), "#F8D030");
        assert_eq!(type_color("Unknown"), UNKNOWN_COLOR);
        assert_eq!(type_color("Shadow"), UNKNOWN_COLOR);
    }

    #[test]
    fn test_known_types() {
        assert!(is_known_type("Dragon"));
        assert!(is_known_type("Unknown"));
        assert!(!is_known_type("dragon"));
    }

    #[test]
    fn test_ability_display_and_normalization() {
        assert_eq!(display_ability("static"), "Static");
        assert_eq!(display_ability("LIGHTNING-ROD"), "Lightning-rod");
        assert_eq!(display_ability(""), "");
        assert_eq!(normalize_ability("  Static "), "static");
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#F08030"), Some((0xF0, 0x80, 0x30)));
        assert_eq!(hex_to_rgb("F08030"), None);
        assert_eq!(hex_to_rgb("#F080"), None);
        assert_eq!(hex_to_rgb("#aébcd"), None);
        assert_eq!(hex_to_rgb("#GG0000"), None);
    }
}
