//! HTML rendering of the form page

use classifier_lib::{
    models::{GENERATION_RANGE, HEIGHT_RANGE, STAT_RANGE, WEIGHT_RANGE},
    session::summary,
    vocab::{display_ability, type_color, COLOR_OPTIONS},
    FormInput, SessionState,
};
use minijinja::{context, Environment};
use serde::Serialize;

const PAGE_TEMPLATE: &str = "page.html";

/// Animated sprites shown under the title
const SPRITES: [&str; 3] = ["charizard", "pikachu", "gengar"];
const SPRITE_BASE_URL: &str = "https://play.pokemonshowdown.com/sprites/ani";

#[derive(Serialize)]
struct Sprite {
    name: &'static str,
    url: String,
}

#[derive(Serialize)]
struct Field {
    key: &'static str,
    label: &'static str,
    value: u32,
}

#[derive(Serialize)]
struct SummaryRow {
    label: &'static str,
    value: String,
}

#[derive(Serialize)]
struct SelectOption {
    value: String,
    selected: bool,
}

#[derive(Serialize)]
struct ResultView {
    label: String,
    message: String,
    is_error: bool,
    color: &'static str,
    confidence: Option<String>,
}

/// Everything the page needs besides the session itself
pub struct PageContext<'a> {
    pub title: &'a str,
    pub ability_options: &'a [String],
    pub load_errors: &'a [String],
    pub warnings: &'a [String],
    pub has_background: bool,
}

/// Renders the page from the embedded template
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> anyhow::Result<Self> {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE, include_str!("../templates/page.html"))?;
        Ok(Self { env })
    }

    pub fn render(&self, session: &SessionState, page: &PageContext<'_>) -> anyhow::Result<String> {
        let input = &session.input;
        let template = self.env.get_template(PAGE_TEMPLATE)?;

        let html = template.render(context! {
            title => page.title,
            load_errors => page.load_errors,
            warnings => page.warnings,
            has_background => page.has_background,
            sprites => sprites(),
            show_modal => session.show_modal,
            input => input,
            stat_rows => stat_rows(input),
            stat_min => STAT_RANGE.0,
            stat_max => STAT_RANGE.1,
            generation_min => GENERATION_RANGE.0,
            generation_max => GENERATION_RANGE.1,
            height_min => HEIGHT_RANGE.0,
            height_max => HEIGHT_RANGE.1,
            weight_min => WEIGHT_RANGE.0,
            weight_max => WEIGHT_RANGE.1,
            abilities => ability_select(page.ability_options, &input.ability),
            colors => color_select(&input.color),
            summary => summary(input)
                .into_iter()
                .map(|(label, value)| SummaryRow { label, value })
                .collect::<Vec<_>>(),
            result => session.prediction_result.as_ref().map(|r| ResultView {
                label: r.label.clone(),
                message: r.message.clone(),
                is_error: r.is_error(),
                color: type_color(&r.label),
                confidence: r.confidence.map(|c| format!("{:.0}%", c * 100.0)),
            }),
        })?;
        Ok(html)
    }
}

fn sprites() -> Vec<Sprite> {
    SPRITES
        .iter()
        .map(|&name| Sprite {
            name,
            url: format!("{}/{}.gif", SPRITE_BASE_URL, name),
        })
        .collect()
}

fn stat_rows(input: &FormInput) -> [[Field; 3]; 2] {
    [
        [
            Field { key: "hp", label: "HP", value: input.hp },
            Field { key: "atk", label: "Attack", value: input.atk },
            Field { key: "def", label: "Defense", value: input.def },
        ],
        [
            Field { key: "spa", label: "Special Attack", value: input.spa },
            Field { key: "spd", label: "Special Defense", value: input.spd },
            Field { key: "speed", label: "Speed", value: input.speed },
        ],
    ]
}

/// Select options with the current value marked; the first option is
/// selected when the current value is not offered.
fn select_options(options: impl Iterator<Item = String>, current: &str) -> Vec<SelectOption> {
    let mut options: Vec<SelectOption> = options
        .map(|value| SelectOption {
            selected: value == current,
            value,
        })
        .collect();
    if !options.iter().any(|o| o.selected) {
        if let Some(first) = options.first_mut() {
            first.selected = true;
        }
    }
    options
}

fn ability_select(options: &[String], current: &str) -> Vec<SelectOption> {
    select_options(options.iter().cloned(), &display_ability(current))
}

fn color_select(current: &str) -> Vec<SelectOption> {
    select_options(COLOR_OPTIONS.iter().map(|c| c.to_string()), current)
}
