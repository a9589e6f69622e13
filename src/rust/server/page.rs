//! Renders the single HTML page of the service.

use std::collections::HashMap;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::advisor::{field_value, Recommendation, FEATURE_NAMES};

const TEMPLATE: &str = include_str!("../../../templates/index.html");
const FIELDS_SLOT: &str = "{{fields}}";
const RESULT_SLOT: &str = "{{result}}";

/// What to show below the form.
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    Empty,
    Recommendation(&'a Recommendation),
    Error(&'a str),
}

/// Renders the form, refilled from `values`, followed by `outcome`.
///
/// The template is split once at its placeholders and the pieces are
/// concatenated, so submitted text is never scanned for placeholders.
pub fn render(outcome: Outcome<'_>, values: &HashMap<String, String>) -> String {
    let (head, rest) = TEMPLATE.split_once(FIELDS_SLOT).unwrap_or((TEMPLATE, ""));
    let (middle, tail) = rest.split_once(RESULT_SLOT).unwrap_or((rest, ""));

    let mut page = String::with_capacity(TEMPLATE.len() + 1024);
    page.push_str(head);
    page.push_str(&render_fields(values));
    page.push_str(middle);
    page.push_str(&render_outcome(outcome));
    page.push_str(tail);
    page
}

fn render_fields(values: &HashMap<String, String>) -> String {
    FEATURE_NAMES
        .iter()
        .map(|name| {
            let value = field_value(values, name).unwrap_or("");
            format!(
                "<label for=\"{name}\">{label}<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\" required></label>",
                name = name,
                label = field_label(name),
                value = encode_double_quoted_attribute(value),
            )
        })
        .collect::<Vec<_>>()
        .join("\n    ")
}

fn render_outcome(outcome: Outcome<'_>) -> String {
    match outcome {
        Outcome::Empty => String::new(),
        Outcome::Recommendation(rec) => format!(
            "<section class=\"result\"><img src=\"{src}\" alt=\"{alt}\"><h2>Recommended Crop</h2><p>{message}</p></section>",
            src = encode_double_quoted_attribute(rec.image_url),
            alt = encode_double_quoted_attribute(rec.crop.unwrap_or("No recommendation")),
            message = encode_text(&rec.message),
        ),
        Outcome::Error(message) => format!(
            "<section class=\"error\" role=\"alert\">{}</section>",
            encode_text(message)
        ),
    }
}

fn field_label(name: &str) -> &'static str {
    match name {
        "Nitrogen" => "Nitrogen",
        "Phosphorus" => "Phosphorus",
        "Potassium" => "Potassium",
        "Temperature" => "Temperature (°C)",
        "Humidity" => "Humidity (%)",
        "pH" => "pH",
        "Rainfall" => "Rainfall (mm)",
        _ => "",
    }
}
