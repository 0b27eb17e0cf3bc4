use super::escape_html;
use super::theme::Theme;
use crate::freshness::domain::{FieldSpec, ItemReading, PerishableCategory};
use std::fmt::Write as _;

fn format_value(spec: &FieldSpec, value: f64) -> String {
    if spec.step >= 1.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn render_slider(html: &mut String, spec: &FieldSpec, value: f64) {
    let current = format_value(spec, value);
    let _ = writeln!(
        html,
        "<label for=\"{name}\">{label} <output id=\"{name}-value\">{current}</output></label>",
        name = spec.name,
        label = escape_html(spec.label),
    );
    let _ = writeln!(
        html,
        "<input type=\"range\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{current}\" oninput=\"this.previousElementSibling.lastElementChild.value=this.value\">",
        name = spec.name,
        min = format_value(spec, spec.min),
        max = format_value(spec, spec.max),
        step = spec.step,
    );
}

/// Item details form posting to `/score`, pre-filled from `reading`.
pub fn render_form(reading: &ItemReading, theme: Theme) -> String {
    let mut html = String::new();
    html.push_str("<form class=\"freshscore-form\" method=\"post\" action=\"/score\">\n");
    html.push_str("<h4>📋 Enter Item Details</h4>\n");
    let _ = writeln!(
        html,
        "<input type=\"hidden\" name=\"theme\" value=\"{}\">",
        theme.slug()
    );

    html.push_str("<label for=\"category\">Perishable Category</label>\n");
    html.push_str("<select id=\"category\" name=\"category\">\n");
    for category in PerishableCategory::form_order() {
        let selected = if category == reading.category() {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<option value=\"{}\"{selected}>{}</option>",
            category.slug(),
            escape_html(category.label())
        );
    }
    html.push_str("</select>\n");

    for (spec, value) in reading.numeric_fields() {
        render_slider(&mut html, &spec, value);
    }

    html.push_str("<button type=\"submit\">🚀 Predict FreshScore</button>\n");
    html.push_str("</form>\n");
    html
}
