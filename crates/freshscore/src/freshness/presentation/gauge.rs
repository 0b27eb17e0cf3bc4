use super::theme::Theme;
use crate::freshness::domain::{FreshScore, RiskTier};
use std::f64::consts::PI;
use std::fmt::Write as _;

/// Delta on the gauge is measured against the healthy floor.
pub const REFERENCE: f64 = RiskTier::HEALTHY_FLOOR;

const CENTER_X: f64 = 150.0;
const CENTER_Y: f64 = 160.0;
const BAND_RADIUS: f64 = 100.0;
const BAND_WIDTH: f64 = 30.0;
const BAR_WIDTH: f64 = 12.0;
const TICK_RADIUS: f64 = 128.0;

/// Maps a gauge value onto the half circle, 0 on the left and 100 on the right.
fn point(value: f64, radius: f64) -> (f64, f64) {
    let fraction = (value - FreshScore::MIN) / (FreshScore::MAX - FreshScore::MIN);
    let angle = PI * (1.0 - fraction.clamp(0.0, 1.0));
    (
        CENTER_X + radius * angle.cos(),
        CENTER_Y - radius * angle.sin(),
    )
}

fn arc_path(from: f64, to: f64, radius: f64) -> String {
    let (x1, y1) = point(from, radius);
    let (x2, y2) = point(to, radius);
    format!("M {x1:.2} {y1:.2} A {radius:.2} {radius:.2} 0 0 1 {x2:.2} {y2:.2}")
}

fn radial_line(value: f64, inner: f64, outer: f64) -> (f64, f64, f64, f64) {
    let (x1, y1) = point(value, inner);
    let (x2, y2) = point(value, outer);
    (x1, y1, x2, y2)
}

/// Signed difference from [`REFERENCE`] with its arrow and colour.
pub fn delta(score: FreshScore) -> (String, &'static str) {
    let difference = score.value() - REFERENCE;
    if difference > 0.0 {
        (format!("▲ +{difference:.1}"), "green")
    } else if difference < 0.0 {
        (format!("▼ {difference:.1}"), "red")
    } else {
        ("± 0.0".to_string(), "gray")
    }
}

/// Inline SVG half-gauge with the three risk bands, value bar and markers.
pub fn render_gauge(score: FreshScore, theme: Theme) -> String {
    let palette = theme.palette();
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        "<svg class=\"gauge\" viewBox=\"0 0 300 210\" role=\"img\" aria-label=\"FreshScore gauge showing {score}\">"
    );
    let _ = writeln!(
        svg,
        "<text x=\"150\" y=\"22\" text-anchor=\"middle\" font-size=\"18\" fill=\"{}\">FreshScore (0–100)</text>",
        palette.text
    );

    for tier in RiskTier::ordered() {
        let (from, to) = tier.band();
        let _ = writeln!(
            svg,
            "<path class=\"band band-{}\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{BAND_WIDTH}\"/>",
            tier.label(),
            arc_path(from, to, BAND_RADIUS),
            tier.band_color()
        );
    }

    if score.value() > FreshScore::MIN {
        let _ = writeln!(
            svg,
            "<path class=\"bar\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{BAR_WIDTH}\"/>",
            arc_path(FreshScore::MIN, score.value(), BAND_RADIUS),
            palette.accent
        );
    }

    let (x1, y1, x2, y2) = radial_line(REFERENCE, BAND_RADIUS - 18.0, BAND_RADIUS + 18.0);
    let _ = writeln!(
        svg,
        "<line class=\"reference\" x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{}\" stroke-width=\"2\" stroke-dasharray=\"4 3\"/>",
        palette.muted
    );

    let (x1, y1, x2, y2) = radial_line(score.value(), BAND_RADIUS - 15.0, BAND_RADIUS + 15.0);
    let _ = writeln!(
        svg,
        "<line class=\"threshold\" x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"black\" stroke-width=\"4\"/>"
    );

    for tick in (0..=100).step_by(20) {
        let (x, y) = point(f64::from(tick), TICK_RADIUS);
        let _ = writeln!(
            svg,
            "<text class=\"tick\" x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" font-size=\"11\" fill=\"{}\">{tick}</text>",
            palette.muted
        );
    }

    let _ = writeln!(
        svg,
        "<text class=\"value\" x=\"150\" y=\"150\" text-anchor=\"middle\" font-size=\"34\" fill=\"{}\">{score}</text>",
        palette.text
    );
    let (delta_text, delta_color) = delta(score);
    let _ = writeln!(
        svg,
        "<text class=\"delta\" x=\"150\" y=\"195\" text-anchor=\"middle\" font-size=\"14\" fill=\"{delta_color}\">{delta_text} vs {REFERENCE}</text>"
    );
    svg.push_str("</svg>");

    svg
}
