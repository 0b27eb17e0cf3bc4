//! HTML rendering for the single-page dashboard.
//!
//! Rendering is a pure function of the dashboard state, the animation panel
//! and the theme; nothing here reads process-wide state.

mod form;
pub mod gauge;
mod theme;

pub use form::render_form;
pub use gauge::render_gauge;
pub use theme::{Palette, Theme, UnknownTheme};

use super::assets::AnimationPanel;
use super::dashboard::ScoreReport;
use super::domain::{ItemReading, RiskTier};
use std::fmt::Write as _;

/// lottie-web build that plays the fetched animation document.
pub const LOTTIE_PLAYER_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/lottie-web/5.12.2/lottie.min.js";

/// Two-state page lifecycle; every submission renders from scratch.
#[derive(Debug, Clone)]
pub enum DashboardState {
    AwaitingInput { reading: ItemReading },
    ResultDisplayed(ScoreReport),
}

impl DashboardState {
    pub fn initial() -> Self {
        Self::AwaitingInput {
            reading: ItemReading::default(),
        }
    }

    pub fn reading(&self) -> &ItemReading {
        match self {
            Self::AwaitingInput { reading } => reading,
            Self::ResultDisplayed(report) => &report.reading,
        }
    }
}

pub fn render_status_block(tier: RiskTier) -> String {
    format!(
        "<div class=\"status status-{}\" style=\"background-color:{};padding:20px;border-radius:10px;\">\n<h3 style=\"color:white;\">{}</h3>\n<p style=\"color:white;\">{}</p>\n</div>\n",
        tier.label(),
        tier.block_color(),
        escape_html(tier.headline()),
        escape_html(tier.guidance())
    )
}

pub fn render_explanation() -> &'static str {
    concat!(
        "<section class=\"explanation\">\n",
        "<hr>\n",
        "<h3>🧾 What Does the FreshScore Mean?</h3>\n",
        "<p>The <strong>FreshScore</strong> is a machine learning–generated indicator (0–100) representing the likely freshness and quality of a perishable product at the point of evaluation.</p>\n",
        "<ul>\n",
        "<li><strong>FreshScore 80–100:</strong> ✅ <strong>Healthy &amp; Fresh</strong><br>Optimal temperature, low door openings, short duration. Products are likely to retain full quality, safety, and shelf life.</li>\n",
        "<li><strong>FreshScore 60–79:</strong> ⚠️ <strong>Acceptable but Monitor Closely</strong><br>Slight deviation in temperature or transit duration. While still usable, quality may begin to degrade.</li>\n",
        "<li><strong>FreshScore below 60:</strong> 🚨 <strong>Spoilage Risk</strong><br>High probability of reduced quality, contamination, or spoilage. Action needed: reroute, inspect, or dispose.</li>\n",
        "</ul>\n",
        "<p>This score helps cold chain operators, retailers, and quality controllers make <strong>real-time decisions</strong> based on AI-powered predictions.</p>\n",
        "</section>\n",
    )
}

fn render_animation(panel: &AnimationPanel) -> String {
    match panel {
        AnimationPanel::Ready(asset) => {
            // Keep `</script>` sequences inside the payload from closing the tag.
            let payload = asset.document.to_string().replace("</", "<\\/");
            format!(
                concat!(
                    "<div class=\"animation\" id=\"freshscore-animation-player\" data-source=\"{source}\" style=\"height:200px;\"></div>\n",
                    "<script type=\"application/json\" id=\"freshscore-animation\">{payload}</script>\n",
                    "<script src=\"{player}\"></script>\n",
                    "<script>\n",
                    "lottie.loadAnimation({{container:document.getElementById(\"freshscore-animation-player\"),",
                    "renderer:\"svg\",loop:true,autoplay:true,",
                    "animationData:JSON.parse(document.getElementById(\"freshscore-animation\").textContent)}});\n",
                    "</script>\n",
                ),
                source = escape_html(&asset.source),
                payload = payload,
                player = LOTTIE_PLAYER_URL,
            )
        }
        AnimationPanel::Unavailable { warning } => format!(
            "<div class=\"warning\" role=\"alert\">{}</div>\n",
            escape_html(warning)
        ),
        AnimationPanel::Hidden => String::new(),
    }
}

fn render_styles(theme: Theme) -> String {
    let palette = theme.palette();
    format!(
        "<style>\nbody{{background:{bg};color:{text};font-family:sans-serif;margin:0;padding:24px;}}\n.columns{{display:grid;grid-template-columns:1fr 1.2fr;gap:32px;}}\n.panel{{background:{surface};border-radius:12px;padding:20px;}}\nlabel{{display:block;margin-top:12px;}}\ninput[type=range],select{{width:100%;}}\nbutton{{margin-top:16px;background:{accent};color:white;border:0;border-radius:8px;padding:10px 16px;}}\n.muted,.tick{{color:{muted};}}\n.warning{{background:#fff3cd;color:#664d03;padding:12px;border-radius:8px;}}\n</style>\n",
        bg = palette.background,
        text = palette.text,
        surface = palette.surface,
        accent = palette.accent,
        muted = palette.muted,
    )
}

/// Full HTML document for the given state.
pub fn render_page(state: &DashboardState, animation: &AnimationPanel, theme: Theme) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>FreshScore AI – ColdChain Monitor</title>\n");
    html.push_str(&render_styles(theme));
    let _ = writeln!(
        html,
        "</head>\n<body class=\"theme-{}\">",
        theme.slug()
    );

    html.push_str(
        "<h1 style=\"text-align:center;color:#FF4B4B;\">🍓 FreshScore Predictor – ColdChain AI</h1>\n",
    );
    let toggled = theme.toggled();
    let _ = writeln!(
        html,
        "<p class=\"theme-toggle\"><a href=\"/?theme={}\">Switch to {} theme</a></p>\n<hr>",
        toggled.slug(),
        toggled.slug()
    );

    html.push_str("<div class=\"columns\">\n<div class=\"panel left\">\n");
    html.push_str(&render_animation(animation));
    html.push_str(&render_form(state.reading(), theme));
    html.push_str("</div>\n<div class=\"panel right\">\n");

    match state {
        DashboardState::AwaitingInput { .. } => {
            html.push_str(
                "<p class=\"muted\">Submit the item details to predict its FreshScore.</p>\n",
            );
        }
        DashboardState::ResultDisplayed(report) => {
            html.push_str("<h4>🌡️ Freshness Meter</h4>\n");
            html.push_str(&render_gauge(report.score, theme));
            html.push('\n');
            html.push_str(&render_status_block(report.tier));
            let _ = writeln!(
                html,
                "<p class=\"muted\">{} evaluated at {}</p>",
                escape_html(report.reading.category().label()),
                report.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            html.push_str(render_explanation());
        }
    }

    html.push_str("</div>\n</div>\n</body>\n</html>\n");
    html
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
