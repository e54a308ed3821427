//! Server-rendered presentation. Everything here is a pure function of `&ViewState`.

use crate::model::NewsAnalysis;
use crate::state::{LoadingPhase, ViewState};

pub mod chart;
pub mod timeline;

pub use chart::render_sentiment_chart;
pub use timeline::{render_event_card, render_timeline};

const STYLE: &str = include_str!("style.css");
const POLL_SECONDS: u32 = 2;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_page(state: &ViewState) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html><html lang=\"zh-CN\"><head><meta charset=\"utf-8\">");
    html.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#);
    // Poll while a remote call is pending so the completed transition shows up.
    if state.is_loading() || state.image_loading {
        html.push_str(&format!(r#"<meta http-equiv="refresh" content="{}">"#, POLL_SECONDS));
    }
    html.push_str("<title>NewsChronicle AI</title><style>");
    html.push_str(STYLE);
    html.push_str("</style></head><body>");

    html.push_str(&render_header());
    html.push_str(r#"<main class="container">"#);
    html.push_str(&render_input_form(state));

    if let Some(banner) = render_error_banner(state) {
        html.push_str(&banner);
    }

    if let (LoadingPhase::Success, Some(analysis)) = (state.phase, state.analysis.as_ref()) {
        html.push_str(&render_results(state, analysis));
    }

    html.push_str("</main></body></html>");
    html
}

pub fn render_header() -> String {
    concat!(
        r#"<header class="site-header"><div class="brand">"#,
        r#"<span class="brand-icon">📰</span>"#,
        r#"<h1>NewsChronicle <span class="accent">AI</span></h1>"#,
        "</div></header>"
    )
    .to_string()
}

pub fn render_input_form(state: &ViewState) -> String {
    let disabled = if state.is_loading() { " disabled" } else { "" };
    let label = if state.is_loading() {
        r#"<span class="spinner"></span>分析中..."#
    } else {
        "生成时间线 →"
    };

    let mut html = String::with_capacity(1024);
    html.push_str(r#"<section class="panel input-panel">"#);
    html.push_str(r#"<form id="analyze-form" method="post" action="/analyze"><div class="input-row">"#);
    html.push_str(&format!(
        r#"<input id="url" type="text" name="url" value="{}" placeholder="在此粘贴新闻链接..." required{}>"#,
        escape(&state.url),
        disabled
    ));
    html.push_str(&format!(r#"<button id="submit" type="submit" class="primary"{}>{}</button>"#, disabled, label));
    html.push_str("</div>");
    html.push_str(r#"<p class="hint">建议使用直接的新闻文章链接。未来的日期或付费墙可能会影响结果。</p>"#);
    html.push_str("</form></section>");
    html
}

pub fn render_error_banner(state: &ViewState) -> Option<String> {
    if state.phase != LoadingPhase::Error {
        return None;
    }
    let message = state
        .error_message
        .as_deref()
        .unwrap_or("An unexpected error occurred.");
    Some(format!(
        r#"<div class="error-banner" role="alert"><h3>生成失败</h3><p class="error-message">{}</p></div>"#,
        escape(message)
    ))
}

fn render_results(state: &ViewState, analysis: &NewsAnalysis) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str(r#"<section id="results">"#);
    html.push_str(&render_report_header(analysis));
    html.push_str(&render_image_section(state));
    if let Some(chart) = render_sentiment_chart(&analysis.events) {
        html.push_str(&chart);
    }
    html.push_str(&render_timeline(&analysis.events));
    html.push_str("</section>");
    html
}

pub fn render_report_header(analysis: &NewsAnalysis) -> String {
    format!(
        r#"<div class="report-header"><h2 class="headline">{}</h2><p class="summary">{}</p></div>"#,
        escape(&analysis.headline),
        escape(&analysis.summary)
    )
}

/// Generate button until an image exists, then the image panel.
pub fn render_image_section(state: &ViewState) -> String {
    let mut html = String::with_capacity(512);
    html.push_str(r#"<div class="image-section">"#);
    match state.generated_image.as_deref() {
        Some(image) => {
            html.push_str(r#"<figure class="image-panel">"#);
            html.push_str(&format!(r#"<img src="{}" alt="AI Generated News Illustration">"#, escape(image)));
            html.push_str(r#"<figcaption><span>✨ AI生成的插图</span><span class="muted">Gemini Flash Image</span></figcaption>"#);
            html.push_str("</figure>");
        }
        None => {
            let (disabled, label) = if state.image_loading {
                (" disabled", r#"<span class="spinner"></span>正在创建视觉图像..."#)
            } else {
                ("", "✨ 生成新闻配图")
            };
            html.push_str(&format!(
                r#"<form id="image-form" method="post" action="/image"><button id="generate-image" type="submit" class="magic"{}>{}</button></form>"#,
                disabled, label
            ));
        }
    }
    html.push_str("</div>");
    html
}
