use crate::model::{Sentiment, TimelineEvent};

use super::escape;

/// Cards in received order; even indices sit on the left, odd on the right.
pub fn render_timeline(events: &[TimelineEvent]) -> String {
    let mut html = String::with_capacity(events.len() * 512 + 64);
    html.push_str(r#"<div class="timeline"><div class="timeline-line"></div>"#);
    for (index, event) in events.iter().enumerate() {
        html.push_str(&render_event_card(event, index));
    }
    html.push_str("</div>");
    html
}

pub fn render_event_card(event: &TimelineEvent, index: usize) -> String {
    let sentiment = event.sentiment();
    let side = if index % 2 == 0 { "event-left" } else { "event-right" };
    let dot = if sentiment == Sentiment::Negative { "dot-negative" } else { "dot-default" };

    let mut html = String::with_capacity(512);
    html.push_str(&format!(
        r#"<div class="event-row {side}" style="animation-delay: {delay:.1}s">"#,
        side = side,
        delay = index as f64 * 0.1
    ));
    html.push_str(r#"<div class="event-spacer"></div>"#);
    html.push_str(&format!(r#"<div class="event-dot"><span class="{}"></span></div>"#, dot));
    html.push_str(&format!(
        r#"<article class="event-card {}" data-index="{}">"#,
        sentiment.border_class(),
        index
    ));

    html.push_str(r#"<div class="event-meta"><span class="event-date">"#);
    html.push_str(&escape(&event.date));
    html.push_str("</span>");
    if let Some(time) = event.time.as_deref().filter(|t| !t.trim().is_empty()) {
        html.push_str(r#"<span class="event-sep">•</span><span class="event-time">"#);
        html.push_str(&escape(time));
        html.push_str("</span>");
    }
    html.push_str("</div>");

    html.push_str(r#"<h3 class="event-title">"#);
    html.push_str(&escape(&event.title));
    html.push_str("</h3>");
    html.push_str(r#"<p class="event-description">"#);
    html.push_str(&escape(&event.description));
    html.push_str("</p>");

    html.push_str(r#"<div class="event-tags">"#);
    for tag in &event.tags {
        html.push_str(&format!(r#"<span class="tag {}">{}</span>"#, sentiment.tag_class(), escape(tag)));
    }
    html.push_str("</div></article></div>");
    html
}
