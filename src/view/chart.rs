//! Inline SVG sentiment chart.

use chrono::NaiveDate;

use crate::model::TimelineEvent;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 240.0;
const PAD_LEFT: f64 = 16.0;
const PAD_RIGHT: f64 = 30.0;
const PAD_TOP: f64 = 10.0;
const PAD_BOTTOM: f64 = 28.0;
const DOMAIN: f64 = 10.0;

/// `MM-DD` for ISO dates, the raw string otherwise.
pub fn short_date(date: &str) -> String {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| d.format("%m-%d").to_string())
        .unwrap_or_else(|_| date.to_string())
}

fn x_at(index: usize, count: usize) -> f64 {
    let span = WIDTH - PAD_LEFT - PAD_RIGHT;
    PAD_LEFT + span * index as f64 / (count - 1) as f64
}

/// Maps a score onto the fixed -10..10 domain; out-of-range scores are pinned to the edge.
fn y_at(score: f64) -> f64 {
    let clamped = if score.is_finite() { score.clamp(-DOMAIN, DOMAIN) } else { 0.0 };
    let plot = HEIGHT - PAD_TOP - PAD_BOTTOM;
    PAD_TOP + (DOMAIN - clamped) / (2.0 * DOMAIN) * plot
}

/// Renders the chart, or `None` when there are fewer than two events to connect.
pub fn render_sentiment_chart(events: &[TimelineEvent]) -> Option<String> {
    if events.len() < 2 {
        return None;
    }

    let count = events.len();
    let bottom = y_at(-DOMAIN);
    let points: Vec<(f64, f64)> = events
        .iter()
        .enumerate()
        .map(|(i, e)| (x_at(i, count), y_at(e.sentiment_score)))
        .collect();

    let line = points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" L ");
    let (first_x, _) = points[0];
    let (last_x, _) = points[count - 1];
    let area = format!("M {:.1},{:.1} L {} L {:.1},{:.1} Z", first_x, bottom, line, last_x, bottom);

    let mut svg = String::with_capacity(1024 + count * 256);
    svg.push_str(&format!(
        r#"<svg class="chart-svg" viewBox="0 0 {w} {h}" preserveAspectRatio="none" role="img" aria-label="sentiment trend">"#,
        w = WIDTH,
        h = HEIGHT
    ));
    svg.push_str(concat!(
        r#"<defs><linearGradient id="colorSentiment" x1="0" y1="0" x2="0" y2="1">"#,
        r##"<stop offset="5%" stop-color="#3b82f6" stop-opacity="0.8"/>"##,
        r##"<stop offset="95%" stop-color="#3b82f6" stop-opacity="0"/>"##,
        "</linearGradient></defs>"
    ));
    svg.push_str(&format!(
        r##"<line class="zero-line" x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#9ca3af" stroke-dasharray="3 3"/>"##,
        PAD_LEFT,
        WIDTH - PAD_RIGHT,
        y = y_at(0.0)
    ));
    svg.push_str(&format!(r#"<path class="sentiment-area" d="{}" fill="url(#colorSentiment)"/>"#, area));
    svg.push_str(&format!(
        r##"<path class="sentiment-line" d="M {}" fill="none" stroke="#3b82f6" stroke-width="3"/>"##,
        line
    ));

    for (event, (x, y)) in events.iter().zip(&points) {
        svg.push_str(&format!(
            r##"<circle class="sentiment-point" cx="{:.1}" cy="{:.1}" r="4" fill="#3b82f6"><title>{} · {}: {}</title></circle>"##,
            x,
            y,
            super::escape(&event.date),
            super::escape(&event.title),
            event.sentiment_score
        ));
        svg.push_str(&format!(
            r##"<text class="axis-label" x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12" fill="#9ca3af">{}</text>"##,
            x,
            HEIGHT - 8.0,
            super::escape(&short_date(&event.date))
        ));
    }

    svg.push_str("</svg>");

    let mut html = String::with_capacity(svg.len() + 160);
    html.push_str(r#"<div class="sentiment-chart">"#);
    html.push_str(r#"<h3 class="chart-title">分析：情感波动曲线</h3>"#);
    html.push_str(&svg);
    html.push_str("</div>");
    Some(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(date: &str, score: f64) -> TimelineEvent {
        TimelineEvent {
            date: date.into(),
            time: None,
            title: "T".into(),
            description: "D".into(),
            sentiment_score: score,
            tags: vec![],
        }
    }

    #[test]
    fn short_date_trims_year_only_for_iso_dates() {
        assert_eq!(short_date("2024-01-02"), "01-02");
        assert_eq!(short_date("Monday"), "Monday");
        assert_eq!(short_date("2024-13-40"), "2024-13-40");
    }

    #[test]
    fn domain_maps_to_plot_edges() {
        assert_eq!(y_at(10.0), PAD_TOP);
        assert_eq!(y_at(-10.0), HEIGHT - PAD_BOTTOM);
        assert_eq!(y_at(42.0), y_at(10.0));
        assert_eq!(y_at(f64::NAN), y_at(0.0));
        assert!(y_at(-8.0) > y_at(0.0));
    }

    #[test]
    fn no_chart_for_single_event() {
        assert!(render_sentiment_chart(&[]).is_none());
        assert!(render_sentiment_chart(&[event("2024-01-01", 3.0)]).is_none());
    }

    #[test]
    fn chart_has_one_point_per_event_and_zero_line() {
        let html = render_sentiment_chart(&[
            event("2024-01-01", -8.0),
            event("2024-01-02", 6.0),
            event("2024-01-03", 0.0),
        ])
        .unwrap();
        assert_eq!(html.matches("<circle").count(), 3);
        assert_eq!(html.matches("class=\"zero-line\"").count(), 1);
        assert!(html.contains(">01-02</text>"));
    }
}
