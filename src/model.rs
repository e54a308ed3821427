use serde::{Deserialize, Serialize};

/// One dated occurrence extracted from the article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub title: String,
    pub description: String,
    /// Expected in -10..=10; not clamped.
    pub sentiment_score: f64,
    pub tags: Vec<String>,
}

impl TimelineEvent {
    pub fn sentiment(&self) -> Sentiment {
        Sentiment::from_score(self.sentiment_score)
    }
}

/// Structured result for one submitted URL. Events keep the model's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsAnalysis {
    pub headline: String,
    pub summary: String,
    pub events: Vec<TimelineEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    pub fn from_score(score: f64) -> Self {
        if score < 0.0 {
            Sentiment::Negative
        } else if score > 5.0 {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        }
    }

    pub fn border_class(self) -> &'static str {
        match self {
            Sentiment::Negative => "border-negative",
            Sentiment::Neutral => "border-neutral",
            Sentiment::Positive => "border-positive",
        }
    }

    pub fn tag_class(self) -> &'static str {
        match self {
            Sentiment::Negative => "tag-negative",
            Sentiment::Neutral => "tag-neutral",
            Sentiment::Positive => "tag-positive",
        }
    }
}
