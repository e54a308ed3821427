#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use news_chronicle::controller::SessionController;
use news_chronicle::error::{AppError, Result};
use news_chronicle::llm::{ImageGenerator, TimelineAnalyzer};
use news_chronicle::model::{NewsAnalysis, TimelineEvent};
use news_chronicle::state::LoadingPhase;
use tokio::sync::Notify;

pub const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgo=";

pub fn event(date: &str, title: &str, score: f64, tags: &[&str]) -> TimelineEvent {
    TimelineEvent {
        date: date.to_string(),
        time: None,
        title: title.to_string(),
        description: format!("{} description", title),
        sentiment_score: score,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// The two-event analysis used throughout the scenarios.
pub fn sample_analysis() -> NewsAnalysis {
    NewsAnalysis {
        headline: "H".to_string(),
        summary: "S".to_string(),
        events: vec![
            TimelineEvent {
                description: "D1".to_string(),
                ..event("2024-01-01", "T1", -8.0, &["突发"])
            },
            TimelineEvent {
                description: "D2".to_string(),
                ..event("2024-01-02", "T2", 6.0, &["声明"])
            },
        ],
    }
}

#[derive(Clone)]
pub enum AnalyzerOutcome {
    Ok(NewsAnalysis),
    EmptyResponse,
    Failed,
}

pub struct FakeAnalyzer {
    outcome: AnalyzerOutcome,
    gate: Option<Arc<Notify>>,
    pub calls: AtomicUsize,
    last_url: Mutex<Option<String>>,
}

impl FakeAnalyzer {
    pub fn new(outcome: AnalyzerOutcome) -> Self {
        Self { outcome, gate: None, calls: AtomicUsize::new(0), last_url: Mutex::new(None) }
    }

    /// Holds every call until the returned `Notify` is triggered.
    pub fn gated(outcome: AnalyzerOutcome) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let fake = Self {
            outcome,
            gate: Some(gate.clone()),
            calls: AtomicUsize::new(0),
            last_url: Mutex::new(None),
        };
        (fake, gate)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_url(&self) -> Option<String> {
        self.last_url.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TimelineAnalyzer for FakeAnalyzer {
    async fn analyze(&self, url: &str) -> Result<NewsAnalysis> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_url.lock().unwrap() = Some(url.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.outcome {
            AnalyzerOutcome::Ok(analysis) => Ok(analysis.clone()),
            AnalyzerOutcome::EmptyResponse => Err(AppError::EmptyResponse),
            AnalyzerOutcome::Failed => Err(AppError::AnalysisFailed),
        }
    }
}

#[derive(Clone)]
pub enum ImageOutcome {
    Ok(String),
    NoImageData,
    Failed,
}

pub struct FakeIllustrator {
    outcome: ImageOutcome,
    gate: Option<Arc<Notify>>,
    pub calls: AtomicUsize,
}

impl FakeIllustrator {
    pub fn new(outcome: ImageOutcome) -> Self {
        Self { outcome, gate: None, calls: AtomicUsize::new(0) }
    }

    pub fn gated(outcome: ImageOutcome) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let fake = Self { outcome, gate: Some(gate.clone()), calls: AtomicUsize::new(0) };
        (fake, gate)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ImageGenerator for FakeIllustrator {
    async fn generate_image(&self, _headline: &str, _summary: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.outcome {
            ImageOutcome::Ok(uri) => Ok(uri.clone()),
            ImageOutcome::NoImageData => Err(AppError::NoImageData),
            ImageOutcome::Failed => Err(AppError::ImageFailed),
        }
    }
}

pub fn controller(
    analyzer: Arc<FakeAnalyzer>,
    illustrator: Arc<FakeIllustrator>,
    url: &str,
) -> Arc<SessionController> {
    Arc::new(SessionController::new(analyzer, illustrator, url))
}

/// Polls until the controller reaches `phase` and no image call is pending.
pub async fn wait_for_settled(controller: &SessionController, phase: LoadingPhase) {
    for _ in 0..200 {
        let snapshot = controller.snapshot().await;
        if snapshot.phase == phase && !snapshot.image_loading {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("controller never reached {:?}", phase);
}

/// Polls until a fake has been called `expected` times.
pub async fn wait_for_calls<F: Fn() -> usize>(calls: F, expected: usize) {
    for _ in 0..200 {
        if calls() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("fake was never called {} times", expected);
}
