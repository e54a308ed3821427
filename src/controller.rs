use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::error::{AppError, Result};
use crate::llm::{ImageGenerator, TimelineAnalyzer};
use crate::model::NewsAnalysis;
use crate::state::ViewState;

struct Inner {
    state: Arc<ViewState>,
    /// Bumped on every accepted submission so late image results can be dropped.
    epoch: u64,
}

/// Ticket for an accepted analysis run.
pub struct AnalysisTicket {
    epoch: u64,
    url: String,
}

/// Ticket for an accepted image run.
pub struct ImageTicket {
    epoch: u64,
    headline: String,
    summary: String,
}

/// Sole owner of the session's `ViewState`.
pub struct SessionController {
    analyzer: Arc<dyn TimelineAnalyzer>,
    illustrator: Arc<dyn ImageGenerator>,
    inner: RwLock<Inner>,
}

impl SessionController {
    pub fn new(
        analyzer: Arc<dyn TimelineAnalyzer>,
        illustrator: Arc<dyn ImageGenerator>,
        initial_url: impl Into<String>,
    ) -> Self {
        Self {
            analyzer,
            illustrator,
            inner: RwLock::new(Inner {
                state: Arc::new(ViewState::new(initial_url)),
                epoch: 0,
            }),
        }
    }

    pub async fn snapshot(&self) -> Arc<ViewState> {
        self.inner.read().await.state.clone()
    }

    /// Guarded `* -> loading` transition. A supplied URL replaces the current one under the
    /// same lock, so the run always analyzes the URL it was given.
    pub async fn begin_analysis(&self, url: Option<&str>) -> Result<AnalysisTicket> {
        let mut inner = self.inner.write().await;
        if inner.state.is_loading() {
            warn!(url = %inner.state.url, "submission ignored: analysis already in flight");
            return Err(AppError::Busy);
        }
        if let Some(url) = url {
            if inner.state.url != url {
                let next = inner.state.with_url(url);
                inner.state = Arc::new(next);
            }
        }
        if !inner.state.can_submit() {
            return Err(AppError::EmptyUrl);
        }

        inner.epoch += 1;
        let next = inner.state.loading();
        inner.state = Arc::new(next);
        info!(url = %inner.state.url, epoch = inner.epoch, "analysis started");

        Ok(AnalysisTicket {
            epoch: inner.epoch,
            url: inner.state.url.trim().to_string(),
        })
    }

    pub async fn finish_analysis(
        &self,
        ticket: AnalysisTicket,
        outcome: Result<NewsAnalysis>,
    ) -> Arc<ViewState> {
        let mut inner = self.inner.write().await;
        if inner.epoch != ticket.epoch || !inner.state.is_loading() {
            warn!(url = %ticket.url, "dropping stale analysis result");
            return inner.state.clone();
        }

        let next = match outcome {
            Ok(analysis) => {
                info!(url = %ticket.url, events = analysis.events.len(), "analysis succeeded");
                inner.state.succeeded(analysis)
            }
            Err(err) => {
                warn!(url = %ticket.url, error = %err, "analysis failed");
                inner.state.failed(err.to_string())
            }
        };
        inner.state = Arc::new(next);
        inner.state.clone()
    }

    /// Runs the remote call and its transition on a detached task, so dropping the
    /// caller never strands the session in `loading`.
    fn run_analysis(self: &Arc<Self>, ticket: AnalysisTicket) -> JoinHandle<Arc<ViewState>> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = controller.analyzer.analyze(&ticket.url).await;
            controller.finish_analysis(ticket, outcome).await
        })
    }

    async fn settle(&self, handle: JoinHandle<Arc<ViewState>>) -> Arc<ViewState> {
        match handle.await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!(error = %err, "remote task did not complete");
                self.snapshot().await
            }
        }
    }

    /// Runs a whole submission and returns the resulting snapshot.
    pub async fn submit(self: &Arc<Self>, url: Option<&str>) -> Result<Arc<ViewState>> {
        let ticket = self.begin_analysis(url).await?;
        let handle = self.run_analysis(ticket);
        Ok(self.settle(handle).await)
    }

    /// Applies the `loading` transition now and leaves the remote call running in the background.
    pub async fn spawn_submit(self: &Arc<Self>, url: Option<&str>) -> Result<()> {
        let ticket = self.begin_analysis(url).await?;
        let _ = self.run_analysis(ticket);
        Ok(())
    }

    /// Guarded `image_loading = true` transition.
    pub async fn begin_image(&self) -> Result<ImageTicket> {
        let mut inner = self.inner.write().await;
        if !inner.state.can_request_image() {
            return Err(AppError::ImageUnavailable);
        }
        let Some(analysis) = inner.state.analysis.as_ref() else {
            return Err(AppError::ImageUnavailable);
        };

        let ticket = ImageTicket {
            epoch: inner.epoch,
            headline: analysis.headline.clone(),
            summary: analysis.summary.clone(),
        };
        let next = inner.state.image_requested();
        inner.state = Arc::new(next);
        info!(epoch = ticket.epoch, "image generation started");
        Ok(ticket)
    }

    /// Image errors are logged and swallowed here; the page never shows them.
    pub async fn finish_image(&self, ticket: ImageTicket, outcome: Result<String>) -> Arc<ViewState> {
        let mut inner = self.inner.write().await;
        if inner.epoch != ticket.epoch || !inner.state.image_loading {
            warn!("dropping stale image result");
            return inner.state.clone();
        }

        let next = match outcome {
            Ok(image) => {
                info!(bytes = image.len(), "image generation succeeded");
                inner.state.image_ready(image)
            }
            Err(err) => {
                warn!(error = %err, "image generation failed");
                inner.state.image_failed()
            }
        };
        inner.state = Arc::new(next);
        inner.state.clone()
    }

    fn run_image(self: &Arc<Self>, ticket: ImageTicket) -> JoinHandle<Arc<ViewState>> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = controller
                .illustrator
                .generate_image(&ticket.headline, &ticket.summary)
                .await;
            controller.finish_image(ticket, outcome).await
        })
    }

    pub async fn generate_image(self: &Arc<Self>) -> Result<Arc<ViewState>> {
        let ticket = self.begin_image().await?;
        let handle = self.run_image(ticket);
        Ok(self.settle(handle).await)
    }

    pub async fn spawn_generate_image(self: &Arc<Self>) -> Result<()> {
        let ticket = self.begin_image().await?;
        let _ = self.run_image(ticket);
        Ok(())
    }
}
