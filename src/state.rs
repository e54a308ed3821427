//! View state snapshots and the pure transitions between them.
//!
//! Every transition takes `&self` and returns a fresh `ViewState`; the controller
//! swaps the whole snapshot so readers never observe a half-applied change.

use serde::Serialize;

use crate::model::NewsAnalysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub url: String,
    pub analysis: Option<NewsAnalysis>,
    pub phase: LoadingPhase,
    pub error_message: Option<String>,
    pub generated_image: Option<String>,
    pub image_loading: bool,
}

impl ViewState {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadingPhase::Loading
    }

    /// Submit is allowed with a non-blank URL and no analysis in flight.
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.url.trim().is_empty()
    }

    pub fn can_request_image(&self) -> bool {
        self.phase == LoadingPhase::Success
            && self.analysis.is_some()
            && self.generated_image.is_none()
            && !self.image_loading
    }

    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self.clone()
        }
    }

    pub fn loading(&self) -> Self {
        Self {
            url: self.url.clone(),
            phase: LoadingPhase::Loading,
            ..Self::default()
        }
    }

    pub fn succeeded(&self, analysis: NewsAnalysis) -> Self {
        Self {
            url: self.url.clone(),
            analysis: Some(analysis),
            phase: LoadingPhase::Success,
            ..Self::default()
        }
    }

    pub fn failed(&self, message: impl Into<String>) -> Self {
        Self {
            url: self.url.clone(),
            phase: LoadingPhase::Error,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn image_requested(&self) -> Self {
        Self {
            image_loading: true,
            ..self.clone()
        }
    }

    pub fn image_ready(&self, image: impl Into<String>) -> Self {
        Self {
            generated_image: Some(image.into()),
            image_loading: false,
            ..self.clone()
        }
    }

    /// Image failures only clear the flag; the primary phase is untouched.
    pub fn image_failed(&self) -> Self {
        Self {
            image_loading: false,
            ..self.clone()
        }
    }

    pub fn is_consistent(&self) -> bool {
        let success = self.phase == LoadingPhase::Success;
        self.analysis.is_some() == success
            && (self.error_message.is_none() || self.phase == LoadingPhase::Error)
            && (success || (self.generated_image.is_none() && !self.image_loading))
    }
}
