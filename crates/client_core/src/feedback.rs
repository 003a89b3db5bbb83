//! Per-form submission feedback.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// What a form shows about its last submission. Built only through the
/// constructors below, so success and error never coexist and a loading
/// state never carries a stale message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackState {
    loading: bool,
    success: Option<String>,
    error: Option<String>,
}

impl FeedbackState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn loading() -> Self {
        Self {
            loading: true,
            success: None,
            error: None,
        }
    }

    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            loading: false,
            success: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            loading: false,
            success: None,
            error: Some(message.into()),
        }
    }

    pub fn status(&self) -> FeedbackStatus {
        if self.loading {
            FeedbackStatus::Loading
        } else if self.error.is_some() {
            FeedbackStatus::Error
        } else if self.success.is_some() {
            FeedbackStatus::Success
        } else {
            FeedbackStatus::Idle
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
