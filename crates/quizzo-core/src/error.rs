//! Error types for provider calls
//!
//! Parsing never fails, so only the network side has error kinds:
//! the request itself failing, or a successful response without usable text.

use thiserror::Error;

use crate::ai::providers::ProviderId;

/// Coarse classification of a [`QuizError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizErrorKind {
    /// Transport failure, timeout, or non-2xx status
    ProviderRequest,
    /// 2xx response whose payload had no text completion
    ResponseShape,
}

/// Error raised while talking to an LLM provider
#[derive(Debug, Error)]
pub enum QuizError {
    /// Transport failure, timeout, or non-2xx HTTP status
    #[error("{provider} request failed: {message}")]
    ProviderRequest {
        provider: ProviderId,
        /// HTTP status when the provider answered at all
        status: Option<u16>,
        message: String,
    },

    /// The call succeeded but no text completion could be located
    #[error("{provider} response had no text completion: {detail}")]
    ResponseShape { provider: ProviderId, detail: String },

    /// An error wrapped with the operation that was being attempted
    #[error("{context}: {source}")]
    Context {
        context: &'static str,
        #[source]
        source: Box<QuizError>,
    },
}

impl QuizError {
    pub(crate) fn request(provider: ProviderId, message: impl Into<String>) -> Self {
        QuizError::ProviderRequest {
            provider,
            status: None,
            message: message.into(),
        }
    }

    pub(crate) fn shape(provider: ProviderId, detail: impl Into<String>) -> Self {
        QuizError::ResponseShape {
            provider,
            detail: detail.into(),
        }
    }

    /// Wrap this error with a description of the failed operation
    pub fn context(self, context: &'static str) -> Self {
        QuizError::Context {
            context,
            source: Box::new(self),
        }
    }

    /// Error kind, looking through any context wrappers
    pub fn kind(&self) -> QuizErrorKind {
        match self {
            QuizError::ProviderRequest { .. } => QuizErrorKind::ProviderRequest,
            QuizError::ResponseShape { .. } => QuizErrorKind::ResponseShape,
            QuizError::Context { source, .. } => source.kind(),
        }
    }

    /// HTTP status returned by the provider, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            QuizError::ProviderRequest { status, .. } => *status,
            QuizError::ResponseShape { .. } => None,
            QuizError::Context { source, .. } => source.status(),
        }
    }

    /// Provider the failed call was addressed to
    pub fn provider(&self) -> ProviderId {
        match self {
            QuizError::ProviderRequest { provider, .. }
            | QuizError::ResponseShape { provider, .. } => *provider,
            QuizError::Context { source, .. } => source.provider(),
        }
    }
}
