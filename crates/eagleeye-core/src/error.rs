// ── Core error types ──
//
// User-facing errors from eagleeye-core. Consumers never see HTTP status
// codes or JSON parse failures directly; fetch failures degrade to a
// "failed to fetch X" message and the view renders stale or empty data.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Fetch errors ─────────────────────────────────────────────────
    /// A collection fetch failed. `what` names the collection for the
    /// view's degradation banner ("failed to fetch devices").
    #[error("failed to fetch {what}")]
    Fetch {
        what: &'static str,
        #[source]
        source: Option<eagleeye_api::Error>,
    },

    // ── Data errors ──────────────────────────────────────────────────
    /// Entity absent from a fetched collection — a local condition, not a
    /// server 404.
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("command rejected: {message}")]
    CommandRejected { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("configuration error: {message}")]
    Config { message: String },

    // ── API errors (wrapped) ─────────────────────────────────────────
    #[error("API error: {0}")]
    Api(#[from] eagleeye_api::Error),
}

impl CoreError {
    /// Wrap an API error as a fetch failure for the named collection.
    pub fn fetch(what: &'static str, source: eagleeye_api::Error) -> Self {
        Self::Fetch {
            what,
            source: Some(source),
        }
    }

    /// Returns `true` if the next poll tick is likely to succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Fetch {
                source: Some(e), ..
            }
            | Self::Api(e) => e.is_transient(),
            _ => false,
        }
    }
}
