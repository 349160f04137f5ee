//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use eagleeye_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("No configuration found")]
    #[diagnostic(
        code(eagleeye::no_config),
        help(
            "Create a profile with: eagleeye config init --service <URL>\n\
             Or pass --service / set EAGLEEYE_SERVICE.\n\
             Config path: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("No profile named '{profile}'")]
    #[diagnostic(
        code(eagleeye::unknown_profile),
        help("Run: eagleeye config show to see configured profiles")
    )]
    UnknownProfile { profile: String },

    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(eagleeye::validation))]
    Validation { field: String, reason: String },

    // ── Fetching ─────────────────────────────────────────────────────
    #[error("Failed to fetch {what}")]
    #[diagnostic(
        code(eagleeye::fetch_failed),
        help(
            "Check that the service is reachable.\n\
             Try: eagleeye -v devices list"
        )
    )]
    FetchFailed {
        what: String,
        #[source]
        source: Option<eagleeye_core::CoreError>,
    },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(eagleeye::not_found),
        help("Run: eagleeye {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Service error: {message}")]
    #[diagnostic(code(eagleeye::api_error))]
    ApiError { message: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    #[diagnostic(code(eagleeye::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Exit code for the process.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoConfig { .. } | Self::UnknownProfile { .. } | Self::Validation { .. } => {
                exit_code::USAGE
            }
            Self::FetchFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::ApiError { .. } | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound {
                entity_type,
                identifier,
            } => {
                let list_command = match entity_type {
                    "customer" => "customers list",
                    _ => "devices list",
                };
                Self::NotFound {
                    resource_type: entity_type.to_owned(),
                    identifier,
                    list_command: list_command.to_owned(),
                }
            }
            CoreError::Fetch { what, source } => Self::FetchFailed {
                what: what.to_owned(),
                source: source.map(CoreError::Api),
            },
            CoreError::ValidationFailed { message } => Self::Validation {
                field: "argument".into(),
                reason: message,
            },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            other => Self::ApiError {
                message: other.to_string(),
            },
        }
    }
}

impl From<eagleeye_config::ConfigError> for CliError {
    fn from(err: eagleeye_config::ConfigError) -> Self {
        match err {
            eagleeye_config::ConfigError::Validation { field, reason } => {
                Self::Validation { field, reason }
            }
            eagleeye_config::ConfigError::UnknownProfile { profile, .. } => {
                Self::UnknownProfile { profile }
            }
            eagleeye_config::ConfigError::Io(e) => Self::Io(e),
            other => Self::Validation {
                field: "config".into(),
                reason: other.to_string(),
            },
        }
    }
}
