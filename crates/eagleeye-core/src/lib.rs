//! Domain layer between `eagleeye-api` and UI consumers.
//!
//! This crate owns the business logic and view-model infrastructure for
//! the EagleEye workspace:
//!
//! - **[`Fleet`]** — Facade over the backend: fetches and normalizes
//!   collections, resolves single entities, executes [`Command`]s, and
//!   vends [`PollSession`]s.
//!
//! - **Normalizer** ([`normalize`]) — Deduplicates raw records by collapse
//!   key (lowercase MAC, `id-<deviceId>` fallback), last record wins.
//!
//! - **View models** ([`view`]) — Pure filter/sort functions, the
//!   [`Pager`], and the [`ListView`] that ties a collection, a filter, and
//!   a pager together for one screen.
//!
//! - **[`PollSession`]** — Immediate fetch plus fixed-interval re-fetch
//!   with cancel-on-drop, so a view can never leak its timer.
//!
//! - **Domain model** ([`model`]) — Canonical types (`Device`, `Customer`,
//!   `Alarm`, `Severity`, `MacAddress`) converted from option-heavy wire
//!   records in [`convert`].

pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod fleet;
pub mod format;
pub mod model;
pub mod normalize;
pub mod poll;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandOutcome};
pub use config::{FleetConfig, TlsVerification};
pub use error::CoreError;
pub use fleet::Fleet;
pub use normalize::{Collapse, normalize};
pub use poll::{DEFAULT_POLL_INTERVAL, PollSession, PollUpdate};
pub use view::{FetchedPage, FieldLookup, FilterSpec, ListView, LoadState, Pager};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ActiveState,
    Alarm,
    Customer,
    CustomerDevice,
    Device,
    DeviceCredentials,
    DeviceUser,
    FleetSummary,
    MacAddress,
    NvsSample,
    ProvisionedDevice,
    Severity,
    SignalSample,
    SpiffsSample,
};
