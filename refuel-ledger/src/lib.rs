//! Refuel Ledger
//!
//! Per-plate refueling history with loyalty tickets.
//!
//! # Architecture
//!
//! - **Money**: raw minor-unit digits and display currency both resolve to
//!   an exact `Decimal`
//! - **Ledger**: records keyed by plate, in order of first appearance
//! - **View**: pagination and expanded rows, owned by the presentation layer
//! - **Actor**: single writer task for concurrent callers
//!
//! # Invariants
//!
//! - Each event's tickets are `floor(amount / 50)` at creation and never change
//! - A record's `total_tickets` is the sum over its events
//! - At most one record per plate; records never move or disappear

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod types;
pub mod money;
pub mod ledger;
pub mod view;
pub mod form;
pub mod error;
pub mod actor;
pub mod config;
pub mod metrics;

// Re-exports
pub use error::{Error, Result};
pub use types::{LedgerRecord, PlateId, RefuelEvent};
pub use money::CurrencyFormat;
pub use ledger::Ledger;
pub use view::{Page, ViewState};
pub use form::{RefuelForm, Submission};
pub use actor::{spawn_ledger_actor, LedgerHandle};
pub use config::Config;
pub use metrics::Metrics;
