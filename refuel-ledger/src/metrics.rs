//! Metrics collection for observability
//!
//! # Metrics
//!
//! - `refuel_submissions_total` - Refuels accepted into the ledger
//! - `refuel_rejections_total` - Submissions rejected before mutation
//! - `refuel_tickets_issued_total` - Tickets granted across all refuels
//! - `refuel_plates` - Distinct plates in the ledger

use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};
use std::sync::Arc;

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    /// Accepted refuels
    pub submissions_total: IntCounter,

    /// Rejected submissions
    pub rejections_total: IntCounter,

    /// Tickets granted
    pub tickets_issued_total: IntCounter,

    /// Distinct plates
    pub plates: IntGauge,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector with its own registry
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let submissions_total =
            IntCounter::new("refuel_submissions_total", "Refuels accepted into the ledger")?;
        registry.register(Box::new(submissions_total.clone()))?;

        let rejections_total = IntCounter::new(
            "refuel_rejections_total",
            "Submissions rejected before mutation",
        )?;
        registry.register(Box::new(rejections_total.clone()))?;

        let tickets_issued_total =
            IntCounter::new("refuel_tickets_issued_total", "Tickets granted across all refuels")?;
        registry.register(Box::new(tickets_issued_total.clone()))?;

        let plates = IntGauge::new("refuel_plates", "Distinct plates in the ledger")?;
        registry.register(Box::new(plates.clone()))?;

        Ok(Self {
            submissions_total,
            rejections_total,
            tickets_issued_total,
            plates,
            registry,
        })
    }

    /// Record an accepted refuel
    pub fn record_submission(&self, ticket_count: u64, plate_count: usize) {
        self.submissions_total.inc();
        self.tickets_issued_total.inc_by(ticket_count);
        self.plates.set(i64::try_from(plate_count).unwrap_or(i64::MAX));
    }

    /// Record a rejected submission
    pub fn record_rejection(&self) {
        self.rejections_total.inc();
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render in Prometheus text exposition format
    pub fn render(&self) -> crate::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
