//! Per-plate refuel ledger
//!
//! Records are kept in order of first appearance. A submission for a known
//! plate updates its record in place; an unknown plate appends a new record.
//!
//! # Example
//!
//! ```
//! use refuel_ledger::{Ledger, PlateId};
//! use rust_decimal::Decimal;
//!
//! let mut ledger = Ledger::default();
//! let record = ledger
//!     .record_refuel(PlateId::new("ABC1234"), "Ana", "11 99999-0000", Decimal::from(150))
//!     .unwrap();
//! assert_eq!(record.total_tickets, 3);
//! ```

use crate::{
    config::TicketConfig,
    types::{LedgerRecord, PlateId, RefuelEvent},
    Config, Error, Result,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// In-memory ledger of refuelings keyed by plate
#[derive(Debug, Clone)]
pub struct Ledger {
    /// Records in order of first appearance
    records: Vec<LedgerRecord>,

    /// Currency units per ticket, fixed for this ledger
    amount_per_ticket: Decimal,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            amount_per_ticket: TicketConfig::default().amount_per_ticket,
        }
    }
}

impl Ledger {
    /// Create an empty ledger with the configured ticket rule
    ///
    /// The configuration is validated first, so a zero or negative ticket
    /// unit is refused here rather than silently granting no tickets.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            records: Vec::new(),
            amount_per_ticket: config.tickets.amount_per_ticket,
        })
    }

    /// Record a refueling submitted now
    pub fn record_refuel(
        &mut self,
        plate_id: PlateId,
        owner_name: impl Into<String>,
        contact: impl Into<String>,
        amount: Decimal,
    ) -> Result<&LedgerRecord> {
        self.record_refuel_at(plate_id, owner_name, contact, amount, Utc::now())
    }

    /// Record a refueling with an explicit submission time
    ///
    /// Input is validated before anything is touched, so a rejected call
    /// leaves the ledger exactly as it was.
    pub fn record_refuel_at(
        &mut self,
        plate_id: PlateId,
        owner_name: impl Into<String>,
        contact: impl Into<String>,
        amount: Decimal,
        at: DateTime<Utc>,
    ) -> Result<&LedgerRecord> {
        self.validate(&plate_id, amount)?;

        let event = RefuelEvent::new(amount, self.amount_per_ticket, at);
        let ticket_count = event.ticket_count;

        let index = match self.position(&plate_id) {
            Some(index) => {
                self.records[index].apply_event(owner_name, contact, event);
                index
            }
            None => {
                self.records
                    .push(LedgerRecord::new(plate_id, owner_name, contact, event));
                self.records.len() - 1
            }
        };

        let record = &self.records[index];
        tracing::info!(
            plate = %record.plate_id,
            %amount,
            ticket_count,
            total_tickets = record.total_tickets,
            events = record.events.len(),
            "Recorded refuel"
        );

        Ok(record)
    }

    /// Reject input-contract violations
    fn validate(&self, plate_id: &PlateId, amount: Decimal) -> Result<()> {
        if plate_id.is_blank() {
            return Err(Error::EmptyPlate);
        }

        if amount < Decimal::ZERO {
            return Err(Error::NegativeAmount(amount));
        }

        Ok(())
    }

    /// All records in order of first appearance
    pub fn records(&self) -> &[LedgerRecord] {
        &self.records
    }

    /// Record for a plate
    pub fn get(&self, plate_id: &PlateId) -> Option<&LedgerRecord> {
        self.records.iter().find(|r| &r.plate_id == plate_id)
    }

    /// Index of a plate's record
    pub fn position(&self, plate_id: &PlateId) -> Option<usize> {
        self.records.iter().position(|r| &r.plate_id == plate_id)
    }

    /// Number of distinct plates
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// No plate recorded yet
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Tickets across every plate
    pub fn total_tickets(&self) -> u64 {
        self.records
            .iter()
            .fold(0u64, |total, r| total.saturating_add(r.total_tickets))
    }

    /// Ticket rule in force
    pub fn amount_per_ticket(&self) -> Decimal {
        self.amount_per_ticket
    }

    /// Owned copy of all records
    pub fn snapshot(&self) -> Vec<LedgerRecord> {
        self.records.clone()
    }
}
