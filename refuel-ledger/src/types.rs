//! Core types for the refuel ledger
//!
//! Money is always a `Decimal` in major currency units so fractional
//! subunits survive arithmetic exactly.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Vehicle plate, the ledger's primary key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlateId(String);

impl PlateId {
    /// Create new plate ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty or whitespace-only plates are not valid keys
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PlateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single refueling, immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefuelEvent {
    /// Unique event ID (UUIDv7 for time-ordering)
    pub event_id: Uuid,

    /// Moment of submission
    pub timestamp: DateTime<Utc>,

    /// Amount in major currency units
    pub amount: Decimal,

    /// Tickets granted for this refueling alone
    pub ticket_count: u64,
}

impl RefuelEvent {
    /// Create an event, deriving its tickets from the rule in force now
    pub fn new(amount: Decimal, amount_per_ticket: Decimal, timestamp: DateTime<Utc>) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            timestamp,
            amount,
            ticket_count: crate::money::tickets_for(amount, amount_per_ticket),
        }
    }
}

/// Per-plate history with a derived ticket total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Owner name from the latest submission
    pub owner_name: String,

    /// Contact from the latest submission
    pub contact: String,

    /// Plate key
    pub plate_id: PlateId,

    /// Refuelings in submission order
    pub events: Vec<RefuelEvent>,

    /// Sum of ticket counts over `events`
    pub total_tickets: u64,
}

impl LedgerRecord {
    /// Start a record from its first refueling
    pub fn new(
        plate_id: PlateId,
        owner_name: impl Into<String>,
        contact: impl Into<String>,
        first_event: RefuelEvent,
    ) -> Self {
        let total_tickets = first_event.ticket_count;
        Self {
            owner_name: owner_name.into(),
            contact: contact.into(),
            plate_id,
            events: vec![first_event],
            total_tickets,
        }
    }

    /// Append a refueling, refresh owner details and recompute the total
    pub fn apply_event(
        &mut self,
        owner_name: impl Into<String>,
        contact: impl Into<String>,
        event: RefuelEvent,
    ) {
        self.owner_name = owner_name.into();
        self.contact = contact.into();
        self.events.push(event);
        self.total_tickets = self.recompute_tickets();
    }

    /// Sum of ticket counts from the full event list, capped at `u64::MAX`
    pub fn recompute_tickets(&self) -> u64 {
        self.events
            .iter()
            .fold(0u64, |total, e| total.saturating_add(e.ticket_count))
    }

    /// Sum of all refueled amounts, capped at `Decimal::MAX`
    pub fn total_amount(&self) -> Decimal {
        self.events
            .iter()
            .fold(Decimal::ZERO, |total, e| total.saturating_add(e.amount))
    }

    /// Most recent refueling
    pub fn last_event(&self) -> Option<&RefuelEvent> {
        self.events.last()
    }
}
