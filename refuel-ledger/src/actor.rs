//! Actor-based concurrency for the ledger
//!
//! A single Tokio task owns the [`Ledger`]; callers talk to it through a
//! cloneable [`LedgerHandle`]. Every refuel is applied by that one task, so
//! concurrent submissions are serialized and none can observe a
//! half-updated record.
//!
//! ```text
//! LedgerHandle (Clone) ──mpsc (bounded)──▶ LedgerActor ──▶ Ledger
//!        ▲                                     │
//!        └──────────── oneshot reply ──────────┘
//! ```

use crate::types::{LedgerRecord, PlateId};
use crate::{Error, Ledger, Metrics, Result};
use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot};

/// Message sent to the ledger actor
pub enum LedgerMessage {
    /// Record a refueling
    RecordRefuel {
        /// Plate key
        plate_id: PlateId,
        /// Owner name from the form
        owner_name: String,
        /// Contact from the form
        contact: String,
        /// Resolved amount in major units
        amount: Decimal,
        /// Reply with the updated record
        response: oneshot::Sender<Result<LedgerRecord>>,
    },

    /// Get a plate's record
    GetRecord {
        /// Plate key
        plate_id: PlateId,
        /// Reply with the record or `RecordNotFound`
        response: oneshot::Sender<Result<LedgerRecord>>,
    },

    /// Copy of every record
    Snapshot {
        /// Reply with every record in ledger order
        response: oneshot::Sender<Vec<LedgerRecord>>,
    },

    /// Shutdown actor
    Shutdown,
}

/// Actor that processes ledger messages
pub struct LedgerActor {
    /// The ledger, owned exclusively by this task
    ledger: Ledger,

    /// Mailbox for incoming messages
    mailbox: mpsc::Receiver<LedgerMessage>,

    /// Submission counters
    metrics: Metrics,
}

impl LedgerActor {
    /// Create new actor
    pub fn new(ledger: Ledger, mailbox: mpsc::Receiver<LedgerMessage>, metrics: Metrics) -> Self {
        Self {
            ledger,
            mailbox,
            metrics,
        }
    }

    /// Run the actor event loop until shutdown or every handle is dropped
    pub async fn run(mut self) {
        while let Some(msg) = self.mailbox.recv().await {
            if let LedgerMessage::Shutdown = msg {
                tracing::debug!(plates = self.ledger.len(), "Ledger actor shutting down");
                break;
            }
            self.handle_message(msg);
        }
    }

    /// Handle a single message
    fn handle_message(&mut self, msg: LedgerMessage) {
        match msg {
            LedgerMessage::RecordRefuel {
                plate_id,
                owner_name,
                contact,
                amount,
                response,
            } => {
                let result = self
                    .ledger
                    .record_refuel(plate_id, owner_name, contact, amount)
                    .cloned();

                match &result {
                    Ok(record) => {
                        let tickets = record.last_event().map_or(0, |e| e.ticket_count);
                        self.metrics.record_submission(tickets, self.ledger.len());
                    }
                    Err(e) => {
                        tracing::warn!("Rejected refuel: {}", e);
                        self.metrics.record_rejection();
                    }
                }

                let _ = response.send(result);
            }

            LedgerMessage::GetRecord { plate_id, response } => {
                let result = self
                    .ledger
                    .get(&plate_id)
                    .cloned()
                    .ok_or_else(|| Error::RecordNotFound(plate_id.to_string()));
                let _ = response.send(result);
            }

            LedgerMessage::Snapshot { response } => {
                let _ = response.send(self.ledger.snapshot());
            }

            LedgerMessage::Shutdown => {
                // Handled in run loop
            }
        }
    }
}

/// Handle for sending messages to the actor
#[derive(Clone)]
pub struct LedgerHandle {
    sender: mpsc::Sender<LedgerMessage>,
}

impl LedgerHandle {
    /// Create new handle
    pub fn new(sender: mpsc::Sender<LedgerMessage>) -> Self {
        Self { sender }
    }

    /// Record a refueling
    pub async fn record_refuel(
        &self,
        plate_id: PlateId,
        owner_name: impl Into<String>,
        contact: impl Into<String>,
        amount: Decimal,
    ) -> Result<LedgerRecord> {
        let (tx, rx) = oneshot::channel();
        self.send(LedgerMessage::RecordRefuel {
            plate_id,
            owner_name: owner_name.into(),
            contact: contact.into(),
            amount,
            response: tx,
        })
        .await?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))?
    }

    /// Get a plate's record
    pub async fn get_record(&self, plate_id: PlateId) -> Result<LedgerRecord> {
        let (tx, rx) = oneshot::channel();
        self.send(LedgerMessage::GetRecord {
            plate_id,
            response: tx,
        })
        .await?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))?
    }

    /// Copy of every record in ledger order
    pub async fn snapshot(&self) -> Result<Vec<LedgerRecord>> {
        let (tx, rx) = oneshot::channel();
        self.send(LedgerMessage::Snapshot { response: tx }).await?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Shutdown actor
    pub async fn shutdown(&self) -> Result<()> {
        self.send(LedgerMessage::Shutdown).await
    }

    async fn send(&self, msg: LedgerMessage) -> Result<()> {
        self.sender
            .send(msg)
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))
    }
}

/// Spawn the ledger actor
pub fn spawn_ledger_actor(ledger: Ledger, metrics: Metrics, mailbox_capacity: usize) -> LedgerHandle {
    let (tx, rx) = mpsc::channel(mailbox_capacity.max(1)); // Bounded channel for backpressure
    let actor = LedgerActor::new(ledger, rx, metrics);

    tokio::spawn(async move {
        actor.run().await;
    });

    LedgerHandle::new(tx)
}
