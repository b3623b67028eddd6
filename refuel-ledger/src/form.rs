//! Refuel entry form
//!
//! Holds the four raw fields as the user typed them. The amount field
//! switches between raw digits while editing and display currency once it
//! loses focus; [`RefuelForm::submit`] accepts either shape.

use crate::{
    money::{normalize_digits, CurrencyFormat},
    types::{LedgerRecord, PlateId},
    Error, Ledger, Result,
};
use rust_decimal::Decimal;

/// Values ready for [`Ledger::record_refuel`]
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Plate key
    pub plate_id: PlateId,

    /// Owner name
    pub owner_name: String,

    /// Contact
    pub contact: String,

    /// Resolved amount in major units
    pub amount: Decimal,
}

/// Raw form fields
#[derive(Debug, Clone, Default)]
pub struct RefuelForm {
    /// Owner full name
    pub name: String,

    /// Contact (phone / messaging number)
    pub contact: String,

    /// Vehicle plate
    pub plate: String,

    amount: String,

    format: CurrencyFormat,
}

impl RefuelForm {
    /// Empty form using the given currency format
    pub fn new(format: CurrencyFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Current amount field text
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Keystrokes in the amount field keep digits only
    pub fn on_amount_input(&mut self, text: &str) {
        self.amount = normalize_digits(text);
    }

    /// Leaving the amount field shows it as currency
    pub fn on_amount_blur(&mut self) {
        if self.format.is_display_form(&self.amount) {
            return;
        }
        if let Some(display) = self.format.digits_to_display(&self.amount) {
            self.amount = display;
        }
    }

    /// Entering the amount field goes back to editable digits
    pub fn on_amount_focus(&mut self) {
        if self.format.is_display_form(&self.amount) {
            self.amount = normalize_digits(&self.amount);
        }
    }

    /// Required fields that are still blank, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("contact", &self.contact),
            ("plate", &self.plate),
            ("amount", &self.amount),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Check required fields and resolve the amount without clearing
    pub fn prepare(&self) -> Result<Submission> {
        if let Some(&field) = self.missing_fields().first() {
            return Err(Error::MissingField(field));
        }

        Ok(Submission {
            plate_id: PlateId::new(self.plate.as_str()),
            owner_name: self.name.clone(),
            contact: self.contact.clone(),
            amount: self.format.resolve_amount(&self.amount),
        })
    }

    /// Validate, record into `ledger` and clear the form
    ///
    /// On any error the form keeps its contents so the user can fix them.
    pub fn submit(&mut self, ledger: &mut Ledger) -> Result<LedgerRecord> {
        let submission = self.prepare()?;
        let record = ledger
            .record_refuel(
                submission.plate_id,
                submission.owner_name,
                submission.contact,
                submission.amount,
            )?
            .clone();

        self.clear();
        Ok(record)
    }

    /// Reset all four fields
    pub fn clear(&mut self) {
        self.name.clear();
        self.contact.clear();
        self.plate.clear();
        self.amount.clear();
    }
}
