pub mod appointment;
pub mod dentist;
pub mod expense;
pub mod invoice;
pub mod patient;
pub mod procedure;
pub mod revenue;

pub use appointment::{Appointment, AppointmentPatch};
pub use dentist::{Dentist, DentistPatch};
pub use expense::{Expense, ExpenseCategory, ExpensePatch};
pub use invoice::{Invoice, InvoiceItem, InvoicePatch, InvoiceStatus, InvoiceType};
pub use patient::{Patient, PatientPatch};
pub use procedure::{Procedure, ProcedurePatch};
pub use revenue::{PaymentMethod, PaymentStatus, Revenue, RevenuePatch};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Record failed its required-field check. The field name is reported to the
/// client verbatim, so variants carry the JSON field name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("at least one item is required")]
    NoItems,
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing(field) => field,
            ValidationError::NotPositive(field) => field,
            ValidationError::NoItems => "items",
        }
    }
}

/// A persisted record type: one store collection, a string primary key, and
/// server-managed timestamps. Required-field rules live in `validate`, which
/// is checked at create time and again on the post-merge record of every
/// update, so a partial update can never persist an incomplete record.
pub trait Entity: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection ("table") name in the store, before any configured prefix.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn stamp_created(&mut self, now: DateTime<Utc>);
    fn stamp_updated(&mut self, now: DateTime<Utc>);
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Every collection the store must provision at startup.
pub const COLLECTIONS: [&str; 7] = [
    Dentist::COLLECTION,
    Patient::COLLECTION,
    Procedure::COLLECTION,
    Appointment::COLLECTION,
    Expense::COLLECTION,
    Revenue::COLLECTION,
    Invoice::COLLECTION,
];

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(())
    }
}

pub(crate) fn require_some<T>(field: &'static str, value: &Option<T>) -> Result<(), ValidationError> {
    if value.is_none() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(())
    }
}

pub(crate) fn require_positive(field: &'static str, amount: f64) -> Result<(), ValidationError> {
    if amount > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive(field))
    }
}

/// Merge rule for required strings: a present non-empty value overwrites,
/// an absent or empty value preserves the stored one.
pub(crate) fn merge_string(target: &mut String, patch: Option<String>) {
    if let Some(value) = patch {
        if !value.trim().is_empty() {
            *target = value;
        }
    }
}

/// Merge rule for optional strings, same non-empty semantics.
pub(crate) fn merge_opt_string(target: &mut Option<String>, patch: Option<String>) {
    if let Some(value) = patch {
        if !value.trim().is_empty() {
            *target = Some(value);
        }
    }
}

/// Merge rule for typed fields (numbers, dates, enums): any present value
/// overwrites; post-merge validation catches invalid results.
pub(crate) fn merge_value<T>(target: &mut T, patch: Option<T>) {
    if let Some(value) = patch {
        *target = value;
    }
}

pub(crate) fn merge_opt_value<T>(target: &mut Option<T>, patch: Option<T>) {
    if let Some(value) = patch {
        *target = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_blank_strings() {
        assert_eq!(require("name", ""), Err(ValidationError::Missing("name")));
        assert_eq!(require("name", "   "), Err(ValidationError::Missing("name")));
        assert_eq!(require("name", "Dr. Smith"), Ok(()));
    }

    #[test]
    fn require_positive_rejects_zero_and_negative() {
        assert_eq!(
            require_positive("amount", 0.0),
            Err(ValidationError::NotPositive("amount"))
        );
        assert_eq!(
            require_positive("amount", -3.5),
            Err(ValidationError::NotPositive("amount"))
        );
        assert_eq!(require_positive("amount", 0.01), Ok(()));
    }

    #[test]
    fn merge_string_preserves_on_empty() {
        let mut name = "kept".to_string();
        merge_string(&mut name, None);
        assert_eq!(name, "kept");
        merge_string(&mut name, Some(String::new()));
        assert_eq!(name, "kept");
        merge_string(&mut name, Some("replaced".to_string()));
        assert_eq!(name, "replaced");
    }

    #[test]
    fn validation_error_reports_field_name() {
        assert_eq!(ValidationError::Missing("cro").field(), "cro");
        assert_eq!(ValidationError::NoItems.field(), "items");
    }
}
