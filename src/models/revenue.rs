use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    merge_opt_string, merge_opt_value, merge_string, merge_value, require, require_positive,
    require_some, Entity, ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Pix,
    BankSlip,
    Insurance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Cancelled,
    Refunded,
}

/// Incoming money owed or received for a patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Revenue {
    #[serde(default)]
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    pub patient_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedure_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RevenuePatch {
    pub id: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub patient_id: Option<String>,
    pub procedure_id: Option<String>,
    pub appointment_id: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<PaymentStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub paid_date: Option<DateTime<Utc>>,
    pub invoice_id: Option<String>,
}

impl RevenuePatch {
    pub fn into_record(self) -> Revenue {
        let mut record = Revenue {
            id: self.id.clone().unwrap_or_default(),
            ..Revenue::default()
        };
        record.apply(self);
        record
    }
}

impl Revenue {
    pub fn apply(&mut self, patch: RevenuePatch) {
        merge_string(&mut self.description, patch.description);
        merge_value(&mut self.amount, patch.amount);
        merge_string(&mut self.patient_id, patch.patient_id);
        merge_opt_string(&mut self.procedure_id, patch.procedure_id);
        merge_opt_string(&mut self.appointment_id, patch.appointment_id);
        merge_opt_value(&mut self.payment_method, patch.payment_method);
        merge_opt_value(&mut self.payment_status, patch.payment_status);
        merge_opt_value(&mut self.due_date, patch.due_date);
        merge_opt_value(&mut self.paid_date, patch.paid_date);
        merge_opt_string(&mut self.invoice_id, patch.invoice_id);
    }
}

impl Entity for Revenue {
    const COLLECTION: &'static str = "Revenues";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = Some(now);
    }

    fn stamp_updated(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("description", &self.description)?;
        require_positive("amount", self.amount)?;
        require("patient_id", &self.patient_id)?;
        require_some("payment_method", &self.payment_method)?;
        require_some("payment_status", &self.payment_status)?;
        require_some("due_date", &self.due_date)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Revenue {
        RevenuePatch {
            description: Some("Cleaning session".into()),
            amount: Some(120.0),
            patient_id: Some("p-1".into()),
            payment_method: Some(PaymentMethod::Pix),
            payment_status: Some(PaymentStatus::Pending),
            due_date: Some(Utc::now()),
            ..Default::default()
        }
        .into_record()
    }

    #[test]
    fn validates_required_fields() {
        assert_eq!(valid().validate(), Ok(()));

        let mut unpayable = valid();
        unpayable.payment_method = None;
        assert_eq!(
            unpayable.validate(),
            Err(ValidationError::Missing("payment_method"))
        );

        let mut undated = valid();
        undated.due_date = None;
        assert_eq!(undated.validate(), Err(ValidationError::Missing("due_date")));
    }

    #[test]
    fn marking_paid_preserves_amount() {
        let mut revenue = valid();
        let paid = Utc::now();
        revenue.apply(RevenuePatch {
            payment_status: Some(PaymentStatus::Paid),
            paid_date: Some(paid),
            ..Default::default()
        });
        assert_eq!(revenue.payment_status, Some(PaymentStatus::Paid));
        assert_eq!(revenue.paid_date, Some(paid));
        assert_eq!(revenue.amount, 120.0);
    }
}
