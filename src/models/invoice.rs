use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    merge_opt_string, merge_opt_value, merge_string, merge_value, require, require_positive,
    require_some, Entity, ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceType {
    Service,
    Product,
    Mixed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Issued,
    Cancelled,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    #[serde(default)]
    pub total_price: f64,
}

/// A fiscal invoice. Totals are always recomputed server-side from the items
/// and tax amount, so client-sent totals cannot drift.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(default)]
    pub id: String,
    pub number: String,
    #[serde(rename = "type", default)]
    pub invoice_type: Option<InvoiceType>,
    #[serde(default)]
    pub status: InvoiceStatus,
    pub patient_id: String,
    pub patient_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_email: Option<String>,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax_amount: f64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub issue_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InvoicePatch {
    pub id: Option<String>,
    pub number: Option<String>,
    #[serde(rename = "type")]
    pub invoice_type: Option<InvoiceType>,
    pub status: Option<InvoiceStatus>,
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub patient_email: Option<String>,
    pub items: Option<Vec<InvoiceItem>>,
    pub tax_amount: Option<f64>,
    pub issue_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl InvoicePatch {
    pub fn into_record(self) -> Invoice {
        let mut record = Invoice {
            id: self.id.clone().unwrap_or_default(),
            ..Invoice::default()
        };
        record.apply(self);
        record
    }
}

impl Invoice {
    /// Merge a partial payload, then recompute derived totals.
    pub fn apply(&mut self, patch: InvoicePatch) {
        merge_string(&mut self.number, patch.number);
        merge_opt_value(&mut self.invoice_type, patch.invoice_type);
        merge_value(&mut self.status, patch.status);
        merge_string(&mut self.patient_id, patch.patient_id);
        merge_string(&mut self.patient_name, patch.patient_name);
        merge_opt_string(&mut self.patient_email, patch.patient_email);
        if let Some(items) = patch.items {
            self.items = items;
        }
        merge_value(&mut self.tax_amount, patch.tax_amount);
        merge_opt_value(&mut self.issue_date, patch.issue_date);
        merge_opt_value(&mut self.due_date, patch.due_date);
        merge_opt_string(&mut self.notes, patch.notes);
        self.recalculate_totals();
    }

    /// Recompute each item's total, the subtotal, and the grand total.
    pub fn recalculate_totals(&mut self) {
        self.subtotal = 0.0;
        for item in &mut self.items {
            item.total_price = f64::from(item.quantity) * item.unit_price;
            self.subtotal += item.total_price;
        }
        self.total_amount = self.subtotal + self.tax_amount;
    }
}

impl Entity for Invoice {
    const COLLECTION: &'static str = "Invoices";

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
        require("number", &self.number)?;
        require_some("type", &self.invoice_type)?;
        require("patient_id", &self.patient_id)?;
        require("patient_name", &self.patient_name)?;
        if self.items.is_empty() {
            return Err(ValidationError::NoItems);
        }
        require_positive("total_amount", self.total_amount)?;
        require_some("issue_date", &self.issue_date)?;
        require_some("due_date", &self.due_date)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Invoice {
        InvoicePatch {
            number: Some("NF-0001".into()),
            invoice_type: Some(InvoiceType::Service),
            patient_id: Some("p-1".into()),
            patient_name: Some("Jane Doe".into()),
            items: Some(vec![
                InvoiceItem {
                    description: "Cleaning".into(),
                    quantity: 1,
                    unit_price: 120.0,
                    total_price: 0.0,
                },
                InvoiceItem {
                    description: "X-ray".into(),
                    quantity: 2,
                    unit_price: 40.0,
                    total_price: 0.0,
                },
            ]),
            tax_amount: Some(10.0),
            issue_date: Some(Utc::now()),
            due_date: Some(Utc::now()),
            ..Default::default()
        }
        .into_record()
    }

    #[test]
    fn totals_are_recomputed_from_items() {
        let invoice = valid();
        assert_eq!(invoice.items[0].total_price, 120.0);
        assert_eq!(invoice.items[1].total_price, 80.0);
        assert_eq!(invoice.subtotal, 200.0);
        assert_eq!(invoice.total_amount, 210.0);
        assert_eq!(invoice.validate(), Ok(()));
    }

    #[test]
    fn requires_at_least_one_item() {
        let mut empty = valid();
        empty.items.clear();
        empty.recalculate_totals();
        assert_eq!(empty.validate(), Err(ValidationError::NoItems));
    }

    #[test]
    fn status_defaults_to_draft() {
        assert_eq!(valid().status, InvoiceStatus::Draft);
    }

    #[test]
    fn type_field_uses_json_name() {
        let json = serde_json::to_value(valid()).unwrap();
        assert_eq!(json["type"], serde_json::json!("service"));
    }
}
