use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    merge_opt_string, merge_opt_value, merge_string, merge_value, require, require_positive,
    require_some, Entity, ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Materials,
    Rent,
    Utilities,
    Staff,
    Equipment,
    Other,
}

/// A clinic expense (outgoing money).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub category: Option<ExpenseCategory>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExpensePatch {
    pub id: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<ExpenseCategory>,
    pub date: Option<DateTime<Utc>>,
    pub supplier: Option<String>,
    pub invoice_id: Option<String>,
}

impl ExpensePatch {
    pub fn into_record(self) -> Expense {
        let mut record = Expense {
            id: self.id.clone().unwrap_or_default(),
            ..Expense::default()
        };
        record.apply(self);
        record
    }
}

impl Expense {
    pub fn apply(&mut self, patch: ExpensePatch) {
        merge_string(&mut self.description, patch.description);
        merge_value(&mut self.amount, patch.amount);
        merge_opt_value(&mut self.category, patch.category);
        merge_opt_value(&mut self.date, patch.date);
        merge_opt_string(&mut self.supplier, patch.supplier);
        merge_opt_string(&mut self.invoice_id, patch.invoice_id);
    }
}

impl Entity for Expense {
    const COLLECTION: &'static str = "Expenses";

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
        require_some("category", &self.category)?;
        require_some("date", &self.date)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Expense {
        ExpensePatch {
            description: Some("Gloves".into()),
            amount: Some(89.9),
            category: Some(ExpenseCategory::Materials),
            date: Some(Utc::now()),
            ..Default::default()
        }
        .into_record()
    }

    #[test]
    fn validates_required_fields() {
        assert_eq!(valid().validate(), Ok(()));

        let mut free = valid();
        free.amount = -1.0;
        assert_eq!(free.validate(), Err(ValidationError::NotPositive("amount")));

        let mut uncategorized = valid();
        uncategorized.category = None;
        assert_eq!(
            uncategorized.validate(),
            Err(ValidationError::Missing("category"))
        );
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_value(ExpenseCategory::Materials).unwrap();
        assert_eq!(json, serde_json::json!("materials"));
    }
}
