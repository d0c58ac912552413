use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    merge_opt_string, merge_string, merge_value, require, require_positive, Entity,
    ValidationError,
};

/// A billable procedure offered by the clinic. Duration is in minutes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Procedure {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProcedurePatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_minutes: Option<u32>,
    pub observations: Option<String>,
}

impl ProcedurePatch {
    pub fn into_record(self) -> Procedure {
        let mut record = Procedure {
            id: self.id.clone().unwrap_or_default(),
            ..Procedure::default()
        };
        record.apply(self);
        record
    }
}

impl Procedure {
    pub fn apply(&mut self, patch: ProcedurePatch) {
        merge_string(&mut self.name, patch.name);
        merge_opt_string(&mut self.description, patch.description);
        merge_value(&mut self.price, patch.price);
        merge_value(&mut self.duration_minutes, patch.duration_minutes);
        merge_opt_string(&mut self.observations, patch.observations);
    }
}

impl Entity for Procedure {
    const COLLECTION: &'static str = "Procedures";

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
        require("name", &self.name)?;
        require_positive("price", self.price)?;
        if self.duration_minutes == 0 {
            return Err(ValidationError::NotPositive("duration_minutes"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Procedure {
        ProcedurePatch {
            name: Some("Cleaning".into()),
            price: Some(120.0),
            duration_minutes: Some(45),
            ..Default::default()
        }
        .into_record()
    }

    #[test]
    fn validates_required_fields() {
        assert_eq!(valid().validate(), Ok(()));

        let mut free = valid();
        free.price = 0.0;
        assert_eq!(free.validate(), Err(ValidationError::NotPositive("price")));

        let mut instant = valid();
        instant.duration_minutes = 0;
        assert_eq!(
            instant.validate(),
            Err(ValidationError::NotPositive("duration_minutes"))
        );
    }

    #[test]
    fn price_only_patch_preserves_duration() {
        let mut procedure = valid();
        procedure.apply(ProcedurePatch {
            price: Some(150.0),
            ..Default::default()
        });
        assert_eq!(procedure.price, 150.0);
        assert_eq!(procedure.duration_minutes, 45);
    }
}
