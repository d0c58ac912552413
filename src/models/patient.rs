use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{merge_opt_string, merge_opt_value, merge_string, require, Entity, ValidationError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Patient {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatientPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub medical_notes: Option<String>,
}

impl PatientPatch {
    pub fn into_record(self) -> Patient {
        let mut record = Patient {
            id: self.id.clone().unwrap_or_default(),
            ..Patient::default()
        };
        record.apply(self);
        record
    }
}

impl Patient {
    pub fn apply(&mut self, patch: PatientPatch) {
        merge_string(&mut self.name, patch.name);
        merge_string(&mut self.email, patch.email);
        merge_opt_string(&mut self.phone, patch.phone);
        merge_opt_value(&mut self.date_of_birth, patch.date_of_birth);
        merge_opt_string(&mut self.medical_notes, patch.medical_notes);
    }
}

impl Entity for Patient {
    const COLLECTION: &'static str = "Patients";

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
        require("email", &self.email)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_required_fields() {
        let patient = PatientPatch {
            name: Some("Jane Doe".into()),
            email: Some("jane@x.com".into()),
            ..Default::default()
        }
        .into_record();
        assert_eq!(patient.validate(), Ok(()));

        let unnamed = PatientPatch {
            email: Some("jane@x.com".into()),
            ..Default::default()
        }
        .into_record();
        assert_eq!(unnamed.validate(), Err(ValidationError::Missing("name")));
    }

    #[test]
    fn patch_merges_date_of_birth() {
        let mut patient = PatientPatch {
            name: Some("Jane Doe".into()),
            email: Some("jane@x.com".into()),
            ..Default::default()
        }
        .into_record();

        let dob = NaiveDate::from_ymd_opt(1990, 4, 2).unwrap();
        patient.apply(PatientPatch {
            date_of_birth: Some(dob),
            ..Default::default()
        });

        assert_eq!(patient.date_of_birth, Some(dob));
        assert_eq!(patient.name, "Jane Doe");
    }
}
