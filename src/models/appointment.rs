use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    merge_opt_string, merge_opt_value, merge_string, require, require_some, Entity,
    ValidationError,
};

/// A scheduled visit. Dentist and patient references are stored as plain ids;
/// this layer does not check them against their collections, so dangling
/// references are the caller's responsibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(default)]
    pub id: String,
    pub dentist_id: String,
    pub patient_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedure_id: Option<String>,
    #[serde(default)]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppointmentPatch {
    pub id: Option<String>,
    pub dentist_id: Option<String>,
    pub patient_id: Option<String>,
    pub procedure_id: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl AppointmentPatch {
    pub fn into_record(self) -> Appointment {
        let mut record = Appointment {
            id: self.id.clone().unwrap_or_default(),
            ..Appointment::default()
        };
        record.apply(self);
        record
    }
}

impl Appointment {
    pub fn apply(&mut self, patch: AppointmentPatch) {
        merge_string(&mut self.dentist_id, patch.dentist_id);
        merge_string(&mut self.patient_id, patch.patient_id);
        merge_opt_string(&mut self.procedure_id, patch.procedure_id);
        merge_opt_value(&mut self.date_time, patch.date_time);
        merge_opt_value(&mut self.duration_minutes, patch.duration_minutes);
        merge_string(&mut self.status, patch.status);
        merge_opt_string(&mut self.notes, patch.notes);
    }
}

impl Entity for Appointment {
    const COLLECTION: &'static str = "Appointments";

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
        require("dentist_id", &self.dentist_id)?;
        require("patient_id", &self.patient_id)?;
        require_some("date_time", &self.date_time)?;
        require("status", &self.status)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Appointment {
        AppointmentPatch {
            dentist_id: Some("d-1".into()),
            patient_id: Some("p-1".into()),
            date_time: Some(Utc::now()),
            status: Some("scheduled".into()),
            ..Default::default()
        }
        .into_record()
    }

    #[test]
    fn validates_required_fields() {
        assert_eq!(valid().validate(), Ok(()));

        let mut unscheduled = valid();
        unscheduled.date_time = None;
        assert_eq!(
            unscheduled.validate(),
            Err(ValidationError::Missing("date_time"))
        );

        let mut no_patient = valid();
        no_patient.patient_id.clear();
        assert_eq!(
            no_patient.validate(),
            Err(ValidationError::Missing("patient_id"))
        );
    }

    #[test]
    fn status_only_patch_preserves_references() {
        let mut appointment = valid();
        appointment.apply(AppointmentPatch {
            status: Some("completed".into()),
            ..Default::default()
        });
        assert_eq!(appointment.status, "completed");
        assert_eq!(appointment.dentist_id, "d-1");
        assert_eq!(appointment.patient_id, "p-1");
    }
}
