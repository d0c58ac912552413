use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{merge_opt_string, merge_string, require, Entity, ValidationError};

/// A dentist registered with the clinic. `cro` is the regional council
/// license number and is treated as a business code, not a store key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dentist {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub cro: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial dentist payload, shared by create and update requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DentistPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub cro: Option<String>,
    pub country: Option<String>,
    pub specialty: Option<String>,
}

impl DentistPatch {
    pub fn into_record(self) -> Dentist {
        let mut record = Dentist {
            id: self.id.clone().unwrap_or_default(),
            ..Dentist::default()
        };
        record.apply(self);
        record
    }
}

impl Dentist {
    /// Merge a partial payload onto the stored record. `id` and timestamps
    /// are never taken from the payload.
    pub fn apply(&mut self, patch: DentistPatch) {
        merge_string(&mut self.name, patch.name);
        merge_string(&mut self.email, patch.email);
        merge_opt_string(&mut self.phone, patch.phone);
        merge_string(&mut self.cro, patch.cro);
        merge_string(&mut self.country, patch.country);
        merge_opt_string(&mut self.specialty, patch.specialty);
    }
}

impl Entity for Dentist {
    const COLLECTION: &'static str = "Dentists";

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
        require("cro", &self.cro)?;
        require("country", &self.country)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Dentist {
        DentistPatch {
            name: Some("Dr. John Smith".into()),
            email: Some("j@x.com".into()),
            cro: Some("12345".into()),
            country: Some("USA".into()),
            ..Default::default()
        }
        .into_record()
    }

    #[test]
    fn validates_required_fields() {
        assert_eq!(valid().validate(), Ok(()));

        let mut missing_cro = valid();
        missing_cro.cro.clear();
        assert_eq!(missing_cro.validate(), Err(ValidationError::Missing("cro")));

        let mut missing_country = valid();
        missing_country.country.clear();
        assert_eq!(
            missing_country.validate(),
            Err(ValidationError::Missing("country"))
        );
    }

    #[test]
    fn partial_patch_preserves_unmentioned_fields() {
        let mut dentist = valid();
        dentist.phone = Some("555-0100".into());

        dentist.apply(DentistPatch {
            email: Some("new@x.com".into()),
            ..Default::default()
        });

        assert_eq!(dentist.email, "new@x.com");
        assert_eq!(dentist.name, "Dr. John Smith");
        assert_eq!(dentist.phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn patch_never_touches_id() {
        let mut dentist = valid();
        dentist.id = "fixed".into();
        dentist.apply(DentistPatch {
            id: Some("other".into()),
            ..Default::default()
        });
        assert_eq!(dentist.id, "fixed");
    }
}
