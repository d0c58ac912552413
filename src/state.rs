use std::sync::Arc;

use crate::models::{Appointment, Dentist, Entity, Expense, Invoice, Patient, Procedure, Revenue};
use crate::store::{Collection, ItemStore};

/// Shared handler state: the injected persistence adapter plus the configured
/// table prefix. Cloned per request by axum; the store is behind an Arc so a
/// test can hand in an in-memory fake.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ItemStore>,
    table_prefix: String,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>, table_prefix: impl Into<String>) -> Self {
        Self {
            store,
            table_prefix: table_prefix.into(),
        }
    }

    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.store
    }

    pub fn collection<T: Entity>(&self) -> Collection<T> {
        Collection::new(self.store.clone(), &self.table_prefix)
    }

    pub fn dentists(&self) -> Collection<Dentist> {
        self.collection()
    }

    pub fn patients(&self) -> Collection<Patient> {
        self.collection()
    }

    pub fn procedures(&self) -> Collection<Procedure> {
        self.collection()
    }

    pub fn appointments(&self) -> Collection<Appointment> {
        self.collection()
    }

    pub fn expenses(&self) -> Collection<Expense> {
        self.collection()
    }

    pub fn revenues(&self) -> Collection<Revenue> {
        self.collection()
    }

    pub fn invoices(&self) -> Collection<Invoice> {
        self.collection()
    }
}
