//! In-memory store, for tests and single-process hosts.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use leadform_core::{Form, FormStore, LeadFormCompletion, Result};
use leadform_engine::validate_form;

#[derive(Default)]
pub struct MemoryFormStore {
    forms: RwLock<HashMap<String, Form>>,
    completions: RwLock<HashMap<String, LeadFormCompletion>>,
}

impl MemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormStore for MemoryFormStore {
    async fn save_form(&self, form: &Form) -> Result<()> {
        // Never persist an invalid form.
        validate_form(form)?;
        self.forms.write().insert(form.id.clone(), form.clone());
        Ok(())
    }

    async fn get_form(&self, id: &str) -> Result<Option<Form>> {
        Ok(self.forms.read().get(id).cloned())
    }

    async fn list_forms(&self) -> Result<Vec<Form>> {
        Ok(self.forms.read().values().cloned().collect())
    }

    async fn delete_form(&self, id: &str) -> Result<()> {
        self.forms.write().remove(id);
        Ok(())
    }

    async fn save_completion(&self, completion: &LeadFormCompletion) -> Result<()> {
        // Last write for an id wins; double-submits collapse.
        self.completions
            .write()
            .insert(completion.id.clone(), completion.clone());
        Ok(())
    }

    async fn get_completion(&self, id: &str) -> Result<Option<LeadFormCompletion>> {
        Ok(self.completions.read().get(id).cloned())
    }

    async fn list_completions_by_form(&self, form_id: &str) -> Result<Vec<LeadFormCompletion>> {
        Ok(self
            .completions
            .read()
            .values()
            .filter(|completion| completion.form_id == form_id)
            .cloned()
            .collect())
    }

    async fn delete_completion(&self, id: &str) -> Result<()> {
        self.completions.write().remove(id);
        Ok(())
    }
}
