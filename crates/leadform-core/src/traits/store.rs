//! Persistence trait for form definitions and completions.

use async_trait::async_trait;

use crate::completion::LeadFormCompletion;
use crate::error::Result;
use crate::form::Form;

/// Tenant-scoped CRUD store for forms and completions.
///
/// Contract: `save_form` must run structural validation and reject the write
/// on failure; an invalid form is never persisted. `get_*` returns
/// `Ok(None)` for unknown ids. Completion saves must tolerate double-submit
/// from the same respondent (last write for an id wins).
#[async_trait]
pub trait FormStore: Send + Sync {
    async fn save_form(&self, form: &Form) -> Result<()>;
    async fn get_form(&self, id: &str) -> Result<Option<Form>>;
    async fn list_forms(&self) -> Result<Vec<Form>>;
    async fn delete_form(&self, id: &str) -> Result<()>;

    async fn save_completion(&self, completion: &LeadFormCompletion) -> Result<()>;
    async fn get_completion(&self, id: &str) -> Result<Option<LeadFormCompletion>>;
    async fn list_completions_by_form(&self, form_id: &str) -> Result<Vec<LeadFormCompletion>>;
    async fn delete_completion(&self, id: &str) -> Result<()>;
}
