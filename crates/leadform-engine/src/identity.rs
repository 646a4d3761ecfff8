//! Extraction of the four auth-identifier answers for account provisioning.

use leadform_core::{Form, FormError, LeadFormCompletion, Result, SemanticRole};

/// The answers the host hands to the auth provider to create or sign in the
/// respondent's account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Deterministically pick the answer for each of the four semantic roles.
///
/// Fails loudly when a role has no designated identifier question or that
/// question was never answered; provisioning must never guess.
pub fn extract_auth_profile(form: &Form, completion: &LeadFormCompletion) -> Result<AuthProfile> {
    let field = |role: SemanticRole| -> Result<String> {
        let question = form
            .questions
            .iter()
            .find(|q| q.semantic_role == Some(role) && q.is_auth_identifier())
            .ok_or_else(|| {
                FormError::Provisioning(format!(
                    "form '{}' designates no auth identifier for '{role}'",
                    form.id
                ))
            })?;
        let answer = completion.answer_for(&question.id).ok_or_else(|| {
            FormError::Provisioning(format!(
                "completion '{}' has no answer for the '{role}' identifier '{}'",
                completion.id, question.id
            ))
        })?;
        Ok(answer.value.display())
    };

    Ok(AuthProfile {
        first_name: field(SemanticRole::FirstName)?,
        last_name: field(SemanticRole::LastName)?,
        email: field(SemanticRole::Email)?,
        phone: field(SemanticRole::Phone)?,
    })
}
