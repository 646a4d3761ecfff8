//! Display-text resolution for informational questions.

use leadform_core::{Answer, ContentGenerator, ContentSource, Question, QuestionKind};

use crate::evaluator::transcript;

/// Resolve the text an informational view displays.
///
/// Static content passes through. LLM-sourced content renders via the
/// generator with the transcript so far as context; a generation failure or
/// blank output falls back to the authored static text; the respondent
/// must always see something.
pub async fn resolve_content(
    question: &Question,
    answers: &[Answer],
    generator: &dyn ContentGenerator,
) -> String {
    let QuestionKind::Informational {
        content,
        content_source,
        llm_config,
    } = &question.kind
    else {
        return question.text.clone();
    };

    match (content_source, llm_config) {
        (ContentSource::Llm, Some(config)) => {
            match generator.generate(&transcript(answers), config).await {
                Ok(text) if !text.trim().is_empty() => text,
                Ok(_) => content.clone(),
                Err(error) => {
                    tracing::warn!(
                        question = %question.id,
                        %error,
                        "content generation failed, falling back to static text"
                    );
                    content.clone()
                }
            }
        }
        _ => content.clone(),
    }
}
