//! Turns a respondent's per-question selections into answer codes.

use std::collections::HashMap;

use crate::error::AnswerError;
use crate::knowledge::{AnswerCode, Question};

/// Builds one answer code per question, in questionnaire order.
///
/// `selections` maps question id -> chosen option value. Every question must have a
/// non-empty selection; otherwise [`AnswerError::Incomplete`] lists the unanswered ids.
/// Option values are not checked against the question's options: an unrecognized value
/// yields a code without a rule, which the scorer ignores.
pub fn collect_answer_codes(
    questions: &[Question],
    selections: &HashMap<String, String>,
) -> Result<Vec<AnswerCode>, AnswerError> {
    let mut codes = Vec::with_capacity(questions.len());
    let mut missing = Vec::new();
    for question in questions {
        match selections.get(&question.id).map(|v| v.trim()) {
            Some(value) if !value.is_empty() => codes.push(AnswerCode::new(&question.id, value)),
            _ => missing.push(question.id.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(AnswerError::Incomplete {
            missing,
            total: questions.len(),
        });
    }
    Ok(codes)
}
