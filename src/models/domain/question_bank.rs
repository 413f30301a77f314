use std::collections::HashMap;

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::Question;

/// Read-only query surface over one loaded set of questions. The ordered
/// sequence and the id index always hold the same questions; the bank is
/// shared across sessions behind an `Arc` and never mutated.
#[derive(Debug)]
pub struct QuestionBank {
    questions: Vec<Question>,
    index_by_id: HashMap<String, usize>,
}

impl QuestionBank {
    /// Builds a bank from an already-validated sequence of questions.
    /// Rejects empty input and duplicate ids so no partially-valid bank can
    /// exist regardless of how it was produced.
    pub fn new(questions: Vec<Question>) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(AppError::EmptySource);
        }

        let mut index_by_id = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            if index_by_id.insert(question.id.clone(), position).is_some() {
                return Err(AppError::ValidationError(format!(
                    "duplicate question id '{}'",
                    question.id
                )));
            }
        }

        Ok(Self {
            questions,
            index_by_id,
        })
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn question_at(&self, position: usize) -> AppResult<&Question> {
        self.questions.get(position).ok_or(AppError::OutOfRange {
            position,
            total: self.questions.len(),
        })
    }

    pub fn question_by_id(&self, id: &str) -> AppResult<&Question> {
        self.index_by_id
            .get(id)
            .map(|&position| &self.questions[position])
            .ok_or_else(|| AppError::QuestionNotFound(id.to_string()))
    }

    pub fn is_correct(&self, id: &str, choice: u8) -> AppResult<bool> {
        let question = self.question_by_id(id)?;
        if !(1..=4).contains(&choice) {
            return Err(AppError::InvalidChoice(choice as i64));
        }
        Ok(question.is_correct(choice))
    }

    pub fn correct_choice(&self, id: &str) -> AppResult<u8> {
        Ok(self.question_by_id(id)?.correct_choice)
    }
}
