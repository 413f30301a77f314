use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::models::domain::session::DEFAULT_PARTICIPANT;
use crate::models::domain::{QuestionBank, SessionProgression};
use crate::models::dto::response::{
    AnswerResponse, CurrentQuestionResponse, FinishedView, InProgressView, PlayerState,
    SelectQuizResponse,
};
use crate::repositories::BankRegistry;

/// The operations behind the quiz API: bank selection, the current-question
/// view, answer grading, and advancement. Pure state transitions live on
/// `SessionProgression`; this service ties them to the registry and shapes
/// the responses.
pub struct SessionService {
    registry: Arc<dyn BankRegistry>,
    randomize_order: bool,
}

impl SessionService {
    pub fn new(registry: Arc<dyn BankRegistry>, randomize_order: bool) -> Self {
        Self {
            registry,
            randomize_order,
        }
    }

    pub fn list_sources(&self) -> AppResult<Vec<String>> {
        self.registry.list_sources()
    }

    /// Bootstrap for a session that has not selected anything yet: start on
    /// the first available source.
    pub fn new_progression(&self) -> AppResult<SessionProgression> {
        let sources = self.registry.list_sources()?;
        let first = sources.first().ok_or(AppError::NoSourcesAvailable)?;
        self.progression_for(first)
    }

    /// A fresh progression playing `key`, validating the bank first.
    pub fn progression_for(&self, key: &str) -> AppResult<SessionProgression> {
        let bank = self.registry.get(key)?;
        Ok(SessionProgression::new(
            key,
            bank.total_questions(),
            self.randomize_order,
        ))
    }

    /// Resolves the session's bank, falling back to the first available
    /// source with a fresh progression when the selected one has
    /// disappeared from the data directory.
    fn ensure_bank(&self, progression: &mut SessionProgression) -> AppResult<Arc<QuestionBank>> {
        let sources = self.registry.list_sources()?;
        if sources.iter().any(|source| source == progression.bank_key()) {
            return self.registry.get(progression.bank_key());
        }

        let first = sources.first().ok_or(AppError::NoSourcesAvailable)?;
        log::info!(
            "selected quiz '{}' is gone, falling back to '{}'",
            progression.bank_key(),
            first
        );
        let bank = self.registry.get(first)?;
        progression.reset(first, bank.total_questions(), self.randomize_order);
        Ok(bank)
    }

    /// Switches the session onto `key`. The bank is loaded and validated
    /// before any session state changes, so a bad source leaves the current
    /// progression untouched.
    pub fn select_source(
        &self,
        progression: &mut SessionProgression,
        key: &str,
    ) -> AppResult<SelectQuizResponse> {
        let bank = self.registry.get(key)?;
        progression.reset(key, bank.total_questions(), self.randomize_order);
        Ok(SelectQuizResponse {
            ok: true,
            selected: key.to_string(),
            total: bank.total_questions(),
        })
    }

    pub fn current_view(
        &self,
        progression: &mut SessionProgression,
    ) -> AppResult<CurrentQuestionResponse> {
        let bank = self.ensure_bank(progression)?;
        let players = PlayerState::map_from(progression.scores());
        let score = progression.score_of(DEFAULT_PARTICIPANT);
        let selected_quiz = progression.bank_key().to_string();

        match progression.current_slot() {
            None => Ok(CurrentQuestionResponse::Finished(FinishedView {
                finished: true,
                total: bank.total_questions(),
                score,
                players,
                selected_quiz,
            })),
            Some(slot) => {
                let question = bank.question_at(slot)?;
                Ok(CurrentQuestionResponse::InProgress(InProgressView {
                    finished: false,
                    id: question.id.clone(),
                    question: question.text.clone(),
                    choices: question.choices.to_vec(),
                    index: progression.position() + 1,
                    total: bank.total_questions(),
                    score,
                    players,
                    selected_quiz,
                }))
            }
        }
    }

    /// Grades one submission against the current question. Scoring is
    /// idempotent per question; correctness is reported either way.
    pub fn submit_answer(
        &self,
        progression: &mut SessionProgression,
        question_id: &str,
        choice: i64,
        participant: &str,
    ) -> AppResult<AnswerResponse> {
        let bank = self.ensure_bank(progression)?;
        let slot = progression
            .current_slot()
            .ok_or_else(|| AppError::StaleAnswer("the quiz is already finished".to_string()))?;
        let current = bank.question_at(slot)?;

        if !(1..=4).contains(&choice) {
            return Err(AppError::InvalidChoice(choice));
        }
        if question_id != current.id {
            return Err(AppError::StaleAnswer(format!(
                "question '{question_id}' is not the current question"
            )));
        }

        let correct_choice = bank.correct_choice(question_id)?;
        let correct = bank.is_correct(question_id, choice as u8)?;
        progression.record_answer(question_id, correct, participant);

        Ok(AnswerResponse {
            correct,
            correct_choice,
            explanation: current.explanation.clone(),
            score: progression.score_of(DEFAULT_PARTICIPANT),
            player_score: progression.score_of(participant),
            selected_quiz: progression.bank_key().to_string(),
        })
    }

    /// Moves the session forward by one question, whether or not the
    /// current one was answered. Past the end this is a no-op.
    pub fn advance(&self, progression: &mut SessionProgression) -> AppResult<()> {
        self.ensure_bank(progression)?;
        progression.advance();
        Ok(())
    }
}
