use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerState {
    pub score: u32,
}

impl PlayerState {
    /// Projects the session's raw score map into the `players` payload
    /// shape shared by the question and answer responses.
    pub fn map_from(scores: &HashMap<String, u32>) -> HashMap<String, PlayerState> {
        scores
            .iter()
            .map(|(id, &score)| (id.clone(), PlayerState { score }))
            .collect()
    }
}

/// Either the current question or the terminal summary, depending on
/// whether the session has moved past its last question.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CurrentQuestionResponse {
    InProgress(InProgressView),
    Finished(FinishedView),
}

#[derive(Debug, Serialize)]
pub struct InProgressView {
    pub finished: bool,
    pub id: String,
    pub question: String,
    pub choices: Vec<String>,
    /// 1-based display position within the session's order.
    pub index: usize,
    pub total: usize,
    pub score: u32,
    pub players: HashMap<String, PlayerState>,
    pub selected_quiz: String,
}

#[derive(Debug, Serialize)]
pub struct FinishedView {
    pub finished: bool,
    pub total: usize,
    pub score: u32,
    pub players: HashMap<String, PlayerState>,
    pub selected_quiz: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub correct: bool,
    pub correct_choice: u8,
    pub explanation: String,
    pub score: u32,
    pub player_score: u32,
    pub selected_quiz: String,
}

#[derive(Debug, Serialize)]
pub struct QuizListResponse {
    pub files: Vec<String>,
    pub selected: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SelectQuizResponse {
    pub ok: bool,
    pub selected: String,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub ok: bool,
}
