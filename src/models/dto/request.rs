use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SelectQuizRequest {
    #[validate(length(min = 1, message = "filename is required"))]
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1, message = "id is required"))]
    pub id: String,

    /// 1-based choice; range-checked by the session service so an
    /// out-of-range value reports as an invalid choice, not a generic
    /// validation failure.
    pub choice_index: i64,

    pub player_id: Option<String>,
}

impl SubmitAnswerRequest {
    /// Participant credited for this submission; an absent or empty
    /// `player_id` falls back to the default participant.
    pub fn participant(&self) -> &str {
        match self.player_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => crate::models::domain::session::DEFAULT_PARTICIPANT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_answer_requires_non_empty_id() {
        let request = SubmitAnswerRequest {
            id: "".to_string(),
            choice_index: 1,
            player_id: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn participant_defaults_to_p0() {
        let mut request = SubmitAnswerRequest {
            id: "q1".to_string(),
            choice_index: 2,
            player_id: None,
        };
        assert_eq!(request.participant(), "p0");

        request.player_id = Some("".to_string());
        assert_eq!(request.participant(), "p0");

        request.player_id = Some("overlay".to_string());
        assert_eq!(request.participant(), "overlay");
    }

    #[test]
    fn select_quiz_requires_filename() {
        let request = SelectQuizRequest {
            filename: "".to_string(),
        };
        assert!(request.validate().is_err());

        let request = SelectQuizRequest {
            filename: "capitals.csv".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
