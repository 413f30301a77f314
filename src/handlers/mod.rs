pub mod quiz_handler;

pub use quiz_handler::{
    advance, get_question, health_check, list_quizzes, select_quiz, submit_answer, SESSION_COOKIE,
};
