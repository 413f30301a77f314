use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;

/// Participant credited when a submission carries no player id.
pub const DEFAULT_PARTICIPANT: &str = "p0";

/// Builds the question order for a session: the natural `[0, total)` order,
/// shuffled into a fresh permutation when `randomize` is set.
pub fn question_order(total: usize, randomize: bool) -> Vec<usize> {
    question_order_with(total, randomize, &mut rand::thread_rng())
}

pub fn question_order_with<R: Rng>(total: usize, randomize: bool, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..total).collect();
    if randomize {
        order.shuffle(rng);
    }
    order
}

/// Per-session quiz progress: which bank is being played, in what order,
/// how far along the session is, and who has scored what.
///
/// `position` only ever moves forward, one step at a time; the session is
/// finished once it reaches `order.len()`. `answered` caps scoring at one
/// event per question per session, no matter who submits or how often.
#[derive(Clone, Debug)]
pub struct SessionProgression {
    bank_key: String,
    order: Vec<usize>,
    position: usize,
    scores: HashMap<String, u32>,
    answered: HashSet<String>,
}

impl SessionProgression {
    pub fn new(bank_key: &str, total_questions: usize, randomize: bool) -> Self {
        let mut progression = Self {
            bank_key: String::new(),
            order: Vec::new(),
            position: 0,
            scores: HashMap::new(),
            answered: HashSet::new(),
        };
        progression.reset(bank_key, total_questions, randomize);
        progression
    }

    /// Re-initializes the session onto `bank_key`: fresh order, position 0,
    /// scores back to `{"p0": 0}`, no question answered yet.
    pub fn reset(&mut self, bank_key: &str, total_questions: usize, randomize: bool) {
        self.bank_key = bank_key.to_string();
        self.order = question_order(total_questions, randomize);
        self.position = 0;
        self.scores = HashMap::from([(DEFAULT_PARTICIPANT.to_string(), 0)]);
        self.answered = HashSet::new();
    }

    pub fn bank_key(&self) -> &str {
        &self.bank_key
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total_questions(&self) -> usize {
        self.order.len()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.order.len()
    }

    /// Bank position of the current question, `None` once the quiz is over.
    pub fn current_slot(&self) -> Option<usize> {
        self.order.get(self.position).copied()
    }

    /// Moves to the next question, by exactly one. No-op once finished.
    /// Advancing is independent of answering; skipping a question forfeits
    /// its score.
    pub fn advance(&mut self) {
        if self.position < self.order.len() {
            self.position += 1;
        }
    }

    /// Applies one submission outcome. The participant's entry is created at
    /// zero if missing. Credit is given only when the answer is correct and
    /// the question has not been scored before in this session; the question
    /// is marked answered either way, so a wrong first submission consumes
    /// it.
    pub fn record_answer(&mut self, question_id: &str, correct: bool, participant: &str) {
        let score = self.scores.entry(participant.to_string()).or_insert(0);
        if correct && !self.answered.contains(question_id) {
            *score += 1;
        }
        self.answered.insert(question_id.to_string());
    }

    pub fn score_of(&self, participant: &str) -> u32 {
        self.scores.get(participant).copied().unwrap_or(0)
    }

    pub fn scores(&self) -> &HashMap<String, u32> {
        &self.scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn natural_order_is_identity() {
        assert_eq!(question_order(4, false), vec![0, 1, 2, 3]);
        assert_eq!(question_order(0, false), Vec::<usize>::new());
    }

    #[test]
    fn shuffled_order_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(99);
        for total in [1, 2, 7, 32] {
            let mut order = question_order_with(total, true, &mut rng);
            order.sort_unstable();
            assert_eq!(order, (0..total).collect::<Vec<_>>());
        }
    }

    #[test]
    fn new_session_starts_at_zero_with_default_participant() {
        let progression = SessionProgression::new("capitals.csv", 3, false);

        assert_eq!(progression.bank_key(), "capitals.csv");
        assert_eq!(progression.position(), 0);
        assert_eq!(progression.current_slot(), Some(0));
        assert!(!progression.is_finished());
        assert_eq!(progression.score_of(DEFAULT_PARTICIPANT), 0);
        assert_eq!(progression.scores().len(), 1);
    }

    #[test]
    fn advance_is_monotonic_and_clamped() {
        let mut progression = SessionProgression::new("capitals.csv", 2, false);

        progression.advance();
        assert_eq!(progression.position(), 1);
        progression.advance();
        assert_eq!(progression.position(), 2);
        assert!(progression.is_finished());
        assert_eq!(progression.current_slot(), None);

        // Past the end advancing is a no-op
        progression.advance();
        assert_eq!(progression.position(), 2);
    }

    #[test]
    fn scoring_is_idempotent_per_question() {
        let mut progression = SessionProgression::new("capitals.csv", 2, false);

        progression.record_answer("q1", true, DEFAULT_PARTICIPANT);
        assert_eq!(progression.score_of(DEFAULT_PARTICIPANT), 1);

        // Same question again, still correct: no extra credit
        progression.record_answer("q1", true, DEFAULT_PARTICIPANT);
        assert_eq!(progression.score_of(DEFAULT_PARTICIPANT), 1);

        // Not even for another participant
        progression.record_answer("q1", true, "p1");
        assert_eq!(progression.score_of("p1"), 0);
        assert_eq!(progression.scores().len(), 2);
    }

    #[test]
    fn wrong_submission_consumes_the_question() {
        let mut progression = SessionProgression::new("capitals.csv", 2, false);

        progression.record_answer("q1", false, DEFAULT_PARTICIPANT);
        assert_eq!(progression.score_of(DEFAULT_PARTICIPANT), 0);

        progression.record_answer("q1", true, DEFAULT_PARTICIPANT);
        assert_eq!(progression.score_of(DEFAULT_PARTICIPANT), 0);
    }

    #[test]
    fn wrong_answer_still_creates_participant_entry() {
        let mut progression = SessionProgression::new("capitals.csv", 2, false);

        progression.record_answer("q1", false, "latecomer");
        assert_eq!(progression.score_of("latecomer"), 0);
        assert!(progression.scores().contains_key("latecomer"));
    }

    #[test]
    fn reset_clears_scores_order_and_answered_set() {
        let mut progression = SessionProgression::new("a.csv", 3, false);
        progression.record_answer("q1", true, DEFAULT_PARTICIPANT);
        progression.record_answer("q1", true, "p1");
        progression.advance();

        progression.reset("b.csv", 5, false);

        assert_eq!(progression.bank_key(), "b.csv");
        assert_eq!(progression.position(), 0);
        assert_eq!(progression.total_questions(), 5);
        assert_eq!(progression.scores().len(), 1);
        assert_eq!(progression.score_of(DEFAULT_PARTICIPANT), 0);

        // Answered set is fresh: the same question id can score again
        progression.record_answer("q1", true, DEFAULT_PARTICIPANT);
        assert_eq!(progression.score_of(DEFAULT_PARTICIPANT), 1);
    }
}
