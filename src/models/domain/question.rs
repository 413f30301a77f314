use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of choices every question carries; choices are 1-indexed in every
/// external-facing payload.
pub const CHOICE_COUNT: usize = 4;

/// One validated quiz item. Instances are only built by the bank loader and
/// never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub choices: [String; CHOICE_COUNT],
    pub correct_choice: u8,
    pub explanation: String,
    /// Source columns outside the required schema, preserved verbatim.
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl Question {
    pub fn is_correct(&self, choice: u8) -> bool {
        self.correct_choice == choice
    }
}
