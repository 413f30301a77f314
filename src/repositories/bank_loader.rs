use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::CHOICE_COUNT;
use crate::models::domain::{Question, QuestionBank};

/// Columns every source must carry. Anything else passes through into
/// `Question::extra`.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "id",
    "question",
    "choice1",
    "choice2",
    "choice3",
    "choice4",
    "answer",
    "explanation",
];

pub fn load_bank(path: &Path) -> AppResult<QuestionBank> {
    let file = File::open(path)?;
    read_bank(file)
}

/// Parses a CSV source into a validated bank. The header schema is checked
/// before any row; each row is then validated fail-fast, and the first bad
/// row rejects the whole source. Row numbers in errors are 1-based over the
/// data rows, matching what an editor shows below the header line.
pub fn read_bank<R: Read>(source: R) -> AppResult<QuestionBank> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers()?.clone();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::MissingColumns(missing.join(", ")));
    }

    let mut questions = Vec::new();
    let mut seen_ids = HashSet::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|err| AppError::InvalidRow {
            row,
            reason: err.to_string(),
        })?;
        let question =
            parse_row(&headers, &record).map_err(|reason| AppError::InvalidRow { row, reason })?;
        if !seen_ids.insert(question.id.clone()) {
            return Err(AppError::InvalidRow {
                row,
                reason: format!("duplicate id '{}'", question.id),
            });
        }
        questions.push(question);
    }

    QuestionBank::new(questions)
}

fn parse_row(headers: &StringRecord, record: &StringRecord) -> Result<Question, String> {
    let field = |name: &str| -> Result<String, String> {
        let position = headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| format!("{name} column is missing"))?;
        let value = record.get(position).unwrap_or("").trim();
        if value.is_empty() {
            Err(format!("{name} is empty"))
        } else {
            Ok(value.to_string())
        }
    };

    let id = field("id")?;
    let text = field("question")?;

    let mut choices = Vec::with_capacity(CHOICE_COUNT);
    for number in 1..=CHOICE_COUNT {
        choices.push(field(&format!("choice{number}"))?);
    }
    let choices: [String; CHOICE_COUNT] = choices
        .try_into()
        .map_err(|_| "exactly four choices are required".to_string())?;

    let answer = field("answer")?;
    let correct_choice: u8 = answer
        .parse()
        .map_err(|_| "answer must be an integer between 1 and 4".to_string())?;
    if !(1..=4).contains(&correct_choice) {
        return Err("answer must be an integer between 1 and 4".to_string());
    }

    let explanation = field("explanation")?;

    let mut extra = BTreeMap::new();
    for (position, header) in headers.iter().enumerate() {
        if !REQUIRED_COLUMNS.contains(&header) {
            extra.insert(
                header.to_string(),
                record.get(position).unwrap_or("").to_string(),
            );
        }
    }

    Ok(Question {
        id,
        text,
        choices,
        correct_choice,
        explanation,
        extra,
    })
}
