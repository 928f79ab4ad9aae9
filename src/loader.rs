use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::LoadError;
use crate::model::{normalize, AnswerKey, Question};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
}

/// Pick the input format from the extension, falling back to the first
/// non-blank character of the content.
pub fn detect_format(path: &Path, content: &str) -> Format {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => Format::Json,
        Some("csv") => Format::Csv,
        _ => {
            let first = content.trim_start_matches('\u{feff}').trim_start().chars().next();
            if first == Some('[') {
                Format::Json
            } else {
                Format::Csv
            }
        }
    }
}

pub fn load_file(path: &Path) -> Result<Vec<Question>, LoadError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| LoadError::Io(format!("Cannot read quiz file {}: {}", path.display(), e)))?;
    let format = detect_format(path, &content);
    let questions = parse(&content, format)?;
    tracing::info!(
        path = %path.display(),
        ?format,
        questions = questions.len(),
        "quiz loaded"
    );
    Ok(questions)
}

pub fn parse(content: &str, format: Format) -> Result<Vec<Question>, LoadError> {
    match format {
        Format::Json => parse_json(content),
        Format::Csv => parse_csv(content),
    }
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    answer: Option<Value>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    topic_id: Option<Value>,
    #[serde(default)]
    question_id: Option<Value>,
}

pub fn parse_json(content: &str) -> Result<Vec<Question>, LoadError> {
    let raw: Vec<RawQuestion> = serde_json::from_str(content.trim_start_matches('\u{feff}'))
        .map_err(|e| {
            LoadError::Parse(format!(
                "Could not parse JSON ({}). Expected an array of question objects.",
                e
            ))
        })?;

    if raw.is_empty() {
        return Err(LoadError::Empty);
    }

    raw.into_iter()
        .enumerate()
        .map(|(i, r)| json_question(r, i + 1))
        .collect()
}

fn json_question(raw: RawQuestion, number: usize) -> Result<Question, LoadError> {
    let text = raw
        .question
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(LoadError::MissingField {
            question: number,
            field: "question",
        })?;

    let columns = raw.options.ok_or(LoadError::MissingField {
        question: number,
        field: "options",
    })?;
    let options = non_empty_options(&columns, number)?;

    let answer = match raw.answer {
        Some(Value::String(s)) => AnswerKey::Single(match_option(&s, &columns, number)?),
        Some(Value::Number(n)) => {
            AnswerKey::Single(match_option(&n.to_string(), &columns, number)?)
        }
        Some(Value::Array(items)) => {
            let mut resolved = Vec::new();
            for item in items {
                let raw_answer = match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                resolved.push(match_option(&raw_answer, &columns, number)?);
            }
            if resolved.is_empty() {
                return Err(LoadError::MissingField {
                    question: number,
                    field: "answer",
                });
            }
            AnswerKey::Multiple(resolved)
        }
        _ => {
            return Err(LoadError::MissingField {
                question: number,
                field: "answer",
            })
        }
    };

    Ok(Question {
        text,
        options,
        answer,
        explanation: clean(raw.explanation),
        topic_id: raw.topic_id.and_then(id_string),
        question_id: raw.question_id.and_then(id_string),
    })
}

fn id_string(v: Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => clean(Some(s)),
        other => Some(other.to_string()),
    }
}

fn clean(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn non_empty_options(columns: &[String], row: usize) -> Result<Vec<String>, LoadError> {
    let options: Vec<String> = columns
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(|o| o.to_string())
        .collect();
    if options.len() < 2 {
        return Err(LoadError::InsufficientOptions {
            row,
            found: options.len(),
        });
    }
    Ok(options)
}

/// Find the option whose text matches `raw`, ignoring case and surrounding
/// whitespace.
pub fn match_option(raw: &str, columns: &[String], row: usize) -> Result<String, LoadError> {
    let wanted = normalize(raw);
    columns
        .iter()
        .find(|o| !o.trim().is_empty() && normalize(o) == wanted)
        .map(|o| o.trim().to_string())
        .ok_or_else(|| LoadError::UnresolvedAnswer {
            row,
            answer: raw.trim().to_string(),
        })
}

/// Resolve a CSV `correct_answer`: a 1-based position among the option
/// columns when it is an integer in range, otherwise literal option text.
pub fn resolve_answer(raw: &str, columns: &[String], row: usize) -> Result<String, LoadError> {
    if let Ok(pos) = raw.trim().parse::<usize>() {
        if let Some(opt) = pos.checked_sub(1).and_then(|i| columns.get(i)) {
            if !opt.trim().is_empty() {
                return Ok(opt.trim().to_string());
            }
        }
    }
    match_option(raw, columns, row)
}

const OPTION_COLUMNS: [&str; 4] = ["option_1", "option_2", "option_3", "option_4"];

struct CsvColumns {
    question_text: usize,
    options: Vec<Option<usize>>,
    correct_answer: usize,
    explanation: Option<usize>,
    topic_id: Option<usize>,
    question_id: Option<usize>,
}

impl CsvColumns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();
        let find = |name: &str| names.iter().position(|h| h == name);
        let require = |name: &str| find(name).ok_or_else(|| LoadError::MissingColumn(name.to_string()));

        let question_text = require("question_text")?;
        require("option_1")?;
        require("option_2")?;
        let correct_answer = require("correct_answer")?;
        let options: Vec<Option<usize>> = OPTION_COLUMNS.iter().map(|c| find(*c)).collect();

        Ok(Self {
            question_text,
            options,
            correct_answer,
            explanation: find("explanation"),
            topic_id: find("topic_id"),
            question_id: find("question_id"),
        })
    }

    fn question(&self, record: &csv::StringRecord, row: usize) -> Result<Question, LoadError> {
        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();
        let optional = |idx: Option<usize>| clean(idx.map(field));

        let text = field(self.question_text);
        if text.is_empty() {
            return Err(LoadError::MissingField {
                question: row,
                field: "question_text",
            });
        }

        // Keep column positions so a numeric answer refers to option_N.
        let columns: Vec<String> = self
            .options
            .iter()
            .map(|idx| idx.map(field).unwrap_or_default())
            .collect();
        let options = non_empty_options(&columns, row)?;

        let raw_answer = field(self.correct_answer);
        if raw_answer.is_empty() {
            return Err(LoadError::MissingField {
                question: row,
                field: "correct_answer",
            });
        }
        let answer = resolve_answer(&raw_answer, &columns, row)?;

        Ok(Question {
            text,
            options,
            answer: AnswerKey::Single(answer),
            explanation: optional(self.explanation),
            topic_id: optional(self.topic_id),
            question_id: optional(self.question_id),
        })
    }
}

pub fn parse_csv(content: &str) -> Result<Vec<Question>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Parse(format!("Could not read CSV header: {}", e)))?
        .clone();
    let columns = CsvColumns::locate(&headers)?;

    let mut questions = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record =
            record.map_err(|e| LoadError::Parse(format!("Malformed CSV row {}: {}", row, e)))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        questions.push(columns.question(&record, row)?);
    }

    if questions.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(questions)
}
