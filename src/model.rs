use serde::{Deserialize, Serialize};

/// The correct answer of a question, stored as option text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Single(String),
    Multiple(Vec<String>),
}

impl AnswerKey {
    pub fn values(&self) -> Vec<&str> {
        match self {
            AnswerKey::Single(s) => vec![s.as_str()],
            AnswerKey::Multiple(v) => v.iter().map(|s| s.as_str()).collect(),
        }
    }

    pub fn matches(&self, option: &str) -> bool {
        let option = normalize(option);
        self.values().iter().any(|v| normalize(v) == option)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub answer: AnswerKey,
    pub explanation: Option<String>,
    pub topic_id: Option<String>,
    pub question_id: Option<String>,
}

impl Question {
    pub fn new(text: &str, options: &[&str], answer: &str) -> Self {
        Self {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: AnswerKey::Single(answer.to_string()),
            explanation: None,
            topic_id: None,
            question_id: None,
        }
    }

    pub fn with_explanation(mut self, explanation: &str) -> Self {
        self.explanation = Some(explanation.to_string());
        self
    }

    /// Indices of the options that match the answer key.
    pub fn correct_indices(&self) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, opt)| self.answer.matches(opt))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_correct(&self, idx: usize) -> bool {
        self.options
            .get(idx)
            .map(|opt| self.answer.matches(opt))
            .unwrap_or(false)
    }

    pub fn has_explanation(&self) -> bool {
        self.explanation
            .as_ref()
            .map(|e| !e.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn explanation_text(&self) -> &str {
        self.explanation.as_deref().map(str::trim).unwrap_or("")
    }

    pub fn explanation_chars(&self) -> usize {
        if self.has_explanation() {
            self.explanation_text().chars().count()
        } else {
            0
        }
    }
}

/// Trimmed, case-insensitive form used for answer matching.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Display label for the option at `idx`: A..Z, then 27, 28, ...
pub fn option_label(idx: usize) -> String {
    if idx < 26 {
        ((b'A' + idx as u8) as char).to_string()
    } else {
        (idx + 1).to_string()
    }
}

/// Cosmetic branding shown around the quiz.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_proof: Option<String>,
}

impl Customization {
    /// Fields set in `other` win over fields set in `self`.
    pub fn overlay(self, other: Customization) -> Customization {
        Customization {
            promotion_link: other.promotion_link.or(self.promotion_link),
            quiz_title: other.quiz_title.or(self.quiz_title),
            footer_text: other.footer_text.or(self.footer_text),
            social_proof: other.social_proof.or(self.social_proof),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.promotion_link.is_none()
            && self.quiz_title.is_none()
            && self.footer_text.is_none()
            && self.social_proof.is_none()
    }

    pub fn title(&self) -> &str {
        self.quiz_title.as_deref().unwrap_or("Quiz")
    }
}
