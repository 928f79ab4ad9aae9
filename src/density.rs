use serde::{Deserialize, Serialize};

use crate::model::Question;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Compact,
    Medium,
    Dense,
}

/// Thresholds for classifying how much text a screen has to fit.
/// Lengths are counted in characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityPolicy {
    pub compact_total_below: usize,
    pub compact_average_below: f64,
    pub compact_longest_below: usize,
    pub dense_total_above: usize,
    pub dense_average_above: f64,
    pub dense_longest_above: usize,
    pub dense_question_above: usize,
    pub explanation_compact_below: usize,
    pub explanation_dense_above: usize,
}

impl Default for DensityPolicy {
    fn default() -> Self {
        Self {
            compact_total_below: 150,
            compact_average_below: 20.0,
            compact_longest_below: 35,
            dense_total_above: 400,
            dense_average_above: 40.0,
            dense_longest_above: 80,
            dense_question_above: 200,
            explanation_compact_below: 100,
            explanation_dense_above: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentMetrics {
    pub question_len: usize,
    pub options_len: usize,
    pub average_option_len: f64,
    pub longest_option_len: usize,
    pub shortest_option_len: usize,
}

impl ContentMetrics {
    pub fn of(question: &Question) -> Self {
        let lens: Vec<usize> = question.options.iter().map(|o| o.chars().count()).collect();
        let options_len: usize = lens.iter().sum();
        let average_option_len = if lens.is_empty() {
            0.0
        } else {
            options_len as f64 / lens.len() as f64
        };

        Self {
            question_len: question.text.chars().count(),
            options_len,
            average_option_len,
            longest_option_len: lens.iter().copied().max().unwrap_or(0),
            shortest_option_len: lens.iter().copied().min().unwrap_or(0),
        }
    }

    pub fn total_len(&self) -> usize {
        self.question_len + self.options_len
    }
}

impl DensityPolicy {
    pub fn classify(&self, question: &Question) -> Density {
        let m = ContentMetrics::of(question);
        let total = m.total_len();

        if total < self.compact_total_below
            && m.average_option_len < self.compact_average_below
            && m.longest_option_len < self.compact_longest_below
        {
            Density::Compact
        } else if total > self.dense_total_above
            || m.average_option_len > self.dense_average_above
            || m.longest_option_len > self.dense_longest_above
            || m.question_len > self.dense_question_above
        {
            Density::Dense
        } else {
            Density::Medium
        }
    }

    pub fn classify_explanation(&self, text: &str) -> Density {
        let len = text.chars().count();
        if len > self.explanation_dense_above {
            Density::Dense
        } else if len < self.explanation_compact_below {
            Density::Compact
        } else {
            Density::Medium
        }
    }
}
