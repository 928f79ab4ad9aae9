use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::density::DensityPolicy;

fn default_hold_ms() -> u64 {
    4000
}

fn default_char_ms() -> u64 {
    50
}

fn default_pause_ms() -> u64 {
    3000
}

/// How the explanation screen presents its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ExplanationMode {
    /// Full text at once, then `hold_ms` before moving on.
    Instant {
        #[serde(default = "default_hold_ms")]
        hold_ms: u64,
    },
    /// One character every `char_ms`, then `pause_ms` once complete.
    Typed {
        #[serde(default = "default_char_ms")]
        char_ms: u64,
        #[serde(default = "default_pause_ms")]
        pause_ms: u64,
    },
}

impl ExplanationMode {
    pub fn instant() -> Self {
        ExplanationMode::Instant {
            hold_ms: default_hold_ms(),
        }
    }

    pub fn typed() -> Self {
        ExplanationMode::Typed {
            char_ms: default_char_ms(),
            pause_ms: default_pause_ms(),
        }
    }
}

/// What to present when no questions were supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OnEmpty {
    /// Play the built-in sample quiz.
    Fallback,
    /// Refuse to start and ask for a quiz file.
    Exit,
    /// Show an empty "No questions found" screen.
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 10s countdown, typed explanations.
    Classic,
    /// 5s countdown, instant explanations, interstitial between questions.
    Quick,
    /// 25s countdown, slower reveals, longer answer hold.
    Marathon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhasePolicy {
    pub timer_secs: u64,
    pub tick_ms: u64,
    pub reveal_ms: u64,
    pub answer_hold_ms: u64,
    pub explanation: ExplanationMode,
    pub transition_ms: u64,
    pub on_empty: OnEmpty,
    pub density: DensityPolicy,
}

impl Default for PhasePolicy {
    fn default() -> Self {
        Self::preset(Preset::Classic)
    }
}

impl PhasePolicy {
    pub fn preset(preset: Preset) -> Self {
        let base = Self {
            timer_secs: 10,
            tick_ms: 100,
            reveal_ms: 700,
            answer_hold_ms: 2000,
            explanation: ExplanationMode::typed(),
            transition_ms: 0,
            on_empty: OnEmpty::Fallback,
            density: DensityPolicy::default(),
        };

        match preset {
            Preset::Classic => base,
            Preset::Quick => Self {
                timer_secs: 5,
                explanation: ExplanationMode::instant(),
                transition_ms: 1000,
                ..base
            },
            Preset::Marathon => Self {
                timer_secs: 25,
                reveal_ms: 800,
                answer_hold_ms: 3000,
                ..base
            },
        }
    }

    /// Apply a YAML document on top of `self`. Keys absent from the document
    /// keep their current values.
    pub fn overlay_yaml(&self, yaml: &str) -> Result<Self, String> {
        let overrides: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| format!("Invalid config: {}", e))?;
        if overrides.is_null() {
            return Ok(self.clone());
        }
        if !overrides.is_mapping() {
            return Err("Invalid config: expected a mapping at the top level".to_string());
        }

        let mut merged =
            serde_yaml::to_value(self).map_err(|e| format!("Cannot encode policy: {}", e))?;
        merge_yaml(&mut merged, overrides);

        let policy: PhasePolicy =
            serde_yaml::from_value(merged).map_err(|e| format!("Invalid config: {}", e))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn overlay_file(&self, path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
        self.overlay_yaml(&content)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.tick_ms == 0 {
            return Err("tick_ms must be greater than zero".to_string());
        }
        if let ExplanationMode::Typed { char_ms: 0, .. } = self.explanation {
            return Err("explanation char_ms must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn timer_ms(&self) -> u64 {
        self.timer_secs * 1000
    }
}

fn merge_yaml(base: &mut serde_yaml::Value, overrides: serde_yaml::Value) {
    match (base, overrides) {
        (serde_yaml::Value::Mapping(base_map), serde_yaml::Value::Mapping(over_map)) => {
            for (key, value) in over_map {
                // A new explanation mode replaces the old variant wholesale.
                let replace = key.as_str() == Some("explanation")
                    && value.get("mode").is_some()
                    && base_map.get(&key).and_then(|v| v.get("mode")) != value.get("mode");
                match base_map.get_mut(&key) {
                    Some(existing) if !replace => merge_yaml(existing, value),
                    _ => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
