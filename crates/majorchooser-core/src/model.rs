//! Core data model types for majorchooser.
//!
//! Majors come from a static catalog; questions are persisted records whose
//! weight vectors are positionally aligned to major ids (`weights[id - 1]`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A catalog entry describing one college major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Major {
    /// 1-based id, also the position (`id - 1`) in every question's weights.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// College or school offering the major.
    pub college: String,
    /// Long-form description shown when the major is browsed.
    pub description: MajorDescription,
}

/// Structured description of a major.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MajorDescription {
    #[serde(default)]
    pub academics: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub opportunities: String,
}

/// A yes/no quiz question with one signed weight per major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique id, dense `1..=N` after any delete.
    pub id: u32,
    /// Prompt shown to the user.
    pub text: String,
    /// Per-major weights, `weights[major.id - 1]`.
    #[serde(default)]
    pub weights: Vec<f64>,
}

impl Question {
    /// Weight applied to the major with the given id.
    ///
    /// Missing positions (and the invalid id 0) weigh nothing.
    pub fn weight_for(&self, major_id: u32) -> f64 {
        let Some(index) = (major_id as usize).checked_sub(1) else {
            return 0.0;
        };
        self.weights.get(index).copied().unwrap_or(0.0)
    }
}

/// The user's answer to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// `+1` for yes, `-1` for no.
    pub fn sign(self) -> f64 {
        match self {
            Answer::Yes => 1.0,
            Answer::No => -1.0,
        }
    }
}

impl From<bool> for Answer {
    fn from(yes: bool) -> Self {
        if yes {
            Answer::Yes
        } else {
            Answer::No
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Yes => write!(f, "yes"),
            Answer::No => write!(f, "no"),
        }
    }
}

impl FromStr for Answer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(Answer::Yes),
            "no" | "n" | "false" => Ok(Answer::No),
            other => Err(format!("unknown answer: '{other}' (expected yes or no)")),
        }
    }
}
