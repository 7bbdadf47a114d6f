//! Per-major affinity scoring.
//!
//! Every major starts at [`BASELINE_AFFINITY`]. Answering a question moves
//! each major's score by that question's weight for the major: added on
//! yes, subtracted on no. The recommendation is the first major holding
//! the maximum score.

use crate::model::{Answer, Major, Question};

/// Starting affinity for every major.
pub const BASELINE_AFFINITY: f64 = 10.0;

/// A major together with its running score.
#[derive(Debug, Clone, PartialEq)]
pub struct MajorAffinity {
    pub major: Major,
    pub affinity: f64,
}

/// The affinity scores of one quiz session, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct AffinitySession {
    entries: Vec<MajorAffinity>,
}

impl AffinitySession {
    /// Start a session with every major at the baseline.
    pub fn new(majors: &[Major]) -> Self {
        let entries = majors
            .iter()
            .map(|major| MajorAffinity {
                major: major.clone(),
                affinity: BASELINE_AFFINITY,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[MajorAffinity] {
        &self.entries
    }

    /// Score of the major with the given id.
    pub fn affinity_of(&self, major_id: u32) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.major.id == major_id)
            .map(|e| e.affinity)
    }

    /// Apply one answer to every major at once.
    ///
    /// Weights missing for a major count as zero.
    pub fn apply_answer(&mut self, question: &Question, answer: Answer) {
        if question.weights.len() != self.entries.len() {
            tracing::warn!(
                "question {} has {} weights for {} majors, missing weights count as 0",
                question.id,
                question.weights.len(),
                self.entries.len()
            );
        }

        let sign = answer.sign();
        for entry in &mut self.entries {
            entry.affinity += sign * question.weight_for(entry.major.id);
        }
    }

    /// The first major holding the highest score.
    ///
    /// A later major only wins with a strictly greater score. Returns `None`
    /// for a session without majors.
    pub fn recommend(&self) -> Option<&MajorAffinity> {
        let mut best: Option<&MajorAffinity> = None;
        for entry in &self.entries {
            match best {
                Some(current) if entry.affinity > current.affinity => best = Some(entry),
                None => best = Some(entry),
                _ => {}
            }
        }
        best
    }

    /// Entries sorted by descending score, ties in catalog order.
    pub fn ranked(&self) -> Vec<&MajorAffinity> {
        let mut ranked: Vec<&MajorAffinity> = self.entries.iter().collect();
        // sort_by is stable, so equal scores keep catalog order
        ranked.sort_by(|a, b| b.affinity.total_cmp(&a.affinity));
        ranked
    }

    /// Put every score back to the baseline.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.affinity = BASELINE_AFFINITY;
        }
    }
}
