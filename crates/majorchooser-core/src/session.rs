//! Quiz progression.
//!
//! A session walks `Asking(0) .. Asking(n - 1)` and ends in `Finished`,
//! where the recommendation becomes available. Browsing a major is
//! independent of progress and allowed in any state.

use serde::{Deserialize, Serialize};

use crate::affinity::{AffinitySession, MajorAffinity};
use crate::catalog::Catalog;
use crate::error::ChooserError;
use crate::model::{Answer, Major, Question};

/// Where a quiz session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "lowercase")]
pub enum QuizState {
    /// Waiting for the answer to the question at this 0-based index.
    Asking(usize),
    /// Every question has been answered.
    Finished,
}

/// One run through the question bank.
#[derive(Debug, Clone)]
pub struct QuizSession {
    majors: Vec<Major>,
    questions: Vec<Question>,
    affinities: AffinitySession,
    state: QuizState,
    selected_major: Option<u32>,
}

impl QuizSession {
    /// Start a session over a snapshot of the question bank.
    pub fn new(catalog: &Catalog, questions: &[Question]) -> Self {
        let questions = questions.to_vec();
        Self {
            majors: catalog.majors.clone(),
            affinities: AffinitySession::new(&catalog.majors),
            state: initial_state(questions.len()),
            questions,
            selected_major: None,
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == QuizState::Finished
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            QuizState::Asking(i) => self.questions.get(i),
            QuizState::Finished => None,
        }
    }

    /// `(answered, total)`.
    pub fn progress(&self) -> (usize, usize) {
        let answered = match self.state {
            QuizState::Asking(i) => i,
            QuizState::Finished => self.questions.len(),
        };
        (answered, self.questions.len())
    }

    pub fn affinities(&self) -> &AffinitySession {
        &self.affinities
    }

    /// Score the current question and move to the next one.
    pub fn answer(&mut self, answer: Answer) -> Result<QuizState, ChooserError> {
        let QuizState::Asking(i) = self.state else {
            return Err(ChooserError::QuizFinished);
        };

        self.affinities.apply_answer(&self.questions[i], answer);
        tracing::debug!(
            "question {} answered {answer} ({}/{})",
            self.questions[i].id,
            i + 1,
            self.questions.len()
        );

        self.state = if i + 1 < self.questions.len() {
            QuizState::Asking(i + 1)
        } else {
            QuizState::Finished
        };
        Ok(self.state)
    }

    /// The recommended major, once every question has been answered.
    pub fn recommendation(&self) -> Option<&MajorAffinity> {
        match self.state {
            QuizState::Finished => self.affinities.recommend(),
            QuizState::Asking(_) => None,
        }
    }

    /// Browse a major without affecting the quiz.
    pub fn select_major(&mut self, major_id: u32) -> Result<&Major, ChooserError> {
        let major = self
            .majors
            .iter()
            .find(|m| m.id == major_id)
            .ok_or(ChooserError::UnknownMajor(major_id))?;
        self.selected_major = Some(major_id);
        Ok(major)
    }

    pub fn selected_major(&self) -> Option<&Major> {
        let id = self.selected_major?;
        self.majors.iter().find(|m| m.id == id)
    }

    /// Start over: baseline scores, first question, no browsed major.
    pub fn reset(&mut self) {
        self.affinities.reset();
        self.state = initial_state(self.questions.len());
        self.selected_major = None;
    }
}

fn initial_state(question_count: usize) -> QuizState {
    if question_count == 0 {
        QuizState::Finished
    } else {
        QuizState::Asking(0)
    }
}
