//! The question bank with write-through persistence.
//!
//! Questions are held as an id-ordered list plus an id → position index.
//! Every mutation writes the whole bank back under [`QUESTIONS_KEY`] as a
//! JSON object keyed by stringified id:
//!
//! ```json
//! { "1": { "id": 1, "text": "Like coding?", "weights": [5, -2, 0] } }
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::catalog::Catalog;
use crate::error::ChooserError;
use crate::model::Question;
use crate::storage::KeyValueStore;

/// Storage key holding the serialized question bank.
pub const QUESTIONS_KEY: &str = "questions";

/// Placeholder text given to newly added questions.
pub const NEW_QUESTION_TEXT: &str = "New Question";

/// Owns the question collection and is its only writer.
#[derive(Debug)]
pub struct QuestionStore<S> {
    store: S,
    questions: Vec<Question>,
    index: HashMap<u32, usize>,
    major_count: usize,
}

impl<S: KeyValueStore> QuestionStore<S> {
    /// Load the persisted bank, or seed it from the catalog's defaults.
    ///
    /// Persisted data is used as-is; only undecodable records and duplicate
    /// ids are rejected.
    pub fn open(store: S, catalog: &Catalog) -> Result<Self, ChooserError> {
        let questions = match store.get(QUESTIONS_KEY)? {
            Some(raw) => decode_questions(&raw)?,
            None => {
                tracing::debug!(
                    "no stored questions, seeding {} defaults",
                    catalog.questions.len()
                );
                // Keyed by id, so a repeated default id keeps the last record
                let seeded: BTreeMap<u32, Question> = catalog
                    .questions
                    .iter()
                    .map(|q| (q.id, q.clone()))
                    .collect();
                seeded.into_values().collect()
            }
        };

        let major_count = catalog.major_count();
        for q in &questions {
            if q.weights.len() != major_count {
                tracing::warn!(
                    "question {} has {} weights but the catalog has {} majors",
                    q.id,
                    q.weights.len(),
                    major_count
                );
            }
        }

        let index = build_index(&questions)?;
        Ok(Self {
            store,
            questions,
            index,
            major_count,
        })
    }

    /// All questions, ascending by id.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: u32) -> Option<&Question> {
        self.index.get(&id).map(|&pos| &self.questions[pos])
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Append a placeholder question with all-zero weights.
    ///
    /// The new id is one past the current maximum; an empty bank has no
    /// maximum and is rejected.
    pub fn add_question(&mut self) -> Result<u32, ChooserError> {
        let max_id = self
            .questions
            .iter()
            .map(|q| q.id)
            .max()
            .ok_or(ChooserError::EmptyQuestionSet)?;
        let id = max_id
            .checked_add(1)
            .ok_or_else(|| ChooserError::CorruptStore {
                key: QUESTIONS_KEY.to_string(),
                reason: "question id space exhausted".to_string(),
            })?;

        self.index.insert(id, self.questions.len());
        self.questions.push(Question {
            id,
            text: NEW_QUESTION_TEXT.to_string(),
            weights: vec![0.0; self.major_count],
        });
        tracing::info!("added question {id}");

        self.persist()?;
        Ok(id)
    }

    /// Replace the text of a question.
    pub fn update_text(&mut self, id: u32, text: &str) -> Result<(), ChooserError> {
        let pos = self.position(id)?;
        self.questions[pos].text = text.to_string();
        self.persist()
    }

    /// Replace one weight of a question. `index` is 0-based.
    pub fn update_weight(&mut self, id: u32, index: usize, value: f64) -> Result<(), ChooserError> {
        if !value.is_finite() {
            return Err(ChooserError::NonFiniteWeight(value));
        }
        let pos = self.position(id)?;
        let weights = &mut self.questions[pos].weights;
        let len = weights.len();
        let slot = weights
            .get_mut(index)
            .ok_or(ChooserError::WeightIndexOutOfRange { id, index, len })?;
        *slot = value;
        self.persist()
    }

    /// Remove a question and renumber the rest `1..` in their prior order.
    pub fn delete_question(&mut self, id: u32) -> Result<(), ChooserError> {
        let pos = self.position(id)?;
        self.questions.remove(pos);

        for (i, q) in self.questions.iter_mut().enumerate() {
            q.id = i as u32 + 1;
        }
        self.index = build_index(&self.questions)?;
        tracing::info!(
            "deleted question {id}, {} remain",
            self.questions.len()
        );

        self.persist()
    }

    fn position(&self, id: u32) -> Result<usize, ChooserError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(ChooserError::QuestionNotFound(id))
    }

    fn persist(&mut self) -> Result<(), ChooserError> {
        let encoded = encode_questions(&self.questions)?;
        self.store.set(QUESTIONS_KEY, &encoded)?;
        tracing::debug!("persisted {} questions", self.questions.len());
        Ok(())
    }
}

fn decode_questions(raw: &str) -> Result<Vec<Question>, ChooserError> {
    let records: BTreeMap<u32, Question> =
        serde_json::from_str(raw).map_err(|e| ChooserError::CorruptStore {
            key: QUESTIONS_KEY.to_string(),
            reason: e.to_string(),
        })?;

    for (key, q) in &records {
        if *key != q.id {
            tracing::warn!("stored question under key {key} carries id {}", q.id);
        }
    }

    let mut questions: Vec<Question> = records.into_values().collect();
    questions.sort_by_key(|q| q.id);
    Ok(questions)
}

fn encode_questions(questions: &[Question]) -> Result<String, ChooserError> {
    let records: BTreeMap<u32, &Question> = questions.iter().map(|q| (q.id, q)).collect();
    serde_json::to_string(&records).map_err(|e| ChooserError::CorruptStore {
        key: QUESTIONS_KEY.to_string(),
        reason: format!("failed to encode questions: {e}"),
    })
}

fn build_index(questions: &[Question]) -> Result<HashMap<u32, usize>, ChooserError> {
    let mut index = HashMap::with_capacity(questions.len());
    for (pos, q) in questions.iter().enumerate() {
        if index.insert(q.id, pos).is_some() {
            return Err(ChooserError::CorruptStore {
                key: QUESTIONS_KEY.to_string(),
                reason: format!("duplicate question id {}", q.id),
            });
        }
    }
    Ok(index)
}
