//! majorchooser-core: question store, affinity scoring and quiz flow.
//!
//! This crate holds the data model, the persisted question bank and the
//! scoring logic that the `majorchooser` CLI builds on.

pub mod affinity;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod questions;
pub mod session;
pub mod storage;

pub use affinity::{AffinitySession, MajorAffinity, BASELINE_AFFINITY};
pub use catalog::Catalog;
pub use config::{load_config_from, ChooserConfig};
pub use error::{ChooserError, StorageError};
pub use model::{Answer, Major, MajorDescription, Question};
pub use questions::QuestionStore;
pub use session::{QuizSession, QuizState};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
