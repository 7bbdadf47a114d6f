//! Major catalog and default question bank.
//!
//! The built-in catalog is compiled in. An alternative catalog can be
//! loaded from a TOML file and checked with [`validate_catalog`].

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Major, MajorDescription, Question};

/// The set of majors plus the questions used to seed an empty store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Majors in catalog order; `id` is expected to equal position + 1.
    pub majors: Vec<Major>,
    /// Default question bank.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Catalog {
    pub fn new(majors: Vec<Major>, questions: Vec<Question>) -> Self {
        Self { majors, questions }
    }

    /// The catalog shipped with majorchooser.
    pub fn builtin() -> Self {
        let majors = BUILTIN_MAJORS
            .iter()
            .enumerate()
            .map(|(i, seed)| Major {
                id: i as u32 + 1,
                name: seed.name.to_string(),
                college: seed.college.to_string(),
                description: MajorDescription {
                    academics: seed.academics.to_string(),
                    experience: seed.experience.to_string(),
                    opportunities: seed.opportunities.to_string(),
                },
            })
            .collect();

        let questions = BUILTIN_QUESTIONS
            .iter()
            .enumerate()
            .map(|(i, (text, weights))| Question {
                id: i as u32 + 1,
                text: text.to_string(),
                weights: weights.to_vec(),
            })
            .collect();

        Self { majors, questions }
    }

    /// Number of majors, i.e. the expected length of every weight vector.
    pub fn major_count(&self) -> usize {
        self.majors.len()
    }

    /// Look up a major by id.
    pub fn major(&self, id: u32) -> Option<&Major> {
        self.majors.iter().find(|m| m.id == id)
    }

    /// Serialize to the TOML layout accepted by [`parse_catalog_str`].
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize catalog")
    }
}

struct MajorSeed {
    name: &'static str,
    college: &'static str,
    academics: &'static str,
    experience: &'static str,
    opportunities: &'static str,
}

const BUILTIN_MAJORS: &[MajorSeed] = &[
    MajorSeed {
        name: "Computer Science",
        college: "College of Engineering",
        academics: "Programming, data structures, algorithms, systems and theory of computation.",
        experience: "Team software projects, hackathons and research with faculty labs.",
        opportunities: "Software engineer, data scientist, security analyst, researcher.",
    },
    MajorSeed {
        name: "Psychology",
        college: "College of Liberal Arts",
        academics: "Cognition, development, social behavior, statistics and research methods.",
        experience: "Running studies in campus labs and supervised field placements.",
        opportunities: "Counselor, UX researcher, HR specialist, graduate study in clinical work.",
    },
    MajorSeed {
        name: "Business Admin",
        college: "School of Business",
        academics: "Accounting, finance, marketing, management and business law.",
        experience: "Case competitions, student-run ventures and corporate internships.",
        opportunities: "Analyst, consultant, product manager, entrepreneur.",
    },
    MajorSeed {
        name: "Biology",
        college: "College of Natural Sciences",
        academics: "Genetics, ecology, cell and molecular biology, chemistry.",
        experience: "Wet-lab courses, field work and undergraduate research.",
        opportunities: "Lab researcher, pre-med, environmental consultant, biotech.",
    },
    MajorSeed {
        name: "Mechanical Engineering",
        college: "College of Engineering",
        academics: "Statics, dynamics, thermodynamics, materials and design.",
        experience: "Machine shop projects, design teams and co-op rotations.",
        opportunities: "Design engineer, manufacturing, robotics, energy systems.",
    },
    MajorSeed {
        name: "Graphic Design",
        college: "School of Art and Design",
        academics: "Typography, color theory, illustration and interaction design.",
        experience: "Studio critiques, portfolio reviews and client projects.",
        opportunities: "Brand designer, art director, UI designer, illustrator.",
    },
];

const BUILTIN_QUESTIONS: &[(&str, [f64; 6])] = &[
    (
        "Do you enjoy solving puzzles with logic and code?",
        [5.0, -1.0, 0.0, 0.0, 2.0, -1.0],
    ),
    (
        "Are you curious about why people think and behave the way they do?",
        [-1.0, 5.0, 1.0, 1.0, -1.0, 0.0],
    ),
    (
        "Would you like to lead a team or start your own company?",
        [0.0, 0.0, 5.0, -1.0, 0.0, 1.0],
    ),
    (
        "Do you like spending time in a lab running experiments?",
        [0.0, 1.0, -2.0, 5.0, 2.0, -2.0],
    ),
    (
        "Do you enjoy building or repairing physical things?",
        [1.0, -1.0, 0.0, 0.0, 5.0, 1.0],
    ),
    (
        "Do you express yourself through drawing or visual media?",
        [0.0, 0.0, -1.0, -1.0, 0.0, 5.0],
    ),
    (
        "Are you comfortable with a lot of math?",
        [3.0, -1.0, 1.0, 1.0, 4.0, -2.0],
    ),
    (
        "Do you prefer working with people over working with machines?",
        [-2.0, 4.0, 3.0, 1.0, -2.0, 0.0],
    ),
];

/// Parse a catalog TOML file.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a catalog from a TOML string (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let catalog: Catalog = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    anyhow::ensure!(
        !catalog.majors.is_empty(),
        "catalog {} defines no majors",
        source_path.display()
    );

    Ok(catalog)
}

/// A warning from catalog or question validation.
#[derive(Debug, Clone)]
pub struct CatalogWarning {
    /// The question id (if applicable).
    pub question_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for problems that silently skew scoring.
pub fn validate_catalog(catalog: &Catalog) -> Vec<CatalogWarning> {
    let mut warnings = Vec::new();

    // Weight lookups are positional, so ids must match positions
    let mut seen_majors = HashSet::new();
    for (i, major) in catalog.majors.iter().enumerate() {
        if !seen_majors.insert(major.id) {
            warnings.push(CatalogWarning {
                question_id: None,
                message: format!("duplicate major id: {}", major.id),
            });
        } else if major.id as usize != i + 1 {
            warnings.push(CatalogWarning {
                question_id: None,
                message: format!(
                    "major '{}' has id {} but sits at position {}",
                    major.name,
                    major.id,
                    i + 1
                ),
            });
        }
    }

    let mut seen_questions = HashSet::new();
    for q in &catalog.questions {
        if !seen_questions.insert(q.id) {
            warnings.push(CatalogWarning {
                question_id: Some(q.id),
                message: format!("duplicate question id: {}", q.id),
            });
        }
    }

    warnings.extend(validate_questions(&catalog.questions, catalog.major_count()));
    warnings
}

/// Check question records against the catalog's major count.
pub fn validate_questions(questions: &[Question], major_count: usize) -> Vec<CatalogWarning> {
    let mut warnings = Vec::new();

    for q in questions {
        if q.weights.len() != major_count {
            warnings.push(CatalogWarning {
                question_id: Some(q.id),
                message: format!(
                    "has {} weights but the catalog has {} majors",
                    q.weights.len(),
                    major_count
                ),
            });
        }
        if q.weights.iter().any(|w| !w.is_finite()) {
            warnings.push(CatalogWarning {
                question_id: Some(q.id),
                message: "contains a non-finite weight".into(),
            });
        }
        if q.text.trim().is_empty() {
            warnings.push(CatalogWarning {
                question_id: Some(q.id),
                message: "text is empty".into(),
            });
        }
    }

    warnings
}
