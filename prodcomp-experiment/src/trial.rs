//! Trial construction and scoring.
//!
//! Index convention: the runtime reports the chosen button as a 0-based
//! index and scoring compares against the 0-based `correct_index`. The
//! `correct_answer` column written to the data is 1-based.

use prodcomp_core::{GroupOrder, ResponseOutcome, ResponseRecord, TaskKind, TrialRecord};
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

/// Images offered on a comprehension trial.
pub const CHOICE_COUNT: usize = 4;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrialError {
    #[error("record `{label}` cannot be a comprehension trial: it lacks three distractors")]
    MissingDistractor { label: String },
}

/// Four-alternative forced choice.
#[derive(Debug, Clone, PartialEq)]
pub struct ComprehensionTrial {
    pub record: TrialRecord,
    /// Presentation order after shuffling.
    pub images: [String; CHOICE_COUNT],
    /// 0-based position of the target in `images`.
    pub correct_index: usize,
}

impl ComprehensionTrial {
    pub fn new<R: Rng + ?Sized>(record: &TrialRecord, rng: &mut R) -> Result<Self, TrialError> {
        let [d1, d2, d3] = record
            .distractors()
            .ok_or_else(|| TrialError::MissingDistractor {
                label: record.label.clone(),
            })?;

        let mut images = [record.target.as_str(), d1, d2, d3].map(str::to_string);
        images.shuffle(rng);
        let correct_index = images
            .iter()
            .position(|image| *image == record.target)
            .unwrap_or_default();

        Ok(Self {
            record: record.clone(),
            images,
            correct_index,
        })
    }

    pub fn prompt(&self) -> String {
        format!("Which image shows: \"{}\"?", self.record.label)
    }

    /// 1-based position of the target, as reported in the data.
    pub fn correct_answer(&self) -> usize {
        self.correct_index + 1
    }

    pub fn score(&self, participant_index: usize) -> bool {
        score_choice(self.correct_index, participant_index)
    }

    pub fn record_response(
        &self,
        participant_index: usize,
        trial_index: usize,
        group_order: GroupOrder,
        rt_ms: Option<u64>,
    ) -> ResponseRecord {
        ResponseRecord {
            trial_index,
            task: TaskKind::Comprehension,
            label: self.record.label.clone(),
            difficulty: self.record.difficulty,
            target_image: self.record.target.clone(),
            group_order,
            rt_ms,
            correct: self.score(participant_index),
            outcome: ResponseOutcome::Comprehension {
                presented_images: self.images.to_vec(),
                correct_answer: self.correct_answer(),
                response: participant_index,
            },
        }
    }
}

/// Both indices 0-based.
pub fn score_choice(correct_index: usize, participant_index: usize) -> bool {
    participant_index == correct_index
}

/// Free naming of a single image.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionTrial {
    pub record: TrialRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionScore {
    pub correct: bool,
    /// Response lower-cased and trimmed.
    pub normalized_response: String,
    /// Last `/`-separated alternative of the normalized response.
    pub final_response: String,
    /// Label lower-cased and trimmed.
    pub expected: String,
}

impl ProductionTrial {
    pub fn new(record: &TrialRecord) -> Self {
        Self {
            record: record.clone(),
        }
    }

    pub fn prompt(&self) -> &'static str {
        "What do you see in this image?"
    }

    pub fn score(&self, raw: &str) -> ProductionScore {
        score_production(&self.record.label, raw)
    }

    pub fn record_response(
        &self,
        raw: &str,
        trial_index: usize,
        group_order: GroupOrder,
        rt_ms: Option<u64>,
    ) -> ResponseRecord {
        let score = self.score(raw);
        ResponseRecord {
            trial_index,
            task: TaskKind::Production,
            label: self.record.label.clone(),
            difficulty: self.record.difficulty,
            target_image: self.record.target.clone(),
            group_order,
            rt_ms,
            correct: score.correct,
            outcome: ResponseOutcome::Production {
                response: raw.to_string(),
                participant_response: score.normalized_response,
                final_response: score.final_response,
                correct_response: score.expected,
            },
        }
    }
}

/// Exact match of the last `/`-separated alternative against the label,
/// both lower-cased and trimmed.
pub fn score_production(label: &str, raw: &str) -> ProductionScore {
    let normalized_response = normalize(raw);
    let final_response = normalized_response
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();
    let expected = normalize(label);
    ProductionScore {
        correct: final_response == expected,
        normalized_response,
        final_response,
        expected,
    }
}

fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

/// A trial ready to be shown, with everything its scorer needs.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentedTrial {
    Comprehension(ComprehensionTrial),
    Production(ProductionTrial),
}

impl PresentedTrial {
    pub fn build<R: Rng + ?Sized>(
        task: TaskKind,
        record: &TrialRecord,
        rng: &mut R,
    ) -> Result<Self, TrialError> {
        Ok(match task {
            TaskKind::Comprehension => {
                PresentedTrial::Comprehension(ComprehensionTrial::new(record, rng)?)
            }
            TaskKind::Production => PresentedTrial::Production(ProductionTrial::new(record)),
        })
    }

    pub fn task(&self) -> TaskKind {
        match self {
            PresentedTrial::Comprehension(_) => TaskKind::Comprehension,
            PresentedTrial::Production(_) => TaskKind::Production,
        }
    }

    pub fn record(&self) -> &TrialRecord {
        match self {
            PresentedTrial::Comprehension(t) => &t.record,
            PresentedTrial::Production(t) => &t.record,
        }
    }
}
