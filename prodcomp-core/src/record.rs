use serde::{Deserialize, Serialize};

/// Difficulty value reserved for practice items.
pub const PRACTICE_DIFFICULTY: u32 = 0;

/// One stimulus entry of the manifest.
///
/// Distractors are only needed when the record ends up in a comprehension
/// block; production trials use `label` and `target` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub label: String,
    pub difficulty: u32,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distractor1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distractor2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distractor3: Option<String>,
}

impl TrialRecord {
    pub fn is_practice(&self) -> bool {
        self.difficulty == PRACTICE_DIFFICULTY
    }

    /// The three distractors, or `None` if any of them is missing.
    pub fn distractors(&self) -> Option<[&str; 3]> {
        Some([
            self.distractor1.as_deref()?,
            self.distractor2.as_deref()?,
            self.distractor3.as_deref()?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_only_record_has_no_distractors() {
        let record: TrialRecord = serde_json::from_str(
            r#"{"label": "ball", "difficulty": 2, "target": "img/ball.png"}"#,
        )
        .unwrap();
        assert!(!record.is_practice());
        assert_eq!(record.distractors(), None);
    }

    #[test]
    fn partial_distractors_count_as_missing() {
        let record: TrialRecord = serde_json::from_str(
            r#"{"label": "cup", "difficulty": 0, "target": "cup.png",
                "distractor1": "a.png", "distractor2": "b.png"}"#,
        )
        .unwrap();
        assert!(record.is_practice());
        assert!(record.distractors().is_none());
    }
}
