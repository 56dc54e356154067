use crate::task::{GroupOrder, TaskKind};
use serde::{Deserialize, Serialize};

/// Recorded result per completed trial.
///
/// Serialized flat, one JSON object per trial, so the logging endpoint and any
/// export see the same columns for both tasks plus the task-specific ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub trial_index: usize,
    pub task: TaskKind,
    pub label: String,
    pub difficulty: u32,
    pub target_image: String,
    pub group_order: GroupOrder,
    pub rt_ms: Option<u64>,
    pub correct: bool,
    #[serde(flatten)]
    pub outcome: ResponseOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseOutcome {
    Comprehension {
        presented_images: Vec<String>,
        /// 1-based position of the target among `presented_images`.
        correct_answer: usize,
        /// 0-based button index the participant chose.
        response: usize,
    },
    Production {
        /// Raw text as typed.
        response: String,
        /// Lower-cased and trimmed.
        participant_response: String,
        /// Last `/`-separated alternative of `participant_response`.
        final_response: String,
        correct_response: String,
    },
}

impl ResponseRecord {
    pub fn is_practice(&self) -> bool {
        self.difficulty == crate::PRACTICE_DIFFICULTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn comprehension_record_serializes_flat() {
        let record = ResponseRecord {
            trial_index: 4,
            task: TaskKind::Comprehension,
            label: "cat".into(),
            difficulty: 1,
            target_image: "cat.png".into(),
            group_order: GroupOrder::CP,
            rt_ms: Some(812),
            correct: true,
            outcome: ResponseOutcome::Comprehension {
                presented_images: vec!["dog.png".into(), "cat.png".into()],
                correct_answer: 2,
                response: 1,
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["task"], "comprehension");
        assert_eq!(json["correct_answer"], 2);
        assert_eq!(json["response"], 1);
        assert_eq!(json["group_order"], "CP");
        assert!(json.get("outcome").is_none());
    }

    #[test]
    fn production_record_reads_back() {
        let json = r#"{
            "trial_index": 9, "task": "production", "label": "Dog",
            "difficulty": 0, "target_image": "dog.png", "group_order": "PC",
            "rt_ms": null, "correct": true, "response": " DOG ",
            "participant_response": "dog", "final_response": "dog",
            "correct_response": "dog"
        }"#;
        let record: ResponseRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_practice());
        match &record.outcome {
            ResponseOutcome::Production { final_response, .. } => {
                assert_eq!(final_response, "dog")
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        let back: Value = serde_json::to_value(&record).unwrap();
        assert_eq!(back["response"], " DOG ");
    }

    #[test]
    fn comprehension_record_reads_back() {
        let json = r#"{
            "trial_index": 2, "task": "comprehension", "label": "cat",
            "difficulty": 1, "target_image": "cat.png", "group_order": "CP",
            "rt_ms": 700, "correct": false,
            "presented_images": ["dog.png", "cat.png", "bird.png", "fish.png"],
            "correct_answer": 2, "response": 3
        }"#;
        let record: ResponseRecord = serde_json::from_str(json).unwrap();
        assert!(!record.is_practice());
        assert_eq!(
            record.outcome,
            ResponseOutcome::Comprehension {
                presented_images: vec![
                    "dog.png".into(),
                    "cat.png".into(),
                    "bird.png".into(),
                    "fish.png".into(),
                ],
                correct_answer: 2,
                response: 3,
            }
        );
    }
}
