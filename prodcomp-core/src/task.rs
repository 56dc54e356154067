use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Pick the matching image out of four.
    Comprehension,
    /// Type the name of a single image.
    Production,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Comprehension => f.write_str("comprehension"),
            TaskKind::Production => f.write_str("production"),
        }
    }
}

/// Counterbalancing flag: which block runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupOrder {
    CP,
    PC,
}

impl GroupOrder {
    pub fn from_comprehension_first(comprehension_first: bool) -> Self {
        if comprehension_first {
            GroupOrder::CP
        } else {
            GroupOrder::PC
        }
    }

    /// Task blocks in presentation order.
    pub fn blocks(self) -> [TaskKind; 2] {
        match self {
            GroupOrder::CP => [TaskKind::Comprehension, TaskKind::Production],
            GroupOrder::PC => [TaskKind::Production, TaskKind::Comprehension],
        }
    }
}

impl fmt::Display for GroupOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupOrder::CP => f.write_str("CP"),
            GroupOrder::PC => f.write_str("PC"),
        }
    }
}
