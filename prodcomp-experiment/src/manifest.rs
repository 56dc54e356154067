use prodcomp_core::TrialRecord;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("manifest record {index} has an empty `{field}`")]
    EmptyField { index: usize, field: &'static str },
    #[error("manifest record {index} lists image `{image}` more than once")]
    DuplicateImage { index: usize, image: String },
}

/// Validated list of stimulus records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Manifest {
    records: Vec<TrialRecord>,
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let records: Vec<TrialRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Rejects records whose label, target or any present distractor is blank,
    /// and records that show the same image twice among target and distractors.
    pub fn from_records(records: Vec<TrialRecord>) -> Result<Self, ManifestError> {
        for (index, record) in records.iter().enumerate() {
            let fields = [
                ("label", Some(record.label.as_str())),
                ("target", Some(record.target.as_str())),
                ("distractor1", record.distractor1.as_deref()),
                ("distractor2", record.distractor2.as_deref()),
                ("distractor3", record.distractor3.as_deref()),
            ];
            for (field, value) in fields {
                if value.is_some_and(|v| v.trim().is_empty()) {
                    return Err(ManifestError::EmptyField { index, field });
                }
            }

            let mut seen = HashSet::new();
            let images = std::iter::once(record.target.as_str()).chain(
                [&record.distractor1, &record.distractor2, &record.distractor3]
                    .into_iter()
                    .filter_map(|d| d.as_deref()),
            );
            for image in images {
                if !seen.insert(image) {
                    return Err(ManifestError::DuplicateImage {
                        index,
                        image: image.to_string(),
                    });
                }
            }
        }
        debug!(records = records.len(), "manifest validated");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
