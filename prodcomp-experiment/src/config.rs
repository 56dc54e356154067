use prodcomp_core::GroupOrder;
use std::path::PathBuf;

/// Pilot switch, fixed at build time: skips the demographics survey and pins
/// the group order to comprehension first.
pub const TESTING: bool = false;

#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    pub skip_demographics: bool,
    /// Overrides the randomly drawn group order when set.
    pub forced_group_order: Option<GroupOrder>,
    /// Base URL of the logging endpoint; `None` disables remote logging.
    pub log_url: Option<String>,
    /// Manifest to load instead of the embedded one.
    pub manifest_path: Option<PathBuf>,
    /// Seed for a reproducible session.
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        if TESTING {
            return Self::testing();
        }
        Self {
            skip_demographics: false,
            forced_group_order: None,
            log_url: None,
            manifest_path: None,
            seed: None,
        }
    }
}

impl ExperimentConfig {
    /// Settings used while piloting the experiment.
    pub fn testing() -> Self {
        Self {
            skip_demographics: true,
            forced_group_order: Some(GroupOrder::CP),
            log_url: None,
            manifest_path: None,
            seed: None,
        }
    }

    /// Defaults overridden by `PRODCOMP_LOG_URL`, `PRODCOMP_MANIFEST` and
    /// `PRODCOMP_SEED`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            log_url: non_empty("PRODCOMP_LOG_URL").or(default.log_url),
            manifest_path: non_empty("PRODCOMP_MANIFEST")
                .map(PathBuf::from)
                .or(default.manifest_path),
            seed: non_empty("PRODCOMP_SEED")
                .and_then(|v| v.trim().parse().ok())
                .or(default.seed),
            ..default
        }
    }
}
