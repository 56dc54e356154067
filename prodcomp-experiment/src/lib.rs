pub mod config;
pub mod manifest;
pub mod state;
pub mod timeline;
pub mod trial;
pub mod trialset;

pub use config::{ExperimentConfig, TESTING};
pub use manifest::{Manifest, ManifestError};
pub use state::{SessionEvent, SessionStateMachine, SessionSummary, TaskSummary};
pub use timeline::{Timeline, TimelineNode};
pub use trial::{
    CHOICE_COUNT, ComprehensionTrial, PresentedTrial, ProductionScore, ProductionTrial,
    TrialError, score_choice, score_production,
};
pub use trialset::TrialSet;
