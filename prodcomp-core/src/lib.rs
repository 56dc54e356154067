pub mod demographics;
pub mod phase;
pub mod record;
pub mod task;
pub mod trial;

pub use demographics::{Demographics, DemographicsError, Gender};
pub use phase::{Phase, SessionPhase};
pub use record::{PRACTICE_DIFFICULTY, TrialRecord};
pub use task::{GroupOrder, TaskKind};
pub use trial::{ResponseOutcome, ResponseRecord};
