pub mod timer;

pub use timer::{ManualTimer, MonotonicTimer, Timer};
