/// Defines session phases and how they accept input
pub trait Phase: Copy + Clone + PartialEq + Send + Sync + std::fmt::Debug + Default {
    fn allows_input(&self) -> bool;

    fn is_trial(&self) -> bool {
        false
    }

    fn is_terminal(&self) -> bool {
        false
    }
}

#[derive(Copy, Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Consent,
    Demographics,
    Instructions,
    Practice,
    Main,
    Break,
    Debrief,
    /// Debrief acknowledged.
    Finished,
    /// Consent declined.
    Terminated,
}

impl Phase for SessionPhase {
    fn allows_input(&self) -> bool {
        !self.is_terminal()
    }

    fn is_trial(&self) -> bool {
        matches!(self, SessionPhase::Practice | SessionPhase::Main)
    }

    fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Finished | SessionPhase::Terminated)
    }
}
