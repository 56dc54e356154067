use crate::timeline::{Timeline, TimelineNode};
use crate::trial::{CHOICE_COUNT, PresentedTrial};
use prodcomp_core::{Demographics, Phase, ResponseRecord, SessionPhase, TaskKind};
use prodcomp_log::{LogSink, submit_serialized};
use prodcomp_timing::Timer;
use tracing::{debug, info};

/// Participant input, one per screen.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ConsentGiven,
    ConsentDeclined,
    DemographicsSubmitted(Demographics),
    /// Acknowledges an instruction, break or debrief screen.
    Continue,
    /// 0-based button index on a comprehension trial.
    ChoiceSelected(usize),
    TextSubmitted(String),
}

/// What an accepted event does to the session.
enum Step {
    Advance,
    Terminate,
    Demographics(Demographics),
    Respond(Box<ResponseRecord>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskSummary {
    pub task: TaskKind,
    pub trials: usize,
    pub correct: usize,
    pub mean_rt_ms: Option<f64>,
}

impl TaskSummary {
    pub fn accuracy(&self) -> Option<f64> {
        (self.trials > 0).then(|| self.correct as f64 / self.trials as f64)
    }
}

/// Main-trial performance per task; practice trials are left out.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub comprehension: TaskSummary,
    pub production: TaskSummary,
}

/// Walks a timeline one screen at a time, scoring trials as they complete.
pub struct SessionStateMachine<T, L>
where
    T: Timer,
    L: LogSink,
{
    pub timeline: Timeline,
    pub timer: T,
    pub sink: L,
    cursor: usize,
    phase: SessionPhase,
    screen_onset: T::Timestamp,
    results: Vec<ResponseRecord>,
    demographics: Option<Demographics>,
}

impl<T, L> SessionStateMachine<T, L>
where
    T: Timer,
    L: LogSink,
{
    pub fn new(timeline: Timeline, timer: T, sink: L) -> Self {
        let phase = timeline
            .get(0)
            .map(TimelineNode::phase)
            .unwrap_or(SessionPhase::Finished);
        let screen_onset = timer.now();
        Self {
            timeline,
            timer,
            sink,
            cursor: 0,
            phase,
            screen_onset,
            results: Vec::new(),
            demographics: None,
        }
    }

    /// Applies `event` to the current screen. Returns `false` when the event
    /// does not fit the screen, which leaves the session unchanged.
    pub fn handle_event(&mut self, event: SessionEvent) -> bool {
        if !self.phase.allows_input() {
            return false;
        }
        let Some(node) = self.timeline.get(self.cursor) else {
            return false;
        };

        let step = match (node, event) {
            (TimelineNode::Consent, SessionEvent::ConsentGiven) => Step::Advance,
            (TimelineNode::Consent, SessionEvent::ConsentDeclined) => Step::Terminate,
            (TimelineNode::Demographics, SessionEvent::DemographicsSubmitted(d)) => {
                Step::Demographics(d)
            }
            (
                TimelineNode::Instructions(_)
                | TimelineNode::PracticeComplete(_)
                | TimelineNode::Break
                | TimelineNode::Debrief,
                SessionEvent::Continue,
            ) => Step::Advance,
            (
                TimelineNode::Trial {
                    trial: PresentedTrial::Comprehension(trial),
                    ..
                },
                SessionEvent::ChoiceSelected(index),
            ) if index < CHOICE_COUNT => Step::Respond(Box::new(trial.record_response(
                index,
                self.cursor,
                self.timeline.group_order(),
                self.response_time_ms(),
            ))),
            (
                TimelineNode::Trial {
                    trial: PresentedTrial::Production(trial),
                    ..
                },
                SessionEvent::TextSubmitted(text),
            ) => Step::Respond(Box::new(trial.record_response(
                &text,
                self.cursor,
                self.timeline.group_order(),
                self.response_time_ms(),
            ))),
            (_, event) => {
                debug!(?event, phase = ?self.phase, "event ignored on this screen");
                return false;
            }
        };

        match step {
            Step::Advance => self.advance(),
            Step::Terminate => self.terminate(),
            Step::Demographics(demographics) => {
                info!(age = demographics.age, gender = ?demographics.gender, "demographics recorded");
                submit_serialized(&self.sink, &demographics);
                self.demographics = Some(demographics);
                self.advance();
            }
            Step::Respond(record) => {
                info!(
                    trial = record.trial_index,
                    task = %record.task,
                    label = %record.label,
                    correct = record.correct,
                    rt_ms = ?record.rt_ms,
                    "trial complete"
                );
                submit_serialized(&self.sink, record.as_ref());
                self.results.push(*record);
                self.advance();
            }
        }
        true
    }

    fn response_time_ms(&self) -> Option<u64> {
        Some(self.timer.elapsed(self.screen_onset).as_millis() as u64)
    }

    fn advance(&mut self) {
        self.cursor += 1;
        self.screen_onset = self.timer.now();
        match self.timeline.get(self.cursor) {
            Some(node) => self.phase = node.phase(),
            None => {
                self.phase = SessionPhase::Finished;
                let summary = self.summary();
                info!(
                    responses = self.results.len(),
                    comprehension_correct = summary.comprehension.correct,
                    comprehension_trials = summary.comprehension.trials,
                    production_correct = summary.production.correct,
                    production_trials = summary.production.trials,
                    "experiment complete"
                );
            }
        }
    }

    fn terminate(&mut self) {
        info!("consent declined, ending session");
        self.phase = SessionPhase::Terminated;
        self.results.clear();
        self.demographics = None;
    }

    pub fn current_phase(&self) -> SessionPhase {
        self.phase
    }

    /// The screen awaiting input, or `None` once the session has ended.
    pub fn current_node(&self) -> Option<&TimelineNode> {
        if self.phase.is_terminal() {
            return None;
        }
        self.timeline.get(self.cursor)
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn results(&self) -> &[ResponseRecord] {
        &self.results
    }

    pub fn demographics(&self) -> Option<&Demographics> {
        self.demographics.as_ref()
    }

    /// (completed trials, total trials)
    pub fn trial_progress(&self) -> (usize, usize) {
        (self.results.len(), self.timeline.trial_count())
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            comprehension: self.task_summary(TaskKind::Comprehension),
            production: self.task_summary(TaskKind::Production),
        }
    }

    fn task_summary(&self, task: TaskKind) -> TaskSummary {
        let main: Vec<&ResponseRecord> = self
            .results
            .iter()
            .filter(|r| r.task == task && !r.is_practice())
            .collect();
        let times: Vec<f64> = main.iter().filter_map(|r| r.rt_ms).map(|ms| ms as f64).collect();
        let mean_rt_ms = (!times.is_empty()).then(|| times.iter().sum::<f64>() / times.len() as f64);
        TaskSummary {
            task,
            trials: main.len(),
            correct: main.iter().filter(|r| r.correct).count(),
            mean_rt_ms,
        }
    }
}
