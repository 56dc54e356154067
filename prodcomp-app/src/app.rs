use crate::screens;
use anyhow::{Context, Result};
use prodcomp_core::{Demographics, Phase, SessionPhase};
use prodcomp_experiment::{
    ExperimentConfig, Manifest, PresentedTrial, SessionEvent, SessionStateMachine, TaskSummary,
    Timeline, TimelineNode, TrialSet,
};
use prodcomp_log::{HttpLogSink, LogSink, NullSink};
use prodcomp_timing::MonotonicTimer;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use tracing::{info, warn};

const EMBEDDED_MANIFEST: &str = include_str!("../assets/manifest.json");

pub type Session = SessionStateMachine<MonotonicTimer, Box<dyn LogSink>>;

/// Console presentation of a session: one screen per timeline node, one line
/// of input per answer.
pub struct App<R, W> {
    session: Session,
    input: R,
    output: W,
}

impl App<StdinLock<'static>, Stdout> {
    pub fn new(config: &ExperimentConfig) -> Result<Self> {
        let sink: Box<dyn LogSink> = match &config.log_url {
            Some(url) => match HttpLogSink::spawn(url) {
                Ok(sink) => Box::new(sink),
                Err(e) => {
                    warn!(error = %e, "remote logging unavailable, continuing without it");
                    Box::new(NullSink)
                }
            },
            None => Box::new(NullSink),
        };
        let session = build_session(config, sink)?;
        Ok(Self::with_io(session, io::stdin().lock(), io::stdout()))
    }
}

/// Loads the manifest, draws the trial set and lays out the timeline.
pub fn build_session(config: &ExperimentConfig, sink: Box<dyn LogSink>) -> Result<Session> {
    let manifest = match &config.manifest_path {
        Some(path) => Manifest::load(path)?,
        None => Manifest::from_json(EMBEDDED_MANIFEST).context("embedded manifest is invalid")?,
    };
    info!(records = manifest.len(), "manifest loaded");

    let mut rng = match config.seed {
        Some(seed) => {
            info!(seed, "using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let trial_set = TrialSet::build(manifest.records(), &mut rng);
    let timeline =
        Timeline::assemble(&trial_set, config, &mut rng).context("failed to assemble timeline")?;

    Ok(SessionStateMachine::new(timeline, MonotonicTimer::new(), sink))
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn with_io(session: Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{}\n", screens::BANNER)?;

        while let Some(node) = self.session.current_node().cloned() {
            if node.phase().is_trial() {
                let (completed, total) = self.session.trial_progress();
                writeln!(self.output, "\n{}", screens::progress(completed + 1, total))?;
            }
            let Some(event) = self.present(&node)? else {
                warn!(phase = ?self.session.current_phase(), "input closed before the session ended");
                return Ok(());
            };
            if !self.session.handle_event(event) {
                writeln!(self.output, "{}", screens::RETRY)?;
            }
        }

        match self.session.current_phase() {
            SessionPhase::Terminated => writeln!(self.output, "{}", screens::TERMINATED)?,
            _ => {
                let summary = self.session.summary();
                log_summary(&summary.comprehension);
                log_summary(&summary.production);
            }
        }
        self.output.flush()?;
        Ok(())
    }

    /// Shows `node` and reads input until it yields an event. `None` means
    /// the input ran out.
    fn present(&mut self, node: &TimelineNode) -> Result<Option<SessionEvent>> {
        match node {
            TimelineNode::Consent => {
                writeln!(self.output, "{}\n\n{}", screens::CONSENT, screens::CONSENT_CHOICES)?;
                loop {
                    let Some(line) = self.read_line()? else {
                        return Ok(None);
                    };
                    match line.trim() {
                        "1" => return Ok(Some(SessionEvent::ConsentGiven)),
                        "2" => return Ok(Some(SessionEvent::ConsentDeclined)),
                        _ => writeln!(self.output, "{}", screens::CONSENT_CHOICES)?,
                    }
                }
            }
            TimelineNode::Demographics => {
                writeln!(self.output, "{}", screens::DEMOGRAPHICS)?;
                loop {
                    let Some(age) = self.ask(screens::AGE_PROMPT)? else {
                        return Ok(None);
                    };
                    let Some(gender) = self.ask(screens::GENDER_PROMPT)? else {
                        return Ok(None);
                    };
                    let Some(english) = self.ask(screens::ENGLISH_PROMPT)? else {
                        return Ok(None);
                    };
                    match Demographics::parse(&age, &gender, &english) {
                        Ok(d) => return Ok(Some(SessionEvent::DemographicsSubmitted(d))),
                        Err(e) => writeln!(self.output, "{e}")?,
                    }
                }
            }
            TimelineNode::Instructions(task) => {
                self.acknowledge(screens::instructions(*task), screens::CONTINUE)
            }
            TimelineNode::PracticeComplete(_) => {
                self.acknowledge(screens::PRACTICE_COMPLETE, screens::CONTINUE)
            }
            TimelineNode::Break => self.acknowledge(screens::BREAK, screens::CONTINUE),
            TimelineNode::Debrief => self.acknowledge(screens::DEBRIEF, screens::FINISH),
            TimelineNode::Trial {
                trial: PresentedTrial::Comprehension(trial),
                ..
            } => {
                writeln!(self.output, "\n{}", trial.prompt())?;
                for (i, image) in trial.images.iter().enumerate() {
                    writeln!(self.output, "  [{}] {}", i + 1, image)?;
                }
                loop {
                    let Some(line) = self.ask(screens::CHOICE_PROMPT)? else {
                        return Ok(None);
                    };
                    // buttons are numbered from 1 on screen, reported from 0
                    match line.trim().parse::<usize>() {
                        Ok(n) if n >= 1 => return Ok(Some(SessionEvent::ChoiceSelected(n - 1))),
                        _ => continue,
                    }
                }
            }
            TimelineNode::Trial {
                trial: PresentedTrial::Production(trial),
                ..
            } => {
                writeln!(self.output, "\n{}\n  {}", trial.prompt(), trial.record.target)?;
                loop {
                    let Some(line) = self.ask(screens::NAME_PROMPT)? else {
                        return Ok(None);
                    };
                    if !line.is_empty() {
                        return Ok(Some(SessionEvent::TextSubmitted(line)));
                    }
                }
            }
        }
    }

    fn acknowledge(&mut self, text: &str, hint: &str) -> Result<Option<SessionEvent>> {
        writeln!(self.output, "\n{text}\n{hint}")?;
        Ok(self.read_line()?.map(|_| SessionEvent::Continue))
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

fn log_summary(summary: &TaskSummary) {
    info!(
        task = %summary.task,
        trials = summary.trials,
        correct = summary.correct,
        accuracy = ?summary.accuracy(),
        mean_rt_ms = ?summary.mean_rt_ms,
        "main task results"
    );
}
