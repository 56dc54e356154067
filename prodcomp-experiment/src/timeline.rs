use crate::config::ExperimentConfig;
use crate::trial::{PresentedTrial, TrialError};
use crate::trialset::TrialSet;
use prodcomp_core::{GroupOrder, SessionPhase, TaskKind, TrialRecord};
use rand::Rng;
use tracing::info;

/// One screen of the session.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineNode {
    Consent,
    Demographics,
    Instructions(TaskKind),
    Trial {
        phase: SessionPhase,
        trial: PresentedTrial,
    },
    /// Shown between the practice and main trials of a block.
    PracticeComplete(TaskKind),
    Break,
    Debrief,
}

impl TimelineNode {
    pub fn phase(&self) -> SessionPhase {
        match self {
            TimelineNode::Consent => SessionPhase::Consent,
            TimelineNode::Demographics => SessionPhase::Demographics,
            TimelineNode::Instructions(_) | TimelineNode::PracticeComplete(_) => {
                SessionPhase::Instructions
            }
            TimelineNode::Trial { phase, .. } => *phase,
            TimelineNode::Break => SessionPhase::Break,
            TimelineNode::Debrief => SessionPhase::Debrief,
        }
    }

    pub fn trial(&self) -> Option<&PresentedTrial> {
        match self {
            TimelineNode::Trial { trial, .. } => Some(trial),
            _ => None,
        }
    }
}

/// Ordered screens of a whole session.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    nodes: Vec<TimelineNode>,
    group_order: GroupOrder,
}

impl Timeline {
    /// Lays out consent, the optional survey and both task blocks in group
    /// order, each block being instructions, practice trials, a practice
    /// complete screen and the main trials. A break separates the blocks and
    /// a debrief closes the session.
    ///
    /// Every trial is constructed here, so a record that cannot be shown
    /// fails the session before it starts.
    pub fn assemble<R: Rng + ?Sized>(
        trial_set: &TrialSet,
        config: &ExperimentConfig,
        rng: &mut R,
    ) -> Result<Self, TrialError> {
        let group_order = config.forced_group_order.unwrap_or(trial_set.group_order);

        let mut nodes = vec![TimelineNode::Consent];
        if !config.skip_demographics {
            nodes.push(TimelineNode::Demographics);
        }

        for (i, task) in group_order.blocks().into_iter().enumerate() {
            if i > 0 {
                nodes.push(TimelineNode::Break);
            }
            nodes.push(TimelineNode::Instructions(task));
            push_trials(
                &mut nodes,
                task,
                SessionPhase::Practice,
                trial_set.practice(task),
                rng,
            )?;
            nodes.push(TimelineNode::PracticeComplete(task));
            push_trials(
                &mut nodes,
                task,
                SessionPhase::Main,
                trial_set.main(task),
                rng,
            )?;
        }
        nodes.push(TimelineNode::Debrief);

        let timeline = Self { nodes, group_order };
        info!(
            screens = timeline.len(),
            trials = timeline.trial_count(),
            %group_order,
            "timeline assembled"
        );
        Ok(timeline)
    }

    pub fn nodes(&self) -> &[TimelineNode] {
        &self.nodes
    }

    pub fn get(&self, index: usize) -> Option<&TimelineNode> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn group_order(&self) -> GroupOrder {
        self.group_order
    }

    pub fn trial_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.trial().is_some()).count()
    }
}

fn push_trials<R: Rng + ?Sized>(
    nodes: &mut Vec<TimelineNode>,
    task: TaskKind,
    phase: SessionPhase,
    records: &[TrialRecord],
    rng: &mut R,
) -> Result<(), TrialError> {
    for record in records {
        let trial = PresentedTrial::build(task, record, rng)?;
        nodes.push(TimelineNode::Trial { phase, trial });
    }
    Ok(())
}
