use prodcomp_core::{GroupOrder, TaskKind, TrialRecord};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// The four trial sequences of a session plus its counterbalancing order.
///
/// Built once at session start and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSet {
    pub practice_comprehension: Vec<TrialRecord>,
    pub practice_production: Vec<TrialRecord>,
    pub main_comprehension: Vec<TrialRecord>,
    pub main_production: Vec<TrialRecord>,
    pub group_order: GroupOrder,
}

impl TrialSet {
    /// Splits `manifest` into practice/main and comprehension/production.
    ///
    /// Practice records (difficulty 0) are shuffled and halved. Main records
    /// are grouped by difficulty and each tier is shuffled and halved on its
    /// own, tiers appended in ascending order. On an odd count the
    /// comprehension half is the smaller one. The group order is a fair coin.
    ///
    /// An empty manifest gives four empty sequences.
    pub fn build<R: Rng + ?Sized>(manifest: &[TrialRecord], rng: &mut R) -> Self {
        let (mut practice, main): (Vec<TrialRecord>, Vec<TrialRecord>) =
            manifest.iter().cloned().partition(TrialRecord::is_practice);

        practice.shuffle(rng);
        let (practice_comprehension, practice_production) = split_half(practice);

        let mut tiers: BTreeMap<u32, Vec<TrialRecord>> = BTreeMap::new();
        for record in main {
            tiers.entry(record.difficulty).or_default().push(record);
        }

        let mut main_comprehension = Vec::new();
        let mut main_production = Vec::new();
        for (difficulty, mut tier) in tiers {
            tier.shuffle(rng);
            let (comprehension, production) = split_half(tier);
            debug!(
                difficulty,
                comprehension = comprehension.len(),
                production = production.len(),
                "split difficulty tier"
            );
            main_comprehension.extend(comprehension);
            main_production.extend(production);
        }

        let group_order = GroupOrder::from_comprehension_first(rng.random_bool(0.5));

        let set = Self {
            practice_comprehension,
            practice_production,
            main_comprehension,
            main_production,
            group_order,
        };
        info!(
            practice_c = set.practice_comprehension.len(),
            practice_p = set.practice_production.len(),
            main_c = set.main_comprehension.len(),
            main_p = set.main_production.len(),
            %group_order,
            "trial set built"
        );
        set
    }

    pub fn practice(&self, task: TaskKind) -> &[TrialRecord] {
        match task {
            TaskKind::Comprehension => &self.practice_comprehension,
            TaskKind::Production => &self.practice_production,
        }
    }

    pub fn main(&self, task: TaskKind) -> &[TrialRecord] {
        match task {
            TaskKind::Comprehension => &self.main_comprehension,
            TaskKind::Production => &self.main_production,
        }
    }

    /// Total number of trials across all four sequences.
    pub fn len(&self) -> usize {
        self.practice_comprehension.len()
            + self.practice_production.len()
            + self.main_comprehension.len()
            + self.main_production.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First half gets `len / 2` items, the second half the rest.
fn split_half<T>(mut items: Vec<T>) -> (Vec<T>, Vec<T>) {
    let rest = items.split_off(items.len() / 2);
    (items, rest)
}
