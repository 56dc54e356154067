use prodcomp_core::TrialRecord;
use prodcomp_experiment::{ExperimentConfig, Manifest, Timeline, TrialSet};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::{BTreeMap, BTreeSet};

fn record(id: usize, difficulty: u32) -> TrialRecord {
    TrialRecord {
        label: format!("item{id}"),
        difficulty,
        target: format!("img/item{id}.png"),
        distractor1: Some(format!("img/d{id}a.png")),
        distractor2: Some(format!("img/d{id}b.png")),
        distractor3: Some(format!("img/d{id}c.png")),
    }
}

fn manifest_from(difficulties: &[u32]) -> Vec<TrialRecord> {
    difficulties
        .iter()
        .enumerate()
        .map(|(id, &d)| record(id, d))
        .collect()
}

fn labels(records: &[TrialRecord]) -> Vec<String> {
    records.iter().map(|r| r.label.clone()).collect()
}

fn per_tier(records: &[TrialRecord]) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry(r.difficulty).or_insert(0) += 1;
    }
    counts
}

proptest! {
    #[test]
    fn partition_is_complete_and_disjoint(
        difficulties in prop::collection::vec(0u32..5, 0..60),
        seed in any::<u64>(),
    ) {
        let manifest = manifest_from(&difficulties);
        let set = TrialSet::build(&manifest, &mut StdRng::seed_from_u64(seed));

        let mut all = labels(&set.practice_comprehension);
        all.extend(labels(&set.practice_production));
        all.extend(labels(&set.main_comprehension));
        all.extend(labels(&set.main_production));

        let unique: BTreeSet<&String> = all.iter().collect();
        prop_assert_eq!(unique.len(), all.len());
        let expected: BTreeSet<String> = labels(&manifest).into_iter().collect();
        let got: BTreeSet<String> = all.into_iter().collect();
        prop_assert_eq!(got, expected);

        prop_assert!(set.practice_comprehension.iter().all(TrialRecord::is_practice));
        prop_assert!(set.practice_production.iter().all(TrialRecord::is_practice));
        prop_assert!(!set.main_comprehension.iter().any(TrialRecord::is_practice));
        prop_assert!(!set.main_production.iter().any(TrialRecord::is_practice));
    }

    #[test]
    fn splits_are_balanced(
        difficulties in prop::collection::vec(0u32..5, 0..60),
        seed in any::<u64>(),
    ) {
        let set = TrialSet::build(&manifest_from(&difficulties), &mut StdRng::seed_from_u64(seed));

        let pc = set.practice_comprehension.len();
        let pp = set.practice_production.len();
        prop_assert!(pp == pc || pp == pc + 1);

        let c = per_tier(&set.main_comprehension);
        let p = per_tier(&set.main_production);
        let tiers: BTreeSet<u32> = c.keys().chain(p.keys()).copied().collect();
        for tier in tiers {
            let nc = c.get(&tier).copied().unwrap_or(0);
            let np = p.get(&tier).copied().unwrap_or(0);
            prop_assert!(np == nc || np == nc + 1, "tier {} split {}/{}", tier, nc, np);
        }
    }

    #[test]
    fn main_sequences_are_tier_ordered(
        difficulties in prop::collection::vec(1u32..8, 0..60),
        seed in any::<u64>(),
    ) {
        let set = TrialSet::build(&manifest_from(&difficulties), &mut StdRng::seed_from_u64(seed));
        for seq in [&set.main_comprehension, &set.main_production] {
            prop_assert!(seq.windows(2).all(|w| w[0].difficulty <= w[1].difficulty));
        }
    }

    #[test]
    fn every_record_reaches_the_timeline(
        difficulties in prop::collection::vec(0u32..4, 0..40),
        seed in any::<u64>(),
    ) {
        let manifest = manifest_from(&difficulties);
        let mut rng = StdRng::seed_from_u64(seed);
        let set = TrialSet::build(&manifest, &mut rng);
        let timeline = Timeline::assemble(&set, &ExperimentConfig::default(), &mut rng).unwrap();
        prop_assert_eq!(timeline.trial_count(), manifest.len());
    }
}

#[test]
fn bundled_style_manifest_builds() {
    let manifest = Manifest::from_json(
        r#"[
            {"label": "apple", "difficulty": 0, "target": "img/apple.png",
             "distractor1": "img/pear.png", "distractor2": "img/plum.png", "distractor3": "img/fig.png"},
            {"label": "bus", "difficulty": 0, "target": "img/bus.png",
             "distractor1": "img/car.png", "distractor2": "img/van.png", "distractor3": "img/train.png"},
            {"label": "owl", "difficulty": 1, "target": "img/owl.png",
             "distractor1": "img/hawk.png", "distractor2": "img/crow.png", "distractor3": "img/duck.png"},
            {"label": "lamp", "difficulty": 1, "target": "img/lamp.png",
             "distractor1": "img/desk.png", "distractor2": "img/sofa.png", "distractor3": "img/rug.png"}
        ]"#,
    )
    .unwrap();
    let set = TrialSet::build(manifest.records(), &mut StdRng::seed_from_u64(12));
    assert_eq!(set.practice_comprehension.len(), 1);
    assert_eq!(set.practice_production.len(), 1);
    assert_eq!(set.main_comprehension.len(), 1);
    assert_eq!(set.main_production.len(), 1);
}
