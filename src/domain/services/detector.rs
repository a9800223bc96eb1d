use crate::domain::model::PhonologicalProcess;
use crate::domain::services::tables::{sound_units, SubstitutionRule};

const AFFRICATES: [&str; 2] = ["tʃ", "dʒ"];

/// Names the phonological process behind a substitution, if any.
///
/// Substitution rules are tried in table order and the first matching rule
/// wins; only when none match does the cluster-reduction fallback run.
pub fn detect(
    rules: &[SubstitutionRule],
    target: &str,
    produced: &str,
) -> Option<PhonologicalProcess> {
    detect_substitution(rules, target, produced)
        .or_else(|| detect_cluster_reduction(target, produced))
}

pub fn detect_substitution(
    rules: &[SubstitutionRule],
    target: &str,
    produced: &str,
) -> Option<PhonologicalProcess> {
    rules.iter().find_map(|rule| {
        rule.expected(target)
            .filter(|expected| expected.contains(&produced))
            .map(|_| rule.process)
    })
}

pub fn detect_cluster_reduction(target: &str, produced: &str) -> Option<PhonologicalProcess> {
    // Affricates are single phonemes written with two symbols.
    if AFFRICATES.contains(&target) {
        return Some(PhonologicalProcess::Deaffrication);
    }

    if sound_units(produced) != 1 {
        return None;
    }

    // Any target carrying /s/ counts, including /s/ itself.
    if target.contains('s') {
        Some(PhonologicalProcess::ClusterReductionWithS)
    } else if sound_units(target) > 1 {
        Some(PhonologicalProcess::ClusterReductionNoS)
    } else {
        None
    }
}
