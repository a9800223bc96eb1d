//! Australian normative reference tables.
//!
//! Built once by [`ReferenceTables::australian`] and read-only afterwards.

use crate::domain::model::{AssessmentItem, PhonologicalProcess, Position, Resolution};
use crate::utils::error::{Result, ScoringError};
use std::collections::HashMap;

use PhonologicalProcess as P;

/// Mastery age in months, in assessment-sheet order.
pub const MASTERY_AGES: &[(&str, u32)] = &[
    ("h", 36), ("p", 36), ("m", 36), ("ŋ", 48), ("n", 36), ("w", 48), ("b", 36),
    ("k", 36), ("g", 36), ("d", 36), ("t", 36), ("j", 48), ("f", 48), ("ʒ", 72),
    ("l", 60), ("ʃ", 60), ("tʃ", 60), ("s", 48), ("dʒ", 72), ("z", 60), ("r", 72),
    ("v", 60), ("ð", 84), ("θ", 72),
    ("bl", 48), ("fl", 48), ("pl", 48), ("br", 48), ("fr", 48), ("pr", 48),
    ("kw", 48), ("tw", 48), ("gl", 48), ("kl", 48), ("dr", 48), ("gr", 48),
    ("kr", 48), ("tr", 48), ("θr", 48),
    ("sm", 60), ("sp", 60), ("sw", 60), ("sk", 60), ("sl", 60), ("sn", 60),
    ("st", 60), ("skr", 60), ("spr", 60), ("skw", 60), ("spl", 60),
];

const I: Position = Position::Initial;
const M: Position = Position::Medial;
const F: Position = Position::Final;

/// Sounds not tested in every position.
pub const POSITION_OVERRIDES: &[(&str, &[Position])] = &[
    ("tʃ", &[I, M, F]), ("dʒ", &[I, M, F]),
    ("ʒ", &[M]), ("ð", &[I, M]), ("j", &[I]), ("h", &[I]),
    ("w", &[I, M]), ("r", &[I, M]), ("ŋ", &[M, F]),
    ("sm", &[I]), ("sp", &[I]), ("sw", &[I]), ("sk", &[I]), ("sl", &[I]),
    ("sn", &[I]), ("st", &[I]), ("bl", &[I]), ("fl", &[I]), ("pl", &[I]),
    ("br", &[I]), ("fr", &[I]), ("pr", &[I]), ("kw", &[I]), ("tw", &[I]),
    ("gl", &[I]), ("kl", &[I]), ("dr", &[I]), ("gr", &[I]), ("kr", &[I]),
    ("tr", &[I]), ("θr", &[I]), ("skr", &[I]), ("spr", &[I]),
    ("skw", &[I]), ("spl", &[I]),
];

/// One row of the substitution table: the process and, per target sound,
/// the productions that count as that process.
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionRule {
    pub process: PhonologicalProcess,
    pub substitutions: &'static [(&'static str, &'static [&'static str])],
}

impl SubstitutionRule {
    /// Expected productions for `target`, if this rule covers it.
    pub fn expected(&self, target: &str) -> Option<&'static [&'static str]> {
        self.substitutions
            .iter()
            .find(|(sound, _)| *sound == target)
            .map(|(_, expected)| *expected)
    }
}

/// Scanned in order; the first rule that matches wins.
pub const SUBSTITUTION_RULES: &[SubstitutionRule] = &[
    SubstitutionRule {
        process: P::Gliding,
        substitutions: &[("r", &["w"]), ("l", &["w"])],
    },
    SubstitutionRule {
        process: P::Fronting,
        substitutions: &[("k", &["t"]), ("g", &["d"]), ("ŋ", &["n"])],
    },
    SubstitutionRule {
        process: P::Backing,
        substitutions: &[("t", &["k"]), ("d", &["g"]), ("n", &["ŋ"])],
    },
    SubstitutionRule {
        process: P::Stopping,
        substitutions: &[
            ("f", &["p", "b"]),
            ("v", &["b", "p"]),
            ("s", &["t", "d"]),
            ("z", &["d", "t"]),
            ("ʃ", &["t", "d"]),
            ("ʒ", &["d", "t"]),
            ("θ", &["t"]),
            ("ð", &["d"]),
        ],
    },
    SubstitutionRule {
        process: P::Deaffrication,
        substitutions: &[("tʃ", &["ʃ"]), ("dʒ", &["ʒ"])],
    },
    SubstitutionRule {
        process: P::Affrication,
        substitutions: &[("ʃ", &["tʃ"]), ("ʒ", &["dʒ"])],
    },
    SubstitutionRule {
        process: P::Labialisation,
        substitutions: &[("t", &["p"]), ("d", &["b"])],
    },
    SubstitutionRule {
        process: P::Alveolarization,
        substitutions: &[("f", &["s"]), ("v", &["z"])],
    },
    SubstitutionRule {
        process: P::Depalatisation,
        substitutions: &[("ʃ", &["s"]), ("ʒ", &["z"])],
    },
    SubstitutionRule {
        process: P::FinalConsonantDevoicing,
        substitutions: &[("b", &["p"]), ("d", &["t"]), ("g", &["k"]), ("v", &["f"]), ("z", &["s"])],
    },
    SubstitutionRule {
        process: P::PrevocalicVoicing,
        substitutions: &[("p", &["b"]), ("t", &["d"]), ("k", &["g"])],
    },
    SubstitutionRule {
        process: P::InterdentalLisp,
        substitutions: &[("s", &["θ"]), ("z", &["θ"])],
    },
];

impl PhonologicalProcess {
    /// Age by which the process normally resolves. Every process has a norm.
    pub fn resolution(&self) -> Resolution {
        use Resolution::{Atypical, Months};
        match self {
            P::Backing | P::InterdentalLisp | P::InitialConsonantDeletion => Atypical,
            P::Reduplication => Months(30),
            P::Fronting | P::Assimilation | P::Coalescence => Months(36),
            P::Stopping
            | P::Vowelisation
            | P::Affrication
            | P::Deaffrication
            | P::Alveolarization
            | P::Depalatisation
            | P::Labialisation
            | P::Denasalisation
            | P::PrevocalicVoicing
            | P::ClusterReductionNoS
            | P::FinalConsonantDeletion
            | P::WeakSyllableDeletion => Months(48),
            P::Gliding
            | P::FinalConsonantDevoicing
            | P::ClusterReductionWithS
            | P::Epenthesis => Months(60),
        }
    }
}

/// Number of sound units (Unicode scalar values) in a sound string.
pub fn sound_units(sound: &str) -> usize {
    sound.chars().count()
}

#[derive(Debug, Clone)]
struct SoundNorm {
    sound: &'static str,
    mastery_age: u32,
    positions: Vec<Position>,
}

#[derive(Debug, Clone)]
pub struct ReferenceTables {
    norms: Vec<SoundNorm>,
    index: HashMap<&'static str, usize>,
    rules: &'static [SubstitutionRule],
}

impl ReferenceTables {
    /// The single Australian-norm table set.
    pub fn australian() -> Self {
        Self::build(MASTERY_AGES, POSITION_OVERRIDES, SUBSTITUTION_RULES)
    }

    /// Builds tables from raw data, applying the position defaults and the
    /// /r/ normalisation once.
    pub fn build(
        mastery: &[(&'static str, u32)],
        overrides: &[(&str, &[Position])],
        rules: &'static [SubstitutionRule],
    ) -> Self {
        let mut norms = Vec::with_capacity(mastery.len());
        let mut index = HashMap::with_capacity(mastery.len());

        for &(sound, mastery_age) in mastery {
            let positions = match overrides.iter().find(|(s, _)| *s == sound) {
                Some((_, positions)) => positions.to_vec(),
                None if sound_units(sound) > 1 => vec![Position::Initial],
                None => Position::ALL.to_vec(),
            };
            index.insert(sound, norms.len());
            norms.push(SoundNorm {
                sound,
                mastery_age,
                positions,
            });
        }

        // Word-final /r/ is not produced in Australian English.
        if let Some(&i) = index.get("r") {
            norms[i].positions.retain(|p| *p != Position::Final);
        }

        Self { norms, index, rules }
    }

    fn norm(&self, sound: &str) -> Result<&SoundNorm> {
        self.index
            .get(sound)
            .map(|&i| &self.norms[i])
            .ok_or_else(|| ScoringError::UnknownSound {
                sound: sound.to_string(),
            })
    }

    pub fn mastery_age(&self, sound: &str) -> Result<u32> {
        self.norm(sound).map(|norm| norm.mastery_age)
    }

    pub fn allowed_positions(&self, sound: &str) -> Result<&[Position]> {
        self.norm(sound).map(|norm| norm.positions.as_slice())
    }

    pub fn is_assessed(&self, sound: &str, position: Position) -> bool {
        self.allowed_positions(sound)
            .map(|positions| positions.contains(&position))
            .unwrap_or(false)
    }

    pub fn process_resolution(&self, process: &str) -> Result<Resolution> {
        process.parse::<PhonologicalProcess>().map(|p| p.resolution())
    }

    pub fn substitution_rules(&self) -> &[SubstitutionRule] {
        self.rules
    }

    pub fn sounds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.norms.iter().map(|norm| norm.sound)
    }

    /// Every assessed (sound, position) pair, produced = sound, in sheet order.
    pub fn assessment_universe(&self) -> Vec<AssessmentItem> {
        self.norms
            .iter()
            .flat_map(|norm| {
                norm.positions
                    .iter()
                    .map(move |&position| AssessmentItem::correct(norm.sound, position))
            })
            .collect()
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::australian()
    }
}
