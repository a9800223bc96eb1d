use crate::utils::error::{Result, ScoringError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Place of the target sound within the test word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Initial,
    Medial,
    Final,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Initial, Position::Medial, Position::Final];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Initial => "initial",
            Position::Medial => "medial",
            Position::Final => "final",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "initial" => Ok(Position::Initial),
            "medial" => Ok(Position::Medial),
            "final" => Ok(Position::Final),
            _ => Err(ScoringError::InvalidPosition {
                value: s.to_string(),
            }),
        }
    }
}

/// Named phonological error patterns from the Australian norms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PhonologicalProcess {
    Backing,
    InterdentalLisp,
    Fronting,
    Gliding,
    Stopping,
    Vowelisation,
    Affrication,
    Deaffrication,
    Alveolarization,
    Depalatisation,
    Labialisation,
    Assimilation,
    Denasalisation,
    FinalConsonantDevoicing,
    PrevocalicVoicing,
    Coalescence,
    Reduplication,
    ClusterReductionNoS,
    ClusterReductionWithS,
    FinalConsonantDeletion,
    InitialConsonantDeletion,
    WeakSyllableDeletion,
    Epenthesis,
}

impl PhonologicalProcess {
    pub const ALL: [PhonologicalProcess; 23] = [
        PhonologicalProcess::Backing,
        PhonologicalProcess::InterdentalLisp,
        PhonologicalProcess::Fronting,
        PhonologicalProcess::Gliding,
        PhonologicalProcess::Stopping,
        PhonologicalProcess::Vowelisation,
        PhonologicalProcess::Affrication,
        PhonologicalProcess::Deaffrication,
        PhonologicalProcess::Alveolarization,
        PhonologicalProcess::Depalatisation,
        PhonologicalProcess::Labialisation,
        PhonologicalProcess::Assimilation,
        PhonologicalProcess::Denasalisation,
        PhonologicalProcess::FinalConsonantDevoicing,
        PhonologicalProcess::PrevocalicVoicing,
        PhonologicalProcess::Coalescence,
        PhonologicalProcess::Reduplication,
        PhonologicalProcess::ClusterReductionNoS,
        PhonologicalProcess::ClusterReductionWithS,
        PhonologicalProcess::FinalConsonantDeletion,
        PhonologicalProcess::InitialConsonantDeletion,
        PhonologicalProcess::WeakSyllableDeletion,
        PhonologicalProcess::Epenthesis,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PhonologicalProcess::Backing => "backing",
            PhonologicalProcess::InterdentalLisp => "interdental lisp",
            PhonologicalProcess::Fronting => "fronting",
            PhonologicalProcess::Gliding => "gliding",
            PhonologicalProcess::Stopping => "stopping",
            PhonologicalProcess::Vowelisation => "vowelisation",
            PhonologicalProcess::Affrication => "affrication",
            PhonologicalProcess::Deaffrication => "deaffrication",
            PhonologicalProcess::Alveolarization => "alveolarization",
            PhonologicalProcess::Depalatisation => "depalatisation",
            PhonologicalProcess::Labialisation => "labialisation",
            PhonologicalProcess::Assimilation => "assimilation",
            PhonologicalProcess::Denasalisation => "denasalisation",
            PhonologicalProcess::FinalConsonantDevoicing => "final consonant devoicing",
            PhonologicalProcess::PrevocalicVoicing => "prevocalic voicing",
            PhonologicalProcess::Coalescence => "coalescence",
            PhonologicalProcess::Reduplication => "reduplication",
            PhonologicalProcess::ClusterReductionNoS => "cluster reduction (no /s/)",
            PhonologicalProcess::ClusterReductionWithS => "cluster reduction (with /s/)",
            PhonologicalProcess::FinalConsonantDeletion => "final consonant deletion",
            PhonologicalProcess::InitialConsonantDeletion => "initial consonant deletion",
            PhonologicalProcess::WeakSyllableDeletion => "weak syllable deletion",
            PhonologicalProcess::Epenthesis => "epenthesis",
        }
    }
}

impl fmt::Display for PhonologicalProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PhonologicalProcess {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        PhonologicalProcess::ALL
            .iter()
            .copied()
            .find(|process| process.name() == s)
            .ok_or_else(|| ScoringError::UnknownProcess {
                name: s.to_string(),
            })
    }
}

impl From<PhonologicalProcess> for String {
    fn from(process: PhonologicalProcess) -> Self {
        process.name().to_string()
    }
}

impl TryFrom<String> for PhonologicalProcess {
    type Error = ScoringError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// When a process is expected to have resolved in typical development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Months(u32),
    /// Never part of typical development; always flagged.
    Atypical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemResult {
    #[serde(rename = "Age Appropriate")]
    AgeAppropriate,
    #[serde(rename = "Delayed")]
    Delayed,
    #[serde(rename = "Incorrect but Age Appropriate")]
    IncorrectButAgeAppropriate,
}

impl ItemResult {
    pub fn label(&self) -> &'static str {
        match self {
            ItemResult::AgeAppropriate => "Age Appropriate",
            ItemResult::Delayed => "Delayed",
            ItemResult::IncorrectButAgeAppropriate => "Incorrect but Age Appropriate",
        }
    }
}

impl fmt::Display for ItemResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessStatus {
    #[serde(rename = "Delayed")]
    Delayed,
    #[serde(rename = "Age Appropriate")]
    AgeAppropriate,
}

impl ProcessStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProcessStatus::Delayed => "Delayed",
            ProcessStatus::AgeAppropriate => "Age Appropriate",
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub name: String,
    pub age_months: u32,
}

/// One scored (sound, position) cell of the assessment sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentItem {
    pub sound: String,
    pub position: Position,
    pub produced: String,
}

impl AssessmentItem {
    pub fn new(sound: impl Into<String>, position: Position, produced: impl Into<String>) -> Self {
        Self {
            sound: sound.into(),
            position,
            produced: produced.into(),
        }
    }

    /// An item recorded as produced correctly, the sheet default.
    pub fn correct(sound: impl Into<String>, position: Position) -> Self {
        let sound = sound.into();
        Self {
            produced: sound.clone(),
            sound,
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessFinding {
    pub process: PhonologicalProcess,
    pub target: String,
    pub produced: String,
    pub status: ProcessStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub sound: String,
    pub position: Position,
    pub produced: String,
    pub mastery_age_months: u32,
    pub result: ItemResult,
    pub finding: Option<ProcessFinding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryEntry {
    pub sound: String,
    pub position: Position,
    pub mastery_age_months: u32,
}

impl MasteryEntry {
    /// Whole years, as shown on the summary report.
    pub fn expected_by_years(&self) -> u32 {
        self.mastery_age_months / 12
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSummaryEntry {
    pub process: PhonologicalProcess,
    pub target: String,
    pub produced: String,
    pub resolution: Resolution,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSummary {
    pub atypical: Vec<ProcessSummaryEntry>,
    pub typical: Vec<ProcessSummaryEntry>,
}

impl ProcessSummary {
    pub fn is_empty(&self) -> bool {
        self.atypical.is_empty() && self.typical.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub delayed: Vec<MasteryEntry>,
    pub age_appropriate_incorrect: Vec<MasteryEntry>,
    pub processes: ProcessSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub child: Child,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<ClassificationResult>,
    pub findings: Vec<ProcessFinding>,
    pub summary: AssessmentSummary,
    pub goals: Vec<String>,
}

/// Report files the load phase can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
    Txt,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Csv, OutputFormat::Json, OutputFormat::Txt];
}
