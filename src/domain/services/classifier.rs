use crate::domain::model::{
    AssessmentItem, ClassificationResult, ItemResult, ProcessFinding, ProcessStatus, Resolution,
};
use crate::domain::services::detector;
use crate::domain::services::tables::ReferenceTables;
use crate::utils::error::Result;

/// Scores one sheet item for a child of `age_months`.
///
/// The item result compares the age against the sound's mastery age; the
/// process finding compares it against the process's resolution age. The two
/// are independent and can disagree.
pub fn classify(
    tables: &ReferenceTables,
    item: &AssessmentItem,
    age_months: u32,
) -> Result<ClassificationResult> {
    let mastery_age_months = tables.mastery_age(&item.sound)?;
    let produced = item.produced.trim();

    if produced == item.sound {
        return Ok(ClassificationResult {
            sound: item.sound.clone(),
            position: item.position,
            produced: produced.to_string(),
            mastery_age_months,
            result: ItemResult::AgeAppropriate,
            finding: None,
        });
    }

    let finding = detector::detect(tables.substitution_rules(), &item.sound, produced).map(
        |process| ProcessFinding {
            process,
            target: item.sound.clone(),
            produced: produced.to_string(),
            status: process_status(process.resolution(), age_months),
        },
    );

    let result = if age_months >= mastery_age_months {
        ItemResult::Delayed
    } else {
        ItemResult::IncorrectButAgeAppropriate
    };

    Ok(ClassificationResult {
        sound: item.sound.clone(),
        position: item.position,
        produced: produced.to_string(),
        mastery_age_months,
        result,
        finding,
    })
}

pub fn process_status(resolution: Resolution, age_months: u32) -> ProcessStatus {
    match resolution {
        Resolution::Atypical => ProcessStatus::Delayed,
        Resolution::Months(months) if age_months >= months => ProcessStatus::Delayed,
        Resolution::Months(_) => ProcessStatus::AgeAppropriate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PhonologicalProcess, Position};

    fn classify_one(sound: &str, produced: &str, age_months: u32) -> ClassificationResult {
        let tables = ReferenceTables::australian();
        classify(
            &tables,
            &AssessmentItem::new(sound, Position::Initial, produced),
            age_months,
        )
        .unwrap()
    }

    #[test]
    fn test_correct_production_is_age_appropriate_at_any_age() {
        let tables = ReferenceTables::australian();
        for item in tables.assessment_universe() {
            for age in [0, 48, 120] {
                let result = classify(&tables, &item, age).unwrap();
                assert_eq!(result.result, ItemResult::AgeAppropriate);
                assert!(result.finding.is_none());
            }
        }
    }

    #[test]
    fn test_item_and_process_status_can_diverge() {
        let result = classify_one("ð", "d", 80);
        assert_eq!(result.result, ItemResult::IncorrectButAgeAppropriate);
        assert_eq!(result.mastery_age_months, 84);

        let finding = result.finding.unwrap();
        assert_eq!(finding.process, PhonologicalProcess::Stopping);
        assert_eq!(finding.status, ProcessStatus::Delayed);
    }

    #[test]
    fn test_atypical_process_is_always_delayed() {
        let result = classify_one("s", "θ", 90);
        assert_eq!(result.result, ItemResult::Delayed);
        let finding = result.finding.unwrap();
        assert_eq!(finding.process, PhonologicalProcess::InterdentalLisp);
        assert_eq!(finding.status, ProcessStatus::Delayed);

        let young = classify_one("s", "θ", 30);
        assert_eq!(young.result, ItemResult::IncorrectButAgeAppropriate);
        assert_eq!(young.finding.unwrap().status, ProcessStatus::Delayed);
    }

    #[test]
    fn test_age_thresholds_are_inclusive() {
        // /k/ masters at 36 months, fronting resolves at 36 months.
        let at = classify_one("k", "t", 36);
        assert_eq!(at.result, ItemResult::Delayed);
        assert_eq!(at.finding.unwrap().status, ProcessStatus::Delayed);

        let before = classify_one("k", "t", 35);
        assert_eq!(before.result, ItemResult::IncorrectButAgeAppropriate);
        assert_eq!(before.finding.unwrap().status, ProcessStatus::AgeAppropriate);
    }

    #[test]
    fn test_unclassified_error_still_gets_item_result() {
        let result = classify_one("m", "n", 40);
        assert_eq!(result.result, ItemResult::Delayed);
        assert!(result.finding.is_none());
    }

    #[test]
    fn test_produced_is_trimmed() {
        let result = classify_one("s", " s ", 60);
        assert_eq!(result.result, ItemResult::AgeAppropriate);
        assert_eq!(result.produced, "s");
    }

    #[test]
    fn test_unknown_sound_is_an_error() {
        let tables = ReferenceTables::australian();
        let item = AssessmentItem::correct("x", Position::Initial);
        assert!(classify(&tables, &item, 48).is_err());
    }

    #[test]
    fn test_process_status() {
        assert_eq!(process_status(Resolution::Atypical, 0), ProcessStatus::Delayed);
        assert_eq!(process_status(Resolution::Months(48), 48), ProcessStatus::Delayed);
        assert_eq!(
            process_status(Resolution::Months(48), 47),
            ProcessStatus::AgeAppropriate
        );
    }
}
