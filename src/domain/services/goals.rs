use crate::domain::model::MasteryEntry;

/// One SMART goal per delayed (sound, position), in order.
pub fn make_goals(child_name: &str, delayed: &[MasteryEntry]) -> Vec<String> {
    delayed
        .iter()
        .map(|entry| {
            format!(
                "{} will accurately produce the /{}/ sound in the {} position of single words \
                 with 80% accuracy across 3 consecutive sessions, following auditory \
                 discrimination and isolation practice, after 3 weeks of traditional \
                 articulation therapy.",
                child_name,
                entry.sound,
                entry.position.as_str().to_lowercase()
            )
        })
        .collect()
}
