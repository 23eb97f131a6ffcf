use crate::libflagfinder::dataset::Entry;
use clap::ValueEnum;
use log::debug;
use rand::rng;
use rand::seq::{IndexedRandom, SliceRandom};

pub const MAX_DISTRACTORS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuizKind {
    /// Devine le pays à partir de son drapeau.
    Flags,
    /// Devine la langue à partir d'une phrase.
    Scripts,
}

#[derive(Debug, Clone)]
pub struct Question {
    pub correct: Entry,
    pub sentence: Option<String>,
    pub options: Vec<Entry>,
}

/// Picks a correct entry uniformly at random, up to four distractors
/// (restricted to the correct entry's group for the scripts quiz) and
/// shuffles the combined option list. A group with fewer than five
/// members just yields a shorter list. Returns None on an empty dataset.
pub fn generate(entries: &[Entry], kind: QuizKind) -> Option<Question> {
    let correct = entries.choose(&mut rng())?.clone();

    let sentence = match kind {
        QuizKind::Flags => None,
        QuizKind::Scripts => correct.sentences.choose(&mut rng()).cloned(),
    };

    let mut distractors: Vec<Entry> = entries
        .iter()
        .filter(|e| e.code != correct.code)
        .filter(|e| kind == QuizKind::Flags || e.group == correct.group)
        .cloned()
        .collect();
    distractors.shuffle(&mut rng());
    distractors.truncate(MAX_DISTRACTORS);

    let mut options = vec![correct.clone()];
    options.extend(distractors);
    options.shuffle(&mut rng());

    debug!(
        "[Quiz] Generated question for {:?} with {} options.",
        correct.code,
        options.len()
    );
    Some(Question {
        correct,
        sentence,
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, name: &str, group: Option<&str>) -> Entry {
        Entry {
            code: code.into(),
            name: name.into(),
            group: group.map(String::from),
            sentences: vec![format!("phrase {}", code)],
        }
    }

    fn countries() -> Vec<Entry> {
        vec![
            entry("fr", "France", None),
            entry("de", "Germany", None),
            entry("es", "Spain", None),
            entry("it", "Italy", None),
            entry("pt", "Portugal", None),
            entry("nl", "Netherlands", None),
        ]
    }

    #[test]
    fn options_contain_correct_exactly_once_and_no_duplicates() {
        let entries = countries();
        for _ in 0..200 {
            let q = generate(&entries, QuizKind::Flags).unwrap();
            let hits = q.options.iter().filter(|o| o.code == q.correct.code).count();
            assert_eq!(hits, 1);
            for (i, a) in q.options.iter().enumerate() {
                for b in &q.options[i + 1..] {
                    assert_ne!(a.code, b.code);
                }
            }
        }
    }

    #[test]
    fn six_entries_yield_five_options() {
        // five remaining codes, four picked as distractors
        let entries = countries();
        for _ in 0..50 {
            let q = generate(&entries, QuizKind::Flags).unwrap();
            assert_eq!(q.options.len(), MAX_DISTRACTORS + 1);
            assert!(q.options.iter().all(|o| entries.contains(o)));
        }
    }

    #[test]
    fn grouped_distractors_share_the_correct_group() {
        let entries = vec![
            entry("ja", "Japonais", Some("asie-est")),
            entry("ko", "Coréen", Some("asie-est")),
            entry("zh", "Chinois", Some("asie-est")),
            entry("fr", "Français", Some("europe-ouest")),
            entry("es", "Espagnol", Some("europe-ouest")),
            entry("it", "Italien", Some("europe-ouest")),
        ];
        for _ in 0..200 {
            let q = generate(&entries, QuizKind::Scripts).unwrap();
            for option in &q.options {
                assert_eq!(option.group, q.correct.group);
            }
        }
    }

    #[test]
    fn small_group_yields_short_option_list() {
        let entries = vec![
            entry("th", "Thaï", Some("asie-sud-est")),
            entry("vi", "Vietnamien", Some("asie-sud-est")),
            entry("ja", "Japonais", Some("asie-est")),
        ];
        for _ in 0..50 {
            let q = generate(&entries, QuizKind::Scripts).unwrap();
            assert!(q.options.len() <= 2);
            assert!(q.options.iter().any(|o| o.code == q.correct.code));
        }
    }

    #[test]
    fn scripts_questions_carry_a_sentence_from_the_correct_entry() {
        let entries = vec![
            entry("ja", "Japonais", Some("asie-est")),
            entry("ko", "Coréen", Some("asie-est")),
        ];
        for _ in 0..50 {
            let q = generate(&entries, QuizKind::Scripts).unwrap();
            let sentence = q.sentence.unwrap();
            assert!(q.correct.sentences.contains(&sentence));
        }
    }

    #[test]
    fn flags_questions_have_no_sentence() {
        let q = generate(&countries(), QuizKind::Flags).unwrap();
        assert!(q.sentence.is_none());
    }

    #[test]
    fn empty_dataset_yields_no_question() {
        assert!(generate(&[], QuizKind::Flags).is_none());
    }
}
