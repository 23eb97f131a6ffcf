use crate::libflagfinder::dataset::Entry;
use crate::libflagfinder::question::{self, Question, QuizKind};
use crate::libflagfinder::settings::Settings;
use crate::libflagfinder::timer::CountdownTimer;
use log::debug;

/// Outcome of resolving the current question.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Correct,
    Incorrect { correct: Entry },
    /// The timer ran out first. The correct entry is recorded as the
    /// selection so nothing shows up flagged incorrect.
    TimedOut { correct: Entry },
    /// Already answered, the input changes nothing.
    Ignored,
}

/// One quiz run: the current question, the answered/unanswered state and
/// the countdown. Lives in memory only and dies with the front end.
#[derive(Debug)]
pub struct Session {
    entries: Vec<Entry>,
    kind: QuizKind,
    pub question: Question,
    pub timer: CountdownTimer,
    timer_enabled: bool,
    selected: Option<String>,
    pub answered_count: u32,
    pub correct_count: u32,
}

impl Session {
    /// None when the dataset is empty.
    pub fn new(entries: Vec<Entry>, kind: QuizKind, settings: &Settings) -> Option<Session> {
        let question = question::generate(&entries, kind)?;
        let mut timer = CountdownTimer::new(settings.timer_duration);
        if settings.timer_enabled {
            timer.start();
        }
        Some(Session {
            entries,
            kind,
            question,
            timer,
            timer_enabled: settings.timer_enabled,
            selected: None,
            answered_count: 0,
            correct_count: 0,
        })
    }

    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    pub fn answered(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected_code(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// First selection resolves the question and stops the timer; anything
    /// after that is ignored.
    pub fn select(&mut self, code: &str) -> Answer {
        if self.answered() {
            return Answer::Ignored;
        }
        self.selected = Some(code.to_string());
        self.timer.stop();
        self.answered_count += 1;
        if code == self.question.correct.code {
            self.correct_count += 1;
            Answer::Correct
        } else {
            Answer::Incorrect {
                correct: self.question.correct.clone(),
            }
        }
    }

    /// Timer expiry with no prior selection: the correct entry becomes the
    /// selection, no wrong answer is recorded.
    pub fn time_up(&mut self) -> Answer {
        if self.answered() {
            return Answer::Ignored;
        }
        debug!("[Quiz] Time up on {:?}.", self.question.correct.code);
        self.selected = Some(self.question.correct.code.clone());
        self.timer.stop();
        self.answered_count += 1;
        Answer::TimedOut {
            correct: self.question.correct.clone(),
        }
    }

    pub fn next_question(&mut self) {
        // the entry list is non-empty, Session::new checked
        if let Some(question) = question::generate(&self.entries, self.kind) {
            self.question = question;
        }
        self.selected = None;
        if self.timer_enabled {
            self.timer.start();
        }
    }

    /// Enter advances only once feedback is shown. Returns whether a new
    /// question was generated.
    pub fn handle_enter(&mut self) -> bool {
        if self.answered() {
            self.next_question();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<Entry> {
        ["fr", "de", "es", "it", "pt", "nl"]
            .iter()
            .map(|code| Entry {
                code: code.to_string(),
                name: code.to_uppercase(),
                group: None,
                sentences: Vec::new(),
            })
            .collect()
    }

    fn session(timer_enabled: bool) -> Session {
        let settings = Settings {
            timer_enabled,
            ..Settings::default()
        };
        Session::new(entries(), QuizKind::Flags, &settings).unwrap()
    }

    #[test]
    fn empty_dataset_yields_no_session() {
        assert!(Session::new(Vec::new(), QuizKind::Flags, &Settings::default()).is_none());
    }

    #[test]
    fn correct_selection_is_scored() {
        let mut session = session(false);
        let correct = session.question.correct.code.clone();
        assert_eq!(session.select(&correct), Answer::Correct);
        assert!(session.answered());
        assert_eq!(session.correct_count, 1);
        assert_eq!(session.answered_count, 1);
    }

    #[test]
    fn incorrect_selection_reports_the_correct_entry() {
        let mut session = session(false);
        let correct = session.question.correct.clone();
        let wrong = session
            .question
            .options
            .iter()
            .find(|o| o.code != correct.code)
            .unwrap()
            .code
            .clone();
        assert_eq!(session.select(&wrong), Answer::Incorrect { correct });
        assert_eq!(session.correct_count, 0);
    }

    #[test]
    fn selection_after_answered_is_ignored() {
        let mut session = session(false);
        let correct = session.question.correct.code.clone();
        session.select(&correct);
        assert_eq!(session.select(&correct), Answer::Ignored);
        assert_eq!(session.answered_count, 1);
        assert_eq!(session.selected_code(), Some(correct.as_str()));
    }

    #[test]
    fn selection_stops_the_timer() {
        let mut session = session(true);
        assert!(session.timer.running());
        let correct = session.question.correct.code.clone();
        session.select(&correct);
        assert!(!session.timer.running());
    }

    #[test]
    fn time_up_records_the_correct_entry_as_selected() {
        let mut session = session(true);
        let correct = session.question.correct.clone();
        assert_eq!(
            session.time_up(),
            Answer::TimedOut {
                correct: correct.clone()
            }
        );
        assert!(session.answered());
        assert_eq!(session.selected_code(), Some(correct.code.as_str()));
        assert_eq!(session.correct_count, 0);
        assert!(!session.timer.running());
    }

    #[test]
    fn time_up_after_answer_is_ignored() {
        let mut session = session(true);
        let correct = session.question.correct.code.clone();
        session.select(&correct);
        assert_eq!(session.time_up(), Answer::Ignored);
        assert_eq!(session.answered_count, 1);
    }

    #[test]
    fn enter_while_unanswered_does_nothing() {
        let mut session = session(false);
        assert!(!session.handle_enter());
        assert!(!session.answered());
        assert_eq!(session.answered_count, 0);
    }

    #[test]
    fn enter_while_answered_advances_and_resets() {
        let mut session = session(true);
        let correct = session.question.correct.code.clone();
        session.select(&correct);
        assert!(!session.timer.running());

        assert!(session.handle_enter());
        assert!(!session.answered());
        assert!(session.timer.running());
    }

    #[test]
    fn next_question_does_not_restart_a_disabled_timer() {
        let mut session = session(false);
        let correct = session.question.correct.code.clone();
        session.select(&correct);
        session.next_question();
        assert!(!session.timer.running());
    }
}
