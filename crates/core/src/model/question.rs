use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{OptionId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question bank cannot be empty")]
    EmptyBank,

    #[error("duplicate question id {0}")]
    DuplicateQuestion(QuestionId),

    #[error("question {0} has a blank prompt")]
    BlankPrompt(QuestionId),

    #[error("question {question} needs at least two options, found {found}")]
    TooFewOptions { question: QuestionId, found: usize },

    #[error("question {question} repeats option id {option}")]
    DuplicateOption {
        question: QuestionId,
        option: OptionId,
    },

    #[error("question {question} option {option} has a blank label")]
    BlankLabel {
        question: QuestionId,
        option: OptionId,
    },

    #[error("question {question} must have exactly one correct option, found {found}")]
    CorrectCount { question: QuestionId, found: usize },
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: OptionId,
    pub label: String,
    pub is_correct: bool,
}

impl QuizOption {
    #[must_use]
    pub fn new(id: u64, label: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: OptionId::new(id),
            label: label.into(),
            is_correct,
        }
    }
}

/// A single-choice question. Display text may be plain text or emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<QuizOption>,
}

impl QuizQuestion {
    #[must_use]
    pub fn new(id: u64, prompt: impl Into<String>, options: Vec<QuizOption>) -> Self {
        Self {
            id: QuestionId::new(id),
            prompt: prompt.into(),
            options,
        }
    }

    #[must_use]
    pub fn option(&self, id: OptionId) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.id == id)
    }

    /// The single correct option. Always present once the question sits in a bank.
    #[must_use]
    pub fn correct_option(&self) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.is_correct)
    }

    /// `None` when the option does not belong to this question.
    #[must_use]
    pub fn is_correct(&self, id: OptionId) -> Option<bool> {
        self.option(id).map(|option| option.is_correct)
    }

    fn validate(&self) -> Result<(), QuestionError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::BlankPrompt(self.id));
        }
        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                question: self.id,
                found: self.options.len(),
            });
        }

        let mut seen = HashSet::with_capacity(self.options.len());
        for option in &self.options {
            if !seen.insert(option.id) {
                return Err(QuestionError::DuplicateOption {
                    question: self.id,
                    option: option.id,
                });
            }
            if option.label.trim().is_empty() {
                return Err(QuestionError::BlankLabel {
                    question: self.id,
                    option: option.id,
                });
            }
        }

        let found = self.options.iter().filter(|option| option.is_correct).count();
        if found != 1 {
            return Err(QuestionError::CorrectCount {
                question: self.id,
                found,
            });
        }
        Ok(())
    }
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

/// Ordered, validated list of questions. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<QuizQuestion>,
}

impl QuestionBank {
    /// Validate and wrap a list of questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the bank is empty, ids repeat, or any question
    /// does not have exactly one correct option.
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, QuestionError> {
        if questions.is_empty() {
            return Err(QuestionError::EmptyBank);
        }
        let mut ids = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !ids.insert(question.id) {
                return Err(QuestionError::DuplicateQuestion(question.id));
            }
            question.validate()?;
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u64, correct: &[bool]) -> QuizQuestion {
        let options = correct
            .iter()
            .enumerate()
            .map(|(i, &ok)| QuizOption::new(i as u64 + 1, format!("opt {i}"), ok))
            .collect();
        QuizQuestion::new(id, format!("Q{id}"), options)
    }

    #[test]
    fn bank_accepts_single_correct_answers() {
        let bank = QuestionBank::new(vec![
            question(1, &[true, false, false]),
            question(2, &[false, true]),
        ])
        .unwrap();
        assert_eq!(bank.len(), 2);
        for q in bank.questions() {
            assert_eq!(q.options.iter().filter(|o| o.is_correct).count(), 1);
        }
    }

    #[test]
    fn bank_rejects_two_correct_options() {
        let err = QuestionBank::new(vec![question(1, &[true, true])]).unwrap_err();
        assert_eq!(
            err,
            QuestionError::CorrectCount {
                question: QuestionId::new(1),
                found: 2
            }
        );
    }

    #[test]
    fn bank_rejects_no_correct_option() {
        let err = QuestionBank::new(vec![question(1, &[false, false])]).unwrap_err();
        assert!(matches!(err, QuestionError::CorrectCount { found: 0, .. }));
    }

    #[test]
    fn bank_rejects_empty_and_duplicates() {
        assert_eq!(QuestionBank::new(vec![]).unwrap_err(), QuestionError::EmptyBank);
        let err = QuestionBank::new(vec![question(7, &[true, false]), question(7, &[true, false])])
            .unwrap_err();
        assert_eq!(err, QuestionError::DuplicateQuestion(QuestionId::new(7)));
    }

    #[test]
    fn question_rejects_blank_label_and_single_option() {
        let blank = QuizQuestion::new(
            1,
            "Q",
            vec![QuizOption::new(1, " ", true), QuizOption::new(2, "b", false)],
        );
        assert!(matches!(
            QuestionBank::new(vec![blank]).unwrap_err(),
            QuestionError::BlankLabel { .. }
        ));
        let lonely = QuizQuestion::new(1, "Q", vec![QuizOption::new(1, "a", true)]);
        assert!(matches!(
            QuestionBank::new(vec![lonely]).unwrap_err(),
            QuestionError::TooFewOptions { found: 1, .. }
        ));
    }

    #[test]
    fn is_correct_distinguishes_foreign_options() {
        let q = question(1, &[false, true]);
        assert_eq!(q.is_correct(OptionId::new(2)), Some(true));
        assert_eq!(q.is_correct(OptionId::new(1)), Some(false));
        assert_eq!(q.is_correct(OptionId::new(99)), None);
        assert_eq!(q.correct_option().map(|o| o.id), Some(OptionId::new(2)));
    }
}
