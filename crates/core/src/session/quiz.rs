use std::sync::Arc;

use crate::model::{OptionId, QuestionBank, QuestionId, QuizQuestion};

use super::outcome::{ActionOutcome, IgnoreReason, Judgement, PassThreshold, SessionResult, Verdict};
use super::progression::{AdvanceTicket, PendingAdvance, Progression, Stage, TimingConfig};
use super::snapshot::{OptionView, QuestionView};

/// One resolved question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    /// `None` when the round timed out.
    pub chosen: Option<OptionId>,
    pub verdict: Verdict,
}

/// Single-choice session stepping through a question bank in order.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    timing: TimingConfig,
    threshold: PassThreshold,
    current: usize,
    score: u32,
    answers: Vec<AnswerRecord>,
    progression: Progression,
    result: Option<SessionResult>,
}

impl QuizSession {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, timing: TimingConfig, threshold: PassThreshold) -> Self {
        Self {
            bank,
            timing,
            threshold,
            current: 0,
            score: 0,
            answers: Vec::new(),
            progression: Progression::new(),
            result: None,
        }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.bank.get(self.current)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        u32::try_from(self.bank.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Whether the current question is locked in.
    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answers.len() > self.current
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.progression.stage()
    }

    #[must_use]
    pub fn pending_advance(&self) -> Option<PendingAdvance> {
        self.progression.pending()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn result(&self) -> Option<SessionResult> {
        self.result
    }

    /// Judge `option` against the current question.
    pub fn select_option(&mut self, option: OptionId) -> ActionOutcome {
        if let Some(reason) = self.answer_guard() {
            return ActionOutcome::Ignored(reason);
        }
        let verdict = match self.current_question().and_then(|q| q.is_correct(option)) {
            Some(true) => Verdict::Correct,
            Some(false) => Verdict::Incorrect,
            None => return ActionOutcome::Ignored(IgnoreReason::UnknownOption),
        };
        self.resolve(Some(option), verdict)
    }

    /// Resolve the current question as unanswered.
    pub fn submit_timeout(&mut self) -> ActionOutcome {
        if let Some(reason) = self.answer_guard() {
            return ActionOutcome::Ignored(reason);
        }
        self.resolve(None, Verdict::TimedOut)
    }

    /// Called once the feedback delay for `ticket` has elapsed.
    pub fn fire_advance(&mut self, ticket: AdvanceTicket) -> ActionOutcome {
        if !self.progression.begin_advance(ticket) {
            return ActionOutcome::Ignored(IgnoreReason::StaleTicket);
        }
        if self.current + 1 >= self.bank.len() {
            self.progression.settle(true);
            let max_score = self.max_score();
            let result = SessionResult {
                final_score: self.score,
                max_score,
                outcome: self.threshold.outcome(self.score, max_score),
            };
            self.result = Some(result);
            return ActionOutcome::Completed(result);
        }
        self.current += 1;
        self.progression.settle(false);
        ActionOutcome::Advanced
    }

    /// "Try again": back to the first question with a zero score.
    pub fn reset(&mut self) -> ActionOutcome {
        self.current = 0;
        self.score = 0;
        self.answers.clear();
        self.result = None;
        self.progression.reset();
        ActionOutcome::Reset
    }

    #[must_use]
    pub fn view(&self) -> Option<QuestionView> {
        let question = self.current_question()?;
        let record = self.answers.get(self.current);
        let options = question
            .options
            .iter()
            .map(|option| OptionView {
                id: option.id,
                label: option.label.clone(),
                chosen: record.is_some_and(|r| r.chosen == Some(option.id)),
                correct: record.map(|_| option.is_correct),
            })
            .collect();
        Some(QuestionView {
            id: question.id,
            number: self.current + 1,
            total: self.bank.len(),
            prompt: question.prompt.clone(),
            options,
            verdict: record.map(|r| r.verdict),
        })
    }

    fn answer_guard(&self) -> Option<IgnoreReason> {
        if self.is_complete() {
            Some(IgnoreReason::SessionComplete)
        } else if self.is_answered() || !self.progression.is_idle() {
            Some(IgnoreReason::AlreadyAnswered)
        } else {
            None
        }
    }

    fn resolve(&mut self, chosen: Option<OptionId>, verdict: Verdict) -> ActionOutcome {
        let Some(question_id) = self.current_question().map(|q| q.id) else {
            return ActionOutcome::Ignored(IgnoreReason::SessionComplete);
        };
        let Some(pending) = self.progression.lock(self.timing.delay_for(verdict)) else {
            return ActionOutcome::Ignored(IgnoreReason::AlreadyAnswered);
        };
        if verdict.is_correct() {
            self.score += 1;
        }
        self.answers.push(AnswerRecord {
            question_id,
            chosen,
            verdict,
        });
        ActionOutcome::Judged(Judgement {
            verdict,
            score: self.score,
            ticket: pending.ticket,
        })
    }
}
