use crate::feedback::{Feedback, FeedbackConfig, FeedbackState};
use crate::model::{GameKind, ItemId, OptionId};

use super::matching::MatchingSession;
use super::outcome::{ActionOutcome, IgnoreReason, SessionResult};
use super::progression::{AdvanceTicket, PendingAdvance, Stage};
use super::quiz::QuizSession;
use super::reflex::{ReflexSession, TimerTicket};
use super::snapshot::SessionSnapshot;

/// A user action, independent of the game kind it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    SelectOption(OptionId),
    SelectLeft(ItemId),
    SelectRight(ItemId),
    ConfirmMatch,
    Start,
    Reset,
}

#[derive(Debug, Clone)]
enum Inner {
    Quiz(QuizSession),
    Matching(MatchingSession),
    Reflex(ReflexSession),
}

/// Any game session plus its answer feedback.
#[derive(Debug, Clone)]
pub struct GameSession {
    inner: Inner,
    feedback: Feedback,
}

impl GameSession {
    #[must_use]
    pub fn quiz(session: QuizSession, feedback: FeedbackConfig) -> Self {
        Self::with_inner(Inner::Quiz(session), feedback)
    }

    #[must_use]
    pub fn matching(session: MatchingSession, feedback: FeedbackConfig) -> Self {
        Self::with_inner(Inner::Matching(session), feedback)
    }

    #[must_use]
    pub fn reflex(session: ReflexSession, feedback: FeedbackConfig) -> Self {
        Self::with_inner(Inner::Reflex(session), feedback)
    }

    fn with_inner(inner: Inner, feedback: FeedbackConfig) -> Self {
        Self {
            inner,
            feedback: Feedback::new(feedback),
        }
    }

    #[must_use]
    pub fn kind(&self) -> GameKind {
        match &self.inner {
            Inner::Quiz(_) => GameKind::Quiz,
            Inner::Matching(_) => GameKind::Matching,
            Inner::Reflex(_) => GameKind::Reflex,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        match &self.inner {
            Inner::Quiz(s) => s.score(),
            Inner::Matching(s) => s.score(),
            Inner::Reflex(s) => s.quiz().score(),
        }
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        match &self.inner {
            Inner::Quiz(s) => s.max_score(),
            Inner::Matching(s) => s.max_score(),
            Inner::Reflex(s) => s.quiz().max_score(),
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        match &self.inner {
            Inner::Quiz(s) => s.stage(),
            Inner::Matching(s) => s.stage(),
            Inner::Reflex(s) => s.stage(),
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<SessionResult> {
        match &self.inner {
            Inner::Quiz(s) => s.result(),
            Inner::Matching(s) => s.result(),
            Inner::Reflex(s) => s.result(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.result().is_some()
    }

    /// The advance the scheduler should currently be waiting on.
    #[must_use]
    pub fn pending_advance(&self) -> Option<PendingAdvance> {
        match &self.inner {
            Inner::Quiz(s) => s.pending_advance(),
            Inner::Matching(s) => s.pending_advance(),
            Inner::Reflex(s) => s.pending_advance(),
        }
    }

    /// The round countdown the scheduler should currently be ticking.
    #[must_use]
    pub fn active_timer(&self) -> Option<TimerTicket> {
        match &self.inner {
            Inner::Reflex(s) => s.active_timer(),
            _ => None,
        }
    }

    #[must_use]
    pub fn feedback(&self) -> FeedbackState {
        self.feedback.state()
    }

    pub fn apply(&mut self, action: GameAction) -> ActionOutcome {
        if action == GameAction::Reset {
            let outcome = self.reset_inner();
            return self.after(outcome);
        }
        let outcome = match (&mut self.inner, action) {
            (Inner::Quiz(s), GameAction::SelectOption(id)) => s.select_option(id),
            (Inner::Reflex(s), GameAction::SelectOption(id)) => s.select_option(id),
            (Inner::Reflex(s), GameAction::Start) => s.start(),
            (Inner::Matching(s), GameAction::SelectLeft(id)) => s.select_left(id),
            (Inner::Matching(s), GameAction::SelectRight(id)) => s.select_right(id),
            (Inner::Matching(s), GameAction::ConfirmMatch) => s.confirm_match(),
            _ => ActionOutcome::Ignored(IgnoreReason::WrongGameKind),
        };
        self.after(outcome)
    }

    pub fn fire_advance(&mut self, ticket: AdvanceTicket) -> ActionOutcome {
        let outcome = match &mut self.inner {
            Inner::Quiz(s) => s.fire_advance(ticket),
            Inner::Matching(s) => s.fire_advance(ticket),
            Inner::Reflex(s) => s.fire_advance(ticket),
        };
        self.after(outcome)
    }

    pub fn tick(&mut self, ticket: TimerTicket) -> ActionOutcome {
        let outcome = match &mut self.inner {
            Inner::Reflex(s) => s.tick(ticket),
            _ => ActionOutcome::Ignored(IgnoreReason::WrongGameKind),
        };
        self.after(outcome)
    }

    pub fn reset(&mut self) -> ActionOutcome {
        self.apply(GameAction::Reset)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let (question, board, round) = match &self.inner {
            Inner::Quiz(s) => (s.view(), None, None),
            Inner::Matching(s) => (None, Some(s.view()), None),
            Inner::Reflex(s) => (s.quiz().view(), None, Some(s.round_view())),
        };
        SessionSnapshot {
            kind: self.kind(),
            stage: self.stage(),
            score: self.score(),
            max_score: self.max_score(),
            result: self.result(),
            question,
            board,
            round,
            feedback: self.feedback.state(),
        }
    }

    fn reset_inner(&mut self) -> ActionOutcome {
        match &mut self.inner {
            Inner::Quiz(s) => s.reset(),
            Inner::Matching(s) => s.reset(),
            Inner::Reflex(s) => s.reset(),
        }
    }

    fn after(&mut self, outcome: ActionOutcome) -> ActionOutcome {
        match outcome {
            ActionOutcome::Judged(judgement) => {
                let points = self.feedback.config().points_per_correct;
                self.feedback
                    .show_correct_answer_feedback(points, judgement.verdict.is_correct());
            }
            ActionOutcome::Advanced | ActionOutcome::Completed(_) | ActionOutcome::Reset => {
                self.feedback.reset_feedback();
            }
            _ => {}
        }
        outcome
    }
}
