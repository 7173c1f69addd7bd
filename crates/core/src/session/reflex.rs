use serde::Serialize;

use crate::model::OptionId;

use super::outcome::{ActionOutcome, IgnoreReason, SessionResult};
use super::progression::{AdvanceTicket, PendingAdvance, Stage};
use super::quiz::QuizSession;
use super::snapshot::RoundView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflexPhase {
    Ready,
    Playing,
    Finished,
}

/// Handle for the per-round countdown. Ticks carrying any other ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerTicket(u64);

/// A quiz where every round runs against a countdown.
#[derive(Debug, Clone)]
pub struct ReflexSession {
    quiz: QuizSession,
    phase: ReflexPhase,
    round_secs: u32,
    seconds_left: u32,
    issued: u64,
    active_timer: Option<TimerTicket>,
}

impl ReflexSession {
    #[must_use]
    pub fn new(quiz: QuizSession) -> Self {
        let round_secs = quiz.timing().round_secs.max(1);
        Self {
            quiz,
            phase: ReflexPhase::Ready,
            round_secs,
            seconds_left: round_secs,
            issued: 0,
            active_timer: None,
        }
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    #[must_use]
    pub fn phase(&self) -> ReflexPhase {
        self.phase
    }

    #[must_use]
    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    /// The countdown that should currently be running, if any.
    #[must_use]
    pub fn active_timer(&self) -> Option<TimerTicket> {
        self.active_timer
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.quiz.stage()
    }

    #[must_use]
    pub fn pending_advance(&self) -> Option<PendingAdvance> {
        self.quiz.pending_advance()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == ReflexPhase::Finished
    }

    #[must_use]
    pub fn result(&self) -> Option<SessionResult> {
        self.quiz.result()
    }

    pub fn start(&mut self) -> ActionOutcome {
        match self.phase {
            ReflexPhase::Ready => {
                self.phase = ReflexPhase::Playing;
                self.start_round();
                ActionOutcome::Started
            }
            ReflexPhase::Playing => ActionOutcome::Ignored(IgnoreReason::AlreadyStarted),
            ReflexPhase::Finished => ActionOutcome::Ignored(IgnoreReason::SessionComplete),
        }
    }

    /// One second of the round clock. Hitting zero auto-submits as timed out.
    pub fn tick(&mut self, ticket: TimerTicket) -> ActionOutcome {
        if let Some(reason) = self.playing_guard() {
            return ActionOutcome::Ignored(reason);
        }
        if self.active_timer != Some(ticket) {
            return ActionOutcome::Ignored(IgnoreReason::StaleTicket);
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left > 0 {
            return ActionOutcome::Ticked {
                seconds_left: self.seconds_left,
            };
        }
        self.active_timer = None;
        self.quiz.submit_timeout()
    }

    pub fn select_option(&mut self, option: OptionId) -> ActionOutcome {
        if let Some(reason) = self.playing_guard() {
            return ActionOutcome::Ignored(reason);
        }
        let outcome = self.quiz.select_option(option);
        if matches!(outcome, ActionOutcome::Judged(_)) {
            self.active_timer = None;
        }
        outcome
    }

    pub fn fire_advance(&mut self, ticket: AdvanceTicket) -> ActionOutcome {
        if let Some(reason) = self.playing_guard() {
            return ActionOutcome::Ignored(reason);
        }
        let outcome = self.quiz.fire_advance(ticket);
        match outcome {
            ActionOutcome::Advanced => self.start_round(),
            ActionOutcome::Completed(_) => {
                self.active_timer = None;
                self.phase = ReflexPhase::Finished;
            }
            _ => {}
        }
        outcome
    }

    /// Back to `Ready`; the player has to press start again.
    pub fn reset(&mut self) -> ActionOutcome {
        self.quiz.reset();
        self.phase = ReflexPhase::Ready;
        self.seconds_left = self.round_secs;
        self.active_timer = None;
        ActionOutcome::Reset
    }

    #[must_use]
    pub fn round_view(&self) -> RoundView {
        RoundView {
            phase: self.phase,
            seconds_left: self.seconds_left,
            round_secs: self.round_secs,
        }
    }

    fn start_round(&mut self) {
        self.seconds_left = self.round_secs;
        self.issued = self.issued.wrapping_add(1);
        self.active_timer = Some(TimerTicket(self.issued));
    }

    fn playing_guard(&self) -> Option<IgnoreReason> {
        match self.phase {
            ReflexPhase::Playing => None,
            ReflexPhase::Ready => Some(IgnoreReason::NotPlaying),
            ReflexPhase::Finished => Some(IgnoreReason::SessionComplete),
        }
    }
}
